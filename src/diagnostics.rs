// ABOUTME: Diagnostics accumulator for non-fatal warnings during resolution.
// ABOUTME: Collects corrections and skipped inputs that shouldn't fail a plan but should be shown to users.

/// Collects non-fatal warnings while resolving services.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!(service = warning.service.as_deref(), "{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Warnings recorded for one service.
    pub fn for_service<'a>(&'a self, service: &'a str) -> impl Iterator<Item = &'a Warning> {
        self.warnings
            .iter()
            .filter(move |w| w.service.as_deref() == Some(service))
    }
}

/// A non-fatal warning collected during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    /// Service the warning applies to, if any.
    pub service: Option<String>,
    pub message: String,
}

impl Warning {
    /// Create a warning for a memory reservation that was replaced by the tier default.
    pub fn memory_tier_mismatch(service: &str, message: impl Into<String>) -> Self {
        Self::for_service(WarningKind::MemoryTierMismatch, service, message)
    }

    /// Create a warning for a CPU reservation outside the tier table.
    pub fn invalid_cpu(service: &str, message: impl Into<String>) -> Self {
        Self::for_service(WarningKind::InvalidCpu, service, message)
    }

    /// Create a warning for a required env file that could not be read.
    pub fn env_file_unreadable(service: &str, message: impl Into<String>) -> Self {
        Self::for_service(WarningKind::EnvFileUnreadable, service, message)
    }

    /// Create a warning for a transport override naming no service.
    pub fn unmatched_transport(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::UnmatchedTransport,
            service: None,
            message: message.into(),
        }
    }

    /// Create a warning for a malformed transport override.
    pub fn invalid_transport(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::InvalidTransport,
            service: None,
            message: message.into(),
        }
    }

    fn for_service(kind: WarningKind, service: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            service: Some(service.to_string()),
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Memory reservation did not match the CPU tier and was replaced.
    MemoryTierMismatch,
    /// CPU reservation is not in the tier table; no reservation is requested.
    InvalidCpu,
    /// A transport override names a service that does not exist.
    UnmatchedTransport,
    /// A transport override is malformed or names an unknown transport.
    InvalidTransport,
    /// A required env file could not be read.
    EnvFileUnreadable,
}
