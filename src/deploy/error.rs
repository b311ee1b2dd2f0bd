// ABOUTME: Error types for planning and handing services to a deployer.
// ABOUTME: Covers services that cannot be deployed and deployer failures.

/// Errors that stop a deployment plan from being built.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PlanError {
    /// Service has no image to run.
    #[error("service '{0}' has no image")]
    MissingImage(String),

    /// Registry server given without both a username and a password.
    #[error("registry server '{0}' requires both a username and a password")]
    IncompleteRegistry(String),

    /// Registry username or password given without a server.
    #[error("registry username and password require a registry server")]
    RegistryWithoutServer,
}

/// Errors reported by a deployer.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// The deployer refused or failed to create the app.
    #[error("failed to deploy service '{service}': {reason}")]
    Rejected { service: String, reason: String },
}

impl DeployError {
    pub fn rejected(service: impl Into<String>, reason: impl Into<String>) -> Self {
        DeployError::Rejected {
            service: service.into(),
            reason: reason.into(),
        }
    }
}
