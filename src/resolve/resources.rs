// ABOUTME: CPU and memory reservations snapped to the platform's resource tiers.
// ABOUTME: The tier table is data: it can be replaced from the settings file.

use crate::compose::{CpuQuantity, Service, format_decimal};
use crate::diagnostics::{Diagnostics, Warning};
use nonempty::NonEmpty;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TierError {
    #[error("resource tier table cannot be empty")]
    Empty,

    #[error("invalid {field} value in resource tier: {value}")]
    InvalidValue { field: &'static str, value: String },

    #[error("duplicate resource tier for {0} CPU")]
    DuplicateCpu(String),
}

/// One allowed (CPU, memory in GiB) pair, both as canonical decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTier")]
pub struct ResourceTier {
    cpu: String,
    memory: String,
}

#[derive(Deserialize)]
struct RawTier {
    cpu: serde_yaml::Value,
    memory: serde_yaml::Value,
}

impl TryFrom<RawTier> for ResourceTier {
    type Error = TierError;

    fn try_from(raw: RawTier) -> Result<Self, Self::Error> {
        let text = |field: &'static str, value: &serde_yaml::Value| match value {
            serde_yaml::Value::String(s) => Ok(s.clone()),
            serde_yaml::Value::Number(n) => Ok(n.to_string()),
            other => Err(TierError::InvalidValue {
                field,
                value: format!("{:?}", other),
            }),
        };
        ResourceTier::new(&text("cpu", &raw.cpu)?, &text("memory", &raw.memory)?)
    }
}

impl ResourceTier {
    pub fn new(cpu: &str, memory: &str) -> Result<Self, TierError> {
        Ok(ResourceTier {
            cpu: canonical_decimal("cpu", cpu)?,
            memory: canonical_decimal("memory", memory)?,
        })
    }

    pub fn cpu(&self) -> &str {
        &self.cpu
    }

    /// Memory in GiB, e.g. "1.0".
    pub fn memory(&self) -> &str {
        &self.memory
    }
}

fn canonical_decimal(field: &'static str, value: &str) -> Result<String, TierError> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(format_decimal(v)),
        _ => Err(TierError::InvalidValue {
            field,
            value: value.to_string(),
        }),
    }
}

/// The ordered set of CPU/memory pairs the platform accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTiers {
    tiers: NonEmpty<ResourceTier>,
}

const DEFAULT_TIERS: [(&str, &str); 8] = [
    ("0.25", "0.5"),
    ("0.5", "1.0"),
    ("0.75", "1.5"),
    ("1.0", "2.0"),
    ("1.25", "2.5"),
    ("1.5", "3.0"),
    ("1.75", "3.5"),
    ("2.0", "4.0"),
];

impl Default for ResourceTiers {
    fn default() -> Self {
        let tier = |(cpu, memory): &(&str, &str)| ResourceTier {
            cpu: cpu.to_string(),
            memory: memory.to_string(),
        };
        let mut tiers = NonEmpty::new(tier(&DEFAULT_TIERS[0]));
        for entry in &DEFAULT_TIERS[1..] {
            tiers.push(tier(entry));
        }
        ResourceTiers { tiers }
    }
}

impl ResourceTiers {
    pub fn new(tiers: Vec<ResourceTier>) -> Result<Self, TierError> {
        let mut seen = std::collections::HashSet::new();
        for tier in &tiers {
            if !seen.insert(tier.cpu.as_str()) {
                return Err(TierError::DuplicateCpu(tier.cpu.clone()));
            }
        }
        let tiers = NonEmpty::from_vec(tiers).ok_or(TierError::Empty)?;
        Ok(ResourceTiers { tiers })
    }

    pub fn tiers(&self) -> impl Iterator<Item = &ResourceTier> {
        self.tiers.iter()
    }

    /// The tier for a CPU value, compared in canonical decimal form.
    pub fn for_cpu(&self, cpu: &str) -> Option<&ResourceTier> {
        self.tiers.iter().find(|tier| tier.cpu == cpu)
    }

    /// Snap a requested (cpu, memory) pair onto the table.
    ///
    /// A known CPU always gets its tier's memory; a differing request is reported.
    /// An unknown CPU drops the whole reservation.
    pub fn validate(
        &self,
        service: &str,
        cpu: Option<String>,
        memory: Option<String>,
        diag: &mut Diagnostics,
    ) -> ResourceRequest {
        let Some(cpu) = cpu else {
            return ResourceRequest::default();
        };

        let Some(tier) = self.for_cpu(&cpu) else {
            diag.warn(Warning::invalid_cpu(
                service,
                format!(
                    "Invalid CPU reservation request of {}. The default resource values will be used.",
                    cpu
                ),
            ));
            return ResourceRequest::default();
        };

        if let Some(memory) = memory
            && memory != tier.memory
        {
            diag.warn(Warning::memory_tier_mismatch(
                service,
                format!(
                    "Unsupported memory reservation request of {}. The default value of {}Gi will be used.",
                    memory, tier.memory
                ),
            ));
        }

        ResourceRequest {
            cpu: Some(cpu),
            memory: Some(format!("{}Gi", tier.memory)),
        }
    }
}

/// Resolved CPU and memory reservation, e.g. ("0.5", "1.0Gi").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceRequest {
    pub cpu: Option<String>,
    pub memory: Option<String>,
}

/// Requested CPU. `deploy.resources` replaces the top-level `cpus` when present.
pub fn requested_cpu(service: &Service) -> Option<String> {
    let cpus: Option<CpuQuantity> = match service.deploy_resources() {
        Some(resources) => resources.reservations.as_ref().and_then(|r| r.cpus),
        None => service.cpus,
    };
    cpus.map(|c| c.to_string())
}

/// Requested memory in GiB. `deploy.resources` replaces `mem_reservation` when present.
pub fn requested_memory(service: &Service) -> Option<String> {
    let memory = match service.deploy_resources() {
        Some(resources) => resources.reservations.as_ref().and_then(|r| r.memory),
        None => service.mem_reservation,
    };
    memory.map(|m| format_decimal(m.gigabytes()))
}

pub fn resolve_resources(
    service: &Service,
    tiers: &ResourceTiers,
    diag: &mut Diagnostics,
) -> ResourceRequest {
    tiers.validate(
        &service.name,
        requested_cpu(service),
        requested_memory(service),
        diag,
    )
}
