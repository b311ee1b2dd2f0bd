// ABOUTME: Compose document model: parsing and validation of compose files.
// ABOUTME: Builds ordered, immutable services from YAML or JSON text.

mod capability;
mod command;
mod element;
mod environment;
mod port;
mod quantity;
mod service;

pub use capability::Capability;
pub use command::{Command, split_words};
pub use element::{ComposePath, ListItem, StringOrList, ValidationError};
pub use environment::{EnvFileRef, Environment, parse_env_file};
pub use port::{PortMapping, Protocol};
pub use quantity::{ByteSize, CpuQuantity, format_decimal};
pub use service::{Deploy, Reservations, Resources, Service};

use element::describe;
use indexmap::IndexMap;
use serde_yaml::Value;
use thiserror::Error;

/// Reasons a compose document cannot be parsed.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("top-level element must be a mapping, got {0}")]
    NotAMapping(&'static str),

    #[error("no `services` section found")]
    MissingServices,

    #[error("`services` must be a mapping of service names, got {0}")]
    MalformedServices(&'static str),

    #[error("service names must be strings, got {0}")]
    InvalidServiceName(&'static str),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// A parsed compose file. Services keep their declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposeDocument {
    services: IndexMap<String, Service>,
}

impl ComposeDocument {
    /// Parse YAML (or JSON) text.
    pub fn from_yaml(yaml: &str) -> Result<Self, ParseError> {
        let value: Value = serde_yaml::from_str(yaml)?;
        Self::from_value(&value)
    }

    /// Build a document from an already decoded YAML tree.
    pub fn from_value(value: &Value) -> Result<Self, ParseError> {
        let root = value
            .as_mapping()
            .ok_or_else(|| ParseError::NotAMapping(describe(value)))?;

        let services_value = root.get("services").ok_or(ParseError::MissingServices)?;
        let entries = services_value
            .as_mapping()
            .ok_or_else(|| ParseError::MalformedServices(describe(services_value)))?;

        let mut services = IndexMap::with_capacity(entries.len());
        for (key, body) in entries {
            let name = key
                .as_str()
                .ok_or_else(|| ParseError::InvalidServiceName(describe(key)))?;
            let service = Service::from_value(name, body)?;
            tracing::debug!(service = name, "parsed compose service");
            services.insert(name.to_string(), service);
        }

        Ok(ComposeDocument { services })
    }

    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.get(name)
    }

    /// Services in declaration order.
    pub fn services(&self) -> impl Iterator<Item = &Service> {
        self.services.values()
    }

    /// Service names in declaration order.
    pub fn service_names(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
