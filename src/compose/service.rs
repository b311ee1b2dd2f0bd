// ABOUTME: A single compose service built from its YAML mapping.
// ABOUTME: Every modeled field is validated once, at construction.

use super::capability::Capability;
use super::command::Command;
use super::element::{ComposePath, StringOrList, ValidationError, describe, expect_string};
use super::environment::{EnvFileRef, Environment, env_files_from_value};
use super::port::{PortMapping, expose_from_value, ports_from_value};
use super::quantity::{ByteSize, CpuQuantity, parse_duration};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeSet;
use std::time::Duration;

/// A service definition from the `services` section.
#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    pub name: String,
    pub image: Option<String>,
    pub container_name: Option<String>,
    pub ports: Option<Vec<PortMapping>>,
    pub expose: Option<Vec<u16>>,
    pub environment: Option<Environment>,
    pub env_file: Option<Vec<EnvFileRef>>,
    pub command: Option<Command>,
    pub entrypoint: Option<Command>,
    pub cpus: Option<CpuQuantity>,
    pub mem_reservation: Option<ByteSize>,
    pub deploy: Option<Deploy>,
    pub cap_add: Option<BTreeSet<Capability>>,
    pub cap_drop: Option<BTreeSet<Capability>>,
    pub stop_grace_period: Option<Duration>,
}

/// The `deploy` section. Only resource reservations are modeled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deploy {
    pub resources: Option<Resources>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resources {
    pub reservations: Option<Reservations>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reservations {
    pub cpus: Option<CpuQuantity>,
    pub memory: Option<ByteSize>,
}

impl Service {
    pub fn from_value(name: &str, value: &Value) -> Result<Self, ValidationError> {
        let path = ComposePath::service(name);
        let map = expect_mapping(value, &path)?;

        Ok(Service {
            name: name.to_string(),
            image: field(map, &path, "image", expect_string)?,
            container_name: field(map, &path, "container_name", expect_string)?,
            ports: field(map, &path, "ports", ports_from_value)?,
            expose: field(map, &path, "expose", expose_from_value)?,
            environment: field(map, &path, "environment", Environment::from_value)?,
            env_file: field(map, &path, "env_file", env_files_from_value)?,
            command: field(map, &path, "command", Command::from_value)?,
            entrypoint: field(map, &path, "entrypoint", Command::from_value)?,
            cpus: field(map, &path, "cpus", CpuQuantity::from_value)?,
            mem_reservation: field(map, &path, "mem_reservation", ByteSize::from_value)?,
            deploy: field(map, &path, "deploy", Deploy::from_value)?,
            cap_add: field(map, &path, "cap_add", capabilities_from_value)?,
            cap_drop: field(map, &path, "cap_drop", capabilities_from_value)?,
            stop_grace_period: field(map, &path, "stop_grace_period", parse_duration)?,
        })
    }

    /// Resource reservations under `deploy.resources`, when that section exists.
    pub fn deploy_resources(&self) -> Option<&Resources> {
        self.deploy.as_ref().and_then(|d| d.resources.as_ref())
    }
}

impl Deploy {
    fn from_value(value: &Value, path: &ComposePath) -> Result<Self, ValidationError> {
        let map = expect_mapping(value, path)?;
        Ok(Deploy {
            resources: field(map, path, "resources", Resources::from_value)?,
        })
    }
}

impl Resources {
    fn from_value(value: &Value, path: &ComposePath) -> Result<Self, ValidationError> {
        let map = expect_mapping(value, path)?;
        Ok(Resources {
            reservations: field(map, path, "reservations", Reservations::from_value)?,
        })
    }
}

impl Reservations {
    fn from_value(value: &Value, path: &ComposePath) -> Result<Self, ValidationError> {
        let map = expect_mapping(value, path)?;
        Ok(Reservations {
            cpus: field(map, path, "cpus", CpuQuantity::from_value)?,
            memory: field(map, path, "memory", ByteSize::from_value)?,
        })
    }
}

fn capabilities_from_value(
    value: &Value,
    path: &ComposePath,
) -> Result<BTreeSet<Capability>, ValidationError> {
    let caps = StringOrList::<Capability>::from_value(value, path)?;
    Ok(caps.into_items().into_iter().collect())
}

fn expect_mapping<'a>(value: &'a Value, path: &ComposePath) -> Result<&'a Mapping, ValidationError> {
    value
        .as_mapping()
        .ok_or_else(|| path.invalid(format!("expected a mapping, got {}", describe(value))))
}

/// Parse an optional field. Absent and null values both mean "not set".
fn field<T>(
    map: &Mapping,
    parent: &ComposePath,
    key: &str,
    parse: impl Fn(&Value, &ComposePath) -> Result<T, ValidationError>,
) -> Result<Option<T>, ValidationError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => parse(value, &parent.field(key)).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(yaml: &str) -> Result<Service, ValidationError> {
        let value: Value = serde_yaml::from_str(yaml).unwrap();
        Service::from_value("web", &value)
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let svc = service("image: nginx\nrestart: always\nvolumes: [data:/data]").unwrap();
        assert_eq!(svc.image.as_deref(), Some("nginx"));
    }

    #[test]
    fn null_fields_are_unset() {
        let svc = service("image: nginx\nports:\nenvironment:").unwrap();
        assert!(svc.ports.is_none());
        assert!(svc.environment.is_none());
    }

    #[test]
    fn nested_reservations() {
        let svc = service(
            "image: app\ndeploy:\n  resources:\n    reservations:\n      cpus: '0.75'\n      memory: 1536M\n",
        )
        .unwrap();
        let reservations = svc
            .deploy_resources()
            .and_then(|r| r.reservations.as_ref())
            .unwrap();
        assert_eq!(reservations.cpus.unwrap().to_string(), "0.75");
        assert_eq!(reservations.memory.unwrap().gigabytes(), 1.5);
    }

    #[test]
    fn bad_nested_field_reports_full_path() {
        let err = service("deploy:\n  resources:\n    reservations:\n      memory: lots\n")
            .unwrap_err();
        assert_eq!(
            err.path.to_string(),
            "services.web.deploy.resources.reservations.memory"
        );
    }

    #[test]
    fn capabilities_deduplicate() {
        let svc = service("cap_add: [CAP_NET_ADMIN, CAP_SYS_ADMIN, CAP_NET_ADMIN]").unwrap();
        assert_eq!(svc.cap_add.unwrap().len(), 2);
    }

    #[test]
    fn unknown_capability_names_service_and_field() {
        let err = service("cap_drop: CAP_NOT_REAL").unwrap_err();
        assert_eq!(err.path.service_name(), "web");
        assert_eq!(err.path.field_path(), "cap_drop");
        assert!(err.to_string().contains("CAP_NOT_REAL"));
    }

    #[test]
    fn non_mapping_service_is_rejected() {
        let err = service("- nginx").unwrap_err();
        assert_eq!(err.path.to_string(), "services.web");
    }

    #[test]
    fn image_must_be_a_string() {
        let err = service("image: [nginx]").unwrap_err();
        assert_eq!(err.path.field_path(), "image");
    }
}
