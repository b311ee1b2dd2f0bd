// ABOUTME: Deployment parameters for one service.
// ABOUTME: The record handed to a deployer, serializable for JSON output.

use super::registry::Registry;
use crate::resolve::{Ingress, ResourceRequest, StartupCommand, Transport};
use indexmap::IndexMap;
use serde::Serialize;

/// Everything a deployer needs to create one container app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentRecord {
    pub service_name: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_name: Option<String>,
    #[serde(flatten)]
    pub ingress: Ingress,
    pub transport: Transport,
    #[serde(flatten)]
    pub startup: StartupCommand,
    #[serde(flatten)]
    pub resources: ResourceRequest,
    pub environment: Option<IndexMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<Registry>,
}

impl DeploymentRecord {
    pub fn ingress_mode(&self) -> Option<&'static str> {
        self.ingress.mode()
    }

    pub fn target_port(&self) -> Option<u16> {
        self.ingress.target_port()
    }

    /// Environment as `KEY=VALUE` strings, in merge order.
    pub fn env_vars(&self) -> Option<Vec<String>> {
        self.environment.as_ref().map(|vars| {
            vars.iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deploy::RegistryLogin;

    fn record() -> DeploymentRecord {
        DeploymentRecord {
            service_name: "web".to_string(),
            image: "nginx:latest".to_string(),
            container_name: None,
            ingress: Ingress::External { target_port: 80 },
            transport: Transport::Auto,
            startup: StartupCommand::default(),
            resources: ResourceRequest {
                cpu: Some("0.5".to_string()),
                memory: Some("1.0Gi".to_string()),
            },
            environment: Some(IndexMap::from([
                ("B".to_string(), "2".to_string()),
                ("A".to_string(), "1".to_string()),
            ])),
            registry: None,
        }
    }

    #[test]
    fn env_vars_keep_order() {
        assert_eq!(record().env_vars().unwrap(), vec!["B=2", "A=1"]);
    }

    #[test]
    fn serializes_flat() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["service_name"], "web");
        assert_eq!(json["ingress"], "external");
        assert_eq!(json["target_port"], 80);
        assert_eq!(json["transport"], "auto");
        assert_eq!(json["cpu"], "0.5");
        assert_eq!(json["memory"], "1.0Gi");
        assert_eq!(json["environment"]["B"], "2");
        assert!(json.get("container_name").is_none());
        assert!(json.get("registry").is_none());
    }

    #[test]
    fn registry_serializes_without_password() {
        let mut record = record();
        record.registry = RegistryLogin {
            server: Some("foobar.azurecr.io".to_string()),
            username: Some("foobar".to_string()),
            password: Some("snafu".to_string()),
        }
        .resolve()
        .unwrap();
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["registry"]["server"], "foobar.azurecr.io");
        assert_eq!(json["registry"]["username"], "foobar");
        assert_eq!(json["registry"]["password_secret_ref"], "foobarazurecrio-foobar");
        assert!(json["registry"].get("password").is_none());
    }

    #[test]
    fn disabled_ingress_serializes_as_none() {
        let mut record = record();
        record.ingress = Ingress::Disabled;
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["ingress"], "none");
        assert!(json.get("target_port").is_none());
    }
}
