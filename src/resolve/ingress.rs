// ABOUTME: Ingress resolution from ports and expose.
// ABOUTME: Published ports make a service external; exposed-only ports make it internal.

use crate::compose::Service;
use serde::Serialize;

/// How a service's endpoint is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "ingress", rename_all = "lowercase")]
pub enum Ingress {
    /// Reachable from outside the environment.
    External { target_port: u16 },
    /// Reachable only inside the environment.
    Internal { target_port: u16 },
    /// No endpoint.
    #[serde(rename = "none")]
    Disabled,
}

impl Ingress {
    /// Platform name of the ingress mode, None when disabled.
    pub fn mode(&self) -> Option<&'static str> {
        match self {
            Ingress::External { .. } => Some("external"),
            Ingress::Internal { .. } => Some("internal"),
            Ingress::Disabled => None,
        }
    }

    pub fn target_port(&self) -> Option<u16> {
        match self {
            Ingress::External { target_port } | Ingress::Internal { target_port } => {
                Some(*target_port)
            }
            Ingress::Disabled => None,
        }
    }
}

/// Only one ingress port is supported: the first `ports` entry wins, then the
/// first `expose` entry.
pub fn resolve_ingress(service: &Service) -> Ingress {
    if let Some(port) = service.ports.as_deref().and_then(<[_]>::first) {
        return Ingress::External {
            target_port: port.target,
        };
    }

    if let Some(port) = service.expose.as_deref().and_then(<[_]>::first) {
        return Ingress::Internal { target_port: *port };
    }

    Ingress::Disabled
}
