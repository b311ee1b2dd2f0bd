// ABOUTME: Port mapping and expose elements.
// ABOUTME: Parses "[HOST_IP:][PUBLISHED:]TARGET[/PROTOCOL]" strings and the long mapping form.

use super::element::{ComposePath, ValidationError, describe, expect_scalar, scalar_to_string};
use serde_yaml::Value;
use std::fmt;
use std::str::FromStr;

/// Network protocol of a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    #[default]
    Tcp,
    Udp,
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tcp" => Ok(Protocol::Tcp),
            "udp" => Ok(Protocol::Udp),
            other => Err(format!("unknown protocol: {}", other)),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Tcp => write!(f, "tcp"),
            Protocol::Udp => write!(f, "udp"),
        }
    }
}

/// One entry of a service's `ports` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortMapping {
    pub host_ip: Option<String>,
    pub published: Option<u16>,
    pub target: u16,
    pub protocol: Protocol,
}

impl PortMapping {
    /// Parse the short syntax, e.g. `8080:80`, `127.0.0.1:8080:80/udp` or `80`.
    pub fn parse(spec: &str) -> Result<Self, String> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err("port mapping cannot be empty".to_string());
        }

        let (ports, protocol) = match spec.split_once('/') {
            Some((ports, proto)) => (ports, proto.parse::<Protocol>()?),
            None => (spec, Protocol::Tcp),
        };

        let mut parts = ports.rsplitn(3, ':');
        let target = parse_port(parts.next().unwrap_or_default())?;
        let published = match parts.next() {
            None | Some("") => None,
            Some(p) => Some(parse_port(p)?),
        };
        let host_ip = parts
            .next()
            .map(|ip| ip.trim_start_matches('[').trim_end_matches(']').to_string())
            .filter(|ip| !ip.is_empty());

        Ok(PortMapping {
            host_ip,
            published,
            target,
            protocol,
        })
    }

    pub fn from_value(value: &Value, path: &ComposePath) -> Result<Self, ValidationError> {
        match value {
            Value::Mapping(map) => {
                let target = map
                    .get("target")
                    .ok_or_else(|| path.invalid("long port syntax requires `target`"))?;
                let target = port_from_value(target, &path.field("target"))?;
                let published = match map.get("published") {
                    None | Some(Value::Null) => None,
                    Some(v) => Some(port_from_value(v, &path.field("published"))?),
                };
                let host_ip = match map.get("host_ip") {
                    None | Some(Value::Null) => None,
                    Some(v) => Some(expect_scalar(v, &path.field("host_ip"))?),
                };
                let protocol = match map.get("protocol") {
                    None | Some(Value::Null) => Protocol::Tcp,
                    Some(v) => expect_scalar(v, &path.field("protocol"))?
                        .parse()
                        .map_err(|reason: String| path.field("protocol").invalid(reason))?,
                };
                Ok(PortMapping {
                    host_ip,
                    published,
                    target,
                    protocol,
                })
            }
            other => {
                let spec = scalar_to_string(other).ok_or_else(|| {
                    path.invalid(format!("expected a port mapping, got {}", describe(other)))
                })?;
                PortMapping::parse(&spec).map_err(|reason| path.invalid(reason))
            }
        }
    }
}

fn parse_port(s: &str) -> Result<u16, String> {
    if s.contains('-') {
        return Err(format!("port ranges are not supported: {}", s));
    }
    match s.trim().parse::<u16>() {
        Ok(0) | Err(_) => Err(format!("invalid port: {}", s)),
        Ok(port) => Ok(port),
    }
}

fn port_from_value(value: &Value, path: &ComposePath) -> Result<u16, ValidationError> {
    let raw = expect_scalar(value, path)?;
    parse_port(&raw).map_err(|reason| path.invalid(reason))
}

/// Parse the `ports` field: a single mapping string or a list of entries.
pub fn ports_from_value(
    value: &Value,
    path: &ComposePath,
) -> Result<Vec<PortMapping>, ValidationError> {
    match value {
        Value::Sequence(entries) => entries
            .iter()
            .enumerate()
            .map(|(i, entry)| PortMapping::from_value(entry, &path.field(&i.to_string())))
            .collect(),
        other => Ok(vec![PortMapping::from_value(other, path)?]),
    }
}

/// Parse the `expose` field: container ports written as numbers or `PORT[/PROTOCOL]`.
pub fn expose_from_value(value: &Value, path: &ComposePath) -> Result<Vec<u16>, ValidationError> {
    let entries = match value {
        Value::Sequence(entries) => entries.iter().collect::<Vec<_>>(),
        other => vec![other],
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let entry_path = path.field(&i.to_string());
            let raw = expect_scalar(entry, &entry_path)?;
            let port = match raw.split_once('/') {
                Some((port, proto)) => {
                    proto
                        .parse::<Protocol>()
                        .map_err(|reason| entry_path.invalid(reason))?;
                    port
                }
                None => raw.as_str(),
            };
            parse_port(port).map_err(|reason| entry_path.invalid(reason))
        })
        .collect()
}
