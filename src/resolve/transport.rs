// ABOUTME: Transport selection from "service=transport" overrides.
// ABOUTME: Case-insensitive service match, first match wins, defaults to auto.

use crate::diagnostics::{Diagnostics, Warning};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Ingress transport protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    #[default]
    Auto,
    Http,
    Http2,
    Tcp,
}

impl FromStr for Transport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Transport::Auto),
            "http" => Ok(Transport::Http),
            "http2" => Ok(Transport::Http2),
            "tcp" => Ok(Transport::Tcp),
            other => Err(format!("unknown transport: {}", other)),
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Auto => write!(f, "auto"),
            Transport::Http => write!(f, "http"),
            Transport::Http2 => write!(f, "http2"),
            Transport::Tcp => write!(f, "tcp"),
        }
    }
}

/// Split a `name=value` override. None when the entry is malformed.
fn split_override(arg: &str) -> Option<(&str, &str)> {
    let (name, value) = arg.split_once('=')?;
    let name = name.trim();
    (!name.is_empty() && !value.contains('=')).then_some((name, value.trim()))
}

/// Pick the transport for a service from `name=value` overrides.
///
/// The first entry naming the service decides. Malformed entries are skipped;
/// an unknown transport on the deciding entry falls back to auto. See
/// [`check_transport_args`] for reporting both.
pub fn resolve_transport<S: AsRef<str>>(service_name: &str, transport_args: &[S]) -> Transport {
    transport_args
        .iter()
        .filter_map(|arg| split_override(arg.as_ref()))
        .find(|(name, _)| name.eq_ignore_ascii_case(service_name))
        .and_then(|(_, value)| value.parse().ok())
        .unwrap_or_default()
}

/// Report overrides that are malformed, name an unknown transport, or match no service.
pub fn check_transport_args<'a, S: AsRef<str>>(
    transport_args: &[S],
    service_names: impl IntoIterator<Item = &'a str> + Clone,
    diag: &mut Diagnostics,
) {
    for arg in transport_args {
        let arg = arg.as_ref();
        let Some((name, value)) = split_override(arg) else {
            diag.warn(Warning::invalid_transport(format!(
                "Ignoring transport setting '{}': expected SERVICE=TRANSPORT.",
                arg
            )));
            continue;
        };

        if let Err(e) = value.parse::<Transport>() {
            diag.warn(Warning::invalid_transport(format!(
                "Ignoring transport setting '{}': {}.",
                arg, e
            )));
            continue;
        }

        let matched = service_names
            .clone()
            .into_iter()
            .any(|service| service.eq_ignore_ascii_case(name));
        if !matched {
            diag.warn(Warning::unmatched_transport(format!(
                "Transport setting '{}' does not match any service.",
                arg
            )));
        }
    }
}
