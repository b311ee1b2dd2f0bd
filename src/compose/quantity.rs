// ABOUTME: Size, CPU, and duration quantities found in compose files.
// ABOUTME: Normalizes "512M"-style sizes to bytes and exposes them in gigabytes.

use super::element::{ComposePath, ValidationError, describe};
use serde_yaml::Value;
use std::fmt;
use std::time::Duration;

const KIB: f64 = 1024.0;
const MIB: f64 = KIB * 1024.0;
const GIB: f64 = MIB * 1024.0;
const TIB: f64 = GIB * 1024.0;

/// Format a decimal the way the resource tier table writes it: integral values
/// keep one fractional digit ("2.0"), others use the shortest exact form ("0.25").
pub fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// A byte quantity such as `512M` or `1.5G`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ByteSize(u64);

impl ByteSize {
    pub fn parse(input: &str) -> Result<Self, String> {
        let spec = input.trim().to_lowercase();
        if spec.is_empty() {
            return Err("size cannot be empty".to_string());
        }

        let split = spec
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(spec.len());
        let (num_str, unit) = spec.split_at(split);

        let multiplier = match unit.trim() {
            "" | "b" => 1.0,
            "k" | "kb" => KIB,
            "m" | "mb" => MIB,
            "g" | "gb" => GIB,
            "t" | "tb" => TIB,
            other => return Err(format!("unknown size unit '{}' in {}", other, input)),
        };

        let number = num_str
            .parse::<f64>()
            .map_err(|_| format!("invalid size: {}", input))?;

        Ok(ByteSize((number * multiplier).round() as u64))
    }

    pub fn from_value(value: &Value, path: &ComposePath) -> Result<Self, ValidationError> {
        match value {
            Value::Number(n) => match n.as_u64() {
                Some(bytes) => Ok(ByteSize(bytes)),
                None => Err(path.invalid(format!("invalid size: {}", n))),
            },
            Value::String(s) => ByteSize::parse(s).map_err(|reason| path.invalid(reason)),
            other => Err(path.invalid(format!("expected a size, got {}", describe(other)))),
        }
    }

    pub fn bytes(&self) -> u64 {
        self.0
    }

    pub fn gigabytes(&self) -> f64 {
        self.0 as f64 / GIB
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}b", self.0)
    }
}

/// A CPU count such as `0.5`, written as a YAML number or string.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct CpuQuantity(f64);

impl CpuQuantity {
    pub fn parse(input: &str) -> Result<Self, String> {
        let cpus = input
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("invalid CPU count: {}", input))?;
        Self::new(cpus).ok_or_else(|| format!("invalid CPU count: {}", input))
    }

    fn new(cpus: f64) -> Option<Self> {
        (cpus.is_finite() && cpus >= 0.0).then_some(CpuQuantity(cpus))
    }

    pub fn from_value(value: &Value, path: &ComposePath) -> Result<Self, ValidationError> {
        match value {
            Value::Number(n) => n
                .as_f64()
                .and_then(Self::new)
                .ok_or_else(|| path.invalid(format!("invalid CPU count: {}", n))),
            Value::String(s) => CpuQuantity::parse(s).map_err(|reason| path.invalid(reason)),
            other => Err(path.invalid(format!(
                "expected a CPU count, got {}",
                describe(other)
            ))),
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for CpuQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_decimal(self.0))
    }
}

/// Parse a compose duration such as `10s` or `1m30s`.
pub fn parse_duration(value: &Value, path: &ComposePath) -> Result<Duration, ValidationError> {
    if !value.is_string() {
        return Err(path.invalid(format!(
            "expected a duration, got {}",
            describe(value)
        )));
    }
    humantime_serde::deserialize(value.clone()).map_err(|e| path.invalid(e.to_string()))
}
