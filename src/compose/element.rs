// ABOUTME: Shared building blocks for compose elements.
// ABOUTME: Compose paths, validation errors, scalar coercion, and string-or-list fields.

use serde_yaml::Value;
use std::fmt;
use thiserror::Error;

/// Location of an element inside a compose document, e.g. `services.web.cap_add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposePath {
    service: String,
    segments: Vec<String>,
}

impl ComposePath {
    pub fn service(service: &str) -> Self {
        Self {
            service: service.to_string(),
            segments: Vec::new(),
        }
    }

    /// Path of a nested field below this one.
    pub fn field(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self {
            service: self.service.clone(),
            segments,
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service
    }

    /// Dotted field path below the service, empty for the service itself.
    pub fn field_path(&self) -> String {
        self.segments.join(".")
    }

    pub fn invalid(&self, reason: impl Into<String>) -> ValidationError {
        ValidationError {
            path: self.clone(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ComposePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "services.{}", self.service)?;
        for segment in &self.segments {
            write!(f, ".{}", segment)?;
        }
        Ok(())
    }
}

/// A compose value that cannot be coerced to its declared type.
#[derive(Debug, Clone, Error)]
#[error("invalid value for {path}: {reason}")]
pub struct ValidationError {
    pub path: ComposePath,
    pub reason: String,
}

/// Render a YAML scalar as a string. Returns None for sequences, mappings and tagged values.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

pub(crate) fn expect_string(value: &Value, path: &ComposePath) -> Result<String, ValidationError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(path.invalid(format!("expected a string, got {}", describe(other)))),
    }
}

pub(crate) fn expect_scalar(value: &Value, path: &ComposePath) -> Result<String, ValidationError> {
    scalar_to_string(value)
        .ok_or_else(|| path.invalid(format!("expected a scalar, got {}", describe(value))))
}

/// Item type of a [`StringOrList`]: converts one raw token and rejects anything
/// outside its allowed values.
pub trait ListItem: Sized {
    fn from_token(token: &str) -> Result<Self, String>;
}

impl ListItem for String {
    fn from_token(token: &str) -> Result<Self, String> {
        Ok(token.to_string())
    }
}

/// A field written either as a single scalar or as a list of scalars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringOrList<T> {
    items: Vec<T>,
}

impl<T: ListItem> StringOrList<T> {
    pub fn from_value(value: &Value, path: &ComposePath) -> Result<Self, ValidationError> {
        let tokens = match value {
            Value::Sequence(entries) => entries
                .iter()
                .enumerate()
                .map(|(i, entry)| expect_scalar(entry, &path.field(&i.to_string())))
                .collect::<Result<Vec<_>, _>>()?,
            other => vec![expect_scalar(other, path)?],
        };

        let items = tokens
            .iter()
            .map(|token| T::from_token(token).map_err(|reason| path.invalid(reason)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { items })
    }
}

impl<T> StringOrList<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}
