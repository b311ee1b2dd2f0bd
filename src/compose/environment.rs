// ABOUTME: Environment and env_file elements.
// ABOUTME: Mapping and KEY=VALUE list forms normalize to the same ordered map.

use super::element::{ComposePath, ValidationError, describe, expect_scalar, expect_string};
use indexmap::IndexMap;
use serde_yaml::Value;

/// Inline `environment` entries in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: IndexMap<String, String>,
}

impl Environment {
    pub fn from_value(value: &Value, path: &ComposePath) -> Result<Self, ValidationError> {
        let mut vars = IndexMap::new();
        match value {
            Value::Mapping(map) => {
                for (i, (key, val)) in map.iter().enumerate() {
                    let key = expect_string(key, &path.field(&i.to_string()))?;
                    let val = match val {
                        Value::Null => String::new(),
                        other => expect_scalar(other, &path.field(&key))?,
                    };
                    vars.insert(key, val);
                }
            }
            Value::Sequence(entries) => {
                for (i, entry) in entries.iter().enumerate() {
                    let entry = expect_scalar(entry, &path.field(&i.to_string()))?;
                    let (key, val) = entry.split_once('=').unwrap_or((entry.as_str(), ""));
                    if key.is_empty() {
                        return Err(path
                            .field(&i.to_string())
                            .invalid(format!("missing variable name in '{}'", entry)));
                    }
                    vars.insert(key.to_string(), val.to_string());
                }
            }
            other => {
                return Err(path.invalid(format!(
                    "expected a mapping or a list, got {}",
                    describe(other)
                )));
            }
        }
        Ok(Environment { vars })
    }

    pub fn vars(&self) -> &IndexMap<String, String> {
        &self.vars
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// One file named by `env_file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvFileRef {
    pub path: String,
    pub required: bool,
}

/// Parse `env_file`: a path, a list of paths, or a list of `{path, required}` entries.
pub fn env_files_from_value(
    value: &Value,
    path: &ComposePath,
) -> Result<Vec<EnvFileRef>, ValidationError> {
    let entries = match value {
        Value::Sequence(entries) => entries.iter().collect::<Vec<_>>(),
        other => vec![other],
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let entry_path = path.field(&i.to_string());
            match entry {
                Value::String(file) => Ok(EnvFileRef {
                    path: file.clone(),
                    required: true,
                }),
                Value::Mapping(map) => {
                    let file = map
                        .get("path")
                        .ok_or_else(|| entry_path.invalid("env_file entry requires `path`"))?;
                    let required = match map.get("required") {
                        None | Some(Value::Null) => true,
                        Some(Value::Bool(b)) => *b,
                        Some(other) => {
                            return Err(entry_path.field("required").invalid(format!(
                                "expected a boolean, got {}",
                                describe(other)
                            )));
                        }
                    };
                    Ok(EnvFileRef {
                        path: expect_string(file, &entry_path.field("path"))?,
                        required,
                    })
                }
                other => Err(entry_path.invalid(format!(
                    "expected a path, got {}",
                    describe(other)
                ))),
            }
        })
        .collect()
}

/// Parse the contents of an env file into ordered `KEY=VALUE` pairs.
///
/// Blank lines and `#` comments are skipped, an `export ` prefix is allowed, and
/// matching quotes around a value are removed. Lines without `=` define an empty value.
pub fn parse_env_file(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line).trim_start();
            let (key, value) = line.split_once('=').unwrap_or((line, ""));
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), unquote(value.trim()).to_string()))
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
