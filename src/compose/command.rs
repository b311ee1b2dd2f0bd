// ABOUTME: Command and entrypoint elements.
// ABOUTME: Shell-form strings are split with POSIX word rules; exec-form lists are kept as-is.

use super::element::{ComposePath, ValidationError, describe, expect_scalar};
use serde_yaml::Value;

/// A `command` or `entrypoint` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    tokens: Vec<String>,
    form: CommandForm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CommandForm {
    /// Written as one string; keeps the original text.
    Shell(String),
    /// Written as a list of argv tokens.
    Exec,
}

impl Command {
    pub fn from_shell(line: &str) -> Result<Self, String> {
        Ok(Command {
            tokens: split_words(line)?,
            form: CommandForm::Shell(line.trim().to_string()),
        })
    }

    pub fn from_tokens(tokens: Vec<String>) -> Self {
        Command {
            tokens,
            form: CommandForm::Exec,
        }
    }

    pub fn from_value(value: &Value, path: &ComposePath) -> Result<Self, ValidationError> {
        match value {
            Value::String(line) => Command::from_shell(line).map_err(|reason| path.invalid(reason)),
            Value::Sequence(entries) => entries
                .iter()
                .enumerate()
                .map(|(i, entry)| expect_scalar(entry, &path.field(&i.to_string())))
                .collect::<Result<Vec<_>, _>>()
                .map(Command::from_tokens),
            other => Err(path.invalid(format!(
                "expected a string or a list, got {}",
                describe(other)
            ))),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The whole command as a single string.
    pub fn command_string(&self) -> String {
        match &self.form {
            CommandForm::Shell(line) => line.clone(),
            CommandForm::Exec => self
                .tokens
                .iter()
                .map(|token| quote_word(token))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// Split a command line into words following POSIX shell quoting rules.
/// No expansion is performed.
pub fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => current.push(c),
                        None => return Err("unterminated single quote".to_string()),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        // Inside double quotes a backslash only escapes these.
                        Some('\\') => match chars.next() {
                            Some(c @ ('"' | '\\' | '$' | '`')) => current.push(c),
                            Some('\n') => {}
                            Some(c) => {
                                current.push('\\');
                                current.push(c);
                            }
                            None => return Err("unterminated double quote".to_string()),
                        },
                        Some(c) => current.push(c),
                        None => return Err("unterminated double quote".to_string()),
                    }
                }
            }
            '\\' => match chars.next() {
                Some('\n') => {}
                Some(c) => {
                    in_word = true;
                    current.push(c);
                }
                None => return Err("trailing backslash".to_string()),
            },
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }

    if in_word {
        words.push(current);
    }

    Ok(words)
}

fn quote_word(word: &str) -> String {
    let plain = !word.is_empty()
        && word.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':' | '=' | ',' | '@' | '%' | '+')
        });
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}
