// ABOUTME: Application-wide error types for moorage.
// ABOUTME: Uses thiserror for ergonomic error handling.

use crate::compose::ParseError;
use crate::deploy::{DeployError, PlanError};
use crate::resolve::TierError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{} does not exist", .0.display())]
    FileNotFound(PathBuf),

    #[error("Error parsing {} ({source})", file.display())]
    Parse {
        file: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("invalid settings in {}: {reason}", file.display())]
    InvalidSettings { file: PathBuf, reason: String },

    #[error(transparent)]
    Tiers(#[from] TierError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Deploy(#[from] DeployError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_message() {
        let err = Error::FileNotFound(PathBuf::from("docker-compose.yml"));
        assert_eq!(err.to_string(), "docker-compose.yml does not exist");
    }

    #[test]
    fn parse_error_names_file() {
        let err = Error::Parse {
            file: PathBuf::from("stack.yml"),
            source: ParseError::MissingServices,
        };
        let message = err.to_string();
        assert!(message.starts_with("Error parsing stack.yml ("));
        assert!(message.ends_with(')'));
    }
}
