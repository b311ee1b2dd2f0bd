// ABOUTME: Reads a compose file from disk into a ComposeDocument.
// ABOUTME: Maps missing files and parse failures to user-facing errors.

use crate::compose::ComposeDocument;
use crate::error::{Error, Result};
use std::path::Path;

pub const DEFAULT_COMPOSE_FILE: &str = "docker-compose.yml";

pub fn load_compose_file(path: &Path) -> Result<ComposeDocument> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let document = ComposeDocument::from_yaml(&content).map_err(|source| Error::Parse {
        file: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        path = %path.display(),
        services = document.len(),
        "loaded compose file"
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_COMPOSE_FILE);
        let err = load_compose_file(&path).unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
        assert!(err.to_string().ends_with("docker-compose.yml does not exist"));
    }

    #[test]
    fn invalid_yaml_names_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.yml");
        std::fs::write(&path, "services: [unclosed").unwrap();
        let err = load_compose_file(&path).unwrap_err();
        assert!(err.to_string().starts_with("Error parsing "));
        assert!(err.to_string().contains("broken.yml"));
    }

    #[test]
    fn loads_services() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_COMPOSE_FILE);
        std::fs::write(&path, "services:\n  web:\n    image: nginx\n").unwrap();
        let document = load_compose_file(&path).unwrap();
        assert_eq!(document.service_names().collect::<Vec<_>>(), vec!["web"]);
    }
}
