// ABOUTME: Environment resolution across env files and inline entries.
// ABOUTME: Later env files override earlier ones; inline environment overrides every file.

use crate::compose::{Service, parse_env_file};
use crate::diagnostics::{Diagnostics, Warning};
use indexmap::IndexMap;
use std::io;
use std::path::{Path, PathBuf};

/// Supplies the contents of files named by `env_file`.
pub trait EnvFileLoader {
    fn load(&self, path: &str) -> io::Result<String>;
}

impl<F> EnvFileLoader for F
where
    F: Fn(&str) -> io::Result<String>,
{
    fn load(&self, path: &str) -> io::Result<String> {
        self(path)
    }
}

/// Reads env files from disk, relative to the compose file's directory.
#[derive(Debug, Clone)]
pub struct FsEnvFiles {
    base_dir: PathBuf,
}

impl FsEnvFiles {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve env files next to the given compose file.
    pub fn for_compose_file(compose_file: &Path) -> Self {
        let base_dir = compose_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self::new(base_dir)
    }
}

impl EnvFileLoader for FsEnvFiles {
    fn load(&self, path: &str) -> io::Result<String> {
        std::fs::read_to_string(self.base_dir.join(path))
    }
}

/// Loader for documents whose services never name env files.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnvFiles;

impl EnvFileLoader for NoEnvFiles {
    fn load(&self, path: &str) -> io::Result<String> {
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("env files are not available: {}", path),
        ))
    }
}

/// Merge env files and inline `environment` into one map.
///
/// Returns None when the service has neither `env_file` nor `environment`, so
/// callers can tell "no environment" from "empty environment".
pub fn resolve_environment(
    service: &Service,
    loader: &dyn EnvFileLoader,
    diag: &mut Diagnostics,
) -> Option<IndexMap<String, String>> {
    if service.env_file.is_none() && service.environment.is_none() {
        return None;
    }

    let mut vars = IndexMap::new();

    for file in service.env_file.iter().flatten() {
        match loader.load(&file.path) {
            Ok(contents) => vars.extend(parse_env_file(&contents)),
            Err(e) if file.required => diag.warn(Warning::env_file_unreadable(
                &service.name,
                format!("Could not read env file {}: {}", file.path, e),
            )),
            Err(e) => {
                tracing::debug!(service = %service.name, file = %file.path, "skipping optional env file: {}", e);
            }
        }
    }

    if let Some(environment) = &service.environment {
        vars.extend(
            environment
                .vars()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
    }

    Some(vars)
}
