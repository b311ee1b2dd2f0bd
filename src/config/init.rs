// ABOUTME: Settings scaffolding for new projects.
// ABOUTME: Creates a moorage.yml template listing the default resource tiers.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::resolve::ResourceTiers;

use super::CONFIG_FILENAME;

/// Write a template settings file into `dir` and return its path.
pub fn init_settings(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    std::fs::write(&config_path, generate_template_yaml(&ResourceTiers::default()))?;

    Ok(config_path)
}

fn generate_template_yaml(tiers: &ResourceTiers) -> String {
    let mut yaml = String::from(
        "# Allowed CPU / memory (GiB) reservation pairs.\n\
         # A service's CPU reservation must match one of these exactly.\n\
         resource_tiers:\n",
    );
    for tier in tiers.tiers() {
        yaml.push_str(&format!(
            "  - cpu: \"{}\"\n    memory: \"{}\"\n",
            tier.cpu(),
            tier.memory()
        ));
    }
    yaml.push_str(
        "\n# Per-service ingress transport (auto, http, http2, tcp).\n\
         # Entries given with --transport take precedence.\n\
         transport: []\n\
         #  - web=http2\n\
         \n\
         # Private registry the images are pulled from. The password is\n\
         # best given with --registry-password or MOORAGE_REGISTRY_PASSWORD.\n\
         # registry:\n\
         #   server: myregistry.azurecr.io\n\
         #   username: deployer\n",
    );
    yaml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use tempfile::TempDir;

    #[test]
    fn template_round_trips_to_defaults() {
        let yaml = generate_template_yaml(&ResourceTiers::default());
        let settings = Settings::from_yaml(&yaml).unwrap();
        assert_eq!(settings.tiers().unwrap(), ResourceTiers::default());
        assert!(settings.transport.is_empty());
        assert_eq!(settings.registry, Default::default());
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "transport: []\n").unwrap();

        let err = init_settings(dir.path(), false).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));

        let path = init_settings(dir.path(), true).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("resource_tiers:"));
    }
}
