// ABOUTME: Integration tests for settings parsing and discovery.
// ABOUTME: Tests tier tables, transport defaults, and settings file lookup.

use moorage::config::*;
use moorage::error::Error;
use moorage::resolve::ResourceTiers;
use std::fs;

mod parsing {
    use super::*;

    #[test]
    fn parse_full_settings() {
        let yaml = r#"
resource_tiers:
  - cpu: 0.5
    memory: 1
  - cpu: "1"
    memory: "2.0"
transport:
  - web=http2
  - api=tcp
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        let tiers = settings.tiers().unwrap();
        let pairs: Vec<(&str, &str)> = tiers.tiers().map(|t| (t.cpu(), t.memory())).collect();
        assert_eq!(pairs, vec![("0.5", "1.0"), ("1.0", "2.0")]);
        assert_eq!(settings.transport, vec!["web=http2", "api=tcp"]);
    }

    #[test]
    fn parse_registry_login() {
        let yaml = "registry:\n  server: foobar.azurecr.io\n  username: foobar\n";
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.registry.server.as_deref(), Some("foobar.azurecr.io"));
        assert_eq!(settings.registry.username.as_deref(), Some("foobar"));
        assert_eq!(settings.registry.password, None);
    }

    #[test]
    fn missing_tiers_use_defaults() {
        let settings = Settings::from_yaml("transport: []\n").unwrap();
        assert_eq!(settings.tiers().unwrap(), ResourceTiers::default());
    }

    #[test]
    fn invalid_tier_value_rejected() {
        let yaml = "resource_tiers:\n  - cpu: fast\n    memory: 1\n";
        assert!(Settings::from_yaml(yaml).is_err());
    }

    #[test]
    fn duplicate_tier_rejected() {
        let yaml = "resource_tiers:\n  - cpu: 1\n    memory: 2\n  - cpu: 1.0\n    memory: 4\n";
        let settings = Settings::from_yaml(yaml).unwrap();
        assert!(settings.tiers().is_err());
    }
}

mod discovery {
    use super::*;

    #[test]
    fn defaults_without_settings_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = Settings::discover(temp_dir.path()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn finds_alternate_names() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir(temp_dir.path().join(".moorage")).unwrap();
        fs::write(
            temp_dir.path().join(".moorage/config.yml"),
            "transport: [web=tcp]\n",
        )
        .unwrap();

        let settings = Settings::discover(temp_dir.path()).unwrap();
        assert_eq!(settings.transport, vec!["web=tcp"]);
    }

    #[test]
    fn primary_name_wins() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILENAME), "transport: [a=http]\n").unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILENAME_ALT), "transport: [b=http]\n").unwrap();

        let settings = Settings::discover(temp_dir.path()).unwrap();
        assert_eq!(settings.transport, vec!["a=http"]);
    }

    #[test]
    fn bad_tier_table_fails_at_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILENAME), "resource_tiers: []\n").unwrap();

        let err = Settings::discover(temp_dir.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidSettings { .. }));
    }

    #[test]
    fn explicit_path_must_exist() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = Settings::load(&temp_dir.path().join("nope.yml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
    }
}

mod init {
    use super::*;

    #[test]
    fn init_writes_loadable_template() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = init_settings(temp_dir.path(), false).unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.tiers().unwrap(), ResourceTiers::default());
    }

    #[test]
    fn init_refuses_overwrite() {
        let temp_dir = tempfile::tempdir().unwrap();
        init_settings(temp_dir.path(), false).unwrap();
        let err = init_settings(temp_dir.path(), false).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));
    }
}
