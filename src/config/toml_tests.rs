//! Tests for TOML configuration parsing.

use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.request.network_type.is_none());
        assert!(config.request.ip_version.is_none());
        assert!(config.classifier.style.is_none());
        assert!(config.classifier.wifi.is_empty());
        assert!(config.connectivity.check.is_none());
        assert!(config.output.format.is_none());
    }

    #[test]
    fn parse_request_section() {
        let config = TomlConfig::parse(
            r#"
            [request]
            network_type = "wifi"
            ip_version = "ipv6"
        "#,
        )
        .unwrap();

        assert_eq!(config.request.network_type.as_deref(), Some("wifi"));
        assert_eq!(config.request.ip_version.as_deref(), Some("ipv6"));
    }

    #[test]
    fn parse_classifier_section() {
        let config = TomlConfig::parse(
            r#"
            [classifier]
            style = "pattern"
            wifi = ["^wlan", "^wlp"]
            mobile = ["^ccmni"]
        "#,
        )
        .unwrap();

        assert_eq!(config.classifier.style.as_deref(), Some("pattern"));
        assert_eq!(config.classifier.wifi, vec!["^wlan", "^wlp"]);
        assert_eq!(config.classifier.mobile, vec!["^ccmni"]);
    }

    #[test]
    fn parse_connectivity_and_output_sections() {
        let config = TomlConfig::parse(
            r#"
            [connectivity]
            check = false
            targets = ["1.1.1.1:53"]

            [output]
            format = "text"
        "#,
        )
        .unwrap();

        assert_eq!(config.connectivity.check, Some(false));
        assert_eq!(config.connectivity.targets, vec!["1.1.1.1:53"]);
        assert_eq!(config.output.format.as_deref(), Some("text"));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result = TomlConfig::parse(
            r#"
            [request]
            network = "wifi"
        "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn unknown_section_is_rejected() {
        let result = TomlConfig::parse(
            r#"
            [metrics]
            enabled = true
        "#,
        );

        assert!(result.is_err());
    }
}

mod template {
    use super::*;

    #[test]
    fn default_template_parses() {
        let template = default_config_template();
        let config = TomlConfig::parse(&template).unwrap();

        assert!(config.request.network_type.is_none());
        assert!(config.classifier.wifi.is_empty());
    }

    #[test]
    fn default_template_documents_every_section() {
        let template = default_config_template();

        for section in ["[request]", "[classifier]", "[connectivity]", "[output]"] {
            assert!(template.contains(section), "Template should contain {section}");
        }
        assert!(template.contains("pdp_ip"));
        assert!(template.contains("rmnet"));
    }
}

mod file_loading {
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn load_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [request]
            ip_version = "ipv4"
        "#
        )
        .unwrap();

        let config = TomlConfig::load(file.path()).unwrap();
        assert_eq!(config.request.ip_version.as_deref(), Some("ipv4"));
    }

    #[test]
    fn load_nonexistent_file_returns_error() {
        let path = Path::new("nonexistent_config_file_12345.toml");
        let result = TomlConfig::load(path);

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn load_invalid_toml_file_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "this is not valid toml {{{{").unwrap();

        let result = TomlConfig::load(file.path());

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }
}
