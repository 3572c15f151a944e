use std::io::Write;

use link2clash::settings::SettingsError;
use link2clash::Settings;

#[cfg(test)]
mod settings_file_tests {
    use super::*;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_toml_file() {
        let file = write_temp(
            ".toml",
            r#"
listen_address = "0.0.0.0"
listen_port = 8000
max_tokens = 50
"#,
        );

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.listen_addr(), "0.0.0.0:8000");
        assert_eq!(settings.max_tokens, 50);
        assert_eq!(settings.max_body_bytes, 200 * 1024);
    }

    #[test]
    fn test_load_yaml_file() {
        let file = write_temp(
            ".yaml",
            r#"
listen_port: 9100
max_body_bytes: 4096
"#,
        );

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.listen_addr(), "127.0.0.1:9100");
        assert_eq!(settings.max_body_bytes, 4096);
        assert_eq!(settings.max_tokens, 500);
    }

    #[test]
    fn test_load_errors() {
        let missing = Settings::load("/nonexistent/link2clash.toml");
        assert!(matches!(missing, Err(SettingsError::IoError(_))));

        let file = write_temp(".toml", "listen_port = \"not a number\"\n");
        assert!(matches!(
            Settings::load(file.path()),
            Err(SettingsError::TomlError(_))
        ));

        let file = write_temp(".yml", "listen_port: [1, 2]\n");
        assert!(matches!(
            Settings::load(file.path()),
            Err(SettingsError::YamlError(_))
        ));
    }
}
