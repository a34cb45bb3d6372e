// Configuration loading tests

use std::io::Write;

use karasu_url::{BuilderConfig, BuilderError, ImgProxy};
use tempfile::NamedTempFile;

#[test]
fn test_config_from_file_with_options() {
    let yaml = r##"
url: "https://images.test.com"
autoreset: true
options:
  resizing_type: fill
  size:
    width: 40
    height: 40
    enlarge: true
  background: "#ffffff"
"##;
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(yaml.as_bytes()).expect("write config");

    let config = BuilderConfig::from_file(file.path()).expect("config loads");
    assert!(config.autoreset);

    let mut proxy = ImgProxy::new(config).unwrap();
    let url = proxy.build("local:///cat.jpg").unwrap();
    assert!(url.starts_with(
        "https://images.test.com/insecure/rt:fill/size:40:40:true:false/bg:ffffff/"
    ));
}

#[test]
fn test_config_from_missing_file() {
    let err = BuilderConfig::from_file("/nonexistent/karasu.yaml").unwrap_err();
    assert!(matches!(err, BuilderError::InvalidConfiguration(msg) if msg.contains("read")));
}

#[test]
fn test_config_deserialization_fails_with_invalid_yaml() {
    let yaml = "url: [invalid syntax here}\n";
    assert!(BuilderConfig::from_yaml_with_env(yaml).is_err());
}

#[test]
fn test_config_with_preset_only() {
    let yaml = r#"
url: "https://images.test.com"
preset_only: true
options:
  width: 300
"#;
    let config = BuilderConfig::from_yaml_with_env(yaml).unwrap();
    let mut proxy = ImgProxy::new(config).unwrap();
    let url = proxy.build("local:///cat.jpg").unwrap();
    assert!(url.starts_with("https://images.test.com/insecure/default/"));
}

#[test]
fn test_config_with_non_object_options() {
    let yaml = r#"
url: "https://images.test.com"
options: "size:40:40"
"#;
    let config = BuilderConfig::from_yaml_with_env(yaml).unwrap();
    assert!(matches!(
        ImgProxy::new(config),
        Err(BuilderError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_config_with_mismatched_option_shape() {
    let yaml = r#"
url: "https://images.test.com"
options:
  size: "big"
"#;
    let config = BuilderConfig::from_yaml_with_env(yaml).unwrap();
    assert!(ImgProxy::new(config).is_err());
}
