use cosmos_autoscale::core::ConfigProvider;
use cosmos_autoscale::utils::validation::Validate;
use cosmos_autoscale::{AutoscaleError, TomlConfig};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_config_with_env_substitution() {
    std::env::set_var("COSMOS_AUTOSCALE_TEST_KEY", "c2VjcmV0LWtleQ==");

    let file = write_config(
        r#"
[cosmos]
endpoint_url = "https://acct.documents.azure.com:443/"
authorization_key = "${COSMOS_AUTOSCALE_TEST_KEY}"
database_name = "ToDoList"
collection_name = "Items"
request_timeout_seconds = 10

[throughput]
min_authorized_ru = 400
max_authorized_ru = 2000
"#,
    );

    let settings = TomlConfig::from_file(file.path()).unwrap().into_settings();

    assert_eq!(settings.authorization_key(), "c2VjcmV0LWtleQ==");
    assert_eq!(settings.request_timeout_seconds(), 10);
    assert_eq!(settings.throughput_bounds().min, 400);
    assert_eq!(settings.throughput_bounds().max, 2000);
    assert!(settings.validate().is_ok());
}

#[test]
fn test_invalid_values_fail_validation() {
    let file = write_config(
        r#"
[cosmos]
endpoint_url = "ftp://acct.documents.azure.com"
authorization_key = "c2VjcmV0LWtleQ=="
database_name = "ToDoList"
collection_name = "Items"

[throughput]
min_authorized_ru = 400
max_authorized_ru = 2000
"#,
    );

    let settings = TomlConfig::from_file(file.path()).unwrap().into_settings();
    let err = settings.validate().unwrap_err();

    assert!(matches!(err, AutoscaleError::InvalidConfigValueError { ref field, .. } if field == "endpoint_url"));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = TomlConfig::from_file("/definitely/not/here/autoscale.toml").unwrap_err();
    assert!(matches!(err, AutoscaleError::IoError(_)));
}

#[cfg(feature = "cli")]
#[test]
fn test_cli_loads_settings_from_config_file() {
    use clap::Parser;
    use cosmos_autoscale::{CliConfig, ScaleAction};

    let file = write_config(
        r#"
[cosmos]
endpoint_url = "http://localhost:8081"
authorization_key = "c2VjcmV0LWtleQ=="
database_name = "db"
collection_name = "coll"

[throughput]
min_authorized_ru = 1000
max_authorized_ru = 1000
"#,
    );
    let path = file.path().to_str().unwrap();

    let cli = CliConfig::try_parse_from(["cosmos-autoscale", "--action", "down", "--config", path, "--dry-run"])
        .unwrap();
    assert_eq!(cli.action, Some(ScaleAction::Down));
    assert!(cli.dry_run);

    let settings = cli.load_settings().unwrap();
    assert_eq!(settings.database_name(), "db");
    assert!(settings.validate().is_ok());
}
