use super::*;

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent directory");
    }
    std::fs::write(path, contents.as_bytes()).expect("write file");
}

#[test]
fn default_config_is_valid() {
    validate_config(&default_config()).expect("defaults validate");
}

#[test]
fn partial_config_file_keeps_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("dita-factory.json");
    write_file(
        &path,
        r#"{"schema_version": 1, "input": "data/products.csv", "generator": {"model": "gemini-2.0-flash"}}"#,
    );

    let config = load_config(Some(&path)).expect("load config");
    assert_eq!(config.input, PathBuf::from("data/products.csv"));
    assert_eq!(config.generator.model, "gemini-2.0-flash");
    assert_eq!(config.generator.backend, GeneratorBackend::Gemini);
    assert_eq!(config.output_dir, default_config().output_dir);
    assert_eq!(config.call_delay(), Duration::from_secs(1));
}

#[test]
fn unknown_fields_are_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("dita-factory.json");
    write_file(&path, r#"{"schema_version": 1, "inptu": "typo.csv"}"#);
    let err = load_config(Some(&path)).expect_err("unknown field");
    assert!(format!("{err:#}").contains("inptu"));
}

#[test]
fn unsupported_schema_version_is_rejected() {
    let mut config = default_config();
    config.schema_version = 7;
    let err = validate_config(&config).expect_err("bad version");
    assert!(err.to_string().contains("schema_version 7"));
}

#[test]
fn explicit_missing_config_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = find_config_file(Some(&dir.path().join("absent.json"))).expect_err("missing");
    assert!(err.to_string().contains("config file not found"));
}

#[test]
fn command_backend_requires_command() {
    let mut config = default_config();
    config.generator.backend = GeneratorBackend::Command;
    assert!(validate_config(&config).is_err());
    config.generator.command = Some("llm -m local".to_string());
    validate_config(&config).expect("command configured");
}

#[test]
fn empty_paths_are_rejected() {
    let mut config = default_config();
    config.report = PathBuf::new();
    let err = validate_config(&config).expect_err("empty report");
    assert!(err.to_string().contains("report"));
}

#[test]
fn api_key_rejects_missing_blank_and_placeholder() {
    assert!(check_api_key(None).is_err());
    assert!(check_api_key(Some("  ".to_string())).is_err());
    assert!(check_api_key(Some("YOUR_GEMINI_API_KEY".to_string())).is_err());
    assert_eq!(
        check_api_key(Some("abc123".to_string())).expect("real key"),
        "abc123"
    );
}

#[test]
fn explicit_lm_command_wins_over_config() {
    assert_eq!(
        resolve_lm_command(Some("ollama run llama3"), Some("llm")),
        Some("ollama run llama3".to_string())
    );
    assert_eq!(
        resolve_lm_command(None, Some("llm")),
        Some("llm".to_string())
    );
}

#[test]
fn blank_lm_command_falls_through_to_config() {
    assert_eq!(
        resolve_lm_command(Some("  "), Some("llm")),
        Some("llm".to_string())
    );
    assert_eq!(
        resolve_lm_command(Some(""), Some("ollama run llama3")),
        Some("ollama run llama3".to_string())
    );
}

#[test]
fn stub_round_trips_to_defaults() {
    let stub = config_stub().expect("stub");
    let parsed: FactoryConfig = serde_json::from_str(&stub).expect("parse stub");
    assert_eq!(parsed, default_config());
}
