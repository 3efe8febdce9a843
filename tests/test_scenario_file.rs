//! Scenario file loading and validation, end to end through the loader.

use std::path::PathBuf;

use spawnjack::error::ConfigError;
use spawnjack::scenario::InjectionVector;
use spawnjack::scenario::loader::load_scenarios;

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn valid_file_loads() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "scenarios.yaml",
        r#"
scenarios:
  - name: quick-touch
    summary: direct command payload
    vector: command-field
    command: touch
    args: ["{marker}"]
  - name: shell-capture
    summary: shell payload with capture
    vector: shell-command
    capture_content: true
    command: sh
    args: ["-c", "echo hi > {marker}"]
    env:
      PAYLOAD_STAGE: "2"
"#,
    );

    let scenarios = load_scenarios(&path).unwrap();
    assert_eq!(scenarios.len(), 2);
    assert_eq!(scenarios[0].name, "quick-touch");
    assert_eq!(scenarios[0].vector, InjectionVector::CommandField);
    assert!(!scenarios[0].capture_content);
    assert!(scenarios[1].capture_content);
    assert_eq!(scenarios[1].env.get("PAYLOAD_STAGE").unwrap(), "2");
}

#[test]
fn empty_scenario_list_is_rejected() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_file(&dir, "empty.yaml", "scenarios: []\n");
    let err = load_scenarios(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Empty { .. }));
}

#[test]
fn duplicate_names_are_rejected() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "dup.yaml",
        r#"
scenarios:
  - name: twin
    summary: first
    vector: command-field
    command: touch
    args: ["{marker}"]
  - name: twin
    summary: second
    vector: args-field
    command: sh
    args: ["-c", "touch {marker}"]
"#,
    );
    let err = load_scenarios(&path).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateName { name } if name == "twin"));
}

#[test]
fn payload_without_marker_is_rejected() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "unprovable.yaml",
        r#"
scenarios:
  - name: unprovable
    summary: writes nowhere we can check
    vector: args-field
    command: sh
    args: ["-c", "echo hi > /tmp/fixed-path"]
"#,
    );
    let err = load_scenarios(&path).unwrap_err();
    assert!(
        matches!(err, ConfigError::InvalidScenario { ref name, .. } if name == "unprovable"),
        "unexpected error: {err}"
    );
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_file(&dir, "bad.yaml", "scenarios: [not: {closed\n");
    let err = load_scenarios(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn missing_file_is_reported_as_such() {
    let err = load_scenarios(&PathBuf::from("/nonexistent/spawnjack.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::MissingFile { .. }));
}
