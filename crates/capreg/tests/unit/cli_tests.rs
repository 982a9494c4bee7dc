//! The `capreg` binary keeps stdout for command output

use std::process::Command;

use serde_json::{Value, json};

#[test]
fn test_get_prints_only_json_on_stdout() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"database": {"host": "db1"}}"#,
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_capreg"))
        .args(["get", "config.database.host"])
        .current_dir(dir.path())
        .env_remove("CAPREG_LOG")
        .env("CAPREG_LOGGING__LEVEL", "info")
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value, json!("db1"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Logging initialized"));
}
