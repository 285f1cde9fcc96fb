//! Installs the global subscriber, so it runs in its own test binary.

use transfer_telemetry::{init_telemetry, TelemetryConfig, TelemetryError};

#[test]
fn test_file_backed_json_logging_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("transfer.log");
    let mut config = TelemetryConfig::default().with_log_file(&path);
    config.json_logs = true;
    config.log_level = "info".to_string();

    let guard = init_telemetry(config.clone()).unwrap();
    assert!(guard.logger().is_json());
    assert!(guard.logger().is_file_backed());

    let again = init_telemetry(config);
    assert!(matches!(again, Err(TelemetryError::AlreadyInitialized(_))));

    drop(guard);
    let contents = std::fs::read_to_string(&path).unwrap();
    let records: Vec<serde_json::Value> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert!(records
        .iter()
        .any(|r| r["fields"]["message"] == "Logging initialized"));
    let shutdown = records
        .iter()
        .find(|r| r["fields"]["message"] == "Shutting down telemetry")
        .expect("shutdown record");
    assert_eq!(shutdown["fields"]["to_file"], true);
    assert_eq!(shutdown["fields"]["json_logs"], true);
}
