//! Canned Synse Server payloads and helpers for pointing the CLI at a mock server.

/// Versioned API prefix served by Synse Server 2.x.
pub const VERSIONED_PREFIX: &str = "/synse/2.0";
/// Unversioned API prefix.
pub const UNVERSIONED_PREFIX: &str = "/synse";

/// 200 OK body of the `scan` route: one rack, one board, eight devices.
pub const SCAN_OK: &str = r#"
{
  "racks": [
    {
      "id": "rack-1",
      "boards": [
        {
          "id": "board-1",
          "devices": [
            {"id": "device-1", "info": "Synse Temperature Sensor", "type": "temperature"},
            {"id": "device-2", "info": "Synse Fan", "type": "fan"},
            {"id": "device-3", "info": "Synse LED", "type": "led"},
            {"id": "device-4", "info": "Synse LED", "type": "led"},
            {"id": "device-5", "info": "Synse Temperature Sensor", "type": "temperature"},
            {"id": "device-6", "info": "Synse Temperature Sensor", "type": "temperature"},
            {"id": "device-7", "info": "Synse Temperature Sensor", "type": "temperature"},
            {"id": "device-8", "info": "Synse Temperature Sensor", "type": "temperature"}
          ]
        }
      ]
    }
  ]
}"#;

/// 500 body of the `scan` route in the rich error shape.
pub const SCAN_ERROR: &str = r#"
{
  "http_code": 500,
  "error_id": 0,
  "description": "unknown",
  "timestamp": "2018-03-14 15:34:42.243715",
  "context": "test error."
}"#;

/// 404 body in the terse error shape.
pub const NOT_FOUND_ERROR: &str = r#"{"http_code": 404, "message": "device not found"}"#;

/// 200 OK body of the `read` route for a temperature sensor.
pub const READ_OK: &str = r#"
{
  "kind": "temperature",
  "data": {
    "temperature": {
      "value": 20.3,
      "timestamp": "2018-02-01T13:47:40.395939895Z",
      "unit": {"name": "degrees celsius", "symbol": "C"}
    }
  }
}"#;

/// 200 OK body of the `write` route.
pub const WRITE_OK: &str = r#"
[
  {
    "context": {"action": "color", "raw": ["ff0000"]},
    "transaction": "b9keavvlfdm00t25dq40"
  }
]"#;

/// 200 OK body of the `transaction` route.
pub const TRANSACTION_OK: &str = r#"
{
  "id": "b9keavvlfdm00t25dq40",
  "context": {"action": "color", "raw": ["ff0000"]},
  "state": "ok",
  "status": "done",
  "created": "2018-02-01T15:00:51.132823149Z",
  "updated": "2018-02-01T15:00:51.132823149Z",
  "message": ""
}"#;

/// 200 OK body of the unversioned `test` route.
pub const STATUS_OK: &str = r#"{"status": "ok", "timestamp": "2018-02-01T13:47:40Z"}"#;

/// 200 OK body of the unversioned `version` route.
pub const VERSION_OK: &str = r#"{"version": "2.0.0", "api_version": "2.0"}"#;

/// Full path of a versioned route (e.g. `scan` -> `/synse/2.0/scan`).
#[must_use]
pub fn versioned_path(route: &str) -> String {
    format!("{VERSIONED_PREFIX}/{route}")
}

/// Full path of an unversioned route (e.g. `test` -> `/synse/test`).
#[must_use]
pub fn unversioned_path(route: &str) -> String {
    format!("{UNVERSIONED_PREFIX}/{route}")
}

/// YAML config file contents with a single active host.
#[must_use]
pub fn single_host_config(name: &str, address: &str) -> String {
    format!(
        "active_host:\n  name: {name}\n  address: {address}\nhosts:\n  - name: {name}\n    address: {address}\n"
    )
}
