#![forbid(unsafe_code)]
#![warn(
    unused,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the Synse Server API.
//!
//! These types mirror the JSON bodies served by Synse Server so the CLI can
//! decode responses and encode request payloads without ad-hoc maps.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error document returned by the server alongside a 4xx/5xx status.
///
/// Two shapes are observed in the wild: a terse `{http_code, message}` pair and
/// a richer `{http_code, error_id, description, timestamp, context}` document.
/// Every descriptive field is optional so both decode into this type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// HTTP status code the server associated with the error.
    pub http_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Human-readable message (terse shape).
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Numeric server-side error identifier (rich shape).
    pub error_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Short description of the error class (rich shape).
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Server timestamp at which the error was raised (rich shape).
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Additional context explaining the failure (rich shape).
    pub context: Option<String>,
}

impl ErrorResponse {
    /// Best available human-readable summary of the error.
    ///
    /// Prefers `message`; otherwise combines `description` with `context`.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        if let Some(message) = non_empty(self.message.as_deref()) {
            return Some(message.to_string());
        }
        match (
            non_empty(self.description.as_deref()),
            non_empty(self.context.as_deref()),
        ) {
            (Some(description), Some(context)) => Some(format!("{description}: {context}")),
            (Some(description), None) => Some(description.to_string()),
            (None, Some(context)) => Some(context.to_string()),
            (None, None) => None,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Response of the unversioned `test` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Status {
    /// Liveness indicator, `ok` when the server is reachable.
    pub status: String,
    #[serde(default)]
    /// Server timestamp of the check.
    pub timestamp: Option<String>,
}

/// Response of the unversioned `version` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Version {
    /// Full server version.
    pub version: String,
    /// API version used to build versioned request paths.
    pub api_version: String,
}

/// Response of the `scan` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Scan {
    #[serde(default)]
    /// Racks known to the server.
    pub racks: Vec<ScanRack>,
}

/// A rack entry in a scan result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanRack {
    /// Rack identifier.
    pub id: String,
    #[serde(default)]
    /// Boards in the rack.
    pub boards: Vec<ScanBoard>,
}

/// A board entry in a scan result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanBoard {
    /// Board identifier.
    pub id: String,
    #[serde(default)]
    /// Devices on the board.
    pub devices: Vec<ScanDevice>,
}

/// A device entry in a scan result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanDevice {
    /// Device identifier.
    pub id: String,
    #[serde(default)]
    /// Free-form device description.
    pub info: String,
    #[serde(rename = "type")]
    /// Device type (e.g. `temperature`, `fan`).
    pub kind: String,
}

/// Response of the `read` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Read {
    #[serde(default)]
    /// Device type that produced the readings.
    pub kind: String,
    #[serde(default)]
    /// Readings keyed by reading type.
    pub data: BTreeMap<String, ReadData>,
}

/// A single reading value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadData {
    /// Reading value; numeric, string, or null depending on the device.
    pub value: Value,
    #[serde(default)]
    /// RFC 3339 timestamp of the reading.
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Unit of measure, when the reading has one.
    pub unit: Option<Unit>,
}

/// Unit of measure attached to a reading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Unit {
    /// Unit name (e.g. `degrees celsius`).
    pub name: String,
    /// Unit symbol (e.g. `C`).
    pub symbol: String,
}

/// Request body for the `write` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WriteData {
    /// Write action understood by the device plugin.
    pub action: String,
    #[serde(default)]
    /// Raw action arguments.
    pub raw: Vec<String>,
}

/// A transaction started by a write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WriteTransaction {
    /// The write that was requested.
    pub context: WriteContext,
    /// Transaction identifier to poll with the `transaction` endpoint.
    pub transaction: String,
}

/// Echo of the write request associated with a transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WriteContext {
    /// Write action.
    pub action: String,
    #[serde(default)]
    /// Raw action arguments.
    pub raw: Vec<String>,
}

/// Response of the `transaction` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction identifier.
    pub id: String,
    #[serde(default)]
    /// The write that started the transaction.
    pub context: WriteContext,
    #[serde(default)]
    /// Processing state (e.g. `ok`, `error`).
    pub state: String,
    #[serde(default)]
    /// Processing status (e.g. `pending`, `done`).
    pub status: String,
    #[serde(default)]
    /// Creation timestamp.
    pub created: String,
    #[serde(default)]
    /// Last update timestamp.
    pub updated: String,
    #[serde(default)]
    /// Failure message, empty on success.
    pub message: String,
}
