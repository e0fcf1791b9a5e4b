//! Per-command formatter configurations.
//!
//! Each constructor pairs a handler (domain value to records) with a pretty
//! template and header row; the engine in `output.rs` does the rendering.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use synse_api_models::{Read, Scan, Status, Transaction, Version, WriteTransaction};
use synse_config::{CliConfig, OutputFormat};

use crate::output::{FormatError, Formats, Formatter};

/// Layout used for timestamps in pretty output.
const TIMESTAMP_LAYOUT: &str = "%a %b %e %H:%M:%S %Z %Y";

/// Render an RFC 3339 timestamp for humans; other input is returned unchanged.
#[must_use]
pub fn parse_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw).map_or_else(
        |_| raw.to_string(),
        |ts| ts.with_timezone(&Utc).format(TIMESTAMP_LAYOUT).to_string(),
    )
}

/// One device row of a scan.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScanFormat {
    /// Rack identifier.
    pub rack: String,
    /// Board identifier.
    pub board: String,
    /// Device identifier.
    pub device: String,
    /// Device description.
    pub info: String,
    /// Device type.
    #[serde(rename = "type")]
    pub kind: String,
}

fn new_scan_format(scan: &Scan) -> Result<Vec<ScanFormat>, FormatError> {
    let mut out = Vec::new();
    for rack in &scan.racks {
        for board in &rack.boards {
            for device in &board.devices {
                out.push(ScanFormat {
                    rack: rack.id.clone(),
                    board: board.id.clone(),
                    device: device.id.clone(),
                    info: device.info.clone(),
                    kind: device.kind.clone(),
                });
            }
        }
    }
    Ok(out)
}

/// Formatter for `server scan`.
pub fn scan_formatter<'w>(
    out: &'w mut dyn Write,
    mode: OutputFormat,
) -> Formatter<'w, Scan, ScanFormat> {
    let mut formatter = Formatter::new(
        out,
        mode,
        Formats {
            pretty: "{rack}\t{board}\t{device}\t{info}\t{type}",
        },
        new_scan_format,
    );
    formatter.set_header(ScanFormat {
        rack: "RACK".into(),
        board: "BOARD".into(),
        device: "DEVICE".into(),
        info: "INFO".into(),
        kind: "TYPE".into(),
    });
    formatter
}

/// One reading row.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReadFormat {
    /// Reading type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Reading value.
    pub value: Value,
    /// Unit symbol, empty when unitless.
    pub unit: String,
    /// Reading timestamp.
    pub timestamp: String,
}

fn new_read_format(read: &Read) -> Result<Vec<ReadFormat>, FormatError> {
    Ok(read
        .data
        .iter()
        .map(|(kind, data)| ReadFormat {
            kind: kind.clone(),
            value: data.value.clone(),
            unit: data
                .unit
                .as_ref()
                .map(|unit| unit.symbol.clone())
                .unwrap_or_default(),
            timestamp: parse_timestamp(&data.timestamp),
        })
        .collect())
}

/// Formatter for `server read`.
pub fn read_formatter<'w>(
    out: &'w mut dyn Write,
    mode: OutputFormat,
) -> Formatter<'w, Read, ReadFormat> {
    let mut formatter = Formatter::new(
        out,
        mode,
        Formats {
            pretty: "{type}\t{value}\t{unit}\t{timestamp}",
        },
        new_read_format,
    );
    formatter.set_header(ReadFormat {
        kind: "TYPE".into(),
        value: Value::String("VALUE".into()),
        unit: "UNIT".into(),
        timestamp: "TIMESTAMP".into(),
    });
    formatter
}

/// One transaction row of a write.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WriteFormat {
    /// Transaction identifier.
    pub transaction: String,
    /// Requested action.
    pub action: String,
    /// Raw action arguments.
    pub raw: Vec<String>,
}

#[allow(clippy::ptr_arg)]
fn new_write_format(transactions: &Vec<WriteTransaction>) -> Result<Vec<WriteFormat>, FormatError> {
    transactions
        .iter()
        .map(|txn| {
            if txn.transaction.is_empty() {
                return Err(FormatError::Handler(format!(
                    "write of action '{}' returned no transaction id",
                    txn.context.action
                )));
            }
            Ok(WriteFormat {
                transaction: txn.transaction.clone(),
                action: txn.context.action.clone(),
                raw: txn.context.raw.clone(),
            })
        })
        .collect()
}

/// Formatter for `server write`.
pub fn write_formatter<'w>(
    out: &'w mut dyn Write,
    mode: OutputFormat,
) -> Formatter<'w, Vec<WriteTransaction>, WriteFormat> {
    let mut formatter = Formatter::new(
        out,
        mode,
        Formats {
            pretty: "{transaction}\t{action}\t{raw}",
        },
        new_write_format,
    );
    formatter.set_header(WriteFormat {
        transaction: "TRANSACTION".into(),
        action: "ACTION".into(),
        raw: vec!["RAW".into()],
    });
    formatter
}

/// Status row of a transaction.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TransactionFormat {
    /// Transaction identifier.
    pub id: String,
    /// Processing state.
    pub state: String,
    /// Processing status.
    pub status: String,
    /// Creation time.
    pub created: String,
    /// Last update time.
    pub updated: String,
    /// Failure message.
    pub message: String,
}

/// Formatter for `server transaction`.
pub fn transaction_formatter<'w>(
    out: &'w mut dyn Write,
    mode: OutputFormat,
) -> Formatter<'w, Transaction, TransactionFormat> {
    let mut formatter = Formatter::new(
        out,
        mode,
        Formats {
            pretty: "{id}\t{state}\t{status}\t{created}\t{updated}\t{message}",
        },
        |txn: &Transaction| {
            Ok(vec![TransactionFormat {
                id: txn.id.clone(),
                state: txn.state.clone(),
                status: txn.status.clone(),
                created: parse_timestamp(&txn.created),
                updated: parse_timestamp(&txn.updated),
                message: txn.message.clone(),
            }])
        },
    );
    formatter.set_header(TransactionFormat {
        id: "ID".into(),
        state: "STATE".into(),
        status: "STATUS".into(),
        created: "CREATED".into(),
        updated: "UPDATED".into(),
        message: "MESSAGE".into(),
    });
    formatter
}

/// Server liveness row.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatusFormat {
    /// Liveness indicator.
    pub status: String,
    /// Time of the check.
    pub timestamp: String,
}

/// Formatter for `server status`.
pub fn status_formatter<'w>(
    out: &'w mut dyn Write,
    mode: OutputFormat,
) -> Formatter<'w, Status, StatusFormat> {
    let mut formatter = Formatter::new(
        out,
        mode,
        Formats {
            pretty: "{status}\t{timestamp}",
        },
        |status: &Status| {
            Ok(vec![StatusFormat {
                status: status.status.clone(),
                timestamp: status
                    .timestamp
                    .as_deref()
                    .map(parse_timestamp)
                    .unwrap_or_default(),
            }])
        },
    );
    formatter.set_header(StatusFormat {
        status: "STATUS".into(),
        timestamp: "TIMESTAMP".into(),
    });
    formatter
}

/// Server version row.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VersionFormat {
    /// Full server version.
    pub version: String,
    /// API version.
    pub api_version: String,
}

/// Formatter for `server version`.
pub fn version_formatter<'w>(
    out: &'w mut dyn Write,
    mode: OutputFormat,
) -> Formatter<'w, Version, VersionFormat> {
    let mut formatter = Formatter::new(
        out,
        mode,
        Formats {
            pretty: "{version}\t{api_version}",
        },
        |version: &Version| {
            Ok(vec![VersionFormat {
                version: version.version.clone(),
                api_version: version.api_version.clone(),
            }])
        },
    );
    formatter.set_header(VersionFormat {
        version: "VERSION".into(),
        api_version: "API VERSION".into(),
    });
    formatter
}

/// One configured host.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HostFormat {
    /// `*` for the active host in pretty output.
    pub active: String,
    /// Host name.
    pub name: String,
    /// Host address.
    pub address: String,
}

fn new_host_format(config: &CliConfig) -> Result<Vec<HostFormat>, FormatError> {
    let mut out: Vec<HostFormat> = config
        .hosts
        .iter()
        .map(|host| HostFormat {
            active: if config.is_active(host) { "*" } else { "" }.to_string(),
            name: host.name.clone(),
            address: host.address.clone(),
        })
        .collect();

    if let Some(active) = &config.active_host {
        if !config.hosts.contains(active) {
            out.insert(
                0,
                HostFormat {
                    active: "*".into(),
                    name: active.name.clone(),
                    address: active.address.clone(),
                },
            );
        }
    }
    Ok(out)
}

/// Formatter for `hosts list`.
pub fn hosts_formatter<'w>(
    out: &'w mut dyn Write,
    mode: OutputFormat,
) -> Formatter<'w, CliConfig, HostFormat> {
    let mut formatter = Formatter::new(
        out,
        mode,
        Formats {
            pretty: "{active}\t{name}\t{address}",
        },
        new_host_format,
    );
    formatter.set_header(HostFormat {
        active: "ACTIVE".into(),
        name: "NAME".into(),
        address: "ADDRESS".into(),
    });
    formatter
}
