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
#![allow(clippy::redundant_pub_crate)]

//! Command-line client for Synse Server.
//!
//! Layout:
//! - `cli.rs`: argument parsing, configuration resolution, and dispatch
//! - `commands/`: command handlers grouped by concern
//! - `client.rs`: URI builder, response classification, and the API client
//! - `transport.rs`: HTTP transport and its logging decorator
//! - `output.rs`: formatter engine (pretty, JSON, YAML)
//! - `formatters.rs`: per-command formatter configurations
//! - `error.rs`: `CliError` and the exit code table
//! - `main.rs`: thin entrypoint delegating to `run()`

pub(crate) mod cli;
pub mod client;
pub(crate) mod commands;
#[cfg(test)]
mod test_logs;
pub mod error;
pub mod formatters;
pub mod output;
pub mod transport;

pub use cli::{run, run_with};
pub use client::{ApiClient, AppContext, check, make_uri};
pub use error::{CliError, CliResult};
pub use output::{FormatError, Formats, Formatter};
pub use transport::{HttpTransport, LoggingTransport, Transport, TransportError};
