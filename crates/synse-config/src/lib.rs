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

//! File-backed configuration for the Synse CLI.
//!
//! Layout: `model.rs` (typed configuration and output format), `loader.rs`
//! (config file discovery and parsing), `error.rs` (`ConfigError`).

pub mod error;
pub mod loader;
pub mod model;

pub use error::{ConfigError, ConfigResult};
pub use loader::{CONFIG_FILE_NAME, default_config_path, load};
pub use model::{CliConfig, HostConfig, OutputFormat};
