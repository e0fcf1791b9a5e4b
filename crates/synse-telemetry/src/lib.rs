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

//! Logging setup shared by the Synse CLI binaries.
//!
//! Layout: `init.rs` (subscriber installation and logging configuration).

pub mod init;

pub use init::{DEFAULT_LOG_LEVEL, DEBUG_LOG_LEVEL, LogFormat, LoggingConfig, init_logging};
