//! Command handlers grouped by concern.

pub(crate) mod hosts;
pub(crate) mod server;
