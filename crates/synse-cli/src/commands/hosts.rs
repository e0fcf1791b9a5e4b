use std::io::Write;

use crate::client::AppContext;
use crate::error::CliResult;
use crate::formatters::hosts_formatter;
use crate::transport::Transport;

/// Render the configured hosts, marking the active one.
pub(crate) fn handle_hosts_list<T: Transport>(
    ctx: &AppContext<T>,
    out: &mut dyn Write,
) -> CliResult<()> {
    let mut formatter = hosts_formatter(out, ctx.format);
    formatter.add(&ctx.config)?;
    formatter.write()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::HttpTransport;
    use synse_config::{CliConfig, HostConfig, OutputFormat};

    #[test]
    fn hosts_list_renders_without_network() {
        let config = CliConfig {
            active_host: Some(HostConfig::new("local", "localhost:5000")),
            hosts: vec![HostConfig::new("local", "localhost:5000")],
            ..CliConfig::default()
        };
        let ctx = AppContext::new(HttpTransport::default(), config, OutputFormat::Pretty);
        let mut out = Vec::new();

        handle_hosts_list(&ctx, &mut out).expect("hosts list should succeed");

        let text = String::from_utf8(out).expect("utf8 output");
        assert_eq!(
            text,
            "ACTIVE   NAME    ADDRESS\n*        local   localhost:5000\n"
        );
    }
}
