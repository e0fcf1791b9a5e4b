//! Command-line entry points: argument parsing, configuration resolution, and dispatch.

use std::env;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use reqwest::Client;
use synse_config::{CliConfig, ConfigError, HostConfig, OutputFormat};
use synse_telemetry::{LogFormat, LoggingConfig, init_logging};
use tracing::debug;

use crate::client::AppContext;
use crate::commands::hosts::handle_hosts_list;
use crate::commands::server::{
    handle_read, handle_scan, handle_status, handle_transaction, handle_version, handle_write,
};
use crate::error::{CliError, CliResult, EXIT_SUCCESS, EXIT_USAGE};
use crate::transport::{HttpTransport, LoggingTransport};

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOG_FORMAT: &str = "pretty";

/// Parses process arguments, installs logging, and executes the requested
/// command against the real standard streams. Returns the process exit code.
pub async fn run() -> i32 {
    let mut out = io::stdout();
    let mut err = io::stderr();
    invoke(env::args_os(), &mut out, &mut err, true).await
}

/// Executes one full invocation with injected output streams.
///
/// `args` includes the binary name, as with [`std::env::args_os`]. Rendered
/// output goes to `out`; diagnostics go to `err`. Logging is left untouched.
pub async fn run_with<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    invoke(args, out, err, false).await
}

async fn invoke<I, S>(
    args: I,
    out: &mut dyn Write,
    err: &mut dyn Write,
    install_logging: bool,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(parse_err) => {
            let rendered = parse_err.render();
            if parse_err.use_stderr() {
                let _ = write!(err, "{rendered}");
                return EXIT_USAGE;
            }
            let _ = write!(out, "{rendered}");
            return EXIT_SUCCESS;
        }
    };

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(failure) => return report(err, &failure),
    };

    if install_logging {
        let logging = LoggingConfig {
            format: LogFormat::from_name(&cli.log_format),
            ..LoggingConfig::for_cli(config.debug)
        };
        if let Err(init_err) = init_logging(&logging) {
            let _ = writeln!(err, "warning: failed to initialise logging: {init_err:#}");
        }
    }

    match dispatch(cli, config, out).await {
        Ok(()) => EXIT_SUCCESS,
        Err(failure) => report(err, &failure),
    }
}

fn report(err: &mut dyn Write, failure: &CliError) -> i32 {
    let _ = writeln!(err, "error: {failure}");
    failure.exit_code()
}

/// Apply flag and environment overrides on top of the loaded config file.
fn resolve_config(cli: &Cli) -> CliResult<CliConfig> {
    let mut config = synse_config::load(cli.config.as_deref())?;
    if let Some(name) = cli.host.as_deref() {
        config.select_host(name)?;
    }
    let address = cli.address.as_deref().map(str::trim);
    if let Some(address) = address.filter(|address| !address.is_empty()) {
        config.active_host = Some(HostConfig::new(address, address));
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    config.debug |= cli.debug;
    Ok(config)
}

async fn dispatch(cli: Cli, config: CliConfig, out: &mut dyn Write) -> CliResult<()> {
    let client = Client::builder()
        .timeout(Duration::from_secs(cli.timeout))
        .build()
        .map_err(|err| CliError::transport(format!("failed to build HTTP client: {err}")))?;
    let transport = LoggingTransport::new(HttpTransport::new(client));
    let format = config.format;
    let ctx = AppContext::new(transport, config, format);
    debug!(
        format = %ctx.format,
        host = ctx.config.active_host.as_ref().map_or("", |host| host.address.as_str()),
        "dispatching command"
    );

    match cli.command {
        Command::Server(server) => match server {
            ServerCommand::Status => handle_status(&ctx, out).await,
            ServerCommand::Version => handle_version(&ctx, out).await,
            ServerCommand::Scan => handle_scan(&ctx, out).await,
            ServerCommand::Read(args) => handle_read(&ctx, args, out).await,
            ServerCommand::Write(args) => handle_write(&ctx, args, out).await,
            ServerCommand::Transaction(args) => handle_transaction(&ctx, args, out).await,
        },
        Command::Hosts(HostsCommand::List) => handle_hosts_list(&ctx, out),
    }
}

fn parse_format(value: &str) -> Result<OutputFormat, String> {
    value.parse().map_err(|err: ConfigError| err.to_string())
}

#[derive(Parser)]
#[command(name = "synse", version, about = "Command-line client for Synse Server")]
struct Cli {
    #[arg(long, global = true, env = "SYNSE_CONFIG", help = "Path to the config file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Name of a configured host to make active")]
    host: Option<String>,
    #[arg(
        long,
        global = true,
        env = "SYNSE_ADDRESS",
        help = "Ad-hoc server address (host:port); takes precedence over --host, empty means unset"
    )]
    address: Option<String>,
    #[arg(
        long,
        global = true,
        env = "SYNSE_FORMAT",
        value_parser = parse_format,
        help = "Output format: pretty, json, or yaml"
    )]
    format: Option<OutputFormat>,
    #[arg(long, global = true, help = "Enable debug logging")]
    debug: bool,
    #[arg(
        long,
        global = true,
        env = "SYNSE_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        help = "HTTP request timeout in seconds"
    )]
    timeout: u64,
    #[arg(
        long,
        global = true,
        env = "SYNSE_LOG_FORMAT",
        default_value = DEFAULT_LOG_FORMAT,
        help = "Log format on stderr: pretty or json"
    )]
    log_format: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Interact with the active Synse Server.
    #[command(subcommand)]
    Server(ServerCommand),
    /// Inspect configured hosts.
    #[command(subcommand)]
    Hosts(HostsCommand),
}

#[derive(Subcommand)]
enum ServerCommand {
    /// Check that the server is reachable.
    Status,
    /// Show the server and API versions.
    Version,
    /// List every device the server knows about.
    Scan,
    /// Read the current values of a device.
    Read(DeviceArgs),
    /// Write an action to a device.
    Write(WriteArgs),
    /// Show the state of a write transaction.
    Transaction(TransactionArgs),
}

#[derive(Subcommand)]
enum HostsCommand {
    /// List configured hosts, marking the active one.
    List,
}

#[derive(Args, Debug)]
pub(crate) struct DeviceArgs {
    #[arg(help = "Rack identifier")]
    pub(crate) rack: String,
    #[arg(help = "Board identifier")]
    pub(crate) board: String,
    #[arg(help = "Device identifier")]
    pub(crate) device: String,
}

#[derive(Args, Debug)]
pub(crate) struct WriteArgs {
    #[command(flatten)]
    pub(crate) device: DeviceArgs,
    #[arg(help = "Action to perform (e.g. state, color)")]
    pub(crate) action: String,
    #[arg(help = "Raw action argument")]
    pub(crate) raw: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct TransactionArgs {
    #[arg(help = "Transaction identifier")]
    pub(crate) id: String,
}
