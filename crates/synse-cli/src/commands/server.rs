use std::io::Write;

use synse_api_models::{Read, Scan, Status, Transaction, Version, WriteData, WriteTransaction};

use crate::cli::{DeviceArgs, TransactionArgs, WriteArgs};
use crate::client::AppContext;
use crate::error::{CliError, CliResult};
use crate::formatters::{
    read_formatter, scan_formatter, status_formatter, transaction_formatter, version_formatter,
    write_formatter,
};
use crate::transport::Transport;

pub(crate) async fn handle_status<T: Transport>(
    ctx: &AppContext<T>,
    out: &mut dyn Write,
) -> CliResult<()> {
    let status: Status = ctx.client.get_unversioned(&["test"]).await?;
    let mut formatter = status_formatter(out, ctx.format);
    formatter.add(&status)?;
    formatter.write()?;
    Ok(())
}

pub(crate) async fn handle_version<T: Transport>(
    ctx: &AppContext<T>,
    out: &mut dyn Write,
) -> CliResult<()> {
    let version: Version = ctx.client.get_unversioned(&["version"]).await?;
    let mut formatter = version_formatter(out, ctx.format);
    formatter.add(&version)?;
    formatter.write()?;
    Ok(())
}

pub(crate) async fn handle_scan<T: Transport>(
    ctx: &AppContext<T>,
    out: &mut dyn Write,
) -> CliResult<()> {
    let scan: Scan = ctx.client.get(&["scan"]).await?;
    let mut formatter = scan_formatter(out, ctx.format);
    formatter.add(&scan)?;
    formatter.write()?;
    Ok(())
}

pub(crate) async fn handle_read<T: Transport>(
    ctx: &AppContext<T>,
    args: DeviceArgs,
    out: &mut dyn Write,
) -> CliResult<()> {
    let read: Read = ctx
        .client
        .get(&["read", &args.rack, &args.board, &args.device])
        .await?;
    let mut formatter = read_formatter(out, ctx.format);
    formatter.add(&read)?;
    formatter.write()?;
    Ok(())
}

pub(crate) async fn handle_write<T: Transport>(
    ctx: &AppContext<T>,
    args: WriteArgs,
    out: &mut dyn Write,
) -> CliResult<()> {
    if args.action.trim().is_empty() {
        return Err(CliError::usage("write action must not be empty"));
    }
    let payload = WriteData {
        action: args.action,
        raw: args.raw.into_iter().collect(),
    };
    let device = args.device;
    let transactions: Vec<WriteTransaction> = ctx
        .client
        .post(
            &["write", &device.rack, &device.board, &device.device],
            &payload,
        )
        .await?;
    let mut formatter = write_formatter(out, ctx.format);
    formatter.add(&transactions)?;
    formatter.write()?;
    Ok(())
}

pub(crate) async fn handle_transaction<T: Transport>(
    ctx: &AppContext<T>,
    args: TransactionArgs,
    out: &mut dyn Write,
) -> CliResult<()> {
    let transaction: Transaction = ctx.client.get(&["transaction", &args.id]).await?;
    let mut formatter = transaction_formatter(out, ctx.format);
    formatter.add(&transaction)?;
    formatter.write()?;
    Ok(())
}
