mod cli;

use std::fs::File;
use std::io::{self, Read, Write};

use clap::Parser;
use eyre::{bail, WrapErr};
use txresult_core::{DecodeLimits, ReadXdr, TransactionResult};

fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    // stdout carries only the JSON document.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let input = read_input(&args)?;
    let rendered = run(&input, args.limits(), args.compact)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}").context("write JSON to stdout")?;
    Ok(())
}

/// Whitespace allowed around the base64 text on top of what the decode
/// limit implies.
const INPUT_SLACK: u64 = 4096;

fn read_input(args: &cli::Cli) -> eyre::Result<String> {
    let limit = u64::try_from(args.limits().max_encoded_len())
        .unwrap_or(u64::MAX)
        .saturating_add(INPUT_SLACK);

    if let Some(path) = &args.file {
        if args.xdr.is_some() {
            tracing::debug!(file = %path.display(), "--file overrides the XDR argument");
        }
        let file = File::open(path)
            .with_context(|| format!("open XDR input file {}", path.display()))?;
        return read_bounded(file, limit)
            .with_context(|| format!("read XDR input from {}", path.display()));
    }
    if let Some(xdr) = &args.xdr {
        return Ok(xdr.clone());
    }
    read_bounded(io::stdin().lock(), limit).context("read XDR input from stdin")
}

/// Read UTF-8 text from `reader`, failing once it yields more than `limit`
/// bytes.
fn read_bounded<R: Read>(reader: R, limit: u64) -> eyre::Result<String> {
    let mut buf = String::new();
    reader
        .take(limit.saturating_add(1))
        .read_to_string(&mut buf)?;
    if buf.len() as u64 > limit {
        bail!("input exceeds {limit} bytes");
    }
    Ok(buf)
}

/// Decode base64 transaction-result XDR and render its projection as JSON.
fn run(input: &str, limits: DecodeLimits, compact: bool) -> eyre::Result<String> {
    let encoded = input.trim();
    if encoded.is_empty() {
        bail!("no XDR input given; pass it as an argument, with --file, or on stdin");
    }

    let tx = TransactionResult::from_xdr_base64_with_limits(encoded, limits)
        .context("decode transaction result XDR")?;

    tracing::info!(
        fee_charged = tx.fee_charged,
        code = %tx.code(),
        operations = tx.operation_results().len(),
        "decoded transaction result"
    );

    let rendered = if compact {
        serde_json::to_string(&tx)
    } else {
        serde_json::to_string_pretty(&tx)
    };
    rendered.context("render transaction result as JSON")
}
