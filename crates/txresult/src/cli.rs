use std::path::PathBuf;

use clap::Parser;
use txresult_core::DecodeLimits;

/// txresult: decode a Stellar transaction result (base64 XDR) and print it as JSON.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Base64 `TransactionResult` XDR. Ignored when `--file` is given; stdin
    /// is read only when neither is set.
    #[arg(env = "TXRESULT_XDR")]
    pub xdr: Option<String>,

    /// Read the base64 XDR from a file. Takes precedence over the positional
    /// argument and `TXRESULT_XDR`.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Print single-line JSON.
    #[arg(long)]
    pub compact: bool,

    /// Maximum decoded input size in bytes.
    #[arg(long, default_value = "1048576", env = "TXRESULT_MAX_INPUT_LEN")]
    pub max_input_len: usize,

    /// Maximum element count of any sequence in the input.
    #[arg(long, default_value = "10000", env = "TXRESULT_MAX_ARRAY_LEN")]
    pub max_array_len: usize,
}

impl Cli {
    pub fn limits(&self) -> DecodeLimits {
        DecodeLimits {
            max_input_len: self.max_input_len,
            max_array_len: self.max_array_len,
        }
    }
}
