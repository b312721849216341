//! SimpleFIN CLI - bank accounts and transactions in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{accounts, fetch, info, setup, transactions};

/// SimpleFIN - fetch accounts and transactions from a SimpleFIN bridge
#[derive(Parser)]
#[command(name = "simplefin", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Output format for listing commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Exchange a setup token for an access URL
    Setup {
        /// SimpleFIN setup token (prompted for when omitted)
        #[arg(long)]
        token: Option<String>,
    },

    /// List accounts and balances
    Accounts {
        /// Output format
        #[arg(long, value_enum, ignore_case = true, default_value = "table")]
        format: Format,
    },

    /// Show recent transactions for one account
    Transactions {
        /// Account ID (see `simplefin accounts`)
        account_id: String,
        /// Number of days to look back for transactions
        #[arg(long)]
        lookback_days: Option<u32>,
        /// Output format
        #[arg(long, value_enum, ignore_case = true, default_value = "table")]
        format: Format,
    },

    /// Show the protocol versions the server supports
    Info,

    /// Fetch all accounts with transactions to per-account JSON files
    ///
    /// Files are organized by institution and account name:
    /// <output-dir>/<institution-domain>/<account-name>/<account-id>_<date>.json
    Fetch {
        /// Directory to write per-account JSON files into
        #[arg(long)]
        output_dir: PathBuf,
        /// Number of days to look back for transactions (default: 30)
        #[arg(long)]
        lookback_days: Option<u32>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Setup { token } => setup::run(token),
        Commands::Accounts { format } => accounts::run(format),
        Commands::Transactions { account_id, lookback_days, format } => {
            transactions::run(&account_id, lookback_days, format)
        }
        Commands::Info => info::run(),
        Commands::Fetch { output_dir, lookback_days } => fetch::run(&output_dir, lookback_days),
    }
}
