//! SwapGuard CLI - precision-safe token amounts in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{check, compare, logs, max, quote, sanitize, status, token, validate};

/// SwapGuard - validate swap amounts without floating point surprises
#[derive(Parser)]
#[command(name = "swg", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two decimal strings exactly
    Compare {
        /// Left-hand value
        #[arg(allow_hyphen_values = true)]
        a: String,
        /// Right-hand value
        #[arg(allow_hyphen_values = true)]
        b: String,
        /// Fractional digits kept before truncation
        #[arg(long, default_value = "18")]
        precision: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether an amount fits in a token balance
    Validate {
        /// Amount as typed (read from stdin when omitted)
        #[arg(allow_hyphen_values = true)]
        amount: Option<String>,
        /// Token symbol
        #[arg(short, long)]
        token: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the amount the MAX button would insert
    Max {
        /// Token symbol
        token: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Quote a swap at configured prices
    Quote {
        /// Amount of the source token
        amount: String,
        /// Source token symbol
        #[arg(long)]
        from: String,
        /// Target token symbol
        #[arg(long)]
        to: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a complete swap form
    Check {
        /// Amount of the source token
        #[arg(default_value = "", allow_hyphen_values = true)]
        amount: String,
        /// Source token symbol
        #[arg(long)]
        from: String,
        /// Target token symbol
        #[arg(long)]
        to: String,
        /// Use the maximum spendable amount
        #[arg(long)]
        max: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Strip everything but digits and one decimal point
    Sanitize {
        /// Raw input (read from stdin when omitted)
        #[arg(allow_hyphen_values = true)]
        input: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show balances, max amounts and values
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage tokens
    Token {
        #[command(subcommand)]
        command: token::TokenCommands,
    },

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

impl Commands {
    /// Name used for the command in the event log
    fn name(&self) -> &'static str {
        match self {
            Commands::Compare { .. } => "compare",
            Commands::Validate { .. } => "validate",
            Commands::Max { .. } => "max",
            Commands::Quote { .. } => "quote",
            Commands::Check { .. } => "check",
            Commands::Sanitize { .. } => "sanitize",
            Commands::Status { .. } => "status",
            Commands::Token { .. } => "token",
            Commands::Logs { .. } => "logs",
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let command = cli.command.name();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            commands::log_failure(command, &e);
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Compare { a, b, precision, json } => compare::run(&a, &b, precision, json),
        Commands::Validate { amount, token, json } => validate::run(amount, &token, json),
        Commands::Max { token, json } => max::run(&token, json),
        Commands::Quote { amount, from, to, json } => quote::run(&amount, &from, &to, json),
        Commands::Check { amount, from, to, max, json } => {
            check::run(&amount, &from, &to, max, json)
        }
        Commands::Sanitize { input, json } => sanitize::run(input, json),
        Commands::Status { json } => status::run(json),
        Commands::Token { command } => token::run(command),
        Commands::Logs { command } => logs::run(command),
    }
}
