use clap::{Parser, ValueEnum};

/// Top-level CLI struct.
///
/// The positional `command` may name a built-in command or a
/// registered provider; with no command every provider runs.
#[derive(Debug, Parser)]
#[command(name = "skyfetch", version, about = "Weather aggregator for HTML weather sites")]
pub struct Cli {
    /// Built-in command or provider name. Omit to run every provider.
    pub command: Option<String>,

    /// Arguments for the selected command.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Bypass cached pages for this run.
    #[arg(long)]
    pub refresh: bool,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "table")]
    pub formatter: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
