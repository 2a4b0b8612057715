//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the event stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored narrative
    Text,
    /// One JSON object per event
    Json,
}

impl From<OutputFormat> for werewolf_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => werewolf_domain::OutputFormat::Text,
            OutputFormat::Json => werewolf_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for ai-werewolf
#[derive(Parser, Debug)]
#[command(name = "ai-werewolf")]
#[command(author, version, about = "AI Werewolf - nine agents play a social deduction tournament")]
#[command(long_about = r#"
AI Werewolf runs a tournament of 9-player Werewolf matches between agents.

Each match deals 3 Wolves, 3 Villagers, a Seer, a Witch and a Hunter, then
alternates night and day until one side wins. After every match the seats
vote an MVP and an LVP; scores accumulate across the tournament.

Configuration files are loaded from (in priority order):
1. --config <path>      Explicit config file
2. ./werewolf.toml      Project-level config
3. ~/.config/ai-werewolf/config.toml   Global config

Example:
  ai-werewolf 5
  ai-werewolf --matches 3 --seed 42 --output json
  ai-werewolf --config league.toml -v
"#)]
pub struct Cli {
    /// Number of matches to play (default 1)
    #[arg(value_name = "MATCHES", conflicts_with = "matches_flag")]
    pub matches: Option<String>,

    /// Number of matches to play
    #[arg(long = "matches", value_name = "N")]
    pub matches_flag: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Seed for role shuffles, tie-breaks and bots
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Per-decision timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Consumer poll interval in milliseconds
    #[arg(long, value_name = "MILLIS")]
    pub tick_millis: Option<u64>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the progress bar
    #[arg(short, long)]
    pub quiet: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Raw match count from the positional argument or `--matches`
    pub fn matches_arg(&self) -> Option<&str> {
        self.matches.as_deref().or(self.matches_flag.as_deref())
    }
}
