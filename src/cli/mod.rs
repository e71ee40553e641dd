//! CLI module for the advisor
//!
//! # Commands
//!
//! - `serve` - Start the HTTP server
//! - `recommend` - Run the full pipeline once and print the result
//! - `candidates` - Show the shortlist without calling the language model
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start server with default config
//! advisor serve
//!
//! # Dry run: which devices would the model see?
//! advisor candidates --budget 2,3 --requires-4g --min-ram 3000
//!
//! # Generate shell completions
//! advisor completions bash > ~/.bash_completion.d/advisor
//! ```

pub mod candidates;
pub mod completions;
pub mod config;
pub mod output;
pub mod recommend;
pub mod serve;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::config::AdvisorConfig;
use crate::pipeline::UserConstraints;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Handset Advisor - mobile device recommendations
#[derive(Parser, Debug)]
#[command(
    name = "advisor",
    version,
    about = "Mobile device recommendations from a price-tier classifier and an LLM"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the advisor server
    Serve(ServeArgs),
    /// Recommend one device for the given constraints
    Recommend(RecommendArgs),
    /// List the shortlist for the given constraints
    Candidates(CandidatesArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "advisor.toml")]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "ADVISOR_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "ADVISOR_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ADVISOR_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Train the classifier before accepting requests
    #[arg(long)]
    pub warm: bool,
}

/// Data and shortlist overrides shared by the one-shot commands.
#[derive(Args, Debug, Clone)]
pub struct PipelineArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "advisor.toml")]
    pub config: PathBuf,

    /// Override training data path
    #[arg(long)]
    pub train: Option<PathBuf>,

    /// Override evaluation data path
    #[arg(long = "eval")]
    pub eval: Option<PathBuf>,

    /// Override shortlist size
    #[arg(short = 'n', long)]
    pub max_candidates: Option<usize>,
}

impl PipelineArgs {
    /// File (if present), then `ADVISOR_*` variables, then these flags.
    pub fn load_config(&self) -> Result<AdvisorConfig, Box<dyn std::error::Error>> {
        let mut config = serve::load_base_config(&self.config)?;

        if let Some(ref path) = self.train {
            config.catalog.train_path = path.clone();
        }
        if let Some(ref path) = self.eval {
            config.catalog.eval_path = path.clone();
        }
        if let Some(n) = self.max_candidates {
            config.selection.max_candidates = n;
        }

        config.validate()?;
        Ok(config)
    }
}

/// User constraints as command-line flags.
#[derive(Args, Debug, Clone, Default)]
pub struct ConstraintArgs {
    /// Acceptable price tiers, comma separated (e.g. 2,3)
    #[arg(short, long, value_delimiter = ',')]
    pub budget: Vec<i64>,

    /// Only devices with 4G
    #[arg(long = "requires-4g")]
    pub requires_4g: bool,

    /// Minimum RAM in MB
    #[arg(long)]
    pub min_ram: Option<i64>,
}

impl ConstraintArgs {
    pub fn to_constraints(&self, intent: &str) -> UserConstraints {
        let mut constraints = UserConstraints::new(intent).with_connectivity(self.requires_4g);
        if !self.budget.is_empty() {
            constraints = constraints.with_budget(self.budget.iter().copied());
        }
        if let Some(min_ram) = self.min_ram {
            constraints = constraints.with_min_ram(min_ram);
        }
        constraints
    }
}

#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// What the user wants from the device
    #[arg(short, long)]
    pub intent: String,

    #[command(flatten)]
    pub constraints: ConstraintArgs,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

#[derive(Args, Debug)]
pub struct CandidatesArgs {
    #[command(flatten)]
    pub constraints: ConstraintArgs,

    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "advisor.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
