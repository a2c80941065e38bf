//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// tweet-scheduler: assemble tweet drafts from articles, posts and images, then schedule them
#[derive(Parser, Debug)]
#[command(name = "tweet-scheduler")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a tweet buffer from text, articles, posts and images
    Compose(ComposeArgs),

    /// Browse, search and copy hook templates
    Hooks(HooksArgs),

    /// Preview how tweets are laid out in the schedule sheet
    Plan(PlanArgs),

    /// Run the upload server in front of the scheduling script
    Serve(ServeArgs),

    /// Configuration management
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct ComposeArgs {
    /// Initial tweet text
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    /// File with the initial tweet text (use - for stdin)
    #[arg(long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Image to paste (repeatable, pasted as one event in the given order)
    #[arg(long = "image")]
    pub images: Vec<PathBuf>,

    /// Instructions for image processing
    #[arg(long)]
    pub instructions: Option<String>,

    /// Article URL to turn into a tweet
    #[arg(long)]
    pub article: Option<String>,

    /// Social media post URL to turn into a tweet
    #[arg(long)]
    pub social: Option<String>,

    /// Replace the buffer with tweets extracted from the pasted images
    #[arg(long)]
    pub process_images: bool,

    /// Send the buffer and images for processing
    #[arg(long)]
    pub submit: bool,

    /// Schedule the resulting buffer
    #[arg(long)]
    pub schedule: bool,

    /// Output the final state as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct HooksArgs {
    #[command(subcommand)]
    pub command: HooksCommands,
}

#[derive(Subcommand, Debug)]
pub enum HooksCommands {
    /// List hook categories
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search hooks in one category or all of them
    Search {
        /// Search term (case-insensitive)
        term: Option<String>,

        /// Category id, or "all"
        #[arg(long, default_value = "all")]
        category: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Copy a matching hook to the clipboard
    Copy {
        /// Search term (case-insensitive)
        term: Option<String>,

        /// Category id, or "all"
        #[arg(long, default_value = "all")]
        category: String,

        /// Position within the search results
        #[arg(long, default_value_t = 0)]
        index: usize,
    },

    /// Write the hook library as JSON
    Export {
        /// Output file (stdout when omitted)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Tweets, separated by blank lines
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    /// File with the tweets (use - for stdin)
    #[arg(long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// First date (DD/MM/YYYY); falls back to the config, then today
    #[arg(long)]
    pub start_date: Option<String>,

    /// Sheet row to continue from
    #[arg(long, default_value_t = 2)]
    pub row: u32,

    /// First empty slot in that row (0-4)
    #[arg(long, default_value_t = 0)]
    pub slot: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind (overrides server.bind)
    #[arg(long)]
    pub bind: Option<String>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Init {
        /// Path to write config file
        #[arg(long, default_value = "./config.toml")]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}
