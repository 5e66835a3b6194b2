use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "muse")]
#[command(about = "Collect, filter and sync quotes from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional directory holding the quote book
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new quote
    #[command(alias = "new")]
    Add {
        /// Quote text
        text: Vec<String>,
        /// Quote category
        #[arg(short, long)]
        category: String,
    },
    /// List quotes
    List {
        /// Only show quotes in this category
        #[arg(short, long)]
        category: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List categories with quote counts
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a random quote from the selected category
    #[command(alias = "next")]
    Random {
        /// Draw from this category instead of the saved selection
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Select a category (or `all`) and show a quote from it
    Filter {
        /// Category name or `all`
        category: String,
    },
    /// Show the last quote viewed in this session
    Last,
    /// Edit a quote's text or category
    Edit {
        /// Quote ID or unique ID prefix
        id: String,
        /// New text
        #[arg(long)]
        text: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Export quotes
    Export {
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Import quotes from a JSON file
    Import {
        /// JSON file with an array of quotes
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
    /// Reconcile quotes with the remote source (remote wins on conflict)
    Sync {
        /// Keep syncing on an interval until interrupted
        #[arg(long)]
        watch: bool,
        /// Seconds between syncs in watch mode
        #[arg(long, value_name = "SECS")]
        interval: Option<u64>,
        /// Push local quotes to the remote after merging
        #[arg(long)]
        push: bool,
    },
    /// Configure the remote source
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Markdown,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update the config file
    Init {
        /// Remote quote endpoint (e.g. <https://jsonplaceholder.typicode.com/posts?_limit=6>)
        #[arg(long, value_name = "URL")]
        remote_url: Option<String>,
        /// Seconds between syncs in watch mode
        #[arg(long, value_name = "SECS")]
        interval: Option<u64>,
        /// Push local quotes after each merge
        #[arg(long)]
        push_local: Option<bool>,
        /// Category for remote quotes that carry none
        #[arg(long, value_name = "NAME")]
        remote_category: Option<String>,
    },
    /// Print the effective configuration
    Show,
}
