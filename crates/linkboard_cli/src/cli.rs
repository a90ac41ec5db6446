use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "linkboard",
    version,
    about = "Browse and select rule-set links from a Markdown table document"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// RON configuration file; defaults to ./linkboard.ron when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Also write logs to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true)]
    pub source_url: Option<String>,

    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the link groups with their selection marks.
    List(ListArgs),
    /// Flip the selection of one or more URLs.
    Toggle(ToggleArgs),
    /// Replace the stored selection from a JSON payload.
    Save(SaveArgs),
    /// Write the selected links to a file.
    Export(ExportArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Case-insensitive match against link names and URLs.
    #[arg(long)]
    pub filter: Option<String>,

    #[arg(long, default_value_t = false)]
    pub selected_only: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ToggleArgs {
    #[arg(required = true)]
    pub urls: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SaveArgs {
    /// JSON file holding `urls`, `selectedUrls` or `selected`; `-` reads stdin.
    #[arg(long)]
    pub payload: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[arg(long)]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
    pub format: ExportFormat,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Text,
}
