//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Prismflow - compile data-model manifests into queryable Explores
#[derive(Parser, Debug)]
#[command(name = "pf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile the manifest into Explores
    Compile(CompileArgs),

    /// Validate manifest nodes without compiling
    Validate(ValidateArgs),

    /// Check warehouse connectivity
    Test(TestArgs),
}

/// Output format for compiled results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per outcome plus totals
    Summary,
    /// Full compiled output as JSON
    Json,
}

/// Arguments for the compile command
#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Override the manifest path from the config file
    #[arg(short, long)]
    pub manifest: Option<String>,

    /// Override the static catalog path from the config file
    #[arg(long)]
    pub catalog: Option<String>,

    /// Attach source declarations to dimensions and metrics
    #[arg(long)]
    pub load_sources: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "summary")]
    pub format: OutputFormat,
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Override the manifest path from the config file
    #[arg(short, long)]
    pub manifest: Option<String>,
}

/// Arguments for the test command
#[derive(Args, Debug)]
pub struct TestArgs {
    /// Override the static catalog path from the config file
    #[arg(long)]
    pub catalog: Option<String>,
}
