//! Prismflow CLI - compiles transformation-tool manifests into Explores

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{compile, test_connection, validate};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Compile(args) => compile::execute(args, &cli.global).await,
        cli::Commands::Validate(args) => validate::execute(args, &cli.global).await,
        cli::Commands::Test(args) => test_connection::execute(args, &cli.global).await,
    }
}
