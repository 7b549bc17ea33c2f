use anyhow::Result;
use bucketry::cli::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    bucketry::commands::run(cli).await
}
