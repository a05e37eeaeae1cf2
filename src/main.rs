use anyhow::Result;
use clap::Parser;
use toolchat::cli::CliArgs;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    toolchat::run(args).await
}
