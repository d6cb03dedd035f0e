use clap::Parser;
use yarn_api_client::cli::Cli;
use yarn_api_client::logging::init_logging;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    init_logging();

    let cli = Cli::parse();
    cli.run().await
}
