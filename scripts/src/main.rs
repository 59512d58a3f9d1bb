use std::process;

use clap::Parser;
use dotenv::dotenv;
use scripts::cli::Cli;
use tracing::error;

#[tokio::main]
async fn main() {
    // Load .env file
    dotenv().ok();

    let Cli { command } = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    if let Err(e) = command.run().await {
        error!("Error deploying contract: {}", e);
        process::exit(1);
    }
}
