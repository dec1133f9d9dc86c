//! # Rever CLI Entry Point
//!
//! The main executable for the Rever tool. This file drives the application lifecycle:
//!
//! 1. **Initialization**: Parses command-line arguments using [`cli::Cli`] and sets up logging.
//! 2. **Configuration**: Resolves the endpoint, deadlines and headers.
//! 3. **Execution**: Opens a channel with `rever_core`, reverses the input and closes the channel.
//! 4. **Presentation**: Prints the reply to standard output, or the error to standard error
//!    and exits with status 1.

mod cli;
mod formatter;

use clap::Parser;
use cli::Cli;
use formatter::{FormattedString, Reply};
use rever_core::ReverseClient;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rever=warn,rever_core=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    let config = match args.client_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    };

    tracing::debug!(endpoint = %config.endpoint, "resolved configuration");

    let mut client = match ReverseClient::open_with(&config) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    };

    let result = client.reverse(&args.data).await;

    // The channel is released whether or not the call succeeded.
    client.close();

    match result {
        Ok(reversed) => println!("{}", FormattedString::from(Reply(reversed))),
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    }
}
