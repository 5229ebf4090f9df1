//! Alibaba API CLI
//!
//! Provides commands for:
//! - `status`: Show configuration status
//! - `auth`: OAuth token management
//! - `product`: Product discovery and inventory
//! - `shipping`: Freight estimates
//! - `order`: Order creation, payment and tracking
//! - `request`: Signed request to any endpoint

mod cli;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{output, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays valid JSON
    let filter = if cli.global.verbose {
        EnvFilter::new("alibaba_api=debug,alibaba_cli=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("alibaba_api=warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            output::echo_error(&error.report());
            error.into()
        }
    }
}
