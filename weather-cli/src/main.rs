//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Driving the search widget from an interactive prompt
//! - Logging setup

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cmd = cli::Cli::parse();

    // RUST_LOG wins over -v; logs go to stderr, the widget to stdout.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter_from_verbosity(cmd.verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    cmd.run().await
}

fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_filter() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
        assert_eq!(log_filter_from_verbosity(1), "info");
        assert_eq!(log_filter_from_verbosity(2), "debug");
        assert_eq!(log_filter_from_verbosity(7), "trace");
    }
}
