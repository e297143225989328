use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomUserError, InquireError, Password, Text, validator::Validation};
use std::{future::Future, process::ExitCode};
use tracing::{debug, info};
use weather_core::{
    Config, SearchWidget, WeatherProvider, provider_from_config,
    render::{DESCRIPTION, INPUT_PLACEHOLDER, TITLE},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Search for the current weather in your city")]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com API key.
    Configure,

    /// Show the current weather for one location and exit.
    Show {
        /// City or location name.
        location: String,
    },

    /// Keep prompting for locations until Esc or Ctrl-C.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { location } => {
                let provider = load_provider()?;
                let ok = show(provider.as_ref(), location, ctrl_c()).await;
                Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
            }
            Command::Interactive => {
                let provider = load_provider()?;
                interactive(provider.as_ref()).await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn load_provider() -> anyhow::Result<Box<dyn WeatherProvider>> {
    let config = Config::load()?.with_env_overrides();
    debug!(base_url = %config.base_url, "configuration loaded");
    provider_from_config(&config)
}

fn validate_api_key(input: &str) -> Result<Validation, CustomUserError> {
    if input.trim().is_empty() {
        Ok(Validation::Invalid("API key must not be empty".into()))
    } else {
        Ok(Validation::Valid)
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("WeatherAPI.com API key:")
        .without_confirmation()
        .with_help_message("Get a free key at https://www.weatherapi.com")
        .with_validator(validate_api_key)
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    let path = Config::config_file_path()?;
    info!(path = %path.display(), "API key saved");
    println!("API key saved to {}", path.display());

    Ok(())
}

async fn interactive(provider: &dyn WeatherProvider) -> anyhow::Result<()> {
    println!("{TITLE}");
    println!("{DESCRIPTION}");

    let mut widget = SearchWidget::new();

    loop {
        let input = match Text::new("City:").with_placeholder(INPUT_PLACEHOLDER).prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read location"),
        };

        widget.set_query(input);
        if search(&mut widget, provider, ctrl_c()).await == SearchOutcome::Cancelled {
            eprintln!("Search cancelled.");
        }
        print!("{}", widget.view());
    }

    Ok(())
}

/// How a single submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchOutcome {
    /// The provider answered; a failure is kept on the widget.
    Done,
    /// The request was abandoned before the provider answered.
    Cancelled,
    /// Blank input or a search already in flight; nothing was sent.
    Rejected,
}

/// One submission. If `cancel` resolves first the in-flight request is
/// abandoned and its result is never applied.
async fn search(
    widget: &mut SearchWidget,
    provider: &dyn WeatherProvider,
    cancel: impl Future<Output = ()>,
) -> SearchOutcome {
    let Ok(Some(ticket)) = widget.begin_search() else {
        return SearchOutcome::Rejected;
    };

    eprintln!("{}", widget.view().submit_label);
    let location = ticket.location().to_string();

    tokio::select! {
        result = provider.current(&location) => {
            // The error, if any, is kept on the widget and rendered from there.
            let _ = widget.finish_search(ticket, result);
            SearchOutcome::Done
        }
        () = cancel => {
            widget.abandon_search();
            SearchOutcome::Cancelled
        }
    }
}

/// `weather show`: one submission. Returns whether it produced weather.
async fn show(
    provider: &dyn WeatherProvider,
    location: String,
    cancel: impl Future<Output = ()>,
) -> bool {
    let mut widget = SearchWidget::new();
    widget.set_query(location);

    let outcome = search(&mut widget, provider, cancel).await;
    if outcome == SearchOutcome::Cancelled {
        eprintln!("Search cancelled.");
    }
    print!("{}", widget.view());

    succeeded(outcome, &widget)
}

fn succeeded(outcome: SearchOutcome, widget: &SearchWidget) -> bool {
    outcome == SearchOutcome::Done && widget.error().is_none()
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn ctrl_c() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
