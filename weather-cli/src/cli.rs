use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, Text};
use weather_core::{Config, Credential, OpenWeatherClient, QueryController, client_from_config};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure {
        /// Key to store; prompted for when omitted.
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Show current weather for a city.
    Show {
        /// City name, e.g. `Lagos` or `New York`.
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,

        /// Print the weather record as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Keep asking for cities until cancelled with Esc or Ctrl-C.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { api_key } => configure(api_key),
            Command::Show { city, json } => show(&city.join(" "), json).await,
            Command::Interactive => interactive().await,
        }
    }
}

fn configure(api_key: Option<String>) -> anyhow::Result<()> {
    let api_key = match api_key {
        Some(key) => key,
        None => Password::new("OpenWeather API key:")
            .without_confirmation()
            .prompt()
            .context("Failed to read API key")?,
    };
    let credential = Credential::new(api_key)?;

    let mut config = Config::load()?;
    config.set_api_key(credential.expose().to_string());
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Resolve the credential once, before any query is attempted.
fn controller() -> anyhow::Result<QueryController<OpenWeatherClient>> {
    let config = Config::load()?;
    let client = client_from_config(&config)?;
    tracing::debug!(endpoint = %client.endpoint(), "query client ready");
    Ok(QueryController::new(client))
}

async fn show(city: &str, json: bool) -> anyhow::Result<()> {
    let controller = controller()?;

    if controller.submit(city).await.is_none() {
        bail!("City name cannot be empty");
    }

    let snapshot = controller.snapshot();
    if let Some(failure) = snapshot.failure() {
        return Err(failure.clone().into());
    }

    match (json, snapshot.record()) {
        (true, Some(record)) => println!("{}", serde_json::to_string_pretty(record)?),
        _ => println!("{}", render::snapshot(&snapshot)),
    }

    Ok(())
}

async fn interactive() -> anyhow::Result<()> {
    let controller = controller()?;

    println!("What's the weather like?");
    println!("Type the name of a city and hit enter. Esc to quit.");

    loop {
        let input = Text::new("City:")
            .with_placeholder("Enter city name")
            .with_initial_value(&controller.snapshot().input)
            .prompt();

        let line = match input {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        if controller.submit(&line).await.is_none() {
            println!("Please enter a city name.");
            continue;
        }

        println!("{}\n", render::snapshot(&controller.snapshot()));
    }

    Ok(())
}
