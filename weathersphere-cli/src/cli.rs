use anyhow::{Context, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use weathersphere_core::{
    Config, EmptyQueryPolicy, OpenWeatherProvider, SearchStatus, UiEvent, WeatherWidget,
};

use crate::{interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weathersphere",
    version,
    about = "Real-time weather, hourly and 5-day forecasts"
)]
pub struct Cli {
    /// OpenWeather API key; overrides the configured one.
    #[arg(long, global = true, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Provider base URL; overrides the configured one.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and search preferences.
    Configure,

    /// Show weather for a city once and exit.
    Show {
        /// City name, e.g. "London".
        city: String,
    },

    /// Search repeatedly, with a recently-searched list (default).
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let Cli {
            api_key,
            base_url,
            command,
        } = self;

        match command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(),
            Command::Show { city } => {
                let widget = build_widget(api_key, base_url)?;
                show(&widget, city).await
            }
            Command::Interactive => {
                let widget = build_widget(api_key, base_url)?;
                interactive::run(&widget).await
            }
        }
    }
}

/// Saved config with command-line overrides applied.
fn effective_config(api_key: Option<String>, base_url: Option<String>) -> anyhow::Result<Config> {
    let mut config = Config::load()?;

    if let Some(key) = api_key {
        config.set_api_key(key);
    }
    if let Some(url) = base_url {
        config.base_url = url;
    }

    Ok(config)
}

fn build_widget(
    api_key: Option<String>,
    base_url: Option<String>,
) -> anyhow::Result<WeatherWidget<OpenWeatherProvider>> {
    let config = effective_config(api_key, base_url)?;
    let provider = OpenWeatherProvider::from_config(&config)?;
    Ok(WeatherWidget::new(provider, config.empty_query))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    let current_url = config.base_url.clone();
    let base_url = Text::new("API base URL:")
        .with_default(&current_url)
        .prompt()
        .context("Failed to read base URL")?;

    let empty_query = Select::new(
        "When Enter is pressed on an empty search box:",
        EmptyQueryPolicy::all().to_vec(),
    )
    .prompt()
    .context("Failed to read empty-query policy")?;

    config.set_api_key(api_key.trim().to_string());
    config.base_url = base_url;
    config.empty_query = empty_query;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

async fn show(widget: &WeatherWidget<OpenWeatherProvider>, city: String) -> anyhow::Result<()> {
    widget.handle(UiEvent::QueryChanged(city)).await;
    widget.handle(UiEvent::Submit).await;

    let state = widget.display().await;
    if let SearchStatus::Failed(message) = &state.status {
        bail!("Search failed: {message}");
    }

    print!("{}", render::render(&state, Local::now().date_naive()));
    Ok(())
}
