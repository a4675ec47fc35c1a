use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use informer_core::{
    ConditionCatalog, Config, Coordinates, WeatherService, WeatherSnapshot, client_from_config,
};
use inquire::{Confirm, CustomType, Password};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "informer", version, about = "Current weather from the Yandex informer API")]
pub struct Cli {
    /// Log request lifecycle to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and an optional default location.
    Configure,

    /// Show current weather at a location.
    Show {
        /// Latitude in decimal degrees; defaults to the configured location.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude in decimal degrees.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// API key, overriding the stored one.
        #[arg(long, env = "YANDEX_WEATHER_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Print the snapshot as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List known condition codes and their labels.
    Conditions,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure()?,
            Command::Show { lat, lon, api_key, json } => show(lat, lon, api_key, json).await?,
            Command::Conditions => {
                for (code, label) in ConditionCatalog.entries() {
                    println!("{code:<24} {label}");
                }
            }
        }

        Ok(())
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("Yandex weather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_string());

    let set_location = Confirm::new("Set a default location?")
        .with_default(config.default_location.is_none())
        .prompt()?;
    if set_location {
        let latitude = CustomType::<f64>::new("Latitude:").prompt()?;
        let longitude = CustomType::<f64>::new("Longitude:").prompt()?;
        config.set_default_location(Coordinates::new(latitude, longitude)?);
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show(
    lat: Option<f64>,
    lon: Option<f64>,
    api_key: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if let Some(key) = api_key {
        config.set_api_key(key);
    }

    let coordinates = match (lat, lon) {
        (Some(lat), Some(lon)) => Coordinates::new(lat, lon)?,
        _ => config.default_coordinates()?,
    };

    let service = WeatherService::new(client_from_config(&config)?);

    let snapshot = match service.snapshot(coordinates).await {
        Ok(snapshot) => snapshot,
        // Only a newer request can cancel this one, and that one reports instead.
        Err(err) if err.is_cancelled() => return Ok(()),
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to fetch weather for {coordinates}"));
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", render(&snapshot));
    }

    Ok(())
}

fn render(snapshot: &WeatherSnapshot) -> String {
    let mut out = format!(
        "Температура: {}°C\nОщущается как: {}°C\nПогода: {}\n{}\n",
        snapshot.fact.temperature,
        snapshot.fact.feels_like,
        snapshot.condition_label,
        snapshot.recommendation,
    );

    if let Some(url) = snapshot.fact.icon_url() {
        out.push_str(&format!("Иконка: {url}\n"));
    }
    out.push_str(&format!(
        "Обновлено: {}\n",
        snapshot.fetched_at.with_timezone(&Local).format("%H:%M")
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use informer_core::{Comfort, WeatherFact};

    fn snapshot(icon: Option<&str>) -> WeatherSnapshot {
        WeatherSnapshot {
            fact: WeatherFact {
                temperature: 22,
                feels_like: 20,
                condition_code: "clear".into(),
                icon: icon.map(str::to_string),
            },
            condition_label: "Ясно".into(),
            comfort: Comfort::Warm,
            recommendation: Comfort::Warm.advice().into(),
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn render_lists_readings() {
        let text = render(&snapshot(Some("skc_d")));

        assert!(text.contains("Температура: 22°C"));
        assert!(text.contains("Ощущается как: 20°C"));
        assert!(text.contains("Погода: Ясно"));
        assert!(text.contains(Comfort::Warm.advice()));
        assert!(text.contains("funky/dark/skc_d.svg"));
    }

    #[test]
    fn render_skips_missing_icon() {
        assert!(!render(&snapshot(None)).contains("Иконка"));
    }

    #[test]
    fn show_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from(["informer", "show", "--lat", "-33.87", "--lon", "-151.2"])
            .unwrap();

        match cli.command {
            Command::Show { lat, lon, json, .. } => {
                assert_eq!(lat, Some(-33.87));
                assert_eq!(lon, Some(-151.2));
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn lat_requires_lon() {
        assert!(Cli::try_parse_from(["informer", "show", "--lat", "50.61"]).is_err());
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["informer", "conditions", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Conditions));
    }
}
