use anyhow::Context;
use cityweather_core::{
    Config, LookupError, Panel, Trigger, WeatherLookup, WeatherReport, provider_from_config,
};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, Text};
use std::{
    io::{self, Write},
    process::ExitCode,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Current weather for a city")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name, e.g. "Paris" or "New York".
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,

        /// Print the report as JSON instead of the text regions.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for cities repeatedly; Enter looks one up, Esc or Ctrl-C quits.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { city, json } => {
                let lookup = lookup_from_config()?;
                show(&lookup, &city.join(" "), json, &mut io::stdout().lock(), &mut io::stderr())
                    .await
            }
            Command::Interactive => {
                let lookup = lookup_from_config()?;
                interactive(&lookup).await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn lookup_from_config() -> anyhow::Result<WeatherLookup> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;

    Ok(WeatherLookup::new(provider))
}

/// One lookup; the exit code reports whether it produced a report.
async fn show(
    lookup: &WeatherLookup,
    input: &str,
    json: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    let mut panel = Panel::new();

    let outcome = lookup.handle(&Trigger::Click, input, &mut panel).await;
    let succeeded = matches!(outcome, Some(Ok(_)));

    print_outcome(outcome, &mut panel, json, out, err)?;

    Ok(if succeeded { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_help_message("Get one at https://home.openweathermap.org/api_keys")
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn interactive(lookup: &WeatherLookup) -> anyhow::Result<()> {
    let mut panel = Panel::new();

    loop {
        let input = match Text::new("City:").prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city"),
        };

        let outcome = lookup.handle(&Trigger::enter(), &input, &mut panel).await;
        print_outcome(outcome, &mut panel, false, &mut io::stdout().lock(), &mut io::stderr())?;
    }

    Ok(())
}

/// A rejected input leaves the regions as they were, so only the alert is
/// printed for it.
fn print_outcome(
    outcome: Option<Result<WeatherReport, LookupError>>,
    panel: &mut Panel,
    json: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<()> {
    match outcome {
        Some(Ok(report)) if json => print_json(&report, out)?,
        Some(Err(LookupError::Validation)) => {
            for alert in panel.take_alerts() {
                writeln!(err, "{alert}")?;
            }
        }
        _ => print_panel(panel, out, err)?,
    }

    Ok(())
}

/// Alerts go to `err`, non-empty regions to `out`, one per line.
fn print_panel(panel: &mut Panel, out: &mut impl Write, err: &mut impl Write) -> io::Result<()> {
    for alert in panel.take_alerts() {
        writeln!(err, "{alert}")?;
    }

    for line in panel.lines() {
        writeln!(out, "{line}")?;
    }

    Ok(())
}

fn print_json(report: &WeatherReport, out: &mut impl Write) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report).context("Failed to serialize report")?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cityweather_core::{
        DisplaySurface, OpenWeatherProvider, Region, lookup::FETCH_ERROR_MESSAGE,
    };
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn lookup_for(base_url: String) -> WeatherLookup {
        let provider = OpenWeatherProvider::with_base_url("TEST_KEY".into(), base_url);
        WeatherLookup::new(Box::new(provider))
    }

    async fn server_responding(template: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(template)
            .mount(&server)
            .await;
        server
    }

    fn text(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn show_joins_multiword_city() {
        let cli = Cli::try_parse_from(["cityweather", "show", "New", "York"]).unwrap();

        match cli.command {
            Command::Show { city, json } => {
                assert_eq!(city.join(" "), "New York");
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_requires_a_city() {
        assert!(Cli::try_parse_from(["cityweather", "show"]).is_err());
    }

    #[test]
    fn json_flag_is_parsed() {
        let cli = Cli::try_parse_from(["cityweather", "show", "--json", "Oslo"]).unwrap();
        assert!(matches!(cli.command, Command::Show { json: true, .. }));
    }

    #[test]
    fn print_panel_splits_alerts_and_regions() {
        let mut panel = Panel::new();
        panel.alert("Please enter a city name!");
        panel.set_text(Region::City, "Weather in Paris");
        panel.set_text(Region::Humidity, "Humidity: 60%");

        let mut out = Vec::new();
        let mut err = Vec::new();
        print_panel(&mut panel, &mut out, &mut err).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Weather in Paris\nHumidity: 60%\n");
        assert_eq!(String::from_utf8(err).unwrap(), "Please enter a city name!\n");
        assert!(panel.alerts().is_empty());
    }

    #[test]
    fn print_json_writes_report_fields() {
        let report = WeatherReport {
            location_name: "Paris".into(),
            temperature_c: 18.5,
            description: "clear sky".into(),
            humidity_pct: 60,
            observed_at: None,
        };

        let mut out = Vec::new();
        print_json(&report, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["location_name"], "Paris");
        assert_eq!(value["temperature_c"], 18.5);
        assert_eq!(value["humidity_pct"], 60);
    }

    #[tokio::test]
    async fn show_succeeds_and_prints_regions() {
        let server = server_responding(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({
                "name": "Paris",
                "main": { "temp": 18.5, "humidity": 60 },
                "weather": [ { "description": "clear sky" } ]
            }),
        ))
        .await;
        let lookup = lookup_for(server.uri());

        let (mut out, mut err) = (Vec::<u8>::new(), Vec::<u8>::new());
        let code = show(&lookup, "Paris", false, &mut out, &mut err).await.unwrap();

        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(
            text(out),
            "Weather in Paris\nTemperature: 18.5°C\nCondition: clear sky\nHumidity: 60%\n"
        );
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn show_fails_on_blank_input_with_alert() {
        let server = server_responding(ResponseTemplate::new(500)).await;
        let lookup = lookup_for(server.uri());

        let (mut out, mut err) = (Vec::<u8>::new(), Vec::<u8>::new());
        let code = show(&lookup, "   ", false, &mut out, &mut err).await.unwrap();

        assert_eq!(code, ExitCode::FAILURE);
        assert!(out.is_empty());
        assert_eq!(text(err), "Please enter a city name!\n");
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn show_json_fails_on_not_found_with_error_text() {
        let server = server_responding(ResponseTemplate::new(404)).await;
        let lookup = lookup_for(server.uri());

        let (mut out, mut err) = (Vec::<u8>::new(), Vec::<u8>::new());
        let code = show(&lookup, "Atlantis", true, &mut out, &mut err).await.unwrap();

        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(text(out), format!("{FETCH_ERROR_MESSAGE}\n"));
    }

    #[test]
    fn rejected_input_prints_only_the_alert() {
        let mut panel = Panel::new();
        panel.set_text(Region::City, "Weather in Paris");
        panel.alert("Please enter a city name!");

        let (mut out, mut err) = (Vec::<u8>::new(), Vec::<u8>::new());
        print_outcome(Some(Err(LookupError::Validation)), &mut panel, false, &mut out, &mut err)
            .unwrap();

        assert!(out.is_empty());
        assert_eq!(text(err), "Please enter a city name!\n");
        assert_eq!(panel.text(Region::City), "Weather in Paris");
    }
}
