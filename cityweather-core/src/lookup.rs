//! The weather lookup handler: validate input, fetch, render.

use tracing::error;

use crate::{
    display::{DisplaySurface, Region},
    error::LookupError,
    model::{CityQuery, WeatherReport},
    provider::WeatherProvider,
};

/// Shown in the city region whenever a fetch fails.
pub const FETCH_ERROR_MESSAGE: &str = "Error: Could not fetch weather.";

/// User action that may start a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Explicit request, e.g. a button click or a one-shot command.
    Click,
    /// A key pressed in the input; only Enter starts a lookup.
    Key(String),
}

impl Trigger {
    pub fn enter() -> Self {
        Trigger::Key("Enter".to_string())
    }

    pub fn starts_lookup(&self) -> bool {
        match self {
            Trigger::Click => true,
            Trigger::Key(key) => key == "Enter",
        }
    }
}

/// Concurrent lookups are not coordinated; whichever finishes last owns the
/// surface.
#[derive(Debug)]
pub struct WeatherLookup {
    provider: Box<dyn WeatherProvider>,
}

impl WeatherLookup {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Run the lookup if `trigger` calls for it. Returns `None` when the
    /// trigger was ignored.
    pub async fn handle<S>(
        &self,
        trigger: &Trigger,
        input: &str,
        surface: &mut S,
    ) -> Option<Result<WeatherReport, LookupError>>
    where
        S: DisplaySurface + ?Sized,
    {
        if !trigger.starts_lookup() {
            return None;
        }

        Some(self.get_weather(input, surface).await)
    }

    pub async fn get_weather<S>(
        &self,
        input: &str,
        surface: &mut S,
    ) -> Result<WeatherReport, LookupError>
    where
        S: DisplaySurface + ?Sized,
    {
        let city = match CityQuery::parse(input) {
            Ok(city) => city,
            Err(err) => {
                surface.alert(&err.to_string());
                return Err(err);
            }
        };

        match self.provider.current_weather(&city).await {
            Ok(report) => {
                render_report(surface, &report);
                Ok(report)
            }
            Err(err) => {
                error!(city = %city, error = %err, "weather lookup failed");
                render_error(surface);
                Err(err.into())
            }
        }
    }
}

pub fn render_report<S: DisplaySurface + ?Sized>(surface: &mut S, report: &WeatherReport) {
    surface.set_text(Region::City, &format!("Weather in {}", report.location_name));
    surface.set_text(Region::Temp, &format!("Temperature: {}°C", report.temperature_c));
    surface.set_text(Region::Desc, &format!("Condition: {}", report.description));
    surface.set_text(Region::Humidity, &format!("Humidity: {}%", report.humidity_pct));
}

pub fn render_error<S: DisplaySurface + ?Sized>(surface: &mut S) {
    surface.set_text(Region::City, FETCH_ERROR_MESSAGE);
    surface.set_text(Region::Temp, "");
    surface.set_text(Region::Desc, "");
    surface.set_text(Region::Humidity, "");
}
