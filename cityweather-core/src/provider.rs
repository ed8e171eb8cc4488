use crate::{
    Config, FetchError,
    model::{CityQuery, WeatherReport},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current weather for a city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, city: &CityQuery) -> Result<WeatherReport, FetchError>;
}

/// Construct the OpenWeather client from config, resolving the API key.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.resolve_api_key()?;
    let provider = OpenWeatherProvider::with_base_url(api_key, config.base_url.clone());

    Ok(Box::new(provider))
}
