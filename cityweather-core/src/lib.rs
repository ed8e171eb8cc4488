//! Core library for the `cityweather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the `WeatherProvider` trait
//! - Display regions and the lookup handler that fills them
//!
//! It is used by `cityweather-cli`, but any front-end that can implement
//! `DisplaySurface` can drive a lookup.

pub mod config;
pub mod display;
pub mod error;
pub mod lookup;
pub mod model;
pub mod provider;

pub use config::Config;
pub use display::{DisplaySurface, Panel, Region};
pub use error::{FetchError, LookupError};
pub use lookup::{Trigger, WeatherLookup};
pub use model::{CityQuery, WeatherReport};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
