//! Core library for the `weather` search widget.
//!
//! This crate defines:
//! - The search widget state machine (query, snapshot, error, loading)
//! - Temperature label formatting and bands
//! - Abstraction over the weather provider and the WeatherAPI.com client
//! - Configuration & credentials handling
//!
//! It is used by `weather-cli`, but can also be driven by other front-ends.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;
pub mod widget;

pub use config::Config;
pub use error::{ErrorKind, FetchError, SearchError};
pub use model::{TemperatureBand, WeatherSnapshot, format_temperature_label};
pub use provider::{WeatherProvider, provider_from_config, weatherapi::WeatherApiProvider};
pub use render::WidgetView;
pub use widget::{SearchTicket, SearchWidget};
