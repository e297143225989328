use std::fmt;

use crate::{error::SearchError, model::WeatherSnapshot};

pub const TITLE: &str = "Weather Widget";
pub const DESCRIPTION: &str = "Search for the current weather in your city.";
pub const INPUT_PLACEHOLDER: &str = "Enter a city name";

/// Text rendering of the widget: the form plus whatever result and error
/// lines the current state calls for.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetView {
    pub submit_label: &'static str,
    pub submit_enabled: bool,
    pub error_line: Option<String>,
    pub result: Option<ResultBlock>,
}

/// Three-line result block: temperature + band, condition, location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultBlock {
    pub temperature: String,
    pub description: String,
    pub location: String,
}

impl From<&WeatherSnapshot> for ResultBlock {
    fn from(snapshot: &WeatherSnapshot) -> Self {
        Self {
            temperature: snapshot.label(),
            description: snapshot.description.clone(),
            location: snapshot.location.clone(),
        }
    }
}

impl WidgetView {
    pub fn from_state(
        loading: bool,
        error: Option<&SearchError>,
        snapshot: Option<&WeatherSnapshot>,
    ) -> Self {
        Self {
            submit_label: if loading { "Loading..." } else { "Search" },
            submit_enabled: !loading,
            error_line: error.map(ToString::to_string),
            result: snapshot.map(ResultBlock::from),
        }
    }

    /// Nothing below the form yet.
    pub fn is_blank(&self) -> bool {
        self.error_line.is_none() && self.result.is_none()
    }
}

// Error line first, then the (possibly stale) result block.
impl fmt::Display for WidgetView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(error) = &self.error_line {
            writeln!(f, "{error}")?;
        }
        if let Some(result) = &self.result {
            writeln!(f, "🌡  {}", result.temperature)?;
            writeln!(f, "☁  {}", result.description)?;
            writeln!(f, "📍 {}", result.location)?;
        }
        Ok(())
    }
}
