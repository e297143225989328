use serde::{Deserialize, Serialize};

/// Unit literal attached to every snapshot produced by the providers.
pub const CELSIUS: &str = "C";

/// The last successfully fetched weather result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub description: String,
    /// Canonical place name as resolved by the provider.
    pub location: String,
    pub unit: String,
}

impl WeatherSnapshot {
    pub fn celsius(temperature: f64, description: String, location: String) -> Self {
        Self { temperature, description, location, unit: CELSIUS.to_string() }
    }

    /// Temperature line shown in the result block, e.g. `22°C - Moderate`.
    pub fn label(&self) -> String {
        format_temperature_label(self.temperature, &self.unit)
    }
}

/// Qualitative label derived from a Celsius temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureBand {
    Cold,
    Moderate,
    Hot,
}

impl TemperatureBand {
    /// Lower bounds are inclusive: exactly 10 is `Moderate`, exactly 25 is `Hot`.
    pub fn classify(temperature: f64) -> Self {
        if temperature < 10.0 {
            TemperatureBand::Cold
        } else if temperature < 25.0 {
            TemperatureBand::Moderate
        } else {
            TemperatureBand::Hot
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureBand::Cold => "Cold",
            TemperatureBand::Moderate => "Moderate",
            TemperatureBand::Hot => "Hot",
        }
    }
}

impl std::fmt::Display for TemperatureBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `"<t>°C - <band>"` for Celsius, plain `"<t>°<unit>"` for anything else.
pub fn format_temperature_label(temperature: f64, unit: &str) -> String {
    let temp = format_number(temperature);

    if unit == CELSIUS {
        format!("{temp}°C - {}", TemperatureBand::classify(temperature))
    } else {
        format!("{temp}°{unit}")
    }
}

// Integral values print without a fractional part (22, not 22.0); -0 prints as 0.
fn format_number(value: f64) -> String {
    if value == 0.0 { "0".to_string() } else { value.to_string() }
}
