use serde::{Deserialize, Serialize};

/// A (display name, resolution URL) pair produced by a browse-locations
/// page. The same shape is persisted per provider in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub url: String,
}

impl Location {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self { name: name.into(), url: url.into() }
    }
}

/// Extracted weather fields. Not every source exposes every field, so
/// each one is optional and extraction omits what the markup lacks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WeatherInfo {
    pub condition: Option<String>,
    pub temperature: Option<String>,
    pub feels_like: Option<String>,
    pub wind: Option<String>,
}

impl WeatherInfo {
    pub fn is_empty(&self) -> bool {
        self.condition.is_none()
            && self.temperature.is_none()
            && self.feels_like.is_none()
            && self.wind.is_none()
    }
}

/// One provider's result for a single application run.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    pub provider: String,
    pub title: String,
    pub location: String,
    pub info: WeatherInfo,
}
