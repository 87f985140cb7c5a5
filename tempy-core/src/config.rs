use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::{Result, TempyError};

/// Unresolved options as read from one source (rc file or command line).
///
/// Missing options are empty strings, so every source has the same shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawConfig {
    pub location: String,
    pub units: String,
    pub api_key: String,
}

impl RawConfig {
    /// Option names understood by tempy, in rc file order.
    pub const OPTIONS: [&'static str; 3] = ["location", "units", "api_key"];

    /// Set a recognized option. Returns `false` for unknown keys.
    pub fn set(&mut self, key: &str, value: String) -> bool {
        match key {
            "location" => self.location = value,
            "units" => self.units = value,
            "api_key" => self.api_key = value,
            _ => return false,
        }
        true
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "location" => Some(&self.location),
            "units" => Some(&self.units),
            "api_key" => Some(&self.api_key),
            _ => None,
        }
    }
}

/// Measurement system used for every formatted value in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Imperial,
    Metric,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Imperial => "imperial",
            Units::Metric => "metric",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = TempyError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "imperial" => Ok(Units::Imperial),
            "metric" => Ok(Units::Metric),
            _ => Err(TempyError::InvalidUnits(value.to_string())),
        }
    }
}

/// Final configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Never empty.
    pub location: String,
    pub units: Units,
    /// `None` means requests go through the public proxy.
    pub api_key: Option<String>,
}

impl From<&ResolvedConfig> for RawConfig {
    fn from(config: &ResolvedConfig) -> Self {
        RawConfig {
            location: config.location.clone(),
            units: config.units.to_string(),
            api_key: config.api_key.clone().unwrap_or_default(),
        }
    }
}

/// Merge command line options over rc file options.
///
/// Non-empty command line values win, then rc values. An empty location is an
/// error; empty units fall back to imperial.
pub fn resolve(rc: &RawConfig, args: &RawConfig) -> Result<ResolvedConfig> {
    let pick = |key: &str| -> String {
        let arg = args.get(key).unwrap_or_default();
        if arg.is_empty() { rc.get(key).unwrap_or_default().to_string() } else { arg.to_string() }
    };

    let location = pick("location");
    if location.is_empty() {
        return Err(TempyError::MissingLocation);
    }

    let units = match pick("units").as_str() {
        "" => Units::default(),
        other => other.parse()?,
    };

    let api_key = Some(pick("api_key")).filter(|key| !key.is_empty());

    tracing::debug!(%location, %units, proxy = api_key.is_none(), "resolved configuration");

    Ok(ResolvedConfig { location, units, api_key })
}
