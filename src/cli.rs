#![allow(clippy::missing_errors_doc)]

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

use crate::{app::settings::Theme, domain::weather::Units};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum UnitsArg {
    Celsius,
    Fahrenheit,
}

impl From<UnitsArg> for Units {
    fn from(value: UnitsArg) -> Self {
        match value {
            UnitsArg::Celsius => Units::Celsius,
            UnitsArg::Fahrenheit => Units::Fahrenheit,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Parser, Clone, Default)]
#[command(
    name = "skyboard",
    version,
    about = "Weather dashboard: the last three days, today and the days ahead"
)]
pub struct Cli {
    /// City or place to look up (default: most recent search)
    pub query: Option<String>,

    /// Direct latitude (requires --lon)
    #[arg(long, allow_negative_numbers = true, conflicts_with = "query")]
    pub lat: Option<f64>,

    /// Direct longitude (requires --lat)
    #[arg(long, allow_negative_numbers = true, conflicts_with = "query")]
    pub lon: Option<f64>,

    /// Day to show hourly detail for, YYYY-MM-DD (default: today)
    #[arg(long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,

    /// Temperature units (default: saved setting)
    #[arg(long, value_enum)]
    pub units: Option<UnitsArg>,

    /// Theme preference (default: saved setting)
    #[arg(long, value_enum)]
    pub theme: Option<ThemeArg>,

    /// Override the forecast API endpoint
    #[arg(long)]
    pub forecast_url: Option<String>,

    /// Override the geocoding API endpoint
    #[arg(long)]
    pub geocode_url: Option<String>,

    /// Print location suggestions for QUERY and exit
    #[arg(long, requires = "query")]
    pub suggest: bool,

    /// Print recent searches and exit
    #[arg(long)]
    pub recent: bool,

    /// Print the dashboard as JSON
    #[arg(long)]
    pub json: bool,

    /// Do not write settings or recent searches to disk
    #[arg(long)]
    pub no_save: bool,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        match (self.lat, self.lon) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("--lat and --lon must be provided together")
            }
            (Some(lat), Some(lon))
                if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) =>
            {
                anyhow::bail!("coordinates out of range: {lat}, {lon}")
            }
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|query| !query.is_empty())
    }
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD, got `{value}`: {err}"))
}
