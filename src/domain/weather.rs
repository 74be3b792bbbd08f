use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod conditions;
mod conversions;

pub use conditions::{
    WeatherCategory, weather_code_to_category, weather_glyph, weather_label,
    weather_label_for_time,
};
pub use conversions::{
    convert_temp, convert_wind_speed, day_name, day_number, format_temperature,
    format_wind_speed, lookback_range, parse_date, parse_datetime, relative_day_label,
    round_temp, truncate_to_hour, wind_direction_label, wind_strength_label,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub region: Option<String>,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    #[must_use]
    pub fn from_coords(lat: f64, lon: f64) -> Self {
        Self {
            name: format!("{lat:.4}, {lon:.4}"),
            region: None,
            country: None,
            latitude: lat,
            longitude: lon,
        }
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.region, &self.country) {
            (Some(region), Some(country)) => format!("{}, {}, {}", self.name, region, country),
            (None, Some(country)) => format!("{}, {}", self.name, country),
            (Some(region), None) => format!("{}, {}", self.name, region),
            (None, None) => self.name.clone(),
        }
    }

    /// Label stored in the recent-searches list.
    #[must_use]
    pub fn search_label(&self) -> String {
        match &self.region {
            Some(region) if !region.is_empty() => format!("{}, {}", self.name, region),
            _ => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Live snapshot. Only temperature and weather code are guaranteed; open-meteo
/// leaves other fields out for some grid cells.
pub struct CurrentConditions {
    pub time: Option<NaiveDateTime>,
    pub temperature_2m_c: f32,
    pub weather_code: u8,
    pub is_day: bool,
    pub relative_humidity_2m: Option<f32>,
    pub apparent_temperature_c: Option<f32>,
    pub precipitation_mm: Option<f32>,
    pub cloud_cover: Option<f32>,
    pub pressure_msl_hpa: Option<f32>,
    pub wind_speed_10m: Option<f32>,
    pub wind_direction_10m: Option<f32>,
    pub wind_gusts_10m: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyEntry {
    pub date: NaiveDate,
    pub weather_code: Option<u8>,
    pub temperature_max_c: Option<f32>,
    pub temperature_min_c: Option<f32>,
    pub precipitation_sum_mm: Option<f32>,
    pub wind_speed_max: Option<f32>,
    pub wind_direction_dominant: Option<f32>,
}

/// Daily aggregates, kept in ascending date order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySeries {
    entries: Vec<DailyEntry>,
}

impl DailySeries {
    #[must_use]
    pub fn new(mut entries: Vec<DailyEntry>) -> Self {
        entries.sort_by_key(|entry| entry.date);
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[DailyEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<&DailyEntry> {
        self.entries.iter().find(|entry| entry.date == date)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyEntry {
    pub time: NaiveDateTime,
    pub temperature_2m_c: Option<f32>,
    pub weather_code: Option<u8>,
    pub precipitation_mm: Option<f32>,
    pub relative_humidity_2m: Option<f32>,
    pub wind_speed_10m: Option<f32>,
    pub apparent_temperature_c: Option<f32>,
    pub is_day: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlySeries {
    entries: Vec<HourlyEntry>,
}

impl HourlySeries {
    #[must_use]
    pub fn new(mut entries: Vec<HourlyEntry>) -> Self {
        entries.sort_by_key(|entry| entry.time);
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[HourlyEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Validated forecast payload. A block that failed validation is `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    pub daily: Option<DailySeries>,
    pub hourly: Option<HourlySeries>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("payload has no `{0}` block")]
    MissingBlock(&'static str),
    #[error("column `{0}` is missing")]
    MissingColumn(&'static str),
    #[error("series contains no entries")]
    Empty,
}

#[cfg(test)]
mod tests;
