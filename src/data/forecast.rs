use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    clock::Clock,
    data::cache::{CacheFamily, ResponseCache},
    domain::weather::{
        CurrentConditions, DailyEntry, DailySeries, Forecast, HourlyEntry, HourlySeries,
        SeriesError, parse_date, parse_datetime,
    },
};

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,is_day,precipitation,weather_code,cloud_cover,pressure_msl,wind_speed_10m,wind_direction_10m,wind_gusts_10m";
const HOURLY_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,precipitation,weather_code,wind_speed_10m,is_day";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,precipitation_sum,wind_speed_10m_max,wind_direction_10m_dominant";

/// open-meteo client for current, forecast and historical data, each family
/// answered from its own response cache when possible.
#[derive(Debug)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    current_cache: ResponseCache<Option<CurrentConditions>>,
    forecast_cache: ResponseCache<Forecast>,
    historical_cache: ResponseCache<Option<DailySeries>>,
}

impl WeatherClient {
    pub fn new(clock: Arc<dyn Clock>) -> Result<Self> {
        Self::with_base_url(FORECAST_URL, clock)
    }

    pub fn with_base_url(base_url: impl Into<String>, clock: Arc<dyn Clock>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("building weather http client failed")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            current_cache: ResponseCache::with_default_ttl(clock.clone()),
            forecast_cache: ResponseCache::with_default_ttl(clock.clone()),
            historical_cache: ResponseCache::with_default_ttl(clock),
        })
    }

    pub async fn current(&self, latitude: f64, longitude: f64) -> Result<Option<CurrentConditions>> {
        let key = coordinate_params(latitude, longitude);
        if let Some(hit) = self.current_cache.get(CacheFamily::Current, &key) {
            return Ok(hit);
        }

        let payload: CurrentResponse = self
            .get_json(
                &[
                    ("latitude", latitude.to_string()),
                    ("longitude", longitude.to_string()),
                    ("current", CURRENT_FIELDS.to_string()),
                    ("timezone", "auto".to_string()),
                ],
                "current weather",
            )
            .await?;

        let current = accept(parse_current(payload.current.as_ref()), "current");
        self.current_cache
            .put(CacheFamily::Current, &key, current.clone());
        Ok(current)
    }

    pub async fn forecast(&self, latitude: f64, longitude: f64, days: u8) -> Result<Forecast> {
        let mut key = coordinate_params(latitude, longitude);
        key.push(("days", days.to_string()));
        if let Some(hit) = self.forecast_cache.get(CacheFamily::Forecast, &key) {
            return Ok(hit);
        }

        let payload: ForecastResponse = self
            .get_json(
                &[
                    ("latitude", latitude.to_string()),
                    ("longitude", longitude.to_string()),
                    ("hourly", HOURLY_FIELDS.to_string()),
                    ("daily", DAILY_FIELDS.to_string()),
                    ("forecast_days", days.to_string()),
                    ("timezone", "auto".to_string()),
                ],
                "forecast",
            )
            .await?;

        let forecast = Forecast {
            daily: accept(validate_daily(payload.daily.as_ref()), "forecast daily"),
            hourly: accept(validate_hourly(payload.hourly.as_ref()), "forecast hourly"),
        };
        self.forecast_cache
            .put(CacheFamily::Forecast, &key, forecast.clone());
        Ok(forecast)
    }

    pub async fn historical(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<DailySeries>> {
        let mut key = coordinate_params(latitude, longitude);
        key.push(("start_date", start.to_string()));
        key.push(("end_date", end.to_string()));
        if let Some(hit) = self.historical_cache.get(CacheFamily::Historical, &key) {
            return Ok(hit);
        }

        let payload: HistoricalResponse = self
            .get_json(
                &[
                    ("latitude", latitude.to_string()),
                    ("longitude", longitude.to_string()),
                    ("start_date", start.to_string()),
                    ("end_date", end.to_string()),
                    ("daily", DAILY_FIELDS.to_string()),
                    ("timezone", "auto".to_string()),
                ],
                "historical weather",
            )
            .await?;

        let history = accept(validate_daily(payload.daily.as_ref()), "historical daily");
        self.historical_cache
            .put(CacheFamily::Historical, &key, history.clone());
        Ok(history)
    }

    async fn get_json<P: DeserializeOwned>(&self, query: &[(&str, String)], what: &str) -> Result<P> {
        tracing::debug!(what, url = %self.base_url, "requesting upstream");
        let response = self
            .client
            .get(&self.base_url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("{what} request failed"))?
            .error_for_status()
            .with_context(|| format!("{what} request returned non-success status"))?;

        response
            .json()
            .await
            .with_context(|| format!("failed to parse {what} payload"))
    }
}

fn coordinate_params(latitude: f64, longitude: f64) -> Vec<(&'static str, String)> {
    vec![("lat", latitude.to_string()), ("lon", longitude.to_string())]
}

fn accept<T>(validated: Result<T, SeriesError>, what: &str) -> Option<T> {
    match validated {
        Ok(series) => Some(series),
        Err(err) => {
            tracing::warn!(what, %err, "discarding malformed series");
            None
        }
    }
}

fn parse_current(block: Option<&CurrentBlock>) -> Result<CurrentConditions, SeriesError> {
    let block = block.ok_or(SeriesError::MissingBlock("current"))?;
    Ok(CurrentConditions {
        time: block.time.as_deref().and_then(parse_datetime),
        temperature_2m_c: block
            .temperature_2m
            .ok_or(SeriesError::MissingColumn("temperature_2m"))?,
        weather_code: block
            .weather_code
            .ok_or(SeriesError::MissingColumn("weather_code"))?,
        is_day: block.is_day.is_none_or(|flag| flag == 1),
        relative_humidity_2m: block.relative_humidity_2m,
        apparent_temperature_c: block.apparent_temperature,
        precipitation_mm: block.precipitation,
        cloud_cover: block.cloud_cover,
        pressure_msl_hpa: block.pressure_msl,
        wind_speed_10m: block.wind_speed_10m,
        wind_direction_10m: block.wind_direction_10m,
        wind_gusts_10m: block.wind_gusts_10m,
    })
}

/// Common length of the present columns. A column that disagrees with `time`
/// is an upstream defect; the series is clamped to the shortest column.
fn aligned_len(series: &str, columns: &[(&'static str, Option<usize>)]) -> Result<usize, SeriesError> {
    let expected = columns
        .iter()
        .find_map(|(name, len)| (*name == "time").then_some(*len).flatten())
        .ok_or(SeriesError::MissingColumn("time"))?;

    let mut len = expected;
    for (name, actual) in columns {
        let Some(actual) = *actual else {
            continue;
        };
        if actual != expected {
            tracing::warn!(series, column = *name, expected, actual, "column length mismatch, clamping");
        }
        len = len.min(actual);
    }

    if len == 0 {
        return Err(SeriesError::Empty);
    }
    Ok(len)
}

fn at<T: Copy>(column: Option<&Vec<Option<T>>>, idx: usize) -> Option<T> {
    column.and_then(|values| values.get(idx).copied().flatten())
}

fn require<T>(column: Option<&T>, name: &'static str) -> Result<(), SeriesError> {
    column.map(|_| ()).ok_or(SeriesError::MissingColumn(name))
}

fn validate_daily(block: Option<&DailyBlock>) -> Result<DailySeries, SeriesError> {
    let block = block.ok_or(SeriesError::MissingBlock("daily"))?;
    let time = block.time.as_ref().ok_or(SeriesError::MissingColumn("time"))?;
    require(block.weather_code.as_ref(), "weather_code")?;
    require(block.temperature_2m_max.as_ref(), "temperature_2m_max")?;
    require(block.temperature_2m_min.as_ref(), "temperature_2m_min")?;

    let len = aligned_len(
        "daily",
        &[
            ("time", Some(time.len())),
            ("weather_code", block.weather_code.as_ref().map(Vec::len)),
            ("temperature_2m_max", block.temperature_2m_max.as_ref().map(Vec::len)),
            ("temperature_2m_min", block.temperature_2m_min.as_ref().map(Vec::len)),
            ("precipitation_sum", block.precipitation_sum.as_ref().map(Vec::len)),
            ("wind_speed_10m_max", block.wind_speed_10m_max.as_ref().map(Vec::len)),
            (
                "wind_direction_10m_dominant",
                block.wind_direction_10m_dominant.as_ref().map(Vec::len),
            ),
        ],
    )?;

    let mut entries = Vec::with_capacity(len);
    for (idx, raw_date) in time.iter().take(len).enumerate() {
        let Some(date) = parse_date(raw_date) else {
            continue;
        };
        entries.push(DailyEntry {
            date,
            weather_code: at(block.weather_code.as_ref(), idx),
            temperature_max_c: at(block.temperature_2m_max.as_ref(), idx),
            temperature_min_c: at(block.temperature_2m_min.as_ref(), idx),
            precipitation_sum_mm: at(block.precipitation_sum.as_ref(), idx),
            wind_speed_max: at(block.wind_speed_10m_max.as_ref(), idx),
            wind_direction_dominant: at(block.wind_direction_10m_dominant.as_ref(), idx),
        });
    }

    if entries.is_empty() {
        return Err(SeriesError::Empty);
    }
    Ok(DailySeries::new(entries))
}

fn validate_hourly(block: Option<&HourlyBlock>) -> Result<HourlySeries, SeriesError> {
    let block = block.ok_or(SeriesError::MissingBlock("hourly"))?;
    let time = block.time.as_ref().ok_or(SeriesError::MissingColumn("time"))?;
    require(block.temperature_2m.as_ref(), "temperature_2m")?;
    require(block.weather_code.as_ref(), "weather_code")?;

    let len = aligned_len(
        "hourly",
        &[
            ("time", Some(time.len())),
            ("temperature_2m", block.temperature_2m.as_ref().map(Vec::len)),
            ("weather_code", block.weather_code.as_ref().map(Vec::len)),
            ("precipitation", block.precipitation.as_ref().map(Vec::len)),
            ("relative_humidity_2m", block.relative_humidity_2m.as_ref().map(Vec::len)),
            ("wind_speed_10m", block.wind_speed_10m.as_ref().map(Vec::len)),
            ("apparent_temperature", block.apparent_temperature.as_ref().map(Vec::len)),
            ("is_day", block.is_day.as_ref().map(Vec::len)),
        ],
    )?;

    let mut entries = Vec::with_capacity(len);
    for (idx, raw_time) in time.iter().take(len).enumerate() {
        let Some(time) = parse_datetime(raw_time) else {
            continue;
        };
        entries.push(HourlyEntry {
            time,
            temperature_2m_c: at(block.temperature_2m.as_ref(), idx),
            weather_code: at(block.weather_code.as_ref(), idx),
            precipitation_mm: at(block.precipitation.as_ref(), idx),
            relative_humidity_2m: at(block.relative_humidity_2m.as_ref(), idx),
            wind_speed_10m: at(block.wind_speed_10m.as_ref(), idx),
            apparent_temperature_c: at(block.apparent_temperature.as_ref(), idx),
            is_day: at(block.is_day.as_ref(), idx).map(|flag| flag == 1),
        });
    }

    if entries.is_empty() {
        return Err(SeriesError::Empty);
    }
    Ok(HourlySeries::new(entries))
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    current: Option<CurrentBlock>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CurrentBlock {
    time: Option<String>,
    temperature_2m: Option<f32>,
    relative_humidity_2m: Option<f32>,
    apparent_temperature: Option<f32>,
    is_day: Option<u8>,
    precipitation: Option<f32>,
    weather_code: Option<u8>,
    cloud_cover: Option<f32>,
    pressure_msl: Option<f32>,
    wind_speed_10m: Option<f32>,
    wind_direction_10m: Option<f32>,
    wind_gusts_10m: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailyBlock>,
    hourly: Option<HourlyBlock>,
}

#[derive(Debug, Deserialize)]
struct HistoricalResponse {
    daily: Option<DailyBlock>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DailyBlock {
    time: Option<Vec<String>>,
    weather_code: Option<Vec<Option<u8>>>,
    temperature_2m_max: Option<Vec<Option<f32>>>,
    temperature_2m_min: Option<Vec<Option<f32>>>,
    precipitation_sum: Option<Vec<Option<f32>>>,
    wind_speed_10m_max: Option<Vec<Option<f32>>>,
    wind_direction_10m_dominant: Option<Vec<Option<f32>>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HourlyBlock {
    time: Option<Vec<String>>,
    temperature_2m: Option<Vec<Option<f32>>>,
    weather_code: Option<Vec<Option<u8>>>,
    precipitation: Option<Vec<Option<f32>>>,
    relative_humidity_2m: Option<Vec<Option<f32>>>,
    wind_speed_10m: Option<Vec<Option<f32>>>,
    apparent_temperature: Option<Vec<Option<f32>>>,
    is_day: Option<Vec<Option<u8>>>,
}
