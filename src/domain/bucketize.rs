use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;

use crate::domain::weather::{
    CurrentConditions, DailyEntry, DailySeries, HourlyEntry, HourlySeries, day_name, day_number,
    truncate_to_hour,
};

/// Forecast days emitted after today, mirroring the historical lookback.
pub const FORECAST_DAYS_SHOWN: usize = 3;
pub const HOURS_IN_WINDOW: usize = 24;
/// Maximum jitter added to a synthesized hourly temperature.
pub const SYNTHETIC_JITTER_C: f32 = 0.5;

const FLAT_SAMPLE_SIZE: usize = 8;
const FLAT_RANGE_THRESHOLD_C: f32 = 1.0;
const SUNRISE_HOUR: f32 = 6.0;
const SUNSET_HOUR: f32 = 18.0;
const PEAK_HOUR: f32 = 14.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayRow {
    pub date: NaiveDate,
    pub day_name: String,
    pub day_number: u32,
    pub max_temp_c: Option<f32>,
    pub min_temp_c: Option<f32>,
    pub weather_code: Option<u8>,
    pub precipitation_mm: Option<f32>,
    pub wind_speed_max: Option<f32>,
    pub is_historical: bool,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourRow {
    /// Clock hour, for display only. Not unique across a window that wraps midnight.
    pub hour: u32,
    pub time: NaiveDateTime,
    pub temperature_c: Option<f32>,
    pub weather_code: Option<u8>,
    pub precipitation_mm: Option<f32>,
    pub humidity: Option<f32>,
    pub wind_speed: Option<f32>,
    pub feels_like_c: Option<f32>,
    pub is_day: bool,
    /// Set when `temperature_c` comes from the flat-data fallback curve, not a measurement.
    pub temperature_synthesized: bool,
}

/// Weather for one selected date. Fields the source does not carry are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub temperature_c: Option<f32>,
    pub weather_code: Option<u8>,
    pub humidity: Option<f32>,
    pub wind_speed: Option<f32>,
    pub wind_direction: Option<f32>,
    pub pressure_hpa: Option<f32>,
    pub precipitation_mm: Option<f32>,
    pub is_historical: bool,
    pub is_live: bool,
}

/// Past days, today and up to three forecast days in ascending order. Pure:
/// `today` comes from the caller.
#[must_use]
pub fn build_day_rows(
    forecast: Option<&DailySeries>,
    historical: Option<&DailySeries>,
    current: Option<&CurrentConditions>,
    today: NaiveDate,
) -> Vec<DayRow> {
    let mut rows = Vec::new();

    if let Some(historical) = historical {
        let past = ascending_unique(historical.entries().iter().filter(|e| e.date < today));
        rows.extend(past.into_iter().map(|entry| day_row(entry, true, false)));
    }

    let Some(forecast) = forecast else {
        return rows;
    };

    if let Some(entry) = forecast.get(today) {
        let mut row = day_row(entry, false, true);
        if let Some(current) = current {
            row.weather_code = Some(current.weather_code);
        }
        rows.push(row);
    }

    let upcoming = ascending_unique(forecast.entries().iter().filter(|e| e.date > today));
    rows.extend(
        upcoming
            .into_iter()
            .take(FORECAST_DAYS_SHOWN)
            .map(|entry| day_row(entry, false, false)),
    );

    rows
}

#[must_use]
pub fn day_row_for(rows: &[DayRow], date: NaiveDate) -> Option<&DayRow> {
    rows.iter().find(|row| row.date == date)
}

#[must_use]
pub fn build_hour_rows(
    hourly: Option<&HourlySeries>,
    daily: Option<&DailySeries>,
    selected: NaiveDate,
    now: NaiveDateTime,
) -> Vec<HourRow> {
    let Some(hourly) = hourly else {
        return Vec::new();
    };
    let entries = hourly.entries();

    let window: Vec<&HourlyEntry> = if selected == now.date() {
        rolling_window(entries, now)
    } else {
        entries
            .iter()
            .filter(|entry| entry.time.date() == selected)
            .collect()
    };

    let synthetic = if is_flat(entries) {
        synthesis_bounds(daily, selected, &window)
            .map(|(min, max)| synthesize_diurnal_curve(min, max, seed_for(selected)))
    } else {
        None
    };

    window
        .into_iter()
        .map(|entry| hour_row(entry, synthetic.as_ref()))
        .collect()
}

#[must_use]
pub fn day_summary(
    selected: NaiveDate,
    today: NaiveDate,
    forecast: Option<&DailySeries>,
    historical: Option<&DailySeries>,
    current: Option<&CurrentConditions>,
) -> Option<DaySummary> {
    if selected == today
        && let Some(current) = current
    {
        return Some(DaySummary {
            date: selected,
            temperature_c: Some(current.temperature_2m_c),
            weather_code: Some(current.weather_code),
            humidity: current.relative_humidity_2m,
            wind_speed: current.wind_speed_10m,
            wind_direction: current.wind_direction_10m,
            pressure_hpa: current.pressure_msl_hpa,
            precipitation_mm: current.precipitation_mm,
            is_historical: false,
            is_live: true,
        });
    }

    if let Some(entry) = historical.and_then(|series| series.get(selected)) {
        return Some(daily_summary(entry, true));
    }
    forecast
        .and_then(|series| series.get(selected))
        .map(|entry| daily_summary(entry, false))
}

/// Hourly temperatures following a typical day, coldest before sunrise and
/// warmest mid-afternoon.
#[must_use]
pub fn synthesize_diurnal_curve(min: f32, max: f32, seed: u64) -> [f32; HOURS_IN_WINDOW] {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    let span = max - min;
    let daylight = SUNSET_HOUR - SUNRISE_HOUR;
    let peak_progress = (PEAK_HOUR - SUNRISE_HOUR) / daylight;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut curve = [0.0; HOURS_IN_WINDOW];
    for (hour, slot) in curve.iter_mut().enumerate() {
        let h = hour as f32;
        let base = if (SUNRISE_HOUR..=SUNSET_HOUR).contains(&h) {
            let progress = (h - SUNRISE_HOUR) / daylight;
            if progress <= peak_progress {
                min + span * (progress / peak_progress)
            } else {
                let decline = (progress - peak_progress) / (1.0 - peak_progress);
                max - span * decline * 0.3
            }
        } else if h > SUNSET_HOUR {
            let night = 24.0 - SUNSET_HOUR + SUNRISE_HOUR;
            max - span * ((h - SUNSET_HOUR) / night) * 0.8
        } else {
            min + span * (h / SUNRISE_HOUR) * 0.2
        };
        let jitter = rng.random_range(-SYNTHETIC_JITTER_C..SYNTHETIC_JITTER_C);
        *slot = ((base + jitter) * 10.0).round() / 10.0;
    }
    curve
}

fn ascending_unique<'a>(entries: impl Iterator<Item = &'a DailyEntry>) -> Vec<&'a DailyEntry> {
    let mut entries: Vec<&DailyEntry> = entries.collect();
    entries.sort_by_key(|entry| entry.date);
    entries.dedup_by_key(|entry| entry.date);
    entries
}

fn day_row(entry: &DailyEntry, is_historical: bool, is_today: bool) -> DayRow {
    DayRow {
        date: entry.date,
        day_name: day_name(entry.date),
        day_number: day_number(entry.date),
        max_temp_c: entry.temperature_max_c,
        min_temp_c: entry.temperature_min_c,
        weather_code: entry.weather_code,
        precipitation_mm: entry.precipitation_sum_mm,
        wind_speed_max: entry.wind_speed_max,
        is_historical,
        is_today,
    }
}

fn daily_summary(entry: &DailyEntry, is_historical: bool) -> DaySummary {
    let temperature_c = match (entry.temperature_max_c, entry.temperature_min_c) {
        (Some(max), Some(min)) => Some((max + min) / 2.0),
        _ => None,
    };
    DaySummary {
        date: entry.date,
        temperature_c,
        weather_code: entry.weather_code,
        humidity: None,
        wind_speed: entry.wind_speed_max,
        wind_direction: entry.wind_direction_dominant,
        pressure_hpa: None,
        precipitation_mm: entry.precipitation_sum_mm,
        is_historical,
        is_live: false,
    }
}

fn rolling_window(entries: &[HourlyEntry], now: NaiveDateTime) -> Vec<&HourlyEntry> {
    let start = truncate_to_hour(now);
    let Some(first) = entries.iter().position(|entry| entry.time >= start) else {
        return Vec::new();
    };
    entries[first..].iter().take(HOURS_IN_WINDOW).collect()
}

fn hour_row(entry: &HourlyEntry, synthetic: Option<&[f32; HOURS_IN_WINDOW]>) -> HourRow {
    let hour = entry.time.hour();
    let (temperature_c, temperature_synthesized) = match synthetic {
        Some(curve) => (Some(curve[hour as usize]), true),
        None => (entry.temperature_2m_c, false),
    };
    HourRow {
        hour,
        time: entry.time,
        temperature_c,
        weather_code: entry.weather_code,
        precipitation_mm: entry.precipitation_mm,
        humidity: entry.relative_humidity_2m,
        wind_speed: entry.wind_speed_10m,
        feels_like_c: entry.apparent_temperature_c,
        is_day: entry.is_day.unwrap_or(true),
        temperature_synthesized,
    }
}

fn is_flat(entries: &[HourlyEntry]) -> bool {
    let samples = entries
        .iter()
        .filter_map(|entry| entry.temperature_2m_c)
        .take(FLAT_SAMPLE_SIZE);
    match min_max(samples) {
        Some((min, max)) => max - min < FLAT_RANGE_THRESHOLD_C,
        None => false,
    }
}

fn synthesis_bounds(
    daily: Option<&DailySeries>,
    selected: NaiveDate,
    window: &[&HourlyEntry],
) -> Option<(f32, f32)> {
    let from_daily = daily
        .and_then(|series| series.get(selected))
        .and_then(|entry| Some((entry.temperature_min_c?, entry.temperature_max_c?)));
    from_daily.or_else(|| min_max(window.iter().filter_map(|entry| entry.temperature_2m_c)))
}

fn min_max(values: impl Iterator<Item = f32>) -> Option<(f32, f32)> {
    values.fold(None, |acc, value| match acc {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}

fn seed_for(date: NaiveDate) -> u64 {
    u64::try_from(date.num_days_from_ce()).unwrap_or_default()
}
