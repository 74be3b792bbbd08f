use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

use super::Units;

#[must_use]
pub fn convert_temp(celsius: f32, units: Units) -> f32 {
    match units {
        Units::Celsius => celsius,
        Units::Fahrenheit => celsius * 1.8 + 32.0,
    }
}

#[must_use]
pub fn convert_wind_speed(kmh: f32) -> f32 {
    kmh / 3.6
}

/// Rounds half away from zero, so `22.5` becomes `23` and `-5.5` becomes `-6`.
#[must_use]
pub fn round_temp(value: f32) -> i32 {
    value.round() as i32
}

#[must_use]
pub fn format_temperature(celsius: f32, units: Units) -> String {
    let suffix = match units {
        Units::Celsius => "°C",
        Units::Fahrenheit => "°F",
    };
    format!("{}{suffix}", round_temp(convert_temp(celsius, units)))
}

#[must_use]
pub fn format_wind_speed(kmh: f32) -> String {
    format!("{:.1} m/s", convert_wind_speed(kmh))
}

#[must_use]
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[must_use]
pub fn truncate_to_hour(time: NaiveDateTime) -> NaiveDateTime {
    time.date()
        .and_hms_opt(time.hour(), 0, 0)
        .unwrap_or(time)
}

#[must_use]
pub fn day_name(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

#[must_use]
pub fn day_number(date: NaiveDate) -> u32 {
    date.day()
}

#[must_use]
pub fn relative_day_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => date.format("%A").to_string(),
    }
}

/// Inclusive `(start, end)` of the `days` calendar days before `today`.
#[must_use]
pub fn lookback_range(today: NaiveDate, days: u32) -> (NaiveDate, NaiveDate) {
    let days = i64::from(days.max(1));
    (today - Duration::days(days), today - Duration::days(1))
}

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// 16-point compass label for a bearing in degrees. Any bearing is accepted
/// and wrapped into `0..360`.
#[must_use]
pub fn wind_direction_label(degrees: f32) -> &'static str {
    let sector = (degrees.rem_euclid(360.0) / 22.5).round() as usize;
    COMPASS_POINTS[sector % COMPASS_POINTS.len()]
}

#[must_use]
pub fn wind_strength_label(kmh: f32) -> &'static str {
    match kmh {
        s if s < 5.0 => "Light breeze",
        s if s < 15.0 => "Gentle breeze",
        s if s < 25.0 => "Moderate breeze",
        s if s < 35.0 => "Fresh breeze",
        _ => "Strong breeze",
    }
}
