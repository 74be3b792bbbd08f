#![allow(clippy::cast_precision_loss)]

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::{
    clock::ManualClock,
    domain::weather::{
        CurrentConditions, DailyEntry, DailySeries, HourlyEntry, HourlySeries, Location,
        parse_datetime,
    },
};

pub(crate) fn portland_location() -> Location {
    Location {
        name: "Portland".to_string(),
        region: Some("Oregon".to_string()),
        country: Some("United States".to_string()),
        latitude: 45.5152,
        longitude: -122.6784,
    }
}

pub(crate) fn sample_current() -> CurrentConditions {
    CurrentConditions {
        time: parse_datetime("2024-01-15T10:00"),
        temperature_2m_c: 7.0,
        weather_code: 3,
        is_day: true,
        relative_humidity_2m: Some(72.0),
        apparent_temperature_c: Some(5.0),
        precipitation_mm: Some(0.0),
        cloud_cover: Some(40.0),
        pressure_msl_hpa: Some(1008.0),
        wind_speed_10m: Some(10.0),
        wind_direction_10m: Some(180.0),
        wind_gusts_10m: Some(15.0),
    }
}

pub(crate) fn daily_entry(date: NaiveDate, offset: f32) -> DailyEntry {
    DailyEntry {
        date,
        weather_code: Some(if offset as i32 % 2 == 0 { 1 } else { 61 }),
        temperature_max_c: Some(9.0 + offset),
        temperature_min_c: Some(2.0 + offset),
        precipitation_sum_mm: Some(offset * 0.5),
        wind_speed_max: Some(12.0 + offset),
        wind_direction_dominant: Some(200.0),
    }
}

pub(crate) fn daily_series(start: NaiveDate, days: i64) -> DailySeries {
    DailySeries::new(
        (0..days)
            .map(|idx| daily_entry(start + Duration::days(idx), idx as f32))
            .collect(),
    )
}

pub(crate) fn hourly_series(
    start: NaiveDateTime,
    hours: usize,
    temperature: impl Fn(usize) -> f32,
) -> HourlySeries {
    HourlySeries::new(
        (0..hours)
            .map(|idx| HourlyEntry {
                time: start + Duration::hours(idx as i64),
                temperature_2m_c: Some(temperature(idx)),
                weather_code: Some(3),
                precipitation_mm: Some(0.0),
                relative_humidity_2m: Some(70.0),
                wind_speed_10m: Some(11.0),
                apparent_temperature_c: Some(temperature(idx) - 1.5),
                is_day: Some((7..=17).contains(&(start + Duration::hours(idx as i64)).hour())),
            })
            .collect(),
    )
}

pub(crate) fn manual_clock(value: &str) -> Arc<ManualClock> {
    let time = parse_datetime(value).expect("valid clock fixture");
    Arc::new(ManualClock::at_local(time))
}
