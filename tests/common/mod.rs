#![allow(clippy::cast_precision_loss)]
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde_json::{Value, json};
use skyboard::{
    app::{dashboard::Dashboard, settings::Settings},
    clock::ManualClock,
    data::{forecast::WeatherClient, geocode::GeocodeClient},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate, Times,
    matchers::{method, path, query_param, query_param_is_missing},
};

pub const TODAY: &str = "2024-01-15";
pub const NOW: &str = "2024-01-15T10:00";
pub const HISTORY_START: &str = "2024-01-12";
pub const HISTORY_END: &str = "2024-01-14";

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid date fixture")
}

pub fn time(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").expect("valid time fixture")
}

pub fn fixed_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::at_local(time(NOW)))
}

pub fn weather_client(server: &MockServer, clock: Arc<ManualClock>) -> WeatherClient {
    WeatherClient::with_base_url(format!("{}/v1/forecast", server.uri()), clock)
        .expect("weather client")
}

pub fn geocode_client(server: &MockServer) -> GeocodeClient {
    GeocodeClient::with_base_url(format!("{}/v1/search", server.uri())).expect("geocode client")
}

pub fn dashboard(server: &MockServer, clock: Arc<ManualClock>) -> Dashboard {
    Dashboard::new(
        geocode_client(server),
        weather_client(server, clock.clone()),
        clock,
        Settings::default(),
    )
}

pub fn current_payload(weather_code: u8) -> Value {
    json!({
        "latitude": 45.52,
        "longitude": -122.68,
        "current": {
            "time": NOW,
            "temperature_2m": 7.4,
            "relative_humidity_2m": 81.0,
            "apparent_temperature": 5.1,
            "is_day": 1,
            "precipitation": 0.2,
            "weather_code": weather_code,
            "cloud_cover": 90.0,
            "pressure_msl": 1011.3,
            "wind_speed_10m": 14.4,
            "wind_direction_10m": 200.0,
            "wind_gusts_10m": 25.0
        }
    })
}

pub fn daily_block(start: &str, days: i64) -> Value {
    let start = date(start);
    let dates: Vec<String> = (0..days)
        .map(|idx| (start + Duration::days(idx)).to_string())
        .collect();
    let max: Vec<f32> = (0..days).map(|idx| 9.0 + idx as f32).collect();
    let min: Vec<f32> = (0..days).map(|idx| 2.0 + idx as f32).collect();
    json!({
        "time": dates,
        "weather_code": vec![61; dates.len()],
        "temperature_2m_max": max,
        "temperature_2m_min": min,
        "precipitation_sum": vec![1.5; dates.len()],
        "wind_speed_10m_max": vec![18.0; dates.len()],
        "wind_direction_10m_dominant": vec![210.0; dates.len()]
    })
}

pub fn hourly_block(start: &str, hours: i64, temperature: impl Fn(i64) -> f32) -> Value {
    let start = time(start);
    let times: Vec<String> = (0..hours)
        .map(|idx| {
            (start + Duration::hours(idx))
                .format("%Y-%m-%dT%H:%M")
                .to_string()
        })
        .collect();
    let temps: Vec<f32> = (0..hours).map(&temperature).collect();
    json!({
        "time": times,
        "temperature_2m": temps,
        "weather_code": vec![3; times.len()],
        "precipitation": vec![0.0; times.len()],
        "relative_humidity_2m": vec![80.0; times.len()],
        "wind_speed_10m": vec![12.0; times.len()],
        "apparent_temperature": vec![4.0; times.len()],
        "is_day": vec![1; times.len()]
    })
}

pub fn forecast_payload() -> Value {
    json!({
        "latitude": 45.52,
        "longitude": -122.68,
        "daily": daily_block(TODAY, 8),
        "hourly": hourly_block("2024-01-15T00:00", 8 * 24, |idx| 3.0 + (idx % 24) as f32 * 0.5)
    })
}

pub fn historical_payload() -> Value {
    json!({
        "latitude": 45.52,
        "longitude": -122.68,
        "daily": daily_block(HISTORY_START, 3)
    })
}

pub fn geocode_payload() -> Value {
    json!({
        "results": [
            {
                "name": "Portland",
                "latitude": 43.661,
                "longitude": -70.255,
                "country": "United States",
                "admin1": "Maine",
                "population": 68_000
            },
            {
                "name": "Portland",
                "latitude": 45.523,
                "longitude": -122.676,
                "country": "United States",
                "admin1": "Oregon",
                "population": 650_000
            }
        ]
    })
}

pub async fn mount_current(server: &MockServer, body: Value, expected: impl Into<Times>) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param_is_missing("daily"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected)
        .mount(server)
        .await;
}

pub async fn mount_forecast(server: &MockServer, body: Value, expected: impl Into<Times>) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("forecast_days", "8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected)
        .mount(server)
        .await;
}

pub async fn mount_historical(server: &MockServer, response: ResponseTemplate, expected: impl Into<Times>) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("start_date", HISTORY_START))
        .and(query_param("end_date", HISTORY_END))
        .respond_with(response)
        .expect(expected)
        .mount(server)
        .await;
}

pub async fn mount_geocode(server: &MockServer, name: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", name))
        .and(query_param("count", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// All three weather endpoints answering with the standard fixtures.
pub async fn mount_weather(server: &MockServer, expected: u64) {
    mount_current(server, current_payload(95), expected).await;
    mount_forecast(server, forecast_payload(), expected).await;
    mount_historical(
        server,
        ResponseTemplate::new(200).set_body_json(historical_payload()),
        expected,
    )
    .await;
}
