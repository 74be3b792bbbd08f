use chrono::NaiveDate;

use super::*;

fn date(value: &str) -> NaiveDate {
    parse_date(value).expect("valid date fixture")
}

#[test]
fn freezing_drizzle_codes_have_labels() {
    assert_eq!(weather_label(56), "Light freezing drizzle");
    assert_eq!(weather_label(57), "Dense freezing drizzle");
}

#[test]
fn clear_conditions_respect_day_night_for_labels_and_glyphs() {
    assert_eq!(weather_label_for_time(0, true), "Clear sky");
    assert_eq!(weather_label_for_time(0, false), "Clear night");
    assert_eq!(weather_glyph(0, true), "SUN");
    assert_eq!(weather_glyph(0, false), "MON");
    assert_eq!(weather_glyph(42, true), "---");
}

#[test]
fn format_temperature_rounds_half_away_from_zero() {
    assert_eq!(format_temperature(22.5, Units::Celsius), "23°C");
    assert_eq!(format_temperature(-5.7, Units::Celsius), "-6°C");
    assert_eq!(format_temperature(-2.5, Units::Celsius), "-3°C");
    assert_eq!(format_temperature(0.4, Units::Celsius), "0°C");
}

#[test]
fn fahrenheit_conversion_rounding() {
    assert_eq!(round_temp(convert_temp(0.0, Units::Fahrenheit)), 32);
    assert_eq!(round_temp(convert_temp(20.0, Units::Fahrenheit)), 68);
    assert_eq!(format_temperature(20.0, Units::Fahrenheit), "68°F");
}

#[test]
fn wind_speed_is_shown_in_metres_per_second() {
    assert_eq!(format_wind_speed(36.0), "10.0 m/s");
    assert_eq!(format_wind_speed(0.0), "0.0 m/s");
}

#[test]
fn parse_datetime_accepts_minutes_and_seconds() {
    assert!(parse_datetime("2024-01-15T10:00").is_some());
    assert!(parse_datetime("2024-01-15T10:00:00").is_some());
    assert!(parse_datetime("2024-01-15").is_none());
}

#[test]
fn truncate_to_hour_drops_minutes_and_seconds() {
    let time = parse_datetime("2024-01-15T10:47:31").expect("valid time");
    assert_eq!(
        truncate_to_hour(time),
        parse_datetime("2024-01-15T10:00").expect("valid time")
    );
}

#[test]
fn relative_day_labels() {
    let today = date("2024-01-15");
    assert_eq!(relative_day_label(today, today), "Today");
    assert_eq!(relative_day_label(date("2024-01-16"), today), "Tomorrow");
    assert_eq!(relative_day_label(date("2024-01-14"), today), "Yesterday");
    assert_eq!(relative_day_label(date("2024-01-18"), today), "Thursday");
}

#[test]
fn lookback_range_ends_yesterday() {
    let (start, end) = lookback_range(date("2024-03-01"), 3);
    assert_eq!(start, date("2024-02-27"));
    assert_eq!(end, date("2024-02-29"));
}

#[test]
fn day_name_and_number_follow_calendar() {
    let day = date("2024-01-15");
    assert_eq!(day_name(day), "Mon");
    assert_eq!(day_number(day), 15);
}

#[test]
fn location_labels() {
    let location = Location {
        name: "Portland".to_string(),
        region: Some("Oregon".to_string()),
        country: Some("United States".to_string()),
        latitude: 45.52,
        longitude: -122.68,
    };
    assert_eq!(location.display_name(), "Portland, Oregon, United States");
    assert_eq!(location.search_label(), "Portland, Oregon");

    let bare = Location::from_coords(1.5, -2.25);
    assert_eq!(bare.display_name(), "1.5000, -2.2500");
    assert_eq!(bare.search_label(), bare.name);
}

#[test]
fn daily_series_lookup_by_date() {
    let series = DailySeries::new(vec![DailyEntry {
        date: date("2024-01-15"),
        weather_code: Some(3),
        temperature_max_c: Some(8.0),
        temperature_min_c: Some(1.0),
        precipitation_sum_mm: None,
        wind_speed_max: None,
        wind_direction_dominant: None,
    }]);
    assert_eq!(series.len(), 1);
    assert!(series.get(date("2024-01-15")).is_some());
    assert!(series.get(date("2024-01-16")).is_none());
}

#[test]
fn wind_direction_wraps_both_ends_of_the_compass_to_north() {
    assert_eq!(wind_direction_label(0.0), "N");
    assert_eq!(wind_direction_label(11.2), "N");
    assert_eq!(wind_direction_label(348.75), "N");
    assert_eq!(wind_direction_label(359.9), "N");
    assert_eq!(wind_direction_label(360.0), "N");
    assert_eq!(wind_direction_label(348.7), "NNW");
    assert_eq!(wind_direction_label(11.25), "NNE");
}

#[test]
fn wind_direction_covers_the_cardinal_points() {
    assert_eq!(wind_direction_label(90.0), "E");
    assert_eq!(wind_direction_label(180.0), "S");
    assert_eq!(wind_direction_label(210.0), "SSW");
    assert_eq!(wind_direction_label(270.0), "W");
    assert_eq!(wind_direction_label(-22.5), "NNW");
}

#[test]
fn wind_strength_thresholds() {
    assert_eq!(wind_strength_label(0.0), "Light breeze");
    assert_eq!(wind_strength_label(5.0), "Gentle breeze");
    assert_eq!(wind_strength_label(24.9), "Moderate breeze");
    assert_eq!(wind_strength_label(25.0), "Fresh breeze");
    assert_eq!(wind_strength_label(80.0), "Strong breeze");
}
