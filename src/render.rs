use std::fmt::Write as _;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::{
    app::{
        dashboard::DashboardView,
        settings::{Settings, Theme},
    },
    domain::{
        bucketize::{DayRow, HourRow},
        weather::{
            Location, Units, format_temperature, format_wind_speed, relative_day_label,
            weather_glyph, weather_label, weather_label_for_time, wind_direction_label,
            wind_strength_label,
        },
    },
};

#[derive(Debug, Serialize)]
struct JsonSnapshot<'a> {
    theme: Theme,
    units: Units,
    #[serde(flatten)]
    view: &'a DashboardView,
}

pub fn render_json(view: &DashboardView, settings: &Settings) -> Result<String> {
    let snapshot = JsonSnapshot {
        theme: settings.theme,
        units: settings.units,
        view,
    };
    serde_json::to_string_pretty(&snapshot).context("serializing dashboard failed")
}

#[must_use]
pub fn render_text(view: &DashboardView, units: Units) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.location.display_name());

    if let Some(current) = &view.current {
        let _ = writeln!(
            out,
            "Now  {}  {}  feels {}  humidity {}  wind {}  pressure {}",
            format_temperature(current.temperature_2m_c, units),
            weather_label_for_time(current.weather_code, current.is_day),
            current
                .apparent_temperature_c
                .map_or_else(|| "--".to_string(), |t| format_temperature(t, units)),
            current
                .relative_humidity_2m
                .map_or_else(|| "--".to_string(), |h| format!("{h:.0}%")),
            wind_text(current.wind_speed_10m, current.wind_direction_10m),
            current
                .pressure_msl_hpa
                .map_or_else(|| "--".to_string(), |p| format!("{p:.0} hPa")),
        );
    }

    out.push('\n');
    for row in &view.day_rows {
        let _ = writeln!(out, "{}", day_line(row, view, units));
    }

    out.push('\n');
    let _ = writeln!(
        out,
        "Hourly for {}",
        relative_day_label(view.selected_date, view.today)
    );
    if view.hour_rows.is_empty() {
        out.push_str("  no hourly data\n");
    }
    for row in &view.hour_rows {
        let _ = writeln!(out, "{}", hour_line(row, units));
    }
    if view.hour_rows.iter().any(|row| row.temperature_synthesized) {
        out.push_str("  temperatures estimated from the daily range\n");
    }

    if let Some(summary) = &view.summary {
        out.push('\n');
        let _ = writeln!(
            out,
            "{}: {}  {}  humidity {}  wind {}  pressure {}",
            relative_day_label(summary.date, view.today),
            summary
                .temperature_c
                .map_or_else(|| "--".to_string(), |t| format_temperature(t, units)),
            summary.weather_code.map_or("Unknown", weather_label),
            summary
                .humidity
                .map_or_else(|| "--".to_string(), |h| format!("{h:.0}%")),
            wind_text(summary.wind_speed, summary.wind_direction),
            summary
                .pressure_hpa
                .map_or_else(|| "--".to_string(), |p| format!("{p:.0} hPa")),
        );
    }

    out
}

fn wind_text(speed_kmh: Option<f32>, direction: Option<f32>) -> String {
    let Some(speed) = speed_kmh else {
        return "--".to_string();
    };
    match direction {
        Some(degrees) => format!(
            "{} {} ({})",
            format_wind_speed(speed),
            wind_direction_label(degrees),
            wind_strength_label(speed)
        ),
        None => format!("{} ({})", format_wind_speed(speed), wind_strength_label(speed)),
    }
}

fn day_line(row: &DayRow, view: &DashboardView, units: Units) -> String {
    let marker = if row.date == view.selected_date { '>' } else { ' ' };
    let tag = if row.is_today {
        "today"
    } else if row.is_historical {
        "past"
    } else {
        ""
    };
    format!(
        "{marker} {} {:>2}  {:<5} {}  {:>6} / {:<6} {:>5} mm  {}",
        row.day_name,
        row.day_number,
        tag,
        row.weather_code
            .map_or("---", |code| weather_glyph(code, true)),
        row.max_temp_c
            .map_or_else(|| "--".to_string(), |t| format_temperature(t, units)),
        row.min_temp_c
            .map_or_else(|| "--".to_string(), |t| format_temperature(t, units)),
        row.precipitation_mm
            .map_or_else(|| "--".to_string(), |p| format!("{p:.1}")),
        row.weather_code.map_or("Unknown", weather_label),
    )
}

fn hour_line(row: &HourRow, units: Units) -> String {
    format!(
        "  {:02}:00 {}  {:>6}  {:>4}  {:>8}",
        row.hour,
        row.weather_code
            .map_or("---", |code| weather_glyph(code, row.is_day)),
        row.temperature_c
            .map_or_else(|| "--".to_string(), |t| format_temperature(t, units)),
        row.humidity
            .map_or_else(|| "--".to_string(), |h| format!("{h:.0}%")),
        row.wind_speed
            .map_or_else(|| "--".to_string(), format_wind_speed),
    )
}

#[must_use]
pub fn render_suggestions(locations: &[Location]) -> String {
    if locations.is_empty() {
        return "no matches\n".to_string();
    }
    locations
        .iter()
        .map(|location| {
            format!(
                "{}  ({:.4}, {:.4})\n",
                location.display_name(),
                location.latitude,
                location.longitude
            )
        })
        .collect()
}

#[must_use]
pub fn render_recent(settings: &Settings) -> String {
    if settings.recent_searches.is_empty() {
        return "no recent searches\n".to_string();
    }
    settings
        .recent_searches
        .iter()
        .enumerate()
        .map(|(idx, label)| format!("{}. {label}\n", idx + 1))
        .collect()
}
