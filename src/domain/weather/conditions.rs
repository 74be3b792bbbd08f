#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCategory {
    Clear,
    Cloudy,
    Rain,
    Snow,
    Fog,
    Thunder,
    Unknown,
}

#[must_use]
pub fn weather_code_to_category(code: u8) -> WeatherCategory {
    match code {
        0 | 1 => WeatherCategory::Clear,
        2 | 3 => WeatherCategory::Cloudy,
        45 | 48 => WeatherCategory::Fog,
        51..=57 | 61..=67 | 80..=82 => WeatherCategory::Rain,
        71..=77 | 85..=86 => WeatherCategory::Snow,
        95 | 96 | 99 => WeatherCategory::Thunder,
        _ => WeatherCategory::Unknown,
    }
}

#[must_use]
pub fn weather_label(code: u8) -> &'static str {
    weather_label_for_time(code, true)
}

#[must_use]
pub fn weather_label_for_time(code: u8, is_day: bool) -> &'static str {
    match (code, is_day) {
        (0, true) => "Clear sky",
        (0, false) => "Clear night",
        (1, true) => "Mainly clear",
        (1, false) => "Mainly clear night",
        _ => weather_label_lookup(code).unwrap_or("Unknown"),
    }
}

/// Three-letter glyph for plain-text output.
#[must_use]
pub fn weather_glyph(code: u8, is_day: bool) -> &'static str {
    match weather_code_to_category(code) {
        WeatherCategory::Clear if is_day => "SUN",
        WeatherCategory::Clear => "MON",
        WeatherCategory::Cloudy => "CLD",
        WeatherCategory::Rain => "RAN",
        WeatherCategory::Snow => "SNW",
        WeatherCategory::Fog => "FOG",
        WeatherCategory::Thunder => "THN",
        WeatherCategory::Unknown => "---",
    }
}

const WEATHER_LABELS: &[(u8, &str)] = &[
    (2, "Partly cloudy"),
    (3, "Overcast"),
    (45, "Fog"),
    (48, "Depositing rime fog"),
    (51, "Light drizzle"),
    (53, "Moderate drizzle"),
    (55, "Dense drizzle"),
    (56, "Light freezing drizzle"),
    (57, "Dense freezing drizzle"),
    (61, "Slight rain"),
    (63, "Moderate rain"),
    (65, "Heavy rain"),
    (66, "Light freezing rain"),
    (67, "Heavy freezing rain"),
    (71, "Slight snow"),
    (73, "Moderate snow"),
    (75, "Heavy snow"),
    (77, "Snow grains"),
    (80, "Slight rain showers"),
    (81, "Moderate rain showers"),
    (82, "Violent rain showers"),
    (85, "Slight snow showers"),
    (86, "Heavy snow showers"),
    (95, "Thunderstorm"),
    (96, "Thunderstorm with slight hail"),
    (99, "Thunderstorm with heavy hail"),
];

fn weather_label_lookup(code: u8) -> Option<&'static str> {
    WEATHER_LABELS
        .iter()
        .find_map(|(candidate, label)| (*candidate == code).then_some(*label))
}
