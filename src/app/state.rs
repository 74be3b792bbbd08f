use chrono::NaiveDate;

use crate::domain::weather::{CurrentConditions, DailySeries, Forecast, Location};

/// Everything the dashboard knows about the active location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherState {
    pub location: Option<Location>,
    pub current: Option<CurrentConditions>,
    pub forecast: Option<Forecast>,
    pub history: Option<DailySeries>,
    pub selected_date: Option<NaiveDate>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetCurrentWeather(Option<CurrentConditions>),
    SetForecast(Forecast),
    SetHistory(Option<DailySeries>),
    SetLocation(Location),
    SetSelectedDate(NaiveDate),
    SetLoading(bool),
    SetError(String),
    ClearError,
    ClearWeather,
}

/// Applies one action. Payload actions clear any error; an error ends loading.
#[must_use]
pub fn reduce(state: WeatherState, action: Action) -> WeatherState {
    match action {
        Action::SetCurrentWeather(current) => WeatherState {
            current,
            error: None,
            ..state
        },
        Action::SetForecast(forecast) => WeatherState {
            forecast: Some(forecast),
            error: None,
            ..state
        },
        Action::SetHistory(history) => WeatherState {
            history,
            error: None,
            ..state
        },
        Action::SetLocation(location) => WeatherState {
            location: Some(location),
            error: None,
            ..state
        },
        Action::SetSelectedDate(date) => WeatherState {
            selected_date: Some(date),
            ..state
        },
        Action::SetLoading(loading) => WeatherState { loading, ..state },
        Action::SetError(message) => WeatherState {
            error: Some(message),
            loading: false,
            ..state
        },
        Action::ClearError => WeatherState {
            error: None,
            ..state
        },
        Action::ClearWeather => WeatherState {
            current: None,
            forecast: None,
            history: None,
            ..state
        },
    }
}
