use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::{
    app::{
        settings::Settings,
        state::{Action, WeatherState, reduce},
    },
    clock::Clock,
    data::{forecast::WeatherClient, geocode::GeocodeClient},
    domain::{
        bucketize::{DayRow, DaySummary, HourRow, build_day_rows, build_hour_rows, day_summary},
        weather::{CurrentConditions, Location, lookback_range},
    },
};

/// Days requested from the forecast endpoint, today included.
pub const FORECAST_DAYS: u8 = 8;
/// Past days shown before today.
pub const HISTORY_DAYS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("no location found for \"{0}\"")]
    NotFound(String),
    #[error("could not load weather: {0}")]
    Upstream(String),
}

/// Everything a renderer needs for one screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub location: Location,
    pub current: Option<CurrentConditions>,
    pub today: NaiveDate,
    pub selected_date: NaiveDate,
    pub day_rows: Vec<DayRow>,
    pub hour_rows: Vec<HourRow>,
    pub summary: Option<DaySummary>,
}

#[derive(Debug)]
pub struct Dashboard {
    geocoder: GeocodeClient,
    weather: WeatherClient,
    clock: Arc<dyn Clock>,
    state: WeatherState,
    settings: Settings,
}

impl Dashboard {
    #[must_use]
    pub fn new(
        geocoder: GeocodeClient,
        weather: WeatherClient,
        clock: Arc<dyn Clock>,
        settings: Settings,
    ) -> Self {
        Self {
            geocoder,
            weather,
            clock,
            state: WeatherState::default(),
            settings,
        }
    }

    #[must_use]
    pub fn state(&self) -> &WeatherState {
        &self.state
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn geocoder(&self) -> &GeocodeClient {
        &self.geocoder
    }

    /// Geocodes `query`, takes the best match and loads it. A successful load
    /// is recorded in the recent searches.
    pub async fn resolve_and_load(&mut self, query: &str) -> Result<DashboardView, LoadError> {
        self.dispatch(Action::SetLoading(true));

        let matches = match self.geocoder.search(query, 1).await {
            Ok(matches) => matches,
            Err(err) => return Err(self.fail(LoadError::Upstream(format!("{err:#}")))),
        };
        let Some(location) = matches.into_iter().next() else {
            return Err(self.fail(LoadError::NotFound(query.trim().to_string())));
        };

        let label = location.search_label();
        let view = self.load_location(location).await?;
        self.settings.push_recent(&label);
        Ok(view)
    }

    /// Fetches current, forecast and recent history for `location` concurrently.
    /// Any failed fetch fails the whole load.
    pub async fn load_location(&mut self, location: Location) -> Result<DashboardView, LoadError> {
        self.dispatch(Action::SetLoading(true));
        self.dispatch(Action::ClearWeather);
        self.dispatch(Action::SetLocation(location.clone()));

        let today = self.clock.today();
        let (start, end) = lookback_range(today, HISTORY_DAYS);
        let (lat, lon) = (location.latitude, location.longitude);
        tracing::info!(location = %location.display_name(), %today, "loading weather");

        let fetched = tokio::try_join!(
            self.weather.current(lat, lon),
            self.weather.forecast(lat, lon, FORECAST_DAYS),
            self.weather.historical(lat, lon, start, end),
        );
        let (current, forecast, history) = match fetched {
            Ok(parts) => parts,
            Err(err) => return Err(self.fail(LoadError::Upstream(format!("{err:#}")))),
        };

        self.dispatch(Action::SetCurrentWeather(current));
        self.dispatch(Action::SetForecast(forecast));
        self.dispatch(Action::SetHistory(history));
        self.dispatch(Action::SetSelectedDate(today));
        self.dispatch(Action::SetLoading(false));

        Ok(self.compose(location, today))
    }

    /// Re-buckets hour rows for `date` from data already loaded.
    pub fn select_date(&mut self, date: NaiveDate) -> Vec<HourRow> {
        self.dispatch(Action::SetSelectedDate(date));
        let forecast = self.state.forecast.as_ref();
        build_hour_rows(
            forecast.and_then(|f| f.hourly.as_ref()),
            forecast.and_then(|f| f.daily.as_ref()),
            date,
            self.clock.local_now(),
        )
    }

    #[must_use]
    pub fn view(&self) -> Option<DashboardView> {
        let location = self.state.location.clone()?;
        let today = self.clock.today();
        Some(self.compose(location, today))
    }

    fn compose(&self, location: Location, today: NaiveDate) -> DashboardView {
        let selected_date = self.state.selected_date.unwrap_or(today);
        let daily = self.state.forecast.as_ref().and_then(|f| f.daily.as_ref());
        let hourly = self.state.forecast.as_ref().and_then(|f| f.hourly.as_ref());
        let history = self.state.history.as_ref();
        let current = self.state.current.as_ref();

        DashboardView {
            location,
            current: current.cloned(),
            today,
            selected_date,
            day_rows: build_day_rows(daily, history, current, today),
            hour_rows: build_hour_rows(hourly, daily, selected_date, self.clock.local_now()),
            summary: day_summary(selected_date, today, daily, history, current),
        }
    }

    fn dispatch(&mut self, action: Action) {
        self.state = reduce(std::mem::take(&mut self.state), action);
    }

    fn fail(&mut self, err: LoadError) -> LoadError {
        tracing::warn!(%err, "dashboard load failed");
        self.dispatch(Action::SetError(err.to_string()));
        err
    }
}
