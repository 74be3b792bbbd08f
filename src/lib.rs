pub mod app;
pub mod cli;
pub mod clock;
pub mod data;
pub mod domain;
pub mod render;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use anyhow::{Context, Result};
use app::{
    dashboard::Dashboard,
    settings::{load_settings, save_settings, settings_path},
    suggest::{SUGGESTION_LIMIT, SuggestionDebouncer},
};
use cli::Cli;
use clock::{Clock, SystemClock};
use data::{forecast::WeatherClient, geocode::GeocodeClient};
use domain::weather::Location;

pub async fn run(cli: Cli) -> Result<()> {
    cli.validate()?;

    let path = settings_path();
    let settings = load_settings(&cli, path.as_deref());

    if cli.recent {
        print!("{}", render::render_recent(&settings));
        return Ok(());
    }

    let geocoder = match &cli.geocode_url {
        Some(url) => GeocodeClient::with_base_url(url.as_str())?,
        None => GeocodeClient::new()?,
    };

    if cli.suggest {
        let query = cli.query().unwrap_or_default();
        let debouncer = SuggestionDebouncer::new();
        let matches = debouncer
            .lookup(|| geocoder.search(query, SUGGESTION_LIMIT))
            .await
            .transpose()?
            .unwrap_or_default();
        print!("{}", render::render_suggestions(&matches));
        return Ok(());
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let weather = match &cli.forecast_url {
        Some(url) => WeatherClient::with_base_url(url.as_str(), clock.clone())?,
        None => WeatherClient::new(clock.clone())?,
    };

    let mut dashboard = Dashboard::new(geocoder, weather, clock, settings);
    let loaded = if let (Some(lat), Some(lon)) = (cli.lat, cli.lon) {
        dashboard
            .load_location(Location::from_coords(lat, lon))
            .await
    } else {
        let query = cli
            .query()
            .or_else(|| dashboard.settings().most_recent())
            .map(str::to_string)
            .context("no location given: pass a place name or --lat/--lon")?;
        dashboard.resolve_and_load(&query).await
    };
    let mut view = loaded?;

    if let Some(date) = cli.date {
        dashboard.select_date(date);
        view = dashboard
            .view()
            .context("dashboard has no location after loading")?;
    }

    let settings = dashboard.settings();
    if cli.json {
        println!("{}", render::render_json(&view, settings)?);
    } else {
        print!("{}", render::render_text(&view, settings.units));
    }

    if !cli.no_save
        && let Some(path) = &path
    {
        save_settings(path, settings)?;
    }

    Ok(())
}
