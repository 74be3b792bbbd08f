use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;

use crate::domain::weather::Location;

const GEOCODE_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const MIN_QUERY_LEN: usize = 2;
/// Matches requested from the API so ranking has candidates to reorder.
pub const CANDIDATE_POOL: usize = 5;

#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
}

impl GeocodeClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(GEOCODE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(8))
            .build()
            .context("building geocoding http client failed")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Ranked matches for `query`, best first, at most `limit` of them.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<Location>> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN || limit == 0 {
            return Ok(Vec::new());
        }

        let count = limit.max(CANDIDATE_POOL).to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("name", query),
                ("count", count.as_str()),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await
            .context("geocoding request failed")?
            .error_for_status()
            .context("geocoding request returned non-success status")?;

        let payload: GeocodeResponse = response
            .json()
            .await
            .context("failed to decode geocoding response")?;

        let results = payload.results.unwrap_or_default();
        tracing::debug!(query, matches = results.len(), "geocoding answered");

        let mut ranked = rank_locations(results, query);
        ranked.truncate(limit);
        Ok(ranked.into_iter().map(|scored| scored.location).collect())
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    results: Option<Vec<GeocodeResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    admin1: Option<String>,
    population: Option<u64>,
}

#[derive(Debug, Clone)]
struct ScoredLocation {
    location: Location,
    exact_name_match: bool,
    population: u64,
    api_order: usize,
}

fn rank_locations(results: Vec<GeocodeResult>, query: &str) -> Vec<ScoredLocation> {
    let normalized_query = normalize(query);

    let mut scored: Vec<ScoredLocation> = results
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| ScoredLocation {
            exact_name_match: normalize(&entry.name) == normalized_query,
            population: entry.population.unwrap_or_default(),
            api_order: idx,
            location: Location {
                name: entry.name,
                region: entry.admin1,
                country: entry.country,
                latitude: entry.latitude,
                longitude: entry.longitude,
            },
        })
        .collect();

    scored.sort_by(|a, b| {
        b.exact_name_match
            .cmp(&a.exact_name_match)
            .then_with(|| b.population.cmp(&a.population))
            .then_with(|| a.api_order.cmp(&b.api_order))
    });

    scored
}

fn normalize(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, admin1: Option<&str>, population: Option<u64>) -> GeocodeResult {
        GeocodeResult {
            name: name.to_string(),
            latitude: 0.0,
            longitude: 0.0,
            country: Some("United States".to_string()),
            admin1: admin1.map(str::to_string),
            population,
        }
    }

    #[test]
    fn ranking_prefers_exact_then_population() {
        let results = vec![
            result("Portlandville", None, Some(5_000_000)),
            result("Portland", Some("Maine"), Some(68_000)),
            result("Portland", Some("Oregon"), Some(650_000)),
        ];

        let ranked = rank_locations(results, "portland");
        let labels: Vec<String> = ranked.iter().map(|s| s.location.search_label()).collect();
        assert_eq!(
            labels,
            vec!["Portland, Oregon", "Portland, Maine", "Portlandville"]
        );
    }

    #[test]
    fn ties_keep_api_order() {
        let results = vec![
            result("Springfield", Some("Illinois"), None),
            result("Springfield", Some("Missouri"), None),
        ];
        let ranked = rank_locations(results, "Springfield");
        assert_eq!(ranked[0].location.region.as_deref(), Some("Illinois"));
        assert_eq!(ranked[1].api_order, 1);
    }

    #[test]
    fn normalize_folds_case_and_separators() {
        assert_eq!(normalize("  Saint-Louis_du  Ha "), "saint louis du ha");
    }

    #[tokio::test]
    async fn short_queries_skip_the_network() {
        let client = GeocodeClient::with_base_url("http://127.0.0.1:9").expect("client");
        assert!(client.search(" a ", 5).await.expect("empty").is_empty());
        assert!(client.search("Paris", 0).await.expect("empty").is_empty());
    }
}
