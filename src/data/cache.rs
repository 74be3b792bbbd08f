use std::{collections::HashMap, fmt, sync::Arc};

use chrono::{DateTime, Duration, Local};
use parking_lot::Mutex;

use crate::clock::Clock;

pub const DEFAULT_TTL_MINUTES: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheFamily {
    Current,
    Forecast,
    Historical,
}

impl CacheFamily {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Forecast => "forecast",
            Self::Historical => "historical",
        }
    }
}

impl fmt::Display for CacheFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `family|a:1|b:2`, with parameter names sorted so their order never matters.
#[must_use]
pub fn cache_key(family: CacheFamily, params: &[(&str, String)]) -> String {
    let mut sorted: Vec<&(&str, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0).then_with(|| a.1.cmp(&b.1)));

    let mut key = family.as_str().to_string();
    for (name, value) in sorted {
        key.push('|');
        key.push_str(name);
        key.push(':');
        key.push_str(value);
    }
    key
}

#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub data: T,
    pub fetched_at: DateTime<Local>,
    pub expires_at: DateTime<Local>,
}

/// In-memory response cache with lazy expiry.
///
/// Stale entries are dropped when a lookup finds them; nothing sweeps in the
/// background and there is no capacity bound. Reads hand out clones.
#[derive(Debug)]
pub struct ResponseCache<T> {
    entries: Mutex<HashMap<String, CacheEntry<T>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<T: Clone> ResponseCache<T> {
    #[must_use]
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    #[must_use]
    pub fn with_default_ttl(clock: Arc<dyn Clock>) -> Self {
        Self::new(Duration::minutes(DEFAULT_TTL_MINUTES), clock)
    }

    pub fn get(&self, family: CacheFamily, params: &[(&str, String)]) -> Option<T> {
        let key = cache_key(family, params);
        let now = self.clock.now();
        let mut entries = self.entries.lock();

        let entry = entries.get(&key)?;
        if now > entry.expires_at {
            tracing::debug!(%key, "cache entry expired");
            entries.remove(&key);
            return None;
        }
        tracing::debug!(%key, "cache hit");
        Some(entry.data.clone())
    }

    pub fn put(&self, family: CacheFamily, params: &[(&str, String)], value: T) {
        let key = cache_key(family, params);
        let fetched_at = self.clock.now();
        let entry = CacheEntry {
            data: value,
            fetched_at,
            expires_at: fetched_at + self.ttl,
        };
        self.entries.lock().insert(key, entry);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::manual_clock;

    fn coords(lat: &str, lon: &str) -> Vec<(&'static str, String)> {
        vec![("lat", lat.to_string()), ("lon", lon.to_string())]
    }

    #[test]
    fn key_is_independent_of_parameter_order() {
        let forward = cache_key(CacheFamily::Current, &coords("1", "2"));
        let reversed = cache_key(
            CacheFamily::Current,
            &[("lon", "2".to_string()), ("lat", "1".to_string())],
        );
        assert_eq!(forward, reversed);
        assert_eq!(forward, "current|lat:1|lon:2");
    }

    #[test]
    fn families_never_share_keys() {
        let params = coords("1", "2");
        assert_ne!(
            cache_key(CacheFamily::Current, &params),
            cache_key(CacheFamily::Forecast, &params)
        );
        assert_ne!(
            cache_key(CacheFamily::Forecast, &params),
            cache_key(CacheFamily::Historical, &params)
        );
    }

    #[test]
    fn get_after_put_returns_stored_value() {
        let clock = manual_clock("2024-01-15T10:00");
        let cache = ResponseCache::with_default_ttl(clock);
        cache.put(CacheFamily::Forecast, &coords("1", "2"), vec![1, 2, 3]);

        assert_eq!(
            cache.get(CacheFamily::Forecast, &coords("1", "2")),
            Some(vec![1, 2, 3])
        );
        assert_eq!(cache.get(CacheFamily::Current, &coords("1", "2")), None);
    }

    #[test]
    fn entry_is_valid_up_to_and_including_expiry() {
        let clock = manual_clock("2024-01-15T10:00");
        let cache = ResponseCache::with_default_ttl(clock.clone());
        cache.put(CacheFamily::Current, &coords("1", "2"), "sunny".to_string());

        clock.advance(Duration::minutes(DEFAULT_TTL_MINUTES));
        assert_eq!(
            cache.get(CacheFamily::Current, &coords("1", "2")).as_deref(),
            Some("sunny")
        );
    }

    #[test]
    fn expired_entry_misses_and_is_removed() {
        let clock = manual_clock("2024-01-15T10:00");
        let cache = ResponseCache::with_default_ttl(clock.clone());
        cache.put(CacheFamily::Historical, &coords("1", "2"), 7_u32);
        assert_eq!(cache.len(), 1);

        clock.advance(Duration::minutes(DEFAULT_TTL_MINUTES) + Duration::seconds(1));
        assert_eq!(cache.get(CacheFamily::Historical, &coords("1", "2")), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn put_replaces_and_refreshes_expiry() {
        let clock = manual_clock("2024-01-15T10:00");
        let cache = ResponseCache::with_default_ttl(clock.clone());
        cache.put(CacheFamily::Current, &coords("1", "2"), 1_u8);
        clock.advance(Duration::minutes(20));
        cache.put(CacheFamily::Current, &coords("1", "2"), 2_u8);
        clock.advance(Duration::minutes(20));

        assert_eq!(cache.get(CacheFamily::Current, &coords("1", "2")), Some(2));
        assert_eq!(cache.len(), 1);
    }
}
