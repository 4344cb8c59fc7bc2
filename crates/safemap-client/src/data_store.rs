//! HTTP loader with a per-dataset, time-boxed cache.
//!
//! A load first consults the dataset's cache slot; a fresh, valid entry is
//! returned without touching the network. Otherwise the endpoint is fetched,
//! validated with the record schema, and the raw payload is written back to
//! the slot together with the current time.

use std::time::Duration;

use reqwest::{Client, Url};
use safemap_core::parse_collection;
use serde_json::Value;

use crate::cache::CacheEntry;
use crate::clock::{Clock, SystemClock};
use crate::dataset::{Dataset, ALL_CACHE_KEYS};
use crate::error::FetchError;
use crate::store::{FileStore, KvStore};

/// Default cache freshness window (30 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_millis(safemap_core::config::DEFAULT_CACHE_TTL_MS);

/// Loads datasets from one origin and caches them in an injected [`KvStore`].
pub struct DataStore<S = FileStore, C = SystemClock> {
    client: Client,
    base_url: Url,
    store: S,
    clock: C,
    ttl: Duration,
}

impl<S: KvStore, C: Clock> DataStore<S, C> {
    /// Builds a store rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] if the `reqwest::Client` cannot be
    /// constructed, or [`FetchError::InvalidUrl`] if `base_url` does not parse.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        store: S,
        clock: C,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Keep exactly one trailing slash so `join` appends instead of
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| FetchError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            store,
            clock,
            ttl: DEFAULT_TTL,
        })
    }

    /// Overrides the cache freshness window.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Resolves the endpoint of dataset `D` against the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] if the path cannot be joined.
    pub fn endpoint<D: Dataset>(&self) -> Result<Url, FetchError> {
        self.base_url
            .join(D::PATH)
            .map_err(|e| FetchError::InvalidUrl {
                url: format!("{}{}", self.base_url, D::PATH),
                reason: e.to_string(),
            })
    }

    /// Loads dataset `D` from its default endpoint with the configured TTL.
    ///
    /// # Errors
    ///
    /// See [`DataStore::load_from`].
    pub async fn load<D: Dataset>(&self) -> Result<Vec<D::Record>, FetchError> {
        let endpoint = self.endpoint::<D>()?;
        self.load_from::<D>(&endpoint, self.ttl).await
    }

    /// Loads dataset `D` from `endpoint`, serving a cached copy younger than `ttl`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Transport`] on network failure.
    /// - [`FetchError::Status`] on a non-2xx response.
    /// - [`FetchError::Decode`] if the body is not JSON.
    /// - [`FetchError::Validation`] if the body is not a valid collection of
    ///   `D::Record`.
    pub async fn load_from<D: Dataset>(
        &self,
        endpoint: &Url,
        ttl: Duration,
    ) -> Result<Vec<D::Record>, FetchError> {
        if let Some(records) = self.read_cache::<D>(ttl) {
            tracing::debug!(dataset = D::NAME, count = records.len(), "serving from cache");
            return Ok(records);
        }

        let payload = self.fetch_json(endpoint).await?;
        let records = parse_collection::<D::Record>(&payload).inspect_err(|e| {
            tracing::warn!(dataset = D::NAME, url = %endpoint, error = %e, "payload failed validation");
        })?;

        self.write_cache::<D>(payload);
        tracing::debug!(dataset = D::NAME, count = records.len(), url = %endpoint, "loaded from network");
        Ok(records)
    }

    /// Drops the cache slot of dataset `D`.
    pub fn invalidate<D: Dataset>(&self) {
        self.remove_key(D::CACHE_KEY);
    }

    /// Drops every dataset's cache slot.
    pub fn invalidate_all(&self) {
        for key in ALL_CACHE_KEYS {
            self.remove_key(key);
        }
    }

    fn remove_key(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            tracing::warn!(key, error = %e, "failed to clear cache slot");
        }
    }

    /// Returns the cached records when the slot holds a fresh, valid entry.
    ///
    /// Stale, unreadable or invalid entries are removed so the next load
    /// starts clean.
    fn read_cache<D: Dataset>(&self, ttl: Duration) -> Option<Vec<D::Record>> {
        let raw = match self.store.get(D::CACHE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(dataset = D::NAME, error = %e, "cache read failed");
                return None;
            }
        };

        let entry = match serde_json::from_str::<CacheEntry>(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(dataset = D::NAME, error = %e, "discarding unreadable cache entry");
                self.remove_key(D::CACHE_KEY);
                return None;
            }
        };

        if !entry.is_fresh(self.clock.now_millis(), ttl) {
            tracing::debug!(dataset = D::NAME, stored_at = entry.timestamp, "cache entry expired");
            self.remove_key(D::CACHE_KEY);
            return None;
        }

        match parse_collection::<D::Record>(&entry.dados) {
            Ok(records) => Some(records),
            Err(e) => {
                tracing::warn!(dataset = D::NAME, error = %e, "discarding invalid cache entry");
                self.remove_key(D::CACHE_KEY);
                None
            }
        }
    }

    fn write_cache<D: Dataset>(&self, payload: Value) {
        let entry = CacheEntry::new(payload, self.clock.now_millis());
        let result = serde_json::to_string(&entry)
            .map_err(|e| e.to_string())
            .and_then(|text| {
                self.store
                    .set(D::CACHE_KEY, &text)
                    .map_err(|e| e.to_string())
            });
        if let Err(error) = result {
            tracing::warn!(dataset = D::NAME, %error, "failed to write cache entry");
        }
    }

    /// Sends a GET request, asserts a 2xx status, and parses the body as JSON.
    async fn fetch_json(&self, url: &Url) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .inspect_err(|e| tracing::warn!(url = %url, error = %e, "request failed"))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "unexpected HTTP status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            context: url.to_string(),
            source: e,
        })
    }
}
