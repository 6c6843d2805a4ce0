use async_trait::async_trait;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, instrument, warn};

use crate::error::{LogisticsError, LogisticsResult};

/// Source of road distances between two free-text locations.
#[async_trait]
pub trait DistanceProvider: Send + Sync {
    /// Distance in kilometres. Must never be negative.
    async fn distance_km(&self, pickup: &str, drop: &str) -> LogisticsResult<f64>;

    fn name(&self) -> &'static str;
}

// =============================================================================
// Offline estimator
// =============================================================================

const MIN_ESTIMATE_KM: f64 = 10.0;
const MAX_ESTIMATE_KM: f64 = 500.0;

/// Deterministic stand-in used when no distance service is configured.
///
/// The location pair is normalized and ordered before hashing, so the same
/// pair always maps to the same distance in either direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedDistanceProvider;

impl EstimatedDistanceProvider {
    pub fn estimate(pickup: &str, drop: &str) -> f64 {
        let mut pair = [normalize(pickup), normalize(drop)];
        pair.sort();

        let mut hasher = Sha256::new();
        hasher.update(pair[0].as_bytes());
        hasher.update([0u8]);
        hasher.update(pair[1].as_bytes());
        let digest = hasher.finalize();

        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        let steps = ((MAX_ESTIMATE_KM - MIN_ESTIMATE_KM) * 100.0) as u64 + 1;
        MIN_ESTIMATE_KM + (u64::from_be_bytes(head) % steps) as f64 / 100.0
    }
}

fn normalize(location: &str) -> String {
    location
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[async_trait]
impl DistanceProvider for EstimatedDistanceProvider {
    async fn distance_km(&self, pickup: &str, drop: &str) -> LogisticsResult<f64> {
        Ok(Self::estimate(pickup, drop))
    }

    fn name(&self) -> &'static str {
        "estimate"
    }
}

// =============================================================================
// Distance-matrix HTTP service
// =============================================================================

#[derive(Debug, Deserialize)]
struct MatrixResponse {
    status: String,
    #[serde(default)]
    rows: Vec<MatrixRow>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MatrixRow {
    #[serde(default)]
    elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
struct MatrixElement {
    status: String,
    distance: Option<MatrixValue>,
}

#[derive(Debug, Deserialize)]
struct MatrixValue {
    /// Metres.
    value: f64,
}

/// Looks distances up in a distance-matrix style HTTP API.
pub struct RemoteDistanceProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl RemoteDistanceProvider {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl DistanceProvider for RemoteDistanceProvider {
    #[instrument(skip(self))]
    async fn distance_km(&self, pickup: &str, drop: &str) -> LogisticsResult<f64> {
        let mut query = vec![("origins", pickup), ("destinations", drop), ("units", "metric")];
        if let Some(key) = &self.api_key {
            query.push(("key", key.as_str()));
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| upstream(format!("distance request failed: {e}")))?;

        let matrix: MatrixResponse = response
            .json()
            .await
            .map_err(|e| upstream(format!("malformed distance response: {e}")))?;

        if matrix.status != "OK" {
            let detail = matrix.error_message.unwrap_or_default();
            return Err(upstream(format!("distance service returned {} {detail}", matrix.status)));
        }

        let element = matrix
            .rows
            .into_iter()
            .next()
            .and_then(|row| row.elements.into_iter().next())
            .ok_or_else(|| upstream("distance response has no elements".to_string()))?;

        if element.status != "OK" {
            return Err(upstream(format!("no route found ({})", element.status)));
        }

        let metres = element
            .distance
            .map(|d| d.value)
            .filter(|m| m.is_finite() && *m >= 0.0)
            .ok_or_else(|| upstream("distance response has no distance".to_string()))?;

        let km = (metres / 1000.0 * 100.0).round() / 100.0;
        debug!(km, "Distance resolved");
        Ok(km)
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

fn upstream(message: String) -> LogisticsError {
    warn!(%message, "Distance lookup failed");
    LogisticsError::Upstream(message)
}
