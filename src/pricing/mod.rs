//! Distance lookup and price derivation for new bookings.

mod distance;

pub use distance::*;

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::error::{LogisticsError, LogisticsResult};

/// Tariff applied to every booking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingRates {
    pub base_fare: f64,
    pub per_km: f64,
    pub per_ton: f64,
}

impl Default for PricingRates {
    fn default() -> Self {
        Self {
            base_fare: 50.0,
            per_km: 2.5,
            per_ton: 0.5,
        }
    }
}

impl PricingRates {
    /// Base fare plus distance and weight components, rounded half-up to cents.
    ///
    /// Non-decreasing in both distance and weight as long as the rates are
    /// non-negative, which configuration guarantees.
    pub fn price_for(&self, distance_km: f64, weight: f64) -> f64 {
        round_cents(self.base_fare + distance_km * self.per_km + weight * self.per_ton)
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Distance and price for one shipment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub distance_km: f64,
    pub price: f64,
}

pub struct PricingCalculator {
    rates: PricingRates,
    provider: Arc<dyn DistanceProvider>,
    timeout: Duration,
}

impl PricingCalculator {
    pub fn new(rates: PricingRates, provider: Arc<dyn DistanceProvider>, timeout: Duration) -> Self {
        Self {
            rates,
            provider,
            timeout,
        }
    }

    /// Calculator backed by the offline estimator.
    pub fn estimated(rates: PricingRates) -> Self {
        Self::new(rates, Arc::new(EstimatedDistanceProvider), Duration::from_secs(1))
    }

    /// Quotes a validated shipment. Callers reject bad weights and identical
    /// endpoints before getting here.
    #[instrument(skip(self), fields(provider = self.provider.name()))]
    pub async fn quote(&self, pickup: &str, drop: &str, weight: f64) -> LogisticsResult<Quote> {
        let lookup = self.provider.distance_km(pickup, drop);
        let distance_km = match tokio::time::timeout(self.timeout, lookup).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(timeout_ms = self.timeout.as_millis(), "Distance lookup timed out");
                return Err(LogisticsError::Upstream(format!(
                    "distance lookup timed out after {} ms",
                    self.timeout.as_millis()
                )));
            }
        };

        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(LogisticsError::Upstream(format!(
                "distance provider returned {distance_km}"
            )));
        }

        let quote = Quote {
            distance_km,
            price: self.rates.price_for(distance_km, weight),
        };
        info!(distance_km, price = quote.price, "Quoted shipment");
        Ok(quote)
    }
}
