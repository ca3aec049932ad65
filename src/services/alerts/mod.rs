//! Price alert evaluation.

pub mod store;

pub use store::AlertStore;

use crate::error::Result;
use crate::sources::YahooFinanceClient;
use crate::types::{Alert, AlertKind, ChangeDirection, NewAlert};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Decide whether an alert fires against the latest quote.
///
/// All comparisons are strict, so a price exactly at the threshold does
/// not fire. Percent-change alerts need a previous close; without one
/// they stay quiet.
pub fn should_trigger(alert: &Alert, current: f64, previous: Option<f64>) -> bool {
    match alert.kind {
        AlertKind::PriceAbove => current > alert.threshold,
        AlertKind::PriceBelow => current < alert.threshold,
        AlertKind::PercentChange => {
            let Some(previous) = previous else {
                return false;
            };
            if previous == 0.0 {
                return false;
            }
            let pct = (current - previous) / previous * 100.0;
            match alert.condition {
                Some(ChangeDirection::Increase) => pct > alert.threshold,
                Some(ChangeDirection::Decrease) => pct < -alert.threshold,
                None => false,
            }
        }
    }
}

/// Shared alert registry plus the check cycle that evaluates it.
pub struct AlertService {
    store: Mutex<AlertStore>,
    source: Arc<YahooFinanceClient>,
}

impl AlertService {
    pub fn new(store: AlertStore, source: Arc<YahooFinanceClient>) -> Self {
        Self {
            store: Mutex::new(store),
            source,
        }
    }

    pub async fn add(&self, request: NewAlert) -> Result<Alert> {
        let mut store = self.store.lock().await;
        store.add(
            &request.symbol,
            request.kind,
            request.threshold,
            request.condition,
        )
    }

    pub async fn remove(&self, id: u64) -> Result<bool> {
        let mut store = self.store.lock().await;
        store.remove(id)
    }

    pub async fn list(&self) -> Vec<Alert> {
        let store = self.store.lock().await;
        store.all().to_vec()
    }

    /// Evaluate every active alert against fresh quotes.
    ///
    /// A fetch failure for one symbol skips that alert and never aborts
    /// the cycle. Triggered alerts are persisted in one batch at the
    /// end; only the storage write can error out.
    ///
    /// The store lock is released while quotes are fetched so a slow
    /// cycle never blocks the CRUD handlers; triggers are re-applied
    /// against the current store afterwards, and `mark_triggered`
    /// ignores alerts that were removed or triggered in the meantime.
    pub async fn check(&self) -> Result<Vec<Alert>> {
        let active: Vec<Alert> = {
            let store = self.store.lock().await;
            store.all().iter().filter(|a| a.is_active()).cloned().collect()
        };

        let mut hits: Vec<(u64, f64)> = Vec::new();
        for alert in active {
            let (current, previous) = match self.source.recent_closes(&alert.symbol).await {
                Ok(closes) => closes,
                Err(e) => {
                    warn!("Quote fetch failed for {}: {}, skipping alert", alert.symbol, e);
                    continue;
                }
            };

            if should_trigger(&alert, current, previous) {
                hits.push((alert.id, current));
            }
        }

        if hits.is_empty() {
            return Ok(Vec::new());
        }

        let mut store = self.store.lock().await;
        let mut newly_triggered = Vec::new();
        for (id, price) in hits {
            if let Some(triggered) = store.mark_triggered(id, price) {
                info!(
                    "Alert {} triggered for {} at {:.2}",
                    triggered.id, triggered.symbol, price
                );
                newly_triggered.push(triggered);
            }
        }

        if !newly_triggered.is_empty() {
            store.persist()?;
        }

        Ok(newly_triggered)
    }
}
