//! Flat-file alert persistence.
//!
//! The whole alert array lives in one JSON file, read once at startup
//! and overwritten wholesale after every mutation. An unreadable file
//! degrades to an empty set; write failures propagate because they risk
//! silent data loss.

use crate::error::Result;
use crate::types::{Alert, AlertKind, ChangeDirection};
use chrono::Local;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Mutable store of alert records keyed by id.
pub struct AlertStore {
    path: PathBuf,
    alerts: Vec<Alert>,
}

impl AlertStore {
    /// Load the alert set from disk. Missing or corrupt files yield an
    /// empty store.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let alerts = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Vec<Alert>>(&content) {
                Ok(alerts) => {
                    debug!("Loaded {} alerts from {}", alerts.len(), path.display());
                    alerts
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}, starting empty", path.display(), e);
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };

        Self { path, alerts }
    }

    /// Create a new alert and persist the set.
    ///
    /// Ids are `max(existing) + 1`, so an id is never reused after a
    /// removal.
    pub fn add(
        &mut self,
        symbol: &str,
        kind: AlertKind,
        threshold: f64,
        condition: Option<ChangeDirection>,
    ) -> Result<Alert> {
        let alert = Alert {
            id: self.next_id(),
            symbol: symbol.to_uppercase(),
            kind,
            threshold,
            condition,
            created: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            triggered: false,
            triggered_at: None,
            triggered_price: None,
        };

        self.alerts.push(alert.clone());
        self.persist()?;
        Ok(alert)
    }

    /// Remove an alert by id; persists only when something was removed.
    pub fn remove(&mut self, id: u64) -> Result<bool> {
        let before = self.alerts.len();
        self.alerts.retain(|a| a.id != id);
        if self.alerts.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// All alerts, in creation order.
    pub fn all(&self) -> &[Alert] {
        &self.alerts
    }

    /// Flip an active alert to its terminal triggered state. Returns the
    /// updated alert, or `None` if the id is unknown or already
    /// triggered. Does not persist; the caller batches one write per
    /// check cycle.
    pub fn mark_triggered(&mut self, id: u64, price: f64) -> Option<Alert> {
        let alert = self.alerts.iter_mut().find(|a| a.id == id && !a.triggered)?;
        alert.triggered = true;
        alert.triggered_at = Some(Local::now().format("%Y-%m-%d %H:%M:%S").to_string());
        alert.triggered_price = Some(price);
        Some(alert.clone())
    }

    /// Overwrite the backing file with the full alert array.
    pub fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.alerts)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn next_id(&self) -> u64 {
        self.alerts.iter().map(|a| a.id).max().unwrap_or(0) + 1
    }
}
