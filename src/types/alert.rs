use serde::{Deserialize, Serialize};

/// What a price alert watches for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    PriceAbove,
    PriceBelow,
    PercentChange,
}

/// Direction for `percent_change` alerts; unused for the price kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    Increase,
    Decrease,
}

/// A user-defined price alert.
///
/// Field names and formats mirror the persisted `alerts.json` schema:
/// `created`/`triggered_at` are `%Y-%m-%d %H:%M:%S` local timestamps and
/// the kind serializes as `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: u64,
    pub symbol: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub threshold: f64,
    pub condition: Option<ChangeDirection>,
    pub created: String,
    pub triggered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggered_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggered_price: Option<f64>,
}

impl Alert {
    /// Whether this alert can still transition.
    pub fn is_active(&self) -> bool {
        !self.triggered
    }
}

/// Request body for creating an alert.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAlert {
    pub symbol: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub threshold: f64,
    #[serde(default)]
    pub condition: Option<ChangeDirection>,
}
