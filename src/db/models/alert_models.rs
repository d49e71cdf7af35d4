use serde::{Deserialize, Serialize};

/// Alert severity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
        }
    }
}

/// Alert category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum AlertType {
    /// At least one weapon label was matched
    Weapon,
    Threat,
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertType::Weapon => write!(f, "weapon"),
            AlertType::Threat => write!(f, "threat"),
        }
    }
}

/// Alert model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Alert {
    pub id: i64,
    pub message: String,
    pub severity: Severity,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    /// ISO-8601, server local time
    pub timestamp: String,
}

#[derive(Debug, Clone)]
pub struct NewAlert {
    pub message: String,
    pub severity: Severity,
    pub alert_type: AlertType,
    pub timestamp: String,
}
