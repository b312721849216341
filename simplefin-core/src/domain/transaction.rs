//! Transaction domain model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A single transaction belonging to an account
///
/// Timestamps are UNIX epoch seconds, as on the wire. Order within an
/// account is whatever the provider returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique within the owning account
    pub id: String,
    /// UNIX timestamp when posted (0 while pending on some providers)
    pub posted: i64,
    /// Negative for debits, positive for credits
    pub amount: Decimal,
    /// Empty when the provider sends none
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// UNIX timestamp of when the transaction happened (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transacted_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<JsonValue>,
}

impl Transaction {
    /// Posted time as a UTC datetime, if the timestamp is in range
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.posted, 0)
    }

    pub fn is_debit(&self) -> bool {
        self.amount.is_sign_negative()
    }

    /// Payee if the provider sent one, otherwise the description
    pub fn display_payee(&self) -> &str {
        match self.payee.as_deref() {
            Some(p) if !p.trim().is_empty() => p,
            _ => &self.description,
        }
    }
}
