//! Account domain model
//!
//! Field names follow the SimpleFIN protocol
//! (https://www.simplefin.org/protocol.html) on the wire, so these types
//! deserialize the `/accounts` response directly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::transaction::Transaction;

/// The financial institution an account belongs to
///
/// Copied by value into every account it owns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Some bridges omit this; empty when absent
    #[serde(rename = "sfin-url", default)]
    pub sfin_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Organization {
    /// Human-readable label: name, then domain, then the SimpleFIN URL
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.domain.as_deref())
            .unwrap_or(&self.sfin_url)
    }
}

/// A financial account as returned by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique within one provider response; the handle for per-account queries
    pub id: String,
    pub name: String,
    /// ISO 4217 code, or a URL for custom currencies
    pub currency: String,
    pub balance: Decimal,
    #[serde(
        rename = "available-balance",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub available_balance: Option<Decimal>,
    /// UNIX timestamp of the balance
    #[serde(rename = "balance-date")]
    pub balance_date: i64,
    pub org: Organization,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub holdings: Vec<Holding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<JsonValue>,
}

/// Investment position snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_basis: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_value: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shares: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

/// Response envelope of the `/accounts` endpoint
///
/// Partial success is normal: `errors` may be non-empty while `accounts`
/// still holds everything the provider could reach. Both fields are
/// required on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchResult {
    pub errors: Vec<String>,
    pub accounts: Vec<Account>,
}

impl FetchResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Look up an account by its provider id
    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }
}

/// Response of the `/info` endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub versions: Vec<String>,
}
