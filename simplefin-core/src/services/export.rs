//! Export service - write fetched accounts to per-account JSON files
//!
//! Layout: `{root}/{org-domain}/{account-name}/{account-id}_{YYYY-MM-DD}.json`
//! where the date is the account's balance date in UTC. A second export of
//! the same account on the same day overwrites the earlier file.
//!
//! Accounts whose names sanitize to the same segment share a directory; the
//! id in the file name keeps their files apart. If two accounts in one batch
//! still resolve to the same file, the later one is reported as a failure
//! instead of overwriting the earlier one.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::result::{Error, Result};
use crate::domain::{Account, FetchResult, Holding, Organization, Transaction};

/// Segment used when sanitization leaves nothing usable
const UNKNOWN_SEGMENT: &str = "unknown";

/// Make a string safe to use as a single path segment
///
/// Keeps letters and digits (any script), `-`, `_` and `.`; everything else
/// becomes `-`. Runs of `-` collapse and leading/trailing `-` are dropped.
pub fn sanitize_segment(name: &str) -> String {
    static DASHES: OnceLock<Regex> = OnceLock::new();
    let dashes = DASHES.get_or_init(|| Regex::new(r"-{2,}").expect("valid regex"));

    let replaced: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '-' })
        .collect();
    let collapsed = dashes.replace_all(&replaced, "-");
    let trimmed = collapsed.trim_matches('-');

    match trimmed {
        "" | "." | ".." => UNKNOWN_SEGMENT.to_string(),
        s => s.to_string(),
    }
}

/// Relative directory for one account: `{org-domain}/{account-name}`
pub fn account_relative_dir(account: &Account) -> PathBuf {
    let domain = account.org.domain.as_deref().unwrap_or_default();
    PathBuf::from(sanitize_segment(domain)).join(sanitize_segment(&account.name))
}

/// Relative export path for one account
pub fn account_relative_path(account: &Account) -> Result<PathBuf> {
    let dir = account_relative_dir(account);
    let date = DateTime::from_timestamp(account.balance_date, 0).ok_or_else(|| {
        Error::export_write(
            &dir,
            format!("balance-date {} is out of range", account.balance_date),
        )
    })?;

    Ok(dir.join(format!(
        "{}_{}.json",
        sanitize_segment(&account.id),
        date.format("%Y-%m-%d")
    )))
}

/// Transaction as written to an export file (ISO-8601 timestamps)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedTransaction {
    pub id: String,
    pub posted: DateTime<Utc>,
    pub amount: Decimal,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transacted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<JsonValue>,
}

/// Account document as written to an export file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedAccount {
    pub id: String,
    pub name: String,
    pub currency: String,
    pub balance: Decimal,
    #[serde(
        rename = "available-balance",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub available_balance: Option<Decimal>,
    #[serde(rename = "balance-date")]
    pub balance_date: i64,
    pub org: Organization,
    #[serde(default)]
    pub transactions: Vec<ExportedTransaction>,
    #[serde(default)]
    pub holdings: Vec<Holding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<JsonValue>,
}

fn to_datetime(ts: i64, field: &str, tx_id: &str) -> std::result::Result<DateTime<Utc>, String> {
    DateTime::from_timestamp(ts, 0)
        .ok_or_else(|| format!("transaction {} has out-of-range {} {}", tx_id, field, ts))
}

impl ExportedTransaction {
    fn from_transaction(tx: &Transaction) -> std::result::Result<Self, String> {
        Ok(Self {
            id: tx.id.clone(),
            posted: to_datetime(tx.posted, "posted", &tx.id)?,
            amount: tx.amount,
            description: tx.description.clone(),
            payee: tx.payee.clone(),
            memo: tx.memo.clone(),
            transacted_at: tx
                .transacted_at
                .map(|ts| to_datetime(ts, "transacted_at", &tx.id))
                .transpose()?,
            pending: tx.pending,
            extra: tx.extra.clone(),
        })
    }

    fn into_transaction(self) -> Transaction {
        Transaction {
            id: self.id,
            posted: self.posted.timestamp(),
            amount: self.amount,
            description: self.description,
            payee: self.payee,
            memo: self.memo,
            transacted_at: self.transacted_at.map(|dt| dt.timestamp()),
            pending: self.pending,
            extra: self.extra,
        }
    }
}

impl ExportedAccount {
    /// Convert a fetched account into its export document
    pub fn from_account(account: &Account) -> std::result::Result<Self, String> {
        let transactions = account
            .transactions
            .iter()
            .map(ExportedTransaction::from_transaction)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            id: account.id.clone(),
            name: account.name.clone(),
            currency: account.currency.clone(),
            balance: account.balance,
            available_balance: account.available_balance,
            balance_date: account.balance_date,
            org: account.org.clone(),
            transactions,
            holdings: account.holdings.clone(),
            extra: account.extra.clone(),
        })
    }

    /// Convert back to the wire representation (epoch timestamps)
    pub fn into_account(self) -> Account {
        Account {
            id: self.id,
            name: self.name,
            currency: self.currency,
            balance: self.balance,
            available_balance: self.available_balance,
            balance_date: self.balance_date,
            org: self.org,
            transactions: self
                .transactions
                .into_iter()
                .map(ExportedTransaction::into_transaction)
                .collect(),
            holdings: self.holdings,
            extra: self.extra,
        }
    }
}

/// Read an export file back into an account
pub fn read_export(path: &Path) -> Result<Account> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::malformed_response(format!("Failed to read {}: {}", path.display(), e)))?;
    let exported: ExportedAccount = serde_json::from_str(&content)
        .map_err(|e| Error::malformed_response(format!("Failed to parse {}: {}", path.display(), e)))?;
    Ok(exported.into_account())
}

/// One account that could not be exported
#[derive(Debug)]
pub struct ExportFailure {
    pub account_id: String,
    pub error: Error,
}

/// One account file written by an export batch
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenFile {
    pub account_id: String,
    pub account_name: String,
    pub transactions: usize,
    pub path: PathBuf,
}

/// Outcome of an export batch
#[derive(Debug, Default)]
pub struct ExportReport {
    pub files_written: usize,
    /// Files written, in account order
    pub written: Vec<WrittenFile>,
    /// Per-account failures, in account order
    pub failures: Vec<ExportFailure>,
}

impl ExportReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn record_failure(&mut self, account: &Account, error: Error) {
        tracing::warn!(account = %account.id, error = %error, "Account export failed");
        self.failures.push(ExportFailure {
            account_id: account.id.clone(),
            error,
        });
    }
}

/// Writes one JSON document per account under a root directory
#[derive(Debug, Clone)]
pub struct ExportPlanner {
    root: PathBuf,
}

impl ExportPlanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute output path for an account
    pub fn path_for(&self, account: &Account) -> Result<PathBuf> {
        match account_relative_path(account) {
            Ok(relative) => Ok(self.root.join(relative)),
            Err(Error::ExportWrite { path, message }) => Err(Error::ExportWrite {
                path: self.root.join(path),
                message,
            }),
            Err(other) => Err(other),
        }
    }

    /// Export every account, one after another
    ///
    /// A failed account is recorded in the report and the batch moves on.
    pub fn export(&self, result: &FetchResult) -> ExportReport {
        let mut report = ExportReport::default();
        let mut planned: HashSet<PathBuf> = HashSet::new();

        for account in &result.accounts {
            let path = match self.path_for(account) {
                Ok(path) => path,
                Err(error) => {
                    report.record_failure(account, error);
                    continue;
                }
            };

            if !planned.insert(path.clone()) {
                let error = Error::export_write(&path, "path already used by another account in this batch");
                report.record_failure(account, error);
                continue;
            }

            match self.write_account(account, &path) {
                Ok(()) => {
                    tracing::info!(
                        path = %path.display(),
                        transactions = account.transactions.len(),
                        "Exported account"
                    );
                    report.files_written += 1;
                    report.written.push(WrittenFile {
                        account_id: account.id.clone(),
                        account_name: account.name.clone(),
                        transactions: account.transactions.len(),
                        path,
                    });
                }
                Err(error) => report.record_failure(account, error),
            }
        }

        report
    }

    /// Export a single account, returning the path written
    pub fn export_account(&self, account: &Account) -> Result<PathBuf> {
        let path = self.path_for(account)?;
        self.write_account(account, &path)?;
        Ok(path)
    }

    fn write_account(&self, account: &Account, path: &Path) -> Result<()> {
        let document = ExportedAccount::from_account(account)
            .map_err(|msg| Error::export_write(path, msg))?;
        let content = serde_json::to_string_pretty(&document)
            .map_err(|e| Error::export_write(path, e))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::export_write(parent, e))?;
        }
        std::fs::write(path, content).map_err(|e| Error::export_write(path, e))
    }
}
