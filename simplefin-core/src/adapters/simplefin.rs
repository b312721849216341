//! SimpleFIN API client
//!
//! Handles the setup-token claim and communication with a SimpleFIN server's
//! `/accounts` and `/info` endpoints.

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use url::{Position, Url};

use crate::domain::result::{Error, Result};
use crate::domain::{AccessCredential, FetchResult, ServerInfo};
use crate::ports::{HttpRequest, HttpResponse, HttpTransport};

const SECONDS_PER_DAY: i64 = 86_400;

/// Options for an `/accounts` request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchQuery {
    /// Provider account ids to fetch (empty = all accounts)
    pub account_ids: Vec<String>,
    /// Days of transaction history to request (None = provider default)
    pub lookback_days: Option<u32>,
    /// Ask the provider to include pending transactions
    pub include_pending: bool,
    /// Ask the provider to skip transactions entirely
    pub balances_only: bool,
}

impl FetchQuery {
    /// Every account, provider-default window
    pub fn all() -> Self {
        Self::default()
    }

    /// A single account
    pub fn account(id: impl Into<String>) -> Self {
        Self {
            account_ids: vec![id.into()],
            ..Self::default()
        }
    }

    pub fn with_lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = Some(days);
        self
    }

    pub fn with_pending(mut self) -> Self {
        self.include_pending = true;
        self
    }

    pub fn balances_only(mut self) -> Self {
        self.balances_only = true;
        self
    }

    /// Epoch seconds for `start-date`, relative to `now`
    pub fn start_date(&self, now: DateTime<Utc>) -> Option<i64> {
        self.lookback_days
            .map(|days| now.timestamp() - i64::from(days) * SECONDS_PER_DAY)
    }

    /// Query parameters for this request as of `now`
    pub fn to_query_pairs(&self, now: DateTime<Utc>) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .account_ids
            .iter()
            .map(|id| ("account".to_string(), id.clone()))
            .collect();

        if let Some(start) = self.start_date(now) {
            pairs.push(("start-date".to_string(), start.to_string()));
        }
        if self.include_pending {
            pairs.push(("pending".to_string(), "1".to_string()));
        }
        if self.balances_only {
            pairs.push(("balances-only".to_string(), "1".to_string()));
        }

        pairs
    }
}

/// Decode a base64 setup token into its one-time claim URL
pub fn decode_setup_token(setup_token: &str) -> Result<Url> {
    let token = setup_token.trim();
    if token.is_empty() {
        return Err(Error::InvalidSetupToken("setup token is empty".to_string()));
    }

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(token)
        .or_else(|_| base64::engine::general_purpose::URL_SAFE.decode(token))
        .map_err(|_| Error::InvalidSetupToken("token is not valid base64".to_string()))?;

    let claim_url = String::from_utf8(decoded)
        .map_err(|_| Error::InvalidSetupToken("token does not decode to text".to_string()))?;

    let url = Url::parse(claim_url.trim())
        .map_err(|_| Error::InvalidSetupToken("token does not decode to a URL".to_string()))?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(Error::InvalidSetupToken(
            "token does not decode to an http(s) URL".to_string(),
        ));
    }

    Ok(url)
}

/// Exchange a setup token for a durable access URL
///
/// The claim URL is single-use. A failed claim is not retried because the
/// server may already have consumed the token.
pub fn claim_access_url<T: HttpTransport + ?Sized>(transport: &T, setup_token: &str) -> Result<String> {
    let claim_url = decode_setup_token(setup_token)?;

    // Claim URLs normally carry no credentials; send them if they do
    let claim = AccessCredential::parse(claim_url.as_str())
        .map_err(|e| Error::InvalidSetupToken(e.to_string()))?;
    let target = format!("{}://{}", claim_url.scheme(), &claim_url[Position::BeforeHost..]);

    tracing::info!(host = claim.host(), "Claiming SimpleFIN setup token");

    let request = HttpRequest::post(target).with_basic_auth(claim.basic_auth());
    let response = transport.send(&request).map_err(|e| {
        if e.timed_out {
            Error::ClaimFailed(format!(
                "{} (the server may still have consumed the token; request a new one)",
                e
            ))
        } else {
            Error::ClaimFailed(e.to_string())
        }
    })?;

    if !response.is_success() {
        return Err(Error::ClaimFailed(format!(
            "claim endpoint returned HTTP {} (the token may already have been used)",
            response.status
        )));
    }

    let access_url = response.body.trim();
    if access_url.is_empty() {
        return Err(Error::ClaimFailed("no access URL received".to_string()));
    }

    Ok(access_url.to_string())
}

/// SimpleFIN API client bound to one access credential
#[derive(Debug)]
pub struct SimpleFINClient<T> {
    transport: T,
    credential: AccessCredential,
}

impl<T: HttpTransport> SimpleFINClient<T> {
    pub fn new(transport: T, credential: AccessCredential) -> Self {
        Self { transport, credential }
    }

    /// Create a client from a raw access URL
    pub fn from_access_url(transport: T, access_url: &str) -> Result<Self> {
        Ok(Self::new(transport, AccessCredential::parse(access_url)?))
    }

    pub fn credential(&self) -> &AccessCredential {
        &self.credential
    }

    /// Fetch accounts (and their transactions) as of the current time
    pub fn fetch_accounts(&self, query: &FetchQuery) -> Result<FetchResult> {
        self.fetch_accounts_at(query, Utc::now())
    }

    /// Fetch accounts with the lookback window measured from `now`
    pub fn fetch_accounts_at(&self, query: &FetchQuery, now: DateTime<Utc>) -> Result<FetchResult> {
        let request = HttpRequest::get(self.credential.endpoint("accounts"))
            .with_query(query.to_query_pairs(now))
            .with_basic_auth(self.credential.basic_auth());

        tracing::debug!(
            server = %self.credential,
            accounts = query.account_ids.len(),
            start_date = ?query.start_date(now),
            "Fetching SimpleFIN accounts"
        );

        let result: FetchResult = self.get_json(&request)?;

        if result.has_errors() {
            tracing::warn!(count = result.errors.len(), "SimpleFIN reported provider errors");
        }
        tracing::info!(accounts = result.accounts.len(), "Fetched SimpleFIN accounts");

        Ok(result)
    }

    /// Protocol versions supported by the server
    pub fn get_info(&self) -> Result<ServerInfo> {
        let request = HttpRequest::get(self.credential.endpoint("info"))
            .with_basic_auth(self.credential.basic_auth());
        self.get_json(&request)
    }

    fn get_json<R: DeserializeOwned>(&self, request: &HttpRequest) -> Result<R> {
        let response = self
            .transport
            .send(request)
            .map_err(|e| Error::ProviderUnavailable(e.to_string()))?;

        check_response_status(&response)?;

        serde_json::from_str(&response.body)
            .map_err(|e| Error::malformed_response(format!("Failed to parse SimpleFIN response: {}", e)))
    }
}

/// Check response status and return appropriate errors
fn check_response_status(response: &HttpResponse) -> Result<()> {
    match response.status {
        200..=299 => Ok(()),
        401 | 403 => Err(Error::Authentication(
            "your access URL may be invalid or revoked; \
            reset your SimpleFIN credentials and run setup again"
                .to_string(),
        )),
        402 => Err(Error::Authentication(
            "subscription payment required; check your SimpleFIN account".to_string(),
        )),
        status @ 500..=599 => Err(Error::ProviderUnavailable(format!("server error: HTTP {}", status))),
        status => Err(Error::ProviderUnavailable(format!("unexpected response: HTTP {}", status))),
    }
}
