//! Blocking reqwest implementation of the HTTP transport port

use std::time::Duration;

use reqwest::blocking::Client;

use crate::ports::{HttpRequest, HttpResponse, HttpTransport, Method, TransportError};

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP transport backed by `reqwest::blocking`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("simplefin-rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::new(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    /// Map request errors to user-friendly messages
    fn map_request_error(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::timeout(format!(
                "Connection timed out after {} seconds",
                self.timeout.as_secs()
            ))
        } else if error.is_connect() {
            TransportError::new("Unable to connect to SimpleFIN server")
        } else {
            TransportError::new(format!("Request failed: {}", error))
        }
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            // Claim endpoints expect an explicit empty body
            Method::Post => self.client.post(&request.url).body(""),
        };

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some((user, pass)) = &request.basic_auth {
            builder = builder.basic_auth(user, Some(pass));
        }

        let response = builder.send().map_err(|e| self.map_request_error(e))?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| self.map_request_error(e))?;

        tracing::debug!(method = request.method.as_str(), url = %request.url, status, "SimpleFIN request completed");

        Ok(HttpResponse { status, body })
    }
}
