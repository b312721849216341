//! SimpleFIN Core - client for the SimpleFIN financial-data protocol
//!
//! This crate follows hexagonal architecture:
//!
//! - **domain**: Protocol entities (Account, Transaction, AccessCredential, etc.)
//! - **ports**: Trait definitions for external dependencies (HttpTransport)
//! - **services**: Business logic orchestration (export)
//! - **adapters**: Concrete implementations (reqwest, SimpleFIN client)

pub mod domain;
pub mod ports;
pub mod services;
pub mod adapters;
pub mod config;

use std::path::{Path, PathBuf};

use adapters::http::ReqwestTransport;
use config::Config;

// Re-export commonly used types at crate root
pub use adapters::simplefin::{claim_access_url, FetchQuery, SimpleFINClient};
pub use domain::result::{Error, Result};
pub use domain::{
    AccessCredential, Account, FetchResult, Holding, Organization, ServerInfo, Transaction,
    DEMO_ACCESS_URL,
};
pub use services::{ExportPlanner, ExportReport};

/// Main context for SimpleFIN operations
///
/// Holds the configuration and the transport built from it. Each operation
/// is a single request/response cycle; nothing is cached between calls.
pub struct SimpleFINContext {
    pub config: Config,
    transport: ReqwestTransport,
}

impl SimpleFINContext {
    /// Create a context from an explicit configuration
    pub fn new(config: Config) -> Result<Self> {
        let transport = ReqwestTransport::with_timeout(config.timeout)
            .map_err(|e| Error::Config(e.to_string()))?;
        Ok(Self { config, transport })
    }

    /// Load configuration from a SimpleFIN directory and create a context
    pub fn load(simplefin_dir: &Path) -> Result<Self> {
        Self::new(Config::load(simplefin_dir)?)
    }

    /// Exchange a setup token for an access URL
    pub fn claim_access_url(&self, setup_token: &str) -> Result<String> {
        claim_access_url(&self.transport, setup_token)
    }

    /// Client for the configured access URL
    pub fn client(&self) -> Result<SimpleFINClient<&ReqwestTransport>> {
        let access_url = self.config.require_access_url()?;
        SimpleFINClient::from_access_url(&self.transport, access_url)
    }

    /// Export planner rooted at `output_dir`
    pub fn export_planner(&self, output_dir: impl Into<PathBuf>) -> ExportPlanner {
        ExportPlanner::new(output_dir)
    }
}
