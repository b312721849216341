//! CLI command implementations

pub mod accounts;
pub mod fetch;
pub mod info;
pub mod setup;
pub mod transactions;

use std::path::PathBuf;

use anyhow::{Context, Result};
use simplefin_core::config::default_dir;
use simplefin_core::SimpleFINContext;

/// Get the SimpleFIN settings directory from environment or default
pub fn get_simplefin_dir() -> Result<PathBuf> {
    default_dir().context("Could not find home directory; set SIMPLEFIN_DIR")
}

/// Load configuration and build the context
pub fn get_context() -> Result<SimpleFINContext> {
    let simplefin_dir = get_simplefin_dir()?;
    SimpleFINContext::load(&simplefin_dir).context("Failed to initialize SimpleFIN context")
}
