//! Core domain entities
//!
//! Pure data structures mirroring the SimpleFIN protocol, plus the access
//! URL parser. No I/O happens here.

pub mod access;
mod account;
mod transaction;
pub mod result;

pub use access::{AccessCredential, DEMO_ACCESS_URL};
pub use account::{Account, FetchResult, Holding, Organization, ServerInfo};
pub use transaction::Transaction;
