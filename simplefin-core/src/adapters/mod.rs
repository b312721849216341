//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - reqwest blocking client for the HttpTransport port
//! - SimpleFIN protocol client (claim, accounts, info) on top of any transport
//! - Mock SimpleFIN server for testing

pub mod http;
pub mod simplefin;

#[cfg(test)]
pub mod simplefin_mock;
