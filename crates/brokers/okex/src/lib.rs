//! OKEx exchange adapter.
//!
//! Signed REST calls against the v5 API: balances, tickers and order
//! placement. Every call is one HTTP round trip with no retries.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod signing;

pub use client::OkexClient;
pub use config::{Environment, OkexConfig};
