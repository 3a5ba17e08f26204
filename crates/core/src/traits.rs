use crate::models::*;
use async_trait::async_trait;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while talking to an exchange.
///
/// Application-level rejections reported by the exchange are not errors;
/// they come back as a decoded [`ApiResponse`].
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

// ---------------------------------------------------------------------------
// Exchange Trait
// ---------------------------------------------------------------------------

/// The account, market data and trading calls exposed by an exchange client.
///
/// Each call performs exactly one HTTP round trip.
#[async_trait]
pub trait Exchange: Send + Sync {
    /// Spot account balances.
    async fn spot_balances(&self) -> Result<ApiResponse, ExchangeError>;

    /// Latest ticker for a spot instrument.
    async fn spot_ticker(&self, symbol: &str) -> Result<ApiResponse, ExchangeError>;

    /// Isolated-margin balances for a futures instrument.
    async fn futures_balances(&self, symbol: &str) -> Result<ApiResponse, ExchangeError>;

    /// Latest ticker for a futures instrument.
    async fn futures_ticker(&self, symbol: &str) -> Result<ApiResponse, ExchangeError>;

    /// Place an order.
    async fn place_order(&self, order: &OrderRequest) -> Result<ApiResponse, ExchangeError>;
}
