//! Request descriptors for the v5 REST endpoints.
//!
//! Each function is a stateless translation from domain inputs to a
//! [`RequestDescriptor`]. All of them request signing, including the
//! public ticker endpoint, which the exchange would serve unsigned.

use okbridge_core::*;
use rust_decimal::Decimal;
use serde::Serialize;

pub const ACCOUNT_BALANCE_PATH: &str = "/api/v5/account/balance";
pub const MARKET_TICKER_PATH: &str = "/api/v5/market/ticker";
pub const TRADE_ORDER_PATH: &str = "/api/v5/trade/order";

/// Substring marking a perpetual swap instrument.
pub const SWAP_MARKER: &str = "SWAP";

const BALANCE_CURRENCY: &str = "USD";

/// Whether the symbol names a perpetual swap, e.g. "BTC-USD-SWAP".
pub fn is_swap(symbol: &str) -> bool {
    symbol.contains(SWAP_MARKER)
}

/// GET spot balances in USD.
pub fn spot_balances() -> RequestDescriptor {
    RequestDescriptor::get(ACCOUNT_BALANCE_PATH).param("ccy", BALANCE_CURRENCY)
}

/// GET isolated-margin balances for one instrument.
pub fn futures_balances(symbol: &str) -> RequestDescriptor {
    RequestDescriptor::get(ACCOUNT_BALANCE_PATH)
        .param("uType", "isolated")
        .param("instId", symbol)
        .param("ccy", BALANCE_CURRENCY)
}

/// GET the latest ticker. The instrument goes into the path itself so it is
/// covered by the signature.
pub fn ticker(symbol: &str) -> RequestDescriptor {
    RequestDescriptor::get(format!("{}?instId={}", MARKET_TICKER_PATH, symbol))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderBody<'a> {
    inst_id: &'a str,
    td_mode: TradeMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    side: Option<Side>,
    ord_type: OrderType,
    px: Decimal,
    sz: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    lev: Option<Decimal>,
}

impl<'a> OrderBody<'a> {
    fn from_request(order: &'a OrderRequest) -> Self {
        if is_swap(&order.symbol) {
            Self {
                inst_id: &order.symbol,
                td_mode: TradeMode::Cross,
                side: None,
                ord_type: order.order_type,
                px: order.price,
                sz: order.quantity,
                lev: None,
            }
        } else {
            Self {
                inst_id: &order.symbol,
                td_mode: TradeMode::Isolated,
                side: Some(order.side),
                ord_type: order.order_type,
                px: order.price,
                sz: order.quantity,
                // zero leverage counts as "not provided"
                lev: order.leverage.filter(|lev| !lev.is_zero()),
            }
        }
    }
}

/// POST a new order.
///
/// Swaps trade in cross margin and omit `side` and `lev`. Everything else
/// trades isolated with `side`, plus `lev` when a leverage was given.
pub fn place_order(order: &OrderRequest) -> Result<RequestDescriptor, ExchangeError> {
    let body = serde_json::to_string(&OrderBody::from_request(order))
        .map_err(|e| ExchangeError::Serialization(e.to_string()))?;
    Ok(RequestDescriptor::post(TRADE_ORDER_PATH, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::{json, Value};

    fn body_of(req: &RequestDescriptor) -> Value {
        serde_json::from_str(req.body.as_deref().unwrap()).unwrap()
    }

    #[test]
    fn test_spot_balances() {
        let req = spot_balances();
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.path, "/api/v5/account/balance");
        assert_eq!(req.params, vec![("ccy".to_string(), "USD".to_string())]);
        assert_eq!(req.body, None);
        assert!(req.auth);
    }

    #[test]
    fn test_futures_balances() {
        let req = futures_balances("BTC-USD-211231");
        assert_eq!(req.path, "/api/v5/account/balance");
        assert_eq!(
            req.params,
            vec![
                ("uType".to_string(), "isolated".to_string()),
                ("instId".to_string(), "BTC-USD-211231".to_string()),
                ("ccy".to_string(), "USD".to_string()),
            ]
        );
    }

    #[test]
    fn test_ticker_path_carries_instrument() {
        let req = ticker("BTC-USDT");
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.path, "/api/v5/market/ticker?instId=BTC-USDT");
        assert!(req.params.is_empty());
        assert!(req.auth);
    }

    #[test]
    fn test_swap_order_omits_side_and_leverage() {
        let order = OrderRequest::new(
            "BTC-USD-SWAP",
            Side::Buy,
            dec!(2),
            dec!(30000),
            OrderType::Limit,
        )
        .with_leverage(dec!(20));
        let req = place_order(&order).unwrap();
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.path, "/api/v5/trade/order");

        let body = body_of(&req);
        assert_eq!(
            body,
            json!({
                "instId": "BTC-USD-SWAP",
                "tdMode": "cross",
                "ordType": "limit",
                "px": "30000",
                "sz": "2",
            })
        );
        assert!(body.get("side").is_none());
        assert!(body.get("lev").is_none());
    }

    #[test]
    fn test_isolated_order_with_leverage() {
        let order = OrderRequest::new(
            "BTC-USD-211231",
            Side::Buy,
            dec!(10),
            dec!(60000),
            OrderType::Limit,
        )
        .with_leverage(dec!(10));
        let body = body_of(&place_order(&order).unwrap());
        assert_eq!(body["tdMode"], "isolated");
        assert_eq!(body["side"], "buy");
        assert_eq!(body["lev"], "10");
        assert_eq!(body["px"], "60000");
        assert_eq!(body["sz"], "10");
    }

    #[test]
    fn test_isolated_order_without_leverage() {
        let order = OrderRequest::new("ETH-USDT", Side::Sell, dec!(0.5), dec!(2500.25), OrderType::PostOnly);
        let body = body_of(&place_order(&order).unwrap());
        assert_eq!(body["tdMode"], "isolated");
        assert_eq!(body["side"], "sell");
        assert_eq!(body["ordType"], "post_only");
        assert!(body.get("lev").is_none());
    }

    #[test]
    fn test_zero_leverage_is_omitted() {
        let order = OrderRequest::new("ETH-USDT", Side::Buy, dec!(1), dec!(1), OrderType::Market)
            .with_leverage(Decimal::ZERO);
        let body = body_of(&place_order(&order).unwrap());
        assert!(body.get("lev").is_none());
    }

    #[test]
    fn test_body_field_order() {
        let order = OrderRequest::new("BTC-USDT", Side::Buy, dec!(1), dec!(2), OrderType::Limit)
            .with_leverage(dec!(3));
        let req = place_order(&order).unwrap();
        assert_eq!(
            req.body.as_deref(),
            Some(r#"{"instId":"BTC-USDT","tdMode":"isolated","side":"buy","ordType":"limit","px":"2","sz":"1","lev":"3"}"#)
        );
    }

    #[test]
    fn test_is_swap() {
        assert!(is_swap("BTC-USDT-SWAP"));
        assert!(!is_swap("BTC-USD-211231"));
        assert!(!is_swap("BTC-USDT"));
    }
}
