use chrono::{DateTime, Utc};
use serde::Deserialize;

//
// Match Yahoo! Finance v7 quote JSON
// https://query1.finance.yahoo.com/v7/finance/quote?symbols=AAPL
//
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketState {
    Regular,
    Pre,
    PrePre,
    Post,
    PostPost,
    Closed,
    #[serde(other)]
    Other,
}

// Currencies lack volume and market cap, unknown symbols lack a price.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteRecord {
    pub symbol: String,

    pub regular_market_price: Option<f64>,
    pub regular_market_change: Option<f64>,
    /// Already a percentage, `1.25` means 1.25%.
    pub regular_market_change_percent: Option<f64>,
    pub regular_market_day_high: Option<f64>,
    pub regular_market_day_low: Option<f64>,
    pub regular_market_previous_close: Option<f64>,
    pub regular_market_volume: Option<f64>,
    pub market_cap: Option<f64>,

    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub regular_market_time: Option<DateTime<Utc>>,

    pub currency: Option<String>,
    pub currency_symbol: Option<String>,
    pub short_name: Option<String>,
    pub long_name: Option<String>,

    pub market_state: Option<MarketState>,

    pub pre_market_price: Option<f64>,
    pub pre_market_change: Option<f64>,
    pub pre_market_change_percent: Option<f64>,

    pub post_market_price: Option<f64>,
    pub post_market_change: Option<f64>,
    pub post_market_change_percent: Option<f64>,
}

impl QuoteRecord {
    /// A record without a current price means the symbol did not resolve.
    pub fn has_price(&self) -> bool {
        self.regular_market_price.is_some()
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuoteEnvelope {
    pub quote_response: QuoteResponse,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct QuoteResponse {
    pub result: Option<Vec<QuoteRecord>>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct ApiError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_equity_record() {
        let record: QuoteRecord = serde_json::from_str(
            r#"{
                "symbol": "SHOP.TO",
                "regularMarketPrice": 101.5,
                "regularMarketChange": -1.23,
                "regularMarketChangePercent": -1.2,
                "regularMarketVolume": 1500000,
                "marketCap": 130000000000,
                "regularMarketTime": 1700000000,
                "currency": "CAD",
                "shortName": "SHOPIFY INC",
                "longName": "Shopify Inc.",
                "marketState": "POSTPOST",
                "postMarketPrice": 101.0
            }"#,
        )
        .unwrap();

        assert_eq!(record.symbol, "SHOP.TO");
        assert_eq!(record.regular_market_price, Some(101.5));
        assert_eq!(record.regular_market_volume, Some(1_500_000.0));
        assert_eq!(record.market_state, Some(MarketState::PostPost));
        assert_eq!(
            record.regular_market_time.map(|t| t.timestamp()),
            Some(1_700_000_000)
        );
        assert!(record.long_name.is_some());
        assert!(record.pre_market_price.is_none());
        assert!(record.has_price());
    }

    #[test]
    fn unknown_market_state_is_other() {
        let record: QuoteRecord =
            serde_json::from_str(r#"{"symbol": "X", "marketState": "SOMETHING_NEW"}"#).unwrap();
        assert_eq!(record.market_state, Some(MarketState::Other));
        assert!(!record.has_price());
    }

    #[test]
    fn parses_envelope_with_error() {
        let envelope: QuoteEnvelope = serde_json::from_str(
            r#"{"quoteResponse": {"result": null, "error": {"code": "Bad Request", "description": "nope"}}}"#,
        )
        .unwrap();

        let error = envelope.quote_response.error.unwrap();
        assert_eq!(error.code, "Bad Request");
        assert!(envelope.quote_response.result.is_none());
    }
}
