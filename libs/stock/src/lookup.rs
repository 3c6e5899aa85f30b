use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::error::QuoteError;
use crate::format::FormattedQuote;
use crate::quote::QuoteRecord;
use crate::quote_client::QuoteProvider;

#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(FormattedQuote),
    NotFound(String),
}

impl Lookup {
    pub fn symbol(&self) -> &str {
        match self {
            Lookup::Found(quote) => &quote.symbol,
            Lookup::NotFound(symbol) => symbol,
        }
    }
}

/// A failed batch fails as a whole. Within a successful batch, a symbol with
/// no record or no current price becomes [`Lookup::NotFound`].
#[instrument(name = "lookup", skip(provider), fields(count = symbols.len()))]
pub async fn lookup<P>(provider: &P, symbols: &[String]) -> Result<Vec<Lookup>, QuoteError>
where
    P: QuoteProvider + ?Sized,
{
    if symbols.is_empty() {
        return Ok(Vec::new());
    }

    let records = provider.quote(symbols).await?;
    debug!(records = records.len(), "batch returned");

    let by_symbol: HashMap<String, &QuoteRecord> = records
        .iter()
        .map(|record| (record.symbol.to_ascii_uppercase(), record))
        .collect();

    Ok(symbols
        .iter()
        .map(|symbol| match by_symbol.get(&symbol.to_ascii_uppercase()) {
            Some(record) if record.has_price() => Lookup::Found(FormattedQuote::new(record)),
            _ => Lookup::NotFound(symbol.clone()),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    struct FakeProvider {
        records: Vec<QuoteRecord>,
        fail: bool,
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl FakeProvider {
        fn with(records: Vec<QuoteRecord>) -> Self {
            Self {
                records,
                fail: false,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl QuoteProvider for FakeProvider {
        async fn quote(&self, symbols: &[String]) -> Result<Vec<QuoteRecord>, QuoteError> {
            self.calls.lock().unwrap().push(symbols.to_vec());
            if self.fail {
                return Err(QuoteError::Api {
                    code: "Internal".to_string(),
                    description: "down".to_string(),
                });
            }
            Ok(self.records.clone())
        }
    }

    fn priced(symbol: &str, price: f64) -> QuoteRecord {
        QuoteRecord {
            symbol: symbol.to_string(),
            regular_market_price: Some(price),
            regular_market_change: Some(1.0),
            ..Default::default()
        }
    }

    fn symbols(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn pairs_records_in_request_order() {
        let provider = FakeProvider::with(vec![priced("AAPL", 190.0), priced("ETH-USD", 2500.0)]);

        let lookups = lookup(&provider, &symbols(&["ETH-USD", "AAPL", "ETH-USD"]))
            .await
            .unwrap();

        let order: Vec<&str> = lookups.iter().map(Lookup::symbol).collect();
        assert_eq!(order, vec!["ETH-USD", "AAPL", "ETH-USD"]);
        assert!(lookups.iter().all(|l| matches!(l, Lookup::Found(_))));
        assert_eq!(provider.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_price_or_record_is_not_found() {
        let provider = FakeProvider::with(vec![
            priced("ETH-USD", 2500.0),
            QuoteRecord {
                symbol: "NONEXISTENTTICKER123".to_string(),
                ..Default::default()
            },
        ]);

        let lookups = lookup(
            &provider,
            &symbols(&["ETH-USD", "NONEXISTENTTICKER123", "GONE"]),
        )
        .await
        .unwrap();

        assert!(matches!(&lookups[0], Lookup::Found(q) if q.price == "2500.00"));
        assert_eq!(
            lookups[1],
            Lookup::NotFound("NONEXISTENTTICKER123".to_string())
        );
        assert_eq!(lookups[2], Lookup::NotFound("GONE".to_string()));
    }

    #[tokio::test]
    async fn symbol_match_ignores_case() {
        let provider = FakeProvider::with(vec![priced("shop.to", 100.0)]);
        let lookups = lookup(&provider, &symbols(&["SHOP.TO"])).await.unwrap();
        assert!(matches!(lookups[0], Lookup::Found(_)));
    }

    #[tokio::test]
    async fn batch_failure_propagates() {
        let provider = FakeProvider {
            fail: true,
            ..FakeProvider::with(Vec::new())
        };
        let err = lookup(&provider, &symbols(&["AAPL"])).await.unwrap_err();
        assert!(matches!(err, QuoteError::Api { .. }));
    }

    #[tokio::test]
    async fn empty_request_makes_no_call() {
        let provider = FakeProvider::with(Vec::new());
        let lookups = lookup(&provider, &[]).await.unwrap();
        assert!(lookups.is_empty());
        assert!(provider.calls.lock().unwrap().is_empty());
    }
}
