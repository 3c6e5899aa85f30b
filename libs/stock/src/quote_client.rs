use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, USER_AGENT},
};
use tracing::debug;

use crate::error::QuoteError;
use crate::quote::{QuoteEnvelope, QuoteRecord};

// Yahoo's public v7 quote endpoint has been answering 401 without a session
// cookie + `crumb` query pair. Point QUOTE_API_BASE_URL at a compatible proxy
// that handles the session when deploying against Yahoo directly.
pub const DEFAULT_BASE_API: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// The provider rejects requests without a browser-like agent.
const BROWSER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Unknown symbols are missing from, or price-less in, the result.
    async fn quote(&self, symbols: &[String]) -> Result<Vec<QuoteRecord>, QuoteError>;
}

#[derive(Clone)]
pub struct QuoteClient {
    client: Client,
    base_api: String,
}

impl QuoteClient {
    pub fn new(base_api: impl Into<String>, timeout: Duration) -> Result<Self, QuoteError> {
        let base_api = base_api.into();
        if !base_api.starts_with("http://") && !base_api.starts_with("https://") {
            return Err(QuoteError::InvalidBaseUrl(base_api));
        }

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_AGENT));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, base_api })
    }

    pub async fn fetch_quotes(&self, symbols: &[String]) -> Result<Vec<QuoteRecord>, QuoteError> {
        if symbols.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/v7/finance/quote", self.base_api.trim_end_matches('/'));

        let res: QuoteEnvelope = self
            .client
            .get(url)
            .query(&[("symbols", symbols.join(","))])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = res.quote_response.error {
            return Err(QuoteError::Api {
                code: err.code,
                description: err.description,
            });
        }

        let records = res.quote_response.result.unwrap_or_default();
        debug!(requested = symbols.len(), returned = records.len(), "fetched quotes");

        Ok(records)
    }
}

#[async_trait]
impl QuoteProvider for QuoteClient {
    async fn quote(&self, symbols: &[String]) -> Result<Vec<QuoteRecord>, QuoteError> {
        self.fetch_quotes(symbols).await
    }
}
