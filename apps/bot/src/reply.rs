use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{ChannelId, CreateMessage, Http};
use stock::{FormattedQuote, Lookup, QuoteProvider, TickerExtractor, lookup};
use tracing::{debug, error, info, instrument, warn};

use crate::{Error, render};

pub const BATCH_FAILED: &str = "Stock(s) not found or API error";

pub fn not_found(symbol: &str) -> String {
    format!("Price for {symbol} could not be found")
}

pub fn delivery_failed(symbol: &str) -> String {
    format!("There was an issue retrieving {symbol}")
}

/// Where replies for one message go.
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send_quote(&self, quote: &FormattedQuote) -> Result<(), Error>;
    async fn send_notice(&self, text: &str) -> Result<(), Error>;
}

/// Replies into the channel a message came from.
pub struct ChannelSink {
    http: Arc<Http>,
    channel: ChannelId,
}

impl ChannelSink {
    pub fn new(http: Arc<Http>, channel: ChannelId) -> Self {
        Self { http, channel }
    }
}

#[async_trait]
impl ReplySink for ChannelSink {
    async fn send_quote(&self, quote: &FormattedQuote) -> Result<(), Error> {
        let msg = CreateMessage::new().embed(render::to_embed(quote));
        self.channel.send_message(&self.http, msg).await?;
        Ok(())
    }

    async fn send_notice(&self, text: &str) -> Result<(), Error> {
        self.channel.say(&self.http, text).await?;
        Ok(())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub symbols: Vec<String>,
    pub sent: Vec<String>,
    pub not_found: Vec<String>,
    pub failed: Vec<String>,
    pub batch_failed: bool,
}

impl DeliveryReport {
    /// No tickers were mentioned.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

async fn notify<S: ReplySink + ?Sized>(sink: &S, text: &str) {
    if let Err(e) = sink.send_notice(text).await {
        warn!(error = ?e, notice = text, "send notice failed");
    }
}

/// Extracts tickers from `text`, fetches them as one batch and replies once
/// per mention. A failed send only affects its own symbol.
#[instrument(name = "respond", skip_all)]
pub async fn respond<P, S>(
    provider: &P,
    extractor: &TickerExtractor,
    text: &str,
    sink: &S,
) -> DeliveryReport
where
    P: QuoteProvider + ?Sized,
    S: ReplySink + ?Sized,
{
    let symbols = extractor.extract(text);
    let mut report = DeliveryReport {
        symbols: symbols.clone(),
        ..Default::default()
    };

    if symbols.is_empty() {
        return report;
    }

    info!(symbols = %symbols.join(", "), "looking up quotes");

    let lookups = match lookup(provider, &symbols).await {
        Ok(l) => l,
        Err(e) => {
            error!(error = ?e, "quote batch failed");
            notify(sink, BATCH_FAILED).await;
            report.batch_failed = true;
            return report;
        }
    };

    for item in lookups {
        match item {
            Lookup::NotFound(symbol) => {
                debug!(symbol = %symbol, "no price");
                notify(sink, &not_found(&symbol)).await;
                report.not_found.push(symbol);
            }
            Lookup::Found(quote) => match sink.send_quote(&quote).await {
                Ok(()) => report.sent.push(quote.symbol),
                Err(e) => {
                    warn!(symbol = %quote.symbol, error = ?e, "send quote failed");
                    notify(sink, &delivery_failed(&quote.symbol)).await;
                    report.failed.push(quote.symbol);
                }
            },
        }
    }

    info!(
        sent = report.sent.len(),
        not_found = report.not_found.len(),
        failed = report.failed.len(),
        "replies delivered"
    );

    report
}
