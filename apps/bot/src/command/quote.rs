use async_trait::async_trait;
use poise::CreateReply;
use stock::FormattedQuote;
use tracing::info;

use crate::reply::{ReplySink, respond};
use crate::{Context, Error, render};

/// Turns `AAPL, btc TSX:SHOP` into `$AAPL $btc $TSX:SHOP`.
pub fn as_ticker_text(input: &str) -> String {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(|t| {
            if t.starts_with('$') {
                t.to_string()
            } else {
                format!("${t}")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl<'a> ReplySink for Context<'a> {
    async fn send_quote(&self, quote: &FormattedQuote) -> Result<(), Error> {
        self.send(CreateReply::default().embed(render::to_embed(quote)))
            .await?;
        Ok(())
    }

    async fn send_notice(&self, text: &str) -> Result<(), Error> {
        self.say(text).await?;
        Ok(())
    }
}

#[poise::command(slash_command)]
pub async fn quote(
    ctx: Context<'_>,
    #[description = "Ticker symbol(s), e.g. AAPL, BTC, TSX:SHOP"] symbols: String,
) -> Result<(), Error> {
    ctx.defer().await?;

    let user_id = ctx.author().id.get();
    info!("quote: invoked user_id={} raw_input={}", user_id, symbols);

    let data = ctx.data();
    let text = as_ticker_text(&symbols);
    let report = respond(data.quote_client.as_ref(), &data.extractor, &text, &ctx).await;

    if report.is_empty() {
        ctx.say("No valid tickers provided.").await?;
    }

    info!(
        "quote: completed user_id={} sent={} not_found={} failed={}",
        user_id,
        report.sent.len(),
        report.not_found.len(),
        report.failed.len()
    );

    Ok(())
}
