use std::sync::Arc;

use stock::{QuoteClient, TickerExtractor};

pub mod command;
pub mod config;
pub mod health;
pub mod logging;
pub mod render;
pub mod reply;

pub struct Data {
    pub extractor: Arc<TickerExtractor>,
    pub quote_client: Arc<QuoteClient>,
}

pub type Error = anyhow::Error;
pub type Context<'a> = poise::Context<'a, Data, Error>;
