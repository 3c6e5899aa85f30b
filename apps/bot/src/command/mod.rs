mod quote;

use crate::{Data, Error};

pub use quote::{as_ticker_text, quote};

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![quote()]
}
