use serenity::all::{CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter, Timestamp};
use stock::{FormattedQuote, SessionQuote};

pub const GREEN: u32 = 0x00FF00;
pub const RED: u32 = 0xFF0000;
pub const FOOTER: &str = "Via Yahoo! Finance. Delayed 15 min";

/// Platform-neutral embed content.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedParts {
    pub author: String,
    pub color: u32,
    pub fields: Vec<(String, String)>,
    pub footer: &'static str,
    pub timestamp: Option<i64>,
}

fn price_line(currency: &str, price: &str, glyph: &str, change: &str, percent: &str) -> String {
    format!("{currency}{price} {glyph}{change} ({glyph}{percent}%)")
}

fn session_field(quote: &FormattedQuote, session: &SessionQuote) -> (String, String) {
    (
        session.session.label().to_string(),
        price_line(
            &quote.currency,
            &session.price,
            session.sign_glyph(),
            &session.change,
            &session.change_percent,
        ),
    )
}

pub fn embed_parts(quote: &FormattedQuote) -> EmbedParts {
    let headline = price_line(
        &quote.currency,
        &quote.price,
        quote.sign_glyph(),
        &quote.change,
        &quote.change_percent,
    );
    let details = format!(
        "High: {}, Low: {}, Prev: {}\nCap: {}, Volume: {}",
        quote.high, quote.low, quote.prev, quote.market_cap, quote.volume
    );

    let mut fields = vec![(headline, details)];
    if let Some(session) = &quote.session {
        fields.push(session_field(quote, session));
    }

    EmbedParts {
        author: format!("{} ({})", quote.name, quote.symbol),
        color: if quote.sign { GREEN } else { RED },
        fields,
        footer: FOOTER,
        timestamp: quote.timestamp.map(|t| t.timestamp()),
    }
}

pub fn to_embed(quote: &FormattedQuote) -> CreateEmbed {
    let parts = embed_parts(quote);

    let mut embed = CreateEmbed::default()
        .author(CreateEmbedAuthor::new(parts.author))
        .color(parts.color)
        .footer(CreateEmbedFooter::new(parts.footer));

    for (name, value) in parts.fields {
        embed = embed.field(name, value, false);
    }

    if let Some(ts) = parts
        .timestamp
        .and_then(|secs| Timestamp::from_unix_timestamp(secs).ok())
    {
        embed = embed.timestamp(ts);
    }

    embed
}
