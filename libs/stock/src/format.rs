use chrono::{DateTime, Utc};

use crate::quote::{MarketState, QuoteRecord};

pub const NOT_AVAILABLE: &str = "N/A";

/// Two decimals, or scientific notation for tiny non-zero values.
pub fn round(value: Option<f64>) -> String {
    match value {
        Some(v) if v == 0.0 => "0.00".to_string(),
        Some(v) if v.is_finite() && v.abs() < 0.01 => format!("{v:.2e}"),
        Some(v) if v.is_finite() => format!("{v:.2}"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Abbreviates large magnitudes with `K`, `M`, `B` or `T`.
///
/// Thresholds are strict, so exactly 1000 stays `1000.00`.
pub fn short_form(value: f64) -> String {
    let log = value.log10();

    let (scaled, suffix) = if log > 12.0 {
        (value / 1e12, "T")
    } else if log > 9.0 {
        (value / 1e9, "B")
    } else if log > 6.0 {
        (value / 1e6, "M")
    } else if log > 3.0 {
        (value / 1e3, "K")
    } else {
        (value, "")
    };

    format!("{}{suffix}", round(Some(scaled)))
}

fn volume_label(volume: Option<f64>) -> String {
    match volume {
        Some(v) if v >= 1.0 => short_form(v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn market_cap_label(cap: Option<f64>) -> String {
    match cap {
        Some(c) if c > 0.0 => short_form(c),
        _ => NOT_AVAILABLE.to_string(),
    }
}

// Some currencies report their code as the symbol, e.g. "CAD"/"CAD".
fn currency_label(code: Option<&str>, glyph: Option<&str>) -> String {
    let code = code.unwrap_or_default();
    match glyph {
        Some(glyph) if glyph != code => format!("{code}{glyph}"),
        _ => code.to_string(),
    }
}

// Currencies have no long name; stocks prefer it.
fn display_name(record: &QuoteRecord) -> String {
    [&record.long_name, &record.short_name]
        .into_iter()
        .flatten()
        .find(|name| !name.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| record.symbol.clone())
}

fn is_positive(change: Option<f64>) -> bool {
    matches!(change, Some(c) if c >= 0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Session {
    PreMarket,
    PostMarket,
}

impl Session {
    pub fn label(&self) -> &'static str {
        match self {
            Session::PreMarket => "PreMkt",
            Session::PostMarket => "PostMkt",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionQuote {
    pub session: Session,
    pub sign: bool,
    pub price: String,
    pub change: String,
    pub change_percent: String,
}

impl SessionQuote {
    fn new(session: Session, price: f64, change: Option<f64>, percent: Option<f64>) -> Self {
        Self {
            session,
            sign: is_positive(change),
            price: round(Some(price)),
            change: round(change),
            change_percent: round(percent),
        }
    }

    pub fn from_record(record: &QuoteRecord) -> Option<Self> {
        match record.market_state? {
            MarketState::Regular => None,
            MarketState::Pre => Some(Self::new(
                Session::PreMarket,
                record.pre_market_price?,
                record.pre_market_change,
                record.pre_market_change_percent,
            )),
            _ => Some(Self::new(
                Session::PostMarket,
                record.post_market_price?,
                record.post_market_change,
                record.post_market_change_percent,
            )),
        }
    }

    pub fn sign_glyph(&self) -> &'static str {
        if self.sign { "+" } else { "" }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormattedQuote {
    pub symbol: String,
    pub name: String,
    pub currency: String,
    pub sign: bool,
    pub price: String,
    pub change: String,
    pub change_percent: String,
    pub high: String,
    pub low: String,
    pub prev: String,
    pub volume: String,
    pub market_cap: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub session: Option<SessionQuote>,
}

impl FormattedQuote {
    pub fn new(record: &QuoteRecord) -> Self {
        Self {
            symbol: record.symbol.clone(),
            name: display_name(record),
            currency: currency_label(
                record.currency.as_deref(),
                record.currency_symbol.as_deref(),
            ),
            sign: is_positive(record.regular_market_change),
            price: round(record.regular_market_price),
            change: round(record.regular_market_change),
            change_percent: round(record.regular_market_change_percent),
            high: round(record.regular_market_day_high),
            low: round(record.regular_market_day_low),
            prev: round(record.regular_market_previous_close),
            volume: volume_label(record.regular_market_volume),
            market_cap: market_cap_label(record.market_cap),
            timestamp: record.regular_market_time,
            session: SessionQuote::from_record(record),
        }
    }

    // Losses already carry their minus sign.
    pub fn sign_glyph(&self) -> &'static str {
        if self.sign { "+" } else { "" }
    }
}
