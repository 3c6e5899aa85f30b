use std::sync::LazyLock;

use regex::Regex;

use crate::symbols::SymbolTable;

// `$` followed by MARKET:digits, a run of symbol characters, or digits.suffix.
// Alternation is leftmost-first, so the market form wins when it matches.
#[allow(clippy::expect_used)]
static TICKER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$((?:[A-Za-z]{2,3}:[0-9]+)|(?:[A-Za-z0-9=.\-^:]+)|(?:[0-9]+\.[A-Za-z]{2,}))")
        .expect("ticker regex is valid")
});

#[derive(Debug, Clone, Default)]
pub struct TickerExtractor {
    table: SymbolTable,
}

impl TickerExtractor {
    pub fn new(table: SymbolTable) -> Self {
        Self { table }
    }

    /// Repeated mentions are kept, one entry per occurrence.
    pub fn extract(&self, text: &str) -> Vec<String> {
        candidates(text)
            .filter(|candidate| is_valid(candidate))
            .map(|candidate| self.table.resolve(&candidate.to_ascii_uppercase()))
            .collect()
    }
}

fn candidates(text: &str) -> impl Iterator<Item = &str> {
    TICKER_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
}

// Digit-led tokens need an exchange suffix such as `.HK`.
fn is_valid(candidate: &str) -> bool {
    if !candidate.chars().any(|c| c.is_ascii_alphabetic()) {
        return false;
    }

    if candidate.starts_with(|c: char| c.is_ascii_digit()) {
        return has_letter_suffix(candidate);
    }

    true
}

fn has_letter_suffix(candidate: &str) -> bool {
    candidate.split('.').skip(1).any(|part| {
        part.chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .count()
            >= 2
    })
}
