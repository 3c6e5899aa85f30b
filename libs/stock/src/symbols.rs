use std::collections::HashMap;

// Tickers the provider only knows under another name.
const SPECIAL_TICKERS: &[(&str, &str)] = &[
    // Cryptocurrencies
    ("BTC", "BTC-USD"),
    ("ETH", "ETH-USD"),
    ("XRP", "XRP-USD"),
    ("LTC", "LTC-USD"),
    ("DOGE", "DOGE-USD"),
    // Canadian currency pairs
    ("CAD", "CADUSD=X"),
    ("USD", "CAD=X"),
];

// Exchange code -> provider symbol suffix.
const MARKET_SUFFIXES: &[(&str, &str)] = &[
    // North America
    ("TSX", ".TO"),
    ("TSE", ".TO"),
    ("CVE", ".V"),
    // Asia Pacific
    ("AU", ".AX"),
    ("ASX", ".AX"),
    ("HK", ".HK"),
    ("HKG", ".HK"),
    ("NZ", ".NZ"),
    ("NZE", ".NZ"),
    // Europe
    ("VI", ".VI"),
    ("WBAG", ".VI"),
    ("BT", ".BR"),
    ("EBR", ".BR"),
    ("FR", ".PA"),
    ("EPA", ".PA"),
    ("BE", ".BE"),
    ("BER", ".BE"),
    ("ETR", ".DE"),
    ("FF", ".F"),
    ("FRA", ".F"),
    ("ST", ".SG"),
    ("STU", ".SG"),
    ("DB", ".IR"),
    ("ISE", ".IR"),
    ("MI", ".MI"),
    ("BIT", ".MI"),
    ("AE", ".AS"),
    ("AMS", ".AS"),
    ("OS", ".OL"),
    ("OSL", ".OL"),
    ("LB", ".LS"),
    ("ELI", ".LS"),
    ("MD", ".MA"),
    ("MCE", ".MA"),
    ("EB", ".VX"),
    ("VTX", ".VX"),
    ("LN", ".L"),
    ("LON", ".L"),
    // Middle East
    ("TV", ".TA"),
    ("TLV", ".TA"),
];

#[derive(Debug, Clone)]
pub struct SymbolTable {
    special: HashMap<String, String>,
    markets: HashMap<String, String>,
}

impl SymbolTable {
    /// Build a table from explicit maps. Keys are expected in upper case.
    pub fn new(special: HashMap<String, String>, markets: HashMap<String, String>) -> Self {
        Self { special, markets }
    }

    pub fn standard() -> Self {
        Self::new(to_map(SPECIAL_TICKERS), to_map(MARKET_SUFFIXES))
    }

    pub fn special(&self, ticker: &str) -> Option<&str> {
        self.special.get(ticker).map(String::as_str)
    }

    pub fn market_suffix(&self, market: &str) -> Option<&str> {
        self.markets.get(market).map(String::as_str)
    }

    // Unknown markets drop the prefix and add no suffix.
    pub fn resolve(&self, ticker: &str) -> String {
        if let Some(symbol) = self.special(ticker) {
            return symbol.to_string();
        }

        if let Some((market, rest)) = ticker.split_once(':')
            && !market.is_empty()
            && !rest.is_empty()
        {
            let suffix = self.market_suffix(market).unwrap_or_default();
            return format!("{rest}{suffix}");
        }

        ticker.to_string()
    }
}

fn to_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::standard()
    }
}
