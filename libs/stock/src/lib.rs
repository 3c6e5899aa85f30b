mod error;
mod lookup;
mod quote;
mod quote_client;
mod symbols;

pub mod format;
pub mod ticker;

pub use error::QuoteError;
pub use format::{FormattedQuote, Session, SessionQuote};
pub use lookup::{Lookup, lookup};
pub use quote::{MarketState, QuoteRecord};
pub use quote_client::{DEFAULT_BASE_API, DEFAULT_TIMEOUT, QuoteClient, QuoteProvider};
pub use symbols::SymbolTable;
pub use ticker::TickerExtractor;
