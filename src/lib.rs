//! Tournament Proxies - MTG decklist pricing against historic tournament printings
//!
//! Looks up every card of a decklist in the World Championship decks and the
//! Collectors' Editions on Scryfall and reports the cheapest set per card.

pub mod config;
pub mod decklist;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod pricing;
pub mod scryfall;

// Re-export commonly used items
pub use config::{Currency, FetchConfig};
pub use decklist::{parse_deck_file, DeckEntry};
pub use error::{ProxyError, ProxyResult};
pub use output::{write_price_table, write_price_table_to};
pub use pipeline::ProxyLookup;
pub use pricing::{build_price_table, PriceTable, ResultRow};
pub use scryfall::{build_client, fetch_all_printings, fetch_set_from, CardPrinting, ScryfallCard};
