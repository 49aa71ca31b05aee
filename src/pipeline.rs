//! The full lookup: fetch printings, read the deck, join and price it

use crate::config::{Currency, FetchConfig};
use crate::decklist::parse_deck_file;
use crate::error::ProxyResult;
use crate::output::write_price_table;
use crate::pricing::{build_price_table, PriceTable};
use crate::scryfall::fetch_all_printings;
use std::path::Path;

/// Inputs for one run
#[derive(Debug, Clone)]
pub struct ProxyLookup {
    pub fetch: FetchConfig,
    pub set_codes: Vec<String>,
    pub currency: Currency,
}

impl ProxyLookup {
    /// Fetch every configured set and price the decklist against it
    pub fn price_deck<P: AsRef<Path>>(&self, deck_path: P) -> ProxyResult<PriceTable> {
        log::info!(
            "Fetching {} sets from Scryfall: {}",
            self.set_codes.len(),
            self.set_codes.join(" ")
        );
        let printings = fetch_all_printings(&self.fetch, &self.set_codes)?;
        log::info!("Collected {} printings", printings.len());

        let deck = parse_deck_file(deck_path)?;
        Ok(build_price_table(&deck, &printings, self.currency))
    }

    /// Price the decklist and write the result to `output_path`
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        deck_path: P,
        output_path: Q,
    ) -> ProxyResult<PriceTable> {
        let table = self.price_deck(deck_path)?;
        write_price_table(output_path, &table)?;
        Ok(table)
    }
}
