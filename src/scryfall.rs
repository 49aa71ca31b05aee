//! Scryfall search client for collecting every printing in a set
//!
//! Uses blocking reqwest; the pipeline is strictly sequential.

use crate::config::{Currency, FetchConfig, USER_AGENT};
use crate::error::{ProxyError, ProxyResult};
use reqwest::blocking::Client;
use serde::Deserialize;

/// One page of a Scryfall `/cards/search` response
#[derive(Debug, Deserialize)]
pub struct SearchPage {
    /// False on the last page
    #[serde(default)]
    pub has_more: bool,
    /// Absolute URL of the following page, absent on the last one
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub data: Vec<ScryfallCard>,
}

/// Scryfall card object, reduced to what the price lookup needs
#[derive(Debug, Deserialize, Clone)]
pub struct ScryfallCard {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub set: String,
    #[serde(default)]
    pub prices: ScryfallPrices,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ScryfallPrices {
    pub eur: Option<String>,
    pub usd: Option<String>,
}

/// A single printing flattened to name, prices and set code
#[derive(Debug, Clone, PartialEq)]
pub struct CardPrinting {
    pub name: String,
    pub usd: Option<String>,
    pub eur: Option<String>,
    pub set: String,
}

impl CardPrinting {
    /// Raw price string for the given currency, as Scryfall reported it
    pub fn price(&self, currency: Currency) -> Option<&str> {
        match currency {
            Currency::Usd => self.usd.as_deref(),
            Currency::Eur => self.eur.as_deref(),
        }
    }
}

impl From<ScryfallCard> for CardPrinting {
    fn from(card: ScryfallCard) -> Self {
        CardPrinting {
            name: card.name,
            usd: card.prices.usd,
            eur: card.prices.eur,
            set: card.set,
        }
    }
}

/// Build the blocking client shared by every set of a run.
///
/// reqwest's blocking client times out after 30s unless told otherwise, so the
/// configured timeout (none by default) is always set explicitly.
pub fn build_client(config: &FetchConfig) -> ProxyResult<Client> {
    Ok(Client::builder().timeout(config.timeout).build()?)
}

/// Fetch every printing of a set, following `next_page` links until the last
/// page (`has_more` false or no `next_page`).
///
/// Any non-success status aborts the whole set; pages already read are
/// discarded.
pub fn fetch_set_from(
    client: &Client,
    config: &FetchConfig,
    set_code: &str,
) -> ProxyResult<Vec<ScryfallCard>> {
    let query = format!("set:{}", set_code.to_lowercase());

    let mut request = client
        .get(format!("{}/cards/search", config.base_url))
        .query(&[
            ("q", query.as_str()),
            ("order", "name"),
            ("unique", "prints"),
        ]);

    let mut cards = Vec::new();
    let mut page_number = 1;

    loop {
        log::debug!("Fetching {} page {} from Scryfall", set_code, page_number);

        let response = request
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .send()?;

        if !response.status().is_success() {
            return Err(ProxyError::HttpStatus(response.status()));
        }

        let body = response.text()?;
        let page: SearchPage = serde_json::from_str(&body)?;

        cards.extend(page.data);

        if !page.has_more {
            break;
        }

        match page.next_page.filter(|url| !url.is_empty()) {
            Some(next) => {
                if !config.request_delay.is_zero() {
                    std::thread::sleep(config.request_delay);
                }
                request = client.get(next);
                page_number += 1;
            }
            None => break,
        }
    }

    Ok(cards)
}

/// Fetch and flatten the printings of every set, in the order given.
///
/// A set that fails to fetch is logged and contributes nothing; only failing
/// to build the HTTP client is an error.
pub fn fetch_all_printings(
    config: &FetchConfig,
    set_codes: &[String],
) -> ProxyResult<Vec<CardPrinting>> {
    let client = build_client(config)?;
    let mut printings = Vec::new();

    for code in set_codes {
        match fetch_set_from(&client, config, code) {
            Ok(cards) => {
                log::info!("Fetched {} printings from set {}", cards.len(), code);
                printings.extend(cards.into_iter().map(CardPrinting::from));
            }
            Err(e) => {
                log::error!("Error fetching data for set {}: {}", code, e);
            }
        }
    }

    Ok(printings)
}

#[cfg(test)]
#[path = "scryfall_tests.rs"]
mod tests;
