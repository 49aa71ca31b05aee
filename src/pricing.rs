//! Joining deck cards against fetched printings and picking the cheapest set

use crate::config::Currency;
use crate::decklist::DeckEntry;
use crate::scryfall::CardPrinting;
use std::collections::HashMap;

/// One output row per deck entry
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub name: String,
    /// Sets the card was printed in, first-seen order, joined with ", "
    pub available_sets: String,
    /// Price per set, aligned with `PriceTable::sets`
    pub prices: Vec<Option<f64>>,
    pub cheapest_price: Option<f64>,
    pub cheapest_sets: Vec<String>,
}

impl ResultRow {
    /// Cheapest set codes joined with ", " (empty when no prices)
    pub fn cheapest_set(&self) -> String {
        self.cheapest_sets.join(", ")
    }
}

/// The annotated deck: price columns plus one row per deck entry
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    pub currency: Currency,
    /// Distinct set codes in first-seen order; one price column each
    pub sets: Vec<String>,
    pub rows: Vec<ResultRow>,
}

impl PriceTable {
    /// Column header for a set's price, e.g. `wc97_usd`
    pub fn price_column(&self, set: &str) -> String {
        format!("{}_{}", set, self.currency.code())
    }

    /// Full header row in output order
    pub fn headers(&self) -> Vec<String> {
        let mut headers = vec![
            "name".to_string(),
            "Cheapest_Price".to_string(),
            "Cheapest_Set".to_string(),
            "available sets".to_string(),
        ];
        headers.extend(self.sets.iter().map(|s| self.price_column(s)));
        headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Coerce a Scryfall price string to a number; anything non-numeric is missing
pub fn parse_price(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|p| p.is_finite())
}

/// Lowest price across the row and every set column holding it (ties kept, column order)
pub fn cheapest(sets: &[String], prices: &[Option<f64>]) -> (Option<f64>, Vec<String>) {
    let min = prices
        .iter()
        .flatten()
        .copied()
        .fold(None, |acc: Option<f64>, p| match acc {
            Some(m) if m <= p => Some(m),
            _ => Some(p),
        });

    let sets = match min {
        Some(m) => sets
            .iter()
            .zip(prices)
            .filter(|(_, p)| **p == Some(m))
            .map(|(s, _)| s.clone())
            .collect(),
        None => Vec::new(),
    };

    (min, sets)
}

/// Per-name index over the fetched printings
struct PrintingIndex {
    sets: Vec<String>,
    /// name -> sets containing it, first-seen order
    sets_by_name: HashMap<String, Vec<String>>,
    /// (name, set) -> lowest numeric price among that set's printings
    price_by_name_set: HashMap<(String, String), f64>,
}

impl PrintingIndex {
    fn build(printings: &[CardPrinting], currency: Currency) -> Self {
        let mut sets: Vec<String> = Vec::new();
        let mut sets_by_name: HashMap<String, Vec<String>> = HashMap::new();
        let mut price_by_name_set: HashMap<(String, String), f64> = HashMap::new();

        for printing in printings {
            if !sets.contains(&printing.set) {
                sets.push(printing.set.clone());
            }

            let name_sets = sets_by_name.entry(printing.name.clone()).or_default();
            if !name_sets.contains(&printing.set) {
                name_sets.push(printing.set.clone());
            }

            if let Some(price) = parse_price(printing.price(currency)) {
                price_by_name_set
                    .entry((printing.name.clone(), printing.set.clone()))
                    .and_modify(|p| *p = p.min(price))
                    .or_insert(price);
            }
        }

        Self {
            sets,
            sets_by_name,
            price_by_name_set,
        }
    }

    fn price(&self, name: &str, set: &str) -> Option<f64> {
        self.price_by_name_set
            .get(&(name.to_string(), set.to_string()))
            .copied()
    }
}

/// Annotate every deck entry with its available sets, per-set prices and cheapest set
pub fn build_price_table(
    deck: &[DeckEntry],
    printings: &[CardPrinting],
    currency: Currency,
) -> PriceTable {
    let index = PrintingIndex::build(printings, currency);

    let rows = deck
        .iter()
        .map(|entry| {
            let available_sets = index
                .sets_by_name
                .get(&entry.name)
                .map(|sets| sets.join(", "))
                .unwrap_or_default();

            let prices: Vec<Option<f64>> = index
                .sets
                .iter()
                .map(|set| index.price(&entry.name, set))
                .collect();

            let (cheapest_price, cheapest_sets) = cheapest(&index.sets, &prices);

            ResultRow {
                name: entry.name.clone(),
                available_sets,
                prices,
                cheapest_price,
                cheapest_sets,
            }
        })
        .collect();

    log::info!(
        "Priced {} deck cards against {} sets in {}",
        deck.len(),
        index.sets.len(),
        currency
    );

    PriceTable {
        currency,
        sets: index.sets,
        rows,
    }
}

#[cfg(test)]
#[path = "pricing_tests.rs"]
mod tests;
