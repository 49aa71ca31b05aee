//! Defaults for the proxy lookup: which sets to search, where, and how to
//! name the output.

use std::fmt;
use std::time::Duration;

/// Scryfall API root
pub const SCRYFALL_BASE_URL: &str = "https://api.scryfall.com";

/// Sent with every Scryfall request
pub const USER_AGENT: &str = "D2D-Automations-TournamentProxies/1.0";

/// Default output file name
pub const DEFAULT_OUTPUT_FILE: &str = "deck_with_versions.csv";

/// Historic tournament sets searched by default: the World Championship decks,
/// 30th Anniversary Edition, and the two Collectors' Editions.
pub const DEFAULT_SET_CODES: &[&str] = &[
    "WC97", "WC98", "WC99", "WC00", "WC01", "WC02", "WC03", "WC04", "30A", "CEI", "CED",
];

/// Pause between consecutive Scryfall requests (they ask for 50-100ms)
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(100);

/// Currency whose price column is joined onto the deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Currency {
    Usd,
    Eur,
}

impl Currency {
    /// Lowercase code as used in Scryfall's `prices` object and column names
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "usd",
            Currency::Eur => "eur",
        }
    }

    /// Parse a currency code, case-insensitive ("USD", "eur", " Usd ")
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "usd" => Some(Currency::Usd),
            "eur" => Some(Currency::Eur),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Settings for the Scryfall fetcher
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    pub request_delay: Duration,
    /// Per-request timeout; `None` waits as long as the server takes
    pub timeout: Option<Duration>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: SCRYFALL_BASE_URL.to_string(),
            request_delay: DEFAULT_REQUEST_DELAY,
            timeout: None,
        }
    }
}

impl FetchConfig {
    /// Config pointing at another host (mock servers in tests), with no delay
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_delay: Duration::ZERO,
            timeout: None,
        }
    }
}

/// Returns the default set codes as owned strings
pub fn default_set_codes() -> Vec<String> {
    DEFAULT_SET_CODES.iter().map(|s| s.to_string()).collect()
}
