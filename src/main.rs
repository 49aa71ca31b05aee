//! Tournament Proxies
//!
//! Prices a decklist against World Championship and Collectors' Edition
//! printings and writes the result as CSV.

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tournament_proxies::config::{
    default_set_codes, Currency, FetchConfig, DEFAULT_OUTPUT_FILE,
};
use tournament_proxies::ProxyLookup;

/// Find the cheapest tournament proxy printing for every card in a deck
#[derive(Parser, Debug)]
#[command(name = "tournament_proxies")]
#[command(version, about, long_about = None)]
struct Args {
    /// Decklist file (.txt or .csv); prompted for when omitted
    #[arg(short, long)]
    deck: Option<PathBuf>,

    /// Currency to compare prices in; prompted for when omitted
    #[arg(short, long, value_enum)]
    currency: Option<Currency>,

    /// Where to write the annotated deck
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Set codes to search, comma separated (default: WC97-WC04, 30A, CEI, CED)
    #[arg(long, value_delimiter = ',')]
    sets: Option<Vec<String>>,
}

/// Print a prompt and read one trimmed line from stdin
fn prompt(message: &str) -> io::Result<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
    }
    Ok(line.trim().to_string())
}

/// Ask for a currency until a supported one is entered
fn prompt_currency() -> io::Result<Currency> {
    loop {
        let answer = prompt("Currency (USD or EUR): ")?;
        match Currency::parse(&answer) {
            Some(currency) => return Ok(currency),
            None => println!("Unsupported currency '{}'. Please enter USD or EUR.", answer),
        }
    }
}

fn main() {
    // Set RUST_LOG to control log level, e.g. RUST_LOG=tournament_proxies=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let deck_path = match args.deck {
        Some(path) => path,
        None => match prompt("Deck name (txt or csv only): ") {
            Ok(answer) => PathBuf::from(answer),
            Err(e) => {
                log::error!("Failed to read deck name: {}", e);
                std::process::exit(1);
            }
        },
    };

    let currency = match args.currency {
        Some(currency) => currency,
        None => match prompt_currency() {
            Ok(currency) => currency,
            Err(e) => {
                log::error!("Failed to read currency: {}", e);
                std::process::exit(1);
            }
        },
    };

    let lookup = ProxyLookup {
        fetch: FetchConfig::default(),
        set_codes: args.sets.unwrap_or_else(default_set_codes),
        currency,
    };

    if let Err(e) = lookup.run(&deck_path, &args.output) {
        log::error!("Failed to price deck {}: {}", deck_path.display(), e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    println!(
        "Deck with tournament proxy versions saved to {}.",
        args.output.display()
    );
}
