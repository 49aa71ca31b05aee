//! CSV output of the annotated deck

use crate::error::ProxyResult;
use crate::pricing::PriceTable;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Render a price the way spreadsheet exports do: always at least one decimal
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p.fract() == 0.0 => format!("{:.1}", p),
        Some(p) => p.to_string(),
        None => String::new(),
    }
}

/// Write the table as CSV to any writer
pub fn write_price_table_to<W: Write>(writer: W, table: &PriceTable) -> ProxyResult<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(true).from_writer(writer);

    wtr.write_record(table.headers())?;

    for row in &table.rows {
        let mut record = vec![
            row.name.clone(),
            format_price(row.cheapest_price),
            row.cheapest_set(),
            row.available_sets.clone(),
        ];
        record.extend(row.prices.iter().map(|p| format_price(*p)));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the table to a CSV file, replacing any existing one
pub fn write_price_table<P: AsRef<Path>>(path: P, table: &PriceTable) -> ProxyResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_price_table_to(file, table)?;

    log::info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}
