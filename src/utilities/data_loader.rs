//! CSV candle loading for tests, benches and examples.

use crate::utilities::candle::Candle;
use csv::ReaderBuilder;
use std::error::Error;
use std::fs::File;
use std::path::Path;

/// Read candles from a headered CSV with columns
/// `timestamp,open,high,low,close,volume`, oldest row first.
pub fn read_candles_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Candle>, Box<dyn Error>> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

    let mut candles = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() < 6 {
            return Err(format!("expected 6 columns, got {}", record.len()).into());
        }
        candles.push(Candle {
            time: record[0].trim().parse()?,
            open: record[1].trim().parse()?,
            high: record[2].trim().parse()?,
            low: record[3].trim().parse()?,
            close: record[4].trim().parse()?,
            volume: record[5].trim().parse()?,
        });
    }

    if candles.is_empty() {
        return Err("no candles in file".into());
    }
    Ok(candles)
}
