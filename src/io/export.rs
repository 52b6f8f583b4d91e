//! CSV export of transaction history.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use thiserror::Error;

use crate::ledger::types::{Transaction, TransactionKind, parse_timestamp};

/// Column header for exported history.
pub const HEADER: [&str; 5] = ["id", "type", "points", "kwh", "date"];

/// Default file name offered for downloads.
pub const DEFAULT_FILE_NAME: &str = "energy-credit-history.csv";

/// Failure while writing or reading exported history.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("unexpected header \"{found}\", expected \"{}\"", HEADER.join(","))]
    Header { found: String },

    #[error("row {row}: {reason}")]
    Row { row: usize, reason: String },
}

/// Writes `transactions` as CSV to any writer.
///
/// One header row followed by one row per transaction, in the given order.
/// Fields are comma-joined without quoting; every field is numeric, an enum
/// wire name, or a date, none of which contain commas.
///
/// # Errors
///
/// Returns an `ExportError` if writing fails.
pub fn write_history<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    writer: impl Write,
) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(HEADER)?;
    for tx in transactions {
        wtr.write_record(&[
            tx.id.to_string(),
            tx.kind.as_str().to_string(),
            tx.points_delta.to_string(),
            tx.energy_delta_kwh.to_string(),
            tx.date(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Renders `transactions` as a CSV string.
///
/// # Errors
///
/// Returns an `ExportError` if encoding fails.
pub fn history_csv<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_history(transactions, &mut buf)?;
    String::from_utf8(buf)
        .map_err(|e| ExportError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Exports `transactions` to a CSV file at `path`.
///
/// # Errors
///
/// Returns an `ExportError` if file creation or writing fails.
pub fn export_history<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    path: &Path,
) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_history(transactions, io::BufWriter::new(file))
}

/// Parses CSV produced by [`write_history`] back into transactions.
///
/// # Errors
///
/// Returns an `ExportError` if the header differs or any row is malformed.
pub fn read_history(reader: impl Read) -> Result<Vec<Transaction>, ExportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .quoting(false)
        .from_reader(reader);

    let headers = rdr.headers()?;
    if headers.iter().ne(HEADER) {
        return Err(ExportError::Header {
            found: headers.iter().collect::<Vec<_>>().join(","),
        });
    }

    let mut out = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let row = i + 1;
        let bad = |reason: String| ExportError::Row { row, reason };

        let field = |idx: usize| record.get(idx).unwrap_or_default();
        let id = field(0)
            .parse::<u64>()
            .map_err(|e| bad(format!("id \"{}\": {e}", field(0))))?;
        let kind = TransactionKind::from_wire(field(1))
            .ok_or_else(|| bad(format!("unknown type \"{}\"", field(1))))?;
        let points_delta = field(2)
            .parse::<i64>()
            .map_err(|e| bad(format!("points \"{}\": {e}", field(2))))?;
        let energy_delta_kwh = field(3)
            .parse::<f64>()
            .map_err(|e| bad(format!("kwh \"{}\": {e}", field(3))))?;
        let timestamp =
            parse_timestamp(field(4)).map_err(|e| bad(format!("date \"{}\": {e}", field(4))))?;

        out.push(Transaction {
            id,
            kind,
            points_delta,
            energy_delta_kwh,
            timestamp,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Transaction> {
        let at = |s| parse_timestamp(s).expect("valid timestamp");
        vec![
            Transaction::sell(1, 8.0, 200, at("2025-09-28 09:12")),
            Transaction::sell(2, 20.0, 500, at("2025-09-26 18:40")),
            Transaction::buy(3, 100, 4.0, at("2025-09-21 07:55")),
        ]
    }

    #[test]
    fn header_row_matches_schema() {
        let csv = history_csv(&sample()).expect("export ok");
        assert_eq!(csv.lines().next(), Some("id,type,points,kwh,date"));
    }

    #[test]
    fn rows_are_plain_comma_joined() {
        let csv = history_csv(&sample()).expect("export ok");
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "1,sell,200,8,2025-09-28 09:12:00");
        assert_eq!(lines[3], "3,buy,-100,-4,2025-09-21 07:55:00");
    }

    #[test]
    fn empty_history_exports_header_only() {
        let csv = history_csv(std::iter::empty()).expect("export ok");
        assert_eq!(csv, "id,type,points,kwh,date\n");
    }

    #[test]
    fn fractional_kwh_survive_read_back() {
        let at = parse_timestamp("2025-10-01 10:00:00").expect("valid timestamp");
        let txs = vec![Transaction::buy(9, 101, 4.04, at), Transaction::sell(8, 0.1, 3, at)];
        let csv = history_csv(&txs).expect("export ok");
        let back = read_history(csv.as_bytes()).expect("parse ok");
        assert_eq!(back, txs);
    }

    #[test]
    fn read_rejects_wrong_header() {
        let err = read_history("a,b,c,d,e\n".as_bytes());
        assert!(matches!(err, Err(ExportError::Header { .. })));
    }

    #[test]
    fn read_rejects_unknown_type() {
        let input = "id,type,points,kwh,date\n1,gift,5,1,2025-09-28 09:12:00\n";
        let err = read_history(input.as_bytes());
        assert!(matches!(err, Err(ExportError::Row { row: 1, .. })));
    }

    #[test]
    fn export_writes_file() {
        let path = std::env::temp_dir().join(format!(
            "energy-credits-export-{}.csv",
            std::process::id()
        ));
        export_history(&sample(), &path).expect("write ok");
        let text = std::fs::read_to_string(&path).expect("read ok");
        let _ = std::fs::remove_file(&path);
        assert_eq!(text.lines().count(), 4);
    }
}
