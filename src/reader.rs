/// Tick file reader
///
/// Parses rows produced by `CsvSink` back into records. The header row is skipped.
/// Quote rows need all nine columns; trade rows need at least the first five, so
/// files with the empty book columns trimmed off still load.

use std::io::Read;

use crate::protocol::{CsvRow, Quote, Record, RecordType, Trade, COLUMN_COUNT};
use thiserror::Error;

const TRADE_MIN_FIELDS: usize = 5;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("line {line}: unknown record type '{tag}'")]
    UnknownType { line: u64, tag: String },

    #[error("line {line}: expected at least {need} fields, found {have}")]
    MissingFields { line: u64, need: usize, have: usize },

    #[error("line {line}: invalid {column} value '{value}'")]
    InvalidField {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("csv read failure: {0}")]
    Csv(#[from] csv::Error),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Parse one data row. `line` is only used for error reporting.
pub fn parse_row(fields: &csv::StringRecord, line: u64) -> ParseResult<Record> {
    let tag = fields.get(0).unwrap_or_default();
    let record_type = RecordType::from_tag(tag).ok_or_else(|| ParseError::UnknownType {
        line,
        tag: tag.to_string(),
    })?;

    let need = match record_type {
        RecordType::Quote => COLUMN_COUNT,
        RecordType::Trade => TRADE_MIN_FIELDS,
    };
    if fields.len() < need {
        return Err(ParseError::MissingFields {
            line,
            need,
            have: fields.len(),
        });
    }

    let field = |idx: usize| fields.get(idx).unwrap_or_default();
    let timestamp_ns: u64 = parse_field(field(1), "TIMESTAMP_NS", line)?;
    let symbol = field(2).to_string();

    let record = match record_type {
        RecordType::Quote => Record::Quote(Quote {
            timestamp_ns,
            symbol,
            bid_price: parse_field(field(5), "BID_PRICE", line)?,
            bid_size: parse_field(field(6), "BID_SIZE", line)?,
            ask_price: parse_field(field(7), "ASK_PRICE", line)?,
            ask_size: parse_field(field(8), "ASK_SIZE", line)?,
        }),
        RecordType::Trade => Record::Trade(Trade {
            timestamp_ns,
            symbol,
            price: parse_field(field(3), "PRICE", line)?,
            size: parse_field(field(4), "SIZE", line)?,
        }),
    };

    Ok(record)
}

fn parse_field<T: std::str::FromStr>(value: &str, column: &'static str, line: u64) -> ParseResult<T> {
    value.trim().parse().map_err(|_| ParseError::InvalidField {
        line,
        column,
        value: value.to_string(),
    })
}

/// Read a stream of rows, calling `callback` for each record.
/// Stops early if the callback returns false. Returns the number of records delivered.
pub fn read_stream<R, F>(input: R, mut callback: F) -> ParseResult<usize>
where
    R: Read,
    F: FnMut(Record) -> bool,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let mut count = 0;
    for row in reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let record = parse_row(&row, line)?;
        if !callback(record) {
            break;
        }
        count += 1;
    }

    Ok(count)
}

/// Read every record from `input`
pub fn read_records<R: Read>(input: R) -> ParseResult<Vec<Record>> {
    let mut records = Vec::new();
    read_stream(input, |record| {
        records.push(record);
        true
    })?;
    Ok(records)
}

/// Flat row view of every record, absent columns as `None`
pub fn read_rows<R: Read>(input: R) -> ParseResult<Vec<CsvRow>> {
    Ok(read_records(input)?.iter().map(CsvRow::from).collect())
}
