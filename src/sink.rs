/// Record sinks
///
/// A sink receives records in tick order. `CsvSink` writes the header on construction
/// and one row per record; inapplicable columns are written as empty tokens.
/// `VecSink` keeps records in memory.

use std::io::Write;

use crate::protocol::{CsvRow, Record, COLUMNS};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv write failure: {0}")]
    Csv(#[from] csv::Error),
}

pub type SinkResult<T> = Result<T, SinkError>;

pub trait RecordSink {
    fn write(&mut self, record: &Record) -> SinkResult<()>;

    /// Push any buffered output to the underlying destination
    fn flush(&mut self) -> SinkResult<()> {
        Ok(())
    }
}

/// CSV writer over any `Write`
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    rows: u64,
}

impl<W: Write> CsvSink<W> {
    /// Wrap `inner` and write the header row
    pub fn new(inner: W) -> SinkResult<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(inner);
        writer.write_record(COLUMNS)?;
        Ok(CsvSink { writer, rows: 0 })
    }

    /// Data rows written so far, header excluded
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(self) -> SinkResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| SinkError::Io(e.into_error()))
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write(&mut self, record: &Record) -> SinkResult<()> {
        let row = CsvRow::from(record);
        self.writer.write_record(row.to_fields())?;
        self.rows += 1;
        Ok(())
    }

    fn flush(&mut self) -> SinkResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// In-memory sink
#[derive(Debug, Clone, Default)]
pub struct VecSink {
    records: Vec<Record>,
}

impl VecSink {
    pub fn new() -> Self {
        VecSink::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl RecordSink for VecSink {
    fn write(&mut self, record: &Record) -> SinkResult<()> {
        self.records.push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Quote, Trade};

    fn quote() -> Record {
        Record::Quote(Quote {
            timestamp_ns: 1_000,
            symbol: "SYNTH".to_string(),
            bid_price: 99.99,
            bid_size: 4_200,
            ask_price: 100.01,
            ask_size: 1_000,
        })
    }

    fn trade() -> Record {
        Record::Trade(Trade {
            timestamp_ns: 2_000,
            symbol: "SYNTH".to_string(),
            price: 100.01,
            size: 15,
        })
    }

    #[test]
    fn test_header_only() {
        let sink = CsvSink::new(Vec::new()).unwrap();
        let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert_eq!(
            out,
            "TYPE,TIMESTAMP_NS,SYMBOL,PRICE,SIZE,BID_PRICE,BID_SIZE,ASK_PRICE,ASK_SIZE\n"
        );
    }

    #[test]
    fn test_csv_rows() {
        let mut sink = CsvSink::new(Vec::new()).unwrap();
        sink.write(&quote()).unwrap();
        sink.write(&trade()).unwrap();
        assert_eq!(sink.rows(), 2);

        let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "QUOTE,1000,SYNTH,,,99.99,4200,100.01,1000");
        assert_eq!(lines[2], "TRADE,2000,SYNTH,100.01,15,,,,");
    }

    #[test]
    fn test_vec_sink_keeps_order() {
        let mut sink = VecSink::new();
        sink.write(&quote()).unwrap();
        sink.write(&trade()).unwrap();
        let records = sink.into_records();
        assert_eq!(records, vec![quote(), trade()]);
    }
}
