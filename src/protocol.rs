/// Record model for synthetic tick files
///
/// One row per tick, fixed column layout:
///   TYPE, TIMESTAMP_NS, SYMBOL, PRICE, SIZE, BID_PRICE, BID_SIZE, ASK_PRICE, ASK_SIZE
///
/// Quote rows leave PRICE/SIZE empty, trade rows leave the four book columns empty.
/// Prices are carried as f64 rounded to cents and written with two decimals.

pub const COLUMN_COUNT: usize = 9;

pub const COLUMNS: [&str; COLUMN_COUNT] = [
    "TYPE",
    "TIMESTAMP_NS",
    "SYMBOL",
    "PRICE",
    "SIZE",
    "BID_PRICE",
    "BID_SIZE",
    "ASK_PRICE",
    "ASK_SIZE",
];

/// Price decimals kept by every price field
pub const PRICE_DECIMALS: usize = 2;

const CENTS: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    Quote,
    Trade,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Quote => "QUOTE",
            RecordType::Trade => "TRADE",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "QUOTE" => Some(RecordType::Quote),
            "TRADE" => Some(RecordType::Trade),
            _ => None,
        }
    }
}

/// Top-of-book update
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub timestamp_ns: u64,
    pub symbol: String,
    pub bid_price: f64,
    pub bid_size: u32,
    pub ask_price: f64,
    pub ask_size: u32,
}

/// Trade print at the prevailing bid or ask
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub timestamp_ns: u64,
    pub symbol: String,
    pub price: f64,
    pub size: u32,
}

/// Unit handed to a sink, one per tick
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Quote(Quote),
    Trade(Trade),
}

impl Record {
    pub fn timestamp_ns(&self) -> u64 {
        match self {
            Record::Quote(q) => q.timestamp_ns,
            Record::Trade(t) => t.timestamp_ns,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Record::Quote(q) => &q.symbol,
            Record::Trade(t) => &t.symbol,
        }
    }

    pub fn record_type(&self) -> RecordType {
        match self {
            Record::Quote(_) => RecordType::Quote,
            Record::Trade(_) => RecordType::Trade,
        }
    }
}

/// Flat row view of a record. Columns that do not apply to the record type are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    pub record_type: RecordType,
    pub timestamp_ns: u64,
    pub symbol: String,
    pub price: Option<f64>,
    pub size: Option<u32>,
    pub bid_price: Option<f64>,
    pub bid_size: Option<u32>,
    pub ask_price: Option<f64>,
    pub ask_size: Option<u32>,
}

impl CsvRow {
    /// Render the row as text fields in column order; absent fields become empty tokens
    pub fn to_fields(&self) -> [String; COLUMN_COUNT] {
        [
            self.record_type.as_str().to_string(),
            self.timestamp_ns.to_string(),
            self.symbol.clone(),
            self.price.map(format_price).unwrap_or_default(),
            self.size.map(|s| s.to_string()).unwrap_or_default(),
            self.bid_price.map(format_price).unwrap_or_default(),
            self.bid_size.map(|s| s.to_string()).unwrap_or_default(),
            self.ask_price.map(format_price).unwrap_or_default(),
            self.ask_size.map(|s| s.to_string()).unwrap_or_default(),
        ]
    }
}

impl From<&Record> for CsvRow {
    fn from(record: &Record) -> Self {
        match record {
            Record::Quote(q) => CsvRow {
                record_type: RecordType::Quote,
                timestamp_ns: q.timestamp_ns,
                symbol: q.symbol.clone(),
                price: None,
                size: None,
                bid_price: Some(q.bid_price),
                bid_size: Some(q.bid_size),
                ask_price: Some(q.ask_price),
                ask_size: Some(q.ask_size),
            },
            Record::Trade(t) => CsvRow {
                record_type: RecordType::Trade,
                timestamp_ns: t.timestamp_ns,
                symbol: t.symbol.clone(),
                price: Some(t.price),
                size: Some(t.size),
                bid_price: None,
                bid_size: None,
                ask_price: None,
                ask_size: None,
            },
        }
    }
}

/// Round a price to whole cents
pub fn round_price(price: f64) -> f64 {
    (price * CENTS).round() / CENTS
}

/// Convert price to integer cents
pub fn price_to_cents(price: f64) -> i64 {
    (price * CENTS).round() as i64
}

/// Convert integer cents to price
pub fn price_from_cents(cents: i64) -> f64 {
    cents as f64 / CENTS
}

pub fn format_price(price: f64) -> String {
    format!("{:.*}", PRICE_DECIMALS, price)
}
