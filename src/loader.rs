use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use chrono::NaiveDate;
use sha2::{Digest, Sha256};

use crate::error::{Result, SalesError};
use crate::filter::View;
use crate::models::{DateRange, Transaction};

/// Immutable, fully parsed transaction table.
#[derive(Debug)]
pub struct Dataset {
    source: PathBuf,
    content_key: String,
    rows: Vec<Transaction>,
    min_date: NaiveDate,
    max_date: NaiveDate,
}

impl Dataset {
    /// Parse a CSV stream. Fails on any malformed row and on an empty table.
    pub fn from_reader<R: Read>(reader: R, source: impl Into<PathBuf>) -> Result<Self> {
        let source = source.into();
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let rows = rdr
            .deserialize::<Transaction>()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Self::from_rows(rows, source, String::new())
    }

    fn from_rows(rows: Vec<Transaction>, source: PathBuf, content_key: String) -> Result<Self> {
        let (min_date, max_date) = match (
            rows.iter().map(|t| t.date).min(),
            rows.iter().map(|t| t.date).max(),
        ) {
            (Some(min), Some(max)) => (min, max),
            _ => return Err(SalesError::EmptyDataset(source)),
        };
        Ok(Self {
            source,
            content_key,
            rows,
            min_date,
            max_date,
        })
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn min_date(&self) -> NaiveDate {
        self.min_date
    }

    pub fn max_date(&self) -> NaiveDate {
        self.max_date
    }

    /// The widest selectable range: `[min(Date), max(Date)]`.
    pub fn full_range(&self) -> DateRange {
        DateRange {
            start: self.min_date,
            end: self.max_date,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// SHA-256 of the file bytes the table was parsed from. Empty for
    /// datasets built straight from a reader.
    pub fn content_key(&self) -> &str {
        &self.content_key
    }

    /// A view over every row, in file order.
    pub fn all(&self) -> View<'_> {
        View::new(self.rows.iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Process-wide cache
// ---------------------------------------------------------------------------

type Cache = Mutex<HashMap<String, Arc<Dataset>>>;

/// Initialised on first `load`; entries live until the process exits.
static CACHE: OnceLock<Cache> = OnceLock::new();

fn cache() -> &'static Cache {
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

fn content_key(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Load the dataset at `path`, parsing it at most once per distinct file
/// content. Later calls with unchanged content return the same `Arc`.
pub fn load(path: &Path) -> Result<Arc<Dataset>> {
    if !path.exists() {
        return Err(SalesError::DataFile(path.to_path_buf()));
    }
    let bytes = std::fs::read(path)?;
    let key = content_key(&bytes);

    let mut entries = cache().lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(dataset) = entries.get(&key) {
        tracing::debug!(key = %key, path = %path.display(), "dataset cache hit");
        return Ok(Arc::clone(dataset));
    }

    let mut parsed = Dataset::from_reader(bytes.as_slice(), path)?;
    parsed.content_key = key.clone();
    tracing::info!(
        rows = parsed.len(),
        from = %parsed.min_date,
        to = %parsed.max_date,
        "loaded {}",
        path.display()
    );
    let dataset = Arc::new(parsed);
    entries.insert(key, Arc::clone(&dataset));
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Test fixtures
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDate;

    use crate::models::{CustomerType, ProductLine, Transaction};

    pub const HEADER: &str = "Invoice ID,Branch,City,Customer type,Gender,Product line,Unit price,Quantity,Tax 5%,Total,Date,Time,Payment,cogs,gross margin percentage,gross income,Rating";

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// A consistent row: total = cogs + tax, gross income = tax.
    pub fn txn(date: NaiveDate, line: ProductLine, total: f64) -> Transaction {
        let cogs = total / 1.05;
        let tax = total - cogs;
        Transaction {
            date,
            branch: "A".to_string(),
            product_line: line,
            unit_price: cogs,
            quantity: 1,
            tax,
            total,
            cogs,
            gross_income: tax,
            customer_type: CustomerType::Member,
            payment_method: "Cash".to_string(),
            rating: 7.0,
        }
    }

    pub fn csv_row(t: &Transaction) -> String {
        format!(
            "000-00-0000,{},Yangon,{},Female,{},{},{},{},{},{},10:00,{},{},4.7619,{},{}",
            t.branch,
            t.customer_type,
            t.product_line,
            t.unit_price,
            t.quantity,
            t.tax,
            t.total,
            t.date.format("%-m/%-d/%Y"),
            t.payment_method,
            t.cogs,
            t.gross_income,
            t.rating
        )
    }

    pub fn csv_text(rows: &[Transaction]) -> String {
        let mut out = String::from(HEADER);
        out.push('\n');
        for r in rows {
            out.push_str(&csv_row(r));
            out.push('\n');
        }
        out
    }
}
