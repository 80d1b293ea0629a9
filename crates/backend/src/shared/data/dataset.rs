use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

use super::state_abbrev::state_abbrev;

/// Failure while loading the sales CSV
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Cannot open dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("Invalid {column} value {value:?} on line {line}")]
    InvalidNumber {
        column: &'static str,
        value: String,
        line: u64,
    },

    #[error("Unknown state {state:?} on line {line}")]
    UnknownState { state: String, line: u64 },
}

/// One sales transaction (order line)
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub state: String,
    /// Two-letter code derived from `state` at load time
    pub state_abbrev: &'static str,
    pub city: String,
    pub sub_category: String,
    pub segment: String,
    pub sales: f64,
    pub profit: f64,
}

/// Immutable in-memory sales table.
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Clone, Default)]
pub struct SalesDataset {
    records: Vec<SalesRecord>,
}

/// Normalise a CSV header the way the dashboard addresses columns:
/// spaces and hyphens become underscores, then lowercase.
///
/// `"Sub-Category"` → `"sub_category"`, `"Postal Code"` → `"postal_code"`
pub fn normalize_column_name(header: &str) -> String {
    header
        .trim()
        .trim_start_matches('\u{FEFF}')
        .replace([' ', '-'], "_")
        .to_lowercase()
}

/// Positions of the required columns in the header row
struct ColumnIndex {
    state: usize,
    city: usize,
    sub_category: usize,
    segment: usize,
    sales: usize,
    profit: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, DatasetError> {
        let names: Vec<String> = headers.iter().map(normalize_column_name).collect();
        let find = |column: &'static str| {
            names
                .iter()
                .position(|name| name == column)
                .ok_or(DatasetError::MissingColumn(column))
        };

        Ok(Self {
            state: find("state")?,
            city: find("city")?,
            sub_category: find("sub_category")?,
            segment: find("segment")?,
            sales: find("sales")?,
            profit: find("profit")?,
        })
    }
}

impl SalesDataset {
    pub fn from_records(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    /// Load the dataset from a CSV file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let dataset = Self::from_reader(file)?;
        tracing::info!(
            "Loaded {} sales records ({} states) from {}",
            dataset.len(),
            dataset.states().len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Parse CSV from any reader. The header row is required.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns = ColumnIndex::from_headers(reader.headers()?)?;
        let mut records = Vec::new();

        for result in reader.records() {
            let row = result?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            let field = |i: usize| row.get(i).unwrap_or_default();

            let state = field(columns.state).to_string();
            let abbrev = state_abbrev(&state).ok_or_else(|| DatasetError::UnknownState {
                state: state.clone(),
                line,
            })?;

            records.push(SalesRecord {
                state_abbrev: abbrev,
                state,
                city: field(columns.city).to_string(),
                sub_category: field(columns.sub_category).to_string(),
                segment: field(columns.segment).to_string(),
                sales: parse_amount(field(columns.sales), "sales", line)?,
                profit: parse_amount(field(columns.profit), "profit", line)?,
            });
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Unique states in first-encountered order
    pub fn states(&self) -> Vec<String> {
        unique_in_order(self.records.iter().map(|r| r.state.as_str()))
    }

    /// Unique sub-categories in first-encountered order
    pub fn products(&self) -> Vec<String> {
        unique_in_order(self.records.iter().map(|r| r.sub_category.as_str()))
    }

    pub fn has_state(&self, state: &str) -> bool {
        self.records.iter().any(|r| r.state == state)
    }

    pub fn has_product(&self, product: &str) -> bool {
        self.records.iter().any(|r| r.sub_category == product)
    }
}

fn parse_amount(value: &str, column: &'static str, line: u64) -> Result<f64, DatasetError> {
    value.parse::<f64>().map_err(|_| DatasetError::InvalidNumber {
        column,
        value: value.to_string(),
        line,
    })
}

/// Distinct values, keeping the position of their first occurrence
pub fn unique_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Superstore-shaped fixture shared by unit tests
#[cfg(test)]
pub(crate) fn sample_dataset() -> SalesDataset {
    const SAMPLE: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/superstore_sample.csv"
    ));
    SalesDataset::from_reader(SAMPLE.as_bytes()).expect("fixture parses")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name("Sub-Category"), "sub_category");
        assert_eq!(normalize_column_name("Postal Code"), "postal_code");
        assert_eq!(normalize_column_name("\u{FEFF}Ship Mode"), "ship_mode");
        assert_eq!(normalize_column_name(" Sales "), "sales");
    }

    #[test]
    fn test_sample_loads_with_abbreviations() {
        let dataset = sample_dataset();
        assert_eq!(dataset.len(), 32);

        let first = &dataset.records()[0];
        assert_eq!(first.state, "California");
        assert_eq!(first.state_abbrev, "CA");
        assert_eq!(first.city, "Los Angeles");
        assert_eq!(first.sub_category, "Bookcases");
        assert_eq!(first.segment, "Consumer");
        assert_eq!(first.sales, 261.96);
        assert_eq!(first.profit, 41.9136);
    }

    #[test]
    fn test_states_and_products_keep_first_order() {
        let dataset = sample_dataset();
        let states = dataset.states();
        assert_eq!(states[..3], ["California", "Kentucky", "Florida"]);
        assert_eq!(states.len(), 24);

        let products = dataset.products();
        assert_eq!(products[..3], ["Bookcases", "Chairs", "Phones"]);
    }

    #[test]
    fn test_missing_column() {
        let csv = "State,City,Segment,Sales,Profit\nTexas,Houston,Consumer,1,1\n";
        let err = SalesDataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn("sub_category")));
    }

    #[test]
    fn test_unknown_state_is_rejected() {
        let csv = "State,City,Sub-Category,Segment,Sales,Profit\nOntario,Toronto,Chairs,Consumer,1,1\n";
        let err = SalesDataset::from_reader(csv.as_bytes()).unwrap_err();
        match err {
            DatasetError::UnknownState { state, line } => {
                assert_eq!(state, "Ontario");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_number() {
        let csv = "State,City,Sub-Category,Segment,Sales,Profit\nTexas,Houston,Chairs,Consumer,abc,1\n";
        let err = SalesDataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InvalidNumber { column: "sales", .. }
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SalesDataset::load("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
