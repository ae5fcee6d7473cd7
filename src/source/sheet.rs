use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::{debug, info};

use crate::aggregate::coerce_count;
use crate::config::PetCountConfig;
use crate::error::{Result, StatsError};
use crate::types::PetCountRow;

/// Untyped rows read from a spreadsheet; the first row supplies the headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers = headers
            .into_iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();
        Self { headers, rows }
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    fn require(&self, name: &str) -> Result<usize> {
        self.column(name)
            .ok_or_else(|| StatsError::missing_column(name, "source table"))
    }
}

/// A spreadsheet format that can be loaded into a [`RawTable`]
pub trait TableSource {
    fn format_name(&self) -> &'static str;
    fn read_table(&self, path: &Path) -> Result<RawTable>;
}

/// Excel and OpenDocument workbooks; only the first worksheet is read
pub struct WorkbookSource;

impl TableSource for WorkbookSource {
    fn format_name(&self) -> &'static str {
        "workbook"
    }

    fn read_table(&self, path: &Path) -> Result<RawTable> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| StatsError::Schema(format!("workbook '{}' has no worksheets", path.display())))??;

        let mut rows = range.rows().map(|row| row.iter().map(cell_text).collect::<Vec<String>>());
        let headers = rows.next().unwrap_or_default();
        Ok(RawTable::new(headers, rows.collect()))
    }
}

pub struct CsvSource;

impl TableSource for CsvSource {
    fn format_name(&self) -> &'static str {
        "csv"
    }

    fn read_table(&self, path: &Path) -> Result<RawTable> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(RawTable::new(headers, rows))
    }
}

fn source_for_path(path: &Path) -> Result<Box<dyn TableSource>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Box::new(WorkbookSource)),
        "csv" => Ok(Box::new(CsvSource)),
        other => Err(StatsError::UnsupportedFormat(format!(
            "cannot read '{}' (extension '{}')",
            path.display(),
            other
        ))),
    }
}

/// Read the table at `path`, picking the reader from the file extension.
pub fn open_table(path: &Path) -> Result<RawTable> {
    let source = source_for_path(path)?;
    let table = source.read_table(path)?;
    info!(
        path = %path.display(),
        format = source.format_name(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "loaded source table"
    );
    Ok(table)
}

// Whole floats lose their ".0" so "1234.0" coerces the same way as "1234"
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        // Floats outside the i64 range keep their float text; the count parser rejects it
        Data::Float(f) if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 => {
            format!("{}", *f as i64)
        }
        other => other.to_string(),
    }
}

/// Column positions of the pet registration fields, resolved once at load time.
#[derive(Debug, Clone, Copy)]
pub struct PetCountSchema {
    species: usize,
    count: usize,
    region: Option<usize>,
    breed: Option<usize>,
}

impl PetCountSchema {
    /// Species and count columns only, for per-species totals.
    pub fn for_totals(table: &RawTable, config: &PetCountConfig) -> Result<Self> {
        Ok(Self {
            species: table.require(&config.species_column)?,
            count: table.require(&config.count_column)?,
            region: None,
            breed: None,
        })
    }

    /// All four columns, for the district by breed breakdown.
    pub fn for_breakdown(table: &RawTable, config: &PetCountConfig) -> Result<Self> {
        Ok(Self {
            species: table.require(&config.species_column)?,
            count: table.require(&config.count_column)?,
            region: Some(table.require(&config.region_column)?),
            breed: Some(table.require(&config.breed_column)?),
        })
    }

    fn row(&self, cells: &[String]) -> PetCountRow {
        let text = |idx: Option<usize>| {
            idx.and_then(|i| cells.get(i))
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };
        PetCountRow {
            species: text(Some(self.species)),
            region: text(self.region),
            breed: text(self.breed),
            count: coerce_count(cells.get(self.count).map(String::as_str)),
        }
    }
}

/// Convert every raw row into a typed [`PetCountRow`].
pub fn load_pet_counts(table: &RawTable, schema: &PetCountSchema) -> Vec<PetCountRow> {
    let rows: Vec<PetCountRow> = table.rows.iter().map(|cells| schema.row(cells)).collect();
    debug!("typed {} pet count rows", rows.len());
    rows
}
