use rust_xlsxwriter::Workbook;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::error::{Result, StatsError};
use crate::types::{Cell, Table};

/// Encodes shaped tables into the bytes of one output artifact.
pub trait ReportWriter {
    fn format_name(&self) -> &'static str;
    fn encode(&self, tables: &[Table]) -> Result<Vec<u8>>;
}

/// `.xlsx` workbook, one worksheet per table
pub struct XlsxReportWriter;

impl ReportWriter for XlsxReportWriter {
    fn format_name(&self) -> &'static str {
        "xlsx"
    }

    fn encode(&self, tables: &[Table]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        for table in tables {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(table.sheet_name.as_str())?;
            for (col, header) in table.headers.iter().enumerate() {
                worksheet.write_string(0, col as u16, header.as_str())?;
            }
            for (r, row) in table.rows.iter().enumerate() {
                let row_idx = (r + 1) as u32;
                for (col, cell) in row.iter().enumerate() {
                    match cell {
                        Cell::Text(s) => worksheet.write_string(row_idx, col as u16, s.as_str())?,
                        Cell::Int(v) => worksheet.write_number(row_idx, col as u16, *v as f64)?,
                    };
                }
            }
        }
        Ok(workbook.save_to_buffer()?)
    }
}

/// Plain CSV; holds a single table
pub struct CsvReportWriter;

impl ReportWriter for CsvReportWriter {
    fn format_name(&self) -> &'static str {
        "csv"
    }

    fn encode(&self, tables: &[Table]) -> Result<Vec<u8>> {
        let [table] = tables else {
            return Err(StatsError::UnsupportedFormat(format!(
                "csv output holds exactly one table, got {}",
                tables.len()
            )));
        };
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&table.headers)?;
        for row in &table.rows {
            writer.write_record(row.iter().map(|c| c.to_string()))?;
        }
        writer.into_inner().map_err(|e| StatsError::Io(e.into_error()))
    }
}

pub fn writer_for_path(path: &Path) -> Result<Box<dyn ReportWriter>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "xlsx" => Ok(Box::new(XlsxReportWriter)),
        "csv" => Ok(Box::new(CsvReportWriter)),
        other => Err(StatsError::UnsupportedFormat(format!(
            "cannot write '{}' (extension '{}')",
            path.display(),
            other
        ))),
    }
}

/// Encode `tables` and replace `path` with the result in one step.
///
/// The bytes go to a temporary file next to the target which is then
/// renamed over it, so a failed run never leaves a partial artifact.
pub fn write_report(path: &Path, tables: &[Table]) -> Result<()> {
    let writer = writer_for_path(path)?;
    let bytes = writer.encode(tables)?;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut staged = tempfile::NamedTempFile::new_in(parent)?;
    staged.write_all(&bytes)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| StatsError::Io(e.error))?;

    info!(path = %path.display(), format = writer.format_name(), bytes = bytes.len(), "wrote report");
    Ok(())
}
