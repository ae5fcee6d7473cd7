use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet read failed: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Spreadsheet write failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

impl StatsError {
    pub fn missing_column(column: &str, source: &str) -> Self {
        StatsError::Schema(format!("required column '{column}' not found in {source}"))
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
