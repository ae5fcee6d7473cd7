use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants;
use crate::error::{Result, StatsError};

/// Immutable run configuration, built once at startup and passed by reference.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub districts: DistrictConfig,
    pub pharmacy: PharmacyConfig,
    pub pet_counts: PetCountConfig,
}

/// Address layout and the canonical district order
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DistrictConfig {
    /// Words preceding the district token, e.g. the city name
    pub address_prefix: String,
    /// Character every district name ends with
    pub suffix: String,
    /// Canonical report order; every region report has exactly these rows
    pub canonical_order: Vec<String>,
}

impl Default for DistrictConfig {
    fn default() -> Self {
        Self {
            address_prefix: constants::DEFAULT_ADDRESS_PREFIX.to_string(),
            suffix: constants::DEFAULT_DISTRICT_SUFFIX.to_string(),
            canonical_order: constants::SEOUL_DISTRICTS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PharmacyConfig {
    pub data_key: String,
    pub status_field: String,
    pub primary_address_field: String,
    pub secondary_address_field: String,
    pub active_status: String,
    pub region_header: String,
    pub count_header: String,
    pub sheet_name: String,
}

impl Default for PharmacyConfig {
    fn default() -> Self {
        Self {
            data_key: constants::PHARMACY_DATA_KEY.to_string(),
            status_field: constants::PHARMACY_STATUS_FIELD.to_string(),
            primary_address_field: constants::PHARMACY_PRIMARY_ADDRESS_FIELD.to_string(),
            secondary_address_field: constants::PHARMACY_SECONDARY_ADDRESS_FIELD.to_string(),
            active_status: constants::PHARMACY_ACTIVE_STATUS.to_string(),
            region_header: constants::PHARMACY_REGION_HEADER.to_string(),
            count_header: constants::PHARMACY_COUNT_HEADER.to_string(),
            sheet_name: constants::PHARMACY_SHEET_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PetCountConfig {
    pub species_column: String,
    pub region_column: String,
    pub breed_column: String,
    pub count_column: String,
    /// Species kept by the species-totals report, in output order
    pub allowed_species: Vec<String>,
    /// Species the breed pivot is built for unless overridden on the command line
    pub pivot_species: String,
    pub top_n: usize,
    pub other_label: String,
    pub total_label: String,
    pub pivot_region_header: String,
    pub species_totals_sheet: String,
    pub pivot_sheet: String,
}

impl Default for PetCountConfig {
    fn default() -> Self {
        Self {
            species_column: constants::SPECIES_COLUMN.to_string(),
            region_column: constants::REGION_COLUMN.to_string(),
            breed_column: constants::BREED_COLUMN.to_string(),
            count_column: constants::COUNT_COLUMN.to_string(),
            allowed_species: vec![constants::DOG.to_string(), constants::CAT.to_string()],
            pivot_species: constants::CAT.to_string(),
            top_n: constants::DEFAULT_TOP_N,
            other_label: constants::OTHER_LABEL.to_string(),
            total_label: constants::TOTAL_LABEL.to_string(),
            pivot_region_header: constants::PIVOT_REGION_HEADER.to_string(),
            species_totals_sheet: constants::SPECIES_TOTALS_SHEET_NAME.to_string(),
            pivot_sheet: constants::PIVOT_SHEET_NAME.to_string(),
        }
    }
}

impl Config {
    /// Load a TOML configuration file. Missing sections and keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            StatsError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise fall back to the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let d = &self.districts;
        if d.address_prefix.trim().is_empty() {
            return Err(StatsError::Config("districts.address_prefix must not be empty".into()));
        }
        if d.suffix.trim().is_empty() {
            return Err(StatsError::Config("districts.suffix must not be empty".into()));
        }
        if d.canonical_order.is_empty() {
            return Err(StatsError::Config("districts.canonical_order must not be empty".into()));
        }
        let mut seen = std::collections::HashSet::new();
        for name in &d.canonical_order {
            if !seen.insert(name.as_str()) {
                return Err(StatsError::Config(format!("duplicate district '{name}' in canonical_order")));
            }
        }

        let p = &self.pet_counts;
        if p.allowed_species.is_empty() {
            return Err(StatsError::Config("pet_counts.allowed_species must not be empty".into()));
        }
        if p.top_n == 0 {
            return Err(StatsError::Config("pet_counts.top_n must be at least 1".into()));
        }
        Ok(())
    }
}
