use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

use crate::config::PharmacyConfig;
use crate::error::{Result, StatsError};
use crate::types::PharmacyListing;

/// Read the pharmacy JSON document at `path`.
pub fn load_pharmacy_listings(path: &Path, config: &PharmacyConfig) -> Result<Vec<PharmacyListing>> {
    let file = File::open(path)?;
    let document: Value = serde_json::from_reader(BufReader::new(file))?;
    let listings = parse_pharmacy_listings(&document, config)?;
    info!(path = %path.display(), count = listings.len(), "loaded pharmacy listings");
    Ok(listings)
}

/// Pull typed listings out of the document's data array.
pub fn parse_pharmacy_listings(document: &Value, config: &PharmacyConfig) -> Result<Vec<PharmacyListing>> {
    let rows = document
        .get(&config.data_key)
        .and_then(|v| v.as_array())
        .ok_or_else(|| {
            StatsError::Schema(format!(
                "expected a top-level '{}' array in pharmacy document",
                config.data_key
            ))
        })?;

    let listings = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            if !row.is_object() {
                debug!("pharmacy row {} is not an object; treating all fields as null", i);
            }
            PharmacyListing {
                status: field_text(row, &config.status_field),
                primary_address: field_text(row, &config.primary_address_field),
                secondary_address: field_text(row, &config.secondary_address_field),
            }
        })
        .collect();
    Ok(listings)
}

// Strings pass through, numbers and booleans are stringified, anything else is null
fn field_text(row: &Value, key: &str) -> Option<String> {
    match row.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
