use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

use crate::aggregate::{
    active_listing_districts, count_by_district, is_active_listing, sum_by_category,
    sum_by_district_and_breed,
};
use crate::config::Config;
use crate::district::DistrictExtractor;
use crate::error::{Result, StatsError};
use crate::output::write_report;
use crate::report::{build_breed_pivot, district_count_report, species_totals_report};
use crate::source::{load_pet_counts, load_pharmacy_listings, open_table, PetCountSchema, RawTable};
use crate::types::{PetCountRow, PharmacyListing, Table};

pub const PHARMACY_PIPELINE: &str = "pharmacy";
pub const SPECIES_TOTALS_PIPELINE: &str = "species_totals";
pub const BREED_PIVOT_PIPELINE: &str = "breed_pivot";

/// How many input records made it into the report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub records_read: usize,
    pub records_used: usize,
    pub records_dropped: usize,
}

impl RunStats {
    fn new(records_read: usize, records_used: usize) -> Self {
        Self {
            records_read,
            records_used,
            records_dropped: records_read.saturating_sub(records_used),
        }
    }
}

/// Result of a complete pipeline run
#[derive(Debug, Serialize)]
pub struct PipelineResult {
    pub pipeline: String,
    pub stats: RunStats,
    pub output_file: String,
    pub table: Table,
}

pub struct Pipeline;

impl Pipeline {
    /// Pharmacy listings per district.
    pub fn build_pharmacy_report(listings: &[PharmacyListing], config: &Config) -> Result<(Table, RunStats)> {
        let extractor = DistrictExtractor::from_config(&config.districts)?;
        let active_status = config.pharmacy.active_status.as_str();

        let counts = count_by_district(active_listing_districts(listings, active_status, &extractor));

        let active = listings.iter().filter(|l| is_active_listing(l, active_status)).count();
        let matched = counts.total() as usize;
        debug!(
            "{} inactive listings filtered, {} active listings without a district",
            listings.len() - active,
            active - matched
        );

        let table = district_count_report(&counts, &config.districts.canonical_order, &config.pharmacy);
        Ok((table, RunStats::new(listings.len(), matched)))
    }

    /// Summed counts per allowed species.
    pub fn build_species_totals_report(raw: &RawTable, config: &Config) -> Result<(Table, RunStats)> {
        let pet = &config.pet_counts;
        let schema = PetCountSchema::for_totals(raw, pet)?;
        let rows = load_pet_counts(raw, &schema);

        let totals = sum_by_category(&rows, &pet.allowed_species);
        let used = rows
            .iter()
            .filter(|r| pet.allowed_species.contains(&r.species))
            .count();
        for species in &pet.allowed_species {
            if !totals.contains(species) {
                debug!("no rows for species '{}'", species);
            }
        }

        let table = species_totals_report(&totals, pet);
        Ok((table, RunStats::new(rows.len(), used)))
    }

    /// District by breed pivot for one species.
    pub fn build_breed_pivot_report(raw: &RawTable, config: &Config, species: &str) -> Result<(Table, RunStats)> {
        if species.trim().is_empty() {
            return Err(StatsError::Config("pivot species must not be empty".into()));
        }
        let pet = &config.pet_counts;
        let schema = PetCountSchema::for_breakdown(raw, pet)?;
        let extractor = DistrictExtractor::from_config(&config.districts)?;

        // Summary rows labelled like the totals row would collide with it
        let (summary_rows, rows): (Vec<PetCountRow>, Vec<PetCountRow>) = load_pet_counts(raw, &schema)
            .into_iter()
            .partition(|r| extractor.canonicalize(&r.region) == pet.total_label);
        if !summary_rows.is_empty() {
            warn!(
                "dropped {} rows whose district is the summary label '{}'",
                summary_rows.len(),
                pet.total_label
            );
        }

        let breakdown = sum_by_district_and_breed(&rows, species, &extractor);
        let used = rows
            .iter()
            .filter(|r| r.species == species && !r.region.is_empty())
            .count();

        let pivot = build_breed_pivot(
            &breakdown,
            &config.districts.canonical_order,
            pet.top_n,
            &pet.other_label,
        );
        for district in pivot.extra_districts() {
            warn!("district '{}' is not in the canonical list; appended after it", district);
        }
        debug!("pivot columns: {:?}", pivot.columns);

        Ok((pivot.to_table(pet), RunStats::new(raw.rows.len(), used)))
    }

    #[instrument(skip(config))]
    pub fn run_pharmacy(config: &Config, input: &Path, output: &Path) -> Result<PipelineResult> {
        info!("📥 Loading pharmacy listings from {}", input.display());
        let listings = load_pharmacy_listings(input, &config.pharmacy)?;
        let (table, stats) = Self::build_pharmacy_report(&listings, config)?;
        Self::finish(PHARMACY_PIPELINE, table, stats, output)
    }

    #[instrument(skip(config))]
    pub fn run_species_totals(config: &Config, input: &Path, output: &Path) -> Result<PipelineResult> {
        info!("📥 Loading pet counts from {}", input.display());
        let raw = open_table(input)?;
        let (table, stats) = Self::build_species_totals_report(&raw, config)?;
        Self::finish(SPECIES_TOTALS_PIPELINE, table, stats, output)
    }

    #[instrument(skip(config))]
    pub fn run_breed_pivot(config: &Config, input: &Path, output: &Path, species: &str) -> Result<PipelineResult> {
        info!("📥 Loading pet counts from {}", input.display());
        let raw = open_table(input)?;
        let (table, stats) = Self::build_breed_pivot_report(&raw, config, species)?;
        Self::finish(BREED_PIVOT_PIPELINE, table, stats, output)
    }

    fn finish(pipeline: &str, table: Table, stats: RunStats, output: &Path) -> Result<PipelineResult> {
        info!(
            "✅ {} records read, {} used, {} dropped",
            stats.records_read, stats.records_used, stats.records_dropped
        );

        write_report(output, std::slice::from_ref(&table))?;
        info!("💾 Saved report to {}", output.display());

        Ok(PipelineResult {
            pipeline: pipeline.to_string(),
            stats,
            output_file: output.to_string_lossy().to_string(),
            table,
        })
    }
}
