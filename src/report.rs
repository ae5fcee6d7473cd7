//! Report shaping: turns tallies into fixed-shape [`Table`]s.

use std::collections::{HashMap, HashSet};

use crate::aggregate::{saturating_sum, Tally};
use crate::config::{PetCountConfig, PharmacyConfig};
use crate::types::{Cell, Table};

/// One row per canonical district, zero-filled, in canonical order.
pub fn district_count_report(
    counts: &Tally<String>,
    canonical_order: &[String],
    config: &PharmacyConfig,
) -> Table {
    let mut table = Table::new(
        config.sheet_name.clone(),
        vec![config.region_header.clone(), config.count_header.clone()],
    );
    for district in canonical_order {
        table.push_row(vec![Cell::from(district.as_str()), Cell::from(counts.get(district))]);
    }
    table
}

/// One row per allowed species that actually occurs, in allow-list order.
pub fn species_totals_report(totals: &Tally<String>, config: &PetCountConfig) -> Table {
    let mut table = Table::new(
        config.species_totals_sheet.clone(),
        vec![config.species_column.clone(), config.count_column.clone()],
    );
    for species in &config.allowed_species {
        if totals.contains(species) {
            table.push_row(vec![Cell::from(species.as_str()), Cell::from(totals.get(species))]);
        }
    }
    table
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotRow {
    pub district: String,
    /// One value per pivot column, "Other" last
    pub values: Vec<i64>,
    pub canonical: bool,
}

impl PivotRow {
    pub fn total(&self) -> i64 {
        saturating_sum(self.values.iter().copied())
    }
}

/// District by breed pivot with the top breeds kept and the rest bucketed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreedPivot {
    /// Retained breeds in rank order followed by the "Other" label
    pub columns: Vec<String>,
    pub rows: Vec<PivotRow>,
}

/// Rank breeds by grand total, descending. Equal totals keep first-seen order.
pub fn rank_breeds(breakdown: &Tally<(String, String)>) -> Vec<(String, i64)> {
    let totals: Tally<String> = breakdown
        .iter()
        .map(|((_, breed), count)| (breed.clone(), count))
        .collect();
    let mut ranked: Vec<(String, i64)> = totals.iter().map(|(b, c)| (b.clone(), c)).collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

pub fn build_breed_pivot(
    breakdown: &Tally<(String, String)>,
    canonical_order: &[String],
    top_n: usize,
    other_label: &str,
) -> BreedPivot {
    // A source breed already called "Other" belongs in the bucket, not beside it
    let top: Vec<String> = rank_breeds(breakdown)
        .into_iter()
        .map(|(breed, _)| breed)
        .filter(|breed| breed != other_label)
        .take(top_n)
        .collect();
    let column_of: HashMap<&str, usize> = top.iter().enumerate().map(|(i, b)| (b.as_str(), i)).collect();
    let other_idx = top.len();
    let width = top.len() + 1;

    let mut values: HashMap<&str, Vec<i64>> = HashMap::new();
    let mut seen_order: Vec<&str> = Vec::new();
    for ((district, breed), count) in breakdown.iter() {
        let idx = column_of.get(breed.as_str()).copied().unwrap_or(other_idx);
        let row = values.entry(district.as_str()).or_insert_with(|| {
            seen_order.push(district.as_str());
            vec![0; width]
        });
        row[idx] = row[idx].saturating_add(count);
    }

    let canonical: HashSet<&str> = canonical_order.iter().map(String::as_str).collect();
    let mut rows: Vec<PivotRow> = canonical_order
        .iter()
        .map(|district| PivotRow {
            district: district.clone(),
            values: values.get(district.as_str()).cloned().unwrap_or_else(|| vec![0; width]),
            canonical: true,
        })
        .collect();
    rows.extend(
        seen_order
            .iter()
            .filter(|d| !canonical.contains(*d))
            .map(|d| PivotRow {
                district: d.to_string(),
                values: values[d].clone(),
                canonical: false,
            }),
    );

    let mut columns = top;
    columns.push(other_label.to_string());
    BreedPivot { columns, rows }
}

impl BreedPivot {
    pub fn extra_districts(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().filter(|r| !r.canonical).map(|r| r.district.as_str())
    }

    /// Column-wise sums over every data row
    pub fn column_totals(&self) -> Vec<i64> {
        let mut totals = vec![0i64; self.columns.len()];
        for row in &self.rows {
            for (total, value) in totals.iter_mut().zip(&row.values) {
                *total = total.saturating_add(*value);
            }
        }
        totals
    }

    /// Shape into a sheet with a trailing "Total" column and "Total" row.
    pub fn to_table(&self, config: &PetCountConfig) -> Table {
        let mut headers = Vec::with_capacity(self.columns.len() + 2);
        headers.push(config.pivot_region_header.clone());
        headers.extend(self.columns.iter().cloned());
        headers.push(config.total_label.clone());

        let mut table = Table::new(config.pivot_sheet.clone(), headers);
        for row in &self.rows {
            table.push_row(labelled_row(&row.district, &row.values));
        }
        table.push_row(labelled_row(&config.total_label, &self.column_totals()));
        table
    }
}

fn labelled_row(label: &str, values: &[i64]) -> Vec<Cell> {
    let mut cells = Vec::with_capacity(values.len() + 2);
    cells.push(Cell::from(label));
    cells.extend(values.iter().map(|v| Cell::from(*v)));
    cells.push(Cell::from(saturating_sum(values.iter().copied())));
    cells
}
