//! Readers for the two input shapes: a JSON document of pharmacy listings
//! and a spreadsheet of pet registration counts.

pub mod json;
pub mod sheet;

pub use json::{load_pharmacy_listings, parse_pharmacy_listings};
pub use sheet::{load_pet_counts, open_table, PetCountSchema, RawTable, TableSource};
