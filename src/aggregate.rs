//! Filtering and counting.
//!
//! Everything here is a pure function over in-memory records; the pipeline
//! decides what to log about records that fall out along the way.

use std::collections::HashMap;
use std::hash::Hash;

use crate::district::DistrictExtractor;
use crate::types::{PetCountRow, PharmacyListing};

/// Parse a count cell. Thousands separators and surrounding whitespace are
/// ignored; anything that is not a plain (optionally negative) integer is 0.
pub fn coerce_count(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else { return 0 };
    let cleaned: String = raw.replace(',', "");
    let cleaned = cleaned.trim();
    let digits = cleaned.strip_prefix('-').unwrap_or(cleaned);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    cleaned.parse().unwrap_or(0)
}

/// Sum that clamps at the `i64` bounds instead of overflowing.
pub fn saturating_sum<I: IntoIterator<Item = i64>>(values: I) -> i64 {
    values.into_iter().fold(0, i64::saturating_add)
}

/// Integer counts keyed by grouping tuple, remembering first-insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally<K: Eq + Hash + Clone> {
    order: Vec<K>,
    counts: HashMap<K, i64>,
}

impl<K: Eq + Hash + Clone> Default for Tally<K> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            counts: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> Tally<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K, amount: i64) {
        match self.counts.get_mut(&key) {
            Some(count) => *count = count.saturating_add(amount),
            None => {
                self.order.push(key.clone());
                self.counts.insert(key, amount);
            }
        }
    }

    pub fn increment(&mut self, key: K) {
        self.add(key, 1);
    }

    /// Count for `key`; unseen keys are zero.
    pub fn get(&self, key: &K) -> i64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.counts.contains_key(key)
    }

    /// Keys in the order they were first seen
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, i64)> {
        self.order.iter().map(move |k| (k, self.get(k)))
    }

    pub fn total(&self) -> i64 {
        saturating_sum(self.counts.values().copied())
    }
}

impl<K: Eq + Hash + Clone> FromIterator<(K, i64)> for Tally<K> {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for (key, amount) in iter {
            tally.add(key, amount);
        }
        tally
    }
}

pub fn is_active_listing(listing: &PharmacyListing, active_status: &str) -> bool {
    listing.status.as_deref() == Some(active_status)
}

pub fn is_allowed_species(row: &PetCountRow, allowed: &[String]) -> bool {
    allowed.iter().any(|s| s == &row.species)
}

/// District of every active listing, trying the primary address before the
/// secondary one. Listings with no derivable district are skipped.
pub fn active_listing_districts<'a>(
    listings: &'a [PharmacyListing],
    active_status: &'a str,
    extractor: &'a DistrictExtractor,
) -> impl Iterator<Item = String> + 'a {
    listings
        .iter()
        .filter(move |l| is_active_listing(l, active_status))
        .filter_map(move |l| {
            extractor.extract_first([l.primary_address.as_deref(), l.secondary_address.as_deref()])
        })
}

pub fn count_by_district<I>(districts: I) -> Tally<String>
where
    I: IntoIterator<Item = String>,
{
    districts.into_iter().map(|d| (d, 1)).collect()
}

/// Sum of counts per allowed species
pub fn sum_by_category<'a, I>(rows: I, allowed: &[String]) -> Tally<String>
where
    I: IntoIterator<Item = &'a PetCountRow>,
{
    rows.into_iter()
        .filter(|r| is_allowed_species(r, allowed))
        .map(|r| (r.species.clone(), r.count))
        .collect()
}

/// Sum of counts per (district, breed) for one species. Region names are
/// canonicalized; rows with a blank region are skipped.
pub fn sum_by_district_and_breed<'a, I>(
    rows: I,
    species: &str,
    extractor: &DistrictExtractor,
) -> Tally<(String, String)>
where
    I: IntoIterator<Item = &'a PetCountRow>,
{
    rows.into_iter()
        .filter(|r| r.species == species)
        .filter_map(|r| {
            let region = extractor.canonicalize(&r.region);
            if region.is_empty() {
                None
            } else {
                Some(((region, r.breed.clone()), r.count))
            }
        })
        .collect()
}

/// Collapse a (district, breed) tally to per-district totals.
pub fn district_totals(breakdown: &Tally<(String, String)>) -> Tally<String> {
    breakdown
        .iter()
        .map(|((region, _), count)| (region.clone(), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DistrictConfig;

    fn row(species: &str, region: &str, breed: &str, count: i64) -> PetCountRow {
        PetCountRow {
            species: species.into(),
            region: region.into(),
            breed: breed.into(),
            count,
        }
    }

    fn listing(status: &str, primary: Option<&str>, secondary: Option<&str>) -> PharmacyListing {
        PharmacyListing {
            status: Some(status.to_string()),
            primary_address: primary.map(str::to_string),
            secondary_address: secondary.map(str::to_string),
        }
    }

    #[test]
    fn test_coerce_count() {
        assert_eq!(coerce_count(Some("1,234")), 1234);
        assert_eq!(coerce_count(Some(" 42 ")), 42);
        assert_eq!(coerce_count(Some("-7")), -7);
        assert_eq!(coerce_count(Some("abc")), 0);
        assert_eq!(coerce_count(Some("")), 0);
        assert_eq!(coerce_count(Some("-")), 0);
        assert_eq!(coerce_count(Some("1.5")), 0);
        assert_eq!(coerce_count(Some("+3")), 0);
        assert_eq!(coerce_count(None), 0);
    }

    #[test]
    fn test_tally_keeps_first_seen_order() {
        let mut tally = Tally::new();
        tally.increment("b");
        tally.add("a", 5);
        tally.increment("b");

        assert_eq!(tally.keys().copied().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(tally.get(&"b"), 2);
        assert_eq!(tally.get(&"missing"), 0);
        assert_eq!(tally.total(), 7);
    }

    #[test]
    fn test_tally_clamps_instead_of_overflowing() {
        let tally: Tally<String> = vec![
            ("a".to_string(), i64::MAX),
            ("a".to_string(), 1),
            ("b".to_string(), 5),
        ]
        .into_iter()
        .collect();

        assert_eq!(tally.get(&"a".to_string()), i64::MAX);
        assert_eq!(tally.total(), i64::MAX);
        assert_eq!(saturating_sum([i64::MIN, -1]), i64::MIN);
    }

    #[test]
    fn test_only_active_listings_are_counted() {
        let extractor = DistrictExtractor::from_config(&DistrictConfig::default()).unwrap();
        let listings = vec![
            listing("정상", Some("서울특별시 종로구 1"), None),
            listing("폐업", Some("서울특별시 종로구 2"), None),
            listing("정상", None, Some("서울특별시 중구 3")),
            listing("정상", Some("경기도 성남시"), Some("")),
        ];

        let counts = count_by_district(active_listing_districts(&listings, "정상", &extractor));
        assert_eq!(counts.get(&"종로구".to_string()), 1);
        assert_eq!(counts.get(&"중구".to_string()), 1);
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn test_sum_by_category_filters_allow_list() {
        let allowed = vec!["개".to_string(), "고양이".to_string()];
        let rows = vec![
            row("개", "종로구", "말티즈", 10),
            row("고양이", "중구", "페르시안", 3),
            row("개", "중구", "푸들", 5),
            row("토끼", "중구", "", 100),
        ];

        let totals = sum_by_category(&rows, &allowed);
        assert_eq!(totals.get(&"개".to_string()), 15);
        assert_eq!(totals.get(&"고양이".to_string()), 3);
        assert!(!totals.contains(&"토끼".to_string()));
    }

    #[test]
    fn test_breakdown_sums_match_district_totals() {
        let extractor = DistrictExtractor::from_config(&DistrictConfig::default()).unwrap();
        let rows = vec![
            row("고양이", "종로구", "페르시안", 4),
            row("고양이", "종로 구", "샴", 6),
            row("고양이", "중구", "페르시안", 1),
            row("고양이", "", "샴", 50),
            row("개", "종로구", "말티즈", 99),
        ];

        let breakdown = sum_by_district_and_breed(&rows, "고양이", &extractor);
        assert_eq!(breakdown.get(&("종로구".to_string(), "샴".to_string())), 6);

        let totals = district_totals(&breakdown);
        assert_eq!(totals.get(&"종로구".to_string()), 10);
        assert_eq!(totals.get(&"중구".to_string()), 1);
        assert_eq!(totals.total(), breakdown.total());
    }
}
