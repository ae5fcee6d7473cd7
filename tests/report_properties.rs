use pet_region_stats::aggregate::{active_listing_districts, count_by_district, district_totals, Tally};
use pet_region_stats::config::{Config, PharmacyConfig};
use pet_region_stats::district::DistrictExtractor;
use pet_region_stats::report::{build_breed_pivot, district_count_report, rank_breeds};
use pet_region_stats::types::{Cell, PharmacyListing};
use proptest::prelude::*;

const DISTRICTS: [&str; 6] = ["종로구", "중구", "마포구", "강남구", "송파구", "없는구"];

fn listing_strategy() -> impl Strategy<Value = PharmacyListing> {
    (
        prop_oneof![Just("정상"), Just("폐업"), Just("휴업")],
        0..DISTRICTS.len(),
        prop_oneof![Just("서울특별시"), Just("경기도"), Just("")],
        any::<bool>(),
    )
        .prop_map(|(status, d, prefix, primary)| {
            let address = format!("{} {} 어딘가로 12", prefix, DISTRICTS[d]);
            PharmacyListing {
                status: Some(status.to_string()),
                primary_address: if primary { Some(address.clone()) } else { None },
                secondary_address: if primary { None } else { Some(address) },
            }
        })
}

fn breakdown_strategy() -> impl Strategy<Value = Vec<(usize, u8, i64)>> {
    prop::collection::vec((0..DISTRICTS.len(), 0u8..15, 0i64..1000), 0..80)
}

fn to_tally(entries: &[(usize, u8, i64)]) -> Tally<(String, String)> {
    entries
        .iter()
        .map(|(d, b, c)| ((DISTRICTS[*d].to_string(), format!("breed{b}")), *c))
        .collect()
}

proptest! {
    #[test]
    fn extraction_returns_the_district_token(name in "[가-힣]{1,4}", rest in "[가-힣0-9 ]{0,12}") {
        let extractor = DistrictExtractor::new("서울특별시", "구").unwrap();
        let district = format!("{name}구");
        let address = format!("서울특별시 {district} {rest}");
        prop_assert_eq!(extractor.extract(Some(address.as_str())), Some(district.clone()));

        let wrong_prefix = format!("경기도 {district} {rest}");
        prop_assert_eq!(extractor.extract(Some(wrong_prefix.as_str())), None);
    }

    #[test]
    fn flat_report_always_has_every_canonical_district(listings in prop::collection::vec(listing_strategy(), 0..60)) {
        let config = Config::default();
        let extractor = DistrictExtractor::from_config(&config.districts).unwrap();
        let matched: Vec<String> = active_listing_districts(&listings, "정상", &extractor).collect();
        let counts = count_by_district(matched.iter().cloned());

        let table = district_count_report(&counts, &config.districts.canonical_order, &PharmacyConfig::default());
        prop_assert_eq!(table.rows.len(), 25);

        let values: Vec<i64> = table.rows.iter().filter_map(|r| r[1].as_int()).collect();
        prop_assert!(values.iter().all(|v| *v >= 0));

        let in_canonical = matched
            .iter()
            .filter(|d| config.districts.canonical_order.contains(d))
            .count() as i64;
        prop_assert_eq!(values.iter().sum::<i64>(), in_canonical);
    }

    #[test]
    fn pivot_totals_are_consistent(entries in breakdown_strategy(), top_n in 1usize..12) {
        let tally = to_tally(&entries);
        let canonical: Vec<String> = DISTRICTS[..5].iter().map(|s| s.to_string()).collect();
        let pivot = build_breed_pivot(&tally, &canonical, top_n, "기타");

        let mut config = Config::default().pet_counts;
        config.top_n = top_n;
        let table = pivot.to_table(&config);
        let (total_row, data_rows) = table.rows.split_last().unwrap();
        let width = table.headers.len();

        for row in data_rows {
            let cells: Vec<i64> = row[1..width - 1].iter().filter_map(Cell::as_int).collect();
            prop_assert_eq!(row[width - 1].as_int(), Some(cells.iter().sum::<i64>()));
        }
        for col in 1..width {
            let column_sum: i64 = data_rows.iter().filter_map(|r| r[col].as_int()).sum();
            prop_assert_eq!(total_row[col].as_int(), Some(column_sum));
        }

        // Per-district pivot totals equal the flat per-district totals
        let flat = district_totals(&tally);
        for row in &pivot.rows {
            prop_assert_eq!(row.total(), flat.get(&row.district));
        }
    }

    #[test]
    fn other_bucket_holds_everything_outside_top_n(entries in breakdown_strategy(), top_n in 1usize..12) {
        let tally = to_tally(&entries);
        let canonical: Vec<String> = DISTRICTS.iter().map(|s| s.to_string()).collect();
        let pivot = build_breed_pivot(&tally, &canonical, top_n, "기타");

        let column_totals = pivot.column_totals();
        let (other, top) = column_totals.split_last().unwrap();
        prop_assert!(top.len() <= top_n);
        prop_assert_eq!(*other, tally.total() - top.iter().sum::<i64>());

        let ranked = rank_breeds(&tally);
        let expected_top: Vec<&str> = ranked.iter().take(top_n).map(|(b, _)| b.as_str()).collect();
        let actual_top: Vec<&str> = pivot.columns[..pivot.columns.len() - 1].iter().map(String::as_str).collect();
        prop_assert_eq!(actual_top, expected_top);
    }
}
