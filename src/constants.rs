/// Default constants reproducing the Seoul pet statistics datasets.
/// Every value here can be overridden through the TOML configuration.

// District address layout: "서울특별시 ○○구 ..."
pub const DEFAULT_ADDRESS_PREFIX: &str = "서울특별시";
pub const DEFAULT_DISTRICT_SUFFIX: &str = "구";

/// The 25 Seoul autonomous districts in canonical report order
pub const SEOUL_DISTRICTS: [&str; 25] = [
    "종로구", "중구", "용산구", "성동구", "광진구", "동대문구", "중랑구",
    "성북구", "강북구", "도봉구", "노원구", "은평구", "서대문구", "마포구",
    "양천구", "강서구", "구로구", "금천구", "영등포구", "동작구", "관악구",
    "서초구", "강남구", "송파구", "강동구",
];

// Pharmacy listing JSON layout
pub const PHARMACY_DATA_KEY: &str = "DATA";
pub const PHARMACY_STATUS_FIELD: &str = "dtlstatenm";
pub const PHARMACY_PRIMARY_ADDRESS_FIELD: &str = "sitewhladdr";
pub const PHARMACY_SECONDARY_ADDRESS_FIELD: &str = "rdnwhladdr";
pub const PHARMACY_ACTIVE_STATUS: &str = "정상";
pub const PHARMACY_REGION_HEADER: &str = "구";
pub const PHARMACY_COUNT_HEADER: &str = "동물약국_수";
pub const PHARMACY_SHEET_NAME: &str = "병원수";

// Pet registration spreadsheet layout
pub const SPECIES_COLUMN: &str = "LVSTCK_KND";
pub const REGION_COLUMN: &str = "SGG";
pub const BREED_COLUMN: &str = "SPCS";
pub const COUNT_COLUMN: &str = "CNT";
pub const DOG: &str = "개";
pub const CAT: &str = "고양이";
pub const SPECIES_TOTALS_SHEET_NAME: &str = "Sheet1";
pub const PIVOT_SHEET_NAME: &str = "피벗";
pub const PIVOT_REGION_HEADER: &str = "구";
pub const OTHER_LABEL: &str = "기타";
pub const TOTAL_LABEL: &str = "합계";
pub const DEFAULT_TOP_N: usize = 10;

// Default input/output locations, relative to the working directory
pub const DEFAULT_PHARMACY_INPUT: &str = "./data/seoul_pet_pharmacy.json";
pub const DEFAULT_PHARMACY_OUTPUT: &str = "./public/data/pet_pharmacy.xlsx";
pub const DEFAULT_PET_COUNT_INPUT: &str = "./data/region_with_pet_type.xlsx";
pub const DEFAULT_SPECIES_TOTALS_OUTPUT: &str = "./public/data/pet_counts.xlsx";
pub const DEFAULT_PIVOT_OUTPUT: &str = "./public/data/region_with_cat_type.xlsx";
