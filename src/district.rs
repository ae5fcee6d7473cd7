//! District extraction from free-form addresses.
//!
//! Addresses look like `"<prefix> <District> ..."` where the prefix is the
//! city or province name and the district token ends with a fixed suffix
//! character. Matching is anchored to the start of the trimmed address.

use regex::Regex;

use crate::config::DistrictConfig;
use crate::error::{Result, StatsError};

#[derive(Debug, Clone)]
pub struct DistrictExtractor {
    pattern: Regex,
    suffix: String,
}

impl DistrictExtractor {
    pub fn new(address_prefix: &str, suffix: &str) -> Result<Self> {
        let prefix_words: Vec<String> = address_prefix.split_whitespace().map(regex::escape).collect();
        if prefix_words.is_empty() || suffix.trim().is_empty() {
            return Err(StatsError::Config(
                "district extractor needs a non-empty address prefix and suffix".into(),
            ));
        }
        let suffix = suffix.trim().to_string();

        // The plain token wins; a split one ("종로 구") is only tried after it and
        // canonicalize() folds the gap.
        let escaped_suffix = regex::escape(&suffix);
        let source = format!(
            r"^{}\s+(\w+{s}|\w+\s+{s})(?:\W|$)",
            prefix_words.join(r"\s+"),
            s = escaped_suffix
        );
        let pattern = Regex::new(&source)
            .map_err(|e| StatsError::Config(format!("invalid district pattern '{source}': {e}")))?;

        Ok(Self { pattern, suffix })
    }

    pub fn from_config(config: &DistrictConfig) -> Result<Self> {
        Self::new(&config.address_prefix, &config.suffix)
    }

    /// Extract the canonical district name from an address, if it has one.
    pub fn extract(&self, address: Option<&str>) -> Option<String> {
        let address = address?.trim();
        if address.is_empty() {
            return None;
        }
        self.pattern
            .captures(address)
            .and_then(|caps| caps.get(1))
            .map(|m| self.canonicalize(m.as_str()))
    }

    /// Try each candidate address in order and return the first district found.
    pub fn extract_first<'a, I>(&self, candidates: I) -> Option<String>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        candidates.into_iter().find_map(|candidate| self.extract(candidate))
    }

    /// Trim the name and drop whitespace sitting right before the suffix.
    pub fn canonicalize(&self, name: &str) -> String {
        let trimmed = name.trim();
        match trimmed.strip_suffix(self.suffix.as_str()) {
            Some(stem) => format!("{}{}", stem.trim_end(), self.suffix),
            None => trimmed.to_string(),
        }
    }
}
