// Language usage aggregation.
// Sums per-repository byte counts and converts them to ranked percentage shares.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::github::LanguageBytes;

use super::palette::language_color;

/// One language's share of all code across the account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageStat {
    pub name: String,
    pub bytes: u64,
    /// Share of total bytes, rounded to one decimal place.
    pub percentage: f64,
    pub color: String,
}

/// Accumulates language bytes repository by repository.
#[derive(Debug, Default)]
pub struct LanguageTally {
    bytes: HashMap<String, u64>,
}

impl LanguageTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one repository's language breakdown.
    pub fn add(&mut self, languages: &LanguageBytes) {
        for (name, bytes) in languages {
            *self.bytes.entry(name.clone()).or_insert(0) += bytes;
        }
    }

    pub fn total(&self) -> u64 {
        self.bytes.values().sum()
    }

    /// Ranked statistics, largest byte count first; equal counts order by name.
    pub fn into_stats(self) -> Vec<LanguageStat> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }

        let mut stats: Vec<LanguageStat> = self
            .bytes
            .into_iter()
            .map(|(name, bytes)| LanguageStat {
                percentage: round_one_decimal(bytes as f64 / total as f64 * 100.0),
                color: language_color(&name).to_string(),
                name,
                bytes,
            })
            .collect();

        stats.sort_by(|a, b| b.bytes.cmp(&a.bytes).then_with(|| a.name.cmp(&b.name)));
        stats
    }
}

/// Aggregate several repositories' language maps into ranked statistics.
pub fn aggregate_languages<'a>(maps: impl IntoIterator<Item = &'a LanguageBytes>) -> Vec<LanguageStat> {
    let mut tally = LanguageTally::new();
    for map in maps {
        tally.add(map);
    }
    tally.into_stats()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(pairs: &[(&str, u64)]) -> LanguageBytes {
        pairs.iter().map(|(n, b)| (n.to_string(), *b)).collect()
    }

    #[test]
    fn test_aggregate_two_repositories() {
        let first = bytes(&[("A", 100)]);
        let second = bytes(&[("A", 50), ("B", 50)]);

        let stats = aggregate_languages([&first, &second]);

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].name, "A");
        assert_eq!(stats[0].bytes, 150);
        assert_eq!(stats[0].percentage, 75.0);
        assert_eq!(stats[1].name, "B");
        assert_eq!(stats[1].bytes, 50);
        assert_eq!(stats[1].percentage, 25.0);
    }

    #[test]
    fn test_percentage_rounding_and_colors() {
        let map = bytes(&[("Rust", 2), ("Zig", 1)]);
        let stats = aggregate_languages([&map]);

        assert_eq!(stats[0].percentage, 66.7);
        assert_eq!(stats[0].color, "#dea584");
        assert_eq!(stats[1].percentage, 33.3);
        assert_eq!(stats[1].color, super::super::palette::DEFAULT_COLOR);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_languages(std::iter::empty()).is_empty());

        let zero = bytes(&[("Rust", 0)]);
        assert!(aggregate_languages([&zero]).is_empty());
    }
}
