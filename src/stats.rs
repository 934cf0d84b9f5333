//! Generation statistics - dot-count distribution and summary numbers

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::VariationResult;

/// Summary of a set of generated variations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub total: usize,
    /// Dot-free local-part length of the original address
    pub base_length: Option<usize>,
    /// Mean address length in characters
    pub avg_length: f64,
    pub max_dots: usize,
    pub domain: String,
    /// Dots in local-part -> number of variations
    pub distribution: BTreeMap<usize, usize>,
}

impl GenerationStats {
    pub fn from_variations(variations: &[VariationResult], original: &str) -> Self {
        let (base_length, domain) = match original.split_once('@') {
            Some((local, domain)) => (
                Some(local.chars().filter(|c| *c != '.').count()),
                domain.to_string(),
            ),
            None => (None, String::new()),
        };

        let mut distribution = BTreeMap::new();
        let mut total_length = 0usize;
        for variation in variations {
            *distribution.entry(variation.dot_count()).or_insert(0) += 1;
            total_length += variation.email.chars().count();
        }

        let avg_length = if variations.is_empty() {
            0.0
        } else {
            total_length as f64 / variations.len() as f64
        };

        Self {
            total: variations.len(),
            base_length,
            avg_length,
            max_dots: distribution.keys().next_back().copied().unwrap_or(0),
            domain,
            distribution,
        }
    }

    /// Largest bucket in the distribution
    pub fn max_bucket(&self) -> usize {
        self.distribution.values().copied().max().unwrap_or(0)
    }

    /// Text bar chart, one row per dot count
    pub fn render_histogram(&self, width: usize) -> String {
        let max = self.max_bucket().max(1);
        self.distribution
            .iter()
            .map(|(dots, count)| {
                let bar = (count * width).div_ceil(max);
                format!("{:>2} dots │{:<width$} {}", dots, "█".repeat(bar), count, width = width)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
