//! Variety, length and composite scoring.
//!
//! Pure functions from the input string and the structural metrics to the
//! final 0..100 score and its rating band.

use serde::Serialize;

use crate::reference::CharClass;

/// Reference length at which the length score saturates.
pub const REFERENCE_LENGTH: usize = 16;

const WEIGHT_LENGTH: f64 = 0.35;
const WEIGHT_VARIETY: f64 = 0.25;
const WEIGHT_ADJACENCY: f64 = 0.20;
const WEIGHT_COVER: f64 = 0.10;
const WEIGHT_PATH: f64 = 0.10;

/// Categorical rating band. Ordered; each band owns a contiguous,
/// non-overlapping slice of the 0..100 score range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Rating {
    #[serde(rename = "very weak")]
    VeryWeak,
    #[serde(rename = "weak")]
    Weak,
    #[serde(rename = "moderate")]
    Moderate,
    #[serde(rename = "strong")]
    Strong,
    #[serde(rename = "very strong")]
    VeryStrong,
}

impl Rating {
    /// Maps a final score to its band.
    pub fn from_score(score: f64) -> Rating {
        if score < 25.0 {
            Rating::VeryWeak
        } else if score < 45.0 {
            Rating::Weak
        } else if score < 65.0 {
            Rating::Moderate
        } else if score < 85.0 {
            Rating::Strong
        } else {
            Rating::VeryStrong
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Rating::VeryWeak => "very weak",
            Rating::Weak => "weak",
            Rating::Moderate => "moderate",
            Rating::Strong => "strong",
            Rating::VeryStrong => "very strong",
        };
        f.write_str(label)
    }
}

/// Fraction of the four character classes present.
pub fn variety_score(password: &[char]) -> f64 {
    let mut present = [false; 4];
    for &c in password {
        let slot = match CharClass::of(c) {
            CharClass::Lower => 0,
            CharClass::Upper => 1,
            CharClass::Digit => 2,
            CharClass::Symbol => 3,
        };
        present[slot] = true;
    }
    present.iter().filter(|&&p| p).count() as f64 / 4.0
}

/// Saturating length score: linear up to [`REFERENCE_LENGTH`], then 1.
pub fn length_score(length: usize) -> f64 {
    (length as f64 / REFERENCE_LENGTH as f64).min(1.0)
}

/// Weighted blend of all signals, clamped to 0..100. Structure terms are
/// inverted so that sparse graphs score high.
pub fn composite_score(
    length_score: f64,
    variety_score: f64,
    adjacency_ratio: f64,
    vc_ratio: f64,
    path_ratio: f64,
) -> f64 {
    let raw = WEIGHT_LENGTH * length_score
        + WEIGHT_VARIETY * variety_score
        + WEIGHT_ADJACENCY * (1.0 - adjacency_ratio)
        + WEIGHT_COVER * (1.0 - vc_ratio)
        + WEIGHT_PATH * (1.0 - path_ratio);
    100.0 * raw.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_variety_counts_distinct_classes() {
        assert_eq!(variety_score(&chars("aaa")), 0.25);
        assert_eq!(variety_score(&chars("aA")), 0.5);
        assert_eq!(variety_score(&chars("aA1")), 0.75);
        assert_eq!(variety_score(&chars("aA1!")), 1.0);
        // non-ASCII counts as symbol, not a fifth class
        assert_eq!(variety_score(&chars("aé")), 0.5);
    }

    #[test]
    fn test_length_score_saturates() {
        assert_eq!(length_score(0), 0.0);
        assert_eq!(length_score(8), 0.5);
        assert_eq!(length_score(16), 1.0);
        assert_eq!(length_score(40), 1.0);
    }

    #[test]
    fn test_composite_known_values() {
        // the "aaa" scenario
        let score = composite_score(0.1875, 0.25, 1.0, 0.0, 1.0 / 3.0);
        assert!((score - 29.479).abs() < 0.01, "got {score}");
        // the "qwerty" scenario
        let score = composite_score(0.375, 0.25, 1.0, 0.5, 1.0);
        assert!((score - 24.375).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_composite_bounds() {
        assert_eq!(composite_score(0.0, 0.0, 1.0, 1.0, 1.0), 0.0);
        assert_eq!(composite_score(1.0, 1.0, 0.0, 0.0, 0.0), 100.0);
    }

    #[test]
    fn test_composite_monotone_in_length_score() {
        let lower = composite_score(0.3, 0.5, 0.4, 0.2, 0.5);
        let higher = composite_score(0.6, 0.5, 0.4, 0.2, 0.5);
        assert!(higher > lower);
    }

    #[test]
    fn test_rating_bands_partition_the_range() {
        assert_eq!(Rating::from_score(0.0), Rating::VeryWeak);
        assert_eq!(Rating::from_score(24.999), Rating::VeryWeak);
        assert_eq!(Rating::from_score(25.0), Rating::Weak);
        assert_eq!(Rating::from_score(44.999), Rating::Weak);
        assert_eq!(Rating::from_score(45.0), Rating::Moderate);
        assert_eq!(Rating::from_score(65.0), Rating::Strong);
        assert_eq!(Rating::from_score(85.0), Rating::VeryStrong);
        assert_eq!(Rating::from_score(100.0), Rating::VeryStrong);
    }

    #[test]
    fn test_rating_labels() {
        assert_eq!(Rating::VeryWeak.to_string(), "very weak");
        assert_eq!(Rating::VeryStrong.to_string(), "very strong");
        assert_eq!(
            serde_json::to_value(Rating::Moderate).unwrap(),
            serde_json::json!("moderate")
        );
    }
}
