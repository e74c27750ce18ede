//! String catalog and mode vocabularies
//!
//! Handles:
//! - The 13-string koto catalog and technique marker glyphs
//! - Per-mode oshi/interval vocabularies (beginner/intermediate/advanced)
//! - Cumulative vocabulary resolution (higher modes include lower tiers)
//! - Optional JSON catalog override with validation

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::str::FromStr;
use thiserror::Error;

/// The 13 koto strings, in playing order (strings 1-13).
pub const STRINGS: [&str; 13] = [
    "一", "二", "三", "四", "五", "六", "七", "八", "九", "十", "斗", "為", "巾",
];

/// Marker glyph for a weak push (yowa oshi).
pub const YOWA_MARKER: &str = "ｦ";
/// Marker glyph for a strong push (tsuyo oshi).
pub const TSUYO_MARKER: &str = "ｵ";

/// Fixed rendering for an octave on string 1.
pub const OCTAVE_ON_ONE: &str = "一五";

/// Glyph for a 1-based string number. Panics on 0 or > 13; callers hold
/// catalog-validated numbers.
pub fn glyph(string_no: u8) -> &'static str {
    STRINGS[string_no as usize - 1]
}

/// Difficulty mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Beginner,
    Intermediate,
    Advanced,
}

impl Mode {
    /// Display name, capitalized for the info line
    pub fn display_name(&self) -> &'static str {
        match self {
            Mode::Beginner => "Beginner",
            Mode::Intermediate => "Intermediate",
            Mode::Advanced => "Advanced",
        }
    }

    fn index(&self) -> usize {
        match self {
            Mode::Beginner => 0,
            Mode::Intermediate => 1,
            Mode::Advanced => 2,
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Mode::Beginner),
            "intermediate" => Ok(Mode::Intermediate),
            "advanced" => Ok(Mode::Advanced),
            other => Err(format!(
                "unknown mode '{}' (expected beginner, intermediate, or advanced)",
                other
            )),
        }
    }
}

/// Vocabulary of a single mode tier (string numbers are 1-based)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModeVocab {
    /// Strings eligible for weak-push notation
    pub yowa: Vec<u8>,
    /// Strings eligible for strong-push notation
    pub tsuyo: Vec<u8>,
    /// Melodic intervals, in string-count steps
    pub intervals: Vec<u8>,
}

/// Vocabulary resolved for a mode: the union of its tier and all lower tiers
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedVocab {
    pub yowa: Vec<u8>,
    pub tsuyo: Vec<u8>,
    pub intervals: Vec<u8>,
}

/// Catalog load/validation failures
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read mode catalog '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse mode catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid mode catalog: {0}")]
    Invalid(String),
}

/// Mode catalog: one vocabulary tier per difficulty mode
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Catalog {
    beginner: ModeVocab,
    intermediate: ModeVocab,
    advanced: ModeVocab,
}

impl Catalog {
    /// Built-in mode table
    pub fn builtin() -> Self {
        Catalog {
            beginner: ModeVocab {
                yowa: vec![13],
                tsuyo: vec![4, 6, 9],
                intervals: vec![5],
            },
            intermediate: ModeVocab {
                yowa: vec![8, 11],
                tsuyo: vec![7, 10, 12],
                intervals: vec![1, 2, 3],
            },
            advanced: ModeVocab {
                yowa: vec![2, 3, 4, 5, 6, 7, 9, 10, 12],
                tsuyo: vec![2, 3, 5, 8, 11, 13],
                intervals: vec![3, 6],
            },
        }
    }

    /// Load a catalog override from a JSON file
    pub fn load(path: &str) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse and validate a catalog from JSON text
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn tier(&self, mode: Mode) -> &ModeVocab {
        match mode {
            Mode::Beginner => &self.beginner,
            Mode::Intermediate => &self.intermediate,
            Mode::Advanced => &self.advanced,
        }
    }

    fn tiers(&self) -> [&ModeVocab; 3] {
        [&self.beginner, &self.intermediate, &self.advanced]
    }

    /// Check every tier references real strings and renderable intervals
    fn validate(&self) -> Result<(), CatalogError> {
        let names = ["beginner", "intermediate", "advanced"];
        for (vocab, name) in self.tiers().iter().zip(names) {
            if vocab.yowa.is_empty() || vocab.tsuyo.is_empty() || vocab.intervals.is_empty() {
                return Err(CatalogError::Invalid(format!(
                    "{}: yowa, tsuyo, and intervals must all be non-empty",
                    name
                )));
            }
            for &n in vocab.yowa.iter().chain(&vocab.tsuyo) {
                if n < 1 || n as usize > STRINGS.len() {
                    return Err(CatalogError::Invalid(format!(
                        "{}: string number {} out of range 1-{}",
                        name,
                        n,
                        STRINGS.len()
                    )));
                }
            }
            for &k in &vocab.intervals {
                if k < 1 || k as usize >= STRINGS.len() {
                    return Err(CatalogError::Invalid(format!(
                        "{}: interval {} out of range 1-{}",
                        name,
                        k,
                        STRINGS.len() - 1
                    )));
                }
            }
        }
        Ok(())
    }

    /// Resolve the vocabulary for a mode.
    ///
    /// Beginner returns its own tier; intermediate unions beginner's; advanced
    /// unions all three. Sets are deduplicated and returned sorted ascending.
    pub fn resolve(&self, mode: Mode) -> ResolvedVocab {
        let tiers = self.tiers();
        let included = &tiers[..=mode.index()];

        ResolvedVocab {
            yowa: union(included.iter().map(|v| v.yowa.as_slice())),
            tsuyo: union(included.iter().map(|v| v.tsuyo.as_slice())),
            intervals: union(included.iter().map(|v| v.intervals.as_slice())),
        }
    }

    /// Tier vocabulary without lower modes merged in (settings summary display)
    #[allow(dead_code)]
    pub fn tier_vocab(&self, mode: Mode) -> &ModeVocab {
        self.tier(mode)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Deduplicating union of value slices, sorted ascending
fn union<'a>(slices: impl Iterator<Item = &'a [u8]>) -> Vec<u8> {
    let mut set = FxHashSet::default();
    for slice in slices {
        set.extend(slice.iter().copied());
    }
    let mut values: Vec<u8> = set.into_iter().collect();
    values.sort_unstable();
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_superset(bigger: &[u8], smaller: &[u8]) -> bool {
        smaller.iter().all(|v| bigger.contains(v))
    }

    #[test]
    fn test_vocabulary_is_cumulative() {
        let catalog = Catalog::builtin();
        let beginner = catalog.resolve(Mode::Beginner);
        let intermediate = catalog.resolve(Mode::Intermediate);
        let advanced = catalog.resolve(Mode::Advanced);

        assert!(is_superset(&intermediate.yowa, &beginner.yowa));
        assert!(is_superset(&intermediate.tsuyo, &beginner.tsuyo));
        assert!(is_superset(&intermediate.intervals, &beginner.intervals));

        assert!(is_superset(&advanced.yowa, &intermediate.yowa));
        assert!(is_superset(&advanced.tsuyo, &intermediate.tsuyo));
        assert!(is_superset(&advanced.intervals, &intermediate.intervals));
    }

    #[test]
    fn test_beginner_resolves_verbatim() {
        let vocab = Catalog::builtin().resolve(Mode::Beginner);
        assert_eq!(vocab.yowa, vec![13]);
        assert_eq!(vocab.tsuyo, vec![4, 6, 9]);
        assert_eq!(vocab.intervals, vec![5]);
    }

    #[test]
    fn test_union_deduplicates() {
        // Interval 3 appears in both intermediate and advanced tiers
        let vocab = Catalog::builtin().resolve(Mode::Advanced);
        assert_eq!(vocab.intervals, vec![1, 2, 3, 5, 6]);
    }

    #[test]
    fn test_rejects_out_of_range_string() {
        let json = r#"{
            "beginner": {"yowa": [14], "tsuyo": [4], "intervals": [5]},
            "intermediate": {"yowa": [8], "tsuyo": [7], "intervals": [1]},
            "advanced": {"yowa": [2], "tsuyo": [3], "intervals": [6]}
        }"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_unrenderable_interval() {
        let json = r#"{
            "beginner": {"yowa": [13], "tsuyo": [4], "intervals": [13]},
            "intermediate": {"yowa": [8], "tsuyo": [7], "intervals": [1]},
            "advanced": {"yowa": [2], "tsuyo": [3], "intervals": [6]}
        }"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_empty_set() {
        let json = r#"{
            "beginner": {"yowa": [], "tsuyo": [4], "intervals": [5]},
            "intermediate": {"yowa": [8], "tsuyo": [7], "intervals": [1]},
            "advanced": {"yowa": [2], "tsuyo": [3], "intervals": [6]}
        }"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::Invalid(_))
        ));
    }

    #[test]
    fn test_builtin_round_trips_through_json() {
        let json = serde_json::to_string(&Catalog::builtin()).unwrap();
        let parsed = Catalog::from_json(&json).unwrap();
        assert_eq!(
            parsed.resolve(Mode::Advanced),
            Catalog::builtin().resolve(Mode::Advanced)
        );
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("beginner".parse::<Mode>().unwrap(), Mode::Beginner);
        assert_eq!("Advanced".parse::<Mode>().unwrap(), Mode::Advanced);
        assert!("expert".parse::<Mode>().is_err());
    }
}
