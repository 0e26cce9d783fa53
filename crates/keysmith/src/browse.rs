//! Presenting suggestion lists: ordering, filtering, confidence and the
//! summary of a chosen key.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::degree::HarmonicFunction;
use crate::diatonic::DiatonicChord;
use crate::key::{Key, KeyMode};
use crate::suggest::KeySuggestion;

/// Tonics (by pitch) treated as everyday keys: C G D A E B F.
const STANDARD_TONICS: [u8; 7] = [0, 7, 2, 9, 4, 11, 5];

pub const DEFAULT_MAX_RESULTS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Highest score first.
    #[default]
    Score,
    /// Alphabetical by full key name.
    #[serde(rename = "name")]
    KeyName,
    /// Major keys first, then by name.
    Mode,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort order '{0}' (expected score, name or mode)")]
pub struct UnknownSortOrder(pub String);

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "score" => Ok(SortOrder::Score),
            "name" => Ok(SortOrder::KeyName),
            "mode" => Ok(SortOrder::Mode),
            _ => Err(UnknownSortOrder(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseOptions {
    pub sort_order: SortOrder,
    pub max_results: usize,
    pub standard_keys_only: bool,
}

impl Default for BrowseOptions {
    fn default() -> Self {
        Self {
            sort_order: SortOrder::Score,
            max_results: DEFAULT_MAX_RESULTS,
            standard_keys_only: false,
        }
    }
}

pub fn is_standard_key(key: &Key) -> bool {
    STANDARD_TONICS.contains(&key.tonic.semitone())
}

impl BrowseOptions {
    /// Filter, sort and truncate. All sorts are stable.
    pub fn apply(&self, suggestions: &[KeySuggestion]) -> Vec<KeySuggestion> {
        let mut out: Vec<KeySuggestion> = suggestions
            .iter()
            .filter(|s| !self.standard_keys_only || is_standard_key(&s.key()))
            .cloned()
            .collect();

        match self.sort_order {
            SortOrder::Score => out.sort_by(|a, b| b.score().total_cmp(&a.score())),
            SortOrder::KeyName => out.sort_by_key(|s| s.key().name()),
            SortOrder::Mode => out.sort_by_key(|s| (s.key().mode != KeyMode::Major, s.key().name())),
        }

        out.truncate(self.max_results);
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    VeryHigh,
    High,
    Medium,
    Low,
    VeryLow,
}

impl ConfidenceLevel {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 12.0 => ConfidenceLevel::VeryHigh,
            s if s >= 10.0 => ConfidenceLevel::High,
            s if s >= 7.0 => ConfidenceLevel::Medium,
            s if s >= 5.0 => ConfidenceLevel::Low,
            _ => ConfidenceLevel::VeryLow,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceLevel::VeryHigh => "very high",
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::Low => "low",
            ConfidenceLevel::VeryLow => "very low",
        }
    }

    pub fn color_hint(&self) -> &'static str {
        match self {
            ConfidenceLevel::VeryHigh => "green",
            ConfidenceLevel::High => "blue",
            ConfidenceLevel::Medium => "orange",
            ConfidenceLevel::Low => "yellow",
            ConfidenceLevel::VeryLow => "red",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub fn detailed_reason(suggestion: &KeySuggestion) -> String {
    let level = ConfidenceLevel::from_score(suggestion.score());
    format!(
        "{}\nconfidence: {} (score: {:.1})",
        suggestion.reason(),
        level,
        suggestion.score()
    )
}

/// A suggestion the user picked, with its key's diatonic table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedKeyInfo {
    pub key: Key,
    pub suggestion: KeySuggestion,
    pub diatonic_chords: Vec<DiatonicChord>,
}

impl SelectedKeyInfo {
    pub fn chord_names(&self) -> Vec<String> {
        self.diatonic_chords
            .iter()
            .map(|dc| dc.chord().symbol())
            .collect()
    }

    pub fn roman_numerals(&self) -> Vec<&str> {
        self.diatonic_chords
            .iter()
            .map(|dc| dc.roman_numeral())
            .collect()
    }

    pub fn chords_by_function(&self) -> BTreeMap<HarmonicFunction, Vec<&DiatonicChord>> {
        let mut groups: BTreeMap<HarmonicFunction, Vec<&DiatonicChord>> = BTreeMap::new();
        for dc in &self.diatonic_chords {
            groups.entry(dc.function()).or_default().push(dc);
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::Chord;
    use crate::diatonic::chords_for;
    use crate::pitch::PitchClass::*;
    use crate::quality::ChordQuality;
    use crate::suggest::suggest_keys;
    use pretty_assertions::assert_eq;

    fn g7_suggestions() -> Vec<KeySuggestion> {
        suggest_keys(&Chord::new(G, ChordQuality::Dominant7))
    }

    fn names(suggestions: &[KeySuggestion]) -> Vec<String> {
        suggestions.iter().map(|s| s.key().short_name()).collect()
    }

    #[test]
    fn parse_sort_order() {
        assert_eq!("score".parse::<SortOrder>(), Ok(SortOrder::Score));
        assert_eq!("Name".parse::<SortOrder>(), Ok(SortOrder::KeyName));
        assert_eq!("mode".parse::<SortOrder>(), Ok(SortOrder::Mode));
        assert!("random".parse::<SortOrder>().is_err());
    }

    #[test]
    fn default_keeps_score_order() {
        let all = g7_suggestions();
        let shown = BrowseOptions::default().apply(&all);
        assert_eq!(shown, all);
    }

    #[test]
    fn sort_by_name() {
        let options = BrowseOptions {
            sort_order: SortOrder::KeyName,
            ..Default::default()
        };
        assert_eq!(
            names(&options.apply(&g7_suggestions())),
            ["Am", "Bm", "C", "D", "Em", "G"]
        );
    }

    #[test]
    fn sort_by_mode() {
        let options = BrowseOptions {
            sort_order: SortOrder::Mode,
            ..Default::default()
        };
        assert_eq!(
            names(&options.apply(&g7_suggestions())),
            ["C", "D", "G", "Am", "Bm", "Em"]
        );
    }

    #[test]
    fn standard_filter_and_limit() {
        let bb = suggest_keys(&Chord::new(BFlat, ChordQuality::Major));
        let options = BrowseOptions {
            standard_keys_only: true,
            ..Default::default()
        };
        let shown = options.apply(&bb);
        assert!(shown.iter().all(|s| is_standard_key(&s.key())));
        assert!(shown.len() < bb.len());

        let limited = BrowseOptions {
            max_results: 2,
            ..Default::default()
        };
        assert_eq!(limited.apply(&g7_suggestions()).len(), 2);
    }

    #[test]
    fn confidence_thresholds() {
        assert_eq!(ConfidenceLevel::from_score(15.0), ConfidenceLevel::VeryHigh);
        assert_eq!(ConfidenceLevel::from_score(12.0), ConfidenceLevel::VeryHigh);
        assert_eq!(ConfidenceLevel::from_score(11.9), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(10.0), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(9.5), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(7.0), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(5.0), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(4.9), ConfidenceLevel::VeryLow);
        assert_eq!(ConfidenceLevel::High.color_hint(), "blue");
    }

    #[test]
    fn detailed_reason_appends_confidence() {
        let top = &suggest_keys(&Chord::new(C, ChordQuality::Major))[0];
        assert_eq!(
            detailed_reason(top),
            "functions as chord I\nconfidence: very high (score: 15.0)"
        );
    }

    #[test]
    fn selected_key_summary() {
        let suggestion = suggest_keys(&Chord::new(C, ChordQuality::Major)).remove(0);
        let info = SelectedKeyInfo {
            key: suggestion.key(),
            suggestion,
            diatonic_chords: chords_for(Key::major(C)),
        };
        assert_eq!(info.chord_names(), ["C", "Dm", "Em", "F", "G", "Am", "Bdim"]);
        assert_eq!(info.roman_numerals()[6], "vii°");

        let groups = info.chords_by_function();
        let tonic: Vec<String> = groups[&HarmonicFunction::Tonic]
            .iter()
            .map(|dc| dc.chord().symbol())
            .collect();
        assert_eq!(tonic, ["C", "Em", "Am"]);
        assert_eq!(groups[&HarmonicFunction::Subdominant].len(), 2);
        assert_eq!(groups[&HarmonicFunction::Dominant].len(), 2);
    }
}
