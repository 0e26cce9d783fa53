use serde::{Deserialize, Serialize};

use crate::degree::ScaleDegree;
use crate::key::{Key, KeyMode};

/// How closely an input chord matched a key's diatonic chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Same chord, spelling aside.
    Exact,
    /// Same root and base triad; the input carries a 7th, tension or bass.
    Partial,
}

/// Trait for key-suggestion scoring backends.
///
/// `HeuristicRanker` weighs match type, chord degree and how common the key is.
pub trait KeyRanker: Send + Sync {
    fn score(&self, key: Key, degree: ScaleDegree, match_type: MatchType) -> f64;
}

/// Fixed weights: match base, primary/secondary triad bonus, key popularity.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicRanker;

impl HeuristicRanker {
    fn match_weight(match_type: MatchType) -> f64 {
        match match_type {
            MatchType::Exact => 10.0,
            MatchType::Partial => 7.0,
        }
    }

    fn degree_weight(degree: ScaleDegree) -> f64 {
        match degree {
            ScaleDegree::I | ScaleDegree::IV | ScaleDegree::V => 3.0,
            ScaleDegree::II | ScaleDegree::VI => 2.0,
            ScaleDegree::III | ScaleDegree::VII => 1.0,
        }
    }

    /// Common keys rank above rare ones; majors slightly above minors.
    fn usage_weight(key: Key) -> f64 {
        let major = key.mode == KeyMode::Major;
        match key.tonic.semitone() {
            // C G D A E
            0 | 7 | 2 | 9 | 4 => {
                if major {
                    2.0
                } else {
                    1.5
                }
            }
            // F B F# C#
            5 | 11 | 6 | 1 => {
                if major {
                    1.5
                } else {
                    1.0
                }
            }
            _ => 1.0,
        }
    }
}

impl KeyRanker for HeuristicRanker {
    fn score(&self, key: Key, degree: ScaleDegree, match_type: MatchType) -> f64 {
        Self::match_weight(match_type) + Self::degree_weight(degree) + Self::usage_weight(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::PitchClass::*;

    #[test]
    fn exact_tonic_in_c_major() {
        let score = HeuristicRanker.score(Key::major(C), ScaleDegree::I, MatchType::Exact);
        assert_eq!(score, 15.0);
    }

    #[test]
    fn minor_and_partial_weights() {
        let r = HeuristicRanker;
        assert_eq!(r.score(Key::minor(A), ScaleDegree::III, MatchType::Exact), 12.5);
        assert_eq!(r.score(Key::major(G), ScaleDegree::IV, MatchType::Partial), 12.0);
        assert_eq!(r.score(Key::minor(FSharp), ScaleDegree::II, MatchType::Exact), 13.0);
        assert_eq!(r.score(Key::major(GSharp), ScaleDegree::VII, MatchType::Partial), 9.0);
    }

    #[test]
    fn usage_weight_ignores_spelling() {
        assert_eq!(
            HeuristicRanker::usage_weight(Key::major(DFlat)),
            HeuristicRanker::usage_weight(Key::major(CSharp))
        );
        assert_eq!(HeuristicRanker::usage_weight(Key::major(BFlat)), 1.0);
    }
}
