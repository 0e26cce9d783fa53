//! Ranks the 24 major/minor keys by how well they accommodate a chord.

use serde::Serialize;
use tracing::debug;

use crate::chord::Chord;
use crate::degree::ScaleDegree;
use crate::diatonic::{self, DiatonicChord};
use crate::key::Key;
use crate::rank::{HeuristicRanker, KeyRanker, MatchType};

/// A key that could contain the chord, with why and how strongly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeySuggestion {
    key: Key,
    reason: String,
    score: f64,
    match_type: MatchType,
    matched_degree: ScaleDegree,
}

impl KeySuggestion {
    pub fn key(&self) -> Key {
        self.key
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn match_type(&self) -> MatchType {
        self.match_type
    }

    pub fn matched_degree(&self) -> ScaleDegree {
        self.matched_degree
    }
}

/// Suggest keys using the heuristic ranker and freshly generated diatonic tables.
pub fn suggest_keys(chord: &Chord) -> Vec<KeySuggestion> {
    suggest_keys_with(chord, &HeuristicRanker, diatonic::chords_for)
}

/// Suggest keys with a custom ranker and diatonic-table source.
///
/// `diatonic_chords` is called once per candidate key; the engine passes a
/// cache-backed lookup here.
pub fn suggest_keys_with<F>(
    chord: &Chord,
    ranker: &dyn KeyRanker,
    mut diatonic_chords: F,
) -> Vec<KeySuggestion>
where
    F: FnMut(Key) -> Vec<DiatonicChord>,
{
    let mut suggestions: Vec<KeySuggestion> = Key::ALL_CANDIDATES
        .iter()
        .filter_map(|&key| match_in_key(chord, key, &diatonic_chords(key), ranker))
        .collect();

    // Stable: equal scores keep candidate order.
    suggestions.sort_by(|a, b| b.score.total_cmp(&a.score));

    debug!(
        chord = %chord,
        results = suggestions.len(),
        "computed key suggestions"
    );
    suggestions
}

fn match_in_key(
    chord: &Chord,
    key: Key,
    table: &[DiatonicChord],
    ranker: &dyn KeyRanker,
) -> Option<KeySuggestion> {
    if let Some(found) = table.iter().find(|dc| dc.chord().sounds_like(chord)) {
        return Some(KeySuggestion {
            key,
            reason: format!("functions as chord {}", found.roman_numeral()),
            score: ranker.score(key, found.degree(), MatchType::Exact),
            match_type: MatchType::Exact,
            matched_degree: found.degree(),
        });
    }

    let base = chord.quality().base_triad();
    let found = table.iter().find(|dc| {
        dc.chord().root().same_pitch(&chord.root()) && dc.chord().quality() == base
    })?;

    Some(KeySuggestion {
        key,
        reason: format!(
            "functions as {} ({} interpreted as extended form)",
            found.roman_numeral(),
            chord.symbol()
        ),
        score: ranker.score(key, found.degree(), MatchType::Partial),
        match_type: MatchType::Partial,
        matched_degree: found.degree(),
    })
}
