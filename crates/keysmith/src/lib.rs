pub mod browse;
pub mod cache;
pub mod chord;
pub mod degree;
pub mod diatonic;
pub mod error;
pub mod key;
pub mod parser;
pub mod pitch;
pub mod quality;
pub mod rank;
pub mod suggest;

pub use browse::{BrowseOptions, ConfidenceLevel, SelectedKeyInfo, SortOrder};
pub use cache::{CacheStats, TheoryCache, DEFAULT_CAPACITY};
pub use chord::Chord;
pub use degree::{HarmonicFunction, ScaleDegree};
pub use diatonic::DiatonicChord;
pub use error::ChordParsingError;
pub use key::{Key, KeyMode, KeySignature};
pub use parser::ChordParser;
pub use pitch::PitchClass;
pub use quality::{ChordExtension, ChordQuality};
pub use rank::{HeuristicRanker, KeyRanker, MatchType};
pub use suggest::KeySuggestion;

use std::sync::Arc;

use tracing::debug;

/// Chord parsing, diatonic tables and key suggestions behind a shared cache.
///
/// Cloning is cheap; clones share the same cache and ranker.
#[derive(Clone)]
pub struct TheoryEngine {
    parser: ChordParser,
    ranker: Arc<dyn KeyRanker>,
    cache: Arc<TheoryCache>,
}

impl TheoryEngine {
    /// Create with the default heuristic ranker.
    pub fn new(cache: Arc<TheoryCache>) -> Self {
        Self::with_ranker(Arc::new(HeuristicRanker), cache)
    }

    /// Create with a custom ranker (for testing or alternative weightings).
    pub fn with_ranker(ranker: Arc<dyn KeyRanker>, cache: Arc<TheoryCache>) -> Self {
        Self {
            parser: ChordParser,
            ranker,
            cache,
        }
    }

    pub fn cache(&self) -> &Arc<TheoryCache> {
        &self.cache
    }

    pub fn parse_chord(&self, input: &str) -> Result<Chord, ChordParsingError> {
        self.parser.parse(input)
    }

    /// Diatonic triads of `key`, served from the cache when present.
    pub fn diatonic_chords(&self, key: Key) -> Vec<DiatonicChord> {
        if let Some(cached) = self.cache.get_diatonic_chords(&key) {
            debug!(key = %key, "diatonic cache hit");
            return cached;
        }

        debug!(key = %key, "diatonic cache miss, generating");
        let chords = diatonic::chords_for(key);
        self.cache.cache_diatonic_chords(&key, chords.clone());
        chords
    }

    /// Ranked key suggestions for `chord`, served from the cache when present.
    ///
    /// An empty result is cached like any other.
    pub fn suggest_keys(&self, chord: &Chord) -> Vec<KeySuggestion> {
        if let Some(cached) = self.cache.get_key_suggestions(chord) {
            debug!(chord = %chord, "suggestion cache hit");
            return cached;
        }

        debug!(chord = %chord, "suggestion cache miss, computing");
        let suggestions =
            suggest::suggest_keys_with(chord, self.ranker.as_ref(), |key| self.diatonic_chords(key));
        self.cache.cache_key_suggestions(chord, suggestions.clone());
        suggestions
    }

    /// Parse then suggest.
    pub fn suggest_for_symbol(&self, input: &str) -> Result<Vec<KeySuggestion>, ChordParsingError> {
        let chord = self.parse_chord(input)?;
        Ok(self.suggest_keys(&chord))
    }

    /// Pair a chosen suggestion with its key's diatonic table.
    pub fn select_key(&self, suggestion: &KeySuggestion) -> SelectedKeyInfo {
        let key = suggestion.key();
        SelectedKeyInfo {
            key,
            suggestion: suggestion.clone(),
            diatonic_chords: self.diatonic_chords(key),
        }
    }
}

impl Default for TheoryEngine {
    fn default() -> Self {
        Self::new(Arc::new(TheoryCache::default()))
    }
}

impl std::fmt::Debug for TheoryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TheoryEngine")
            .field("cache", &self.cache.stats())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRanker(AtomicUsize);

    impl KeyRanker for CountingRanker {
        fn score(&self, key: Key, degree: ScaleDegree, match_type: MatchType) -> f64 {
            self.0.fetch_add(1, Ordering::SeqCst);
            HeuristicRanker.score(key, degree, match_type)
        }
    }

    #[test]
    fn second_lookup_served_from_cache() {
        let ranker = Arc::new(CountingRanker(AtomicUsize::new(0)));
        let engine = TheoryEngine::with_ranker(ranker.clone(), Arc::new(TheoryCache::default()));
        let chord = Chord::new(PitchClass::C, ChordQuality::Major);

        let first = engine.suggest_keys(&chord);
        let scored = ranker.0.load(Ordering::SeqCst);
        assert_eq!(scored, first.len());

        let second = engine.suggest_keys(&chord);
        assert_eq!(first, second);
        assert_eq!(ranker.0.load(Ordering::SeqCst), scored);
    }

    #[test]
    fn suggestion_fills_diatonic_cache() {
        let engine = TheoryEngine::default();
        engine.suggest_keys(&Chord::new(PitchClass::G, ChordQuality::Dominant7));
        let stats = engine.cache().stats();
        assert_eq!(stats.diatonic_entries, 24);
        assert_eq!(stats.suggestion_entries, 1);
    }

    #[test]
    fn empty_result_is_cached() {
        let cache = Arc::new(TheoryCache::default());
        let engine = TheoryEngine::new(cache.clone());
        let chord = Chord::new(PitchClass::C, ChordQuality::Augmented);
        assert!(engine.suggest_keys(&chord).is_empty());
        assert_eq!(cache.get_key_suggestions(&chord), Some(Vec::new()));
    }

    #[test]
    fn clones_share_the_cache() {
        let engine = TheoryEngine::default();
        let clone = engine.clone();
        clone.diatonic_chords(Key::minor(PitchClass::A));
        assert_eq!(engine.cache().stats().diatonic_entries, 1);
    }

    #[test]
    fn suggest_for_symbol_propagates_parse_errors() {
        let engine = TheoryEngine::default();
        assert_eq!(
            engine.suggest_for_symbol("H7"),
            Err(ChordParsingError::UnknownNote("H".into()))
        );
        let am = engine.suggest_for_symbol("Am").unwrap();
        assert!(am
            .iter()
            .any(|s| s.key() == Key::minor(PitchClass::A) && s.score() == 14.5));
    }

    #[test]
    fn select_key_builds_table() {
        let engine = TheoryEngine::default();
        let top = engine.suggest_for_symbol("G7").unwrap().remove(0);
        let info = engine.select_key(&top);
        assert_eq!(info.key, Key::major(PitchClass::C));
        assert_eq!(info.chord_names()[4], "G");
    }

    #[test]
    fn engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TheoryEngine>();
    }
}
