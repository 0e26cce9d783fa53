use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::chord::Chord;
use crate::diatonic::DiatonicChord;
use crate::key::Key;
use crate::suggest::KeySuggestion;

pub const DEFAULT_CAPACITY: usize = 100;

/// Bounded map that evicts the least recently used entry.
///
/// Recency is kept in a queue, front = oldest. Capacities stay small, so
/// linear reordering is fine.
#[derive(Debug)]
pub struct LruMap<V> {
    entries: HashMap<String, V>,
    order: VecDeque<String>,
    capacity: usize,
}

impl<V: Clone> LruMap<V> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }

    /// Returns a copy of the value and marks it most recently used.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let value = self.entries.get(key).cloned()?;
        self.touch(key);
        Some(value)
    }

    pub fn insert(&mut self, key: String, value: V) {
        if self.entries.contains_key(&key) {
            self.entries.insert(key.clone(), value);
            self.touch(&key);
            return;
        }

        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, value);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CacheStats {
    pub diatonic_entries: usize,
    pub suggestion_entries: usize,
    pub capacity: usize,
}

impl CacheStats {
    pub fn diatonic_usage(&self) -> f64 {
        self.diatonic_entries as f64 / self.capacity as f64
    }

    pub fn suggestion_usage(&self) -> f64 {
        self.suggestion_entries as f64 / self.capacity as f64
    }
}

struct Maps {
    diatonic: LruMap<Vec<DiatonicChord>>,
    suggestions: LruMap<Vec<KeySuggestion>>,
}

/// Memoizes diatonic tables per key and suggestion lists per chord.
///
/// Both maps sit behind one mutex. They only hold plain values, so a
/// poisoned lock is taken over rather than reported.
pub struct TheoryCache {
    maps: Mutex<Maps>,
    capacity: usize,
}

impl Default for TheoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl TheoryCache {
    /// `capacity` applies to each map separately; zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            maps: Mutex::new(Maps {
                diatonic: LruMap::new(capacity),
                suggestions: LruMap::new(capacity),
            }),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Maps> {
        self.maps.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get_diatonic_chords(&self, key: &Key) -> Option<Vec<DiatonicChord>> {
        self.lock().diatonic.get(&key.cache_key())
    }

    pub fn cache_diatonic_chords(&self, key: &Key, chords: Vec<DiatonicChord>) {
        self.lock().diatonic.insert(key.cache_key(), chords);
    }

    pub fn get_key_suggestions(&self, chord: &Chord) -> Option<Vec<KeySuggestion>> {
        self.lock().suggestions.get(&chord.cache_key())
    }

    pub fn cache_key_suggestions(&self, chord: &Chord, suggestions: Vec<KeySuggestion>) {
        self.lock().suggestions.insert(chord.cache_key(), suggestions);
    }

    pub fn clear_all(&self) {
        let mut maps = self.lock();
        maps.diatonic.clear();
        maps.suggestions.clear();
    }

    pub fn clear_diatonic_chords(&self) {
        self.lock().diatonic.clear();
    }

    pub fn clear_key_suggestions(&self) {
        self.lock().suggestions.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let maps = self.lock();
        CacheStats {
            diatonic_entries: maps.diatonic.len(),
            suggestion_entries: maps.suggestions.len(),
            capacity: self.capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diatonic::chords_for;
    use crate::pitch::PitchClass::*;
    use crate::quality::ChordQuality;
    use crate::suggest::suggest_keys;
    use std::sync::Arc;

    #[test]
    fn lru_evicts_oldest() {
        let mut map = LruMap::new(2);
        map.insert("a".into(), 1);
        map.insert("b".into(), 2);
        map.insert("c".into(), 3);
        assert!(!map.contains_key("a"));
        assert_eq!(map.get("b"), Some(2));
        assert_eq!(map.get("c"), Some(3));
    }

    #[test]
    fn lru_get_refreshes_recency() {
        let mut map = LruMap::new(2);
        map.insert("a".into(), 1);
        map.insert("b".into(), 2);
        assert_eq!(map.get("a"), Some(1));
        map.insert("c".into(), 3);
        assert!(map.contains_key("a"));
        assert!(!map.contains_key("b"));
    }

    #[test]
    fn lru_reinsert_replaces_and_refreshes() {
        let mut map = LruMap::new(2);
        map.insert("a".into(), 1);
        map.insert("b".into(), 2);
        map.insert("a".into(), 10);
        assert_eq!(map.len(), 2);
        map.insert("c".into(), 3);
        assert_eq!(map.get("a"), Some(10));
        assert!(!map.contains_key("b"));
    }

    #[test]
    fn lru_capacity_one() {
        let mut map = LruMap::new(0);
        assert_eq!(map.capacity(), 1);
        map.insert("a".into(), 1);
        map.insert("b".into(), 2);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a"), None);
        assert_eq!(map.get("b"), Some(2));
    }

    #[test]
    fn miss_is_none_and_empty_list_is_a_hit() {
        let cache = TheoryCache::default();
        let chord = Chord::new(C, ChordQuality::Augmented);
        assert_eq!(cache.get_key_suggestions(&chord), None);

        cache.cache_key_suggestions(&chord, Vec::new());
        assert_eq!(cache.get_key_suggestions(&chord), Some(Vec::new()));
    }

    #[test]
    fn diatonic_round_trip() {
        let cache = TheoryCache::default();
        let key = Key::major(C);
        assert!(cache.get_diatonic_chords(&key).is_none());
        cache.cache_diatonic_chords(&key, chords_for(key));
        assert_eq!(cache.get_diatonic_chords(&key), Some(chords_for(key)));
        assert!(cache.get_diatonic_chords(&Key::minor(C)).is_none());
    }

    #[test]
    fn evicts_at_capacity() {
        let cache = TheoryCache::default();
        for key in &Key::ALL_CANDIDATES {
            cache.cache_diatonic_chords(key, chords_for(*key));
        }
        assert_eq!(cache.stats().diatonic_entries, 24);

        let small = TheoryCache::new(3);
        for key in &Key::ALL_CANDIDATES[..4] {
            small.cache_diatonic_chords(key, chords_for(*key));
        }
        assert_eq!(small.stats().diatonic_entries, 3);
        assert!(small.get_diatonic_chords(&Key::ALL_CANDIDATES[0]).is_none());
        assert!(small.get_diatonic_chords(&Key::ALL_CANDIDATES[3]).is_some());
    }

    #[test]
    fn clear_per_map() {
        let cache = TheoryCache::default();
        let chord = Chord::new(C, ChordQuality::Major);
        cache.cache_diatonic_chords(&Key::major(C), chords_for(Key::major(C)));
        cache.cache_key_suggestions(&chord, suggest_keys(&chord));

        cache.clear_diatonic_chords();
        assert_eq!(cache.stats().diatonic_entries, 0);
        assert_eq!(cache.stats().suggestion_entries, 1);

        cache.clear_key_suggestions();
        assert_eq!(cache.stats().suggestion_entries, 0);

        cache.cache_diatonic_chords(&Key::major(C), chords_for(Key::major(C)));
        cache.cache_key_suggestions(&chord, Vec::new());
        cache.clear_all();
        let stats = cache.stats();
        assert_eq!((stats.diatonic_entries, stats.suggestion_entries), (0, 0));
    }

    #[test]
    fn stats_report_usage() {
        let cache = TheoryCache::new(4);
        cache.cache_diatonic_chords(&Key::major(C), chords_for(Key::major(C)));
        let stats = cache.stats();
        assert_eq!(stats.capacity, 4);
        assert_eq!(stats.diatonic_usage(), 0.25);
        assert_eq!(stats.suggestion_usage(), 0.0);
    }

    #[test]
    fn concurrent_access() {
        let cache = Arc::new(TheoryCache::new(8));
        let handles: Vec<_> = Key::ALL_CANDIDATES
            .iter()
            .copied()
            .map(|key| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    cache.cache_diatonic_chords(&key, chords_for(key));
                    let _ = cache.get_diatonic_chords(&key);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.stats().diatonic_entries, 8);
    }
}
