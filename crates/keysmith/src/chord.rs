use serde::{Deserialize, Serialize};

use crate::pitch::PitchClass;
use crate::quality::{ChordExtension, ChordQuality};

/// A chord: root, quality, added extensions and an optional bass note.
///
/// Equality is structural. Two chords spelled differently (`A#` vs `Bb`) are
/// not equal; use [`Chord::sounds_like`] to compare by pitch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chord {
    root: PitchClass,
    quality: ChordQuality,
    extensions: Vec<ChordExtension>,
    bass: Option<PitchClass>,
}

impl Chord {
    pub fn new(root: PitchClass, quality: ChordQuality) -> Self {
        Self {
            root,
            quality,
            extensions: Vec::new(),
            bass: None,
        }
    }

    /// Adds extensions, keeping first-seen order and dropping repeats.
    pub fn with_extensions(mut self, extensions: impl IntoIterator<Item = ChordExtension>) -> Self {
        for ext in extensions {
            if !self.extensions.contains(&ext) {
                self.extensions.push(ext);
            }
        }
        self
    }

    pub fn with_bass(mut self, bass: PitchClass) -> Self {
        self.bass = Some(bass);
        self
    }

    pub fn root(&self) -> PitchClass {
        self.root
    }

    pub fn quality(&self) -> ChordQuality {
        self.quality
    }

    pub fn extensions(&self) -> &[ChordExtension] {
        &self.extensions
    }

    pub fn bass(&self) -> Option<PitchClass> {
        self.bass
    }

    fn sorted_extension_symbols(&self) -> Vec<&'static str> {
        let mut symbols: Vec<&'static str> = self.extensions.iter().map(|e| e.symbol()).collect();
        symbols.sort_unstable();
        symbols
    }

    /// Display symbol such as `Am7`, `G7/B` or `C7#9b13`.
    pub fn symbol(&self) -> String {
        let mut out = String::from(self.root.name());
        out.push_str(self.quality.symbol());
        for symbol in self.sorted_extension_symbols() {
            out.push_str(symbol);
        }
        if let Some(bass) = self.bass.filter(|b| *b != self.root) {
            out.push('/');
            out.push_str(bass.name());
        }
        out
    }

    /// Chord tones from the root up, sharp-spelled.
    pub fn notes(&self) -> Vec<PitchClass> {
        let root = self.root.semitone() as i32;
        let mut notes: Vec<PitchClass> = self
            .quality
            .intervals()
            .iter()
            .map(|&i| PitchClass::from_semitone(root + i as i32))
            .collect();

        for ext in &self.extensions {
            let note = PitchClass::from_semitone(root + ext.semitone_offset() as i32);
            if !notes.contains(&note) {
                notes.push(note);
            }
        }
        notes
    }

    pub fn is_triad(&self) -> bool {
        !self.quality.is_seventh() && !self.quality.is_extended() && self.extensions.is_empty()
    }

    pub fn is_seventh_chord(&self) -> bool {
        self.quality.is_seventh() || self.extensions.iter().any(|e| e.is_tension())
    }

    pub fn is_slash_chord(&self) -> bool {
        self.bass.is_some_and(|b| b != self.root)
    }

    /// Whether the chord sounds `note`, compared by pitch rather than spelling.
    pub fn contains_note(&self, note: PitchClass) -> bool {
        self.notes().iter().any(|n| n.same_pitch(&note))
    }

    /// Puts the `inversion`-th chord tone in the bass.
    ///
    /// Root position (0) and out-of-range inversions return the chord unchanged.
    pub fn inverted(&self, inversion: usize) -> Chord {
        let notes = self.notes();
        match notes.get(inversion) {
            Some(&bass) if inversion > 0 => self.clone().with_bass(bass),
            _ => self.clone(),
        }
    }

    /// Same root pitch, quality, extensions and bass pitch, regardless of spelling.
    pub fn sounds_like(&self, other: &Chord) -> bool {
        let bass_matches = match (self.bass, other.bass) {
            (None, None) => true,
            (Some(a), Some(b)) => a.same_pitch(&b),
            _ => false,
        };
        self.root.same_pitch(&other.root)
            && self.quality == other.quality
            && self.extensions == other.extensions
            && bass_matches
    }

    /// Stable string identity used for memoization.
    pub fn cache_key(&self) -> String {
        let bass = self.bass.map(|b| b.name()).unwrap_or("none");
        format!(
            "{}_{}_{}_{}",
            self.root.name(),
            self.quality.symbol(),
            self.sorted_extension_symbols().join("_"),
            bass
        )
    }
}

impl std::fmt::Display for Chord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.symbol())
    }
}
