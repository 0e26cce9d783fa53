//! Keys, modes and key signatures.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChordParsingError;
use crate::pitch::PitchClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyMode {
    Major,
    /// Natural minor.
    Minor,
}

impl KeyMode {
    pub fn name(&self) -> &'static str {
        match self {
            KeyMode::Major => "Major",
            KeyMode::Minor => "minor",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            KeyMode::Major => "",
            KeyMode::Minor => "m",
        }
    }

    pub fn japanese_description(&self) -> &'static str {
        match self {
            KeyMode::Major => "長調",
            KeyMode::Minor => "短調",
        }
    }

    pub fn scale_intervals(&self) -> [u8; 7] {
        match self {
            KeyMode::Major => [0, 2, 4, 5, 7, 9, 11],
            KeyMode::Minor => [0, 2, 3, 5, 7, 8, 10],
        }
    }

    pub fn other(&self) -> KeyMode {
        match self {
            KeyMode::Major => KeyMode::Minor,
            KeyMode::Minor => KeyMode::Major,
        }
    }

    /// Accepts `""`, `"maj"`, `"major"`, `"m"`, `"min"`, `"minor"`.
    fn from_word(word: &str) -> Option<KeyMode> {
        if word == "m" {
            return Some(KeyMode::Minor);
        }
        match word.to_ascii_lowercase().as_str() {
            "" | "maj" | "major" => Some(KeyMode::Major),
            "min" | "minor" => Some(KeyMode::Minor),
            _ => None,
        }
    }
}

/// Letters carrying a sharp, in key-signature order.
const SHARP_ORDER: [char; 7] = ['F', 'C', 'G', 'D', 'A', 'E', 'B'];

/// Letters carrying a flat, in key-signature order.
const FLAT_ORDER: [char; 7] = ['B', 'E', 'A', 'D', 'G', 'C', 'F'];

/// Circle of fifths: tonic, mode, accidental count. First match by semitone wins.
const CIRCLE_OF_FIFTHS: [(PitchClass, KeyMode, i8); 26] = [
    (PitchClass::C, KeyMode::Major, 0),
    (PitchClass::G, KeyMode::Major, 1),
    (PitchClass::D, KeyMode::Major, 2),
    (PitchClass::A, KeyMode::Major, 3),
    (PitchClass::E, KeyMode::Major, 4),
    (PitchClass::B, KeyMode::Major, 5),
    (PitchClass::FSharp, KeyMode::Major, 6),
    (PitchClass::F, KeyMode::Major, -1),
    (PitchClass::BFlat, KeyMode::Major, -2),
    (PitchClass::EFlat, KeyMode::Major, -3),
    (PitchClass::AFlat, KeyMode::Major, -4),
    (PitchClass::DFlat, KeyMode::Major, -5),
    (PitchClass::GFlat, KeyMode::Major, -6),
    (PitchClass::A, KeyMode::Minor, 0),
    (PitchClass::E, KeyMode::Minor, 1),
    (PitchClass::B, KeyMode::Minor, 2),
    (PitchClass::FSharp, KeyMode::Minor, 3),
    (PitchClass::CSharp, KeyMode::Minor, 4),
    (PitchClass::GSharp, KeyMode::Minor, 5),
    (PitchClass::DSharp, KeyMode::Minor, 6),
    (PitchClass::D, KeyMode::Minor, -1),
    (PitchClass::G, KeyMode::Minor, -2),
    (PitchClass::C, KeyMode::Minor, -3),
    (PitchClass::F, KeyMode::Minor, -4),
    (PitchClass::BFlat, KeyMode::Minor, -5),
    (PitchClass::EFlat, KeyMode::Minor, -6),
];

/// Number of sharps (positive) or flats (negative).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeySignature {
    pub accidentals: i8,
}

impl KeySignature {
    pub fn new(accidentals: i8) -> Self {
        Self { accidentals }
    }

    pub fn sharps(&self) -> &'static [char] {
        let n = (self.accidentals.max(0) as usize).min(SHARP_ORDER.len());
        &SHARP_ORDER[..n]
    }

    pub fn flats(&self) -> &'static [char] {
        let n = (self.accidentals.min(0).unsigned_abs() as usize).min(FLAT_ORDER.len());
        &FLAT_ORDER[..n]
    }
}

impl std::fmt::Display for KeySignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.accidentals {
            0 => write!(f, "♮"),
            n if n > 0 => write!(f, "{}♯", n),
            n => write!(f, "{}♭", n.unsigned_abs()),
        }
    }
}

/// A tonic and a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    pub tonic: PitchClass,
    pub mode: KeyMode,
}

impl Key {
    /// The keys considered when suggesting keys for a chord: twelve
    /// sharp-spelled tonics in chromatic order, major before minor.
    pub const ALL_CANDIDATES: [Key; 24] = {
        let mut keys = [Key::new(PitchClass::C, KeyMode::Major); 24];
        let mut i = 0;
        while i < 12 {
            keys[i * 2] = Key::new(PitchClass::CHROMATIC[i], KeyMode::Major);
            keys[i * 2 + 1] = Key::new(PitchClass::CHROMATIC[i], KeyMode::Minor);
            i += 1;
        }
        keys
    };

    pub const fn new(tonic: PitchClass, mode: KeyMode) -> Self {
        Self { tonic, mode }
    }

    pub const fn major(tonic: PitchClass) -> Self {
        Self::new(tonic, KeyMode::Major)
    }

    pub const fn minor(tonic: PitchClass) -> Self {
        Self::new(tonic, KeyMode::Minor)
    }

    /// "C Major", "A minor".
    pub fn name(&self) -> String {
        format!("{} {}", self.tonic.name(), self.mode.name())
    }

    /// "C", "Am".
    pub fn short_name(&self) -> String {
        format!("{}{}", self.tonic.name(), self.mode.symbol())
    }

    pub fn japanese_name(&self) -> String {
        format!("{}{}", self.tonic.name(), self.mode.japanese_description())
    }

    /// The seven scale notes.
    ///
    /// The tonic keeps its own spelling; every later note prefers a spelling
    /// whose letter is not used yet.
    pub fn scale(&self) -> Vec<PitchClass> {
        let tonic = self.tonic.semitone();
        let mut notes: Vec<PitchClass> = Vec::with_capacity(7);
        notes.push(self.tonic);

        for interval in &self.mode.scale_intervals()[1..] {
            let semitone = (tonic + interval) % 12;
            let candidates: Vec<PitchClass> = PitchClass::ALL
                .iter()
                .copied()
                .filter(|pc| pc.semitone() == semitone)
                .collect();

            let pick = candidates
                .iter()
                .copied()
                .find(|c| notes.iter().all(|n| n.letter() != c.letter()))
                .or_else(|| candidates.first().copied());

            if let Some(note) = pick {
                notes.push(note);
            }
        }
        notes
    }

    pub fn key_signature(&self) -> KeySignature {
        CIRCLE_OF_FIFTHS
            .iter()
            .find(|(tonic, mode, _)| tonic.same_pitch(&self.tonic) && *mode == self.mode)
            .map(|(_, _, n)| KeySignature::new(*n))
            .unwrap_or(KeySignature::new(0))
    }

    pub fn relative_key(&self) -> Key {
        match self.mode {
            KeyMode::Major => Key::minor(self.tonic.transposed(-3)),
            KeyMode::Minor => Key::major(self.tonic.transposed(3)),
        }
    }

    pub fn parallel_key(&self) -> Key {
        Key::new(self.tonic, self.mode.other())
    }

    /// Scale note for a 1-based degree.
    pub fn note_for_degree(&self, degree: u8) -> Option<PitchClass> {
        if !(1..=7).contains(&degree) {
            return None;
        }
        self.scale().get(degree as usize - 1).copied()
    }

    pub fn contains_note(&self, note: PitchClass) -> bool {
        self.scale().iter().any(|n| n.same_pitch(&note))
    }

    /// Stable string identity used for memoization.
    pub fn cache_key(&self) -> String {
        format!("{}_{}", self.tonic.name(), self.mode.name())
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Key {
    type Err = ChordParsingError;

    /// Parses "C", "Am", "F# minor", "Bb major".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ChordParsingError::EmptyInput);
        }

        let mut chars = trimmed.chars().peekable();

        let mut note = match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => c.to_ascii_uppercase().to_string(),
            _ => return Err(ChordParsingError::InvalidFormat),
        };

        // No mode word starts with '#' or 'b', so either is always an accidental.
        if let Some(&c) = chars.peek() {
            if c == '#' || c == 'b' {
                note.push(c);
                chars.next();
            }
        }

        let remaining: String = chars.collect();
        let mode = KeyMode::from_word(remaining.trim_start())
            .ok_or(ChordParsingError::InvalidFormat)?;
        let tonic = PitchClass::from_name(&note).ok_or(ChordParsingError::UnknownNote(note))?;

        Ok(Key::new(tonic, mode))
    }
}
