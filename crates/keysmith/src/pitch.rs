use serde::{Deserialize, Serialize};

/// A spelled pitch class.
///
/// Naturals have one spelling; each black key has a sharp and a flat
/// spelling that share a semitone value but are distinct variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchClass {
    C,
    CSharp,
    DFlat,
    D,
    DSharp,
    EFlat,
    E,
    F,
    FSharp,
    GFlat,
    G,
    GSharp,
    AFlat,
    A,
    ASharp,
    BFlat,
    B,
}

impl PitchClass {
    /// Every spelling, in declaration order.
    pub const ALL: [PitchClass; 17] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::DFlat,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::EFlat,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::GFlat,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::AFlat,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::BFlat,
        PitchClass::B,
    ];

    /// One spelling per semitone (sharps preferred), indexed by semitone.
    pub const CHROMATIC: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::DFlat => "Db",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#",
            PitchClass::EFlat => "Eb",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::GFlat => "Gb",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#",
            PitchClass::AFlat => "Ab",
            PitchClass::A => "A",
            PitchClass::ASharp => "A#",
            PitchClass::BFlat => "Bb",
            PitchClass::B => "B",
        }
    }

    /// Semitones above C, 0 to 11.
    pub fn semitone(&self) -> u8 {
        match self {
            PitchClass::C => 0,
            PitchClass::CSharp | PitchClass::DFlat => 1,
            PitchClass::D => 2,
            PitchClass::DSharp | PitchClass::EFlat => 3,
            PitchClass::E => 4,
            PitchClass::F => 5,
            PitchClass::FSharp | PitchClass::GFlat => 6,
            PitchClass::G => 7,
            PitchClass::GSharp | PitchClass::AFlat => 8,
            PitchClass::A => 9,
            PitchClass::ASharp | PitchClass::BFlat => 10,
            PitchClass::B => 11,
        }
    }

    /// The other spelling of the same black key. Naturals have none.
    pub fn enharmonic(&self) -> Option<PitchClass> {
        match self {
            PitchClass::CSharp => Some(PitchClass::DFlat),
            PitchClass::DFlat => Some(PitchClass::CSharp),
            PitchClass::DSharp => Some(PitchClass::EFlat),
            PitchClass::EFlat => Some(PitchClass::DSharp),
            PitchClass::FSharp => Some(PitchClass::GFlat),
            PitchClass::GFlat => Some(PitchClass::FSharp),
            PitchClass::GSharp => Some(PitchClass::AFlat),
            PitchClass::AFlat => Some(PitchClass::GSharp),
            PitchClass::ASharp => Some(PitchClass::BFlat),
            PitchClass::BFlat => Some(PitchClass::ASharp),
            _ => None,
        }
    }

    pub fn is_natural(&self) -> bool {
        self.enharmonic().is_none()
    }

    /// Letter name without accidental.
    pub fn letter(&self) -> char {
        self.name().chars().next().unwrap_or('C')
    }

    /// Resolve a semitone value (reduced mod 12) to its sharp spelling.
    pub fn from_semitone(semitone: i32) -> PitchClass {
        Self::CHROMATIC[semitone.rem_euclid(12) as usize]
    }

    /// Exact, case-sensitive lookup against canonical names.
    pub fn from_name(name: &str) -> Option<PitchClass> {
        Self::ALL.iter().copied().find(|pc| pc.name() == name)
    }

    /// Move by `semitones` (either direction), landing on a sharp spelling.
    pub fn transposed(&self, semitones: i32) -> PitchClass {
        Self::from_semitone(self.semitone() as i32 + semitones)
    }

    pub fn same_pitch(&self, other: &PitchClass) -> bool {
        self.semitone() == other.semitone()
    }
}

impl std::fmt::Display for PitchClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
