//! Diatonic triads built on each degree of a key.

use serde::Serialize;

use crate::chord::Chord;
use crate::degree::{HarmonicFunction, ScaleDegree};
use crate::key::Key;
use crate::pitch::PitchClass;
use crate::quality::ChordQuality;

/// One chord of a key's diatonic table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DiatonicChord {
    degree: ScaleDegree,
    chord: Chord,
    function: HarmonicFunction,
    roman_numeral: String,
}

impl DiatonicChord {
    pub(crate) fn new(
        degree: ScaleDegree,
        chord: Chord,
        function: HarmonicFunction,
        roman_numeral: String,
    ) -> Self {
        Self {
            degree,
            chord,
            function,
            roman_numeral,
        }
    }

    pub fn degree(&self) -> ScaleDegree {
        self.degree
    }

    pub fn chord(&self) -> &Chord {
        &self.chord
    }

    pub fn function(&self) -> HarmonicFunction {
        self.function
    }

    pub fn roman_numeral(&self) -> &str {
        &self.roman_numeral
    }
}

/// Triad quality from the semitone distances of its third and fifth.
fn triad_quality(third: u8, fifth: u8) -> ChordQuality {
    match (third, fifth) {
        (4, 7) => ChordQuality::Major,
        (3, 7) => ChordQuality::Minor,
        (3, 6) => ChordQuality::Diminished,
        (4, 8) => ChordQuality::Augmented,
        _ => ChordQuality::Major,
    }
}

fn numeral_for(degree: ScaleDegree, quality: ChordQuality) -> String {
    let base = degree.base_numeral();
    match quality {
        ChordQuality::Minor => base.to_string(),
        ChordQuality::Diminished => format!("{}°", base),
        ChordQuality::Augmented => format!("{}+", base.to_ascii_uppercase()),
        _ => base.to_ascii_uppercase(),
    }
}

/// The seven diatonic triads of `key`, in degree order.
///
/// Chord roots are sharp-spelled regardless of the key's own spelling.
pub fn chords_for(key: Key) -> Vec<DiatonicChord> {
    let tonic = key.tonic.semitone();
    let scale: Vec<PitchClass> = key
        .mode
        .scale_intervals()
        .iter()
        .map(|i| PitchClass::from_semitone((tonic + i) as i32))
        .collect();

    ScaleDegree::ALL
        .iter()
        .map(|&degree| {
            let i = degree.index();
            let root = scale[i];
            let third = scale[(i + 2) % 7];
            let fifth = scale[(i + 4) % 7];

            let interval = |to: PitchClass| (to.semitone() + 12 - root.semitone()) % 12;
            let quality = triad_quality(interval(third), interval(fifth));

            DiatonicChord::new(
                degree,
                Chord::new(root, quality),
                degree.function(),
                numeral_for(degree, quality),
            )
        })
        .collect()
}
