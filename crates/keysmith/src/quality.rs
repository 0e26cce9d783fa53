use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChordParsingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    Sus2,
    Sus4,
    Dominant7,
    Major7,
    Minor7,
    Diminished7,
    HalfDiminished7,
    Augmented7,
    MinorMajor7,
    Add9,
    Major9,
    Minor9,
    Dominant9,
    Major11,
    Minor11,
    Dominant11,
    Major13,
    Minor13,
    Dominant13,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 23] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Diminished,
        ChordQuality::Augmented,
        ChordQuality::Sus2,
        ChordQuality::Sus4,
        ChordQuality::Dominant7,
        ChordQuality::Major7,
        ChordQuality::Minor7,
        ChordQuality::Diminished7,
        ChordQuality::HalfDiminished7,
        ChordQuality::Augmented7,
        ChordQuality::MinorMajor7,
        ChordQuality::Add9,
        ChordQuality::Major9,
        ChordQuality::Minor9,
        ChordQuality::Dominant9,
        ChordQuality::Major11,
        ChordQuality::Minor11,
        ChordQuality::Dominant11,
        ChordQuality::Major13,
        ChordQuality::Minor13,
        ChordQuality::Dominant13,
    ];

    /// Non-empty symbols in the order the parser must try them.
    ///
    /// Longer symbols come before their prefixes, otherwise "m7b5" would
    /// stop at "m7" or "m" and leave unparseable text behind.
    pub const PARSE_ORDER: [ChordQuality; 22] = [
        ChordQuality::HalfDiminished7,
        ChordQuality::MinorMajor7,
        ChordQuality::Major13,
        ChordQuality::Major11,
        ChordQuality::Major9,
        ChordQuality::Major7,
        ChordQuality::Diminished7,
        ChordQuality::Augmented7,
        ChordQuality::Minor13,
        ChordQuality::Minor11,
        ChordQuality::Minor9,
        ChordQuality::Minor7,
        ChordQuality::Add9,
        ChordQuality::Sus4,
        ChordQuality::Sus2,
        ChordQuality::Augmented,
        ChordQuality::Diminished,
        ChordQuality::Dominant13,
        ChordQuality::Dominant11,
        ChordQuality::Dominant9,
        ChordQuality::Dominant7,
        ChordQuality::Minor,
    ];

    /// Suffix used both for display and for parsing.
    pub fn symbol(&self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Major7 => "maj7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::Diminished7 => "dim7",
            ChordQuality::HalfDiminished7 => "m7b5",
            ChordQuality::Augmented7 => "aug7",
            ChordQuality::MinorMajor7 => "mMaj7",
            ChordQuality::Add9 => "add9",
            ChordQuality::Major9 => "maj9",
            ChordQuality::Minor9 => "m9",
            ChordQuality::Dominant9 => "9",
            ChordQuality::Major11 => "maj11",
            ChordQuality::Minor11 => "m11",
            ChordQuality::Dominant11 => "11",
            ChordQuality::Major13 => "maj13",
            ChordQuality::Minor13 => "m13",
            ChordQuality::Dominant13 => "13",
        }
    }

    pub fn japanese_description(&self) -> &'static str {
        match self {
            ChordQuality::Major => "長三和音",
            ChordQuality::Minor => "短三和音",
            ChordQuality::Diminished => "減三和音",
            ChordQuality::Augmented => "増三和音",
            ChordQuality::Sus2 => "サスペンデッド2",
            ChordQuality::Sus4 => "サスペンデッド4",
            ChordQuality::Dominant7 => "属7",
            ChordQuality::Major7 => "長7",
            ChordQuality::Minor7 => "短7",
            ChordQuality::Diminished7 => "減7",
            ChordQuality::HalfDiminished7 => "半減7",
            ChordQuality::Augmented7 => "増7",
            ChordQuality::MinorMajor7 => "短長7",
            ChordQuality::Add9 => "アド9",
            ChordQuality::Major9 => "長9",
            ChordQuality::Minor9 => "短9",
            ChordQuality::Dominant9 => "属9",
            ChordQuality::Major11 => "長11",
            ChordQuality::Minor11 => "短11",
            ChordQuality::Dominant11 => "属11",
            ChordQuality::Major13 => "長13",
            ChordQuality::Minor13 => "短13",
            ChordQuality::Dominant13 => "属13",
        }
    }

    /// Semitone intervals above the root, lowest first.
    pub fn intervals(&self) -> &'static [u8] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::Diminished => &[0, 3, 6],
            ChordQuality::Augmented => &[0, 4, 8],
            ChordQuality::Sus2 => &[0, 2, 7],
            ChordQuality::Sus4 => &[0, 5, 7],
            ChordQuality::Dominant7 => &[0, 4, 7, 10],
            ChordQuality::Major7 => &[0, 4, 7, 11],
            ChordQuality::Minor7 => &[0, 3, 7, 10],
            ChordQuality::Diminished7 => &[0, 3, 6, 9],
            ChordQuality::HalfDiminished7 => &[0, 3, 6, 10],
            ChordQuality::Augmented7 => &[0, 4, 8, 10],
            ChordQuality::MinorMajor7 => &[0, 3, 7, 11],
            ChordQuality::Add9 => &[0, 4, 7, 14],
            ChordQuality::Major9 => &[0, 4, 7, 11, 14],
            ChordQuality::Minor9 => &[0, 3, 7, 10, 14],
            ChordQuality::Dominant9 => &[0, 4, 7, 10, 14],
            ChordQuality::Major11 => &[0, 4, 7, 11, 14, 17],
            ChordQuality::Minor11 => &[0, 3, 7, 10, 14, 17],
            ChordQuality::Dominant11 => &[0, 4, 7, 10, 14, 17],
            ChordQuality::Major13 => &[0, 4, 7, 11, 14, 21],
            ChordQuality::Minor13 => &[0, 3, 7, 10, 14, 21],
            ChordQuality::Dominant13 => &[0, 4, 7, 10, 14, 21],
        }
    }

    pub fn is_seventh(&self) -> bool {
        matches!(
            self,
            ChordQuality::Dominant7
                | ChordQuality::Major7
                | ChordQuality::Minor7
                | ChordQuality::Diminished7
                | ChordQuality::HalfDiminished7
                | ChordQuality::Augmented7
                | ChordQuality::MinorMajor7
        )
    }

    /// 9th, 11th and 13th chords, add9 included.
    pub fn is_extended(&self) -> bool {
        matches!(
            self,
            ChordQuality::Add9
                | ChordQuality::Major9
                | ChordQuality::Minor9
                | ChordQuality::Dominant9
                | ChordQuality::Major11
                | ChordQuality::Minor11
                | ChordQuality::Dominant11
                | ChordQuality::Major13
                | ChordQuality::Minor13
                | ChordQuality::Dominant13
        )
    }

    /// The triad this quality is built on. Suspended chords stay as they are.
    pub fn base_triad(&self) -> ChordQuality {
        match self {
            ChordQuality::Major
            | ChordQuality::Major7
            | ChordQuality::Major9
            | ChordQuality::Major11
            | ChordQuality::Major13
            | ChordQuality::Add9
            | ChordQuality::Dominant7
            | ChordQuality::Dominant9
            | ChordQuality::Dominant11
            | ChordQuality::Dominant13 => ChordQuality::Major,
            ChordQuality::Minor
            | ChordQuality::Minor7
            | ChordQuality::Minor9
            | ChordQuality::Minor11
            | ChordQuality::Minor13
            | ChordQuality::MinorMajor7 => ChordQuality::Minor,
            ChordQuality::Diminished
            | ChordQuality::Diminished7
            | ChordQuality::HalfDiminished7 => ChordQuality::Diminished,
            ChordQuality::Augmented | ChordQuality::Augmented7 => ChordQuality::Augmented,
            ChordQuality::Sus2 => ChordQuality::Sus2,
            ChordQuality::Sus4 => ChordQuality::Sus4,
        }
    }
}

impl FromStr for ChordQuality {
    type Err = ChordParsingError;

    /// Case-insensitive symbol lookup. The empty string is a major triad.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChordQuality::ALL
            .iter()
            .copied()
            .find(|q| q.symbol().eq_ignore_ascii_case(s))
            .ok_or_else(|| ChordParsingError::UnknownQuality(s.to_string()))
    }
}

/// Alterations and tensions that can be stacked onto a chord programmatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordExtension {
    Ninth,
    Eleventh,
    Thirteenth,
    FlatFive,
    SharpFive,
    FlatNine,
    SharpNine,
    SharpEleven,
    FlatThirteen,
}

impl ChordExtension {
    pub const ALL: [ChordExtension; 9] = [
        ChordExtension::Ninth,
        ChordExtension::Eleventh,
        ChordExtension::Thirteenth,
        ChordExtension::FlatFive,
        ChordExtension::SharpFive,
        ChordExtension::FlatNine,
        ChordExtension::SharpNine,
        ChordExtension::SharpEleven,
        ChordExtension::FlatThirteen,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            ChordExtension::Ninth => "9",
            ChordExtension::Eleventh => "11",
            ChordExtension::Thirteenth => "13",
            ChordExtension::FlatFive => "b5",
            ChordExtension::SharpFive => "#5",
            ChordExtension::FlatNine => "b9",
            ChordExtension::SharpNine => "#9",
            ChordExtension::SharpEleven => "#11",
            ChordExtension::FlatThirteen => "b13",
        }
    }

    /// Distance from the root in semitones (compound intervals kept).
    pub fn semitone_offset(&self) -> u8 {
        match self {
            ChordExtension::Ninth => 14,
            ChordExtension::Eleventh => 17,
            ChordExtension::Thirteenth => 21,
            ChordExtension::FlatFive => 6,
            ChordExtension::SharpFive => 8,
            ChordExtension::FlatNine => 13,
            ChordExtension::SharpNine => 15,
            ChordExtension::SharpEleven => 18,
            ChordExtension::FlatThirteen => 20,
        }
    }

    /// Natural tensions that turn a triad or 7th into an extended chord.
    pub fn is_tension(&self) -> bool {
        matches!(
            self,
            ChordExtension::Ninth | ChordExtension::Eleventh | ChordExtension::Thirteenth
        )
    }
}
