use serde::{Deserialize, Serialize};

use crate::key::KeyMode;

/// Position of a chord's root within its key's scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScaleDegree {
    I,
    II,
    III,
    IV,
    V,
    VI,
    VII,
}

impl ScaleDegree {
    pub const ALL: [ScaleDegree; 7] = [
        ScaleDegree::I,
        ScaleDegree::II,
        ScaleDegree::III,
        ScaleDegree::IV,
        ScaleDegree::V,
        ScaleDegree::VI,
        ScaleDegree::VII,
    ];

    /// 1-based.
    pub fn number(&self) -> u8 {
        *self as u8 + 1
    }

    pub fn from_number(number: u8) -> Option<ScaleDegree> {
        Self::ALL.get((number as usize).checked_sub(1)?).copied()
    }

    /// Zero-based scale index.
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }

    /// Conventional numerals for the chords of a major key.
    pub fn major_roman_numeral(&self) -> &'static str {
        match self {
            ScaleDegree::I => "I",
            ScaleDegree::II => "ii",
            ScaleDegree::III => "iii",
            ScaleDegree::IV => "IV",
            ScaleDegree::V => "V",
            ScaleDegree::VI => "vi",
            ScaleDegree::VII => "vii°",
        }
    }

    /// Conventional numerals for the chords of a natural minor key.
    pub fn minor_roman_numeral(&self) -> &'static str {
        match self {
            ScaleDegree::I => "i",
            ScaleDegree::II => "ii°",
            ScaleDegree::III => "III",
            ScaleDegree::IV => "iv",
            ScaleDegree::V => "v",
            ScaleDegree::VI => "VI",
            ScaleDegree::VII => "VII",
        }
    }

    pub fn roman_numeral(&self, mode: KeyMode) -> &'static str {
        match mode {
            KeyMode::Major => self.major_roman_numeral(),
            KeyMode::Minor => self.minor_roman_numeral(),
        }
    }

    /// Lowercase numeral, re-cased by the generator per chord quality.
    pub fn base_numeral(&self) -> &'static str {
        match self {
            ScaleDegree::I => "i",
            ScaleDegree::II => "ii",
            ScaleDegree::III => "iii",
            ScaleDegree::IV => "iv",
            ScaleDegree::V => "v",
            ScaleDegree::VI => "vi",
            ScaleDegree::VII => "vii",
        }
    }

    pub fn function(&self) -> HarmonicFunction {
        match self {
            ScaleDegree::I | ScaleDegree::III | ScaleDegree::VI => HarmonicFunction::Tonic,
            ScaleDegree::II | ScaleDegree::IV => HarmonicFunction::Subdominant,
            ScaleDegree::V | ScaleDegree::VII => HarmonicFunction::Dominant,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmonicFunction {
    Tonic,
    Subdominant,
    Dominant,
}

impl HarmonicFunction {
    pub const ALL: [HarmonicFunction; 3] = [
        HarmonicFunction::Tonic,
        HarmonicFunction::Subdominant,
        HarmonicFunction::Dominant,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HarmonicFunction::Tonic => "tonic",
            HarmonicFunction::Subdominant => "subdominant",
            HarmonicFunction::Dominant => "dominant",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            HarmonicFunction::Tonic => "トニック",
            HarmonicFunction::Subdominant => "サブドミナント",
            HarmonicFunction::Dominant => "ドミナント",
        }
    }

    pub fn detailed_description(&self) -> &'static str {
        match self {
            HarmonicFunction::Tonic => "安定した響きを持つ主和音",
            HarmonicFunction::Subdominant => "下属和音として中間的な響きを持つ",
            HarmonicFunction::Dominant => "緊張感を持ち主和音へ解決する",
        }
    }

    /// Degrees that carry this function. Major and minor share the table.
    pub fn typical_degrees(&self) -> &'static [ScaleDegree] {
        match self {
            HarmonicFunction::Tonic => &[ScaleDegree::I, ScaleDegree::III, ScaleDegree::VI],
            HarmonicFunction::Subdominant => &[ScaleDegree::II, ScaleDegree::IV],
            HarmonicFunction::Dominant => &[ScaleDegree::V, ScaleDegree::VII],
        }
    }
}

impl std::fmt::Display for HarmonicFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
