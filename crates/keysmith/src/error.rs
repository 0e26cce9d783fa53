use thiserror::Error;

/// Why a chord (or key) name could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChordParsingError {
    #[error("chord name is empty")]
    EmptyInput,

    #[error("chord name is not in a recognized format")]
    InvalidFormat,

    #[error("unknown note name: {0}")]
    UnknownNote(String),

    #[error("unknown chord quality: {0}")]
    UnknownQuality(String),

    #[error("unknown chord extension: {0}")]
    UnknownExtension(String),

    #[error("failed to parse chord: {0}")]
    ParsingFailed(String),
}

impl ChordParsingError {
    /// Example inputs that would have been accepted, for showing next to the message.
    pub fn suggestions(&self) -> &'static [&'static str] {
        match self {
            ChordParsingError::EmptyInput | ChordParsingError::InvalidFormat => {
                &["C", "Am", "F7", "Bm7b5", "Csus4", "Gdim"]
            }
            ChordParsingError::UnknownNote(_) => &["C", "D", "E", "F", "G", "A", "B", "C#", "Eb"],
            ChordParsingError::UnknownQuality(_) => &["", "m", "7", "maj7", "sus4", "dim", "aug"],
            ChordParsingError::UnknownExtension(_) => &["7", "maj7", "9", "11", "13", "add9"],
            ChordParsingError::ParsingFailed(_) => &["C", "Am", "F7"],
        }
    }
}
