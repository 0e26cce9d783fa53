//! Chord-name parsing using winnow combinators.
//!
//! Grammar (case-insensitive, whole input): `<note><quality>?('/'<note>)?`
//! where `<note>` is a letter plus an optional `#` or `b`, and `<quality>` is
//! one of [`ChordQuality::PARSE_ORDER`], tried longest first.

use winnow::ascii::Caseless;
use winnow::combinator::{fail, opt, preceded};
use winnow::prelude::*;
use winnow::token::{literal, one_of};

use tracing::debug;

use crate::chord::Chord;
use crate::error::ChordParsingError;
use crate::pitch::PitchClass;
use crate::quality::ChordQuality;

type PResult<T> = winnow::ModalResult<T>;

/// Raw slices matched by the grammar, before any name resolution.
struct ChordTokens<'s> {
    root: &'s str,
    quality: Option<&'s str>,
    bass: Option<&'s str>,
}

/// A letter and an optional accidental. Resolution happens later, so "H" or
/// "E#" still match here.
fn note_token<'s>(input: &mut &'s str) -> PResult<&'s str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic()),
        opt(one_of(['#', 'b', 'B'])),
    )
        .take()
        .parse_next(input)
}

fn quality_token<'s>(input: &mut &'s str) -> PResult<&'s str> {
    for quality in ChordQuality::PARSE_ORDER {
        if let Some(token) = opt(literal(Caseless(quality.symbol()))).parse_next(input)? {
            return Ok(token);
        }
    }
    fail.parse_next(input)
}

fn chord_tokens<'s>(input: &mut &'s str) -> PResult<ChordTokens<'s>> {
    let (root, quality, bass) = (
        note_token,
        opt(quality_token),
        opt(preceded('/', note_token)),
    )
        .parse_next(input)?;
    Ok(ChordTokens {
        root,
        quality,
        bass,
    })
}

/// Uppercase the letter, keep the accidental as typed.
fn normalize_note(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

fn resolve_note(token: &str) -> Result<PitchClass, ChordParsingError> {
    let normalized = normalize_note(token);
    PitchClass::from_name(&normalized).ok_or(ChordParsingError::UnknownNote(normalized))
}

/// Turns chord names such as `"Am7"`, `"F#m7b5"` or `"G7/B"` into [`Chord`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChordParser;

impl ChordParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, input: &str) -> Result<Chord, ChordParsingError> {
        let result = parse_trimmed(input.trim());
        if let Err(e) = &result {
            debug!(input, error = %e, "chord parse failed");
        }
        result
    }

    pub fn validate(&self, input: &str) -> bool {
        self.parse(input).is_ok()
    }
}

fn parse_trimmed(input: &str) -> Result<Chord, ChordParsingError> {
    if input.is_empty() {
        return Err(ChordParsingError::EmptyInput);
    }

    let tokens = chord_tokens
        .parse(input)
        .map_err(|_| ChordParsingError::InvalidFormat)?;

    let root = resolve_note(tokens.root)?;
    let bass = tokens.bass.map(resolve_note).transpose()?;
    let quality = match tokens.quality {
        Some(token) => token.to_ascii_lowercase().parse::<ChordQuality>()?,
        None => ChordQuality::Major,
    };

    let chord = Chord::new(root, quality);
    Ok(match bass {
        Some(bass) => chord.with_bass(bass),
        None => chord,
    })
}

/// Parse with a default [`ChordParser`].
pub fn parse(input: &str) -> Result<Chord, ChordParsingError> {
    ChordParser.parse(input)
}

pub fn validate(input: &str) -> bool {
    ChordParser.validate(input)
}
