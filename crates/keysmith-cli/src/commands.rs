//! CLI command implementations
//!
//! Each command renders its output to a `String`; `main` prints it.

use anyhow::{anyhow, bail, Context, Result};
use keysmith::browse::{self, BrowseOptions, ConfidenceLevel};
use keysmith::{
    Chord, ChordParsingError, DiatonicChord, HarmonicFunction, Key, KeySuggestion, TheoryEngine,
};
use keysmithconf::{ConfigSources, KeysmithConfig};
use serde::Serialize;
use std::fmt::Write;

/// Attach the example inputs to a parse error.
fn with_hints(input: &str, err: ChordParsingError) -> anyhow::Error {
    let hints = err
        .suggestions()
        .iter()
        .map(|s| if s.is_empty() { "(none)" } else { s })
        .collect::<Vec<_>>()
        .join(", ");
    anyhow!("'{}': {}\n\nTry something like: {}", input, err, hints)
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")
}

fn parse_chord(engine: &TheoryEngine, input: &str) -> Result<Chord> {
    engine.parse_chord(input).map_err(|e| with_hints(input, e))
}

#[derive(Serialize)]
struct ChordReport<'a> {
    symbol: String,
    chord: &'a Chord,
    notes: Vec<String>,
    quality_description: &'static str,
}

/// Show what a chord name parses to.
pub fn parse(engine: &TheoryEngine, input: &str, json: bool) -> Result<String> {
    let chord = parse_chord(engine, input)?;
    let notes: Vec<String> = chord.notes().iter().map(|n| n.to_string()).collect();

    if json {
        return to_json(&ChordReport {
            symbol: chord.symbol(),
            chord: &chord,
            notes,
            quality_description: chord.quality().japanese_description(),
        });
    }

    let mut out = String::new();
    writeln!(out, "symbol:  {}", chord.symbol())?;
    writeln!(out, "root:    {}", chord.root())?;
    writeln!(
        out,
        "quality: {:?} ({})",
        chord.quality(),
        chord.quality().japanese_description()
    )?;
    writeln!(out, "notes:   {}", notes.join(" "))?;
    if let Some(bass) = chord.bass() {
        writeln!(out, "bass:    {}", bass)?;
    }
    Ok(out)
}

#[derive(Serialize)]
struct SuggestionRow<'a> {
    #[serde(flatten)]
    suggestion: &'a KeySuggestion,
    confidence: ConfidenceLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    detailed_reason: Option<String>,
}

/// Ranked keys for a chord, filtered and ordered by `options`.
pub fn suggest(
    engine: &TheoryEngine,
    input: &str,
    options: &BrowseOptions,
    detailed: bool,
    json: bool,
) -> Result<String> {
    let chord = parse_chord(engine, input)?;
    let shown = options.apply(&engine.suggest_keys(&chord));

    let rows: Vec<SuggestionRow> = shown
        .iter()
        .map(|s| SuggestionRow {
            suggestion: s,
            confidence: ConfidenceLevel::from_score(s.score()),
            detailed_reason: detailed.then(|| browse::detailed_reason(s)),
        })
        .collect();

    if json {
        return to_json(&rows);
    }

    let mut out = String::new();
    if rows.is_empty() {
        writeln!(out, "No key contains {}", chord)?;
        return Ok(out);
    }

    writeln!(out, "Keys for {}:", chord)?;
    for (i, row) in rows.iter().enumerate() {
        let s = row.suggestion;
        writeln!(
            out,
            "{:>2}. {:<9} {:>4.1}  {:<9}  {}",
            i + 1,
            s.key().name(),
            s.score(),
            row.confidence.label(),
            s.reason()
        )?;
        if let Some(detail) = &row.detailed_reason {
            for line in detail.lines().skip(1) {
                writeln!(out, "    {}", line)?;
            }
        }
    }
    Ok(out)
}

#[derive(Serialize)]
struct KeyReport<'a> {
    key: Key,
    name: String,
    scale: Vec<String>,
    key_signature: String,
    relative_key: String,
    parallel_key: String,
    chords: &'a [DiatonicChord],
}

fn write_table(out: &mut String, chords: &[DiatonicChord]) -> std::fmt::Result {
    for dc in chords {
        writeln!(
            out,
            "  {:<5} {:<6} {}",
            dc.roman_numeral(),
            dc.chord().symbol(),
            dc.function()
        )?;
    }
    Ok(())
}

/// Scale, signature, related keys and the diatonic table of a key.
pub fn diatonic(engine: &TheoryEngine, input: &str, json: bool) -> Result<String> {
    let key: Key = input
        .parse()
        .map_err(|e: ChordParsingError| anyhow!("'{}' is not a key: {}", input, e))?;
    let chords = engine.diatonic_chords(key);
    let scale: Vec<String> = key.scale().iter().map(|n| n.to_string()).collect();

    if json {
        return to_json(&KeyReport {
            key,
            name: key.name(),
            scale,
            key_signature: key.key_signature().to_string(),
            relative_key: key.relative_key().name(),
            parallel_key: key.parallel_key().name(),
            chords: &chords,
        });
    }

    let mut out = String::new();
    writeln!(out, "{} ({})", key.name(), key.japanese_name())?;
    writeln!(out, "scale:     {}", scale.join(" "))?;
    writeln!(out, "signature: {}", key.key_signature())?;
    writeln!(out, "relative:  {}", key.relative_key().name())?;
    writeln!(out, "parallel:  {}", key.parallel_key().name())?;
    writeln!(out)?;
    write_table(&mut out, &chords)?;
    Ok(out)
}

/// Pick the best key for a chord and lay out its chords by function.
pub fn explain(engine: &TheoryEngine, input: &str, json: bool) -> Result<String> {
    let chord = parse_chord(engine, input)?;
    let suggestions = engine.suggest_keys(&chord);
    let Some(top) = suggestions.first() else {
        bail!("No key contains {}", chord);
    };
    let info = engine.select_key(top);

    if json {
        return to_json(&info);
    }

    let mut out = String::new();
    writeln!(out, "{} in {}", chord, info.key.name())?;
    writeln!(out, "{}", browse::detailed_reason(&info.suggestion))?;
    writeln!(out)?;
    writeln!(out, "chords:   {}", info.chord_names().join(" "))?;
    writeln!(out, "numerals: {}", info.roman_numerals().join(" "))?;

    let groups = info.chords_by_function();
    for function in HarmonicFunction::ALL {
        let Some(chords) = groups.get(&function) else {
            continue;
        };
        let names: Vec<String> = chords.iter().map(|dc| dc.chord().symbol()).collect();
        writeln!(
            out,
            "{:<12} {:<8} {}",
            function.to_string(),
            function.description(),
            names.join(" ")
        )?;
    }
    Ok(out)
}

/// The effective configuration and where it came from.
pub fn config(config: &KeysmithConfig, sources: &ConfigSources, json: bool) -> Result<String> {
    if json {
        return to_json(config);
    }

    let mut out = config.to_toml();
    out.push('\n');
    if sources.files.is_empty() {
        out.push_str("# files: (defaults only)\n");
    } else {
        for file in &sources.files {
            writeln!(out, "# file: {}", file.display())?;
        }
    }
    for var in &sources.env_overrides {
        writeln!(out, "# env:  {}", var)?;
    }
    Ok(out)
}
