//! Fixed-shape decoding of raw product codes into field tuples.
//!
//! One thin function per framework: a regex match either yields the full
//! field tuple or nothing at all. No validation against reference tables
//! happens here; that is the evaluator's first step.

use lazy_static::lazy_static;
use regex::Regex;

use crate::framework::{Decoded, YearMark};

lazy_static! {
    // so regular expressions don't have to be recompiled
    static ref HAND_STAMP: Regex =
        Regex::new(r"^(?P<line>[A-Z])(?P<year>\d{1,2})(?P<season>[A-Z])?$").unwrap();
    static ref CARE_LABEL: Regex = Regex::new(
        r"^(?P<line>[A-Z])(?P<garment>[A-Z])(?P<fabric>[A-Z])(?P<year>\d)(?P<month>\d{2})(?P<size>[A-Z])$"
    )
    .unwrap();
    static ref REGISTRO: Regex =
        Regex::new(r"^(?P<line>[A-Z])(?P<season>[A-Z])(?P<year>\d{2})$").unwrap();
}

fn first_char(text: &str) -> Option<char> {
    text.chars().next()
}

/// The Verreaux hand stamp: line letter, one or two year digits, optional
/// season letter. The digit pair "55" is the documented ambiguous-decade
/// stamp and is reinterpreted as "any year ending in 5".
pub fn decode_hand_stamp(raw: &str) -> Option<Decoded> {
    let captures = HAND_STAMP.captures(raw)?;
    let year_text = captures.name("year")?.as_str();
    let year = if year_text == "55" {
        YearMark::AmbiguousDecade(5)
    } else if year_text.len() == 1 {
        YearMark::LastDigit(year_text.parse().ok()?)
    } else {
        YearMark::TwoDigit(year_text.parse().ok()?)
    };
    Some(Decoded {
        line: first_char(captures.name("line")?.as_str())?,
        season: captures.name("season").and_then(|m| first_char(m.as_str())),
        year,
        month: None,
        garment: None,
        fabric: None,
        size: None,
        raw: raw.to_owned(),
    })
}

/// Hyphens after the line letter and around the season letter: V6S -> V-6-S.
pub fn canonical_hand_stamp(decoded: &Decoded) -> String {
    let digits: String = decoded.raw.chars().filter(|c| c.is_ascii_digit()).collect();
    match decoded.season {
        Some(season) => format!("{}-{}-{}", decoded.line, digits, season),
        None => format!("{}-{}", decoded.line, digits),
    }
}

/// The Verreaux care label: line, garment, fabric, one year digit, two
/// month digits, size letter.
pub fn decode_care_label(raw: &str) -> Option<Decoded> {
    let captures = CARE_LABEL.captures(raw)?;
    Some(Decoded {
        line: first_char(captures.name("line")?.as_str())?,
        season: None,
        year: YearMark::LastDigit(captures.name("year")?.as_str().parse().ok()?),
        month: captures.name("month")?.as_str().parse().ok(),
        garment: captures.name("garment").and_then(|m| first_char(m.as_str())),
        fabric: captures.name("fabric").and_then(|m| first_char(m.as_str())),
        size: captures.name("size").and_then(|m| first_char(m.as_str())),
        raw: raw.to_owned(),
    })
}

/// Hyphens at fixed offsets three and six: VJC605M -> VJC-605-M.
pub fn canonical_care_label(decoded: &Decoded) -> String {
    let raw = &decoded.raw;
    if raw.len() == 7 {
        format!("{}-{}-{}", &raw[..3], &raw[3..6], &raw[6..])
    } else {
        raw.clone()
    }
}

/// The Santerre registro: line letter, season letter, two year digits.
pub fn decode_registro(raw: &str) -> Option<Decoded> {
    let captures = REGISTRO.captures(raw)?;
    Some(Decoded {
        line: first_char(captures.name("line")?.as_str())?,
        season: captures.name("season").and_then(|m| first_char(m.as_str())),
        year: YearMark::TwoDigit(captures.name("year")?.as_str().parse().ok()?),
        month: None,
        garment: None,
        fabric: None,
        size: None,
        raw: raw.to_owned(),
    })
}

/// MW87 -> M-W-87.
pub fn canonical_registro(decoded: &Decoded) -> String {
    let raw = &decoded.raw;
    if raw.len() == 4 {
        format!("{}-{}-{}", &raw[..1], &raw[1..2], &raw[2..])
    } else {
        raw.clone()
    }
}
