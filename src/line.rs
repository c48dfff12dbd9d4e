//! Product sub-lines and the label attributes that date them.
//!
//! A [`Line`] is a named sub-line of a house together with its operation
//! window and, where known, an era table: the sub-windows during which a
//! particular logo design, typeface, sizing notation or manufacturer was in
//! use on that line's labels.

use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasherDefault;
use std::str::FromStr;

use seahash::SeaHasher;
use serde::Serialize;

use crate::collection::Collection;
use crate::error::MillesimeError;
use crate::interval::Interval;

// catalog maps are keyed by small codes and marks, so a fast hasher is fine
pub type CodeHasher = BuildHasherDefault<SeaHasher>;

// ------------- Label attributes -------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Sizing {
    Alphabetical,
    Numerical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Typeface {
    SlabSerif,
    SansSerif,
}

/// Logo designs observed on shipped houses' labels. Adding a house extends
/// this enumeration; values are closed so a query can never carry a logo the
/// catalogs have not heard of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LogoStyle {
    BlockSerif,
    ScriptMonogram,
    ModernSans,
    Crest,
}

/// Manufacturers that produced under license for the shipped houses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Maker {
    MaisonVerreaux,
    ConfectionLyonnaise,
    GruppoSanterre,
    SartoriaBergamo,
}

/// One entry key of a line's era table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EraMark {
    Logo(LogoStyle),
    Typeface(Typeface),
    Sizing(Sizing),
    Maker(Maker),
}

/// Whether the sub-line's manufacturing run sat early or late in the
/// calendar year. Governs which season a production month maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Schedule {
    Early,
    Late,
}

// ------------- Line -------------
/// A named product sub-line: its operation window, optional era table and
/// optional manufacturing schedule. Immutable after construction; the
/// builder-style `with_*` methods return derived values.
#[derive(Debug, Clone)]
pub struct Line {
    name: &'static str,
    operation: Interval,
    eras: Option<HashMap<EraMark, Interval, CodeHasher>>,
    schedule: Option<Schedule>,
}

impl Line {
    pub fn new(name: &'static str, operation: Interval) -> Self {
        Self { name, operation, eras: None, schedule: None }
    }
    pub fn with_era(&self, mark: EraMark, interval: Interval) -> Self {
        let mut derived = self.clone();
        derived
            .eras
            .get_or_insert_with(HashMap::default)
            .insert(mark, interval);
        derived
    }
    pub fn with_schedule(&self, schedule: Schedule) -> Self {
        let mut derived = self.clone();
        derived.schedule = Some(schedule);
        derived
    }
    /// A variant of this line with a different operation window. Used to
    /// carve label-specific windows out of a shared base line.
    pub fn with_operation(&self, operation: Interval) -> Self {
        let mut derived = self.clone();
        derived.operation = operation;
        derived
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
    pub fn operation(&self) -> &Interval {
        &self.operation
    }
    pub fn schedule(&self) -> Option<Schedule> {
        self.schedule
    }
    pub fn eras(&self) -> Option<&HashMap<EraMark, Interval, CodeHasher>> {
        self.eras.as_ref()
    }

    /// True when the attribute is unspecified, or when this line's era table
    /// holds an entry for it. A line with no usable entry for a *specified*
    /// attribute is skipped entirely, not merely left unfiltered.
    pub fn matches_era(&self, mark: Option<&EraMark>) -> bool {
        match mark {
            None => true,
            Some(m) => self
                .eras
                .as_ref()
                .map_or(false, |table| table.contains_key(m)),
        }
    }
    /// The era's sub-window, layered as an additional filter over the
    /// operation window, never a replacement for it.
    pub fn era_interval(&self, mark: &EraMark) -> Option<&Interval> {
        self.eras.as_ref().and_then(|table| table.get(mark))
    }

    /// A display-only copy carrying just the matched periods. The operation
    /// window and era table are deliberately dropped: once results are
    /// final, merge and compression only need the name and the points.
    pub fn restricted_to(&self, collections: Vec<Collection>) -> LineMatch {
        LineMatch { line: self.name.to_owned(), collections }
    }
}

// ------------- LineMatch -------------
/// An occurrence group: one line and the periods that survived narrowing,
/// sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineMatch {
    pub line: String,
    pub collections: Vec<Collection>,
}

impl fmt::Display for LineMatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: ", self.line)?;
        let mut first = true;
        for c in &self.collections {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
            first = false;
        }
        Ok(())
    }
}

// ------------- Attribute parsing (CLI boundary) -------------
impl FromStr for Sizing {
    type Err = MillesimeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "alphabetical" => Ok(Sizing::Alphabetical),
            "numerical" => Ok(Sizing::Numerical),
            other => Err(MillesimeError::Input(format!("unknown sizing notation: {other}"))),
        }
    }
}
impl FromStr for Typeface {
    type Err = MillesimeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "slab-serif" | "slab" => Ok(Typeface::SlabSerif),
            "sans-serif" | "sans" => Ok(Typeface::SansSerif),
            other => Err(MillesimeError::Input(format!("unknown typeface: {other}"))),
        }
    }
}
impl FromStr for LogoStyle {
    type Err = MillesimeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "block-serif" => Ok(LogoStyle::BlockSerif),
            "script-monogram" | "script" => Ok(LogoStyle::ScriptMonogram),
            "modern-sans" | "modern" => Ok(LogoStyle::ModernSans),
            "crest" => Ok(LogoStyle::Crest),
            other => Err(MillesimeError::Input(format!("unknown logo style: {other}"))),
        }
    }
}
impl FromStr for Maker {
    type Err = MillesimeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "maison-verreaux" | "maison" => Ok(Maker::MaisonVerreaux),
            "confection-lyonnaise" | "lyon" => Ok(Maker::ConfectionLyonnaise),
            "gruppo-santerre" | "gruppo" => Ok(Maker::GruppoSanterre),
            "sartoria-bergamo" | "bergamo" => Ok(Maker::SartoriaBergamo),
            other => Err(MillesimeError::Input(format!("unknown maker: {other}"))),
        }
    }
}

impl fmt::Display for Maker {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Maker::MaisonVerreaux => write!(f, "Maison Verreaux"),
            Maker::ConfectionLyonnaise => write!(f, "Confection Lyonnaise"),
            Maker::GruppoSanterre => write!(f, "Gruppo Santerre"),
            Maker::SartoriaBergamo => write!(f, "Sartoria Bergamo"),
        }
    }
}
