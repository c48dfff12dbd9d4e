//! The generic candidate-narrowing machinery shared by every encoding
//! framework.
//!
//! A framework is one historically distinct product-code scheme of a house.
//! Each is described by a [`FrameworkRule`]: how to decode a raw code into a
//! [`Decoded`] field tuple, how to render the canonical form of the code,
//! and an ordered pipeline of narrowers that whittle the house's universe of
//! [`Collection`]s down per line. The evaluator itself is framework-agnostic;
//! all per-framework knowledge arrives as data from the catalog.
//!
//! A framework that cannot match is not an error: it yields `None`, which is
//! expected control flow for every malformed or out-of-table input.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::catalog::{Catalog, House};
use crate::collection::{Collection, Season};
use crate::interval::Interval;
use crate::line::{
    CodeHasher, EraMark, Line, LineMatch, LogoStyle, Maker, Schedule, Sizing, Typeface,
};

// ------------- Query fields -------------
/// A product code as the owner reported it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CodeField {
    Code(String),
    Blank,
    Unreadable,
    Unspecified,
}
impl CodeField {
    pub fn code(text: &str) -> Self {
        CodeField::Code(text.trim().to_ascii_uppercase())
    }
    pub fn text(&self) -> Option<&str> {
        match self {
            CodeField::Code(text) => Some(text),
            _ => None,
        }
    }
}

/// A year printed somewhere on the label, distinct from the product code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum YearPrint {
    Digits(String),
    Blank,
    Unreadable,
    Unspecified,
}

/// The auxiliary label attributes a caller may supply alongside the code.
#[derive(Debug, Clone)]
pub struct Attributes {
    pub logo: Option<LogoStyle>,
    pub maker: Option<Maker>,
    pub sizing: Option<Sizing>,
    pub typeface: Option<Typeface>,
    pub year_print: YearPrint,
}
impl Default for Attributes {
    fn default() -> Self {
        Self {
            logo: None,
            maker: None,
            sizing: None,
            typeface: None,
            year_print: YearPrint::Unspecified,
        }
    }
}
impl Attributes {
    /// The era-table keys for every attribute the caller actually specified.
    pub fn era_marks(&self) -> Vec<EraMark> {
        let mut marks = Vec::new();
        if let Some(m) = self.maker {
            marks.push(EraMark::Maker(m));
        }
        if let Some(s) = self.sizing {
            marks.push(EraMark::Sizing(s));
        }
        if let Some(t) = self.typeface {
            marks.push(EraMark::Typeface(t));
        }
        if let Some(l) = self.logo {
            marks.push(EraMark::Logo(l));
        }
        marks
    }
}

/// One identification request.
#[derive(Debug, Clone)]
pub struct Query {
    pub house: House,
    pub code: CodeField,
    pub attrs: Attributes,
}
impl Query {
    pub fn new(house: House, code: CodeField) -> Self {
        Self { house, code, attrs: Attributes::default() }
    }
    pub fn with_logo(mut self, logo: LogoStyle) -> Self {
        self.attrs.logo = Some(logo);
        self
    }
    pub fn with_maker(mut self, maker: Maker) -> Self {
        self.attrs.maker = Some(maker);
        self
    }
    pub fn with_sizing(mut self, sizing: Sizing) -> Self {
        self.attrs.sizing = Some(sizing);
        self
    }
    pub fn with_typeface(mut self, typeface: Typeface) -> Self {
        self.attrs.typeface = Some(typeface);
        self
    }
    pub fn with_year_print(mut self, year_print: YearPrint) -> Self {
        self.attrs.year_print = year_print;
        self
    }
}

// ------------- Decoded fields -------------
/// What a framework's year field claims about the production year.
///
/// `AmbiguousDecade` is a documented reinterpretation: some stamps carry a
/// fixed digit pair (for the shipped catalogs, "55") that historically meant
/// "decade unreadable, any year ending in this digit", not the literal
/// two-digit year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearMark {
    Absent,
    LastDigit(u8),
    TwoDigit(u8),
    AmbiguousDecade(u8),
}

/// True when `year` is a plausible production year under the mark. Digit
/// marks match modularly, so every candidate decade stays in play until an
/// era attribute narrows it.
pub fn year_mark_admits(mark: YearMark, year: i32) -> bool {
    match mark {
        YearMark::Absent => true,
        YearMark::LastDigit(d) | YearMark::AmbiguousDecade(d) => year.rem_euclid(10) == d as i32,
        YearMark::TwoDigit(n) => year.rem_euclid(100) == n as i32,
    }
}

/// The field tuple a framework's decoder extracts from a raw code.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub line: char,
    pub season: Option<char>,
    pub year: YearMark,
    pub month: Option<u8>,
    pub garment: Option<char>,
    pub fabric: Option<char>,
    pub size: Option<char>,
    pub raw: String,
}

// ------------- Season codes -------------
/// What a decoded season code admits: usually exactly one season, sometimes
/// a small enumerated set where a house reused a letter across eras.
#[derive(Debug, Clone)]
pub enum SeasonRule {
    Is(Season),
    AnyOf(&'static [Season]),
}
impl SeasonRule {
    pub fn admits(&self, season: Season) -> bool {
        match self {
            SeasonRule::Is(s) => *s == season,
            SeasonRule::AnyOf(set) => set.contains(&season),
        }
    }
    /// A reused letter is a documented exception worth surfacing.
    pub fn is_exception(&self) -> bool {
        matches!(self, SeasonRule::AnyOf(_))
    }
}

// ------------- Narrowing pipeline -------------
pub type PointFilter = Arc<dyn Fn(&Collection) -> bool + Send + Sync>;
pub type Narrower = Arc<dyn Fn(&Decoded, &Attributes, &Line) -> Narrowing + Send + Sync>;

/// What one pipeline step contributes for a given line.
pub enum Narrowing {
    /// No constraint from this step.
    Pass,
    /// Retain only the admitted candidates.
    Keep(PointFilter),
    /// This line cannot apply at all for this query.
    Veto,
}

/// Catalog-level manufacturer founding/closing windows, applied when the
/// caller names a maker.
pub fn narrow_by_maker(makers: Arc<HashMap<Maker, Interval, CodeHasher>>) -> Narrower {
    Arc::new(move |_decoded, attrs, _line| {
        let Some(maker) = attrs.maker else { return Narrowing::Pass };
        match makers.get(&maker) {
            Some(window) => {
                let window = window.clone();
                Narrowing::Keep(Arc::new(move |c| window.includes(c)))
            }
            None => Narrowing::Veto,
        }
    })
}

/// Modular match against the decoded year digit(s).
pub fn narrow_by_year() -> Narrower {
    Arc::new(|decoded, _attrs, _line| match decoded.year {
        YearMark::Absent => Narrowing::Pass,
        mark => Narrowing::Keep(Arc::new(move |c| year_mark_admits(mark, c.year()))),
    })
}

/// A year printed on the label narrows to that year (four digits) or that
/// year within any century (two digits). Any other shape is historically
/// impossible and vetoes the line.
pub fn narrow_by_year_print() -> Narrower {
    Arc::new(|_decoded, attrs, _line| {
        let YearPrint::Digits(text) = &attrs.year_print else { return Narrowing::Pass };
        match (text.len(), text.parse::<i32>()) {
            (4, Ok(year)) => Narrowing::Keep(Arc::new(move |c| c.year() == year)),
            (2, Ok(pair)) => Narrowing::Keep(Arc::new(move |c| c.year().rem_euclid(100) == pair)),
            _ => Narrowing::Veto,
        }
    })
}

/// Era sub-windows for every specified attribute, layered over the
/// operation window. A missing entry vetoes the line outright.
pub fn narrow_by_attribute_eras() -> Narrower {
    Arc::new(|_decoded, attrs, line| {
        let mut windows = Vec::new();
        for mark in attrs.era_marks() {
            match line.era_interval(&mark) {
                Some(window) => windows.push(window.clone()),
                None => return Narrowing::Veto,
            }
        }
        if windows.is_empty() {
            return Narrowing::Pass;
        }
        Narrowing::Keep(Arc::new(move |c| windows.iter().all(|w| w.includes(c))))
    })
}

/// Maps the decoded season letter through the house's season-code table.
pub fn narrow_by_season(seasons: Arc<HashMap<char, SeasonRule, CodeHasher>>) -> Narrower {
    Arc::new(move |decoded, _attrs, _line| {
        let Some(code) = decoded.season else { return Narrowing::Pass };
        match seasons.get(&code) {
            Some(rule) => {
                let rule = rule.clone();
                Narrowing::Keep(Arc::new(move |c| rule.admits(c.season())))
            }
            None => Narrowing::Veto,
        }
    })
}

/// Production-month inference, coupled with the year digits because a line
/// manufacturing late in the year stamps the *production* year while the
/// garment belongs to the following Spring/Summer.
pub fn narrow_by_month() -> Narrower {
    Arc::new(|decoded, _attrs, line| {
        let Some(month) = decoded.month else { return Narrowing::Pass };
        let (season, offset) = match line.schedule().unwrap_or(Schedule::Early) {
            Schedule::Early if month <= 6 => (Season::SpringSummer, 0),
            Schedule::Early => (Season::AutumnWinter, 0),
            Schedule::Late if month >= 7 => (Season::SpringSummer, 1),
            Schedule::Late => (Season::AutumnWinter, 0),
        };
        let mark = decoded.year;
        Narrowing::Keep(Arc::new(move |c| {
            c.season() == season && year_mark_admits(mark, c.year() - offset)
        }))
    })
}

/// The validity window of the framework itself, for schemes a house only
/// used during part of its life.
pub fn narrow_by_window(window: Interval) -> Narrower {
    Arc::new(move |_decoded, _attrs, _line| {
        let window = window.clone();
        Narrowing::Keep(Arc::new(move |c| window.includes(c)))
    })
}

/// The line's own operation window, always the final step.
pub fn narrow_by_operation() -> Narrower {
    Arc::new(|_decoded, _attrs, line| {
        let operation = line.operation().clone();
        Narrowing::Keep(Arc::new(move |c| operation.includes(c)))
    })
}

// ------------- FrameworkRule -------------
/// One encoding framework: decoder, canonical renderer and the ordered
/// narrowing pipeline. Rules are configuration, built once per catalog and
/// held in evaluation-priority order.
#[derive(Clone)]
pub struct FrameworkRule {
    pub name: &'static str,
    /// The manufacturer that used this encoding scheme, where documented.
    /// Reported on results when the caller did not name a maker themselves.
    pub maker: Option<Maker>,
    pub decode: fn(&str) -> Option<Decoded>,
    pub canonical: fn(&Decoded) -> String,
    pub narrowers: Vec<Narrower>,
}

// ------------- MatchResult -------------
/// One framework's identification of one label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub house: House,
    pub framework: &'static str,
    pub maker: Option<Maker>,
    pub alternate_makers: Vec<Maker>,
    pub canonical_code: Option<String>,
    pub garment: Option<String>,
    pub fabric: Option<String>,
    pub size: Option<String>,
    pub occurrences: Vec<LineMatch>,
    pub exception: bool,
    pub counterfeit_possible: bool,
}

// ------------- Evaluator -------------
/// Narrows the house universe per line and assembles a [`MatchResult`].
///
/// Returns `None` for every business-rule mismatch: a field outside its
/// reference table, a line vetoed by an attribute, an empty survivor set.
/// Ambiguity is never resolved here; every line that still matches is
/// reported as its own occurrence group.
pub fn evaluate(
    catalog: &Catalog,
    rule: &FrameworkRule,
    decoded: &Decoded,
    attrs: &Attributes,
) -> Option<MatchResult> {
    let occurrences = narrow(catalog, rule, decoded, attrs);

    let counterfeit = catalog.is_counterfeit(&decoded.raw);
    if occurrences.is_empty() {
        if counterfeit {
            // substitute the prebuilt template rather than reporting no match
            let mut template = catalog.counterfeit_template().clone();
            template.framework = rule.name;
            template.canonical_code = Some((rule.canonical)(decoded));
            return Some(template);
        }
        return None;
    }

    let season_exception = decoded
        .season
        .and_then(|code| catalog.season_rule(code))
        .map_or(false, |r| r.is_exception());
    Some(MatchResult {
        house: catalog.house(),
        framework: rule.name,
        maker: attrs.maker.or(rule.maker),
        alternate_makers: Vec::new(),
        canonical_code: Some((rule.canonical)(decoded)),
        garment: decoded
            .garment
            .and_then(|code| catalog.garment_label(code))
            .map(str::to_owned),
        fabric: decoded
            .fabric
            .and_then(|code| catalog.fabric_label(code))
            .map(str::to_owned),
        size: decoded
            .size
            .and_then(|code| catalog.size_label(code))
            .map(str::to_owned),
        occurrences,
        exception: matches!(decoded.year, YearMark::AmbiguousDecade(_)) || season_exception,
        counterfeit_possible: counterfeit,
    })
}

/// Steps 1-3 of the evaluation: field validity, line candidates, narrowing.
/// Any validity miss empties the result; that is expected control flow.
fn narrow(
    catalog: &Catalog,
    rule: &FrameworkRule,
    decoded: &Decoded,
    attrs: &Attributes,
) -> Vec<LineMatch> {
    // Field validity: every decoded field must sit in its reference table.
    let Some(lines) = catalog.lines_for(decoded.line) else { return Vec::new() };
    if decoded.season.map_or(false, |code| catalog.season_rule(code).is_none()) {
        return Vec::new();
    }
    if decoded.garment.map_or(false, |code| catalog.garment_label(code).is_none()) {
        return Vec::new();
    }
    if decoded.fabric.map_or(false, |code| catalog.fabric_label(code).is_none()) {
        return Vec::new();
    }
    if decoded.size.map_or(false, |code| catalog.size_label(code).is_none()) {
        return Vec::new();
    }
    if decoded.month.map_or(false, |month| !(1..=12).contains(&month)) {
        return Vec::new();
    }

    let marks = attrs.era_marks();
    let mut occurrences: Vec<LineMatch> = Vec::new();
    for line in lines {
        if !marks.iter().all(|m| line.matches_era(Some(m))) {
            debug!(line = line.name(), "skipped, no era entry for a specified attribute");
            continue;
        }
        let mut candidates: Vec<Collection> = catalog.universe().to_vec();
        for narrower in &rule.narrowers {
            match narrower(decoded, attrs, line) {
                Narrowing::Pass => (),
                Narrowing::Keep(filter) => candidates.retain(|c| filter(c)),
                Narrowing::Veto => candidates.clear(),
            }
            if candidates.is_empty() {
                break;
            }
        }
        if !candidates.is_empty() {
            candidates.sort();
            debug!(line = line.name(), survivors = candidates.len(), framework = rule.name);
            occurrences.push(line.restricted_to(candidates));
        }
    }
    occurrences
}
