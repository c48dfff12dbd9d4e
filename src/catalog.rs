//! Per-house configuration: the static knowledge tables the engine narrows
//! against, wired together once at startup and shared immutably afterwards.
//!
//! Nothing here is parsed from files; catalogs are authored in code, checked
//! wholesale by [`Catalog::verify`] when the [`Registry`] is built, and never
//! mutated by an evaluation. A malformed catalog fails loudly at load time;
//! query time never panics over configuration.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::collection::{Collection, Season};
use crate::decode;
use crate::error::{MillesimeError, Result};
use crate::framework::{
    evaluate, narrow_by_attribute_eras, narrow_by_maker, narrow_by_month, narrow_by_operation,
    narrow_by_season, narrow_by_window, narrow_by_year, narrow_by_year_print, FrameworkRule,
    MatchResult, Query, SeasonRule,
};
use crate::interval::Interval;
use crate::line::{CodeHasher, EraMark, Line, LogoStyle, Maker, Schedule, Sizing, Typeface};
use crate::smooth::smooth;

// ------------- House -------------
/// The houses the shipped catalogs cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum House {
    Verreaux,
    Santerre,
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            House::Verreaux => write!(f, "Verreaux"),
            House::Santerre => write!(f, "Santerre"),
        }
    }
}
impl FromStr for House {
    type Err = MillesimeError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "verreaux" => Ok(House::Verreaux),
            "santerre" => Ok(House::Santerre),
            other => Err(MillesimeError::Input(format!("unknown house: {other}"))),
        }
    }
}

// ------------- Catalog -------------
/// Everything the engine knows about one house.
pub struct Catalog {
    house: House,
    universe: Vec<Collection>,
    lines: HashMap<char, Vec<Line>, CodeHasher>,
    seasons: Arc<HashMap<char, SeasonRule, CodeHasher>>,
    garments: HashMap<char, &'static str, CodeHasher>,
    fabrics: HashMap<char, &'static str, CodeHasher>,
    sizes: HashMap<char, &'static str, CodeHasher>,
    makers: Arc<HashMap<Maker, Interval, CodeHasher>>,
    counterfeit_codes: HashSet<String, CodeHasher>,
    counterfeit_template: MatchResult,
    frameworks: Vec<FrameworkRule>,
}

impl Catalog {
    pub fn house(&self) -> House {
        self.house
    }
    /// Every production period the house is known to have had.
    pub fn universe(&self) -> &[Collection] {
        &self.universe
    }
    pub fn lines_for(&self, code: char) -> Option<&Vec<Line>> {
        self.lines.get(&code)
    }
    pub fn season_rule(&self, code: char) -> Option<&SeasonRule> {
        self.seasons.get(&code)
    }
    pub fn garment_label(&self, code: char) -> Option<&'static str> {
        self.garments.get(&code).copied()
    }
    pub fn fabric_label(&self, code: char) -> Option<&'static str> {
        self.fabrics.get(&code).copied()
    }
    pub fn size_label(&self, code: char) -> Option<&'static str> {
        self.sizes.get(&code).copied()
    }
    pub fn is_counterfeit(&self, raw: &str) -> bool {
        self.counterfeit_codes.contains(raw)
    }
    pub fn counterfeit_template(&self) -> &MatchResult {
        &self.counterfeit_template
    }
    /// Framework rules in evaluation-priority order.
    pub fn frameworks(&self) -> &[FrameworkRule] {
        &self.frameworks
    }

    /// Conformance pass over a catalog. Configuration mistakes are
    /// programmer errors and must surface here, at load time, never during
    /// a query.
    pub fn verify(&self) -> Result<()> {
        let fail = |message: String| Err(MillesimeError::Catalog(format!("{}: {}", self.house, message)));
        if self.universe.is_empty() {
            return fail("empty universe".into());
        }
        if self.frameworks.is_empty() {
            return fail("no frameworks registered".into());
        }
        for (code, lines) in &self.lines {
            if lines.is_empty() {
                return fail(format!("line code {code} maps to no lines"));
            }
            for line in lines {
                if !line.operation().bounds_ordered() {
                    return fail(format!("line {} has inverted operation bounds", line.name()));
                }
                if let Some(eras) = line.eras() {
                    for (mark, window) in eras {
                        if !window.bounds_ordered() {
                            return fail(format!(
                                "line {} era {:?} has inverted bounds",
                                line.name(),
                                mark
                            ));
                        }
                        // an era must at least touch the line's own life;
                        // carved-down variants may clip an era to its edge
                        let disjoint = match (window.upper(), line.operation().lower()) {
                            (Some(upper), Some(lower)) => !upper.on_or_after(lower),
                            _ => false,
                        } || match (window.lower(), line.operation().upper()) {
                            (Some(lower), Some(upper)) => !lower.on_or_before(upper),
                            _ => false,
                        };
                        if disjoint {
                            return fail(format!(
                                "line {} era {:?} lies outside its operation window",
                                line.name(),
                                mark
                            ));
                        }
                    }
                }
            }
        }
        for (maker, window) in self.makers.iter() {
            if !window.bounds_ordered() {
                return fail(format!("maker {maker} has inverted bounds"));
            }
        }
        for (code, rule) in self.seasons.iter() {
            if !self.universe.iter().any(|c| rule.admits(c.season())) {
                return fail(format!("season code {code} admits nothing in the universe"));
            }
        }
        if !self.counterfeit_template.counterfeit_possible
            || !self.counterfeit_template.occurrences.is_empty()
        {
            return fail("malformed counterfeit template".into());
        }
        Ok(())
    }
}

// ------------- Registry -------------
/// The frameworks and catalogs of every known house, built once and passed
/// explicitly to callers; there are no ambient singletons.
pub struct Registry {
    catalogs: HashMap<House, Catalog, CodeHasher>,
}

impl Registry {
    /// All shipped catalogs, verified.
    pub fn standard() -> Result<Self> {
        let mut catalogs = HashMap::default();
        for catalog in [verreaux(), santerre()] {
            catalog.verify()?;
            info!(house = %catalog.house(), periods = catalog.universe().len(), "catalog loaded");
            catalogs.insert(catalog.house(), catalog);
        }
        Ok(Self { catalogs })
    }

    pub fn catalog(&self, house: House) -> Option<&Catalog> {
        self.catalogs.get(&house)
    }

    /// Run every framework registered for the query's house, in priority
    /// order, and smooth the results. An empty list is the canonical "no
    /// identification found" outcome.
    pub fn identify(&self, query: &Query) -> Vec<MatchResult> {
        let Some(catalog) = self.catalogs.get(&query.house) else {
            return Vec::new();
        };
        let Some(raw) = query.code.text() else {
            // no decodable code, nothing for any framework to work with
            return Vec::new();
        };
        let mut results = Vec::new();
        for rule in catalog.frameworks() {
            let Some(decoded) = (rule.decode)(raw) else { continue };
            if let Some(result) = evaluate(catalog, rule, &decoded, &query.attrs) {
                results.push(result);
            }
        }
        smooth(results)
    }
}

// ------------- Shared helpers -------------
fn years(lower: i32, upper: i32) -> Interval {
    Interval::between(Collection::of_year(lower), Collection::of_year(upper))
}
fn from_year(lower: i32) -> Interval {
    Interval::starting(Collection::of_year(lower))
}

fn counterfeit_template(house: House) -> MatchResult {
    MatchResult {
        house,
        framework: "",
        maker: None,
        alternate_makers: Vec::new(),
        canonical_code: None,
        garment: None,
        fabric: None,
        size: None,
        occurrences: Vec::new(),
        exception: false,
        counterfeit_possible: true,
    }
}

// ------------- Verreaux -------------
fn verreaux_universe() -> Vec<Collection> {
    let mut universe = Vec::new();
    for year in 1948..=2012 {
        universe.push(Collection::of_year(year));
        universe.push(Collection::seasonal(year, Season::SpringSummer));
        universe.push(Collection::seasonal(year, Season::AutumnWinter));
        if year >= 1968 {
            universe.push(Collection::seasonal(year, Season::Resort));
            universe.push(Collection::seasonal(year, Season::PreFall));
        }
        // the capsule decade
        if (1985..=1995).contains(&year) {
            universe.push(Collection::seasonal(year, Season::SpringSummer).capsule_of());
        }
    }
    // a few named collections, display-only
    for c in universe.iter_mut() {
        if c.year() == 1973 && c.season() == Season::SpringSummer {
            *c = c.titled("Saint-Germain");
        }
        if c.year() == 1985 && c.season() == Season::SpringSummer && !c.capsule() {
            *c = c.titled("Rive Blanche");
        }
    }
    universe.sort();
    universe
}

/// The house of Verreaux, Paris, founded 1948. Two encoding frameworks: the
/// atelier hand stamp (through 1989) and the woven care label (from 1982).
pub fn verreaux() -> Catalog {
    let makers: Arc<HashMap<Maker, Interval, CodeHasher>> = Arc::new(
        [
            (Maker::MaisonVerreaux, years(1948, 2012)),
            (Maker::ConfectionLyonnaise, years(1962, 1994)),
        ]
        .into_iter()
        .collect(),
    );

    let paris = Line::new(
        "Verreaux Paris",
        // the atelier burned down in 1969 and no collection shipped
        from_year(1948).with_admit(Arc::new(|c| c.year() != 1969)),
    )
    .with_schedule(Schedule::Early)
    .with_era(EraMark::Logo(LogoStyle::BlockSerif), years(1948, 1971))
    .with_era(EraMark::Logo(LogoStyle::ScriptMonogram), years(1972, 1998))
    .with_era(EraMark::Logo(LogoStyle::ModernSans), from_year(1999))
    .with_era(EraMark::Typeface(Typeface::SlabSerif), years(1948, 1983))
    .with_era(EraMark::Typeface(Typeface::SansSerif), from_year(1980))
    .with_era(EraMark::Sizing(Sizing::Alphabetical), years(1948, 1979))
    .with_era(EraMark::Sizing(Sizing::Numerical), from_year(1976))
    .with_era(EraMark::Maker(Maker::MaisonVerreaux), years(1948, 2012))
    .with_era(EraMark::Maker(Maker::ConfectionLyonnaise), years(1962, 1994));

    let rive = Line::new("Verreaux Rive", years(1971, 2002))
        .with_schedule(Schedule::Late)
        .with_era(EraMark::Logo(LogoStyle::ScriptMonogram), years(1972, 1998))
        .with_era(EraMark::Logo(LogoStyle::ModernSans), years(1999, 2002))
        .with_era(EraMark::Typeface(Typeface::SansSerif), years(1971, 2002))
        .with_era(EraMark::Sizing(Sizing::Numerical), years(1971, 2002))
        .with_era(EraMark::Maker(Maker::MaisonVerreaux), years(1971, 2002))
        .with_era(EraMark::Maker(Maker::ConfectionLyonnaise), years(1971, 1994));

    let sport = Line::new("Verreaux Sport", years(1985, 2010))
        .with_schedule(Schedule::Early)
        .with_era(EraMark::Logo(LogoStyle::Crest), years(1985, 1998))
        .with_era(EraMark::Logo(LogoStyle::ModernSans), years(1999, 2010))
        .with_era(EraMark::Typeface(Typeface::SansSerif), years(1985, 2010))
        .with_era(EraMark::Sizing(Sizing::Numerical), years(1985, 2010))
        .with_era(EraMark::Maker(Maker::MaisonVerreaux), years(1985, 2010));

    let lines: HashMap<char, Vec<Line>, CodeHasher> = [
        // 'V' was stamped by both the main and the diffusion line
        ('V', vec![paris.clone(), rive.clone()]),
        ('R', vec![rive.clone()]),
        ('S', vec![sport.clone()]),
        // export stamps reused the Sport tables but only from 1998 onward
        ('X', vec![sport.with_operation(sport.operation().with_lower(Collection::of_year(1998)))]),
    ]
    .into_iter()
    .collect();

    let seasons: Arc<HashMap<char, SeasonRule, CodeHasher>> = Arc::new(
        [
            ('S', SeasonRule::Is(Season::SpringSummer)),
            ('H', SeasonRule::Is(Season::AutumnWinter)),
            ('P', SeasonRule::Is(Season::PreFall)),
            // 'R' meant "rentrée" before the resort schedule existed and
            // "resort" afterwards; both readings stay in play
            ('R', SeasonRule::AnyOf(&[Season::Resort, Season::AutumnWinter])),
        ]
        .into_iter()
        .collect(),
    );

    let garments: HashMap<char, &'static str, CodeHasher> = [
        ('J', "Jacket"),
        ('D', "Dress"),
        ('B', "Blouse"),
        ('T', "Trousers"),
        ('C', "Coat"),
    ]
    .into_iter()
    .collect();
    let fabrics: HashMap<char, &'static str, CodeHasher> = [
        ('C', "Cotton"),
        ('W', "Wool"),
        ('S', "Silk"),
        ('L', "Linen"),
        ('V', "Velvet"),
    ]
    .into_iter()
    .collect();
    let sizes: HashMap<char, &'static str, CodeHasher> = [
        ('S', "Small (36)"),
        ('M', "Medium (38)"),
        ('L', "Large (40)"),
        ('X', "Extra large (42)"),
    ]
    .into_iter()
    .collect();

    let frameworks = vec![
        FrameworkRule {
            name: "hand stamp",
            maker: Some(Maker::MaisonVerreaux),
            decode: decode::decode_hand_stamp,
            canonical: decode::canonical_hand_stamp,
            narrowers: vec![
                narrow_by_maker(Arc::clone(&makers)),
                narrow_by_year(),
                narrow_by_year_print(),
                narrow_by_attribute_eras(),
                narrow_by_season(Arc::clone(&seasons)),
                narrow_by_window(Interval::until(Collection::of_year(1989))),
                narrow_by_operation(),
            ],
        },
        FrameworkRule {
            name: "care label",
            maker: Some(Maker::ConfectionLyonnaise),
            decode: decode::decode_care_label,
            canonical: decode::canonical_care_label,
            narrowers: vec![
                narrow_by_maker(Arc::clone(&makers)),
                narrow_by_year_print(),
                narrow_by_attribute_eras(),
                // month inference subsumes the year digit, see narrow_by_month
                narrow_by_month(),
                narrow_by_window(from_year(1982)),
                narrow_by_operation(),
            ],
        },
    ];

    Catalog {
        house: House::Verreaux,
        universe: verreaux_universe(),
        lines,
        seasons,
        garments,
        fabrics,
        sizes,
        makers,
        counterfeit_codes: ["Q55S".to_owned(), "V99S".to_owned()].into_iter().collect(),
        counterfeit_template: counterfeit_template(House::Verreaux),
        frameworks,
    }
}

// ------------- Santerre -------------
fn santerre_universe() -> Vec<Collection> {
    let mut universe = Vec::new();
    for year in 1967..=2008 {
        universe.push(Collection::of_year(year));
        universe.push(Collection::seasonal(year, Season::SpringSummer));
        universe.push(Collection::seasonal(year, Season::AutumnWinter));
        if year >= 1990 {
            universe.push(Collection::seasonal(year, Season::Resort));
        }
        if (1998..=2003).contains(&year) {
            universe.push(Collection::seasonal(year, Season::AutumnWinter).capsule_of());
        }
    }
    universe.sort();
    universe
}

/// Santerre, Milan, founded 1967. One registro code shape shared by two
/// frameworks whose validity windows overlap: the original Gruppo books and
/// the Bergamo books opened in 1981.
pub fn santerre() -> Catalog {
    let makers: Arc<HashMap<Maker, Interval, CodeHasher>> = Arc::new(
        [
            (Maker::GruppoSanterre, years(1967, 2008)),
            (Maker::SartoriaBergamo, years(1981, 2008)),
        ]
        .into_iter()
        .collect(),
    );

    let milano = Line::new("Santerre Milano", years(1967, 2008))
        .with_schedule(Schedule::Late)
        .with_era(EraMark::Logo(LogoStyle::Crest), years(1967, 1989))
        .with_era(EraMark::Logo(LogoStyle::ModernSans), years(1990, 2008))
        .with_era(EraMark::Typeface(Typeface::SansSerif), years(1967, 2008))
        .with_era(EraMark::Sizing(Sizing::Numerical), years(1967, 2008))
        .with_era(EraMark::Maker(Maker::GruppoSanterre), years(1967, 2008))
        .with_era(EraMark::Maker(Maker::SartoriaBergamo), years(1981, 2008));

    let lines: HashMap<char, Vec<Line>, CodeHasher> =
        [('M', vec![milano])].into_iter().collect();

    let seasons: Arc<HashMap<char, SeasonRule, CodeHasher>> = Arc::new(
        [
            ('P', SeasonRule::Is(Season::SpringSummer)),
            ('I', SeasonRule::Is(Season::AutumnWinter)),
            ('C', SeasonRule::Is(Season::Resort)),
        ]
        .into_iter()
        .collect(),
    );

    let garments: HashMap<char, &'static str, CodeHasher> =
        [('G', "Giacca"), ('A', "Abito"), ('P', "Pantaloni")]
            .into_iter()
            .collect();
    let fabrics: HashMap<char, &'static str, CodeHasher> =
        [('L', "Lana"), ('S', "Seta"), ('C', "Cotone")]
            .into_iter()
            .collect();
    let sizes: HashMap<char, &'static str, CodeHasher> =
        [('1', "Taglia 42"), ('2', "Taglia 44"), ('3', "Taglia 46")]
            .into_iter()
            .collect();

    let registro_narrowers = |window: Interval| {
        vec![
            narrow_by_maker(Arc::clone(&makers)),
            narrow_by_year(),
            narrow_by_year_print(),
            narrow_by_attribute_eras(),
            narrow_by_season(Arc::clone(&seasons)),
            narrow_by_window(window),
            narrow_by_operation(),
        ]
    };
    let frameworks = vec![
        FrameworkRule {
            name: "registro",
            maker: Some(Maker::GruppoSanterre),
            decode: decode::decode_registro,
            canonical: decode::canonical_registro,
            narrowers: registro_narrowers(years(1967, 2008)),
        },
        FrameworkRule {
            name: "registro bergamo",
            maker: Some(Maker::SartoriaBergamo),
            decode: decode::decode_registro,
            canonical: decode::canonical_registro,
            narrowers: registro_narrowers(years(1981, 2008)),
        },
    ];

    Catalog {
        house: House::Santerre,
        universe: santerre_universe(),
        lines,
        seasons,
        garments,
        fabrics,
        sizes,
        makers,
        // MP74 is a real 1974 code that counterfeiters are known to copy
        counterfeit_codes: ["MZ99".to_owned(), "MP74".to_owned()].into_iter().collect(),
        counterfeit_template: counterfeit_template(House::Santerre),
        frameworks,
    }
}
