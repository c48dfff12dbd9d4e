//! The algebra over production periods.
//!
//! A [`Collection`] is a single period in which a garment can have been
//! produced: a year, optionally narrowed to a season, optionally flagged as a
//! capsule (mid-season) release. The whole engine reasons in terms of these
//! points; nothing here knows about codes, labels or houses.
//!
//! Two families of predicates live on `Collection`:
//! * the order predicates ([`Collection::on_or_before`],
//!   [`Collection::on_or_after`], [`Collection::is_within`]) used for
//!   interval membership, and
//! * the adjacency predicates (`followed_by_*`) used only by the range
//!   compressor to recognize runs at a given cadence.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

// ------------- Season -------------
/// The granularity of a production period within its year.
///
/// `Unknown` means "whole production year, season unspecified", which is a
/// legitimate value on many older labels, not a parse failure. The variant
/// order doubles as the tie-break rank at equal year: Resort, Spring/Summer,
/// Pre-fall, Autumn/Winter, then the season-unspecified boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Season {
    Resort,
    SpringSummer,
    PreFall,
    AutumnWinter,
    Unknown,
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Season::Resort => write!(f, "Resort"),
            Season::SpringSummer => write!(f, "Spring/Summer"),
            Season::PreFall => write!(f, "Pre-fall"),
            Season::AutumnWinter => write!(f, "Autumn/Winter"),
            Season::Unknown => write!(f, "year"),
        }
    }
}

// ------------- Collection -------------
/// One production period of a house.
///
/// Identity is the triple (year, season, capsule); `title` and `note` are
/// display-only and excluded from equality, ordering and hashing. Values are
/// immutable after construction and every derivation returns a new value.
#[derive(Debug, Clone, Serialize)]
pub struct Collection {
    year: i32,
    season: Season,
    capsule: bool,
    title: Option<String>,
    note: Option<String>,
}

impl Collection {
    /// A whole production year with no season specified.
    pub fn of_year(year: i32) -> Self {
        Self {
            year,
            season: Season::Unknown,
            capsule: false,
            title: None,
            note: None,
        }
    }
    pub fn seasonal(year: i32, season: Season) -> Self {
        Self {
            year,
            season,
            capsule: false,
            title: None,
            note: None,
        }
    }
    /// The capsule (mid-season) variant of this period.
    pub fn capsule_of(&self) -> Self {
        let mut c = self.clone();
        c.capsule = true;
        c
    }
    pub fn titled(&self, title: &str) -> Self {
        let mut c = self.clone();
        c.title = Some(title.to_owned());
        c
    }
    pub fn noted(&self, note: &str) -> Self {
        let mut c = self.clone();
        c.note = Some(note.to_owned());
        c
    }
    pub fn year(&self) -> i32 {
        self.year
    }
    pub fn season(&self) -> Season {
        self.season
    }
    pub fn capsule(&self) -> bool {
        self.capsule
    }
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    // ------------- Order predicates -------------
    /// True when this period is no later than `other`.
    ///
    /// A season-unspecified year absorbs every season of the same year: the
    /// historical convention is that "no season specified" can mean the whole
    /// production year, so year N answers true both here and in
    /// [`Collection::on_or_after`] against any season of year N. The same
    /// absorption crosses the year boundary once: year N with no season is
    /// considered both before-or-in and after-or-in Spring/Summer of year
    /// N+1, because a year-stamped run could reach into the following
    /// spring. This asymmetry is deliberate and preserved from the source
    /// material; do not "repair" it.
    pub fn on_or_before(&self, other: &Collection) -> bool {
        if self.year < other.year {
            return true;
        }
        if self.year == other.year {
            if self.season == Season::Unknown || other.season == Season::Unknown {
                return true;
            }
            return (self.season, self.capsule) <= (other.season, other.capsule);
        }
        // cross-year absorption: Spring/Summer of year N+1 sits on the
        // boundary of the season-unspecified year N
        self.season == Season::SpringSummer
            && other.season == Season::Unknown
            && self.year == other.year + 1
    }
    /// True when this period is no earlier than `other`.
    ///
    /// Mirrors [`Collection::on_or_before`], including the absorption of a
    /// season-unspecified year across the year boundary.
    pub fn on_or_after(&self, other: &Collection) -> bool {
        if self.year > other.year {
            return true;
        }
        if self.year == other.year {
            if self.season == Season::Unknown || other.season == Season::Unknown {
                return true;
            }
            return (self.season, self.capsule) >= (other.season, other.capsule);
        }
        self.season == Season::Unknown
            && other.season == Season::SpringSummer
            && self.year + 1 == other.year
    }
    /// Membership in a possibly half-open range. `None` means unbounded.
    pub fn is_within(&self, lower: Option<&Collection>, upper: Option<&Collection>) -> bool {
        let after_lower = lower.map_or(true, |l| self.on_or_after(l));
        let before_upper = upper.map_or(true, |u| self.on_or_before(u));
        after_lower && before_upper
    }

    // ------------- Adjacency predicates -------------
    // These recognize the cadence at which `next` directly follows `self`.
    // They are consumed by the range compressor only.

    /// Same season and capsule flag, one year later.
    pub fn followed_by_annual(&self, next: &Collection) -> bool {
        next.year == self.year + 1 && next.season == self.season && next.capsule == self.capsule
    }
    /// The half-year step between Spring/Summer and Autumn/Winter, with
    /// matching capsule parity.
    pub fn followed_by_semiannual(&self, next: &Collection) -> bool {
        self.capsule == next.capsule
            && self.next_half() == Some((next.year, next.season))
    }
    /// The semiannual step widened with the Resort and Pre-fall quarters.
    pub fn followed_by_quarterly(&self, next: &Collection) -> bool {
        self.followed_by_semiannual(next)
            || (self.capsule == next.capsule
                && self.next_quarter() == Some((next.year, next.season)))
    }
    /// A collection is followed by its own capsule variant, and a capsule by
    /// the next regular collection.
    pub fn followed_by_capsule(&self, next: &Collection) -> bool {
        if !self.capsule {
            return next.capsule && next.year == self.year && next.season == self.season;
        }
        !next.capsule
            && (self.next_half() == Some((next.year, next.season))
                || self.next_quarter() == Some((next.year, next.season)))
    }
    /// The union of all adjacency predicates.
    pub fn followed_by_any(&self, next: &Collection) -> bool {
        self.followed_by_annual(next)
            || self.followed_by_semiannual(next)
            || self.followed_by_quarterly(next)
            || self.followed_by_capsule(next)
    }

    fn next_half(&self) -> Option<(i32, Season)> {
        match self.season {
            Season::SpringSummer => Some((self.year, Season::AutumnWinter)),
            Season::AutumnWinter => Some((self.year + 1, Season::SpringSummer)),
            _ => None,
        }
    }
    fn next_quarter(&self) -> Option<(i32, Season)> {
        match self.season {
            Season::Resort => Some((self.year, Season::SpringSummer)),
            Season::SpringSummer => Some((self.year, Season::PreFall)),
            Season::PreFall => Some((self.year, Season::AutumnWinter)),
            Season::AutumnWinter => Some((self.year + 1, Season::Resort)),
            Season::Unknown => None,
        }
    }
}

// Titles and notes are display-only, so identity covers the
// (year, season, capsule) triple and nothing else.
impl PartialEq for Collection {
    fn eq(&self, other: &Self) -> bool {
        self.year == other.year && self.season == other.season && self.capsule == other.capsule
    }
}
impl Eq for Collection {}
impl Hash for Collection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.year.hash(state);
        self.season.hash(state);
        self.capsule.hash(state);
    }
}
// The sort order stays strict (a capsule directly after its parent) even
// though the membership predicates above let a season-unspecified year
// absorb its neighbors; sorting must remain total.
impl Ord for Collection {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.season, self.capsule).cmp(&(other.year, other.season, other.capsule))
    }
}
impl PartialOrd for Collection {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.season {
            Season::Unknown => write!(f, "{}", self.year)?,
            season => write!(f, "{} {}", self.year, season)?,
        }
        if self.capsule {
            write!(f, " capsule")?;
        }
        if let Some(title) = &self.title {
            write!(f, " \"{}\"", title)?;
        }
        Ok(())
    }
}
