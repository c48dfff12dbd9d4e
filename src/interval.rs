//! A possibly open range of production periods with an optional carve-out.

use std::fmt;
use std::sync::Arc;

use crate::collection::Collection;

/// Admission predicate for carve-outs that bounds alone cannot express,
/// such as "only collections with a runway show" or "skip the strike year".
pub type Admit = Arc<dyn Fn(&Collection) -> bool + Send + Sync>;

// ------------- Interval -------------
/// An operation window: a range of [`Collection`]s, unbounded on either side
/// when a bound is absent, further restricted by an optional admission
/// predicate.
///
/// When both bounds are present the lower one must order at or before the
/// upper one. That invariant is never enforced here by panicking; catalog
/// authors are trusted and the shipped catalogs are checked wholesale at
/// load time (see `Catalog::verify`).
#[derive(Clone)]
pub struct Interval {
    lower: Option<Collection>,
    upper: Option<Collection>,
    admit: Option<Admit>,
}

impl Interval {
    /// Unbounded on both sides.
    pub fn open() -> Self {
        Self { lower: None, upper: None, admit: None }
    }
    pub fn between(lower: Collection, upper: Collection) -> Self {
        Self { lower: Some(lower), upper: Some(upper), admit: None }
    }
    pub fn starting(lower: Collection) -> Self {
        Self { lower: Some(lower), upper: None, admit: None }
    }
    pub fn until(upper: Collection) -> Self {
        Self { lower: None, upper: Some(upper), admit: None }
    }

    pub fn lower(&self) -> Option<&Collection> {
        self.lower.as_ref()
    }
    pub fn upper(&self) -> Option<&Collection> {
        self.upper.as_ref()
    }
    pub fn has_admit(&self) -> bool {
        self.admit.is_some()
    }

    /// Bound containment and, when present, the admission predicate.
    pub fn includes(&self, collection: &Collection) -> bool {
        collection.is_within(self.lower.as_ref(), self.upper.as_ref())
            && self.admit.as_ref().map_or(true, |f| f(collection))
    }

    // Value-returning derivations. These are how label-specific variants are
    // carved out of a shared base window; the base is never touched.
    pub fn with_lower(&self, lower: Collection) -> Self {
        let mut derived = self.clone();
        derived.lower = Some(lower);
        derived
    }
    pub fn with_upper(&self, upper: Collection) -> Self {
        let mut derived = self.clone();
        derived.upper = Some(upper);
        derived
    }
    pub fn with_admit(&self, admit: Admit) -> Self {
        let mut derived = self.clone();
        derived.admit = Some(admit);
        derived
    }

    /// True unless both bounds are present and inverted. Used by the catalog
    /// conformance pass.
    pub fn bounds_ordered(&self) -> bool {
        match (&self.lower, &self.upper) {
            (Some(l), Some(u)) => l.on_or_before(u),
            _ => true,
        }
    }
}

impl fmt::Debug for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Interval")
            .field("lower", &self.lower)
            .field("upper", &self.upper)
            .field("admit", &self.admit.as_ref().map(|_| "<predicate>"))
            .finish()
    }
}
impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.lower {
            Some(l) => write!(f, "[{}", l)?,
            None => write!(f, "(..")?,
        }
        write!(f, ", ")?;
        match &self.upper {
            Some(u) => write!(f, "{}]", u),
            None => write!(f, "..)"),
        }
    }
}
