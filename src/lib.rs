//! Millesime – dating vintage garments from their printed codes.
//!
//! Fashion houses encoded production information on their labels in several,
//! historically overlapping schemes ("frameworks"). Given a partial and
//! often ambiguous description of a label – the product code plus whatever
//! the owner can tell about the logo, typeface, sizing notation, maker or a
//! printed year – millesime works out which production periods
//! ("collections") could have produced the garment.
//!
//! The engine is a constraint resolver over a small, per-house universe of
//! [`collection::Collection`] points:
//! * A [`collection::Collection`] is one production period: a year,
//!   optionally a season, optionally a capsule release.
//! * An [`interval::Interval`] is a possibly open range of collections with
//!   an optional carve-out predicate.
//! * A [`line::Line`] is a named sub-line with its operation window and era
//!   tables (when a given logo, typeface, sizing or maker was in use).
//! * A [`framework::FrameworkRule`] couples a code decoder with an ordered
//!   narrowing pipeline; [`framework::evaluate`] runs it.
//! * [`smooth::smooth`] reconciles several frameworks' results and
//!   [`compress::compress`] folds matched periods into readable ranges.
//!
//! All configuration lives in [`catalog`]: built once, verified at load
//! time, shared immutably. Business-rule mismatches are never errors; a
//! framework that cannot match simply contributes nothing.
//!
//! ## Quick start
//! ```
//! use millesime::catalog::{House, Registry};
//! use millesime::framework::{CodeField, Query};
//! let registry = Registry::standard().unwrap();
//! let query = Query::new(House::Verreaux, CodeField::code("V6S"));
//! let results = registry.identify(&query);
//! assert!(!results.is_empty());
//! ```
//!
//! ## Ambiguity
//! Ambiguity is surfaced, never silently resolved: a year digit that fits
//! two decades reports both, two sub-lines sharing a code prefix both
//! appear, and the caller decides. The single user-visible failure mode is
//! an empty result list.

pub mod catalog;
pub mod collection;
pub mod compress;
pub mod decode;
pub mod error;
pub mod framework;
pub mod interval;
pub mod line;
pub mod render;
pub mod smooth;
