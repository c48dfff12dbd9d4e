//! Turns a matched collection list back into a human-scannable description.
//!
//! This is run-length encoding over a domain with several non-nested
//! adjacency relations. The scan tries cadences from most specific to most
//! general and emits the first one that carries a run of at least two
//! points; everything else becomes a singleton. Emitted tokens partition
//! the input exactly: a range never implies a point that was not in the
//! candidate list, and every input point lands in exactly one token.

use std::fmt;

use serde::Serialize;

use crate::collection::Collection;

/// The adjacency relation a range token was recognized under, most specific
/// first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Cadence {
    Annual,
    Semiannual,
    Quarterly,
    Capsule,
    Mixed,
}

impl Cadence {
    const ALL: [Cadence; 5] = [
        Cadence::Annual,
        Cadence::Semiannual,
        Cadence::Quarterly,
        Cadence::Capsule,
        Cadence::Mixed,
    ];
    fn step(&self, a: &Collection, b: &Collection) -> bool {
        match self {
            Cadence::Annual => a.followed_by_annual(b),
            Cadence::Semiannual => a.followed_by_semiannual(b),
            Cadence::Quarterly => a.followed_by_quarterly(b),
            Cadence::Capsule => a.followed_by_capsule(b),
            Cadence::Mixed => a.followed_by_any(b),
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Cadence::Annual => write!(f, "every year"),
            Cadence::Semiannual => write!(f, "every season"),
            Cadence::Quarterly => write!(f, "every quarter"),
            Cadence::Capsule => write!(f, "including capsules"),
            Cadence::Mixed => write!(f, "consecutive collections"),
        }
    }
}

/// One emitted token: a single period or an inclusive range at one cadence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Compressed {
    Point(Collection),
    Range {
        first: Collection,
        last: Collection,
        cadence: Cadence,
    },
}

impl fmt::Display for Compressed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Compressed::Point(c) => write!(f, "{}", c),
            Compressed::Range { first, last, cadence } => {
                write!(f, "{} to {} ({})", first, last, cadence)
            }
        }
    }
}

/// Compress a sorted-ascending collection list into range tokens.
///
/// Sortedness under the total order is a precondition and is not
/// re-verified; the evaluator sorts every occurrence group before handing
/// it on.
pub fn compress(collections: &[Collection]) -> Vec<Compressed> {
    let mut tokens = Vec::new();
    let mut at = 0;
    while at < collections.len() {
        let mut advanced = false;
        for cadence in Cadence::ALL {
            let mut end = at;
            while end + 1 < collections.len()
                && cadence.step(&collections[end], &collections[end + 1])
            {
                end += 1;
            }
            if end > at {
                tokens.push(Compressed::Range {
                    first: collections[at].clone(),
                    last: collections[end].clone(),
                    cadence,
                });
                at = end + 1;
                advanced = true;
                break;
            }
        }
        if !advanced {
            tokens.push(Compressed::Point(collections[at].clone()));
            at += 1;
        }
    }
    tokens
}
