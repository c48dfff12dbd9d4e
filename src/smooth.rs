//! Reconciles the results of several frameworks into one answer set.
//!
//! A house typically registers more than one framework, and their validity
//! windows legitimately overlap, so the same input can produce several
//! results. Smoothing keeps the framework-priority order, folds results
//! that say the same thing, and lets a counterfeit template through only
//! when nothing legitimate matched.

use tracing::debug;

use crate::framework::MatchResult;

/// Merge the non-empty results of a house's frameworks.
///
/// * Results with value-identical occurrence sets are folded into the first
///   one; a differing maker is appended as an alternative rather than
///   discarded.
/// * A counterfeit template (counterfeit flag set, no legitimate
///   occurrences) takes precedence only when no sibling produced a
///   legitimate result; otherwise templates are dropped and surviving
///   results keep their own counterfeit flags.
/// * Partial overlaps are left side by side: ambiguity is surfaced to the
///   caller, never resolved by picking a winner.
pub fn smooth(results: Vec<MatchResult>) -> Vec<MatchResult> {
    let (templates, legitimate): (Vec<MatchResult>, Vec<MatchResult>) = results
        .into_iter()
        .partition(|r| r.counterfeit_possible && r.occurrences.is_empty());

    if legitimate.is_empty() {
        // no legitimate match anywhere; the first template, if any, is the answer
        return templates.into_iter().take(1).collect();
    }

    let mut merged: Vec<MatchResult> = Vec::new();
    for result in legitimate {
        match merged.iter_mut().find(|kept| kept.occurrences == result.occurrences) {
            Some(kept) => {
                debug!(
                    framework = result.framework,
                    into = kept.framework,
                    "folding duplicate occurrence set"
                );
                if let Some(maker) = result.maker {
                    if kept.maker != Some(maker) && !kept.alternate_makers.contains(&maker) {
                        kept.alternate_makers.push(maker);
                    }
                }
                kept.counterfeit_possible |= result.counterfeit_possible;
                kept.exception |= result.exception;
            }
            None => merged.push(result),
        }
    }
    merged
}
