use std::sync::Arc;

use millesime::collection::{Collection, Season};
use millesime::interval::Interval;

fn spring(year: i32) -> Collection {
    Collection::seasonal(year, Season::SpringSummer)
}

#[test]
fn open_interval_includes_everything() {
    let open = Interval::open();
    assert!(open.includes(&spring(1900)));
    assert!(open.includes(&Collection::of_year(2050)));
}

#[test]
fn bounded_membership() {
    let window = Interval::between(Collection::of_year(1980), Collection::of_year(1989));
    assert!(window.includes(&spring(1980)));
    assert!(window.includes(&spring(1985)));
    assert!(window.includes(&Collection::seasonal(1989, Season::AutumnWinter)));
    assert!(!window.includes(&spring(1979)));
    assert!(!window.includes(&Collection::seasonal(1991, Season::SpringSummer)));
}

#[test]
fn membership_is_monotonic_without_admit() {
    // without a carve-out no point outside the bounds is ever included
    let window = Interval::between(Collection::of_year(1975), Collection::of_year(1985));
    for year in 1950..2010 {
        for season in [Season::SpringSummer, Season::AutumnWinter, Season::Unknown] {
            let point = Collection::seasonal(year, season);
            let inside = point.on_or_after(window.lower().unwrap())
                && point.on_or_before(window.upper().unwrap());
            assert_eq!(window.includes(&point), inside, "{point}");
        }
    }
}

#[test]
fn half_open_intervals() {
    let since = Interval::starting(Collection::of_year(1999));
    assert!(since.includes(&spring(2005)));
    assert!(!since.includes(&spring(1998)));
    let until = Interval::until(Collection::of_year(1989));
    assert!(until.includes(&spring(1960)));
    assert!(!until.includes(&Collection::seasonal(1990, Season::AutumnWinter)));
}

#[test]
fn year_bound_absorbs_next_spring() {
    // the season-unspecified upper bound keeps the following spring inside,
    // matching the year-stamp convention; this is deliberate
    let until = Interval::until(Collection::of_year(1989));
    assert!(until.includes(&spring(1990)));
    assert!(!until.includes(&Collection::seasonal(1990, Season::AutumnWinter)));
}

#[test]
fn derivations_do_not_touch_the_base() {
    let base = Interval::between(Collection::of_year(1948), Collection::of_year(2012));
    let carved = base
        .with_lower(Collection::of_year(1998))
        .with_admit(Arc::new(|c| c.season() != Season::Resort));
    assert!(base.includes(&spring(1950)));
    assert!(!carved.includes(&spring(1950)));
    assert!(carved.includes(&spring(2000)));
    assert!(!carved.includes(&Collection::seasonal(2000, Season::Resort)));
    // the base still admits what the carve-out rejects
    assert!(base.includes(&Collection::seasonal(2000, Season::Resort)));
}

#[test]
fn with_upper_replaces_only_the_upper_bound() {
    let window = Interval::starting(Collection::of_year(1971));
    let closed = window.with_upper(Collection::of_year(2002));
    assert!(window.includes(&spring(2005)));
    assert!(!closed.includes(&spring(2005)));
    assert_eq!(closed.lower(), window.lower());
}

#[test]
fn bounds_ordered_detects_inversion() {
    assert!(Interval::between(Collection::of_year(1980), Collection::of_year(1990)).bounds_ordered());
    assert!(!Interval::between(Collection::of_year(1990), Collection::of_year(1980)).bounds_ordered());
    assert!(Interval::open().bounds_ordered());
}
