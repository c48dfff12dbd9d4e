use millesime::catalog::{House, Registry};
use millesime::collection::{Collection, Season};
use millesime::framework::{CodeField, MatchResult, Query, YearPrint};
use millesime::line::{LineMatch, Maker, Sizing};
use millesime::render::render_report;

fn setup() -> Registry {
    Registry::standard().unwrap()
}

fn identify(registry: &Registry, query: Query) -> Vec<MatchResult> {
    registry.identify(&query)
}

fn group<'a>(result: &'a MatchResult, line: &str) -> &'a LineMatch {
    result
        .occurrences
        .iter()
        .find(|g| g.line == line)
        .unwrap_or_else(|| panic!("no occurrence group for {line}"))
}

fn spring(year: i32) -> Collection {
    Collection::seasonal(year, Season::SpringSummer)
}
fn autumn(year: i32) -> Collection {
    Collection::seasonal(year, Season::AutumnWinter)
}

#[test]
fn hand_stamp_reports_every_decade_and_line() {
    let registry = setup();
    let results = identify(&registry, Query::new(House::Verreaux, CodeField::code("V6S")));
    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.framework, "hand stamp");
    assert_eq!(result.canonical_code.as_deref(), Some("V-6-S"));
    assert_eq!(result.maker, Some(Maker::MaisonVerreaux));
    assert!(!result.exception);
    assert!(!result.counterfeit_possible);
    // 'V' was stamped by two lines; both stay in the answer
    assert_eq!(result.occurrences.len(), 2);
    assert_eq!(
        group(result, "Verreaux Paris").collections,
        vec![spring(1956), spring(1966), spring(1976), spring(1986), spring(1986).capsule_of()]
    );
    assert_eq!(
        group(result, "Verreaux Rive").collections,
        vec![spring(1976), spring(1986), spring(1986).capsule_of()]
    );
}

#[test]
fn sizing_attribute_narrows_one_line_and_skips_the_other() {
    let registry = setup();
    let query = Query::new(House::Verreaux, CodeField::code("V6S"))
        .with_sizing(Sizing::Alphabetical);
    let results = identify(&registry, query);
    assert_eq!(results.len(), 1);
    let result = &results[0];
    // Rive never used alphabetical sizes, so the line drops out entirely
    assert_eq!(result.occurrences.len(), 1);
    assert_eq!(
        group(result, "Verreaux Paris").collections,
        vec![spring(1956), spring(1966), spring(1976)]
    );
}

#[test]
fn ambiguous_decade_stamp_is_flagged() {
    let registry = setup();
    let results = identify(&registry, Query::new(House::Verreaux, CodeField::code("V55H")));
    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert!(result.exception);
    assert_eq!(result.canonical_code.as_deref(), Some("V-55-H"));
    // "55" means any year ending in 5, not 1955
    assert_eq!(
        group(result, "Verreaux Paris").collections,
        vec![autumn(1955), autumn(1965), autumn(1975), autumn(1985)]
    );
    assert_eq!(
        group(result, "Verreaux Rive").collections,
        vec![autumn(1975), autumn(1985)]
    );
}

#[test]
fn reused_season_letter_is_flagged() {
    let registry = setup();
    let results = identify(&registry, Query::new(House::Verreaux, CodeField::code("V7R")));
    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert!(result.exception);
    // both readings of 'R' stay in play
    let paris = group(result, "Verreaux Paris");
    assert!(paris.collections.contains(&autumn(1957)));
    assert!(paris.collections.contains(&Collection::seasonal(1977, Season::Resort)));
}

#[test]
fn operation_gap_year_never_matches() {
    let registry = setup();
    let results = identify(&registry, Query::new(House::Verreaux, CodeField::code("V9H")));
    let result = &results[0];
    let paris = group(result, "Verreaux Paris");
    // no collection shipped the year the atelier burned down
    assert!(!paris.collections.contains(&autumn(1969)));
    assert_eq!(
        paris.collections,
        vec![autumn(1949), autumn(1959), autumn(1979), autumn(1989)]
    );
}

#[test]
fn care_label_month_maps_through_the_schedule() {
    let registry = setup();
    let results = identify(&registry, Query::new(House::Verreaux, CodeField::code("VJC605M")));
    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.framework, "care label");
    assert_eq!(result.canonical_code.as_deref(), Some("VJC-605-M"));
    assert_eq!(result.maker, Some(Maker::ConfectionLyonnaise));
    assert_eq!(result.garment.as_deref(), Some("Jacket"));
    assert_eq!(result.fabric.as_deref(), Some("Cotton"));
    assert_eq!(result.size.as_deref(), Some("Medium (38)"));
    // May production is Spring/Summer for an early-schedule line but
    // Autumn/Winter for a late one
    assert_eq!(
        group(result, "Verreaux Paris").collections,
        vec![spring(1986), spring(1986).capsule_of(), spring(1996), spring(2006)]
    );
    assert_eq!(
        group(result, "Verreaux Rive").collections,
        vec![autumn(1986), autumn(1996)]
    );
}

#[test]
fn late_schedule_rolls_the_year_forward() {
    let registry = setup();
    let results = identify(&registry, Query::new(House::Verreaux, CodeField::code("VJC611M")));
    let result = &results[0];
    // November production: the early line stamps its own Autumn/Winter, the
    // late line is already making the next year's Spring/Summer
    assert_eq!(
        group(result, "Verreaux Paris").collections,
        vec![autumn(1986), autumn(1996), autumn(2006)]
    );
    assert_eq!(
        group(result, "Verreaux Rive").collections,
        vec![spring(1987), spring(1997)]
    );
}

#[test]
fn export_stamp_window_is_carved_down() {
    let registry = setup();
    let results = identify(&registry, Query::new(House::Verreaux, CodeField::code("XJC605M")));
    assert_eq!(results.len(), 1);
    assert_eq!(
        group(&results[0], "Verreaux Sport").collections,
        vec![spring(2006)]
    );
    // the hand stamp never overlaps the export window
    assert!(identify(&registry, Query::new(House::Verreaux, CodeField::code("X6S"))).is_empty());
}

#[test]
fn year_print_pins_the_decade() {
    let registry = setup();
    let query = Query::new(House::Verreaux, CodeField::code("V6S"))
        .with_year_print(YearPrint::Digits("1986".to_owned()));
    let results = identify(&registry, query);
    let result = &results[0];
    assert_eq!(
        group(result, "Verreaux Paris").collections,
        vec![spring(1986), spring(1986).capsule_of()]
    );
    assert_eq!(
        group(result, "Verreaux Rive").collections,
        vec![spring(1986), spring(1986).capsule_of()]
    );
}

#[test]
fn malformed_year_print_matches_nothing() {
    let registry = setup();
    let query = Query::new(House::Verreaux, CodeField::code("V6S"))
        .with_year_print(YearPrint::Digits("198".to_owned()));
    assert!(identify(&registry, query).is_empty());
}

#[test]
fn unknown_line_letter_matches_nothing() {
    let registry = setup();
    assert!(identify(&registry, Query::new(House::Verreaux, CodeField::code("Z5S"))).is_empty());
}

#[test]
fn undecodable_code_fields_match_nothing() {
    let registry = setup();
    for code in [CodeField::Blank, CodeField::Unreadable, CodeField::Unspecified] {
        assert!(identify(&registry, Query::new(House::Verreaux, code)).is_empty());
    }
}

#[test]
fn identification_is_deterministic() {
    let registry = setup();
    let query = Query::new(House::Verreaux, CodeField::code("V6S"));
    let first = identify(&registry, query.clone());
    let second = identify(&registry, query);
    assert_eq!(first, second);
}

#[test]
fn report_carries_the_canonical_code() {
    let registry = setup();
    let query = Query::new(House::Verreaux, CodeField::code("V6S"));
    let results = identify(&registry, query.clone());
    let report = render_report(&query, &results);
    assert!(report.contains("V-6-S"));
    assert!(report.contains("Verreaux Paris"));
    let none = render_report(&query, &[]);
    assert!(none.contains("No known encoding framework"));
}
