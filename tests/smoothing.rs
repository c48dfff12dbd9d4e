use millesime::catalog::{House, Registry};
use millesime::collection::{Collection, Season};
use millesime::framework::{CodeField, Query};
use millesime::line::Maker;

fn setup() -> Registry {
    Registry::standard().unwrap()
}

fn spring(year: i32) -> Collection {
    Collection::seasonal(year, Season::SpringSummer)
}

#[test]
fn identical_results_fold_with_alternate_maker() {
    let registry = setup();
    let results = registry.identify(&Query::new(House::Santerre, CodeField::code("MP85")));
    // both registro books cover 1985 and say the same thing; one answer,
    // two possible makers
    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.framework, "registro");
    assert_eq!(result.maker, Some(Maker::GruppoSanterre));
    assert_eq!(result.alternate_makers, vec![Maker::SartoriaBergamo]);
    assert_eq!(result.occurrences.len(), 1);
    assert_eq!(result.occurrences[0].collections, vec![spring(1985)]);
}

#[test]
fn single_framework_reports_no_alternates() {
    let registry = setup();
    let results = registry.identify(&Query::new(House::Santerre, CodeField::code("MP75")));
    // the Bergamo books only open in 1981, so 1975 has one reading
    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.maker, Some(Maker::GruppoSanterre));
    assert!(result.alternate_makers.is_empty());
    assert_eq!(result.occurrences[0].collections, vec![spring(1975)]);
}

#[test]
fn caller_supplied_maker_overrides_attribution() {
    let registry = setup();
    let query = Query::new(House::Santerre, CodeField::code("MP85"))
        .with_maker(Maker::SartoriaBergamo);
    let results = registry.identify(&query);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].maker, Some(Maker::SartoriaBergamo));
    assert!(results[0].alternate_makers.is_empty());
}

#[test]
fn maker_window_can_empty_the_answer() {
    let registry = setup();
    // Bergamo did not exist in 1975
    let query = Query::new(House::Santerre, CodeField::code("MP75"))
        .with_maker(Maker::SartoriaBergamo);
    assert!(registry.identify(&query).is_empty());
}

#[test]
fn legitimate_match_beats_the_counterfeit_template() {
    let registry = setup();
    let results = registry.identify(&Query::new(House::Santerre, CodeField::code("MP74")));
    // the code is on the counterfeit list but 1974 is a real collection;
    // report the match and keep the warning flag
    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert!(result.counterfeit_possible);
    assert_eq!(result.occurrences[0].collections, vec![spring(1974)]);
}

#[test]
fn counterfeit_template_when_nothing_legitimate_matches() {
    let registry = setup();
    let results = registry.identify(&Query::new(House::Santerre, CodeField::code("MZ99")));
    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert!(result.counterfeit_possible);
    assert!(result.occurrences.is_empty());
    assert_eq!(result.canonical_code.as_deref(), Some("M-Z-99"));
    // the template is attributed to the first framework that saw the code
    assert_eq!(result.framework, "registro");
}

#[test]
fn verreaux_counterfeits_follow_the_same_rule() {
    let registry = setup();
    for (code, canonical) in [("Q55S", "Q-55-S"), ("V99S", "V-99-S")] {
        let results = registry.identify(&Query::new(House::Verreaux, CodeField::code(code)));
        assert_eq!(results.len(), 1, "{code}");
        let result = &results[0];
        assert!(result.counterfeit_possible);
        assert!(result.occurrences.is_empty());
        assert_eq!(result.canonical_code.as_deref(), Some(canonical));
    }
}

#[test]
fn unlisted_dead_code_is_just_empty() {
    let registry = setup();
    // out of every window and not on the counterfeit list: plain no match
    let results = registry.identify(&Query::new(House::Verreaux, CodeField::code("X6S")));
    assert!(results.is_empty());
}
