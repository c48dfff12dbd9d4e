use millesime::catalog::{santerre, verreaux, House, Registry};
use millesime::collection::Season;

#[test]
fn shipped_catalogs_verify() {
    let registry = Registry::standard().unwrap();
    for house in [House::Verreaux, House::Santerre] {
        let catalog = registry.catalog(house).unwrap();
        assert!(catalog.verify().is_ok());
        assert!(!catalog.frameworks().is_empty());
    }
}

#[test]
fn universes_are_sorted_and_deduplicated() {
    for catalog in [verreaux(), santerre()] {
        let universe = catalog.universe();
        for pair in universe.windows(2) {
            assert!(pair[0] < pair[1], "{}: {} then {}", catalog.house(), pair[0], pair[1]);
        }
    }
}

#[test]
fn every_line_code_resolves() {
    let catalog = verreaux();
    for code in ['V', 'R', 'S', 'X'] {
        let lines = catalog.lines_for(code).unwrap();
        assert!(!lines.is_empty());
        for line in lines {
            assert!(line.operation().bounds_ordered());
        }
    }
    assert!(catalog.lines_for('Z').is_none());
}

#[test]
fn reference_tables_answer_lookups() {
    let catalog = verreaux();
    assert_eq!(catalog.garment_label('J'), Some("Jacket"));
    assert_eq!(catalog.fabric_label('S'), Some("Silk"));
    assert_eq!(catalog.size_label('M'), Some("Medium (38)"));
    assert!(catalog.garment_label('Q').is_none());
    assert!(catalog.season_rule('S').is_some());
    assert!(catalog.season_rule('Z').is_none());
}

#[test]
fn season_codes_admit_something_in_the_universe() {
    for catalog in [verreaux(), santerre()] {
        for code in ['S', 'H', 'P', 'R', 'I', 'C'] {
            if let Some(rule) = catalog.season_rule(code) {
                assert!(
                    catalog.universe().iter().any(|c| rule.admits(c.season())),
                    "{}: season code {} admits nothing",
                    catalog.house(),
                    code
                );
            }
        }
    }
}

#[test]
fn counterfeit_templates_are_well_formed() {
    for catalog in [verreaux(), santerre()] {
        let template = catalog.counterfeit_template();
        assert!(template.counterfeit_possible);
        assert!(template.occurrences.is_empty());
        assert_eq!(template.house, catalog.house());
    }
}

#[test]
fn titled_collections_survive_in_the_universe() {
    let catalog = verreaux();
    let titles: Vec<&str> = catalog
        .universe()
        .iter()
        .filter_map(|c| c.title())
        .collect();
    assert!(titles.contains(&"Saint-Germain"));
    assert!(titles.contains(&"Rive Blanche"));
    // the capsule variant of a titled collection is not itself titled
    assert!(catalog
        .universe()
        .iter()
        .filter(|c| c.capsule())
        .all(|c| c.title() != Some("Rive Blanche")));
}

#[test]
fn resort_only_appears_after_introduction() {
    let catalog = verreaux();
    assert!(catalog
        .universe()
        .iter()
        .filter(|c| c.season() == Season::Resort)
        .all(|c| c.year() >= 1968));
}
