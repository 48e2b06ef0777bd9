// tests/aggregate.rs
//
// Grouping, ordering and totals of the aggregation engine.
//
use panelist_report::aggregate::{aggregate, distinct_years, AppearanceRecord, YearCount};

fn rec(name: &str, year: i32, count: u32) -> AppearanceRecord {
    AppearanceRecord::new(name, year, count)
}

#[test]
fn empty_input_gives_empty_map() {
    let out = aggregate(Vec::new());
    assert!(out.is_empty());
}

#[test]
fn alice_and_bob_scenario() {
    let out = aggregate(vec![rec("Alice", 2020, 3), rec("Alice", 2021, 2), rec("Bob", 2021, 5)]);
    assert_eq!(out.len(), 2);

    let alice = &out["Alice"];
    assert_eq!(
        alice.years,
        vec![YearCount { year: 2020, count: 3 }, YearCount { year: 2021, count: 2 }]
    );
    assert_eq!(alice.total, 5);

    let bob = &out["Bob"];
    assert_eq!(bob.years, vec![YearCount { year: 2021, count: 5 }]);
    assert_eq!(bob.total, 5);
}

#[test]
fn unordered_input_is_sorted_and_totalled() {
    let records = vec![
        rec("Carol", 2019, 7),
        rec("Alice", 2018, 1),
        rec("Carol", 2012, 2),
        rec("Bob", 2015, 4),
        rec("Alice", 2011, 9),
        rec("Carol", 2015, 0),
        rec("Bob", 2001, 3),
    ];
    let out = aggregate(records.clone());

    // One summary per distinct name, none invented.
    let names: Vec<&str> = out.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Alice", "Bob", "Carol"]);

    for (name, summary) in &out {
        assert_eq!(&summary.name, name);

        let sum: u64 = summary.years.iter().map(|yc| yc.count).sum();
        assert_eq!(summary.total, sum, "total mismatch for {name}");

        let expected: u64 = records
            .iter()
            .filter(|r| &r.panelist == name)
            .map(|r| u64::from(r.count))
            .sum();
        assert_eq!(summary.total, expected, "input sum mismatch for {name}");

        assert!(
            summary.years.windows(2).all(|w| w[0].year < w[1].year),
            "years not strictly ascending for {name}: {:?}",
            summary.years
        );
    }
}

#[test]
fn no_zero_filling_for_missing_years() {
    let out = aggregate(vec![rec("Alice", 2010, 1), rec("Alice", 2013, 1)]);
    let years: Vec<i32> = out["Alice"].years.iter().map(|yc| yc.year).collect();
    assert_eq!(years, vec![2010, 2013]);
}

#[test]
fn distinct_years_sorts_and_dedups() {
    assert_eq!(distinct_years(vec![2018, 2016, 2018, 2017]), vec![2016, 2017, 2018]);
    assert!(distinct_years(Vec::new()).is_empty());
}
