// src/aggregate.rs
//! Turns flat `(panelist, year, count)` rows into one summary per panelist.
//!
//! Summaries keep the per-year series and the total apart, so a year can never
//! be confused with the total. Nothing here touches the store or the disk.

use std::collections::BTreeMap;

use serde::Serialize;

/// One row of the year-grouped appearance query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppearanceRecord {
    pub panelist: String,
    pub year: i32,
    pub count: u32,
}

impl AppearanceRecord {
    pub fn new(panelist: impl Into<String>, year: i32, count: u32) -> Self {
        Self { panelist: panelist.into(), year, count }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i32,
    /// Wider than a single record's count so merged rows cannot overflow.
    pub count: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PanelistSummary {
    pub name: String,
    /// Strictly ascending by year.
    pub years: Vec<YearCount>,
    pub total: u64,
}

impl PanelistSummary {
    pub fn count_for(&self, year: i32) -> Option<u64> {
        count_in(&self.years, year)
    }
}

/// Count for `year` in an ascending year series, `None` for a gap year.
pub fn count_in(years: &[YearCount], year: i32) -> Option<u64> {
    years
        .binary_search_by_key(&year, |yc| yc.year)
        .ok()
        .map(|i| years[i].count)
}

/// Keyed and ordered by exact panelist name.
pub type Summaries = BTreeMap<String, PanelistSummary>;

/// Group records by panelist, order each group by year, and total it.
///
/// Input order does not matter. Two records for the same panelist and year
/// are folded into one entry with the counts added.
pub fn aggregate<I>(records: I) -> Summaries
where
    I: IntoIterator<Item = AppearanceRecord>,
{
    let mut grouped: BTreeMap<String, BTreeMap<i32, u64>> = BTreeMap::new();
    for rec in records {
        *grouped
            .entry(rec.panelist)
            .or_default()
            .entry(rec.year)
            .or_insert(0) += u64::from(rec.count);
    }

    grouped
        .into_iter()
        .map(|(name, by_year)| {
            let mut total = 0u64;
            let years = by_year
                .into_iter()
                .map(|(year, count)| {
                    total += count;
                    YearCount { year, count }
                })
                .collect();
            let summary = PanelistSummary { name: name.clone(), years, total };
            (name, summary)
        })
        .collect()
}

/// Ascending, de-duplicated years.
pub fn distinct_years<I>(years: I) -> Vec<i32>
where
    I: IntoIterator<Item = i32>,
{
    let mut out: Vec<i32> = years.into_iter().collect();
    out.sort_unstable();
    out.dedup();
    out
}
