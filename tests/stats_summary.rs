mod common;

use common::records;
use gdp_chart::stats::summarize;

#[test]
fn summary_counts_missing_and_moments() {
    let recs = records(&[
        (2023, None),
        (2022, Some(4.0)),
        (2021, Some(1.0)),
        (2020, Some(3.0)),
        (2019, Some(2.0)),
    ]);
    let s = summarize(&recs);
    assert_eq!(s.count, 4);
    assert_eq!(s.missing, 1);
    assert_eq!(s.min, Some(1.0));
    assert_eq!(s.max, Some(4.0));
    assert_eq!(s.mean, Some(2.5));
    assert_eq!(s.median, Some(2.5));
    assert_eq!(s.first_year, Some(2019));
    assert_eq!(s.last_year, Some(2023));
}

#[test]
fn summary_of_nothing() {
    let s = summarize(&[]);
    assert_eq!(s.count, 0);
    assert_eq!(s.missing, 0);
    assert!(s.min.is_none() && s.mean.is_none() && s.median.is_none());
    assert!(s.first_year.is_none());
}
