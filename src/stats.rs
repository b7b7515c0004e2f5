use crate::models::{RawRecord, parse_year};
use serde::{Deserialize, Serialize};

/// Summary statistics over one raw series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
}

/// Null (or non-finite) values count as `missing` and are left out of the moments.
pub fn summarize(records: &[RawRecord]) -> Summary {
    let mut vals: Vec<f64> = Vec::with_capacity(records.len());
    let mut missing = 0usize;
    for r in records {
        match r.value.filter(|v| v.is_finite()) {
            Some(v) => vals.push(v),
            None => missing += 1,
        }
    }
    vals.sort_by(f64::total_cmp);

    let count = vals.len();
    let mean = (count > 0).then(|| vals.iter().sum::<f64>() / count as f64);
    let median = if count == 0 {
        None
    } else if count % 2 == 1 {
        Some(vals[count / 2])
    } else {
        Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
    };

    let years = records.iter().filter_map(|r| parse_year(&r.date));
    let (first_year, last_year) = years.fold((None, None), |(lo, hi): (Option<i32>, Option<i32>), y| {
        (
            Some(lo.map_or(y, |l| l.min(y))),
            Some(hi.map_or(y, |h| h.max(y))),
        )
    });

    Summary {
        count,
        missing,
        min: vals.first().copied(),
        max: vals.last().copied(),
        mean,
        median,
        first_year,
        last_year,
    }
}
