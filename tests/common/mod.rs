#![allow(dead_code)]

use gdp_chart::{FetchError, RawRecord, RecordSource};
use serde_json::{Value, json};
use std::cell::{Cell, RefCell};

/// `[meta, records]` body as the World Bank API sends it, for `(year, value)` pairs.
pub fn envelope(rows: &[(i32, Option<f64>)]) -> Value {
    let records: Vec<Value> = rows
        .iter()
        .map(|(year, value)| {
            json!({
                "indicator": {"id": "NY.GDP.MKTP.CD", "value": "GDP (current US$)"},
                "country": {"id": "US", "value": "United States"},
                "countryiso3code": "USA",
                "date": year.to_string(),
                "value": value,
                "unit": "",
                "obs_status": "",
                "decimal": 0
            })
        })
        .collect();
    json!([
        {"page": 1, "pages": 1, "per_page": 50, "total": rows.len()},
        records
    ])
}

pub fn records(rows: &[(i32, Option<f64>)]) -> Vec<RawRecord> {
    rows.iter()
        .map(|(y, v)| RawRecord::new(y.to_string(), *v))
        .collect()
}

/// Source that hands out queued outcomes and counts calls.
#[derive(Default)]
pub struct ScriptedSource {
    pub calls: Cell<usize>,
    outcomes: RefCell<Vec<Result<Vec<RawRecord>, FetchError>>>,
}

impl ScriptedSource {
    pub fn new(outcomes: Vec<Result<Vec<RawRecord>, FetchError>>) -> Self {
        Self {
            calls: Cell::new(0),
            outcomes: RefCell::new(outcomes),
        }
    }
}

impl RecordSource for ScriptedSource {
    fn fetch_records(&self) -> Result<Vec<RawRecord>, FetchError> {
        self.calls.set(self.calls.get() + 1);
        let mut q = self.outcomes.borrow_mut();
        if q.is_empty() {
            Ok(Vec::new())
        } else {
            q.remove(0)
        }
    }
}
