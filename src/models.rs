use crate::error::ChartError;
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Metadata section returned by the API (position 0).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub page: u32,
    pub pages: u32,
    /// Some responses encode `per_page` as a string, others as a number.
    /// Accept both and normalize to `u32`.
    #[serde(deserialize_with = "de_u32_from_string_or_number")]
    pub per_page: u32,
    pub total: u32,
}

/// Serde helper: parse `u32` from either a JSON number or a string.
fn de_u32_from_string_or_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct U32Visitor;

    impl<'de> Visitor<'de> for U32Visitor {
        type Value = u32;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a string or integer representing a non-negative number")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u32::try_from(v).map_err(E::custom)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u32::try_from(v).map_err(|_| E::custom("negative value for u32"))
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            s.parse::<u32>().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(U32Visitor)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeName {
    pub id: String,
    pub value: String,
}

/// One year's observation as returned by the API (position 1 array).
///
/// Only `date` and `value` feed the chart; the rest is carried along untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub date: String,
    pub value: Option<f64>,
    #[serde(default)]
    pub indicator: Option<CodeName>,
    #[serde(default)]
    pub country: Option<CodeName>,
    #[serde(default)]
    pub countryiso3code: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default, rename = "obs_status")]
    pub obs_status: Option<String>,
    #[serde(default)]
    pub decimal: Option<i32>,
}

impl RawRecord {
    /// Bare record with just the two charted fields.
    pub fn new(date: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            date: date.into(),
            value,
            indicator: None,
            country: None,
            countryiso3code: None,
            unit: None,
            obs_status: None,
            decimal: None,
        }
    }
}

/// What to do with records whose `value` is null (or not finite).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NullPolicy {
    /// Leave the record out of the chart.
    #[default]
    Skip,
    /// Plot the record as a zero-height bar.
    Zero,
    /// Refuse the whole series.
    Reject,
}

/// Numeric `(year, value)` pair ready for scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub year: i32,
    pub value: f64,
}

impl PlotPoint {
    /// Convert raw records into plot points, preserving input order.
    ///
    /// Records whose date has no recognizable year are dropped with a warning,
    /// whatever the null policy.
    pub fn from_records(
        records: &[RawRecord],
        policy: NullPolicy,
    ) -> Result<Vec<PlotPoint>, ChartError> {
        let mut out = Vec::with_capacity(records.len());
        for r in records {
            let Some(year) = parse_year(&r.date) else {
                log::warn!("dropping record with unparseable date {:?}", r.date);
                continue;
            };
            let value = match (r.value.filter(|v| v.is_finite()), policy) {
                (Some(v), _) => v,
                (None, NullPolicy::Skip) => continue,
                (None, NullPolicy::Zero) => 0.0,
                (None, NullPolicy::Reject) => {
                    return Err(ChartError::MissingValue {
                        date: r.date.clone(),
                    });
                }
            };
            out.push(PlotPoint { year, value });
        }
        Ok(out)
    }
}

fn period_code() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // 2020, 2020Q1, 2020M03
    RE.get_or_init(|| Regex::new(r"^(\d{4})(?:[QqMm]\d{1,2})?$").expect("valid regex"))
}

/// Extract the calendar year from an API `date` field.
///
/// Accepts plain years, ISO dates (`2020-01-01`) and World Bank period codes
/// (`2020Q1`, `2020M03`).
pub fn parse_year(date: &str) -> Option<i32> {
    let date = date.trim();
    if let Ok(y) = date.parse::<i32>() {
        return Some(y);
    }
    if let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(d.year());
    }
    period_code()
        .captures(date)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn years_from_all_date_shapes() {
        assert_eq!(parse_year("2020"), Some(2020));
        assert_eq!(parse_year(" 1999 "), Some(1999));
        assert_eq!(parse_year("2021-06-30"), Some(2021));
        assert_eq!(parse_year("2019Q4"), Some(2019));
        assert_eq!(parse_year("2018M07"), Some(2018));
        assert_eq!(parse_year("last year"), None);
        assert_eq!(parse_year(""), None);
    }

    #[test]
    fn null_policies() {
        let recs = vec![
            RawRecord::new("2021", Some(2.0e13)),
            RawRecord::new("2022", None),
            RawRecord::new("2023", Some(f64::NAN)),
        ];

        let skipped = PlotPoint::from_records(&recs, NullPolicy::Skip).unwrap();
        assert_eq!(
            skipped,
            vec![PlotPoint {
                year: 2021,
                value: 2.0e13
            }]
        );

        let zeroed = PlotPoint::from_records(&recs, NullPolicy::Zero).unwrap();
        assert_eq!(zeroed.len(), 3);
        assert_eq!(zeroed[1].value, 0.0);
        assert_eq!(zeroed[2].value, 0.0);

        let err = PlotPoint::from_records(&recs, NullPolicy::Reject).unwrap_err();
        assert!(matches!(err, ChartError::MissingValue { ref date } if date == "2022"));
    }

    #[test]
    fn bad_dates_are_dropped_not_fatal() {
        let recs = vec![RawRecord::new("n/a", Some(1.0)), RawRecord::new("2000", Some(2.0))];
        let pts = PlotPoint::from_records(&recs, NullPolicy::Reject).unwrap();
        assert_eq!(pts, vec![PlotPoint { year: 2000, value: 2.0 }]);
    }

    #[test]
    fn meta_accepts_string_per_page() {
        let m: Meta =
            serde_json::from_str(r#"{"page":1,"pages":2,"per_page":"50","total":64}"#).unwrap();
        assert_eq!(m.per_page, 50);
        assert!(serde_json::from_str::<Meta>(r#"{"page":1,"pages":1,"per_page":-1,"total":0}"#).is_err());
    }
}
