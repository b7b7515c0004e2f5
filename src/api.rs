//! Synchronous client for the **World Bank Indicators API (v2)**, scoped to one series.
//!
//! The chart needs exactly one request: `country/{code}/indicator/{code}?format=json`.
//! The response is a two-element array `[Meta, [RawRecord, ...]]`; only the second
//! element is kept.
//!
//! ### Notes
//! - A fetch is a single attempt: no retry, no backoff.
//! - No request timeout unless one is set in [`SourceConfig::timeout`].
//!
//! Typical usage:
//! ```no_run
//! # use gdp_chart::Client;
//! let client = Client::default();
//! let records = client.fetch_records()?;
//! # Ok::<(), gdp_chart::FetchError>(())
//! ```

use crate::error::FetchError;
use crate::models::{Meta, RawRecord};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://api.worldbank.org/v2";
pub const DEFAULT_COUNTRY: &str = "US";
/// GDP (current US$)
pub const DEFAULT_INDICATOR: &str = "NY.GDP.MKTP.CD";

/// Where the series comes from.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceConfig {
    pub base_url: String,
    pub country: String,
    pub indicator: String,
    /// Rows per page. `None` leaves the API default (50), so one request covers
    /// the most recent 50 years.
    pub per_page: Option<u32>,
    pub timeout: Option<Duration>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            country: DEFAULT_COUNTRY.into(),
            indicator: DEFAULT_INDICATOR.into(),
            per_page: None,
            timeout: None,
        }
    }
}

// Allow -, _, . unescaped in codes (common for indicator ids)
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc(code: &str) -> String {
    percent_encoding::utf8_percent_encode(code.trim(), SAFE).to_string()
}

impl SourceConfig {
    /// The single URL a fetch requests.
    pub fn url(&self) -> String {
        let mut url = format!(
            "{}/country/{}/indicator/{}?format=json",
            self.base_url.trim_end_matches('/'),
            enc(&self.country),
            enc(&self.indicator)
        );
        if let Some(n) = self.per_page {
            url.push_str(&format!("&per_page={}", n));
        }
        url
    }
}

/// Anything that can produce the raw records for one activation of the view.
pub trait RecordSource {
    fn fetch_records(&self) -> Result<Vec<RawRecord>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct Client {
    pub config: SourceConfig,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(SourceConfig::default()).expect("reqwest client build")
    }
}

impl Client {
    pub fn new(config: SourceConfig) -> Result<Self, FetchError> {
        let http = HttpClient::builder()
            .timeout(config.timeout) // `None` disables the blocking client's 30s default
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("gdp-chart/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { config, http })
    }

    /// Perform the one GET and return the records array.
    ///
    /// ### Errors
    /// - [`FetchError::Status`] for any non-2xx response
    /// - [`FetchError::Network`] for transport failures
    /// - [`FetchError::Decode`], [`FetchError::Shape`], [`FetchError::Api`] for bodies
    ///   that are not a usable envelope
    pub fn fetch_records(&self) -> Result<Vec<RawRecord>, FetchError> {
        let url = self.config.url();
        log::debug!("GET {}", url);

        let resp = self.http.get(&url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = resp.bytes()?;
        let records = parse_envelope(&body)?;
        log::info!("fetched {} records from {}", records.len(), url);
        Ok(records)
    }
}

impl RecordSource for Client {
    fn fetch_records(&self) -> Result<Vec<RawRecord>, FetchError> {
        Client::fetch_records(self)
    }
}

/// Decode a `[Meta, [RawRecord, ...]]` body into its records.
///
/// A missing or `null` second element means "no observations" and yields an empty vector.
pub fn parse_envelope(body: &[u8]) -> Result<Vec<RawRecord>, FetchError> {
    let v: Value = serde_json::from_slice(body)?;

    // The API returns an array: [Meta, [Entry, ...]] or a "message" object in position 0 on error.
    let arr = v
        .as_array()
        .ok_or_else(|| FetchError::Shape("not a top-level array".into()))?;
    let head = arr
        .first()
        .ok_or_else(|| FetchError::Shape("empty array".into()))?;
    if let Some(msg) = head.get("message") {
        return Err(FetchError::Api(msg.to_string()));
    }

    if let Ok(meta) = serde_json::from_value::<Meta>(head.clone())
        && meta.pages > 1
    {
        log::warn!(
            "series has {} rows over {} pages; charting page {} only",
            meta.total,
            meta.pages,
            meta.page
        );
    }

    match arr.get(1) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(records) => Ok(serde_json::from_value(records.clone())?),
    }
}
