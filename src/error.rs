//! Error types for fetching and charting.
use thiserror::Error;

/// The only failure text shown to users. Details go to the log.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data";

/// Why a single fetch of the GDP series failed.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Non-2xx response
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// Transport failure (DNS, connect, TLS, body read)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Body was not valid JSON, or records did not match the expected shape
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// JSON parsed, but it is not the `[meta, records]` envelope
    #[error("unexpected response shape: {0}")]
    Shape(String),

    /// The API answered with its own error payload in position 0
    #[error("world bank api error: {0}")]
    Api(String),

    /// The fetch ended without delivering a result (worker thread gone)
    #[error("fetch did not complete")]
    Aborted,
}

/// Errors raised while turning records into something drawable or writing it out.
#[derive(Error, Debug)]
pub enum ChartError {
    /// A record had no usable value and the policy is `NullPolicy::Reject`
    #[error("record for {date} has no value")]
    MissingValue { date: String },

    /// Drawing backend failure (plotters reports these as strings)
    #[error("drawing failed: {0}")]
    Draw(String),
}
