use marketpulse_core::Symbol;
use thiserror::Error;

/// Analytics failure taxonomy.
///
/// `MissingIndicatorData`, `InsufficientSeriesData` and `ZeroReferencePrice`
/// are per-instrument and non-fatal: the instrument is excluded from every
/// derived output and the run continues. `CorrelationComputationFailure` is
/// caught at the engine boundary and degrades to an empty correlation
/// artifact.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("instrument '{symbol}' has no indicator quote data")]
    MissingIndicatorData { symbol: Symbol },

    #[error(
        "instrument '{symbol}' has insufficient series data \
         ({samples} samples, missing closes: {has_gaps})"
    )]
    InsufficientSeriesData {
        symbol: Symbol,
        samples: usize,
        has_gaps: bool,
    },

    #[error(
        "instrument '{symbol}' has a zero reference price \
         (first: {first_price}, last: {last_price})"
    )]
    ZeroReferencePrice {
        symbol: Symbol,
        first_price: f64,
        last_price: f64,
    },

    #[error("correlation computation failed: {reason}")]
    CorrelationComputationFailure { reason: String },
}
