//! Analytics engine for marketpulse.
//!
//! Transforms raw per-instrument time series into derived metrics:
//! - Series normalization over null-aware close prices
//! - Per-instrument return, volatility and trend
//! - Pairwise index correlation over a common trailing window
//! - Region/sector aggregation and the market-wide summary
//!
//! Every stage consumes only the outputs of the prior stage; a single
//! instrument's failure is logged and skipped, never fatal to the run.

pub mod aggregate;
pub mod analyzer;
pub mod correlation;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod stats;
pub mod summary;

pub use aggregate::{group_by_region, group_by_sector};
pub use analyzer::{analyze_equity, analyze_index, IndexAnalysis};
pub use correlation::{correlate, NamedSeries};
pub use error::AnalyticsError;
pub use normalize::{normalize, NormalizedSeries, WEEK_AGO_OFFSET};
pub use pipeline::{AnalysisBundle, Pipeline, PipelineInput, PipelineReport};
pub use summary::build_summary;
