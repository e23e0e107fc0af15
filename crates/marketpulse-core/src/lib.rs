//! Core contracts for marketpulse.
//!
//! This crate contains:
//! - Canonical domain models for raw and derived market records
//! - Null-aware price/volume series primitives
//! - Sector membership configuration
//! - Validation and structured errors

pub mod config;
pub mod domain;
pub mod error;
pub mod series;

pub use config::SectorMap;
pub use domain::{
    Indicators, InsightRecord, Insights, InstrumentInfo, InstrumentMetrics, InstrumentRecord,
    CorrelationPair, EquityFields, MarketSummary, PerformanceLeader, QuoteBlock, Recommendation,
    RegionGroup, RegionLeader, SectorGroup, SectorLeader, Symbol, Trend, UtcDate, UtcDateTime,
    Valuation, VolatilityLeader,
};
pub use error::{CoreError, ValidationError};
pub use series::SparseSeries;
