pub mod models;
pub mod symbol;
pub mod timestamp;

pub use models::{
    CorrelationPair, EquityFields, Indicators, InsightRecord, Insights, InstrumentInfo,
    InstrumentMetrics, InstrumentRecord, MarketSummary, PerformanceLeader, QuoteBlock,
    Recommendation, RegionGroup, RegionLeader, SectorGroup, SectorLeader, Trend, Valuation,
    VolatilityLeader,
};
pub use symbol::Symbol;
pub use timestamp::{UtcDate, UtcDateTime};
