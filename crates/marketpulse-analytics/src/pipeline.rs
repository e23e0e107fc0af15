use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{info, warn};

use marketpulse_core::{
    CorrelationPair, InsightRecord, InstrumentMetrics, InstrumentRecord, MarketSummary,
    RegionGroup, SectorGroup, SectorMap, UtcDate,
};

use crate::aggregate::{group_by_region, group_by_sector};
use crate::analyzer::{analyze_equity, analyze_index};
use crate::correlation::{correlate, NamedSeries};
use crate::error::AnalyticsError;
use crate::summary::build_summary;

/// Inputs for one full analytics run.
#[derive(Debug, Clone, Copy)]
pub struct PipelineInput<'a> {
    pub indices: &'a [InstrumentRecord],
    pub equities: &'a [InstrumentRecord],
    pub insights: &'a [InsightRecord],
    pub sectors: &'a SectorMap,
    /// Summary generation date; pass a frozen date for reproducible runs.
    pub as_of: UtcDate,
}

/// The six artifact documents produced by one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisBundle {
    pub indices: Vec<InstrumentMetrics>,
    pub equities: Vec<InstrumentMetrics>,
    pub regions: BTreeMap<String, RegionGroup>,
    pub correlations: Vec<CorrelationPair>,
    pub sectors: BTreeMap<String, SectorGroup>,
    pub summary: MarketSummary,
}

/// Bundle plus the per-instrument skips recorded along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub bundle: AnalysisBundle,
    pub skipped: Vec<AnalyticsError>,
}

/// The sequential analytics pipeline: normalize and analyze each instrument,
/// then aggregate, correlate and summarize across instruments.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline;

impl Pipeline {
    pub fn new() -> Self {
        Self
    }

    /// Run every stage. Individual instrument failures are logged and
    /// skipped; the run itself always completes.
    pub fn run(&self, input: &PipelineInput<'_>) -> PipelineReport {
        let mut skipped = Vec::new();

        let mut index_metrics = Vec::with_capacity(input.indices.len());
        let mut index_series = Vec::with_capacity(input.indices.len());
        for record in input.indices {
            match analyze_index(record) {
                Ok(analysis) => {
                    info!(symbol = %record.symbol, "index analyzed");
                    index_series.push(NamedSeries::new(record.name.clone(), analysis.series));
                    index_metrics.push(analysis.metrics);
                }
                Err(error) => {
                    warn!(symbol = %record.symbol, %error, "index skipped");
                    skipped.push(error);
                }
            }
        }

        let mut equity_metrics = Vec::with_capacity(input.equities.len());
        for record in input.equities {
            let insight = input
                .insights
                .iter()
                .find(|insight| insight.symbol == record.symbol);
            match analyze_equity(record, insight) {
                Ok(metrics) => {
                    info!(symbol = %record.symbol, "equity analyzed");
                    equity_metrics.push(metrics);
                }
                Err(error) => {
                    warn!(symbol = %record.symbol, %error, "equity skipped");
                    skipped.push(error);
                }
            }
        }

        let regions = group_by_region(&index_metrics);
        let correlations = correlate(&index_series);
        let sectors = group_by_sector(&equity_metrics, input.sectors);
        let summary = build_summary(
            input.as_of,
            &index_metrics,
            &equity_metrics,
            &regions,
            &sectors,
        );

        PipelineReport {
            bundle: AnalysisBundle {
                indices: index_metrics,
                equities: equity_metrics,
                regions,
                correlations,
                sectors,
                summary,
            },
            skipped,
        }
    }
}
