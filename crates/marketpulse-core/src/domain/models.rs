use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::series::SparseSeries;
use crate::{Symbol, UtcDate};

/// Raw per-instrument record as delivered by the acquisition collaborator.
///
/// The `indicators` block mirrors the market-data API chart payload; it may be
/// absent entirely, in which case the instrument is skipped by the analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentRecord {
    pub symbol: Symbol,
    pub name: String,
    pub region: String,
    /// Per-sample epoch timestamps; carried through but unused by analytics.
    #[serde(default)]
    pub timestamp: Vec<i64>,
    #[serde(default)]
    pub indicators: Option<Indicators>,
}

/// Indicator container from the chart payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteBlock>,
}

/// Close/volume arrays for one instrument; both tolerate null samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteBlock {
    #[serde(default)]
    pub close: SparseSeries,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

/// Optional analyst side data, looked up by symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightRecord {
    pub symbol: Symbol,
    pub name: String,
    #[serde(default)]
    pub insights: Option<Insights>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    #[serde(default)]
    pub recommendation: Option<Recommendation>,
    #[serde(default, rename = "instrumentInfo")]
    pub instrument_info: Option<InstrumentInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstrumentInfo {
    #[serde(default)]
    pub valuation: Option<Valuation>,
}

/// Analyst recommendation, passed through to equity metrics unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub rating: Option<String>,
    #[serde(rename = "targetPrice")]
    pub target_price: Option<f64>,
}

/// Valuation snippet, passed through to equity metrics unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub description: Option<String>,
    pub discount: Option<String>,
}

/// Moving-average crossover signal (5-sample vs 20-sample trailing mean).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Alta,
    Baixa,
    Lateral,
}

impl Trend {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alta => "Alta",
            Self::Baixa => "Baixa",
            Self::Lateral => "Lateral",
        }
    }
}

impl Display for Trend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived analytics for one instrument, immutable once produced.
///
/// Index metrics carry no equity block; equity metrics always carry one, with
/// recommendation/valuation serialized as explicit nulls when no insight
/// record exists for the symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentMetrics {
    pub symbol: Symbol,
    pub name: String,
    pub region: String,
    pub last_price: f64,
    pub period_return: f64,
    pub week_return: f64,
    pub volatility: f64,
    pub trend: Trend,
    #[serde(flatten)]
    pub equity: Option<EquityFields>,
}

impl InstrumentMetrics {
    pub fn is_equity(&self) -> bool {
        self.equity.is_some()
    }
}

/// Equity-only fields of [`InstrumentMetrics`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityFields {
    /// Average of the non-null volume samples, truncated; 0 when the series
    /// has no valid volume sample.
    pub avg_volume: u64,
    pub recommendation: Option<Recommendation>,
    pub valuation: Option<Valuation>,
}

/// Per-region aggregate over index metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionGroup {
    #[serde(rename = "indices")]
    pub members: Vec<Symbol>,
    pub avg_return: f64,
    pub count: usize,
}

/// Per-sector aggregate over equity metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorGroup {
    #[serde(rename = "stocks")]
    pub members: Vec<Symbol>,
    pub avg_return: f64,
    pub avg_volatility: f64,
}

/// Pearson coefficient for one ordered pair of distinct indices.
///
/// The matrix is symmetric; both (A, B) and (B, A) are emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPair {
    pub index1: String,
    pub index2: String,
    pub correlation: f64,
}

/// Market-wide snapshot derived from every other artifact.
///
/// Empty input collections yield explicit null fields rather than errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
    pub date: UtcDate,
    pub indices_count: usize,
    pub stocks_count: usize,
    pub best_performing_index: Option<PerformanceLeader>,
    pub worst_performing_index: Option<PerformanceLeader>,
    pub best_performing_stock: Option<PerformanceLeader>,
    pub worst_performing_stock: Option<PerformanceLeader>,
    pub highest_volatility_index: Option<VolatilityLeader>,
    pub highest_volatility_stock: Option<VolatilityLeader>,
    pub best_performing_region: Option<RegionLeader>,
    pub best_performing_sector: Option<SectorLeader>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceLeader {
    pub name: String,
    #[serde(rename = "return")]
    pub period_return: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityLeader {
    pub name: String,
    pub volatility: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionLeader {
    pub region: String,
    #[serde(rename = "return")]
    pub period_return: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorLeader {
    pub sector: String,
    #[serde(rename = "return")]
    pub period_return: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_metrics_omit_equity_fields() {
        let metrics = InstrumentMetrics {
            symbol: Symbol::parse("^GSPC").expect("symbol"),
            name: "S&P 500".to_owned(),
            region: "EUA".to_owned(),
            last_price: 5000.0,
            period_return: 5.0,
            week_return: 1.2,
            volatility: 0.8,
            trend: Trend::Alta,
            equity: None,
        };

        let value = serde_json::to_value(&metrics).expect("serialize");
        assert!(value.get("avg_volume").is_none());
        assert!(value.get("recommendation").is_none());
        assert_eq!(value["trend"], "Alta");
    }

    #[test]
    fn equity_metrics_emit_null_insights_when_absent() {
        let metrics = InstrumentMetrics {
            symbol: Symbol::parse("AAPL").expect("symbol"),
            name: "Apple Inc.".to_owned(),
            region: "EUA".to_owned(),
            last_price: 180.0,
            period_return: -1.0,
            week_return: 0.0,
            volatility: 2.1,
            trend: Trend::Baixa,
            equity: Some(EquityFields {
                avg_volume: 1_000,
                recommendation: None,
                valuation: None,
            }),
        };

        let value = serde_json::to_value(&metrics).expect("serialize");
        assert_eq!(value["avg_volume"], 1_000);
        assert!(value["recommendation"].is_null());
        assert!(value["valuation"].is_null());
    }

    #[test]
    fn parses_raw_record_with_null_samples() {
        let raw = r#"{
            "symbol": "AAPL",
            "name": "Apple Inc.",
            "region": "EUA",
            "timestamp": [1700000000, 1700086400],
            "indicators": { "quote": [ { "close": [180.0, null], "volume": [1000, null] } ] }
        }"#;

        let record: InstrumentRecord = serde_json::from_str(raw).expect("parse");
        let quote = &record.indicators.expect("indicators").quote[0];
        assert_eq!(quote.close.len(), 2);
        assert!(!quote.close.is_dense());
        assert_eq!(quote.volume[1], None);
    }

    #[test]
    fn parses_insight_record_with_camel_case_fields() {
        let raw = r#"{
            "symbol": "MSFT",
            "name": "Microsoft Corporation",
            "insights": {
                "recommendation": { "rating": "BUY", "targetPrice": 500.0 },
                "instrumentInfo": { "valuation": { "description": "Overvalued", "discount": "-8%" } }
            }
        }"#;

        let record: InsightRecord = serde_json::from_str(raw).expect("parse");
        let insights = record.insights.expect("insights");
        assert_eq!(
            insights.recommendation.expect("recommendation").target_price,
            Some(500.0)
        );
        assert_eq!(
            insights
                .instrument_info
                .expect("info")
                .valuation
                .expect("valuation")
                .discount
                .as_deref(),
            Some("-8%")
        );
    }
}
