use marketpulse_core::{
    EquityFields, InsightRecord, InstrumentMetrics, InstrumentRecord, QuoteBlock, Trend,
};

use crate::error::AnalyticsError;
use crate::normalize::{normalize, NormalizedSeries};
use crate::stats::{mean, population_std_dev, round2};

/// Trailing window of the short moving average.
const SHORT_WINDOW: usize = 5;
/// Trailing window of the medium moving average.
const MEDIUM_WINDOW: usize = 20;

/// Analyzer output for one index: the derived metrics plus the normalized
/// close series reused by the correlation engine.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexAnalysis {
    pub metrics: InstrumentMetrics,
    pub series: NormalizedSeries,
}

/// Derive metrics for one market index.
pub fn analyze_index(record: &InstrumentRecord) -> Result<IndexAnalysis, AnalyticsError> {
    let quote = quote_block(record)?;
    let series = normalize(&record.symbol, &quote.close)?;
    let metrics = base_metrics(record, &series, None);

    Ok(IndexAnalysis { metrics, series })
}

/// Derive metrics for one equity, including volume and insight pass-through.
pub fn analyze_equity(
    record: &InstrumentRecord,
    insight: Option<&InsightRecord>,
) -> Result<InstrumentMetrics, AnalyticsError> {
    let quote = quote_block(record)?;
    let series = normalize(&record.symbol, &quote.close)?;

    let insights = insight.and_then(|record| record.insights.as_ref());
    let equity = EquityFields {
        avg_volume: average_volume(&quote.volume),
        recommendation: insights.and_then(|insights| insights.recommendation.clone()),
        valuation: insights
            .and_then(|insights| insights.instrument_info.as_ref())
            .and_then(|info| info.valuation.clone()),
    };

    Ok(base_metrics(record, &series, Some(equity)))
}

fn quote_block(record: &InstrumentRecord) -> Result<&QuoteBlock, AnalyticsError> {
    record
        .indicators
        .as_ref()
        .and_then(|indicators| indicators.quote.first())
        .ok_or_else(|| AnalyticsError::MissingIndicatorData {
            symbol: record.symbol.clone(),
        })
}

fn base_metrics(
    record: &InstrumentRecord,
    series: &NormalizedSeries,
    equity: Option<EquityFields>,
) -> InstrumentMetrics {
    let last_price = series.last_price();
    let period_return = round2((last_price / series.first_price() - 1.0) * 100.0);

    let week_ago_price = series.week_ago_price();
    let week_return = if week_ago_price == 0.0 {
        0.0
    } else {
        round2((last_price / week_ago_price - 1.0) * 100.0)
    };

    let daily_returns = series.daily_returns();
    let volatility = if daily_returns.is_empty() {
        0.0
    } else {
        round2(population_std_dev(&daily_returns) * 100.0)
    };

    let ma5 = trailing_mean(series.closes(), SHORT_WINDOW, last_price);
    let ma20 = trailing_mean(series.closes(), MEDIUM_WINDOW, last_price);

    InstrumentMetrics {
        symbol: record.symbol.clone(),
        name: record.name.clone(),
        region: record.region.clone(),
        last_price,
        period_return,
        week_return,
        volatility,
        trend: classify_trend(ma5, ma20),
        equity,
    }
}

/// Mean of the trailing `window` samples; series shorter than the window fall
/// back to the last price.
fn trailing_mean(closes: &[f64], window: usize, fallback: f64) -> f64 {
    if closes.len() >= window {
        mean(&closes[closes.len() - window..])
    } else {
        fallback
    }
}

/// Exact equality is deliberate: an exact tie reads as a flat market.
fn classify_trend(ma5: f64, ma20: f64) -> Trend {
    if ma5 > ma20 {
        Trend::Alta
    } else if ma5 < ma20 {
        Trend::Baixa
    } else {
        Trend::Lateral
    }
}

/// Average of the non-null volume samples, truncated toward zero.
///
/// A series with no valid volume sample averages to 0, matching the upstream
/// consumers that treat "no data" and "zero volume" alike.
fn average_volume(volumes: &[Option<u64>]) -> u64 {
    let valid: Vec<u64> = volumes.iter().flatten().copied().collect();
    if valid.is_empty() {
        return 0;
    }
    (valid.iter().sum::<u64>() as f64 / valid.len() as f64) as u64
}

#[cfg(test)]
mod tests {
    use marketpulse_core::{
        Indicators, InsightRecord, Insights, QuoteBlock, Recommendation, SparseSeries, Symbol,
    };

    use super::*;

    fn record(symbol: &str, closes: &[f64], volumes: Vec<Option<u64>>) -> InstrumentRecord {
        InstrumentRecord {
            symbol: Symbol::parse(symbol).expect("symbol"),
            name: format!("{symbol} Test"),
            region: "EUA".to_owned(),
            timestamp: Vec::new(),
            indicators: Some(Indicators {
                quote: vec![QuoteBlock {
                    close: SparseSeries::dense(closes.iter().copied()),
                    volume: volumes,
                }],
            }),
        }
    }

    #[test]
    fn computes_period_and_week_returns() {
        let analysis =
            analyze_index(&record("IDX", &[100.0, 101.0, 99.0, 102.0, 105.0], Vec::new()))
                .expect("must analyze");
        let metrics = analysis.metrics;

        assert_eq!(metrics.period_return, 5.0);
        // 5 samples: week-ago price falls back to the first price.
        assert_eq!(metrics.week_return, metrics.period_return);
        assert!(metrics.volatility > 0.0);
        // n < 20 means both moving averages fall back to the last price.
        assert_eq!(metrics.trend, Trend::Lateral);
        assert!(metrics.equity.is_none());
    }

    #[test]
    fn flat_series_is_lateral_with_zero_volatility() {
        let analysis = analyze_index(&record("FLAT", &[100.0; 5], Vec::new())).expect("analyze");
        let metrics = analysis.metrics;

        assert_eq!(metrics.period_return, 0.0);
        assert_eq!(metrics.week_return, 0.0);
        assert_eq!(metrics.volatility, 0.0);
        assert_eq!(metrics.trend, Trend::Lateral);
    }

    #[test]
    fn rising_tail_beats_medium_average() {
        // 20 flat samples then a strong rally: ma5 > ma20.
        let mut closes = vec![100.0; 20];
        closes.extend([104.0, 108.0, 112.0, 116.0, 120.0]);
        let analysis = analyze_index(&record("UP", &closes, Vec::new())).expect("analyze");
        assert_eq!(analysis.metrics.trend, Trend::Alta);
    }

    #[test]
    fn falling_tail_is_baixa() {
        let mut closes = vec![100.0; 20];
        closes.extend([96.0, 92.0, 88.0, 84.0, 80.0]);
        let analysis = analyze_index(&record("DOWN", &closes, Vec::new())).expect("analyze");
        assert_eq!(analysis.metrics.trend, Trend::Baixa);
    }

    #[test]
    fn week_return_uses_sixth_sample_from_end() {
        // 10 samples: week-ago index is 4 (price 104), last is 118.
        let closes = [100.0, 101.0, 102.0, 103.0, 104.0, 106.0, 109.0, 112.0, 115.0, 118.0];
        let analysis = analyze_index(&record("WEEK", &closes, Vec::new())).expect("analyze");

        let expected = round2((118.0 / 104.0 - 1.0) * 100.0);
        assert_eq!(analysis.metrics.week_return, expected);
        assert_eq!(analysis.metrics.period_return, 18.0);
    }

    #[test]
    fn equity_averages_only_valid_volumes() {
        let metrics = analyze_equity(
            &record(
                "AAPL",
                &[100.0, 102.0],
                vec![Some(1_000), None, Some(2_000)],
            ),
            None,
        )
        .expect("must analyze");

        let equity = metrics.equity.expect("equity fields");
        assert_eq!(equity.avg_volume, 1_500);
        assert_eq!(equity.recommendation, None);
        assert_eq!(equity.valuation, None);
    }

    #[test]
    fn equity_without_any_volume_reports_zero() {
        let metrics = analyze_equity(&record("NOVOL", &[100.0, 102.0], vec![None, None]), None)
            .expect("must analyze");
        assert_eq!(metrics.equity.expect("equity").avg_volume, 0);
    }

    #[test]
    fn passes_insight_fields_through_unmodified() {
        let insight = InsightRecord {
            symbol: Symbol::parse("AAPL").expect("symbol"),
            name: "Apple Inc.".to_owned(),
            insights: Some(Insights {
                recommendation: Some(Recommendation {
                    rating: Some("BUY".to_owned()),
                    target_price: Some(250.0),
                }),
                instrument_info: None,
            }),
        };

        let metrics = analyze_equity(
            &record("AAPL", &[100.0, 102.0], vec![Some(500)]),
            Some(&insight),
        )
        .expect("must analyze");

        let equity = metrics.equity.expect("equity fields");
        let recommendation = equity.recommendation.expect("recommendation");
        assert_eq!(recommendation.rating.as_deref(), Some("BUY"));
        assert_eq!(recommendation.target_price, Some(250.0));
        assert_eq!(equity.valuation, None);
    }

    #[test]
    fn missing_indicator_block_is_reported() {
        let record = InstrumentRecord {
            symbol: Symbol::parse("EMPTY").expect("symbol"),
            name: "No Data".to_owned(),
            region: "Europa".to_owned(),
            timestamp: Vec::new(),
            indicators: None,
        };

        let err = analyze_index(&record).expect_err("must fail");
        assert!(matches!(err, AnalyticsError::MissingIndicatorData { .. }));
    }
}
