use marketpulse_core::{SparseSeries, Symbol};

use crate::error::AnalyticsError;

/// Trading-day offset approximating "one week ago" in daily samples.
pub const WEEK_AGO_OFFSET: usize = 6;

/// A close-price series that passed the density check.
///
/// Analysis requires a fully dense close series of at least 2 samples; the
/// reference prices are extracted once here so later stages never re-read the
/// raw record.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSeries {
    closes: Vec<f64>,
    first_price: f64,
    last_price: f64,
    week_ago_price: f64,
}

impl NormalizedSeries {
    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn first_price(&self) -> f64 {
        self.first_price
    }

    pub fn last_price(&self) -> f64 {
        self.last_price
    }

    /// Price `WEEK_AGO_OFFSET` samples before the end, or the first price for
    /// shorter series.
    pub fn week_ago_price(&self) -> f64 {
        self.week_ago_price
    }

    /// `(p[i] / p[i-1]) - 1` for each adjacent pair.
    pub fn daily_returns(&self) -> Vec<f64> {
        self.closes
            .windows(2)
            .map(|pair| pair[1] / pair[0] - 1.0)
            .collect()
    }
}

/// Validate a raw close series and extract its reference prices.
///
/// Rejects series with fewer than 2 samples or any missing close in the
/// requested window; volume gaps are tolerated elsewhere and not checked
/// here.
pub fn normalize(symbol: &Symbol, series: &SparseSeries) -> Result<NormalizedSeries, AnalyticsError> {
    if series.len() < 2 || !series.is_dense() {
        return Err(AnalyticsError::InsufficientSeriesData {
            symbol: symbol.clone(),
            samples: series.len(),
            has_gaps: !series.is_dense(),
        });
    }

    let closes: Vec<f64> = series.valid_values().collect();
    let first_price = closes[0];
    let last_price = closes[closes.len() - 1];

    // A zero reference price would divide period_return into a non-finite
    // value that strict JSON cannot carry; such an instrument is unusable.
    if first_price == 0.0 || last_price == 0.0 {
        return Err(AnalyticsError::ZeroReferencePrice {
            symbol: symbol.clone(),
            first_price,
            last_price,
        });
    }

    let week_ago_price = closes[closes.len().saturating_sub(WEEK_AGO_OFFSET)];

    Ok(NormalizedSeries {
        closes,
        first_price,
        last_price,
        week_ago_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol() -> Symbol {
        Symbol::parse("TEST").expect("symbol")
    }

    #[test]
    fn extracts_reference_prices() {
        let series = SparseSeries::dense([10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0]);
        let normalized = normalize(&symbol(), &series).expect("must normalize");

        assert_eq!(normalized.first_price(), 10.0);
        assert_eq!(normalized.last_price(), 17.0);
        // n = 8, week-ago index = 8 - 6 = 2.
        assert_eq!(normalized.week_ago_price(), 12.0);
    }

    #[test]
    fn short_series_falls_back_to_first_price() {
        let series = SparseSeries::dense([100.0, 101.0, 99.0, 102.0, 105.0]);
        let normalized = normalize(&symbol(), &series).expect("must normalize");
        assert_eq!(normalized.week_ago_price(), normalized.first_price());
    }

    #[test]
    fn rejects_single_sample() {
        let series = SparseSeries::dense([100.0]);
        let err = normalize(&symbol(), &series).expect_err("must fail");
        assert!(matches!(
            err,
            AnalyticsError::InsufficientSeriesData {
                samples: 1,
                has_gaps: false,
                ..
            }
        ));
    }

    #[test]
    fn rejects_zero_first_price() {
        let series = SparseSeries::dense([0.0, 5.0, 6.0]);
        let err = normalize(&symbol(), &series).expect_err("must fail");
        assert!(matches!(
            err,
            AnalyticsError::ZeroReferencePrice {
                first_price,
                ..
            } if first_price == 0.0
        ));
    }

    #[test]
    fn rejects_zero_last_price() {
        let series = SparseSeries::dense([5.0, 4.0, 0.0]);
        let err = normalize(&symbol(), &series).expect_err("must fail");
        assert!(matches!(err, AnalyticsError::ZeroReferencePrice { .. }));
    }

    #[test]
    fn rejects_series_with_missing_close() {
        let series = SparseSeries::new(vec![Some(100.0), None, Some(102.0)]);
        let err = normalize(&symbol(), &series).expect_err("must fail");
        assert!(matches!(
            err,
            AnalyticsError::InsufficientSeriesData { has_gaps: true, .. }
        ));
    }

    #[test]
    fn daily_returns_follow_adjacent_ratios() {
        let series = SparseSeries::dense([100.0, 110.0, 99.0]);
        let normalized = normalize(&symbol(), &series).expect("must normalize");
        let returns = normalized.daily_returns();

        assert_eq!(returns.len(), 2);
        assert!((returns[0] - 0.10).abs() < 1e-12);
        assert!((returns[1] - (99.0 / 110.0 - 1.0)).abs() < 1e-12);
    }
}
