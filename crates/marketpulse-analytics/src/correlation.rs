use marketpulse_core::CorrelationPair;
use tracing::warn;

use crate::error::AnalyticsError;
use crate::normalize::NormalizedSeries;
use crate::stats::{pearson, round2};

/// One instrument's normalized close series keyed by display name.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSeries {
    pub name: String,
    pub series: NormalizedSeries,
}

impl NamedSeries {
    pub fn new(name: impl Into<String>, series: NormalizedSeries) -> Self {
        Self {
            name: name.into(),
            series,
        }
    }
}

/// Pairwise Pearson correlation over a common trailing window.
///
/// Every series is truncated to the last `min_length` samples so the most
/// recent data aligns, then one pair is emitted per ordered (row, column)
/// combination of distinct instruments. Degenerate input never aborts the
/// run: the failure is logged and an empty list is returned.
pub fn correlate(inputs: &[NamedSeries]) -> Vec<CorrelationPair> {
    match try_correlate(inputs) {
        Ok(pairs) => pairs,
        Err(error) => {
            warn!(%error, "correlation degraded to empty result");
            Vec::new()
        }
    }
}

fn try_correlate(inputs: &[NamedSeries]) -> Result<Vec<CorrelationPair>, AnalyticsError> {
    if inputs.is_empty() {
        return Err(AnalyticsError::CorrelationComputationFailure {
            reason: "no instrument has usable price data".to_owned(),
        });
    }

    let min_length = inputs
        .iter()
        .map(|input| input.series.len())
        .min()
        .unwrap_or(0);
    if min_length < 2 {
        return Err(AnalyticsError::CorrelationComputationFailure {
            reason: format!("common trailing window has {min_length} samples, need at least 2"),
        });
    }

    // Rectangular table: one column per instrument, aligned on the trailing edge.
    let columns: Vec<(&str, &[f64])> = inputs
        .iter()
        .map(|input| {
            let closes = input.series.closes();
            (input.name.as_str(), &closes[closes.len() - min_length..])
        })
        .collect();

    let mut pairs = Vec::with_capacity(columns.len() * columns.len().saturating_sub(1));
    for (row, (row_name, row_values)) in columns.iter().enumerate() {
        for (column, (column_name, column_values)) in columns.iter().enumerate() {
            if row == column {
                continue;
            }

            let coefficient = pearson(row_values, column_values);
            if !coefficient.is_finite() {
                return Err(AnalyticsError::CorrelationComputationFailure {
                    reason: format!(
                        "non-finite coefficient for '{row_name}' vs '{column_name}' \
                         (zero-variance window)"
                    ),
                });
            }

            pairs.push(CorrelationPair {
                index1: (*row_name).to_owned(),
                index2: (*column_name).to_owned(),
                correlation: round2(coefficient),
            });
        }
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use marketpulse_core::{SparseSeries, Symbol};

    use crate::normalize::normalize;

    use super::*;

    fn named(name: &str, closes: &[f64]) -> NamedSeries {
        let series = normalize(
            &Symbol::parse("TEST").expect("symbol"),
            &SparseSeries::dense(closes.iter().copied()),
        )
        .expect("normalize");
        NamedSeries::new(name, series)
    }

    #[test]
    fn emits_both_directions_without_self_pairs() {
        let pairs = correlate(&[
            named("A", &[1.0, 2.0, 3.0, 4.0]),
            named("B", &[2.0, 4.0, 6.0, 8.0]),
            named("C", &[4.0, 3.0, 2.0, 1.0]),
        ]);

        assert_eq!(pairs.len(), 6);
        assert!(pairs.iter().all(|pair| pair.index1 != pair.index2));

        let ab = pairs
            .iter()
            .find(|pair| pair.index1 == "A" && pair.index2 == "B")
            .expect("A-B pair");
        let ba = pairs
            .iter()
            .find(|pair| pair.index1 == "B" && pair.index2 == "A")
            .expect("B-A pair");
        assert_eq!(ab.correlation, 1.0);
        assert_eq!(ab.correlation, ba.correlation);

        let ac = pairs
            .iter()
            .find(|pair| pair.index1 == "A" && pair.index2 == "C")
            .expect("A-C pair");
        assert_eq!(ac.correlation, -1.0);
    }

    #[test]
    fn aligns_on_the_trailing_edge() {
        // The longer series keeps only its last 3 samples, which move with
        // the shorter one; its older head would have inverted the sign.
        let pairs = correlate(&[
            named("LONG", &[50.0, 40.0, 1.0, 2.0, 3.0]),
            named("SHORT", &[10.0, 20.0, 30.0]),
        ]);

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].correlation, 1.0);
    }

    #[test]
    fn empty_input_yields_empty_result() {
        assert!(correlate(&[]).is_empty());
    }

    #[test]
    fn single_series_yields_no_pairs() {
        let pairs = correlate(&[named("ONLY", &[1.0, 2.0, 3.0])]);
        assert!(pairs.is_empty());
    }

    #[test]
    fn zero_variance_window_degrades_to_empty() {
        let pairs = correlate(&[
            named("FLAT", &[5.0, 5.0, 5.0]),
            named("MOVING", &[1.0, 2.0, 3.0]),
        ]);
        assert!(pairs.is_empty());
    }
}
