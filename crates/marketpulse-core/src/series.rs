use serde::{Deserialize, Serialize};

/// Daily close-price sequence in which missing samples are explicit.
///
/// The market-data API reports a null close for days an exchange was open but
/// no trade settled; absence is never coerced to zero. Samples are in
/// chronological order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SparseSeries(Vec<Option<f64>>);

impl SparseSeries {
    pub fn new(samples: Vec<Option<f64>>) -> Self {
        Self(samples)
    }

    /// Build a series with every sample present.
    pub fn dense(samples: impl IntoIterator<Item = f64>) -> Self {
        Self(samples.into_iter().map(Some).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when no sample is missing.
    pub fn is_dense(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    pub fn as_slice(&self) -> &[Option<f64>] {
        &self.0
    }

    /// First present value, scanning from the start.
    pub fn first_valid(&self) -> Option<f64> {
        self.0.iter().flatten().copied().next()
    }

    /// Last present value, scanning from the end.
    pub fn last_valid(&self) -> Option<f64> {
        self.0.iter().rev().flatten().copied().next()
    }

    /// All present values in order, with missing samples stripped.
    pub fn valid_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().flatten().copied()
    }

    /// Consecutive (previous, current) pairs where both samples are present.
    ///
    /// A pair straddling a missing sample is not emitted.
    pub fn adjacent_valid_pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.0.windows(2).filter_map(|window| match window {
            [Some(prev), Some(current)] => Some((*prev, *current)),
            _ => None,
        })
    }
}

impl From<Vec<Option<f64>>> for SparseSeries {
    fn from(samples: Vec<Option<f64>>) -> Self {
        Self::new(samples)
    }
}
