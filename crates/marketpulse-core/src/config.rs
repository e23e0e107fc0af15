use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{CoreError, Symbol, ValidationError};

/// Static sector membership table: sector name to member symbols.
///
/// Loaded from configuration rather than derived from market data, so tests
/// can supply synthetic tables. Ordered maps keep the sector artifact
/// byte-stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectorMap(BTreeMap<String, BTreeSet<Symbol>>);

impl SectorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `{"sector": ["SYM", ...]}` JSON document.
    pub fn from_json(input: &str) -> Result<Self, CoreError> {
        let map: Self = serde_json::from_str(input)?;
        map.validate()?;
        Ok(map)
    }

    pub fn insert(
        &mut self,
        sector: impl Into<String>,
        symbols: impl IntoIterator<Item = Symbol>,
    ) {
        self.0.insert(sector.into(), symbols.into_iter().collect());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<Symbol>)> {
        self.0.iter().map(|(sector, symbols)| (sector.as_str(), symbols))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn validate(&self) -> Result<(), ValidationError> {
        for (sector, symbols) in &self.0 {
            if sector.trim().is_empty() {
                return Err(ValidationError::EmptySectorName);
            }
            if symbols.is_empty() {
                return Err(ValidationError::EmptySectorMembers {
                    sector: sector.clone(),
                });
            }
        }
        Ok(())
    }
}
