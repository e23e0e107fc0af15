//! JSON persistence for marketpulse.
//!
//! Thin I/O wrappers around the analytics engine: load the acquisition
//! collaborator's raw JSON documents and write each derived artifact as a
//! standalone JSON file in one open-write-close sequence.

pub mod error;

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use marketpulse_analytics::AnalysisBundle;
use marketpulse_core::{CoreError, InsightRecord, InstrumentRecord, MarketSummary, SectorMap};

pub use error::StoreError;

pub const INDICES_ANALYSIS_FILE: &str = "indices_analysis.json";
pub const STOCKS_ANALYSIS_FILE: &str = "stocks_analysis.json";
pub const REGIONS_ANALYSIS_FILE: &str = "regions_analysis.json";
pub const CORRELATIONS_ANALYSIS_FILE: &str = "correlations_analysis.json";
pub const SECTORS_ANALYSIS_FILE: &str = "sectors_analysis.json";
pub const MARKET_SUMMARY_FILE: &str = "market_summary.json";

/// Load raw instrument records collected by the acquisition step.
pub fn load_instruments(path: &Path) -> Result<Vec<InstrumentRecord>, StoreError> {
    load_json(path)
}

/// Load optional analyst insight records.
pub fn load_insights(path: &Path) -> Result<Vec<InsightRecord>, StoreError> {
    load_json(path)
}

/// Load and validate the sector membership configuration.
pub fn load_sectors(path: &Path) -> Result<SectorMap, StoreError> {
    let raw = fs::read_to_string(path).map_err(|source| StoreError::read(path, source))?;
    SectorMap::from_json(&raw).map_err(|error| match error {
        CoreError::Serialization(source) => StoreError::parse(path, source),
        CoreError::Validation(source) => StoreError::InvalidConfig {
            path: path.display().to_string(),
            source,
        },
    })
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let raw = fs::read_to_string(path).map_err(|source| StoreError::read(path, source))?;
    serde_json::from_str(&raw).map_err(|source| StoreError::parse(path, source))
}

/// Writes and reads the analysis artifacts under one output directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write all six artifacts. Creates the output directory if needed; every
    /// artifact is always written, even when empty.
    pub fn write_bundle(&self, bundle: &AnalysisBundle, pretty: bool) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|source| StoreError::write(&self.root, source))?;

        self.write_json(INDICES_ANALYSIS_FILE, &bundle.indices, pretty)?;
        self.write_json(STOCKS_ANALYSIS_FILE, &bundle.equities, pretty)?;
        self.write_json(REGIONS_ANALYSIS_FILE, &bundle.regions, pretty)?;
        self.write_json(CORRELATIONS_ANALYSIS_FILE, &bundle.correlations, pretty)?;
        self.write_json(SECTORS_ANALYSIS_FILE, &bundle.sectors, pretty)?;
        self.write_json(MARKET_SUMMARY_FILE, &bundle.summary, pretty)?;

        Ok(())
    }

    /// Serialize one artifact and write it in a single open-write-close.
    pub fn write_json<T: Serialize>(
        &self,
        name: &str,
        value: &T,
        pretty: bool,
    ) -> Result<PathBuf, StoreError> {
        let path = self.root.join(name);
        let payload = if pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        fs::write(&path, payload).map_err(|source| StoreError::write(&path, source))?;
        debug!(path = %path.display(), "artifact written");
        Ok(path)
    }

    /// Read back a previously written market summary.
    pub fn read_summary(&self) -> Result<MarketSummary, StoreError> {
        load_json(&self.root.join(MARKET_SUMMARY_FILE))
    }
}
