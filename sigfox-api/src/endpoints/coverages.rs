//! Coverage endpoints.

use std::collections::BTreeMap;

use serde_json::json;
use sigfox_core::SigfoxResult;

use crate::client::{Params, Sigfox};
use crate::response::Payload;

/// Reception scenario for coverage queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CoverageMode {
    /// Device inside a building.
    #[default]
    Indoor,
    /// Device outside.
    Outdoor,
    /// Device below ground level.
    Underground,
}

impl CoverageMode {
    /// Wire value expected by the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageMode::Indoor => "INDOOR",
            CoverageMode::Outdoor => "OUTDOOR",
            CoverageMode::Underground => "UNDERGROUND",
        }
    }
}

impl Sigfox {
    /// Get the base-station redundancy at a location.
    pub fn coverage_redundancy(
        &self,
        lat: f64,
        lng: f64,
        mode: CoverageMode,
    ) -> SigfoxResult<Payload> {
        let mut params = BTreeMap::new();
        params.insert("lat".to_string(), json!(lat));
        params.insert("lng".to_string(), json!(lng));
        params.insert("mode".to_string(), json!(mode.as_str()));
        self.get("/coverages/redundancy", Params::Map(params))
    }

    /// Get the link-margin predictions at a location.
    pub fn coverage_predictions(&self, lat: f64, lng: f64) -> SigfoxResult<Payload> {
        let mut params = BTreeMap::new();
        params.insert("lat".to_string(), json!(lat));
        params.insert("lng".to_string(), json!(lng));
        self.get("/coverages/global/predictions", Params::Map(params))
    }
}
