//! Département boundary reference dataset.
//!
//! The presentation layer draws the polygons; this core only needs the
//! join key (`code`) and display name of each feature, so the GeoJSON
//! geometry is parsed past and not retained.

use std::path::Path;

use serde::Deserialize;

use crate::error::PipelineError;

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Properties {
    code: String,
    nom: String,
}

/// One boundary region (a French département).
#[derive(Debug, Clone)]
pub struct BoundaryRegion {
    /// Two-character code matching postal-code prefixes.
    pub code: String,
    pub name: String,
}

/// The boundary dataset, in file order. That order is what the regional
/// aggregate preserves, which keeps re-runs deterministic.
#[derive(Debug, Clone)]
pub struct BoundarySet {
    pub regions: Vec<BoundaryRegion>,
}

impl BoundarySet {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, PipelineError> {
        let collection: FeatureCollection =
            serde_json::from_slice(bytes).map_err(|e| PipelineError::Boundary(e.to_string()))?;
        Ok(Self {
            regions: collection
                .features
                .into_iter()
                .map(|f| BoundaryRegion {
                    code: f.properties.code,
                    name: f.properties.nom,
                })
                .collect(),
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| PipelineError::Boundary(format!("{}: {}", path.display(), e)))?;
        Self::from_slice(&bytes)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
