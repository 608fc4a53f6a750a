use std::path::PathBuf;

use crate::aggregate::timeseries::DEFAULT_MIN_YEAR;
use crate::fetch::FetchConfig;
use crate::ingest::parse::ParserMode;

/// Consolidated IRVE export on data.gouv.fr.
pub const DEFAULT_DATASET_URL: &str = "https://static.data.gouv.fr/resources/fichier-consolide-des-bornes-de-recharge-pour-vehicules-electriques/20231022-065434/consolidation-etalab-schema-irve-statique-v-2.2.0-20231021.csv";

/// Where the boundary reference dataset comes from. Deployments either
/// ship the GeoJSON next to the binary or point at a remote copy.
#[derive(Debug, Clone)]
pub enum BoundarySource {
    Path(PathBuf),
    Url(String),
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub dataset_url: String,
    pub boundary: BoundarySource,
    pub parser_mode: ParserMode,
    /// Lower bound for the commissioning time series.
    pub min_year: i32,
    pub fetch: FetchConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            boundary: BoundarySource::Path(PathBuf::from("departements.geojson")),
            parser_mode: ParserMode::Lenient,
            min_year: DEFAULT_MIN_YEAR,
            fetch: FetchConfig::default(),
        }
    }
}
