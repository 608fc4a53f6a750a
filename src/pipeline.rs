//! One full ingestion run: fetch, decode, parse, normalize, and the
//! fan-out into the four aggregates.

use serde::Serialize;
use tracing::{info, instrument};

use crate::aggregate::regional::{self, RegionCount};
use crate::aggregate::split::{self, FreePaidSplit};
use crate::aggregate::tally::{self, ConnectorCount};
use crate::aggregate::timeseries::{self, YearlyCumulative};
use crate::boundary::BoundarySet;
use crate::config::{BoundarySource, PipelineConfig};
use crate::error::PipelineError;
use crate::fetch::Fetcher;
use crate::ingest::{encoding, parse};
use crate::normalize;

/// The four chart-ready summaries of one pipeline run. Produced fresh each
/// run; either all four exist or the run failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub time_series: Vec<YearlyCumulative>,
    pub regions: Vec<RegionCount>,
    pub free_paid: FreePaidSplit,
    pub connectors: Vec<ConnectorCount>,
}

pub struct Pipeline {
    fetcher: Fetcher,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        let fetcher = Fetcher::new(&config.fetch)?;
        Ok(Self { fetcher, config })
    }

    /// Run the whole pipeline once, sequentially and fail-fast: the first
    /// hard error aborts with no summaries produced.
    #[instrument(level = "info", skip(self), fields(url = %self.config.dataset_url))]
    pub async fn run(&self) -> Result<ChartData, PipelineError> {
        let payload = self.fetcher.fetch(&self.config.dataset_url).await?;
        let boundaries = self.load_boundaries().await?;
        self.summarize(&payload, &boundaries)
    }

    async fn load_boundaries(&self) -> Result<BoundarySet, PipelineError> {
        match &self.config.boundary {
            BoundarySource::Path(path) => BoundarySet::from_path(path),
            BoundarySource::Url(url) => {
                let bytes = self.fetcher.fetch(url).await?;
                BoundarySet::from_slice(&bytes)
            }
        }
    }

    /// The fetch-free core: raw payload bytes plus a boundary set in, four
    /// summaries out. Deterministic for identical input.
    pub fn summarize(
        &self,
        payload: &[u8],
        boundaries: &BoundarySet,
    ) -> Result<ChartData, PipelineError> {
        let (text, sniff) = encoding::decode(payload)?;
        info!(
            encoding = sniff.encoding.name(),
            confidence = sniff.confidence,
            "encoding resolved"
        );

        let table = parse::parse_table(&text, self.config.parser_mode)?;
        info!(rows = table.len(), columns = table.headers.len(), "table parsed");

        let normalized = normalize::normalize(&table)?;
        if normalized.date_warnings > 0 || normalized.region_warnings > 0 {
            info!(
                date_warnings = normalized.date_warnings,
                region_warnings = normalized.region_warnings,
                "records kept with degraded fields"
            );
        }

        let stations = &normalized.stations;
        Ok(ChartData {
            time_series: timeseries::cumulative_by_year(stations, self.config.min_year),
            regions: regional::join_boundaries(boundaries, &regional::counts_by_region(stations)),
            free_paid: split::free_paid_split(stations),
            connectors: tally::connector_tally(stations),
        })
    }

    /// The fetcher, exposing the cache for explicit invalidation.
    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }
}
