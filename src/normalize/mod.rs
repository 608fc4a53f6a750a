//! Field normalization: raw table rows into typed `Station` records.
//!
//! Every operation here is per-record and non-fatal: a date that will not
//! parse or a postal code too short for a region prefix degrades that one
//! record and increments a warning counter, it never fails the run. Only a
//! required column missing from the header is fatal.

pub mod date;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::warn;

use crate::error::PipelineError;
use crate::ingest::Table;

/// Column names of the consolidated IRVE schema this core consumes.
pub const DATE_COLUMN: &str = "date_mise_en_service";
pub const POSTAL_COLUMN: &str = "consolidated_code_postal";
pub const FREE_COLUMN: &str = "gratuit";

/// Bucket for postal codes too short to yield a two-character prefix. It
/// matches no boundary region, so these stations drop out of the spatial
/// view while still counting everywhere else.
pub const UNKNOWN_REGION: &str = "unknown";

/// Connector types tallied by the dashboard, in canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConnectorType {
    TypeEf,
    Type2,
    ComboCcs,
    Chademo,
}

impl ConnectorType {
    pub const ALL: [ConnectorType; 4] = [
        ConnectorType::TypeEf,
        ConnectorType::Type2,
        ConnectorType::ComboCcs,
        ConnectorType::Chademo,
    ];

    /// Source column carrying this connector's flag.
    pub fn column(self) -> &'static str {
        match self {
            ConnectorType::TypeEf => "prise_type_ef",
            ConnectorType::Type2 => "prise_type_2",
            ConnectorType::ComboCcs => "prise_type_combo_ccs",
            ConnectorType::Chademo => "prise_type_chademo",
        }
    }

    /// Human label for chart axes.
    pub fn label(self) -> &'static str {
        match self {
            ConnectorType::TypeEf => "Type EF",
            ConnectorType::Type2 => "Type 2",
            ConnectorType::ComboCcs => "Combo CCS",
            ConnectorType::Chademo => "CHAdeMO",
        }
    }
}

/// What to substitute when a boolean cell is empty or unrecognized.
///
/// The free-access flag defaults to `false` while the connector flags stay
/// unknown. The asymmetry is deliberate: the free/paid split needs a total
/// that covers every station, whereas the connector tally must not count
/// missing data as either value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPolicy {
    DefaultFalse,
    KeepUnknown,
}

/// Case-insensitive "true"/"false" coercion with a per-field missing-value
/// policy.
pub fn coerce_bool(raw: Option<&str>, policy: MissingPolicy) -> Option<bool> {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => match policy {
            MissingPolicy::DefaultFalse => Some(false),
            MissingPolicy::KeepUnknown => None,
        },
    }
}

/// First two characters of the postal code, or the unknown bucket when the
/// code is null or shorter than two characters.
pub fn derive_region(postal: Option<&str>) -> String {
    match postal {
        Some(code) if code.chars().count() >= 2 => code.chars().take(2).collect(),
        _ => UNKNOWN_REGION.to_string(),
    }
}

/// One charging-station observation after normalization. Immutable.
#[derive(Debug, Clone)]
pub struct Station {
    pub install_date: Option<NaiveDate>,
    /// Commissioning year; `None` exactly when the date is null.
    pub year: Option<i32>,
    /// Two-character postal prefix, the join key into the boundary set.
    pub region: String,
    pub free_access: bool,
    /// Tri-state connector flags, indexed like `ConnectorType::ALL`.
    pub connectors: [Option<bool>; 4],
}

/// The normalized table plus counters for the records that degraded.
#[derive(Debug)]
pub struct NormalizedTable {
    pub stations: Vec<Station>,
    pub date_warnings: usize,
    pub region_warnings: usize,
}

pub fn normalize(table: &Table) -> Result<NormalizedTable, PipelineError> {
    let date_col = require(table, DATE_COLUMN)?;
    let postal_col = require(table, POSTAL_COLUMN)?;
    let free_col = require(table, FREE_COLUMN)?;
    let mut connector_cols = [0usize; 4];
    for (i, ct) in ConnectorType::ALL.iter().enumerate() {
        connector_cols[i] = require(table, ct.column())?;
    }

    let mut stations = Vec::with_capacity(table.len());
    let mut date_warnings = 0;
    let mut region_warnings = 0;

    for row in 0..table.len() {
        let raw_date = table.cell(row, date_col);
        let install_date = raw_date.and_then(date::parse_install_date);
        if let (Some(raw), None) = (raw_date, install_date) {
            warn!(row, value = raw, "unparsable commissioning date, keeping record with null date");
            date_warnings += 1;
        }
        let year = install_date.map(|d| d.year());

        let postal = table.cell(row, postal_col);
        let region = derive_region(postal);
        if region == UNKNOWN_REGION {
            warn!(row, postal = postal.unwrap_or(""), "postal code without a region prefix");
            region_warnings += 1;
        }

        let free_access =
            coerce_bool(table.cell(row, free_col), MissingPolicy::DefaultFalse).unwrap_or(false);

        let mut connectors = [None; 4];
        for (i, col) in connector_cols.iter().enumerate() {
            connectors[i] = coerce_bool(table.cell(row, *col), MissingPolicy::KeepUnknown);
        }

        stations.push(Station {
            install_date,
            year,
            region,
            free_access,
            connectors,
        });
    }

    Ok(NormalizedTable {
        stations,
        date_warnings,
        region_warnings,
    })
}

fn require(table: &Table, name: &str) -> Result<usize, PipelineError> {
    table
        .column(name)
        .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))
}
