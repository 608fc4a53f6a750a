//! Per-connector-type tally of `true` flags.

use serde::Serialize;

use crate::normalize::{ConnectorType, Station};

/// Count of stations carrying a given connector. Only an explicit `true`
/// counts; `false` and unknown both stay out, so missing data never
/// inflates a bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectorCount {
    pub connector: ConnectorType,
    pub label: &'static str,
    pub count: u64,
}

/// One entry per connector type, in the canonical `ConnectorType::ALL`
/// order.
pub fn connector_tally(stations: &[Station]) -> Vec<ConnectorCount> {
    ConnectorType::ALL
        .iter()
        .enumerate()
        .map(|(i, &connector)| ConnectorCount {
            connector,
            label: connector.label(),
            count: stations
                .iter()
                .filter(|s| s.connectors[i] == Some(true))
                .count() as u64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(connectors: [Option<bool>; 4]) -> Station {
        Station {
            install_date: None,
            year: None,
            region: "75".to_string(),
            free_access: false,
            connectors,
        }
    }

    #[test]
    fn only_explicit_true_is_counted() {
        // One connector type across three stations: true, false, unknown.
        let stations = vec![
            station([Some(true), None, None, None]),
            station([Some(false), None, None, None]),
            station([None, None, None, None]),
        ];
        let tally = connector_tally(&stations);
        assert_eq!(tally[0].count, 1);
    }

    #[test]
    fn output_follows_the_canonical_connector_order() {
        let tally = connector_tally(&[]);
        let labels: Vec<&str> = tally.iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!["Type EF", "Type 2", "Combo CCS", "CHAdeMO"]);
        assert!(tally.iter().all(|c| c.count == 0));
    }

    #[test]
    fn counts_are_bounded_by_the_station_count() {
        let stations = vec![
            station([Some(true), Some(true), Some(true), Some(true)]),
            station([Some(true), None, Some(false), Some(true)]),
        ];
        let tally = connector_tally(&stations);
        for entry in &tally {
            assert!(entry.count <= stations.len() as u64);
        }
        assert_eq!(tally[0].count, 2);
        assert_eq!(tally[1].count, 1);
        assert_eq!(tally[2].count, 1);
        assert_eq!(tally[3].count, 2);
    }
}
