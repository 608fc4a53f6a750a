//! Cumulative count of stations commissioned per year.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::normalize::Station;

/// The dashboard charts network growth from 2015 onwards; earlier records
/// are excluded entirely, not zero-filled.
pub const DEFAULT_MIN_YEAR: i32 = 2015;

/// Running total of stations commissioned up to and including `year`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearlyCumulative {
    pub year: i32,
    pub cumulative: u64,
}

/// Filter to `year >= min_year`, count per year, then accumulate in
/// ascending year order. Stations with a null year are filtered out, not
/// errors. No record past the threshold means an empty series.
pub fn cumulative_by_year(stations: &[Station], min_year: i32) -> Vec<YearlyCumulative> {
    let mut per_year: BTreeMap<i32, u64> = BTreeMap::new();
    for station in stations {
        if let Some(year) = station.year {
            if year >= min_year {
                *per_year.entry(year).or_default() += 1;
            }
        }
    }

    let mut total = 0u64;
    per_year
        .into_iter()
        .map(|(year, count)| {
            total += count;
            YearlyCumulative {
                year,
                cumulative: total,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(year: Option<i32>) -> Station {
        Station {
            install_date: None,
            year,
            region: "75".to_string(),
            free_access: false,
            connectors: [None; 4],
        }
    }

    #[test]
    fn pre_threshold_records_are_dropped_not_zero_filled() {
        let stations = vec![station(Some(2014)), station(Some(2016))];
        let series = cumulative_by_year(&stations, DEFAULT_MIN_YEAR);
        assert_eq!(
            series,
            vec![YearlyCumulative {
                year: 2016,
                cumulative: 1
            }]
        );
    }

    #[test]
    fn accumulates_in_ascending_year_order() {
        let stations = vec![
            station(Some(2018)),
            station(Some(2015)),
            station(Some(2015)),
            station(None),
            station(Some(2016)),
        ];
        let series = cumulative_by_year(&stations, DEFAULT_MIN_YEAR);
        let years: Vec<i32> = series.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2015, 2016, 2018]);
        let totals: Vec<u64> = series.iter().map(|p| p.cumulative).collect();
        assert_eq!(totals, vec![2, 3, 4]);
    }

    #[test]
    fn cumulative_counts_never_decrease() {
        let stations: Vec<Station> = (0..50)
            .map(|i| station(Some(2015 + (i * 7) % 9)))
            .collect();
        let series = cumulative_by_year(&stations, DEFAULT_MIN_YEAR);
        for pair in series.windows(2) {
            assert!(pair[0].year < pair[1].year);
            assert!(pair[0].cumulative <= pair[1].cumulative);
        }
    }

    #[test]
    fn nothing_past_the_threshold_is_an_empty_series() {
        let stations = vec![station(Some(2012)), station(None)];
        assert!(cumulative_by_year(&stations, DEFAULT_MIN_YEAR).is_empty());
    }
}
