//! Free vs. paid station split.

use serde::Serialize;

use crate::normalize::Station;

/// Exactly two buckets. The free-access flag was already defaulted to
/// `false` during normalization, so `free + paid` always equals the total
/// record count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FreePaidSplit {
    pub free: u64,
    pub paid: u64,
}

impl FreePaidSplit {
    pub fn total(&self) -> u64 {
        self.free + self.paid
    }
}

pub fn free_paid_split(stations: &[Station]) -> FreePaidSplit {
    let free = stations.iter().filter(|s| s.free_access).count() as u64;
    FreePaidSplit {
        free,
        paid: stations.len() as u64 - free,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{coerce_bool, MissingPolicy};

    fn station(free_access: bool) -> Station {
        Station {
            install_date: None,
            year: None,
            region: "75".to_string(),
            free_access,
            connectors: [None; 4],
        }
    }

    #[test]
    fn empty_and_unrecognized_values_count_as_paid() {
        let stations: Vec<Station> = ["TRUE", "false", "", "xyz"]
            .into_iter()
            .map(|raw| {
                station(coerce_bool(Some(raw), MissingPolicy::DefaultFalse).unwrap_or(false))
            })
            .collect();

        let split = free_paid_split(&stations);
        assert_eq!(split.free, 1);
        assert_eq!(split.paid, 3);
    }

    #[test]
    fn buckets_always_sum_to_the_total() {
        let stations: Vec<Station> = (0..37).map(|i| station(i % 3 == 0)).collect();
        let split = free_paid_split(&stations);
        assert_eq!(split.total(), 37);
    }

    #[test]
    fn empty_input_is_two_empty_buckets() {
        let split = free_paid_split(&[]);
        assert_eq!(split, FreePaidSplit { free: 0, paid: 0 });
    }
}
