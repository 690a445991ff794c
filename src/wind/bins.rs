use std::collections::BTreeMap;

use super::types::VelocityVector;

/// Index of the half-open layer [index * width, (index + 1) * width) that an
/// altitude falls in. Boundaries depend on the width alone, so repeated calls
/// bin identically no matter which altitudes are present.
pub fn bin_index(altitude_m: f64, bin_width_m: f64) -> i64 {
    (altitude_m / bin_width_m).floor() as i64
}

pub fn bin_floor(index: i64, bin_width_m: f64) -> f64 {
    index as f64 * bin_width_m
}

pub fn bin_midpoint(index: i64, bin_width_m: f64) -> f64 {
    (index as f64 + 0.5) * bin_width_m
}

/// Group vectors by altitude layer. The BTreeMap keeps layers in ascending
/// altitude order for the profile output.
pub fn group_by_bin(
    vectors: &[VelocityVector],
    bin_width_m: f64,
) -> BTreeMap<i64, Vec<&VelocityVector>> {
    let mut bins: BTreeMap<i64, Vec<&VelocityVector>> = BTreeMap::new();
    for vector in vectors {
        bins.entry(bin_index(vector.altitude, bin_width_m))
            .or_default()
            .push(vector);
    }
    bins
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn vector(altitude: f64) -> VelocityVector {
        VelocityVector {
            horizontal_speed: 1.0,
            bearing: Some(90.0),
            vertical_rate: 0.0,
            altitude,
            timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn altitude_1200_with_width_500_lands_in_1000_1500() {
        let index = bin_index(1200.0, 500.0);
        assert_eq!(index, 2);
        assert_eq!(bin_floor(index, 500.0), 1000.0);
        assert_eq!(bin_midpoint(index, 500.0), 1250.0);
    }

    #[test]
    fn boundaries_are_half_open() {
        assert_eq!(bin_index(999.999, 500.0), 1);
        assert_eq!(bin_index(1000.0, 500.0), 2);
        assert_eq!(bin_index(1499.999, 500.0), 2);
        assert_eq!(bin_index(1500.0, 500.0), 3);
    }

    #[test]
    fn negative_altitudes_floor_downwards() {
        assert_eq!(bin_index(-1.0, 500.0), -1);
        assert_eq!(bin_floor(-1, 500.0), -500.0);
    }

    #[test]
    fn boundaries_do_not_depend_on_observed_range() {
        let alone_vectors = [vector(1200.0)];
        let alone = group_by_bin(&alone_vectors, 500.0);
        let crowded_vectors = [vector(1200.0), vector(200.0), vector(9800.0)];
        let crowded = group_by_bin(&crowded_vectors, 500.0);
        assert!(alone.contains_key(&2));
        assert!(crowded.contains_key(&2));
        assert_eq!(alone[&2].len(), 1);
        assert_eq!(crowded[&2].len(), 1);
    }

    #[test]
    fn groups_are_altitude_ordered() {
        let vectors = [vector(9800.0), vector(200.0), vector(1200.0)];
        let bins = group_by_bin(&vectors, 500.0);
        let indices: Vec<i64> = bins.keys().copied().collect();
        assert_eq!(indices, vec![0, 2, 19]);
    }
}
