//! Circular statistics for one altitude layer. Directions are averaged by
//! summing unit vectors so that bearings straddling north average correctly
//! (350 and 10 give 0, not 180).

use super::config::DirectionWeighting;
use super::types::VelocityVector;

/// Mean resultant lengths below this have no meaningful direction.
const RESULTANT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct BinStatistics {
    pub mean_speed: f64,
    pub mean_direction: Option<f64>,
    pub speed_std: f64,
    pub direction_dispersion: Option<f64>,
    pub sample_count: usize,
}

/// Reduce a layer's vectors to one speed/direction estimate. Mean speed is
/// the arithmetic mean of horizontal speeds; the direction is the circular
/// mean of the bearings, optionally speed-weighted. Vectors without a bearing
/// count towards the speed statistics only.
pub fn aggregate_bin(vectors: &[&VelocityVector], weighting: DirectionWeighting) -> BinStatistics {
    let sample_count = vectors.len();
    let mean_speed = if sample_count > 0 {
        vectors.iter().map(|v| v.horizontal_speed).sum::<f64>() / sample_count as f64
    } else {
        0.0
    };
    let speed_variance = if sample_count > 0 {
        vectors
            .iter()
            .map(|v| (v.horizontal_speed - mean_speed).powi(2))
            .sum::<f64>()
            / sample_count as f64
    } else {
        0.0
    };

    let mut east_sum = 0.0;
    let mut north_sum = 0.0;
    let mut weight_sum = 0.0;
    for vector in vectors {
        let Some(bearing) = vector.bearing else {
            continue;
        };
        let weight = match weighting {
            DirectionWeighting::SpeedWeighted => vector.horizontal_speed,
            DirectionWeighting::Unweighted => 1.0,
        };
        let theta = bearing.to_radians();
        east_sum += weight * theta.sin();
        north_sum += weight * theta.cos();
        weight_sum += weight;
    }

    let (mean_direction, direction_dispersion) = if weight_sum > 0.0 {
        // Mean resultant length, 1 when all bearings agree, 0 when they
        // cancel. Clamped against rounding above 1.
        let resultant = (east_sum.hypot(north_sum) / weight_sum).min(1.0);
        if resultant < RESULTANT_EPSILON {
            (None, None)
        } else {
            let direction = east_sum.atan2(north_sum).to_degrees().rem_euclid(360.0);
            let dispersion = (-2.0 * resultant.ln()).sqrt().to_degrees();
            (Some(direction), Some(dispersion))
        }
    } else {
        (None, None)
    };

    BinStatistics {
        mean_speed,
        mean_direction,
        speed_std: speed_variance.sqrt(),
        direction_dispersion,
        sample_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn vector(speed: f64, bearing: Option<f64>) -> VelocityVector {
        VelocityVector {
            horizontal_speed: speed,
            bearing,
            vertical_rate: 0.0,
            altitude: 1200.0,
            timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    fn aggregate(vectors: &[VelocityVector], weighting: DirectionWeighting) -> BinStatistics {
        let refs: Vec<&VelocityVector> = vectors.iter().collect();
        aggregate_bin(&refs, weighting)
    }

    #[test]
    fn directions_straddling_north_average_to_north() {
        let vectors = vec![vector(5.0, Some(350.0)), vector(5.0, Some(10.0))];
        for weighting in [DirectionWeighting::SpeedWeighted, DirectionWeighting::Unweighted] {
            let stats = aggregate(&vectors, weighting);
            let direction = stats.mean_direction.unwrap();
            let wrapped = if direction > 180.0 { direction - 360.0 } else { direction };
            assert!(wrapped.abs() < 1e-6, "got {direction}");
        }
    }

    #[test]
    fn mean_speed_is_arithmetic_not_resultant() {
        // Opposite directions cancel the resultant but not the scalar mean.
        let vectors = vec![vector(4.0, Some(0.0)), vector(6.0, Some(180.0))];
        let stats = aggregate(&vectors, DirectionWeighting::Unweighted);
        assert!((stats.mean_speed - 5.0).abs() < 1e-9);
        assert!((stats.speed_std - 1.0).abs() < 1e-9);
    }

    #[test]
    fn cancelling_directions_report_none() {
        let vectors = vec![vector(5.0, Some(0.0)), vector(5.0, Some(180.0))];
        let stats = aggregate(&vectors, DirectionWeighting::SpeedWeighted);
        assert!(stats.mean_direction.is_none());
        assert!(stats.direction_dispersion.is_none());
        assert_eq!(stats.sample_count, 2);
        assert!((stats.mean_speed - 5.0).abs() < 1e-9);
    }

    #[test]
    fn speed_weighting_pulls_towards_faster_vectors() {
        let vectors = vec![vector(9.0, Some(90.0)), vector(1.0, Some(0.0))];
        let weighted = aggregate(&vectors, DirectionWeighting::SpeedWeighted);
        let unweighted = aggregate(&vectors, DirectionWeighting::Unweighted);
        // Unweighted splits the difference at 45; weighting drags it east.
        assert!((unweighted.mean_direction.unwrap() - 45.0).abs() < 1e-6);
        assert!(weighted.mean_direction.unwrap() > 70.0);
    }

    #[test]
    fn bearingless_vectors_count_for_speed_only() {
        let vectors = vec![
            vector(0.0, None),
            vector(6.0, Some(90.0)),
            vector(6.0, Some(90.0)),
        ];
        let stats = aggregate(&vectors, DirectionWeighting::SpeedWeighted);
        assert_eq!(stats.sample_count, 3);
        assert!((stats.mean_speed - 4.0).abs() < 1e-9);
        assert!((stats.mean_direction.unwrap() - 90.0).abs() < 1e-6);
    }

    #[test]
    fn all_bearingless_has_no_direction() {
        let vectors = vec![vector(0.0, None), vector(0.0, None)];
        let stats = aggregate(&vectors, DirectionWeighting::Unweighted);
        assert!(stats.mean_direction.is_none());
        assert_eq!(stats.sample_count, 2);
    }

    #[test]
    fn agreeing_directions_have_zero_dispersion() {
        let vectors = vec![vector(5.0, Some(42.0)), vector(7.0, Some(42.0))];
        let stats = aggregate(&vectors, DirectionWeighting::SpeedWeighted);
        assert!((stats.mean_direction.unwrap() - 42.0).abs() < 1e-6);
        assert!(stats.direction_dispersion.unwrap() < 1e-6);
    }
}
