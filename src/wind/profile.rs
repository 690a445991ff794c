use super::bins::{bin_floor, bin_midpoint, group_by_bin};
use super::circular::aggregate_bin;
use super::config::WindConfig;
use super::error::WindError;
use super::smoothing::moving_average;
use super::types::{TrajectoryPoint, VerticalVelocitySample, WindEstimate, WindProfile};
use super::vectors::derive_vectors;

/// Build the per-layer wind profile for one track. Pure and deterministic:
/// identical points and config give identical output, and the input is never
/// retained or mutated. Fewer than 2 valid points yield an empty profile.
pub fn compute_wind_profile(
    points: &[TrajectoryPoint],
    config: &WindConfig,
) -> Result<WindProfile, WindError> {
    config.validate()?;

    let valid = collect_valid(points);
    if valid.len() < 2 {
        return Ok(WindProfile::default());
    }

    let vectors = derive_vectors(&valid, config);
    let mut estimates = Vec::new();
    for (index, members) in group_by_bin(&vectors, config.bin_width_m) {
        if members.len() < config.min_samples_per_bin {
            continue;
        }
        let stats = aggregate_bin(&members, config.weighting);
        estimates.push(WindEstimate {
            bin_floor: bin_floor(index, config.bin_width_m),
            bin_midpoint: bin_midpoint(index, config.bin_width_m),
            mean_speed: stats.mean_speed,
            mean_direction: stats.mean_direction,
            sample_count: stats.sample_count,
            speed_std: stats.speed_std,
            direction_dispersion: stats.direction_dispersion,
        });
    }

    Ok(WindProfile { estimates })
}

/// Ascent/descent rate over the track, smoothed with the configured trailing
/// window. One entry per accepted point pair, stamped at the later endpoint.
pub fn vertical_velocity_series(
    points: &[TrajectoryPoint],
    config: &WindConfig,
) -> Result<Vec<VerticalVelocitySample>, WindError> {
    config.validate()?;

    let valid = collect_valid(points);
    if valid.len() < 2 {
        return Ok(Vec::new());
    }

    let vectors = derive_vectors(&valid, config);
    let raw_rates: Vec<f64> = vectors.iter().map(|v| v.vertical_rate).collect();
    let smoothed = moving_average(&raw_rates, config.smoothing_window);

    Ok(vectors
        .iter()
        .zip(smoothed)
        .map(|(vector, vertical_rate)| VerticalVelocitySample {
            timestamp: vector.timestamp,
            altitude: vector.altitude,
            vertical_rate,
        })
        .collect())
}

/// Drop invalid samples and time-order the rest. Sorting keeps the pipeline
/// deterministic even for callers that append out of order; the sort is
/// stable so equal timestamps keep their input order (the pair is then
/// skipped as degenerate anyway).
pub(crate) fn collect_valid(points: &[TrajectoryPoint]) -> Vec<TrajectoryPoint> {
    let mut valid: Vec<TrajectoryPoint> =
        points.iter().filter(|p| p.is_valid()).cloned().collect();
    let dropped = points.len() - valid.len();
    if dropped > 0 {
        log::debug!("dropped {dropped} invalid trajectory samples");
    }
    valid.sort_by_key(|p| p.timestamp);
    valid
}
