use super::config::WindConfig;
use super::geo::{haversine_distance_m, initial_bearing_deg};
use super::types::{TrajectoryPoint, VelocityVector};

/// Turn consecutive point pairs into velocity vectors. Pairs whose elapsed
/// time falls outside the configured bounds are skipped without error, which
/// also covers out-of-order and duplicate timestamps. Callers are expected to
/// have validated and time-ordered the points already.
pub fn derive_vectors(points: &[TrajectoryPoint], config: &WindConfig) -> Vec<VelocityVector> {
    let mut vectors = Vec::new();

    for pair in points.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        let elapsed_s = (curr.timestamp - prev.timestamp).num_milliseconds() as f64 / 1000.0;
        if elapsed_s < config.min_elapsed_s || elapsed_s > config.max_elapsed_s {
            continue;
        }

        let distance_m = haversine_distance_m(
            prev.latitude,
            prev.longitude,
            curr.latitude,
            curr.longitude,
        );
        // An identical fix has no defined bearing; the vector still carries
        // its speed and vertical rate.
        let bearing = if distance_m > 0.0 {
            Some(initial_bearing_deg(
                prev.latitude,
                prev.longitude,
                curr.latitude,
                curr.longitude,
            ))
        } else {
            None
        };

        vectors.push(VelocityVector {
            horizontal_speed: distance_m / elapsed_s,
            bearing,
            vertical_rate: (curr.altitude - prev.altitude) / elapsed_s,
            altitude: (prev.altitude + curr.altitude) / 2.0,
            timestamp: curr.timestamp,
        });
    }

    vectors
}
