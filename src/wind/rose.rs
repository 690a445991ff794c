//! Wind-rose aggregation: directed vectors counted into 16 compass sectors
//! and fixed speed classes, optionally restricted to an altitude range.

use serde::Serialize;

use super::config::WindConfig;
use super::error::WindError;
use super::profile::collect_valid;
use super::types::TrajectoryPoint;
use super::vectors::derive_vectors;

const SECTOR_COUNT: usize = 16;
const SECTOR_WIDTH_DEG: f64 = 360.0 / SECTOR_COUNT as f64;

/// Speed class edges in m/s; class i covers [edge[i], edge[i+1]).
pub const SPEED_CLASS_EDGES_M_S: [f64; 9] = [0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 50.0, 100.0];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoseSector {
    /// Sector interval [from, to) in degrees.
    pub from_deg: f64,
    pub to_deg: f64,
    /// One count per speed class, indexed as in `SPEED_CLASS_EDGES_M_S`.
    pub counts: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct WindRose {
    pub sectors: Vec<RoseSector>,
    /// Directed vectors that fell inside the altitude range, whether or not
    /// their speed landed in a class.
    pub total_vectors: usize,
}

/// Count directed velocity vectors into compass sectors and speed classes.
/// The altitude range is half-open: a vector is included when
/// `min <= altitude < max` for whichever bounds are given. Vectors at or
/// above the top speed edge are tallied in `total_vectors` only.
pub fn compute_wind_rose(
    points: &[TrajectoryPoint],
    config: &WindConfig,
    min_altitude_m: Option<f64>,
    max_altitude_m: Option<f64>,
) -> Result<WindRose, WindError> {
    config.validate()?;

    let mut sectors: Vec<RoseSector> = (0..SECTOR_COUNT)
        .map(|i| RoseSector {
            from_deg: i as f64 * SECTOR_WIDTH_DEG,
            to_deg: (i + 1) as f64 * SECTOR_WIDTH_DEG,
            counts: vec![0; SPEED_CLASS_EDGES_M_S.len() - 1],
        })
        .collect();

    let valid = collect_valid(points);
    let mut total_vectors = 0;
    for vector in derive_vectors(&valid, config) {
        if min_altitude_m.is_some_and(|min| vector.altitude < min)
            || max_altitude_m.is_some_and(|max| vector.altitude >= max)
        {
            continue;
        }
        let Some(bearing) = vector.bearing else {
            continue;
        };
        total_vectors += 1;

        let sector = ((bearing / SECTOR_WIDTH_DEG) as usize).min(SECTOR_COUNT - 1);
        if let Some(class) = speed_class(vector.horizontal_speed) {
            sectors[sector].counts[class] += 1;
        }
    }

    Ok(WindRose {
        sectors,
        total_vectors,
    })
}

fn speed_class(speed: f64) -> Option<usize> {
    SPEED_CLASS_EDGES_M_S
        .windows(2)
        .position(|edge| edge[0] <= speed && speed < edge[1])
}
