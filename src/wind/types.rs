use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One GPS fix for a tracked balloon. Latitude and longitude in degrees,
/// altitude in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl TrajectoryPoint {
    /// Boundary validation: coordinates inside geodesic range, everything
    /// finite. Invalid points are dropped before any vector math.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.altitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Horizontal and vertical motion derived from one consecutive point pair,
/// read as the wind at the segment's mean altitude.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VelocityVector {
    pub horizontal_speed: f64,
    /// Degrees clockwise from true north, [0, 360). None for an identical
    /// fix pair, where the bearing is undefined.
    pub bearing: Option<f64>,
    pub vertical_rate: f64,
    /// Mean of the two endpoint altitudes, meters.
    pub altitude: f64,
    /// Timestamp of the later endpoint.
    pub timestamp: DateTime<Utc>,
}

/// Aggregated wind for one altitude layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindEstimate {
    /// Lower edge of the half-open layer [floor, floor + width), meters.
    pub bin_floor: f64,
    pub bin_midpoint: f64,
    /// Arithmetic mean of horizontal speeds, m/s.
    pub mean_speed: f64,
    /// Circular mean bearing, [0, 360). None when the member directions
    /// cancel and no meaningful direction exists.
    pub mean_direction: Option<f64>,
    pub sample_count: usize,
    /// Population standard deviation of horizontal speed, m/s.
    pub speed_std: f64,
    /// Circular standard deviation of direction, degrees.
    pub direction_dispersion: Option<f64>,
}

/// The complete output of one profile computation, ordered by ascending
/// altitude.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct WindProfile {
    pub estimates: Vec<WindEstimate>,
}

impl WindProfile {
    pub fn is_empty(&self) -> bool {
        self.estimates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.estimates.len()
    }
}

/// One entry of the smoothed ascent/descent rate series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerticalVelocitySample {
    pub timestamp: DateTime<Utc>,
    pub altitude: f64,
    /// Trailing-window mean of the raw per-segment rate, m/s.
    pub vertical_rate: f64,
}
