mod bins;
mod circular;
mod config;
mod error;
mod geo;
mod profile;
mod rose;
mod smoothing;
mod types;
mod vectors;

pub use bins::{bin_floor, bin_index, bin_midpoint};
pub use circular::{aggregate_bin, BinStatistics};
pub use config::{DirectionWeighting, WindConfig};
pub use error::WindError;
pub use geo::{haversine_distance_m, initial_bearing_deg, EARTH_RADIUS_M};
pub use profile::{compute_wind_profile, vertical_velocity_series};
pub use rose::{compute_wind_rose, RoseSector, WindRose, SPEED_CLASS_EDGES_M_S};
pub use smoothing::moving_average;
pub use types::{
    TrajectoryPoint, VelocityVector, VerticalVelocitySample, WindEstimate, WindProfile,
};
pub use vectors::derive_vectors;
