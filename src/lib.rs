pub mod wind;

pub use wind::{
    compute_wind_profile, compute_wind_rose, vertical_velocity_series, DirectionWeighting,
    TrajectoryPoint, WindConfig, WindError, WindProfile,
};
