use thiserror::Error;

#[derive(Debug, Error)]
pub enum WindError {
    #[error("bin width must be a positive finite number of meters, got {0}")]
    InvalidBinWidth(f64),
    #[error("minimum samples per bin must be at least 1")]
    InvalidMinSamples,
    #[error("smoothing window must be at least 1")]
    InvalidSmoothingWindow,
    #[error("elapsed-time bounds must satisfy 0 < min < max, got min {min} s, max {max} s")]
    InvalidElapsedBounds { min: f64, max: f64 },
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
}
