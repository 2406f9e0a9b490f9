use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationError {
    #[error("force must be between {min:.2} N and {max:.2} N (got {force})")]
    OutOfRange { force: f64, min: f64, max: f64 },

    #[error("calibration table needs at least two points, got {count}")]
    TooFewPoints { count: usize },

    #[error("calibration forces must be strictly increasing (point {index})")]
    NotIncreasing { index: usize },

    #[error("calibration point {index} is not a finite number")]
    NotFinite { index: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("calculated thickness must be between {min} and {max} mm (got {thickness})")]
    ThicknessOutOfRange { thickness: f64, min: f64, max: f64 },

    #[error("strap width must be at least {min} mm (got {width})")]
    StrapTooNarrow { width: f64, min: f64 },

    #[error("{field} is not a finite number")]
    NotFinite { field: &'static str },

    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}

pub type Result<T, E = ValidationError> = std::result::Result<T, E>;
