//! Calibration and request model for TacTight strap generation.
//!
//! # Architecture
//!
//! - `calibration.rs` - Force to spring-thickness interpolation
//! - `request.rs` - Validated generation parameters and filename rules
//! - `artifact.rs` - Generated artifact and the session-owned slot
//! - `error.rs` - Calibration and validation errors
//!
//! Everything here is pure: no I/O, no clocks, no globals.

pub use artifact::{GeneratedArtifact, Session};
pub use calibration::{CalibrationPoint, CalibrationTable, estimate_parameter, round_to_hundredths};
pub use error::{CalibrationError, ValidationError};
pub use request::{
    GenerationRequest, MAX_THICKNESS_MM, MIN_STRAP_WIDTH_MM, MIN_THICKNESS_MM, is_well_formed_filename,
    synthesize_filename,
};

mod artifact;
mod calibration;
mod error;
mod request;
