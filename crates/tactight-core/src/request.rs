use crate::calibration::{CalibrationTable, estimate_parameter};
use crate::error::{Result, ValidationError};

pub const MIN_THICKNESS_MM: f64 = 3.0;
pub const MAX_THICKNESS_MM: f64 = 5.0;
pub const MIN_STRAP_WIDTH_MM: f64 = 26.0;

const FILENAME_PREFIX: &str = "TacTight";
const FILENAME_EXTENSION: &str = "stl";

/// Parameters sent to the generation service.
///
/// Construction does not validate; [`GenerationRequest::validate`] is called
/// before anything goes on the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationRequest {
    pub thickness:    f64,
    pub strap_width:  f64,
    /// Measured force the thickness was estimated from, if any.
    pub source_force: Option<f64>,
}

impl GenerationRequest {
    pub fn new(thickness: f64, strap_width: f64) -> Self {
        Self {
            thickness,
            strap_width,
            source_force: None,
        }
    }

    /// Estimate the thickness for `force` and build a validated request.
    pub fn from_force(force: f64, strap_width: f64, table: &CalibrationTable) -> Result<Self> {
        let thickness = estimate_parameter(force, table)?;
        let request = Self {
            thickness,
            strap_width,
            source_force: Some(force),
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.thickness.is_finite() {
            return Err(ValidationError::NotFinite { field: "thickness" });
        }
        if !self.strap_width.is_finite() {
            return Err(ValidationError::NotFinite { field: "strap width" });
        }
        if self.thickness < MIN_THICKNESS_MM || self.thickness > MAX_THICKNESS_MM {
            return Err(ValidationError::ThicknessOutOfRange {
                thickness: self.thickness,
                min:       MIN_THICKNESS_MM,
                max:       MAX_THICKNESS_MM,
            });
        }
        if self.strap_width < MIN_STRAP_WIDTH_MM {
            return Err(ValidationError::StrapTooNarrow {
                width: self.strap_width,
                min:   MIN_STRAP_WIDTH_MM,
            });
        }
        Ok(())
    }

    /// Filename used when the service does not suggest one.
    pub fn synthesized_filename(&self) -> String {
        synthesize_filename(self.source_force, self.thickness, self.strap_width)
    }
}

/// Deterministic artifact name, e.g. `TacTight_f7.2N_t3.88mm_w30mm.stl`.
pub fn synthesize_filename(force: Option<f64>, thickness: f64, strap_width: f64) -> String {
    match force {
        Some(force) => format!("{FILENAME_PREFIX}_f{force}N_t{thickness}mm_w{strap_width}mm.{FILENAME_EXTENSION}"),
        None => format!("{FILENAME_PREFIX}_t{thickness}mm_w{strap_width}mm.{FILENAME_EXTENSION}"),
    }
}

/// A bare file name: non-blank, no separators or NUL, not a dot entry.
pub fn is_well_formed_filename(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty()
        && trimmed != "."
        && trimmed != ".."
        && !trimmed.contains(['/', '\\', '\0'])
        && !trimmed.chars().any(char::is_control)
}
