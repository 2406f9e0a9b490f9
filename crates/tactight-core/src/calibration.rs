//! Force to spring-thickness calibration.
//!
//! A [`CalibrationTable`] holds measured `(force, thickness)` samples for one
//! strap geometry. [`estimate_parameter`] maps a measured force onto the
//! thickness the generator should use by piecewise-linear interpolation
//! between the two samples bracketing the force.

use crate::error::CalibrationError;

/// Forces (N) measured on the 4 mm strap prototypes.
const STRAP_4MM_FORCES: [f64; 5] = [4.92, 6.18, 7.61, 9.42, 10.40];

/// Spring thicknesses (mm) matching [`STRAP_4MM_FORCES`].
const STRAP_4MM_THICKNESSES: [f64; 5] = [3.0, 3.5, 4.0, 4.5, 5.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationPoint {
    pub force:     f64,
    pub thickness: f64,
}

impl CalibrationPoint {
    pub const fn new(force: f64, thickness: f64) -> Self { Self { force, thickness } }
}

/// Immutable calibration samples, strictly increasing in force.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationTable {
    points: Box<[CalibrationPoint]>,
}

impl CalibrationTable {
    /// Build a table from samples.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError::TooFewPoints`] for fewer than two samples and
    /// [`CalibrationError::NotFinite`] for a NaN or infinite sample, and
    /// [`CalibrationError::NotIncreasing`] when a force does not exceed the one
    /// before it.
    pub fn new(points: impl Into<Vec<CalibrationPoint>>) -> Result<Self, CalibrationError> {
        let points = points.into();
        if points.len() < 2 {
            return Err(CalibrationError::TooFewPoints { count: points.len() });
        }

        for (index, point) in points.iter().enumerate() {
            if !point.force.is_finite() || !point.thickness.is_finite() {
                return Err(CalibrationError::NotFinite { index });
            }
            if index > 0 && point.force <= points[index - 1].force {
                return Err(CalibrationError::NotIncreasing { index });
            }
        }

        Ok(Self {
            points: points.into_boxed_slice(),
        })
    }

    /// The calibration measured for the 4 mm strap.
    pub fn strap_4mm() -> Self {
        let points = STRAP_4MM_FORCES
            .iter()
            .zip(STRAP_4MM_THICKNESSES.iter())
            .map(|(&force, &thickness)| CalibrationPoint::new(force, thickness))
            .collect::<Vec<_>>();
        Self {
            points: points.into_boxed_slice(),
        }
    }

    pub fn points(&self) -> &[CalibrationPoint] { &self.points }

    /// Lowest and highest calibrated force, both inclusive.
    pub fn bounds(&self) -> (f64, f64) {
        (self.points[0].force, self.points[self.points.len() - 1].force)
    }

    /// Index `i` of the interval `[points[i], points[i + 1]]` containing `force`.
    ///
    /// Picks the same interval as scanning up from the low end while the next
    /// sample is still below `force`, so a force equal to an inner sample lands
    /// in the interval that ends on it.
    fn bracket(&self, force: f64) -> usize {
        let upper = self.points[1..].partition_point(|point| point.force < force);
        upper.min(self.points.len() - 2)
    }
}

impl Default for CalibrationTable {
    fn default() -> Self { Self::strap_4mm() }
}

/// Estimate the spring thickness for a measured force.
///
/// The result is rounded to hundredths of a millimetre.
///
/// # Examples
///
/// ```
/// use tactight_core::{CalibrationTable, estimate_parameter};
///
/// let table = CalibrationTable::strap_4mm();
/// assert_eq!(estimate_parameter(4.92, &table).unwrap(), 3.0);
/// assert_eq!(estimate_parameter(7.61, &table).unwrap(), 4.0);
/// assert!(estimate_parameter(11.0, &table).is_err());
/// ```
pub fn estimate_parameter(force: f64, table: &CalibrationTable) -> Result<f64, CalibrationError> {
    let (min, max) = table.bounds();
    // NaN fails both comparisons
    if !(force >= min && force <= max) {
        return Err(CalibrationError::OutOfRange { force, min, max });
    }

    let points = table.points();
    let last = points[points.len() - 1];
    if force == last.force {
        return Ok(last.thickness);
    }

    let i = table.bracket(force);
    let (lo, hi) = (points[i], points[i + 1]);
    let thickness = lo.thickness + (hi.thickness - lo.thickness) * (force - lo.force) / (hi.force - lo.force);

    Ok(round_to_hundredths(thickness))
}

/// Round to two decimal places, halves away from zero.
pub fn round_to_hundredths(value: f64) -> f64 { (value * 100.0).round() / 100.0 }
