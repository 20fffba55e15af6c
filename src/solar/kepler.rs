//! Newton-Raphson inversion of Kepler's equation for elliptical orbits.

use crate::error::SolarError;

/// Residual tolerance, scaled by `max(1, |M|)`.
const TOLERANCE: f64 = 1.0e-12;

/// Maximum Newton steps before giving up.
const MAX_ITERATIONS: usize = 50;

/// Solve `M = E − e·sin E` for the eccentric anomaly `E` (radians).
///
/// Starts from `E = M`. Converges in a handful of steps for Earth-like
/// eccentricities; eccentricities approaching 1 are not guaranteed to converge
/// and return [`SolarError::NoConvergence`] once the iteration cap is hit.
///
/// # Errors
/// [`SolarError::Domain`] if `eccentricity` is not strictly between 0 and 1.
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> Result<f64, SolarError> {
    if !(eccentricity > 0.0 && eccentricity < 1.0) {
        return Err(SolarError::Domain { eccentricity });
    }
    newton_iterations(mean_anomaly, eccentricity, MAX_ITERATIONS)
}

fn newton_iterations(
    mean_anomaly: f64,
    eccentricity: f64,
    max_iterations: usize,
) -> Result<f64, SolarError> {
    let tolerance = TOLERANCE * mean_anomaly.abs().max(1.0);
    let mut anomaly = mean_anomaly;
    for _ in 0..max_iterations {
        let residual = anomaly - eccentricity * anomaly.sin() - mean_anomaly;
        if residual.abs() <= tolerance {
            return Ok(anomaly);
        }
        anomaly -= residual / (1.0 - eccentricity * anomaly.cos());
    }

    Err(SolarError::NoConvergence("kepler equation"))
}
