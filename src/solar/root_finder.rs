//! Secant-method root finder over functions from instants to durations.

use chrono::{DateTime, Duration, Utc};

use super::{duration_from_secs, duration_secs};
use crate::error::SolarError;

/// Two guesses closer than this are considered the same instant.
const CONVERGENCE_NANOS: i64 = 100;

/// Maximum secant steps before giving up.
const MAX_ITERATIONS: usize = 64;

fn coincide(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    (a - b)
        .num_nanoseconds()
        .is_some_and(|nanos| nanos.abs() < CONVERGENCE_NANOS)
}

/// Find the instant where `diff` returns zero, starting from two guesses.
///
/// `diff` usually returns "event time computed from the solar position at
/// `guess`" minus `guess`, so its root is a self-consistent event time.
///
/// # Errors
/// - [`SolarError::InvalidGuess`] if the guesses coincide
/// - [`SolarError::NoConvergence`] on a flat secant or after the iteration cap
/// - any error returned by `diff`
pub fn solve_secant<F>(
    mut diff: F,
    guess1: DateTime<Utc>,
    guess2: DateTime<Utc>,
) -> Result<DateTime<Utc>, SolarError>
where
    F: FnMut(DateTime<Utc>) -> Result<Duration, SolarError>,
{
    if coincide(guess1, guess2) {
        return Err(SolarError::InvalidGuess);
    }

    let (mut guess1, mut guess2) = if guess2 < guess1 {
        (guess2, guess1)
    } else {
        (guess1, guess2)
    };
    let mut diff1 = duration_secs(diff(guess1)?);
    let mut diff2 = duration_secs(diff(guess2)?);

    for _ in 0..MAX_ITERATIONS {
        if coincide(guess1, guess2) {
            return Ok(guess1);
        }

        let slope = diff2 - diff1;
        if slope == 0.0 {
            return Err(SolarError::NoConvergence("secant is flat"));
        }

        let step = diff1 * duration_secs(guess2 - guess1) / slope;
        let guess3 = guess1 - duration_from_secs(step);
        let diff3 = duration_secs(diff(guess3)?);

        (guess1, diff1) = (guess2, diff2);
        (guess2, diff2) = (guess3, diff3);
    }

    Err(SolarError::NoConvergence("secant iteration limit"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_affine_root_is_exact() {
        let target = epoch() + Duration::hours(5) + Duration::minutes(17);
        let root = solve_secant(
            |g| Ok((target - g) * 2),
            epoch(),
            epoch() + Duration::hours(12),
        )
        .unwrap();
        assert!(coincide(root, target), "got {root}, expected {target}");
    }

    #[test]
    fn test_guess_order_does_not_matter() {
        let target = epoch() + Duration::hours(3);
        let forward = solve_secant(|g| Ok(target - g), epoch(), epoch() + Duration::hours(8));
        let backward = solve_secant(|g| Ok(target - g), epoch() + Duration::hours(8), epoch());
        assert!(coincide(forward.unwrap(), target));
        assert!(coincide(backward.unwrap(), target));
    }

    #[test]
    fn test_nonlinear_root() {
        // Sinusoidal perturbation, like the equation of time feeding back into transit
        let target = epoch() + Duration::hours(12);
        let root = solve_secant(
            |g| {
                let hours = duration_secs(g - epoch()) / 3600.0;
                let wobble = duration_from_secs(60.0 * (hours / 24.0).sin());
                Ok(target + wobble - g)
            },
            target - Duration::minutes(20),
            target + Duration::minutes(20),
        )
        .unwrap();
        let mut expected: f64 = 12.0 * 3600.0;
        for _ in 0..20 {
            expected = 12.0 * 3600.0 + 60.0 * (expected / 3600.0 / 24.0).sin();
        }
        assert!((duration_secs(root - epoch()) - expected).abs() < 1e-3);
    }

    #[test]
    fn test_coincident_guesses_rejected() {
        let result = solve_secant(|_| Ok(Duration::zero()), epoch(), epoch());
        assert_eq!(result, Err(SolarError::InvalidGuess));

        let close = epoch() + Duration::nanoseconds(50);
        let result = solve_secant(|_| Ok(Duration::zero()), epoch(), close);
        assert_eq!(result, Err(SolarError::InvalidGuess));
    }

    #[test]
    fn test_flat_function_does_not_converge() {
        let result = solve_secant(
            |_| Ok(Duration::minutes(5)),
            epoch(),
            epoch() + Duration::hours(1),
        );
        assert!(matches!(result, Err(SolarError::NoConvergence(_))));
    }

    #[test]
    fn test_rootless_jump_hits_iteration_limit() {
        // Sign flips across `target` with a one second gap, so no root exists
        // and the guesses keep cycling around it
        let target = epoch() + Duration::hours(6);
        let jump = |g: DateTime<Utc>| {
            let offset = g - target;
            if offset < Duration::zero() {
                Ok(offset - Duration::seconds(1))
            } else {
                Ok(offset + Duration::seconds(1))
            }
        };
        let result = solve_secant(
            jump,
            target - Duration::minutes(30),
            target + Duration::minutes(30),
        );
        assert_eq!(result, Err(SolarError::NoConvergence("secant iteration limit")));
    }

    #[test]
    fn test_diff_errors_propagate() {
        let err = SolarError::UnreachableAltitude {
            altitude: 0.3,
            declination: 0.4,
            latitude: 70.0,
        };
        let expected = err.clone();
        let result = solve_secant(move |_| Err(err.clone()), epoch(), epoch() + Duration::hours(1));
        assert_eq!(result, Err(expected));
    }
}
