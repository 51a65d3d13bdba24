use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// The quarter turns at which sine and cosine are snapped, as `(angle, sin, cos)`.
///
/// Full turn is listed separately from zero since reduction into [0, 2π) may round up to 2π.
const QUARTER_TURNS: [(f64, f64, f64); 5] = [
    (0., 0., 1.),
    (FRAC_PI_2, 1., 0.),
    (PI, 0., -1.),
    (3. * FRAC_PI_2, -1., 0.),
    (TAU, 0., 1.),
];

/// Returns the angle (in radians) in [0, 2π].
pub(crate) fn into_bounds(radians: f64) -> f64 {
    radians.rem_euclid(TAU)
}

/// Returns `(sin, cos)` of an angle in radians, with exact `{0, ±1}` values for angles that lie
/// within `tolerance` of a quarter turn.
///
/// `cos(π/2)` evaluates to ~6e-17 in floating point, which would hide the gimbal-lock case from
/// an exact `cos θ == 0` check. Angles away from quarter turns get plain `sin`/`cos`.
pub(crate) fn sin_cos_snapped(radians: f64, tolerance: f64) -> (f64, f64) {
    if radians.is_finite() {
        let bounded = into_bounds(radians);
        for (at, sin, cos) in QUARTER_TURNS {
            if (bounded - at).abs() <= tolerance {
                return (sin, cos);
            }
        }
    }
    radians.sin_cos()
}
