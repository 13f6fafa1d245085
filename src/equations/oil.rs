//! Oil transport problem definition.
//!
//! The initial condition is a Gaussian bump centered on the spill site,
//! and the advecting current is the steady analytic field
//!
//! v(x, y) = (y - 0.2 x, -x)
//!
//! Note the field is not divergence-free (div v = -0.2 everywhere); the
//! scheme is a compressible-flow approximation by construction and the
//! field is reproduced exactly as given.

/// Spill site: center of the initial Gaussian bump.
pub const SPILL_CENTER: (f64, f64) = (0.35, 0.45);

/// Squared-distance scale of the initial bump.
pub const SPILL_WIDTH: f64 = 0.01;

/// Initial oil concentration at a point.
///
/// `exp(-|p - center|^2 / 0.01)`, exactly 1.0 at the spill center and in
/// `(0, 1]` everywhere else.
#[inline]
pub fn initial_oil(x: f64, y: f64) -> f64 {
    let dx = x - SPILL_CENTER.0;
    let dy = y - SPILL_CENTER.1;
    (-(dx * dx + dy * dy) / SPILL_WIDTH).exp()
}

/// Steady advection velocity at a point.
#[inline]
pub fn velocity(x: f64, y: f64) -> (f64, f64) {
    (y - 0.2 * x, -x)
}

/// Velocity magnitude at a point. Used for Courant-number diagnostics.
#[inline]
pub fn speed(x: f64, y: f64) -> f64 {
    let (vx, vy) = velocity(x, y);
    (vx * vx + vy * vy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_oil_is_one_at_center() {
        assert_eq!(initial_oil(SPILL_CENTER.0, SPILL_CENTER.1), 1.0);
    }

    #[test]
    fn test_initial_oil_in_unit_interval() {
        for &(x, y) in &[
            (0.0, 0.0),
            (1.0, 1.0),
            (0.35, 0.0),
            (-2.0, 3.0),
            (0.36, 0.44),
        ] {
            let u = initial_oil(x, y);
            assert!(u > 0.0 && u <= 1.0, "u({}, {}) = {}", x, y, u);
        }
    }

    #[test]
    fn test_initial_oil_decays_with_distance() {
        let near = initial_oil(0.36, 0.45);
        let far = initial_oil(0.8, 0.45);
        assert!(near > far);
    }

    #[test]
    fn test_velocity_field() {
        let (vx, vy) = velocity(1.0, 0.5);
        assert!((vx - 0.3).abs() < 1e-14); // 0.5 - 0.2 * 1.0
        assert!((vy - (-1.0)).abs() < 1e-14);

        // Still at the origin
        let (vx0, vy0) = velocity(0.0, 0.0);
        assert_eq!((vx0, vy0), (0.0, 0.0));
    }

    #[test]
    fn test_speed() {
        // v(1, 0.2) = (0, -1)
        assert!((speed(1.0, 0.2) - 1.0).abs() < 1e-14);
    }
}
