//! Curve radius, sag and the validity gate.
//!
//! Height convention: the rim plane is `z = 0` and depth grows towards
//! negative z. The cap bottoms out at `z = -sag` on the dish centre and
//! meets the flat rim at `z = 0` on the curve radius.

use serde::Serialize;

use crate::error::{Field, InvalidDish};

/// Radius of the largest circle, centred on the dish, that fits inside the
/// rim border: `max(0, min(width, height) / 2 - rim)`.
pub fn curve_radius(width: f64, height: f64, rim: f64) -> f64 {
    (width.min(height) / 2.0 - rim).max(0.0)
}

/// Depth of a sphere of radius `sphere_radius` below its tangent plane at
/// planar distance `rho` from the tangent point.
///
/// Written as `rho² / (R + sqrt(R² - rho²))`, which equals
/// `R - sqrt(R² - rho²)` without the cancellation for large `R`.
fn sphere_drop(sphere_radius: f64, rho: f64) -> f64 {
    let r2 = sphere_radius * sphere_radius;
    let rho2 = rho * rho;
    rho2 / (sphere_radius + (r2 - rho2).sqrt())
}

/// Sag of the curved area: how far the centre sits below the rim plane.
///
/// Returns `None` when `sphere_radius <= curve_radius(width, height, rim)`,
/// i.e. the sphere is too tight to reach the rim.
pub fn sag(sphere_radius: f64, width: f64, height: f64, rim: f64) -> Option<f64> {
    let curve = curve_radius(width, height, rim);
    if !(sphere_radius > curve) {
        return None;
    }
    Some(sphere_drop(sphere_radius, curve))
}

/// Validity gate with a reason for the first failed condition.
pub fn check(
    width: f64,
    height: f64,
    rim: f64,
    thickness: f64,
    sphere_radius: f64,
) -> Result<(), InvalidDish> {
    let inputs = [
        (Field::DishWidth, width),
        (Field::DishHeight, height),
        (Field::RimWidth, rim),
        (Field::Thickness, thickness),
        (Field::SphereRadius, sphere_radius),
    ];
    for (field, value) in inputs {
        if !(value > 0.0 && value.is_finite()) {
            return Err(InvalidDish::NonPositive { field, value });
        }
    }

    let limit = width.min(height) / 2.0;
    if rim >= limit {
        return Err(InvalidDish::RimTooWide { rim, limit });
    }

    let curve = curve_radius(width, height, rim);
    if sphere_radius <= curve {
        return Err(InvalidDish::RadiusTooSmall {
            sphere_radius,
            curve_radius: curve,
        });
    }
    Ok(())
}

/// True iff the configuration may be meshed: all inputs positive and finite,
/// the rim narrower than half the smaller side, and the sphere radius
/// strictly larger than the curve radius.
pub fn is_valid(width: f64, height: f64, rim: f64, thickness: f64, sphere_radius: f64) -> bool {
    check(width, height, rim, thickness, sphere_radius).is_ok()
}

/// Derived curvature of a dish.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurveGeometry {
    /// Radius of the curved (spherical) area in plan view (mm).
    pub curve_radius: f64,
    /// Depth of the dish centre below the rim plane (mm).
    pub sag: f64,
}

/// A validated radius dish. All lengths in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DishConfig {
    dish_width: f64,
    dish_height: f64,
    rim_width: f64,
    thickness: f64,
    sphere_radius: f64,
}

impl DishConfig {
    /// Build a configuration, rejecting anything [`check`] rejects.
    pub fn new(
        dish_width: f64,
        dish_height: f64,
        rim_width: f64,
        thickness: f64,
        sphere_radius: f64,
    ) -> Result<Self, InvalidDish> {
        check(dish_width, dish_height, rim_width, thickness, sphere_radius)?;
        Ok(Self {
            dish_width,
            dish_height,
            rim_width,
            thickness,
            sphere_radius,
        })
    }

    /// Plan width (x extent).
    pub fn dish_width(&self) -> f64 {
        self.dish_width
    }

    /// Plan height (y extent).
    pub fn dish_height(&self) -> f64 {
        self.dish_height
    }

    /// Flat border width.
    pub fn rim_width(&self) -> f64 {
        self.rim_width
    }

    /// Height from base to rim plane.
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Sphere radius of the curved area.
    pub fn sphere_radius(&self) -> f64 {
        self.sphere_radius
    }

    /// Curve radius and sag, recomputed on every call.
    pub fn curve(&self) -> CurveGeometry {
        let curve_radius = curve_radius(self.dish_width, self.dish_height, self.rim_width);
        CurveGeometry {
            curve_radius,
            sag: sphere_drop(self.sphere_radius, curve_radius),
        }
    }

    /// Height of the curved surface at planar radius `rho`. Meaningful for
    /// `rho <= curve_radius`.
    pub fn cap_z(&self, rho: f64) -> f64 {
        sphere_drop(self.sphere_radius, rho) - self.curve().sag
    }

    /// Height of the flat rim.
    pub fn rim_z(&self) -> f64 {
        0.0
    }

    /// Top-surface height at planar radius `rho` from the dish centre.
    pub fn surface_z(&self, rho: f64) -> f64 {
        if rho <= self.curve().curve_radius {
            self.cap_z(rho)
        } else {
            self.rim_z()
        }
    }

    /// Base height.
    pub fn base_z(&self) -> f64 {
        -self.thickness
    }

    /// Material left under the deepest point: `thickness - sag`.
    ///
    /// Not part of the validity gate. A non-positive value means the cap
    /// reaches through the base.
    pub fn center_clearance(&self) -> f64 {
        self.thickness - self.curve().sag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const FOURTEEN_FT: f64 = 4267.2;

    fn reference() -> DishConfig {
        DishConfig::new(600.0, 600.0, 50.0, 50.0, FOURTEEN_FT).unwrap()
    }

    #[test]
    fn test_curve_radius() {
        assert_eq!(curve_radius(600.0, 600.0, 50.0), 250.0);
        assert_eq!(curve_radius(1200.0, 600.0, 50.0), 250.0);
        assert_eq!(curve_radius(100.0, 100.0, 80.0), 0.0);
    }

    #[test]
    fn test_reference_sag() {
        let curve = reference().curve();
        assert_eq!(curve.curve_radius, 250.0);
        assert_abs_diff_eq!(curve.sag, 7.34, epsilon = 0.02);
        assert_relative_eq!(
            curve.sag,
            FOURTEEN_FT - (FOURTEEN_FT * FOURTEEN_FT - 250.0 * 250.0).sqrt(),
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_sag_invalid_radius() {
        assert_eq!(sag(250.0, 600.0, 600.0, 50.0), None);
        assert_eq!(sag(100.0, 600.0, 600.0, 50.0), None);
        assert!(sag(250.1, 600.0, 600.0, 50.0).is_some());
    }

    #[test]
    fn test_sag_grows_as_radius_tightens() {
        let mut last = 0.0;
        for radius in [20_000.0, 8000.0, 4267.2, 1000.0, 400.0, 260.0, 250.5] {
            let s = sag(radius, 600.0, 600.0, 50.0).unwrap();
            assert!(s >= 0.0);
            assert!(s > last, "sag {s} at R={radius} not above {last}");
            last = s;
        }
    }

    #[test]
    fn test_rejects_wide_rim() {
        assert!(!is_valid(600.0, 400.0, 200.0, 50.0, 5000.0));
        assert!(!is_valid(600.0, 400.0, 250.0, 50.0, 5000.0));
        assert!(matches!(
            check(600.0, 400.0, 200.0, 50.0, 5000.0),
            Err(InvalidDish::RimTooWide { limit, .. }) if limit == 200.0
        ));
        assert!(is_valid(600.0, 400.0, 199.0, 50.0, 5000.0));
    }

    #[test]
    fn test_rejects_small_radius() {
        assert!(!is_valid(600.0, 600.0, 50.0, 50.0, 250.0));
        assert!(!is_valid(600.0, 600.0, 50.0, 50.0, 200.0));
        assert_eq!(
            check(600.0, 600.0, 50.0, 50.0, 250.0),
            Err(InvalidDish::RadiusTooSmall {
                sphere_radius: 250.0,
                curve_radius: 250.0
            })
        );
    }

    #[test]
    fn test_rejects_non_positive_and_nan() {
        assert!(!is_valid(0.0, 600.0, 50.0, 50.0, 5000.0));
        assert!(!is_valid(600.0, -1.0, 50.0, 50.0, 5000.0));
        assert!(!is_valid(600.0, 600.0, 0.0, 50.0, 5000.0));
        assert!(!is_valid(600.0, 600.0, 50.0, 0.0, 5000.0));
        assert!(!is_valid(600.0, 600.0, 50.0, 50.0, f64::NAN));
        assert!(!is_valid(f64::INFINITY, 600.0, 50.0, 50.0, 5000.0));
        assert!(matches!(
            check(600.0, 600.0, 50.0, -3.0, 5000.0),
            Err(InvalidDish::NonPositive {
                field: Field::Thickness,
                ..
            })
        ));
    }

    #[test]
    fn test_new_matches_gate() {
        assert!(DishConfig::new(600.0, 600.0, 50.0, 50.0, 250.0).is_err());
        assert!(DishConfig::new(600.0, 600.0, 50.0, 50.0, 251.0).is_ok());
    }

    #[test]
    fn test_surface_continuity_at_curve_radius() {
        for (w, h, rim, radius) in [
            (600.0, 600.0, 50.0, FOURTEEN_FT),
            (1200.0, 600.0, 20.0, 1000.0),
            (220.0, 220.0, 5.0, 7620.0),
            (300.0, 500.0, 40.0, 111.0),
        ] {
            let dish = DishConfig::new(w, h, rim, 30.0, radius).unwrap();
            let c = dish.curve().curve_radius;
            assert_abs_diff_eq!(dish.cap_z(c), dish.rim_z(), epsilon = 1e-9);
            assert_abs_diff_eq!(dish.surface_z(c), dish.surface_z(c + 1e-9), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_surface_profile() {
        let dish = reference();
        let sag = dish.curve().sag;
        assert_relative_eq!(dish.surface_z(0.0), -sag);
        assert_eq!(dish.surface_z(280.0), 0.0);
        assert!(dish.surface_z(100.0) < 0.0 && dish.surface_z(100.0) > -sag);
        assert_eq!(dish.base_z(), -50.0);
        assert_relative_eq!(dish.center_clearance(), 50.0 - sag);
    }
}
