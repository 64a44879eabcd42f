#![warn(missing_docs)]
//! Module for handling light rays propagating inside a fiber
use std::fmt::Display;

use nalgebra::{Point3, Vector3};
use num::Zero;
use rand::Rng;
use roots::{find_roots_quadratic, Roots};
use serde::{Deserialize, Serialize};
use uom::si::{
    angle::degree,
    f64::{Angle, Length},
    length::meter,
};

use crate::error::{FibertraceError, FtrResult};
use crate::{degree, meter, radian};

/// Struct that contains all information about a light ray inside a fiber.
///
/// The propagation direction is parameterized by an azimuth angle around the fiber axis
/// and a latitude (zenith) angle against it. The unit direction vector is always derived
/// from these two angles; the angles are the source of truth, never the vector alone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ray {
    /// azimuth angle of the propagation direction
    azimuth: Angle,
    /// latitude (zenith) angle of the propagation direction
    latitude: Angle,
    /// current position of the ray
    pos: Point3<Length>,
    /// derived unit direction vector
    dir: Vector3<f64>,
}
impl Ray {
    /// Creates a new [`Ray`] from explicit angles and a start point.
    ///
    /// Physically meaningful rays have a latitude within `[0, π/2)`; this is a
    /// convention expected of the caller, not enforced here.
    #[must_use]
    pub fn new(azimuth: Angle, latitude: Angle, start_point: Point3<Length>) -> Self {
        Self {
            azimuth,
            latitude,
            pos: start_point,
            dir: Self::direction_from_angles(azimuth, latitude),
        }
    }
    fn direction_from_angles(azimuth: Angle, latitude: Angle) -> Vector3<f64> {
        Vector3::new(
            latitude.sin().value * azimuth.cos().value,
            latitude.sin().value * azimuth.sin().value,
            latitude.cos().value,
        )
    }
    /// Returns the azimuth angle of this [`Ray`].
    #[must_use]
    pub const fn azimuth(&self) -> Angle {
        self.azimuth
    }
    /// Returns the latitude angle of this [`Ray`].
    #[must_use]
    pub const fn latitude(&self) -> Angle {
        self.latitude
    }
    /// Returns the current position of this [`Ray`].
    #[must_use]
    pub const fn start_point(&self) -> Point3<Length> {
        self.pos
    }
    /// Returns the derived unit direction vector of this [`Ray`].
    #[must_use]
    pub const fn direction(&self) -> Vector3<f64> {
        self.dir
    }
    /// Set angles and position of this [`Ray`] at once, re-deriving the direction.
    pub fn set_values(&mut self, azimuth: Angle, latitude: Angle, start_point: Point3<Length>) {
        self.azimuth = azimuth;
        self.latitude = latitude;
        self.pos = start_point;
        self.dir = Self::direction_from_angles(azimuth, latitude);
    }
    /// Set the propagation angles of this [`Ray`], re-deriving the direction.
    pub fn set_angles(&mut self, azimuth: Angle, latitude: Angle) {
        self.azimuth = azimuth;
        self.latitude = latitude;
        self.dir = Self::direction_from_angles(azimuth, latitude);
    }
    /// Set the current position of this [`Ray`].
    pub fn set_start_point(&mut self, x: Length, y: Length, z: Length) {
        self.pos = Point3::new(x, y, z);
    }
    /// Sample a random start point on the launch plane z = 0.
    ///
    /// The transverse angle is drawn uniformly from `[0, π)` and the radial coordinate
    /// uniformly from `[0, radius)`, so only the y >= 0 half-disk is covered and small
    /// radii are oversampled compared to a uniform areal density.
    pub fn generate_start_point<R: Rng + ?Sized>(
        &mut self,
        radius: Length,
        rng: &mut R,
    ) -> Point3<Length> {
        let phi = rng.random::<f64>() * std::f64::consts::PI;
        let r = radius * rng.random::<f64>();
        self.pos = Point3::new(r * phi.cos(), r * phi.sin(), Length::zero());
        self.pos
    }
    /// Sample random propagation angles within a bounded launch cone.
    ///
    /// The latitude is drawn uniformly from `[0, max_latitude]` and the azimuth
    /// uniformly from `[0, 360°)`. Returns the sampled `(latitude, azimuth)` pair.
    pub fn generate_angles<R: Rng + ?Sized>(
        &mut self,
        max_latitude: Angle,
        rng: &mut R,
    ) -> (Angle, Angle) {
        let latitude = max_latitude * rng.random::<f64>();
        let azimuth = degree!(rng.random::<f64>() * 360.0);
        self.set_angles(azimuth, latitude);
        (latitude, azimuth)
    }
    /// Recover the `(azimuth, latitude)` angle pair of a direction vector.
    ///
    /// The latitude is `acos(v_z)`; the azimuth sign is resolved via the sine component
    /// of the transverse projection. An exactly axis-parallel vector is degenerate and
    /// maps to `(0, 0)` by convention.
    #[must_use]
    pub fn angles_from_direction(vector: &Vector3<f64>) -> (Angle, Angle) {
        let latitude = vector.z.acos();
        if latitude == 0.0 {
            return (radian!(0.0), radian!(0.0));
        }
        let transverse_norm = vector.x.hypot(vector.y);
        let cos = vector.x / transverse_norm;
        let sin = vector.y / transverse_norm;
        let azimuth = if sin > 0.0 { cos.acos() } else { -cos.acos() };
        (radian!(azimuth), radian!(latitude))
    }
    /// Calculate the forward intersection of this [`Ray`] with the core boundary of the
    /// given radius.
    ///
    /// The boundary is treated as a cylinder of constant radius about the z axis: the
    /// circle-line intersection is solved in the transverse plane and extended axially
    /// via the cotangent of the latitude, taking the larger (forward) root of the
    /// quadratic. An axis-parallel ray (latitude = 0) never reaches the boundary; in
    /// this case the current transverse position is returned with the sentinel axial
    /// coordinate z = -1 m.
    ///
    /// # Errors
    ///
    /// This function will return an error if the ray does not reach the boundary from
    /// its current position (negative discriminant).
    pub fn intersect(&self, core_radius: Length) -> FtrResult<Point3<Length>> {
        if self.latitude.is_zero() {
            return Ok(Point3::new(self.pos.x, self.pos.y, meter!(-1.0)));
        }
        let (x0, y0) = (self.pos.x.value, self.pos.y.value);
        let (sin_phi, cos_phi) = (self.azimuth.sin().value, self.azimuth.cos().value);
        let radius = core_radius.value;
        let gamma = cos_phi.mul_add(x0, sin_phi * y0);
        let c = x0.mul_add(x0, y0.mul_add(y0, -(radius * radius)));
        let t = match find_roots_quadratic(1.0, 2.0 * gamma, c) {
            Roots::No(_) => {
                return Err(FibertraceError::Trace(
                    "ray does not reach the core boundary from its current position".into(),
                ))
            }
            Roots::One(t) => t[0],
            Roots::Two(t) => f64::max(t[0], t[1]),
            _ => unreachable!(),
        };
        let cot = self.latitude.cos().value / self.latitude.sin().value;
        Ok(Point3::new(
            self.pos.x + meter!(cos_phi * t),
            self.pos.y + meter!(sin_phi * t),
            self.pos.z + meter!(cot * t),
        ))
    }
    /// Mirror-reflect this [`Ray`] at a boundary point with the given inward surface
    /// normal.
    ///
    /// Returns the reflected direction re-expressed as an `(azimuth, latitude)` pair
    /// together with the signed incidence product `v·n` of the incoming direction and
    /// the normal. The ray itself is not modified.
    #[must_use]
    pub fn reflect(&self, normal: &Vector3<f64>) -> (Angle, Angle, f64) {
        let incidence = normal.dot(&self.dir);
        let reflected = self.dir - 2.0 * incidence * normal;
        let (azimuth, latitude) = Self::angles_from_direction(&reflected);
        (azimuth, latitude, incidence)
    }
}
impl Default for Ray {
    /// Create a [`Ray`] at the coordinate origin propagating along the fiber axis.
    fn default() -> Self {
        Self::new(Angle::zero(), Angle::zero(), meter!(0.0, 0.0, 0.0))
    }
}
impl Display for Ray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let m = Length::format_args(meter, uom::fmt::DisplayStyle::Abbreviation);
        let deg = Angle::format_args(degree, uom::fmt::DisplayStyle::Abbreviation);
        write!(
            f,
            "pos: ({}, {}, {}), azimuth: {:.4}, latitude: {:.4}",
            m.with(self.pos[0]),
            m.with(self.pos[1]),
            m.with(self.pos[2]),
            deg.with(self.azimuth),
            deg.with(self.latitude)
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::micrometer;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use assert_matches::assert_matches;
    use rand::{rngs::StdRng, SeedableRng};
    use std::f64::consts::{FRAC_PI_4, PI, SQRT_2};
    use uom::si::angle::radian;

    #[test]
    fn new() {
        let ray = Ray::new(degree!(0.0), degree!(45.0), meter!(1.0, 2.0, 3.0));
        assert_eq!(ray.azimuth(), degree!(0.0));
        assert_eq!(ray.latitude(), degree!(45.0));
        assert_eq!(ray.start_point(), meter!(1.0, 2.0, 3.0));
        assert_abs_diff_eq!(ray.direction().x, FRAC_PI_4.sin());
        assert_abs_diff_eq!(ray.direction().y, 0.0);
        assert_abs_diff_eq!(ray.direction().z, FRAC_PI_4.cos());
    }
    #[test]
    fn default() {
        let ray = Ray::default();
        assert_eq!(ray.start_point(), meter!(0.0, 0.0, 0.0));
        assert_abs_diff_eq!(ray.direction().z, 1.0);
    }
    #[test]
    fn direction_is_unit_norm() {
        for azimuth_deg in (-180..=180).step_by(30) {
            for latitude_deg in (0..90).step_by(5) {
                let ray = Ray::new(
                    degree!(f64::from(azimuth_deg)),
                    degree!(f64::from(latitude_deg)),
                    meter!(0.0, 0.0, 0.0),
                );
                assert_relative_eq!(ray.direction().norm(), 1.0, max_relative = 1e-12);
            }
        }
    }
    #[test]
    fn angles_from_direction_roundtrip() {
        for azimuth_deg in (-150..=180).step_by(30) {
            for latitude_deg in (5..90).step_by(5) {
                let azimuth = degree!(f64::from(azimuth_deg));
                let latitude = degree!(f64::from(latitude_deg));
                let ray = Ray::new(azimuth, latitude, meter!(0.0, 0.0, 0.0));
                let (recovered_az, recovered_lat) = Ray::angles_from_direction(&ray.direction());
                assert_relative_eq!(
                    recovered_az.get::<radian>(),
                    azimuth.get::<radian>(),
                    max_relative = 1e-9,
                    epsilon = 1e-9
                );
                assert_relative_eq!(
                    recovered_lat.get::<radian>(),
                    latitude.get::<radian>(),
                    max_relative = 1e-9
                );
            }
        }
    }
    #[test]
    fn angles_from_direction_axial() {
        let (azimuth, latitude) = Ray::angles_from_direction(&Vector3::z());
        assert_eq!(azimuth, radian!(0.0));
        assert_eq!(latitude, radian!(0.0));
    }
    #[test]
    fn set_values() {
        let mut ray = Ray::default();
        ray.set_values(degree!(90.0), degree!(45.0), meter!(0.5, 0.0, 1.0));
        assert_eq!(ray.start_point(), meter!(0.5, 0.0, 1.0));
        assert_abs_diff_eq!(ray.direction().y, FRAC_PI_4.sin(), epsilon = 1e-12);
        assert_abs_diff_eq!(ray.direction().z, FRAC_PI_4.cos(), epsilon = 1e-12);
    }
    #[test]
    fn set_angles_rederives_direction() {
        let mut ray = Ray::default();
        ray.set_angles(degree!(180.0), degree!(30.0));
        assert_abs_diff_eq!(ray.direction().x, -0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(ray.direction().norm(), 1.0, epsilon = 1e-12);
    }
    #[test]
    fn set_start_point() {
        let mut ray = Ray::default();
        ray.set_start_point(meter!(1.0), meter!(2.0), meter!(3.0));
        assert_eq!(ray.start_point(), meter!(1.0, 2.0, 3.0));
        assert_abs_diff_eq!(ray.direction().z, 1.0);
    }
    #[test]
    fn generate_start_point_half_disk() {
        let mut ray = Ray::default();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let point = ray.generate_start_point(micrometer!(100.0), &mut rng);
            assert_eq!(point.z, Length::zero());
            assert!(point.y >= Length::zero());
            assert!(point.x.value.hypot(point.y.value) < micrometer!(100.0).value);
        }
    }
    #[test]
    fn generate_start_point_reproducible() {
        let mut ray = Ray::default();
        let point = ray.generate_start_point(micrometer!(100.0), &mut StdRng::seed_from_u64(7));
        let other = ray.generate_start_point(micrometer!(100.0), &mut StdRng::seed_from_u64(7));
        assert_eq!(point, other);
    }
    #[test]
    fn generate_angles() {
        let mut ray = Ray::default();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let (latitude, azimuth) = ray.generate_angles(degree!(30.0), &mut rng);
            assert!(latitude >= radian!(0.0) && latitude <= degree!(30.0));
            assert!(azimuth >= radian!(0.0) && azimuth < degree!(360.0));
            assert_relative_eq!(ray.direction().norm(), 1.0, max_relative = 1e-12);
        }
    }
    #[test]
    fn intersect_from_axis() {
        let ray = Ray::new(degree!(0.0), degree!(45.0), meter!(0.0, 0.0, 0.0));
        let point = ray.intersect(micrometer!(100.0)).unwrap();
        assert_abs_diff_eq!(point.x.value, 1e-4, epsilon = 1e-15);
        assert_abs_diff_eq!(point.y.value, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(point.z.value, 1e-4, epsilon = 1e-15);
    }
    #[test]
    fn intersect_off_center() {
        let ray = Ray::new(degree!(0.0), degree!(45.0), micrometer!(50.0, 0.0, 0.0));
        let point = ray.intersect(micrometer!(100.0)).unwrap();
        assert_abs_diff_eq!(point.x.value, 1e-4, epsilon = 1e-15);
        assert_abs_diff_eq!(point.z.value, 5e-5, epsilon = 1e-15);
    }
    #[test]
    fn intersect_axis_parallel_sentinel() {
        let ray = Ray::new(degree!(0.0), degree!(0.0), micrometer!(10.0, 20.0, 0.0));
        let point = ray.intersect(micrometer!(100.0)).unwrap();
        assert_eq!(point.x, micrometer!(10.0));
        assert_eq!(point.y, micrometer!(20.0));
        assert_eq!(point.z, meter!(-1.0));
    }
    #[test]
    fn intersect_degenerate() {
        let ray = Ray::new(degree!(90.0), degree!(45.0), micrometer!(200.0, 0.0, 0.0));
        assert_matches!(
            ray.intersect(micrometer!(100.0)),
            Err(FibertraceError::Trace(_))
        );
    }
    #[test]
    fn reflect() {
        let ray = Ray::new(degree!(0.0), degree!(45.0), meter!(0.0, 0.0, 0.0));
        let (azimuth, latitude, incidence) = ray.reflect(&Vector3::new(-1.0, 0.0, 0.0));
        assert_relative_eq!(azimuth.get::<radian>(), -PI);
        assert_relative_eq!(latitude.get::<radian>(), FRAC_PI_4, max_relative = 1e-12);
        assert_relative_eq!(incidence, -1.0 / SQRT_2, max_relative = 1e-12);
    }
    #[test]
    fn reflect_preserves_norm() {
        let ray = Ray::new(degree!(23.0), degree!(34.0), meter!(0.0, 0.0, 0.0));
        let normal = Vector3::new(-0.6, -0.8, 0.0);
        let incidence = normal.dot(&ray.direction());
        let reflected = ray.direction() - 2.0 * incidence * normal;
        assert_relative_eq!(reflected.norm(), ray.direction().norm(), max_relative = 1e-12);
    }
    #[test]
    fn display() {
        let ray = Ray::new(degree!(0.0), degree!(45.0), meter!(0.0, 0.0, 1.0));
        assert_eq!(
            format!("{ray}"),
            "pos: (0 m, 0 m, 1 m), azimuth: 0.0000 °, latitude: 45.0000 °"
        );
    }
}
