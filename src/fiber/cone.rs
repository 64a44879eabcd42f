#![warn(missing_docs)]
//! Linearly tapered fiber.
use std::fmt::Display;

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use uom::si::{
    angle::degree,
    f64::{Angle, Length},
    length::micrometer,
};

use super::{Fiber, FiberType};
use crate::error::{FibertraceError, FtrResult};
use crate::radian;

/// A conical (tapered) fiber aligned with the z axis.
///
/// The boundary radius shrinks linearly from `base_r` at z = 0 to `top_r` at `z_max`.
/// The taper half-angle `asin((base_r - top_r) / z_max)` and its tangent are derived at
/// construction and cached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FiberCone {
    z_max: Length,
    base_r: Length,
    top_r: Length,
    core_n: f64,
    clad_n: f64,
    angle: Angle,
    c: f64,
    diffusion: Option<Angle>,
}
impl FiberCone {
    /// Create a new [`FiberCone`].
    ///
    /// # Errors
    /// This function returns an error if
    ///  - the base radius or the fiber length is <= 0.0, `NaN` or +inf
    ///  - the top radius is negative, `NaN` or +inf
    ///  - `|base_r - top_r| > z_max` (the taper ratio leaves the domain of asin)
    ///  - a refractive index is <= 0.0, `NaN` or +inf
    pub fn new(
        z_max: Length,
        base_r: Length,
        top_r: Length,
        core_n: f64,
        clad_n: f64,
    ) -> FtrResult<Self> {
        if z_max.is_sign_negative() || !z_max.is_normal() {
            return Err(FibertraceError::Geometry(
                "fiber length must be > 0.0 and finite".into(),
            ));
        }
        if base_r.is_sign_negative() || !base_r.is_normal() {
            return Err(FibertraceError::Geometry(
                "base radius must be > 0.0 and finite".into(),
            ));
        }
        if top_r.is_sign_negative() || !top_r.is_finite() {
            return Err(FibertraceError::Geometry(
                "top radius must be >= 0.0 and finite".into(),
            ));
        }
        if core_n <= 0.0 || !core_n.is_finite() {
            return Err(FibertraceError::Geometry(
                "core refractive index must be > 0.0 and finite".into(),
            ));
        }
        if clad_n <= 0.0 || !clad_n.is_finite() {
            return Err(FibertraceError::Geometry(
                "cladding refractive index must be > 0.0 and finite".into(),
            ));
        }
        let ratio = ((base_r - top_r) / z_max).value;
        if !(-1.0..=1.0).contains(&ratio) {
            return Err(FibertraceError::Geometry(
                "taper ratio (base_r - top_r) / z_max must lie within [-1, 1]".into(),
            ));
        }
        let angle = radian!(ratio.asin());
        Ok(Self {
            z_max,
            base_r,
            top_r,
            core_n,
            clad_n,
            angle,
            c: angle.tan().value,
            diffusion: None,
        })
    }
    /// Return a copy of this fiber with all radius and length parameters replaced.
    ///
    /// The taper half-angle and its tangent are re-derived from the new parameters.
    ///
    /// # Errors
    /// This function returns an error under the same conditions as [`FiberCone::new`].
    pub fn with_geometry(self, z_max: Length, base_r: Length, top_r: Length) -> FtrResult<Self> {
        let mut fiber = Self::new(z_max, base_r, top_r, self.core_n, self.clad_n)?;
        fiber.diffusion = self.diffusion;
        Ok(fiber)
    }
    /// Return a copy of this fiber with both refractive indices replaced.
    ///
    /// # Errors
    /// This function returns an error if a refractive index is <= 0.0, `NaN` or +inf.
    pub fn with_refractive_indices(self, core_n: f64, clad_n: f64) -> FtrResult<Self> {
        let mut fiber = Self::new(self.z_max, self.base_r, self.top_r, core_n, clad_n)?;
        fiber.diffusion = self.diffusion;
        Ok(fiber)
    }
    /// Return a copy of this fiber with the given diffuse-reflection half-width.
    ///
    /// # Errors
    /// This function returns an error if the given angle is negative, `NaN` or +inf.
    pub fn with_diffusion(mut self, diffusion: Angle) -> FtrResult<Self> {
        if diffusion.is_sign_negative() || !diffusion.is_finite() {
            return Err(FibertraceError::Geometry(
                "diffusion angle must be >= 0.0 and finite".into(),
            ));
        }
        self.diffusion = Some(diffusion);
        Ok(self)
    }
    /// Returns the boundary radius at the base (z = 0) of this [`FiberCone`].
    #[must_use]
    pub const fn base_radius(&self) -> Length {
        self.base_r
    }
    /// Returns the boundary radius at the top (z = `z_max`) of this [`FiberCone`].
    #[must_use]
    pub const fn top_radius(&self) -> Length {
        self.top_r
    }
    /// Returns the taper half-angle of this [`FiberCone`].
    #[must_use]
    pub const fn taper_angle(&self) -> Angle {
        self.angle
    }
}
impl Fiber for FiberCone {
    fn core_radius(&self) -> Length {
        self.base_r
    }
    fn radius_at(&self, z: Length) -> Length {
        self.base_r - z * self.angle.sin()
    }
    fn z_max(&self) -> Length {
        self.z_max
    }
    fn refractive_indices(&self) -> (f64, f64) {
        (self.core_n, self.clad_n)
    }
    fn normal_at(&self, point: &Point3<Length>) -> Vector3<f64> {
        let (x, y) = (point.x.value, point.y.value);
        let z = -self.c * self.c * (point.z.value - self.base_r.value / self.c);
        let norm = x.mul_add(x, y.mul_add(y, z * z)).sqrt();
        Vector3::new(-x / norm, -y / norm, -z / norm)
    }
    fn diffusion(&self) -> Option<Angle> {
        self.diffusion
    }
    fn to_enum(&self) -> FiberType {
        FiberType::Cone(self.clone())
    }
}
impl Display for FiberCone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let um = Length::format_args(micrometer, uom::fmt::DisplayStyle::Abbreviation);
        let deg = Angle::format_args(degree, uom::fmt::DisplayStyle::Abbreviation);
        write!(
            f,
            "cone, base radius: {:.2}, top radius: {:.2}, length: {:.2}, taper: {:.4}, indices: ({}, {})",
            um.with(self.base_r),
            um.with(self.top_r),
            um.with(self.z_max),
            deg.with(self.angle),
            self.core_n,
            self.clad_n
        )
    }
}
