#![warn(missing_docs)]
//! Straight fiber with a constant circular cross section.
use std::fmt::Display;

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use uom::si::{
    f64::{Angle, Length},
    length::micrometer,
};

use super::{Fiber, FiberType};
use crate::error::{FibertraceError, FtrResult};

/// A straight (cylindrical) fiber aligned with the z axis.
///
/// The core is a cylinder of radius `core_r` surrounded by a cladding of radius
/// `clad_r`; light is confined to the core by total internal reflection at the
/// core/cladding boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FiberCylinder {
    core_r: Length,
    clad_r: Length,
    core_n: f64,
    clad_n: f64,
    z_max: Length,
    diffusion: Option<Angle>,
}
impl FiberCylinder {
    /// Create a new [`FiberCylinder`].
    ///
    /// The core radius is assumed to not exceed the cladding radius.
    ///
    /// # Errors
    /// This function returns an error if
    ///  - a radius or the fiber length is <= 0.0, `NaN` or +inf
    ///  - a refractive index is <= 0.0, `NaN` or +inf
    pub fn new(
        core_r: Length,
        clad_r: Length,
        core_n: f64,
        clad_n: f64,
        z_max: Length,
    ) -> FtrResult<Self> {
        if core_r.is_sign_negative() || !core_r.is_normal() {
            return Err(FibertraceError::Geometry(
                "core radius must be > 0.0 and finite".into(),
            ));
        }
        if clad_r.is_sign_negative() || !clad_r.is_normal() {
            return Err(FibertraceError::Geometry(
                "cladding radius must be > 0.0 and finite".into(),
            ));
        }
        if z_max.is_sign_negative() || !z_max.is_normal() {
            return Err(FibertraceError::Geometry(
                "fiber length must be > 0.0 and finite".into(),
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
        Ok(Self {
            core_r,
            clad_r,
            core_n,
            clad_n,
            z_max,
            diffusion: None,
        })
    }
    /// Return a copy of this fiber with all radius and length parameters replaced.
    ///
    /// # Errors
    /// This function returns an error under the same conditions as [`FiberCylinder::new`].
    pub fn with_geometry(self, core_r: Length, clad_r: Length, z_max: Length) -> FtrResult<Self> {
        let mut fiber = Self::new(core_r, clad_r, self.core_n, self.clad_n, z_max)?;
        fiber.diffusion = self.diffusion;
        Ok(fiber)
    }
    /// Return a copy of this fiber with both refractive indices replaced.
    ///
    /// # Errors
    /// This function returns an error if a refractive index is <= 0.0, `NaN` or +inf.
    pub fn with_refractive_indices(self, core_n: f64, clad_n: f64) -> FtrResult<Self> {
        let mut fiber = Self::new(self.core_r, self.clad_r, core_n, clad_n, self.z_max)?;
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
    /// Returns the core and cladding radii of this [`FiberCylinder`].
    #[must_use]
    pub const fn radii(&self) -> (Length, Length) {
        (self.core_r, self.clad_r)
    }
    /// Returns the cladding radius of this [`FiberCylinder`].
    #[must_use]
    pub const fn cladding_radius(&self) -> Length {
        self.clad_r
    }
}
impl Fiber for FiberCylinder {
    fn core_radius(&self) -> Length {
        self.core_r
    }
    fn radius_at(&self, _z: Length) -> Length {
        self.core_r
    }
    fn z_max(&self) -> Length {
        self.z_max
    }
    fn refractive_indices(&self) -> (f64, f64) {
        (self.core_n, self.clad_n)
    }
    fn normal_at(&self, point: &Point3<Length>) -> Vector3<f64> {
        let (x, y) = (point.x.value, point.y.value);
        let norm = x.hypot(y);
        Vector3::new(-x / norm, -y / norm, 0.0)
    }
    fn diffusion(&self) -> Option<Angle> {
        self.diffusion
    }
    fn to_enum(&self) -> FiberType {
        FiberType::Cylinder(self.clone())
    }
}
impl Display for FiberCylinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let um = Length::format_args(micrometer, uom::fmt::DisplayStyle::Abbreviation);
        write!(
            f,
            "cylinder, core radius: {:.2}, cladding radius: {:.2}, length: {:.2}, indices: ({}, {})",
            um.with(self.core_r),
            um.with(self.clad_r),
            um.with(self.z_max),
            self.core_n,
            self.clad_n
        )
    }
}
