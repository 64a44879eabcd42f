#![warn(missing_docs)]
//! Module for handling the boundary geometry of an optical fiber waveguide.
//!
//! A fiber is a rotationally symmetric boundary around the z axis together with the
//! refractive indices of its core and cladding. Two shapes are available: the straight
//! [`FiberCylinder`] and the tapered [`FiberCone`]. Both implement the [`Fiber`] trait
//! which provides the full capability set consumed by the tracing loop in
//! [`trajectory`](crate::trajectory).
use std::fmt::Display;

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use uom::si::f64::{Angle, Length};

pub mod cone;
pub mod cylinder;

pub use cone::FiberCone;
pub use cylinder::FiberCylinder;

use crate::error::{FibertraceError, FtrResult};
use crate::radian;

/// Available rotationally symmetric fiber boundary shapes
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub enum FiberType {
    /// straight fiber with a constant core radius
    Cylinder(FiberCylinder),
    /// linearly tapered fiber
    Cone(FiberCone),
}

impl FiberType {
    /// Reconstruct the contained fiber through its constructor.
    ///
    /// Re-derives cached taper quantities and re-validates all parameters. This is used
    /// after deserializing a fiber from a document, where the stored derived values must
    /// not be trusted.
    ///
    /// # Errors
    ///
    /// This function will return an error if the stored parameters do not form a valid
    /// fiber (see [`FiberCylinder::new`] and [`FiberCone::new`]).
    pub fn rebuild(&self) -> FtrResult<Self> {
        let rebuilt = match self {
            Self::Cylinder(fiber) => {
                let (core_r, clad_r) = fiber.radii();
                let (core_n, clad_n) = fiber.refractive_indices();
                let mut new_fiber =
                    FiberCylinder::new(core_r, clad_r, core_n, clad_n, fiber.z_max())?;
                if let Some(diffusion) = fiber.diffusion() {
                    new_fiber = new_fiber.with_diffusion(diffusion)?;
                }
                Self::Cylinder(new_fiber)
            }
            Self::Cone(fiber) => {
                let (core_n, clad_n) = fiber.refractive_indices();
                let mut new_fiber = FiberCone::new(
                    fiber.z_max(),
                    fiber.base_radius(),
                    fiber.top_radius(),
                    core_n,
                    clad_n,
                )?;
                if let Some(diffusion) = fiber.diffusion() {
                    new_fiber = new_fiber.with_diffusion(diffusion)?;
                }
                Self::Cone(new_fiber)
            }
        };
        Ok(rebuilt)
    }
}

impl Display for FiberType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cylinder(_) => write!(f, "Cylinder"),
            Self::Cone(_) => write!(f, "Cone"),
        }
    }
}

impl Fiber for FiberType {
    fn core_radius(&self) -> Length {
        match self {
            Self::Cylinder(fiber) => fiber.core_radius(),
            Self::Cone(fiber) => fiber.core_radius(),
        }
    }
    fn radius_at(&self, z: Length) -> Length {
        match self {
            Self::Cylinder(fiber) => fiber.radius_at(z),
            Self::Cone(fiber) => fiber.radius_at(z),
        }
    }
    fn z_max(&self) -> Length {
        match self {
            Self::Cylinder(fiber) => fiber.z_max(),
            Self::Cone(fiber) => fiber.z_max(),
        }
    }
    fn refractive_indices(&self) -> (f64, f64) {
        match self {
            Self::Cylinder(fiber) => fiber.refractive_indices(),
            Self::Cone(fiber) => fiber.refractive_indices(),
        }
    }
    fn normal_at(&self, point: &Point3<Length>) -> Vector3<f64> {
        match self {
            Self::Cylinder(fiber) => fiber.normal_at(point),
            Self::Cone(fiber) => fiber.normal_at(point),
        }
    }
    fn diffusion(&self) -> Option<Angle> {
        match self {
            Self::Cylinder(fiber) => fiber.diffusion(),
            Self::Cone(fiber) => fiber.diffusion(),
        }
    }
    fn to_enum(&self) -> FiberType {
        self.clone()
    }
}

/// All fiber boundary shapes must implement this trait.
///
/// The tracing loop depends only on this capability set and never on the concrete
/// geometry fields.
pub trait Fiber {
    /// Constant transverse core radius the boundary intersection step solves against.
    ///
    /// For a tapered fiber this is the radius at the launch plane (z = 0); the shared
    /// intersection step treats the cross section as constant, which is a small-taper
    /// approximation.
    fn core_radius(&self) -> Length;
    /// Boundary radius of the fiber at the given axial position.
    fn radius_at(&self, z: Length) -> Length;
    /// Maximum axial length of the fiber.
    fn z_max(&self) -> Length;
    /// Refractive indices as a `(core, cladding)` pair.
    fn refractive_indices(&self) -> (f64, f64);
    /// Unit surface normal at a given point, directed from the boundary towards the
    /// fiber axis.
    ///
    /// The point is assumed to already lie on the boundary surface.
    fn normal_at(&self, point: &Point3<Length>) -> Vector3<f64>;
    /// Angular half-width of the diffuse-reflection perturbation, if configured.
    fn diffusion(&self) -> Option<Angle>;
    /// Critical angle of total internal reflection, `asin(clad_n / core_n)`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the indices are not positive and finite or
    /// if the cladding index exceeds the core index (the argument of asin would leave
    /// its domain).
    fn critical_angle(&self) -> FtrResult<Angle> {
        let (core_n, clad_n) = self.refractive_indices();
        if core_n <= 0.0 || !core_n.is_finite() || clad_n <= 0.0 || !clad_n.is_finite() {
            return Err(FibertraceError::Geometry(
                "refractive indices must be > 0.0 and finite".into(),
            ));
        }
        if clad_n > core_n {
            return Err(FibertraceError::Geometry(
                "cladding index must not exceed the core index".into(),
            ));
        }
        Ok(radian!((clad_n / core_n).asin()))
    }
    /// Create a corresponding [`FiberType`] value.
    fn to_enum(&self) -> FiberType;
}
