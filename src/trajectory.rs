#![warn(missing_docs)]
//! Module for simulating the full trajectory of a ray inside a fiber
//!
//! A trajectory is produced by repeatedly intersecting the ray with the fiber boundary
//! and mirror-reflecting it there until one of three terminal conditions is met: the ray
//! leaves through the fiber end face ([`TerminationReason::ReachedMaxLength`]), its
//! confinement angle drops below the critical angle of total internal reflection
//! ([`TerminationReason::ExceededCriticalAngle`]), or the configured reflection budget
//! runs out ([`TerminationReason::ExceededReflectionBudget`]).
use std::f64::consts::FRAC_PI_2;
use std::fmt::Display;

use log::info;
use nalgebra::Point3;
use num::Zero;
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::EnumIter;
use uom::si::{
    angle::degree,
    f64::{Angle, Length},
};

use crate::error::{FibertraceError, FtrResult};
use crate::fiber::Fiber;
use crate::ray::Ray;
use crate::{meter, radian};

/// Reason why a traced ray stopped propagating
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumIter)]
pub enum TerminationReason {
    /// the ray left the fiber through the end face at its maximum axial length
    ReachedMaxLength,
    /// the confinement angle dropped below the critical angle, the ray is no longer
    /// held by total internal reflection
    ExceededCriticalAngle,
    /// the maximum number of reflections was reached without another terminal condition
    ExceededReflectionBudget,
}
impl Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReachedMaxLength => write!(f, "reached max length"),
            Self::ExceededCriticalAngle => write!(f, "exceeded critical angle"),
            Self::ExceededReflectionBudget => write!(f, "exceeded reflection budget"),
        }
    }
}

/// Configuration data for a trajectory simulation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TraceConfig {
    max_reflections: usize,
    angle_elimination: bool,
    log_termination: bool,
}
impl Default for TraceConfig {
    /// Create a default config for a trajectory simulation with the following parameters:
    ///   - maximum number of reflections: `1000`
    ///   - critical-angle elimination: enabled
    ///   - termination logging: disabled
    fn default() -> Self {
        Self {
            max_reflections: 1000,
            angle_elimination: true,
            log_termination: false,
        }
    }
}
impl TraceConfig {
    /// Returns the maximum number of reflections of this [`TraceConfig`].
    #[must_use]
    pub const fn max_reflections(&self) -> usize {
        self.max_reflections
    }
    /// Sets the maximum number of reflections (including the start entry of the
    /// recorded trajectory).
    ///
    /// # Errors
    ///
    /// This function will return an error if the given budget is zero.
    pub fn set_max_reflections(&mut self, max_reflections: usize) -> FtrResult<()> {
        if max_reflections.is_zero() {
            return Err(FibertraceError::Other(
                "maximum number of reflections must be >= 1".into(),
            ));
        }
        self.max_reflections = max_reflections;
        Ok(())
    }
    /// Returns `true` if rays are eliminated once their confinement angle drops below
    /// the critical angle.
    #[must_use]
    pub const fn angle_elimination(&self) -> bool {
        self.angle_elimination
    }
    /// Enable or disable critical-angle elimination.
    pub fn set_angle_elimination(&mut self, angle_elimination: bool) {
        self.angle_elimination = angle_elimination;
    }
    /// Returns `true` if human-readable termination explanations are emitted on the log
    /// side channel.
    #[must_use]
    pub const fn log_termination(&self) -> bool {
        self.log_termination
    }
    /// Enable or disable termination logging.
    pub fn set_log_termination(&mut self, log_termination: bool) {
        self.log_termination = log_termination;
    }
}

/// Propagation angles recorded at one reflection of a trajectory.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TraceAngles {
    azimuth: Angle,
    latitude: Angle,
    incidence: Angle,
}
impl TraceAngles {
    /// Creates a new [`TraceAngles`] triple.
    #[must_use]
    pub const fn new(azimuth: Angle, latitude: Angle, incidence: Angle) -> Self {
        Self {
            azimuth,
            latitude,
            incidence,
        }
    }
    /// Returns the azimuth angle after the reflection.
    #[must_use]
    pub const fn azimuth(&self) -> Angle {
        self.azimuth
    }
    /// Returns the latitude angle after the reflection.
    #[must_use]
    pub const fn latitude(&self) -> Angle {
        self.latitude
    }
    /// Returns the magnitude of the incidence product `v·n` at the reflection,
    /// interpreted as an angle in radians.
    #[must_use]
    pub const fn incidence(&self) -> Angle {
        self.incidence
    }
}
impl Default for TraceAngles {
    fn default() -> Self {
        Self::new(Angle::zero(), Angle::zero(), Angle::zero())
    }
}

/// The recorded trajectory of a single ray, read-only after creation.
///
/// Both sequences have the full capacity of the configured reflection budget; entries
/// beyond [`Trajectory::nr_of_points`] are zero-filled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trajectory {
    points: Vec<Point3<Length>>,
    angles: Vec<TraceAngles>,
    nr_of_points: usize,
    reason: TerminationReason,
}
impl Trajectory {
    /// Trace a single ray through the given fiber.
    ///
    /// The trajectory's first entry is the ray's start point with its initial angles and
    /// an incidence angle of zero. Each step intersects the ray with the fiber core
    /// boundary, clips to the end face if the fiber length is exceeded, and otherwise
    /// mirror-reflects the ray at the boundary. If the fiber specifies a diffusion
    /// angle, an independent perturbation drawn uniformly from `[-d, +d]` is added to
    /// both reflected angles. An axis-parallel ray never progresses transversally and
    /// terminates at the end face directly.
    ///
    /// The function is pure apart from the injected random generator: the fiber is only
    /// read, so batches of independent rays can be traced in parallel by the caller.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///  - the configured reflection budget is zero
    ///  - the critical angle is undefined for the fiber's refractive indices
    ///  - the ray does not reach the core boundary from its current position
    pub fn trace<F: Fiber, R: Rng + ?Sized>(
        fiber: &F,
        ray: Ray,
        config: &TraceConfig,
        rng: &mut R,
    ) -> FtrResult<Self> {
        let max_reflections = config.max_reflections();
        if max_reflections.is_zero() {
            return Err(FibertraceError::Other(
                "maximum number of reflections must be >= 1".into(),
            ));
        }
        let critical_angle = fiber.critical_angle()?;
        let z_max = fiber.z_max();
        let mut ray = ray;
        let mut points = vec![meter!(0.0, 0.0, 0.0); max_reflections];
        let mut angles = vec![TraceAngles::default(); max_reflections];
        points[0] = ray.start_point();
        angles[0] = TraceAngles::new(ray.azimuth(), ray.latitude(), Angle::zero());
        let mut incidence = ray.latitude().value;
        for i in 1..max_reflections {
            if ray.latitude().is_zero() {
                points[i] = Point3::new(ray.start_point().x, ray.start_point().y, z_max);
                angles[i] =
                    TraceAngles::new(ray.azimuth(), ray.latitude(), radian!(incidence.abs()));
                if config.log_termination() {
                    info!("ray reached the maximum fiber length");
                }
                return Ok(Self {
                    points,
                    angles,
                    nr_of_points: i + 1,
                    reason: TerminationReason::ReachedMaxLength,
                });
            }
            let intersection = ray.intersect(fiber.core_radius())?;
            if intersection.z > z_max {
                let dir = ray.direction();
                let overshoot = intersection.z - z_max;
                points[i] = Point3::new(
                    intersection.x - overshoot * (dir.x / dir.z),
                    intersection.y - overshoot * (dir.y / dir.z),
                    intersection.z - overshoot,
                );
                angles[i] =
                    TraceAngles::new(ray.azimuth(), ray.latitude(), radian!(incidence.abs()));
                if config.log_termination() {
                    info!("ray reached the maximum fiber length");
                }
                return Ok(Self {
                    points,
                    angles,
                    nr_of_points: i + 1,
                    reason: TerminationReason::ReachedMaxLength,
                });
            }
            let normal = fiber.normal_at(&intersection);
            let (mut azimuth, mut latitude, new_incidence) = ray.reflect(&normal);
            incidence = new_incidence;
            if let Some(diffusion) = fiber.diffusion() {
                azimuth += diffusion * ((rng.random::<f64>() - 0.5) * 2.0);
                latitude += diffusion * ((rng.random::<f64>() - 0.5) * 2.0);
            }
            points[i] = intersection;
            angles[i] = TraceAngles::new(azimuth, latitude, radian!(incidence.abs()));
            if config.angle_elimination()
                && FRAC_PI_2 - incidence.abs() < critical_angle.value
            {
                if config.log_termination() {
                    info!(
                        "ray angularly eliminated, critical angle: {:.4}°, confinement angle: {:.4}°",
                        critical_angle.get::<degree>(),
                        (FRAC_PI_2 - incidence.abs()).to_degrees()
                    );
                }
                return Ok(Self {
                    points,
                    angles,
                    nr_of_points: i + 1,
                    reason: TerminationReason::ExceededCriticalAngle,
                });
            }
            ray.set_values(azimuth, latitude, intersection);
        }
        if config.log_termination() {
            info!("ray exceeded the reflection budget of {max_reflections}");
        }
        Ok(Self {
            points,
            angles,
            nr_of_points: max_reflections,
            reason: TerminationReason::ExceededReflectionBudget,
        })
    }
    /// Returns the recorded reflection points, zero-filled beyond
    /// [`Trajectory::nr_of_points`].
    #[must_use]
    pub fn points(&self) -> &[Point3<Length>] {
        &self.points
    }
    /// Returns the recorded angle triples, zero-filled beyond
    /// [`Trajectory::nr_of_points`].
    #[must_use]
    pub fn angles(&self) -> &[TraceAngles] {
        &self.angles
    }
    /// Returns the angle triples as `[azimuth, latitude, incidence]` rows in degrees.
    #[must_use]
    pub fn angles_in_degrees(&self) -> Vec<[f64; 3]> {
        self.angles
            .iter()
            .map(|a| {
                [
                    a.azimuth().get::<degree>(),
                    a.latitude().get::<degree>(),
                    a.incidence().get::<degree>(),
                ]
            })
            .collect()
    }
    /// Returns the number of populated trajectory entries, including the start point.
    #[must_use]
    pub const fn nr_of_points(&self) -> usize {
        self.nr_of_points
    }
    /// Returns the reason why the traced ray stopped propagating.
    #[must_use]
    pub const fn reason(&self) -> TerminationReason {
        self.reason
    }
}
