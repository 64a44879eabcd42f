//! This is the documentation for the **fibertrace** crate.
//!
//! **fibertrace** simulates light-ray propagation inside optical fiber waveguides under
//! the geometric-optics (ray) approximation: a ray launched inside the core boundary of
//! a straight ([`FiberCylinder`](fiber::FiberCylinder)) or tapered
//! ([`FiberCone`](fiber::FiberCone)) fiber bounces by total internal reflection until
//! it exits through the end face, is angularly eliminated, or exhausts its reflection
//! budget. Wave-optics effects (diffraction, interference, polarization, dispersion)
//! and material absorption are not modeled, and rays are independent of each other.
//!
//! A single trace is strictly sequential and pure apart from an injected random
//! generator, so batches of rays through the same (read-only) fiber can be parallelized
//! and seeded by the caller.
//!
//! # Example
//!
//! ```rust
//! use fibertrace::{degree, meter, micrometer};
//! use fibertrace::fiber::FiberCylinder;
//! use fibertrace::ray::Ray;
//! use fibertrace::trajectory::{TraceConfig, Trajectory};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let fiber = FiberCylinder::new(
//!     micrometer!(100.0),
//!     micrometer!(120.0),
//!     1.48,
//!     1.46,
//!     meter!(1.0),
//! )
//! .unwrap();
//! let ray = Ray::new(degree!(0.0), degree!(5.0), meter!(0.0, 0.0, 0.0));
//! let mut rng = StdRng::seed_from_u64(42);
//! let trajectory = Trajectory::trace(&fiber, ray, &TraceConfig::default(), &mut rng).unwrap();
//! assert!(trajectory.nr_of_points() >= 2);
//! ```
#![allow(clippy::module_name_repetitions)]

pub mod document;
pub mod error;
pub mod fiber;
pub mod ray;
pub mod trajectory;
pub mod utils;

pub use document::SimDocument;
