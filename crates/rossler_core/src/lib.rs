//! The `rossler_core` crate integrates the Rössler system with a fixed-step RK4 scheme and
//! turns sweeps of the control parameter `c` into bifurcation data.
//!
//! Key components:
//! - **Traits**: `Scalar`, `DynamicalSystem` (vector fields) and `Steppable` (solvers).
//! - **Solvers**: the RK4 stepper, with the final stage sampled at the midpoint time by default.
//! - **Integrator**: runs one trajectory from the origin over a fixed time grid.
//! - **Maxima / Bifurcation**: local-maxima extraction and parameter sweeps (sequential,
//!   parallel with the `parallel` feature, or stepped in batches).
//! - **Plot**: figure descriptions for an external renderer; no drawing happens here.

pub mod bifurcation;
pub mod error;
pub mod integrator;
pub mod maxima;
pub mod plot;
pub mod rossler;
pub mod solvers;
pub mod trajectory;
pub mod traits;

pub use error::RosslerError;
