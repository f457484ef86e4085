//! WASM bridge exposing the Rössler integrator and bifurcation scanner to a JS plotting frontend.

mod bifurcation;
mod system;

pub use bifurcation::{compute_bifurcation_diagram, WasmBifurcationRunner};
pub use system::WasmRossler;
