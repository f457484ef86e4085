//! The Rössler vector field.
//!
//! ```text
//! dx/dt = -y - z
//! dy/dt = x + a y
//! dz/dt = b + z (x - c)
//! ```

use crate::traits::DynamicalSystem;
use serde::{Deserialize, Serialize};

/// Fixed value of both `a` and `b`.
pub const DEFAULT_AB: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rossler {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Rossler {
    /// Builds the system with `a = b = 0.2` and the given control parameter.
    pub fn new(c: f64) -> Self {
        Self {
            a: DEFAULT_AB,
            b: DEFAULT_AB,
            c,
        }
    }

    pub fn x_dot(&self, _t: f64, _x: f64, y: f64, z: f64) -> f64 {
        -y - z
    }

    pub fn y_dot(&self, _t: f64, x: f64, y: f64, _z: f64) -> f64 {
        x + self.a * y
    }

    pub fn z_dot(&self, _t: f64, x: f64, _y: f64, z: f64) -> f64 {
        self.b + z * (x - self.c)
    }
}

impl DynamicalSystem<f64> for Rossler {
    fn dimension(&self) -> usize {
        3
    }

    fn apply(&self, t: f64, x: &[f64], out: &mut [f64]) {
        let (px, py, pz) = (x[0], x[1], x[2]);
        out[0] = self.x_dot(t, px, py, pz);
        out[1] = self.y_dot(t, px, py, pz);
        out[2] = self.z_dot(t, px, py, pz);
    }
}
