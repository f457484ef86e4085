//! Fixed-step RK4 integration of the Rössler system from the origin.

use crate::error::{Result, RosslerError};
use crate::rossler::Rossler;
use crate::solvers::RK4;
use crate::trajectory::{Component, Trajectory};
use crate::traits::Steppable;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Time-grid settings for a single integration run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegratorSettings {
    pub dt: f64,
    /// Nominal transient duration. Carried along but never read by the integration.
    pub transient_time: f64,
    pub total_time: f64,
}

impl Default for IntegratorSettings {
    fn default() -> Self {
        Self {
            dt: 0.001,
            transient_time: 250.0,
            total_time: 500.0,
        }
    }
}

impl IntegratorSettings {
    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    pub fn with_total_time(mut self, total_time: f64) -> Self {
        self.total_time = total_time;
        self
    }

    /// Validates the settings and returns `floor(total_time / dt)`. `transient_time` is not checked.
    pub fn step_count(&self) -> Result<usize> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(RosslerError::invalid("dt", self.dt, "must be positive and finite"));
        }
        if !self.total_time.is_finite() || self.total_time <= 0.0 {
            return Err(RosslerError::invalid(
                "total_time",
                self.total_time,
                "must be positive and finite",
            ));
        }
        let num = (self.total_time / self.dt).floor();
        if !num.is_finite() || num > usize::MAX as f64 {
            return Err(RosslerError::invalid(
                "total_time",
                self.total_time,
                "step count overflows",
            ));
        }
        let num = num as usize;
        if num < 2 {
            return Err(RosslerError::invalid(
                "total_time",
                self.total_time,
                "must span at least two grid points",
            ));
        }
        Ok(num)
    }
}

/// `num` evenly spaced points over `[0, end]`, both endpoints included.
fn linspace(end: f64, num: usize) -> Vec<f64> {
    let step = end / (num - 1) as f64;
    let mut grid: Vec<f64> = (0..num).map(|i| i as f64 * step).collect();
    if let Some(last) = grid.last_mut() {
        *last = end;
    }
    grid
}

/// Integrates the Rössler system for one value of the control parameter.
#[derive(Debug, Clone)]
pub struct Integrator {
    system: Rossler,
    settings: IntegratorSettings,
    time: Vec<f64>,
}

impl Integrator {
    pub fn new(c: f64, settings: IntegratorSettings) -> Result<Self> {
        if !c.is_finite() {
            return Err(RosslerError::invalid("c", c, "must be finite"));
        }
        let num = settings.step_count()?;
        Ok(Self {
            system: Rossler::new(c),
            settings,
            time: linspace(settings.total_time, num),
        })
    }

    /// Integrator with the default time grid (`dt = 0.001`, `T = 500`).
    pub fn with_defaults(c: f64) -> Result<Self> {
        Self::new(c, IntegratorSettings::default())
    }

    pub fn system(&self) -> &Rossler {
        &self.system
    }

    pub fn settings(&self) -> &IntegratorSettings {
        &self.settings
    }

    /// Number of grid points, `floor(T / dt)`.
    pub fn num(&self) -> usize {
        self.time.len()
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Runs RK4 over the whole grid starting at the origin.
    pub fn run(&self) -> Trajectory {
        let num = self.num();
        let mut x = vec![0.0; num];
        let mut y = vec![0.0; num];
        let mut z = vec![0.0; num];
        self.integrate(|i, state| {
            x[i] = state[0];
            y[i] = state[1];
            z[i] = state[2];
        });
        Trajectory::new(self.time.clone(), x, y, z)
    }

    /// Runs the integration and keeps only one component.
    pub fn run_component(&self, component: Component) -> Vec<f64> {
        let idx = component.index();
        let mut series = vec![0.0; self.num()];
        self.integrate(|i, state| series[i] = state[idx]);
        series
    }

    fn integrate(&self, mut record: impl FnMut(usize, &[f64; 3])) {
        let num = self.num();
        let dt = self.settings.dt;
        let mut solver = RK4::new(3);
        let mut state = [0.0_f64; 3];

        debug!(c = self.system.c, dt, num, "integrating Rössler system");

        for i in 1..num {
            let mut t = self.time[i - 1];
            solver.step(&self.system, &mut t, &mut state, dt);
            record(i, &state);
        }

        if state.iter().any(|v| !v.is_finite()) {
            warn!(
                c = self.system.c,
                dt,
                "trajectory diverged to a non-finite state"
            );
        }
    }
}
