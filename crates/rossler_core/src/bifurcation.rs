//! Bifurcation scans: local maxima of one component as the control parameter `c` varies.
//!
//! Every value of `c` gets its own [`Integrator`]; the trajectory is reduced to its maxima and
//! dropped before the next run, so peak memory stays at one run (per worker when parallel).

use crate::error::{Result, RosslerError};
use crate::integrator::{Integrator, IntegratorSettings};
use crate::maxima::find_maxima;
use crate::trajectory::Component;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepSettings {
    pub c_min: f64,
    pub c_max: f64,
    pub samples: usize,
    pub integrator: IntegratorSettings,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            c_min: 2.0,
            c_max: 6.0,
            samples: 4000,
            integrator: IntegratorSettings {
                dt: 0.05,
                ..IntegratorSettings::default()
            },
        }
    }
}

impl SweepSettings {
    /// Evenly spaced control-parameter values over `[c_min, c_max]`.
    pub fn c_values(&self) -> Result<Vec<f64>> {
        if !self.c_min.is_finite() {
            return Err(RosslerError::invalid("c_min", self.c_min, "must be finite"));
        }
        if !self.c_max.is_finite() || self.c_max < self.c_min {
            return Err(RosslerError::invalid(
                "c_max",
                self.c_max,
                "must be finite and not below c_min",
            ));
        }
        if self.samples == 0 {
            return Err(RosslerError::invalid(
                "samples",
                0.0,
                "sweep needs at least one value",
            ));
        }
        if self.samples == 1 {
            return Ok(vec![self.c_min]);
        }

        let step = (self.c_max - self.c_min) / (self.samples - 1) as f64;
        let mut values: Vec<f64> = (0..self.samples)
            .map(|i| self.c_min + i as f64 * step)
            .collect();
        if let Some(last) = values.last_mut() {
            *last = self.c_max;
        }
        Ok(values)
    }

    fn validate(&self) -> Result<Vec<f64>> {
        self.integrator.step_count()?;
        self.c_values()
    }
}

/// One `(c, maximum)` pair of the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BifurcationPoint {
    pub c: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BifurcationDiagram {
    pub component: Component,
    /// Number of integration runs performed.
    pub runs: usize,
    pub points: Vec<BifurcationPoint>,
}

impl BifurcationDiagram {
    fn new(component: Component) -> Self {
        Self {
            component,
            runs: 0,
            points: Vec::new(),
        }
    }

    fn push_run(&mut self, c: f64, maxima: Vec<f64>) {
        self.runs += 1;
        self.points
            .extend(maxima.into_iter().map(|value| BifurcationPoint { c, value }));
    }

    /// Splits the points into parallel `(c, value)` sequences for plotting.
    pub fn columns(&self) -> (Vec<f64>, Vec<f64>) {
        self.points.iter().map(|p| (p.c, p.value)).unzip()
    }
}

/// Maxima of one component for a single control-parameter value.
pub fn maxima_for_parameter(
    c: f64,
    component: Component,
    settings: IntegratorSettings,
) -> Result<Vec<f64>> {
    let integrator = Integrator::new(c, settings)?;
    let series = integrator.run_component(component);
    find_maxima(&series)
}

/// Runs the sweep sequentially, in increasing `c`.
pub fn scan(component: Component, settings: &SweepSettings) -> Result<BifurcationDiagram> {
    let c_values = settings.validate()?;
    let mut diagram = BifurcationDiagram::new(component);
    for c in c_values {
        let maxima = maxima_for_parameter(c, component, settings.integrator)?;
        diagram.push_run(c, maxima);
    }
    info!(
        component = component.label(),
        runs = diagram.runs,
        points = diagram.points.len(),
        "bifurcation scan complete"
    );
    Ok(diagram)
}

/// Same result as [`scan`], with the runs distributed over the rayon thread pool.
#[cfg(feature = "parallel")]
pub fn scan_parallel(component: Component, settings: &SweepSettings) -> Result<BifurcationDiagram> {
    let c_values = settings.validate()?;
    let per_run: Vec<Vec<f64>> = c_values
        .par_iter()
        .map(|&c| maxima_for_parameter(c, component, settings.integrator))
        .collect::<Result<_>>()?;

    let mut diagram = BifurcationDiagram::new(component);
    for (c, maxima) in c_values.into_iter().zip(per_run) {
        diagram.push_run(c, maxima);
    }
    info!(
        component = component.label(),
        runs = diagram.runs,
        points = diagram.points.len(),
        "parallel bifurcation scan complete"
    );
    Ok(diagram)
}

/// Default sweep (`c` in [2, 6], 4000 values, `dt = 0.05`) for component 0, 1 or 2.
pub fn maxima_diagram(component_index: usize) -> Result<BifurcationDiagram> {
    let component = Component::from_index(component_index)?;
    scan(component, &SweepSettings::default())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepProgress {
    pub done: bool,
    pub completed: usize,
    pub total: usize,
    pub points: usize,
    /// Last control-parameter value processed, if any.
    pub current_c: Option<f64>,
}

/// Runs a sweep in caller-sized batches so a frontend can report progress.
pub struct BifurcationRunner {
    settings: SweepSettings,
    c_values: Vec<f64>,
    next: usize,
    diagram: BifurcationDiagram,
}

impl BifurcationRunner {
    pub fn new(component: Component, settings: SweepSettings) -> Result<Self> {
        let c_values = settings.validate()?;
        Ok(Self {
            settings,
            c_values,
            next: 0,
            diagram: BifurcationDiagram::new(component),
        })
    }

    pub fn is_done(&self) -> bool {
        self.next >= self.c_values.len()
    }

    /// Integrates up to `batch_size` further values of `c`.
    pub fn run_steps(&mut self, batch_size: usize) -> Result<SweepProgress> {
        let end = self.next.saturating_add(batch_size).min(self.c_values.len());
        while self.next < end {
            let c = self.c_values[self.next];
            let maxima =
                maxima_for_parameter(c, self.diagram.component, self.settings.integrator)?;
            self.diagram.push_run(c, maxima);
            self.next += 1;
        }
        debug!(
            completed = self.next,
            total = self.c_values.len(),
            "bifurcation batch finished"
        );
        Ok(self.progress())
    }

    pub fn progress(&self) -> SweepProgress {
        SweepProgress {
            done: self.is_done(),
            completed: self.next,
            total: self.c_values.len(),
            points: self.diagram.points.len(),
            current_c: self.next.checked_sub(1).map(|i| self.c_values[i]),
        }
    }

    /// Returns the diagram accumulated so far.
    pub fn take_result(self) -> BifurcationDiagram {
        self.diagram
    }
}
