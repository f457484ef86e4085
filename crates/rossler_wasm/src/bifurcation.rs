//! Stepped and one-shot bifurcation sweeps.

use crate::system::component_from_index;
use rossler_core::bifurcation::{
    scan, BifurcationDiagram, BifurcationRunner, SweepProgress, SweepSettings,
};
use rossler_core::plot::{bifurcation_figure, Figure};
use rossler_core::trajectory::Component;
use rossler_core::RosslerError;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct BifurcationPayload {
    diagram: BifurcationDiagram,
    figure: Figure,
}

impl BifurcationPayload {
    fn new(diagram: BifurcationDiagram) -> Self {
        let figure = bifurcation_figure(&diagram);
        Self { diagram, figure }
    }
}

fn parse_settings(settings_val: JsValue) -> Result<SweepSettings, JsValue> {
    if settings_val.is_undefined() || settings_val.is_null() {
        return Ok(SweepSettings::default());
    }
    from_value(settings_val)
        .map_err(|e| JsValue::from_str(&format!("Invalid sweep settings: {}", e)))
}

/// WASM-exported runner for stepped bifurcation sweeps.
/// Runs batches of control-parameter values so the caller can report progress.
#[wasm_bindgen]
pub struct WasmBifurcationRunner {
    runner: Option<BifurcationRunner>,
}

impl WasmBifurcationRunner {
    pub(crate) fn from_settings(
        component: Component,
        settings: SweepSettings,
    ) -> Result<Self, RosslerError> {
        Ok(Self {
            runner: Some(BifurcationRunner::new(component, settings)?),
        })
    }

    pub(crate) fn advance(
        &mut self,
        batch_size: usize,
    ) -> Option<Result<SweepProgress, RosslerError>> {
        self.runner.as_mut().map(|runner| runner.run_steps(batch_size))
    }
}

#[wasm_bindgen]
impl WasmBifurcationRunner {
    /// Create a runner for component 0 (x), 1 (y) or 2 (z).
    /// Passing `undefined` for the settings uses the default sweep.
    #[wasm_bindgen(constructor)]
    pub fn new(
        component_index: usize,
        settings_val: JsValue,
    ) -> Result<WasmBifurcationRunner, JsValue> {
        console_error_panic_hook::set_once();

        let component = component_from_index(component_index)?;
        let settings = parse_settings(settings_val)?;
        Self::from_settings(component, settings)
            .map_err(|e| JsValue::from_str(&format!("Bifurcation sweep init failed: {}", e)))
    }

    pub fn is_done(&self) -> bool {
        self.runner.as_ref().map_or(true, |runner| runner.is_done())
    }

    /// Run a batch of integrations and return progress.
    pub fn run_steps(&mut self, batch_size: u32) -> Result<JsValue, JsValue> {
        let progress = self
            .advance(batch_size as usize)
            .ok_or_else(|| JsValue::from_str("Runner not initialized"))?
            .map_err(|e| JsValue::from_str(&format!("Bifurcation step failed: {}", e)))?;

        to_value(&progress).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    pub fn get_progress(&self) -> Result<JsValue, JsValue> {
        let runner = self
            .runner
            .as_ref()
            .ok_or_else(|| JsValue::from_str("Runner not initialized"))?;

        to_value(&runner.progress())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Take the diagram and its scatter figure. The runner is empty afterwards.
    pub fn get_result(&mut self) -> Result<JsValue, JsValue> {
        let runner = self
            .runner
            .take()
            .ok_or_else(|| JsValue::from_str("Runner not initialized"))?;

        let payload = BifurcationPayload::new(runner.take_result());
        to_value(&payload).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}

/// Runs a whole sweep in one call.
#[wasm_bindgen]
pub fn compute_bifurcation_diagram(
    component_index: usize,
    settings_val: JsValue,
) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let component = component_from_index(component_index)?;
    let settings = parse_settings(settings_val)?;
    let diagram = scan(component, &settings)
        .map_err(|e| JsValue::from_str(&format!("Bifurcation sweep failed: {}", e)))?;

    to_value(&BifurcationPayload::new(diagram))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rossler_core::integrator::IntegratorSettings;

    fn small_sweep() -> SweepSettings {
        SweepSettings {
            samples: 5,
            integrator: IntegratorSettings::default()
                .with_dt(0.05)
                .with_total_time(100.0),
            ..SweepSettings::default()
        }
    }

    #[test]
    fn runner_advances_in_batches_until_done() {
        let mut runner =
            WasmBifurcationRunner::from_settings(Component::Z, small_sweep()).expect("runner");
        assert!(!runner.is_done());

        let progress = runner.advance(2).expect("runner").expect("batch");
        assert_eq!(progress.completed, 2);
        assert_eq!(progress.total, 5);
        assert!(!progress.done);

        let progress = runner.advance(10).expect("runner").expect("batch");
        assert!(progress.done);
        assert!(progress.points >= 5);
        assert!(runner.is_done());
    }

    #[test]
    fn runner_rejects_invalid_settings() {
        let mut settings = small_sweep();
        settings.samples = 0;
        assert!(WasmBifurcationRunner::from_settings(Component::X, settings).is_err());
    }

    #[test]
    fn emptied_runner_reports_done() {
        let runner = WasmBifurcationRunner { runner: None };
        assert!(runner.is_done());
    }
}
