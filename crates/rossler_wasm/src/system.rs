//! Single-trajectory wrapper: integrate once, then hand series and figures to JS.

use rossler_core::integrator::{Integrator, IntegratorSettings};
use rossler_core::maxima::find_maxima;
use rossler_core::plot::{
    phase_portrait, phase_portrait_3d, time_series_figure, trajectory_figures,
};
use rossler_core::trajectory::{Component, Trajectory};
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmRossler {
    integrator: Integrator,
    trajectory: Option<Trajectory>,
}

pub(crate) fn component_from_index(index: usize) -> Result<Component, JsValue> {
    Component::from_index(index)
        .map_err(|e| JsValue::from_str(&format!("Unknown component: {}", e)))
}

impl WasmRossler {
    pub(crate) fn from_settings(c: f64, settings: IntegratorSettings) -> Result<Self, JsValue> {
        let integrator = Integrator::new(c, settings)
            .map_err(|e| JsValue::from_str(&format!("Invalid integrator settings: {}", e)))?;
        Ok(Self {
            integrator,
            trajectory: None,
        })
    }

    fn trajectory(&self) -> Result<&Trajectory, JsValue> {
        self.trajectory
            .as_ref()
            .ok_or_else(|| JsValue::from_str("Trajectory not computed; call run() first"))
    }
}

#[wasm_bindgen]
impl WasmRossler {
    #[wasm_bindgen(constructor)]
    pub fn new(
        c: f64,
        dt: f64,
        transient_time: f64,
        total_time: f64,
    ) -> Result<WasmRossler, JsValue> {
        console_error_panic_hook::set_once();

        let settings = IntegratorSettings {
            dt,
            transient_time,
            total_time,
            ..IntegratorSettings::default()
        };
        Self::from_settings(c, settings)
    }

    /// Builds from a settings object; missing fields take their defaults.
    pub fn with_settings(c: f64, settings_val: JsValue) -> Result<WasmRossler, JsValue> {
        console_error_panic_hook::set_once();

        let settings: IntegratorSettings =
            if settings_val.is_undefined() || settings_val.is_null() {
                IntegratorSettings::default()
            } else {
                from_value(settings_val).map_err(|e| {
                    JsValue::from_str(&format!("Invalid integrator settings: {}", e))
                })?
            };
        Self::from_settings(c, settings)
    }

    pub fn c(&self) -> f64 {
        self.integrator.system().c
    }

    pub fn num(&self) -> usize {
        self.integrator.num()
    }

    /// Integrates from the origin, replacing any previous trajectory.
    pub fn run(&mut self) {
        self.trajectory = Some(self.integrator.run());
    }

    pub fn has_run(&self) -> bool {
        self.trajectory.is_some()
    }

    pub fn get_time(&self) -> Vec<f64> {
        self.integrator.time().to_vec()
    }

    pub fn get_component(&self, index: usize) -> Result<Vec<f64>, JsValue> {
        let component = component_from_index(index)?;
        Ok(self.trajectory()?.component(component).to_vec())
    }

    pub fn find_maxima(&self, index: usize) -> Result<Vec<f64>, JsValue> {
        let component = component_from_index(index)?;
        find_maxima(self.trajectory()?.component(component))
            .map_err(|e| JsValue::from_str(&format!("Maxima search failed: {}", e)))
    }

    pub fn get_trajectory(&self) -> Result<JsValue, JsValue> {
        to_value(self.trajectory()?)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    pub fn time_series_figure(&self, index: usize) -> Result<JsValue, JsValue> {
        let component = component_from_index(index)?;
        let figure = time_series_figure(self.trajectory()?, component);
        to_value(&figure).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    pub fn phase_portrait(&self, horizontal: usize, vertical: usize) -> Result<JsValue, JsValue> {
        let figure = phase_portrait(
            self.trajectory()?,
            component_from_index(horizontal)?,
            component_from_index(vertical)?,
        )
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
        to_value(&figure).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    pub fn phase_portrait_3d(&self) -> Result<JsValue, JsValue> {
        let figure = phase_portrait_3d(self.trajectory()?);
        to_value(&figure).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// All seven trajectory figures in display order.
    pub fn figures(&self) -> Result<JsValue, JsValue> {
        let figures = trajectory_figures(self.trajectory()?)
            .map_err(|e| JsValue::from_str(&format!("Failed to build figures: {:#}", e)))?;
        to_value(&figures).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}
