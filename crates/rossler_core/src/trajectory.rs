use crate::error::{Result, RosslerError};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Selects one of the three state variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    X,
    Y,
    Z,
}

impl Component {
    pub const ALL: [Component; 3] = [Component::X, Component::Y, Component::Z];

    /// Maps 0, 1, 2 to x, y, z.
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(RosslerError::IndexOutOfRange { index, len: 3 })
    }

    pub fn index(self) -> usize {
        match self {
            Component::X => 0,
            Component::Y => 1,
            Component::Z => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Component::X => "x",
            Component::Y => "y",
            Component::Z => "z",
        }
    }
}

/// Post-transient index window `[len / 2, len - 1)`.
///
/// The final sample is left out, matching how the analysis half has always been sliced.
/// Returns an empty range for series shorter than three samples.
pub fn analysis_window(len: usize) -> Range<usize> {
    let start = len / 2;
    let end = len.saturating_sub(1);
    start..end.max(start)
}

/// Time series produced by one integration run. Index 0 holds the initial condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    t: Vec<f64>,
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

impl Trajectory {
    pub(crate) fn new(t: Vec<f64>, x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Self {
        debug_assert!(t.len() == x.len() && x.len() == y.len() && y.len() == z.len());
        Self { t, x, y, z }
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn time(&self) -> &[f64] {
        &self.t
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn z(&self) -> &[f64] {
        &self.z
    }

    pub fn component(&self, component: Component) -> &[f64] {
        match component {
            Component::X => &self.x,
            Component::Y => &self.y,
            Component::Z => &self.z,
        }
    }

    /// Consumes the trajectory, keeping a single component.
    pub fn into_component(self, component: Component) -> Vec<f64> {
        match component {
            Component::X => self.x,
            Component::Y => self.y,
            Component::Z => self.z,
        }
    }

    /// Returns `(x, y, z)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        (self.x, self.y, self.z)
    }

    /// The selected component restricted to [`analysis_window`].
    pub fn second_half(&self, component: Component) -> &[f64] {
        &self.component(component)[analysis_window(self.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::{analysis_window, Component, Trajectory};
    use crate::error::RosslerError;

    #[test]
    fn component_from_index_round_trips_and_rejects_out_of_range() {
        for component in Component::ALL {
            assert_eq!(Component::from_index(component.index()), Ok(component));
        }
        assert_eq!(
            Component::from_index(3),
            Err(RosslerError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn analysis_window_uses_floor_division_and_drops_last_sample() {
        assert_eq!(analysis_window(10), 5..9);
        assert_eq!(analysis_window(11), 5..10);
        assert_eq!(analysis_window(3), 1..2);
        assert!(analysis_window(2).is_empty());
        assert!(analysis_window(0).is_empty());
    }

    #[test]
    fn second_half_slices_requested_component() {
        let t: Vec<f64> = (0..6).map(|i| i as f64).collect();
        let x: Vec<f64> = (0..6).map(|i| i as f64 * 10.0).collect();
        let trajectory = Trajectory::new(t, x, vec![0.0; 6], vec![1.0; 6]);

        assert_eq!(trajectory.second_half(Component::X), &[30.0, 40.0]);
        assert_eq!(trajectory.second_half(Component::Z), &[1.0, 1.0]);
        assert_eq!(trajectory.into_component(Component::X).len(), 6);
    }
}
