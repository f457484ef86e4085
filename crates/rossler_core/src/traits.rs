use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// Floating-point element type of states and step sizes.
///
/// `Send + Sync` so solvers and systems can move into parallel sweep workers.
pub trait Scalar: Float + FromPrimitive + Debug + Send + Sync + 'static {}

impl<T: Float + FromPrimitive + Debug + Send + Sync + 'static> Scalar for T {}

/// Autonomous or time-dependent ODE right-hand side, `dx/dt = f(t, x)`.
pub trait DynamicalSystem<T: Scalar> {
    /// Length of the state vector, e.g. 3 for (x, y, z).
    fn dimension(&self) -> usize;

    /// Writes `f(t, x)` into `out`; `out.len() == x.len() == self.dimension()`.
    fn apply(&self, t: T, x: &[T], out: &mut [T]);
}

/// Fixed-step integration scheme advancing a flow in place.
pub trait Steppable<T: Scalar> {
    /// Moves `state` from `t` to `t + dt` and advances `t` to match.
    fn step(&mut self, system: &impl DynamicalSystem<T>, t: &mut T, state: &mut [T], dt: T);
}

#[cfg(test)]
mod tests {
    use super::{DynamicalSystem, Scalar, Steppable};
    use crate::solvers::RK4;

    struct Rotation;

    impl<T: Scalar> DynamicalSystem<T> for Rotation {
        fn dimension(&self) -> usize {
            2
        }

        fn apply(&self, _t: T, x: &[T], out: &mut [T]) {
            out[0] = -x[1];
            out[1] = x[0];
        }
    }

    fn quarter_turn<T: Scalar>(steps: usize) -> (T, T) {
        let mut solver = RK4::<T>::new(2);
        let quarter = T::from_f64(std::f64::consts::FRAC_PI_2).expect("constant");
        let dt = quarter / T::from_usize(steps).expect("steps");
        let mut t = T::zero();
        let mut state = [T::one(), T::zero()];
        for _ in 0..steps {
            solver.step(&Rotation, &mut t, &mut state, dt);
        }
        (state[0], state[1])
    }

    #[test]
    fn flow_runs_at_single_and_double_precision() {
        let (x64, y64) = quarter_turn::<f64>(100);
        assert!(x64.abs() < 1e-6);
        assert!((y64 - 1.0).abs() < 1e-6);

        let (x32, y32) = quarter_turn::<f32>(100);
        assert!(x32.abs() < 1e-4);
        assert!((y32 - 1.0).abs() < 1e-4);
    }
}
