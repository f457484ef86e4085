use crate::traits::{DynamicalSystem, Scalar, Steppable};

/// Time at which the fourth RK4 stage samples the vector field.
///
/// By default k4 is evaluated at `t + dt/2`. For autonomous systems such as the
/// Rössler flow the time argument is ignored and both placements agree bit for bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FinalStageTime {
    /// k4 = dt * f(t + dt/2, y + k3)
    #[default]
    Midpoint,
    /// k4 = dt * f(t + dt, y + k3), the textbook scheme.
    End,
}

/// Fixed-step fourth-order Runge-Kutta solver.
///
/// Stage increments are stored pre-scaled by the step (`k = dt * f`), and the update is
/// `y + (k1 + k2 + k2 + k3 + k3 + k4) / 6`.
pub struct RK4<T: Scalar> {
    k1: Vec<T>,
    k2: Vec<T>,
    k3: Vec<T>,
    k4: Vec<T>,
    tmp: Vec<T>,
    final_stage: FinalStageTime,
}

impl<T: Scalar> RK4<T> {
    pub fn new(dim: usize) -> Self {
        Self::with_final_stage(dim, FinalStageTime::default())
    }

    pub fn with_final_stage(dim: usize, final_stage: FinalStageTime) -> Self {
        let z = T::zero();
        Self {
            k1: vec![z; dim],
            k2: vec![z; dim],
            k3: vec![z; dim],
            k4: vec![z; dim],
            tmp: vec![z; dim],
            final_stage,
        }
    }

    pub fn final_stage(&self) -> FinalStageTime {
        self.final_stage
    }
}

fn scale<T: Scalar>(k: &mut [T], dt: T) {
    for value in k.iter_mut() {
        *value = dt * *value;
    }
}

impl<T: Scalar> Steppable<T> for RK4<T> {
    fn step(&mut self, system: &impl DynamicalSystem<T>, t: &mut T, state: &mut [T], dt: T) {
        let two = T::one() + T::one();
        let half = T::one() / two;
        let six = two + two + two;

        let t0 = *t;
        let t_mid = t0 + dt / two;
        let t_last = match self.final_stage {
            FinalStageTime::Midpoint => t_mid,
            FinalStageTime::End => t0 + dt,
        };

        // k1 = dt * f(t, y)
        system.apply(t0, state, &mut self.k1);
        scale(&mut self.k1, dt);

        // k2 = dt * f(t + dt/2, y + k1/2)
        for i in 0..state.len() {
            self.tmp[i] = state[i] + half * self.k1[i];
        }
        system.apply(t_mid, &self.tmp, &mut self.k2);
        scale(&mut self.k2, dt);

        // k3 = dt * f(t + dt/2, y + k2/2)
        for i in 0..state.len() {
            self.tmp[i] = state[i] + half * self.k2[i];
        }
        system.apply(t_mid, &self.tmp, &mut self.k3);
        scale(&mut self.k3, dt);

        // k4 = dt * f(t_last, y + k3)
        for i in 0..state.len() {
            self.tmp[i] = state[i] + self.k3[i];
        }
        system.apply(t_last, &self.tmp, &mut self.k4);
        scale(&mut self.k4, dt);

        for i in 0..state.len() {
            state[i] = state[i]
                + (self.k1[i] + self.k2[i] + self.k2[i] + self.k3[i] + self.k3[i] + self.k4[i])
                    / six;
        }

        *t = t0 + dt;
    }
}

#[cfg(test)]
mod tests {
    use super::{FinalStageTime, RK4};
    use crate::traits::{DynamicalSystem, Steppable};

    struct Constant;

    impl DynamicalSystem<f64> for Constant {
        fn dimension(&self) -> usize {
            1
        }

        fn apply(&self, _t: f64, _x: &[f64], out: &mut [f64]) {
            out[0] = 1.0;
        }
    }

    struct Decay;

    impl DynamicalSystem<f64> for Decay {
        fn dimension(&self) -> usize {
            1
        }

        fn apply(&self, _t: f64, x: &[f64], out: &mut [f64]) {
            out[0] = -x[0];
        }
    }

    /// dx/dt = t, the smallest field that exposes where k4 is sampled.
    struct Ramp;

    impl DynamicalSystem<f64> for Ramp {
        fn dimension(&self) -> usize {
            1
        }

        fn apply(&self, t: f64, _x: &[f64], out: &mut [f64]) {
            out[0] = t;
        }
    }

    fn single_step(
        system: &impl DynamicalSystem<f64>,
        stage: FinalStageTime,
        x0: f64,
        dt: f64,
    ) -> f64 {
        let mut solver = RK4::with_final_stage(1, stage);
        let mut t = 0.0;
        let mut state = [x0];
        solver.step(system, &mut t, &mut state, dt);
        state[0]
    }

    #[test]
    fn step_advances_state_and_time() {
        let mut solver = RK4::new(1);
        let mut t = 0.0;
        let mut state = [0.0];
        solver.step(&Constant, &mut t, &mut state, 0.5);

        assert!((t - 0.5).abs() < 1e-12);
        assert!((state[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn decay_matches_exponential_to_fourth_order() {
        let mut solver = RK4::new(1);
        let mut t = 0.0;
        let mut state = [1.0];
        for _ in 0..10 {
            solver.step(&Decay, &mut t, &mut state, 0.1);
        }
        assert!((state[0] - (-1.0_f64).exp()).abs() < 1e-6);
        assert!((t - 1.0).abs() < 1e-12);
    }

    #[test]
    fn midpoint_final_stage_deviates_on_time_dependent_field() {
        let dt = 0.5;
        let midpoint = single_step(&Ramp, FinalStageTime::Midpoint, 0.0, dt);
        let end = single_step(&Ramp, FinalStageTime::End, 0.0, dt);

        // Textbook RK4 integrates dx/dt = t exactly; the midpoint variant gives 5 dt^2 / 12.
        assert!((end - dt * dt / 2.0).abs() < 1e-15);
        assert!((midpoint - 5.0 * dt * dt / 12.0).abs() < 1e-15);
    }

    #[test]
    fn final_stage_placement_is_irrelevant_for_autonomous_fields() {
        let midpoint = single_step(&Decay, FinalStageTime::Midpoint, 1.5, 0.25);
        let end = single_step(&Decay, FinalStageTime::End, 1.5, 0.25);
        assert_eq!(midpoint.to_bits(), end.to_bits());
    }

    #[test]
    fn default_solver_uses_midpoint_final_stage() {
        let solver: RK4<f64> = RK4::new(3);
        assert_eq!(solver.final_stage(), FinalStageTime::Midpoint);
    }
}
