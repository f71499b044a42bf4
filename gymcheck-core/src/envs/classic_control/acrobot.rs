use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::env::{Env, EnvError, Info, Sample, Space, Step, check_action};
use crate::envs::reseed;

const DT: f64 = 0.2;
const LINK_LENGTH_1: f64 = 1.0;
const LINK_MASS_1: f64 = 1.0;
const LINK_MASS_2: f64 = 1.0;
const LINK_COM_POS_1: f64 = 0.5;
const LINK_COM_POS_2: f64 = 0.5;
const LINK_MOI: f64 = 1.0;
const MAX_VEL_1: f64 = 4.0 * PI;
const MAX_VEL_2: f64 = 9.0 * PI;
const AVAIL_TORQUE: [f64; 3] = [-1.0, 0.0, 1.0];
const GRAVITY: f64 = 9.8;

/// Two-link pendulum actuated at the joint between the links; the goal is
/// to swing the free end above the bar. Uses the "book" dynamics.
pub struct AcrobotEnv {
    observation_space: Space,
    action_space: Space,
    state: [f64; 4],
    rng: StdRng,
}

impl Default for AcrobotEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl AcrobotEnv {
    pub fn new() -> Self {
        let high = vec![1.0, 1.0, 1.0, 1.0, MAX_VEL_1, MAX_VEL_2];
        let low = high.iter().map(|h| -h).collect();
        Self {
            observation_space: Space::bounded(low, high),
            action_space: Space::discrete(3),
            state: [0.0; 4],
            rng: StdRng::from_entropy(),
        }
    }

    fn observation(&self) -> Sample {
        let [th1, th2, dth1, dth2] = self.state;
        Sample::vector(vec![th1.cos(), th1.sin(), th2.cos(), th2.sin(), dth1, dth2])
    }

    fn terminal(&self) -> bool {
        let [th1, th2, ..] = self.state;
        -th1.cos() - (th2 + th1).cos() > 1.0
    }
}

fn wrap(x: f64) -> f64 {
    (x + PI).rem_euclid(2.0 * PI) - PI
}

fn dsdt(s: [f64; 4], torque: f64) -> [f64; 4] {
    let (m1, m2) = (LINK_MASS_1, LINK_MASS_2);
    let l1 = LINK_LENGTH_1;
    let (lc1, lc2) = (LINK_COM_POS_1, LINK_COM_POS_2);
    let (i1, i2) = (LINK_MOI, LINK_MOI);
    let g = GRAVITY;
    let [theta1, theta2, dtheta1, dtheta2] = s;

    let d1 = m1 * lc1 * lc1 + m2 * (l1 * l1 + lc2 * lc2 + 2.0 * l1 * lc2 * theta2.cos()) + i1 + i2;
    let d2 = m2 * (lc2 * lc2 + l1 * lc2 * theta2.cos()) + i2;
    let phi2 = m2 * lc2 * g * (theta1 + theta2 - PI / 2.0).cos();
    let phi1 = -m2 * l1 * lc2 * dtheta2 * dtheta2 * theta2.sin()
        - 2.0 * m2 * l1 * lc2 * dtheta2 * dtheta1 * theta2.sin()
        + (m1 * lc1 + m2 * l1) * g * (theta1 - PI / 2.0).cos()
        + phi2;
    let ddtheta2 = (torque + d2 / d1 * phi1 - m2 * l1 * lc2 * dtheta1 * dtheta1 * theta2.sin() - phi2)
        / (m2 * lc2 * lc2 + i2 - d2 * d2 / d1);
    let ddtheta1 = -(d2 * ddtheta2 + phi1) / d1;
    [dtheta1, dtheta2, ddtheta1, ddtheta2]
}

// One fourth-order Runge-Kutta step over `DT`.
fn rk4(s: [f64; 4], torque: f64) -> [f64; 4] {
    let shifted = |base: [f64; 4], k: [f64; 4], h: f64| {
        let mut out = base;
        for i in 0..4 {
            out[i] += h * k[i];
        }
        out
    };
    let k1 = dsdt(s, torque);
    let k2 = dsdt(shifted(s, k1, DT / 2.0), torque);
    let k3 = dsdt(shifted(s, k2, DT / 2.0), torque);
    let k4 = dsdt(shifted(s, k3, DT), torque);
    let mut next = s;
    for i in 0..4 {
        next[i] += DT / 6.0 * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]);
    }
    next
}

impl Env for AcrobotEnv {
    fn observation_space(&self) -> &Space {
        &self.observation_space
    }

    fn action_space(&self) -> &Space {
        &self.action_space
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<(Sample, Info), EnvError> {
        reseed(&mut self.rng, seed);
        for v in &mut self.state {
            *v = self.rng.gen_range(-0.1..0.1);
        }
        Ok((self.observation(), Info::new()))
    }

    fn step(&mut self, action: &Sample) -> Result<Step, EnvError> {
        check_action(&self.action_space, action)?;
        let torque = AVAIL_TORQUE[action.as_discrete().unwrap_or(1) as usize];

        let [th1, th2, dth1, dth2] = rk4(self.state, torque);
        self.state = [
            wrap(th1),
            wrap(th2),
            dth1.clamp(-MAX_VEL_1, MAX_VEL_1),
            dth2.clamp(-MAX_VEL_2, MAX_VEL_2),
        ];

        let terminated = self.terminal();
        let reward = if terminated { 0.0 } else { -1.0 };
        Ok(Step::new(self.observation(), reward, terminated, false))
    }
}
