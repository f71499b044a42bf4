mod acrobot;
mod cartpole;
mod mountain_car;
mod mountain_car_continuous;
mod pendulum;

pub use acrobot::AcrobotEnv;
pub use cartpole::CartPoleEnv;
pub use mountain_car::MountainCarEnv;
pub use mountain_car_continuous::MountainCarContinuousEnv;
pub use pendulum::PendulumEnv;
