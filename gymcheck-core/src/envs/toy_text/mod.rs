mod blackjack;
mod cliff_walking;
mod frozen_lake;
mod taxi;

pub use blackjack::BlackjackEnv;
pub use cliff_walking::CliffWalkingEnv;
pub use frozen_lake::FrozenLakeEnv;
pub use taxi::TaxiEnv;
