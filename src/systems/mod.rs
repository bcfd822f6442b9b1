mod combat;
mod physics;
mod player;
mod status;

pub use combat::{combat_system, HitEvent};
pub use physics::{physics_step, GRAVITY, GROUND_Y, PHYSICS_DT};
pub use player::{player_input_system, player_state_system};
pub use status::status_system;
