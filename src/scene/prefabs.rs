use std::sync::Arc;

use glam::Vec2;
use hecs::{Entity, World};

use crate::components::*;
use crate::config::CharacterConfig;
use crate::error::SetupError;

const PLAYER_HEALTH: u32 = 100;
const DUMMY_HEALTH: u32 = 200;
const DUMMY_FRICTION: f32 = 8.0;

/// Spawn a player-controlled character. The config is validated here so a
/// hand-built one fails at setup rather than mid-fight.
pub fn spawn_player(
    world: &mut World,
    config: Arc<CharacterConfig>,
    pos: Vec2,
) -> Result<Entity, SetupError> {
    config.validate()?;
    Ok(world.spawn((
        Position(pos),
        Velocity(Vec2::ZERO),
        GravityAffected,
        Facing::RIGHT,
        Health::new(PLAYER_HEALTH),
        Appearance::new(),
        StatusEffects::default(),
        InputState::new(),
        Player,
        // Starts in None; the first tick settles it into Idle. A player
        // spawned in the air falls from the second tick on.
        StateMachine::new(config),
    )))
}

/// Spawn a training dummy: takes hits, never acts.
pub fn spawn_dummy(world: &mut World, pos: Vec2) -> Entity {
    world.spawn((
        Position(pos),
        Velocity(Vec2::ZERO),
        GravityAffected,
        Facing::LEFT,
        Health::new(DUMMY_HEALTH),
        Appearance::new(),
        StatusEffects::default(),
        Friction(DUMMY_FRICTION),
        Dummy,
    ))
}
