use std::sync::Arc;

use glam::Vec2;
use hecs::{Entity, World};

use crate::config::CharacterConfig;
use crate::error::SetupError;
use crate::scene::prefabs::{spawn_dummy, spawn_player};

/// Handles to everything the test scene spawns.
#[derive(Debug, Clone, Copy)]
pub struct TestScene {
    pub player: Entity,
    pub dummy: Entity,
}

/// Player on the floor at the origin, dummy a few steps to the right.
pub fn load_test_scene(
    world: &mut World,
    config: Arc<CharacterConfig>,
) -> Result<TestScene, SetupError> {
    let player = spawn_player(world, config, Vec2::ZERO)?;
    let dummy = spawn_dummy(world, Vec2::new(3.0, 0.0));
    Ok(TestScene { player, dummy })
}
