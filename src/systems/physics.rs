use glam::Vec2;
use hecs::{Entity, World};

use crate::components::{Friction, GravityAffected, Grounded, Position, Velocity};

pub const PHYSICS_DT: f32 = 1.0 / 60.0;
pub const GRAVITY: Vec2 = Vec2::new(0.0, -30.0);
/// Height of the floor plane.
pub const GROUND_Y: f32 = 0.0;

/// One fixed step: gravity, semi-implicit Euler, floor contact, friction.
///
/// `Grounded` is rebuilt from scratch every step, so a character that walks
/// off the floor or jumps loses it on the same step.
pub fn physics_step(world: &mut World, dt: f32) {
    for (_entity, (pos, vel, gravity)) in
        world.query_mut::<(&mut Position, &mut Velocity, Option<&GravityAffected>)>()
    {
        if gravity.is_some() {
            vel.0 += GRAVITY * dt;
        }
        // Semi-implicit Euler: update velocity first, then position
        pos.0 += vel.0 * dt;
    }

    // Collect first (drops the borrow), then insert/remove.
    let mut landed: Vec<Entity> = Vec::new();
    let mut airborne: Vec<Entity> = Vec::new();
    for (entity, (pos, vel)) in world.query_mut::<(&mut Position, &mut Velocity)>() {
        if pos.0.y <= GROUND_Y && vel.0.y <= 0.0 {
            pos.0.y = GROUND_Y;
            vel.0.y = 0.0;
            landed.push(entity);
        } else {
            airborne.push(entity);
        }
    }

    // insert_one replaces the component if it already exists.
    for entity in &landed {
        let _ = world.insert_one(*entity, Grounded);
        if let Ok((vel, friction)) = world.query_one_mut::<(&mut Velocity, &Friction)>(*entity) {
            let damping = (1.0 - friction.0 * dt).max(0.0);
            vel.0.x *= damping;
        }
    }
    for entity in airborne {
        let _ = world.remove_one::<Grounded>(entity);
    }
}
