use glam::Vec2;
use hecs::{Entity, World};
use tracing::{debug, info};

use crate::combat::{EffectTarget, MoveData};
use crate::components::{Facing, Health, Position, StateMachine, StatusEffects, Velocity};
use crate::fsm::FsmEvent;

/// A move that connected.
#[derive(Debug, Clone, PartialEq)]
pub struct HitEvent {
    pub attacker: Entity,
    pub target: Entity,
    pub move_name: String,
    pub damage: u32,
}

/// Whether `target` sits inside `reach` on the side `facing` points at.
fn in_reach(origin: Vec2, facing: f32, reach: f32, target: Vec2) -> bool {
    let d = target - origin;
    d.x * facing >= 0.0 && d.x.abs() <= reach && d.y.abs() <= reach
}

/// Resolve every move performed this tick: each other character in reach
/// takes the move's damage and its effects, in order.
///
/// Reads the machines' event journals without draining them.
pub fn combat_system(world: &mut World) -> Vec<HitEvent> {
    let swings: Vec<(Entity, Vec2, f32, MoveData)> = world
        .query_mut::<(&StateMachine, &Position, &Facing)>()
        .into_iter()
        .flat_map(|(entity, (fsm, pos, facing))| {
            fsm.events()
                .iter()
                .filter_map(|e| match e {
                    FsmEvent::MovePerformed(m) => Some((entity, pos.0, facing.0, m.clone())),
                    _ => None,
                })
                .collect::<Vec<_>>()
        })
        .collect();

    let mut hits = Vec::new();
    for (attacker, origin, facing, performed) in swings {
        let targets: Vec<Entity> = world
            .query_mut::<(&Position, &Health)>()
            .into_iter()
            .filter(|(e, (pos, _))| {
                *e != attacker && in_reach(origin, facing, performed.reach, pos.0)
            })
            .map(|(e, _)| e)
            .collect();

        for target in targets {
            let Ok((pos, vel, status, health)) = world.query_one_mut::<(
                &mut Position,
                &mut Velocity,
                &mut StatusEffects,
                &mut Health,
            )>(target) else {
                continue;
            };
            let mut view = EffectTarget {
                position: pos,
                velocity: vel,
                status,
                source_facing: facing,
            };
            for effect in &performed.effects {
                debug!(?target, effect = effect.name(), "apply");
                effect.apply(&mut view);
            }
            health.take(performed.frames.damage);
            if health.is_depleted() {
                info!(?target, "knocked out");
            }
            info!(
                ?attacker,
                ?target,
                move_name = %performed.name,
                damage = performed.frames.damage,
                remaining = health.current,
                "hit"
            );
            hits.push(HitEvent {
                attacker,
                target,
                move_name: performed.name.clone(),
                damage: performed.frames.damage,
            });
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reach_respects_facing() {
        let origin = Vec2::ZERO;
        assert!(in_reach(origin, 1.0, 1.0, Vec2::new(0.8, 0.0)));
        assert!(!in_reach(origin, -1.0, 1.0, Vec2::new(0.8, 0.0)));
        assert!(!in_reach(origin, 1.0, 1.0, Vec2::new(1.5, 0.0)));
        assert!(!in_reach(origin, 1.0, 1.0, Vec2::new(0.5, 2.0)));
    }
}
