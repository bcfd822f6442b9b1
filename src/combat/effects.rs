//! Side effects a move applies to the character it connects with.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::{FadeTimer, Position, StatusEffects, Velocity};

/// One effect on a target. New kinds are new variants; callers only ever
/// call [`MoveEffect::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MoveEffect {
    /// Move the target by `offset`. `offset.x` is mirrored by the attacker's facing.
    Teleport { offset: Vec2 },
    /// Mask the target's commands for `duration` seconds. Stacks by max, not sum.
    Stun { duration: f32 },
    /// Drop the target's opacity to `alpha` for `duration` seconds, then restore it.
    Fade { duration: f32, alpha: f32 },
    /// Add `impulse` to the target's velocity. `impulse.x` is mirrored by facing.
    Knockback { impulse: Vec2 },
}

/// Mutable view of everything an effect may touch on one target.
pub struct EffectTarget<'a> {
    pub position: &'a mut Position,
    pub velocity: &'a mut Velocity,
    pub status: &'a mut StatusEffects,
    /// Facing of the character that landed the move.
    pub source_facing: f32,
}

impl MoveEffect {
    pub fn apply(&self, target: &mut EffectTarget<'_>) {
        let mirror = Vec2::new(target.source_facing, 1.0);
        match *self {
            MoveEffect::Teleport { offset } => {
                target.position.0 += offset * mirror;
            }
            MoveEffect::Stun { duration } => {
                target.status.stun_remaining = target.status.stun_remaining.max(duration);
            }
            MoveEffect::Fade { duration, alpha } => {
                target.status.fade = Some(FadeTimer {
                    elapsed: 0.0,
                    duration,
                    alpha: alpha.clamp(0.0, 1.0),
                });
            }
            MoveEffect::Knockback { impulse } => {
                target.velocity.0 += impulse * mirror;
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MoveEffect::Teleport { .. } => "teleport",
            MoveEffect::Stun { .. } => "stun",
            MoveEffect::Fade { .. } => "fade",
            MoveEffect::Knockback { .. } => "knockback",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        position: Position,
        velocity: Velocity,
        status: StatusEffects,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                position: Position(Vec2::new(2.0, 0.0)),
                velocity: Velocity(Vec2::ZERO),
                status: StatusEffects::default(),
            }
        }

        fn apply(&mut self, effect: MoveEffect, source_facing: f32) {
            let mut target = EffectTarget {
                position: &mut self.position,
                velocity: &mut self.velocity,
                status: &mut self.status,
                source_facing,
            };
            effect.apply(&mut target);
        }
    }

    #[test]
    fn teleport_mirrors_by_facing() {
        let mut f = Fixture::new();
        f.apply(MoveEffect::Teleport { offset: Vec2::new(1.5, 0.5) }, -1.0);
        assert_eq!(f.position.0, Vec2::new(0.5, 0.5));
        assert_eq!(f.velocity.0, Vec2::ZERO);
        assert_eq!(f.status, StatusEffects::default());
    }

    #[test]
    fn stun_keeps_the_longer_duration() {
        let mut f = Fixture::new();
        f.apply(MoveEffect::Stun { duration: 0.5 }, 1.0);
        f.apply(MoveEffect::Stun { duration: 0.25 }, 1.0);
        assert_eq!(f.status.stun_remaining, 0.5);
        assert!(f.status.is_stunned());
    }

    #[test]
    fn fade_starts_a_fresh_timer() {
        let mut f = Fixture::new();
        f.apply(MoveEffect::Fade { duration: 1.0, alpha: 1.5 }, 1.0);
        let fade = f.status.fade.expect("fade timer");
        assert_eq!(fade.elapsed, 0.0);
        assert_eq!(fade.duration, 1.0);
        assert_eq!(fade.alpha, 1.0);
    }

    #[test]
    fn knockback_pushes_away_from_source() {
        let mut f = Fixture::new();
        f.apply(MoveEffect::Knockback { impulse: Vec2::new(4.0, 2.0) }, -1.0);
        assert_eq!(f.velocity.0, Vec2::new(-4.0, 2.0));
        assert_eq!(f.position.0, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn names_match_ron_tags() {
        assert_eq!(MoveEffect::Stun { duration: 1.0 }.name(), "stun");
        assert_eq!(MoveEffect::Teleport { offset: Vec2::ZERO }.name(), "teleport");
    }
}
