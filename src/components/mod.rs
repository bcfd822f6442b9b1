pub mod character;

use glam::{Vec2, Vec3};

use crate::error::FeedbackError;
use crate::engine::feedback::FeedbackSink;

pub use character::{AttackPhase, State, StateType};
pub use crate::engine::input::InputState;
pub use crate::fsm::StateMachine;

/// World-space position (x right, y up). Ground sits at `y = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Linear velocity in world units per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity(pub Vec2);

/// Marker: entity is affected by gravity.
pub struct GravityAffected;

/// Ground friction. Horizontal velocity is damped as `vx *= 1 - friction * dt`
/// while grounded. Characters with a state machine leave this off; their
/// states own horizontal velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Friction(pub f32);

/// Marker: entity is touching the ground (set each physics step).
pub struct Grounded;

/// Marker: this entity is driven by player input.
pub struct Player;

/// Marker: training target with no state machine.
pub struct Dummy;

/// Horizontal facing: `1.0` right, `-1.0` left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facing(pub f32);

impl Facing {
    pub const RIGHT: Facing = Facing(1.0);
    pub const LEFT: Facing = Facing(-1.0);
}

/// Hit points. Damage saturates at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn take(&mut self, damage: u32) {
        self.current = self.current.saturating_sub(damage);
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }
}

/// What the character looks like right now: tint color, opacity, and the
/// animation the state machine last asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    pub color: Vec3,
    pub alpha: f32,
    pub animation: StateType,
}

impl Appearance {
    pub fn new() -> Self {
        Self {
            color: Vec3::ONE,
            alpha: 1.0,
            animation: StateType::None,
        }
    }
}

impl Default for Appearance {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackSink for Appearance {
    fn set_tint(&mut self, color: Vec3) -> Result<(), FeedbackError> {
        self.color = color;
        Ok(())
    }

    fn play(&mut self, animation: StateType) -> Result<(), FeedbackError> {
        self.animation = animation;
        Ok(())
    }
}

/// Opacity tween started by a fade effect. Opacity snaps back to 1.0 once
/// `elapsed` reaches `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeTimer {
    pub elapsed: f32,
    pub duration: f32,
    pub alpha: f32,
}

/// Timed impairments applied by move effects. Counted down by `status_system`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusEffects {
    /// Seconds of stun left. Stunned characters receive neutral commands.
    pub stun_remaining: f32,
    pub fade: Option<FadeTimer>,
}

impl StatusEffects {
    pub fn is_stunned(&self) -> bool {
        self.stun_remaining > 0.0
    }
}
