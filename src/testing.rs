//! Test doubles for the state machine's collaborators.

use std::sync::Arc;

use glam::{Vec2, Vec3};

use crate::components::StateType;
use crate::config::CharacterConfig;
use crate::engine::{Commands, FeedbackSink, Physics};
use crate::error::FeedbackError;
use crate::fsm::{StateCtx, StateMachine};

/// Body with no gravity: velocity only changes when the state machine or the
/// test changes it.
#[derive(Debug, Default)]
pub struct MockPhysics {
    pub grounded: bool,
    pub velocity: Vec2,
    pub impulses: u32,
}

impl MockPhysics {
    pub fn grounded() -> Self {
        Self { grounded: true, ..Self::default() }
    }

    pub fn airborne() -> Self {
        Self::default()
    }
}

impl Physics for MockPhysics {
    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        self.impulses += 1;
        self.velocity += impulse;
    }
}

/// Records every feedback call; optionally fails all of them.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub tints: Vec<Vec3>,
    pub animations: Vec<StateType>,
    pub fail: bool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }
}

impl FeedbackSink for RecordingSink {
    fn set_tint(&mut self, color: Vec3) -> Result<(), FeedbackError> {
        if self.fail {
            return Err(FeedbackError::Unavailable);
        }
        self.tints.push(color);
        Ok(())
    }

    fn play(&mut self, animation: StateType) -> Result<(), FeedbackError> {
        if self.fail {
            return Err(FeedbackError::Rejected {
                what: "animation",
                details: "sprite missing".to_string(),
            });
        }
        self.animations.push(animation);
        Ok(())
    }
}

/// Machine plus collaborators, driven with explicit commands.
pub struct Rig {
    pub fsm: StateMachine,
    pub physics: MockPhysics,
    pub sink: RecordingSink,
    pub dt: f32,
}

impl Rig {
    pub fn new(config: CharacterConfig) -> Self {
        Self {
            fsm: StateMachine::new(Arc::new(config)),
            physics: MockPhysics::grounded(),
            sink: RecordingSink::default(),
            dt: 0.25,
        }
    }

    pub fn brawler() -> Self {
        Self::new(CharacterConfig::default())
    }

    pub fn tick(&mut self, commands: Commands) {
        let mut ctx = StateCtx {
            commands: &commands,
            physics: &mut self.physics,
            feedback: &mut self.sink,
            dt: self.dt,
        };
        self.fsm.tick(&mut ctx);
    }

    pub fn idle_tick(&mut self) {
        self.tick(Commands::default());
    }

    pub fn request(&mut self, state: StateType) -> crate::fsm::Transition {
        self.request_with(state, Commands::default())
    }

    pub fn request_with(&mut self, state: StateType, commands: Commands) -> crate::fsm::Transition {
        let mut ctx = StateCtx {
            commands: &commands,
            physics: &mut self.physics,
            feedback: &mut self.sink,
            dt: self.dt,
        };
        self.fsm.transition_to(state, &mut ctx)
    }

    /// Past the spawn placeholder and into Idle.
    pub fn spawned(mut self) -> Self {
        self.idle_tick();
        self.fsm.drain_events().for_each(drop);
        self
    }
}

pub fn walk(x: f32) -> Commands {
    Commands { movement: Vec2::new(x, 0.0), ..Commands::default() }
}

pub fn jump() -> Commands {
    Commands { jump_pressed: true, ..Commands::default() }
}

pub fn punch(movement: Vec2) -> Commands {
    Commands {
        movement,
        attack_pressed: Some(crate::combat::MoveKind::Punch),
        ..Commands::default()
    }
}
