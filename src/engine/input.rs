use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::combat::MoveKind;

/// Raw controls for one tick, as a device or script reports them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    #[serde(default)]
    pub movement: Vec2,
    #[serde(default)]
    pub jump: bool,
    /// Attack button held, if any.
    #[serde(default)]
    pub attack: Option<MoveKind>,
}

/// What the state machine consumes: the movement vector plus rising edges.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Commands {
    pub movement: Vec2,
    pub jump_pressed: bool,
    pub attack_pressed: Option<MoveKind>,
}

impl Commands {
    pub fn horizontal(&self) -> f32 {
        self.movement.x
    }
}

/// Per-character input component. Turns held buttons into press edges.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: InputFrame,
    commands: Commands,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this tick's frame. A button fires once when it goes down; holding
    /// it does not repeat. Switching from one attack button straight to
    /// another counts as a new press.
    pub fn update(&mut self, frame: InputFrame) -> Commands {
        let jump_pressed = frame.jump && !self.held.jump;
        let attack_pressed = match (frame.attack, self.held.attack) {
            (Some(now), Some(before)) if now == before => None,
            (now, _) => now,
        };
        self.held = frame;
        self.commands = Commands {
            movement: frame.movement,
            jump_pressed,
            attack_pressed,
        };
        self.commands
    }

    pub fn commands(&self) -> Commands {
        self.commands
    }
}
