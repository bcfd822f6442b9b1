//! Static move definitions and direction-based move selection.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effects::MoveEffect;

/// Input magnitude below which an axis counts as released.
pub const INPUT_DEADZONE: f32 = 1e-3;

/// Attack button / move category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Punch,
    Kick,
    Slash,
    Unique,
}

/// Direction a move must be input with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveDirection {
    /// No directional input.
    Neutral,
    /// Forward or back.
    Horizontal,
    /// Holding down.
    Crouch,
    /// Any input while off the ground.
    Airborne,
}

/// Which guard stance blocks the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuardHeight {
    High,
    Low,
    All,
}

/// Timing in simulation frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameData {
    pub startup: u32,
    pub active: u32,
    pub recovery: u32,
    pub damage: u32,
    pub blockstun: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveFlags {
    pub airborne_usable: bool,
    pub sweep: bool,
    pub overhead: bool,
    pub armor: bool,
    pub invincible: bool,
    pub guard_break: bool,
}

/// One combat move. Authored once, never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    pub kind: MoveKind,
    pub direction: MoveDirection,
    pub guard: GuardHeight,
    pub frames: FrameData,
    #[serde(default)]
    pub flags: MoveFlags,
    /// Horizontal and vertical distance at which the move connects.
    #[serde(default = "default_reach")]
    pub reach: f32,
    /// Applied in order to every target the move connects with.
    #[serde(default)]
    pub effects: Vec<MoveEffect>,
}

fn default_reach() -> f32 {
    1.0
}

impl MoveData {
    pub fn total_frames(&self) -> u32 {
        self.frames.startup + self.frames.active + self.frames.recovery
    }
}

/// A character's moves grouped by category. Order within a list matters:
/// selection takes the first direction match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Moveset {
    pub punches: Vec<MoveData>,
    pub kicks: Vec<MoveData>,
    pub slashes: Vec<MoveData>,
    pub uniques: Vec<MoveData>,
}

impl Moveset {
    pub fn moves(&self, kind: MoveKind) -> &[MoveData] {
        match kind {
            MoveKind::Punch => &self.punches,
            MoveKind::Kick => &self.kicks,
            MoveKind::Slash => &self.slashes,
            MoveKind::Unique => &self.uniques,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.punches.is_empty()
            && self.kicks.is_empty()
            && self.slashes.is_empty()
            && self.uniques.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MoveData> {
        self.punches
            .iter()
            .chain(&self.kicks)
            .chain(&self.slashes)
            .chain(&self.uniques)
    }

    /// First move in `kind` whose direction matches the input. `None` means
    /// no move is performed; not every input has to map to something.
    pub fn select(&self, kind: MoveKind, input: Vec2, airborne: bool) -> Option<&MoveData> {
        let direction = input_direction(input, airborne);
        self.moves(kind).iter().find(|m| m.direction == direction)
    }

    pub fn select_punch(&self, input: Vec2, airborne: bool) -> Option<&MoveData> {
        self.select(MoveKind::Punch, input, airborne)
    }
}

/// Map stick input to a move direction. Airborne overrides everything;
/// down wins over horizontal only when it is the dominant axis.
pub fn input_direction(input: Vec2, airborne: bool) -> MoveDirection {
    if airborne {
        return MoveDirection::Airborne;
    }
    let down = input.y < -INPUT_DEADZONE && input.y.abs() >= input.x.abs();
    if down {
        MoveDirection::Crouch
    } else if input.x.abs() > INPUT_DEADZONE {
        MoveDirection::Horizontal
    } else {
        MoveDirection::Neutral
    }
}
