use std::fmt;

use serde::{Deserialize, Serialize};

use crate::combat::{MoveData, MoveKind};

// ---------------------------------------------------------------------------
// State types
// ---------------------------------------------------------------------------

/// Tag for every phase a character can be in. Key into the priority and
/// interruptibility tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StateType {
    None,
    Idle,
    Walk,
    Run,
    Jump,
    Fall,
    Attack,
}

impl StateType {
    pub const COUNT: usize = 7;

    pub const ALL: [StateType; Self::COUNT] = [
        StateType::None,
        StateType::Idle,
        StateType::Walk,
        StateType::Run,
        StateType::Jump,
        StateType::Fall,
        StateType::Attack,
    ];

    /// Dense index for table lookups.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            StateType::None => "None",
            StateType::Idle => "Idle",
            StateType::Walk => "Walk",
            StateType::Run => "Run",
            StateType::Jump => "Jump",
            StateType::Fall => "Fall",
            StateType::Attack => "Attack",
        }
    }
}

impl fmt::Display for StateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Character state
// ---------------------------------------------------------------------------

/// The active phase of one character, with the timers that phase owns.
///
/// Lifecycle and per-tick behavior live in `impl State` in
/// `src/systems/player.rs` (where the input and physics context is) so this
/// file stays pure data.
#[derive(Debug, Clone, PartialEq)]
pub enum State {
    /// Spawn placeholder. Falls back to Idle on the first tick.
    None,
    /// Grounded, no horizontal input.
    Idle,
    /// Grounded locomotion. `running` selects Run over Walk.
    Move { running: bool },
    /// Ascending. `elapsed` counts up from zero on enter.
    Jump { elapsed: f32 },
    /// Airborne and descending (or walked off an edge).
    Fall,
    /// Swinging. See [`AttackPhase`].
    Attack(AttackPhase),
}

/// Timers and selection for one attack.
///
/// Two independent timers: only the one matching `airborne` advances. A
/// grounded attack that leaves the ground flips to the airborne track, whose
/// timer starts from zero.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackPhase {
    pub kind: MoveKind,
    pub airborne: bool,
    pub grounded_elapsed: f32,
    pub airborne_elapsed: f32,
    /// Active timer has reached its duration.
    pub finished: bool,
    /// Airborne attack touched the ground mid-swing.
    pub landed: bool,
    /// Move chosen on enter, or `None` when nothing in the moveset matched.
    pub performed: Option<MoveData>,
}

impl AttackPhase {
    pub fn new(kind: MoveKind, airborne: bool, performed: Option<MoveData>) -> Self {
        Self {
            kind,
            airborne,
            grounded_elapsed: 0.0,
            airborne_elapsed: 0.0,
            finished: false,
            landed: false,
            performed,
        }
    }
}

impl State {
    /// Fresh instance for `state_type`. Timers start at zero.
    pub fn from_type(state_type: StateType) -> Self {
        match state_type {
            StateType::None => State::None,
            StateType::Idle => State::Idle,
            StateType::Walk => State::Move { running: false },
            StateType::Run => State::Move { running: true },
            StateType::Jump => State::Jump { elapsed: 0.0 },
            StateType::Fall => State::Fall,
            StateType::Attack => State::Attack(AttackPhase::new(MoveKind::Punch, false, None)),
        }
    }

    pub fn state_type(&self) -> StateType {
        match self {
            State::None => StateType::None,
            State::Idle => StateType::Idle,
            State::Move { running: false } => StateType::Walk,
            State::Move { running: true } => StateType::Run,
            State::Jump { .. } => StateType::Jump,
            State::Fall => StateType::Fall,
            State::Attack(_) => StateType::Attack,
        }
    }

    /// Whether the character is expected to be off the ground in this state.
    pub fn is_airborne(&self) -> bool {
        match self {
            State::Jump { .. } | State::Fall => true,
            State::Attack(phase) => phase.airborne,
            _ => false,
        }
    }
}
