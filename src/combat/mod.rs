pub mod effects;
pub mod moves;

pub use effects::{EffectTarget, MoveEffect};
pub use moves::{
    input_direction, FrameData, GuardHeight, MoveData, MoveDirection, MoveFlags, MoveKind,
    Moveset, INPUT_DEADZONE,
};
