use glam::Vec3;
use tracing::warn;

use crate::components::StateType;
use crate::config::CharacterConfig;
use crate::error::FeedbackError;

/// Fire-and-forget visual output: tint and animation cue.
pub trait FeedbackSink {
    fn set_tint(&mut self, color: Vec3) -> Result<(), FeedbackError>;
    fn play(&mut self, animation: StateType) -> Result<(), FeedbackError>;
}

/// Push the tint and animation for `state`. Failures are logged and dropped;
/// the state machine never sees them.
pub fn show_state(sink: &mut dyn FeedbackSink, state: StateType, config: &CharacterConfig) {
    if let Err(err) = sink.set_tint(config.states.tint(state)) {
        warn!(character = %config.name, %state, "tint not applied: {err}");
    }
    if let Err(err) = sink.play(state) {
        warn!(character = %config.name, %state, "animation not played: {err}");
    }
}
