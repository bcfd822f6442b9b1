pub mod feedback;
pub mod input;
pub mod physics;
pub mod script;

pub use feedback::{show_state, FeedbackSink};
pub use input::{Commands, InputFrame, InputState};
pub use physics::{Body, Physics};
pub use script::{InputScript, ScriptSegment};
