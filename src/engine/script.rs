//! Canned input for headless runs: a list of frames, each held for a number
//! of ticks.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::input::InputFrame;
use crate::combat::MoveKind;
use crate::error::SetupError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptSegment {
    pub ticks: u32,
    pub frame: InputFrame,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    pub segments: Vec<ScriptSegment>,
}

impl InputScript {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SetupError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SetupError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&text).map_err(|source| SetupError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Total length in ticks.
    pub fn len_ticks(&self) -> u64 {
        self.segments.iter().map(|s| u64::from(s.ticks)).sum()
    }

    /// Frame held on `tick`; neutral once the script has run out.
    pub fn frame_at(&self, tick: u64) -> InputFrame {
        let mut start = 0u64;
        for segment in &self.segments {
            let end = start + u64::from(segment.ticks);
            if tick < end {
                return segment.frame;
            }
            start = end;
        }
        InputFrame::default()
    }

    pub fn push(mut self, ticks: u32, frame: InputFrame) -> Self {
        self.segments.push(ScriptSegment { ticks, frame });
        self
    }

    /// Walk up to the dummy, jab it, hop, and throw an uppercut on the way down.
    pub fn demo() -> Self {
        let idle = InputFrame::default();
        let walk = InputFrame { movement: Vec2::new(0.5, 0.0), ..idle };
        let punch = InputFrame { attack: Some(MoveKind::Punch), ..idle };
        let jump = InputFrame { jump: true, ..idle };
        Self::default()
            .push(10, idle)
            .push(40, walk)
            .push(5, idle)
            .push(2, punch)
            .push(30, idle)
            .push(2, jump)
            .push(12, idle)
            .push(2, punch)
            .push(60, idle)
    }
}
