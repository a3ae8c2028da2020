use tracing::debug;

use super::{DisplayError, DisplaySink};
use crate::render::frame::Frame;

/// Stand-in sink for hosts without a panel: frames go to the debug log.
#[derive(Debug, Default)]
pub struct HeadlessSink {
    pushes: u64,
    clears: u64,
    last: Option<Frame>,
}

impl HeadlessSink {
    pub fn pushes(&self) -> u64 {
        self.pushes
    }

    pub fn clears(&self) -> u64 {
        self.clears
    }

    /// What a real panel would be showing right now.
    pub fn visible(&self) -> Option<&Frame> {
        self.last.as_ref()
    }
}

impl DisplaySink for HeadlessSink {
    fn push(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        self.pushes += 1;
        self.last = Some(frame.clone());
        debug!(push = self.pushes, "frame\n{}", frame.to_ascii());
        Ok(())
    }

    fn clear_and_show(&mut self) -> Result<(), DisplayError> {
        self.clears += 1;
        self.last = None;
        debug!(clear = self.clears, "display cleared");
        Ok(())
    }
}
