//! Circular dependency detection infrastructure.

use std::fmt;

use crate::error::{DiError, DiResult};

/// One step of an in-progress resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Frame {
    /// `resolve(id)` on a registered identifier
    Service(String),
    /// `make(type)` on a named type
    Type(String),
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frame::Service(id) => f.write_str(id),
            Frame::Type(name) => write!(f, "{}()", name),
        }
    }
}

/// Stack of frames currently being resolved on one container.
///
/// The container owns the stack and is borrowed mutably for a whole call
/// chain, so no thread-local state is needed.
#[derive(Debug, Default)]
pub(crate) struct ResolutionStack {
    frames: Vec<Frame>,
}

impl ResolutionStack {
    /// Pushes `frame`, rejecting cycles and runaway depth.
    ///
    /// On error nothing is pushed and the caller must not call `exit`.
    pub(crate) fn enter(&mut self, frame: Frame, max_depth: usize, detect_cycles: bool) -> DiResult<()> {
        if detect_cycles && self.frames.contains(&frame) {
            let mut path: Vec<String> = self.frames.iter().map(Frame::to_string).collect();
            path.push(frame.to_string());
            return Err(DiError::Circular(path));
        }

        if self.frames.len() >= max_depth {
            return Err(DiError::DepthExceeded(self.frames.len()));
        }

        self.frames.push(frame);
        Ok(())
    }

    pub(crate) fn exit(&mut self) {
        self.frames.pop();
    }

    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }
}
