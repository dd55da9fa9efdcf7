//! Presentation cues emitted by a conversation.

/// A fire-and-forget notification for the audio or presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// A conversation opened on a playable node.
    Open,
    /// An active conversation closed.
    Close,
    /// The conversation moved on to an existing node.
    Advance,
    /// The highlighted option changed.
    SelectChange,
}

/// Receives cues as they happen.
pub trait CueSink {
    /// Handle one cue. Must not call back into the session.
    fn cue(&mut self, cue: Cue);
}

/// Discards all cues.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCues;

impl CueSink for NullCues {
    fn cue(&mut self, _cue: Cue) {}
}

/// Logs cues at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingCues;

impl CueSink for TracingCues {
    fn cue(&mut self, cue: Cue) {
        tracing::debug!(?cue, "dialogue cue");
    }
}

/// Records cues in order.
#[derive(Debug, Clone, Default)]
pub struct CueLog {
    cues: Vec<Cue>,
}

impl CueLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cues received so far.
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// Take all recorded cues, leaving the log empty.
    pub fn drain(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }
}

impl CueSink for CueLog {
    fn cue(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}
