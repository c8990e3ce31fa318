// Audible cues for game events
// A terminal has no mixer, so cues are rung on the terminal bell

use std::io::{self, Write};
use tracing::trace;

use crate::xtm_session::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Click,
    Flag,
    Victory,
    Defeat,
}

/// Anything that can play a cue
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// Sound for a session event, if it has one
pub fn cue_for(event: GameEvent) -> Option<Cue> {
    match event {
        GameEvent::Exploded => Some(Cue::Defeat),
        GameEvent::Victory => Some(Cue::Victory),
        GameEvent::Flagged | GameEvent::Unflagged => Some(Cue::Flag),
        GameEvent::Revealed(_) | GameEvent::MineRelocated => None,
    }
}

/// Rings BEL on stdout for the cues that deserve attention
pub struct TerminalBell<W: Write> {
    out: W,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        TerminalBell { out: io::stdout() }
    }
}

impl<W: Write> TerminalBell<W> {
    fn rings(cue: Cue) -> usize {
        match cue {
            Cue::Click => 0,
            Cue::Flag => 1,
            Cue::Victory | Cue::Defeat => 2,
        }
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: Cue) {
        trace!(?cue, "cue");
        let n = Self::rings(cue);
        if n == 0 {
            return;
        }
        // a bell that cannot be written is not worth interrupting the game for
        let _ = self.out.write_all("\x07".repeat(n).as_bytes());
        let _ = self.out.flush();
    }
}

/// Used when sound is switched off
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, cue: Cue) {
        trace!(?cue, "cue muted");
    }
}

/// Sink matching the config's sound switch
pub fn sink_for(sound: bool) -> Box<dyn AudioSink> {
    if sound {
        Box::new(TerminalBell::stdout())
    } else {
        Box::new(Silent)
    }
}
