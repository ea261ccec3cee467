//! Animation, sound and chat side effects.
//!
//! The host decides how cues reach the client. Actions emit them through
//! [`Presentation`] at fixed points in the tick cycle:
//!
//! - a [`Swing`] at the start of every cycle (animation plus an optional
//!   immediate sound),
//! - an optional echo cue some ticks later, tracked by [`SubTimers`] and
//!   decremented on every invocation,
//! - a reset to idle whenever a run ends.
//!
//! [`CueLog`] records cues in emission order for tests and the demo host.

use std::collections::BTreeMap;

use tickwork_types::{AnimationId, SoundCue};

/// Presentation operations exposed by the host.
pub trait Presentation {
    /// Start an animation on the actor.
    fn play_animation(&mut self, animation: AnimationId);

    /// Return the actor to its idle animation.
    fn reset_animation(&mut self);

    /// Play a sound to the actor.
    fn play_sound(&mut self, cue: SoundCue);

    /// Show a chat line to the actor.
    fn send_message(&mut self, text: &str);
}

/// One recorded cue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cue {
    /// An animation was started.
    Animation(AnimationId),
    /// The actor went back to idle.
    ResetAnimation,
    /// A sound was played.
    Sound(SoundCue),
    /// A chat line was shown.
    Message(String),
}

/// A [`Presentation`] sink that records every cue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueLog {
    cues: Vec<Cue>,
}

impl CueLog {
    /// An empty log.
    pub const fn new() -> Self {
        Self { cues: Vec::new() }
    }

    /// Every cue, oldest first.
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// Chat lines, oldest first.
    pub fn messages(&self) -> Vec<&str> {
        self.cues
            .iter()
            .filter_map(|cue| match cue {
                Cue::Message(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Sounds, oldest first.
    pub fn sounds(&self) -> Vec<SoundCue> {
        self.cues
            .iter()
            .filter_map(|cue| match cue {
                Cue::Sound(sound) => Some(*sound),
                _ => None,
            })
            .collect()
    }

    /// Animations started, oldest first.
    pub fn animations(&self) -> Vec<AnimationId> {
        self.cues
            .iter()
            .filter_map(|cue| match cue {
                Cue::Animation(animation) => Some(*animation),
                _ => None,
            })
            .collect()
    }

    /// The most recent cue.
    pub fn last(&self) -> Option<&Cue> {
        self.cues.last()
    }

    /// Number of cues recorded.
    pub fn len(&self) -> usize {
        self.cues.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.cues.clear();
    }
}

impl Presentation for CueLog {
    fn play_animation(&mut self, animation: AnimationId) {
        self.cues.push(Cue::Animation(animation));
    }

    fn reset_animation(&mut self) {
        self.cues.push(Cue::ResetAnimation);
    }

    fn play_sound(&mut self, cue: SoundCue) {
        self.cues.push(Cue::Sound(cue));
    }

    fn send_message(&mut self, text: &str) {
        self.cues.push(Cue::Message(text.to_owned()));
    }
}

/// Cues issued at the start of each swing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swing {
    /// Animation played at cycle start.
    pub animation: AnimationId,
    /// Sound played together with the animation.
    pub sound: Option<SoundCue>,
    /// Sound played a number of ticks after the animation.
    pub echo: Option<Echo>,
}

/// A sound delayed relative to the swing that armed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Echo {
    /// The delayed sound.
    pub sound: SoundCue,
    /// Ticks between the swing and the sound.
    pub after_ticks: u32,
}

/// Sub-timer name used for the swing echo.
pub const ECHO_TIMER: &str = "swing_echo";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingCue {
    remaining: u32,
    sound: SoundCue,
}

/// Named countdowns for secondary cues within one run.
///
/// Arming a name that is already pending replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubTimers {
    pending: BTreeMap<&'static str, PendingCue>,
}

impl SubTimers {
    /// No pending cues.
    pub const fn new() -> Self {
        Self {
            pending: BTreeMap::new(),
        }
    }

    /// Fire `sound` after `ticks` more invocations.
    ///
    /// Zero is treated as one: a cue armed during an invocation never fires
    /// in that same invocation.
    pub fn arm(&mut self, name: &'static str, ticks: u32, sound: SoundCue) {
        self.pending.insert(name, PendingCue {
            remaining: ticks.max(1),
            sound,
        });
    }

    /// Count every timer down by one and return the sounds that came due,
    /// in name order.
    pub fn advance(&mut self) -> Vec<SoundCue> {
        let mut due = Vec::new();
        self.pending.retain(|_, cue| {
            cue.remaining = cue.remaining.saturating_sub(1);
            if cue.remaining == 0 {
                due.push(cue.sound);
                return false;
            }
            true
        });
        due
    }

    /// Ticks left on `name`, if armed.
    pub fn remaining(&self, name: &str) -> Option<u32> {
        self.pending.get(name).map(|cue| cue.remaining)
    }

    /// Cancel every pending cue.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
