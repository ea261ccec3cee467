//! Enumeration types shared by the action engine and its host adapters.

use serde::{Deserialize, Serialize};

/// A trainable skill.
///
/// Only the skills with content in this workspace are listed; the host
/// owns the full skill table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    /// Cutting trees for logs.
    Woodcutting,
    /// Spinning, weaving and other production at a wheel or bench.
    Crafting,
    /// Lighting logs.
    Firemaking,
    /// Mining rocks for ore.
    Mining,
    /// Catching fish at a spot.
    Fishing,
}

impl Skill {
    /// Human readable name used in chat messages.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Woodcutting => "Woodcutting",
            Self::Crafting => "Crafting",
            Self::Firemaking => "Firemaking",
            Self::Mining => "Mining",
            Self::Fishing => "Fishing",
        }
    }
}

impl core::fmt::Display for Skill {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The layer a world object occupies on its tile.
///
/// A tile holds at most one object per layer, so `(position, type)` is the
/// natural key for a placed object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    /// Straight wall segment.
    Wall,
    /// Non-interactive wall decoration.
    WallDecoration,
    /// Default interactable layer (trees, rocks, furniture).
    Interactable,
    /// Ground decoration.
    GroundDecoration,
}

/// Orientation of a placed world object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Facing north.
    North,
    /// Facing east.
    East,
    /// Facing south.
    South,
    /// Facing west.
    West,
}

/// What a timed action tells the scheduler after one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionSignal {
    /// Keep the action in its slot and invoke it again next tick.
    Continue,
    /// The action finished normally; release the slot.
    Complete,
    /// The action stopped early; release the slot.
    Interrupt,
}

impl ActionSignal {
    /// Whether the scheduler should release the action's slot.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Interrupt)
    }
}

/// Lifecycle phase of a live action run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionPhase {
    /// Created, never invoked.
    Pending,
    /// First invocation done: begin effects emitted, initial delay set.
    Started,
    /// Counting down between tick bodies.
    Ticking,
    /// Stopped early. Terminal.
    Interrupted,
    /// Finished normally. Terminal.
    Completed,
}

impl ActionPhase {
    /// Whether no further invocation can change this run.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Interrupted | Self::Completed)
    }

    /// The scheduler signal corresponding to this phase.
    pub const fn signal(self) -> ActionSignal {
        match self {
            Self::Pending | Self::Started | Self::Ticking => ActionSignal::Continue,
            Self::Interrupted => ActionSignal::Interrupt,
            Self::Completed => ActionSignal::Complete,
        }
    }
}

/// Why an inventory delta could not be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionReason {
    /// An item listed for removal is not held in the required amount.
    InsufficientInput,
    /// There is no room for the produced items.
    OutputFull,
}

/// External reason for cancelling a run at a tick boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CancelReason {
    /// The actor walked away.
    Movement,
    /// The actor's session ended.
    Logout,
    /// A new action was submitted for the same actor.
    Replaced,
    /// The host stopped the action for its own reasons (teleport, death, ...).
    Stopped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_phases_map_to_terminal_signals() {
        for phase in [
            ActionPhase::Pending,
            ActionPhase::Started,
            ActionPhase::Ticking,
            ActionPhase::Interrupted,
            ActionPhase::Completed,
        ] {
            assert_eq!(phase.is_terminal(), phase.signal().is_terminal());
        }
    }

    #[test]
    fn skill_display_name() {
        assert_eq!(Skill::Woodcutting.to_string(), "Woodcutting");
        assert_eq!(Skill::Crafting.display_name(), "Crafting");
    }

    #[test]
    fn skill_serde_snake_case() {
        let json = serde_json::to_string(&Skill::Woodcutting).ok();
        assert_eq!(json.as_deref(), Some("\"woodcutting\""));
    }
}
