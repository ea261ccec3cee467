//! Emote tab bindings.
//!
//! Every emote button plays one animation. All emotes are unlocked at login,
//! so a binding never needs a requirement check.

use std::collections::BTreeMap;

use tickwork_types::{AnimationId, ButtonId};

use crate::presentation::Presentation;

/// An emote on the emote tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Emote {
    /// "Yes".
    Yes,
    /// "No".
    No,
    /// "Bow".
    Bow,
    /// "Angry".
    Angry,
    /// "Think".
    Think,
    /// "Wave".
    Wave,
    /// "Shrug".
    Shrug,
    /// "Cheer".
    Cheer,
    /// "Beckon".
    Beckon,
    /// "Laugh".
    Laugh,
    /// "Jump for joy".
    JumpForJoy,
    /// "Yawn".
    Yawn,
    /// "Dance".
    Dance,
    /// "Jig".
    Jig,
    /// "Spin".
    Spin,
    /// "Headbang".
    Headbang,
    /// "Cry".
    Cry,
    /// "Blow kiss".
    BlowKiss,
    /// "Panic".
    Panic,
    /// "Raspberry".
    Raspberry,
    /// "Clap".
    Clap,
    /// "Salute".
    Salute,
    /// "Goblin bow".
    GoblinBow,
    /// "Goblin salute".
    GoblinSalute,
    /// "Glass box".
    GlassBox,
    /// "Climb rope".
    ClimbRope,
    /// "Lean".
    Lean,
    /// "Glass wall".
    GlassWall,
}

impl Emote {
    /// Every emote, in tab order.
    pub const ALL: [Self; 28] = [
        Self::Yes,
        Self::No,
        Self::Bow,
        Self::Angry,
        Self::Think,
        Self::Wave,
        Self::Shrug,
        Self::Cheer,
        Self::Beckon,
        Self::Laugh,
        Self::JumpForJoy,
        Self::Yawn,
        Self::Dance,
        Self::Jig,
        Self::Spin,
        Self::Headbang,
        Self::Cry,
        Self::BlowKiss,
        Self::Panic,
        Self::Raspberry,
        Self::Clap,
        Self::Salute,
        Self::GoblinBow,
        Self::GoblinSalute,
        Self::GlassBox,
        Self::ClimbRope,
        Self::Lean,
        Self::GlassWall,
    ];

    /// `(button, animation)` for this emote.
    const fn ids(self) -> (u16, u16) {
        match self {
            Self::Yes => (168, 855),
            Self::No => (169, 856),
            Self::Bow => (164, 858),
            Self::Angry => (167, 859),
            Self::Think => (162, 857),
            Self::Wave => (163, 863),
            Self::Shrug => (13370, 2113),
            Self::Cheer => (171, 862),
            Self::Beckon => (165, 864),
            Self::Laugh => (170, 861),
            Self::JumpForJoy => (13366, 2109),
            Self::Yawn => (13368, 2111),
            Self::Dance => (166, 866),
            Self::Jig => (13363, 2106),
            Self::Spin => (13364, 2107),
            Self::Headbang => (13365, 2108),
            Self::Cry => (161, 860),
            Self::BlowKiss => (11100, 1368),
            Self::Panic => (13362, 2105),
            Self::Raspberry => (13367, 2110),
            Self::Clap => (172, 865),
            Self::Salute => (13369, 2112),
            Self::GoblinBow => (13383, 2127),
            Self::GoblinSalute => (13384, 2128),
            Self::GlassBox => (667, 1131),
            Self::ClimbRope => (6503, 1130),
            Self::Lean => (6506, 1129),
            Self::GlassWall => (666, 1128),
        }
    }

    /// The emote tab button.
    pub const fn button(self) -> ButtonId {
        ButtonId(self.ids().0)
    }

    /// The animation played.
    pub const fn animation(self) -> AnimationId {
        AnimationId(self.ids().1)
    }
}

/// Button id to emote lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmoteBindings {
    by_button: BTreeMap<ButtonId, Emote>,
}

impl Default for EmoteBindings {
    fn default() -> Self {
        Self::standard()
    }
}

impl EmoteBindings {
    /// Bind every emote to its tab button.
    pub fn standard() -> Self {
        Self {
            by_button: Emote::ALL.into_iter().map(|emote| (emote.button(), emote)).collect(),
        }
    }

    /// The emote bound to `button`.
    pub fn emote_for(&self, button: ButtonId) -> Option<Emote> {
        self.by_button.get(&button).copied()
    }

    /// Emotes unlocked when a player logs in.
    pub fn unlocked_on_login(&self) -> impl Iterator<Item = Emote> + '_ {
        self.by_button.values().copied()
    }

    /// Play the emote bound to `button`. Returns whether one was bound.
    pub fn perform(&self, button: ButtonId, presentation: &mut dyn Presentation) -> bool {
        let Some(emote) = self.emote_for(button) else {
            return false;
        };
        presentation.play_animation(emote.animation());
        true
    }
}
