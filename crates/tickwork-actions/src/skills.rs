//! Skill experience and levels.
//!
//! Experience is tracked per [`Skill`] as a [`Decimal`] so fractional rewards
//! (37.5 for an oak log, 2.5 for a ball of wool) accumulate exactly. Levels
//! are derived from experience through the classic 99-level curve: the
//! threshold for level `L` is a quarter of the sum over `l < L` of
//! `floor(l + 300 * 2^(l / 7))`.
//!
//! # Level-Up
//!
//! [`SkillSet::add_experience`] returns the new level when a grant crosses a
//! threshold so the caller can announce it.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tickwork_types::Skill;

use crate::error::SkillError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Highest reachable level.
pub const MAX_LEVEL: u8 = 99;

/// Experience never grows past this value.
pub const MAX_EXPERIENCE: u32 = 200_000_000;

/// Experience needed to reach each level, starting at level 1.
const LEVEL_THRESHOLDS: [u32; 99] = [
    0, 83, 174, 276, 388, 512, 650, 801, 969, 1154, 1358, 1584, 1833, 2107, 2411, 2746, 3115, 3523,
    3973, 4470, 5018, 5624, 6291, 7028, 7842, 8740, 9730, 10824, 12031, 13363, 14833, 16456, 18247,
    20224, 22406, 24815, 27473, 30408, 33648, 37224, 41171, 45529, 50339, 55649, 61512, 67983,
    75127, 83014, 91721, 101_333, 111_945, 123_660, 136_594, 150_872, 166_636, 184_040, 203_254,
    224_466, 247_886, 273_742, 302_288, 333_804, 368_599, 407_015, 449_428, 496_254, 547_953,
    605_032, 668_051, 737_627, 814_445, 899_257, 992_895, 1_096_278, 1_210_421, 1_336_443,
    1_475_581, 1_629_200, 1_798_808, 1_986_068, 2_192_818, 2_421_087, 2_673_114, 2_951_373,
    3_258_594, 3_597_792, 3_972_294, 4_385_776, 4_842_295, 5_346_332, 5_902_831, 6_517_253,
    7_195_629, 7_944_614, 8_771_558, 9_684_577, 10_692_629, 11_805_606, 13_034_431,
];

/// Experience required for `level`, or `None` outside `1..=MAX_LEVEL`.
pub fn experience_for_level(level: u8) -> Option<u32> {
    let index = usize::from(level.checked_sub(1)?);
    LEVEL_THRESHOLDS.get(index).copied()
}

/// The level a given amount of experience corresponds to.
pub fn level_for_experience(experience: Decimal) -> u8 {
    let reached = LEVEL_THRESHOLDS
        .iter()
        .take_while(|&&threshold| experience >= Decimal::from(threshold))
        .count();
    u8::try_from(reached).unwrap_or(MAX_LEVEL).clamp(1, MAX_LEVEL)
}

// ---------------------------------------------------------------------------
// SkillSet
// ---------------------------------------------------------------------------

/// Per-actor experience in every skill.
///
/// Skills that were never trained sit at zero experience, which is level 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSet {
    experience: BTreeMap<Skill, Decimal>,
}

impl SkillSet {
    /// An untrained skill set.
    pub const fn new() -> Self {
        Self {
            experience: BTreeMap::new(),
        }
    }

    /// Return a copy with `skill` set to the start of `level`.
    ///
    /// # Errors
    ///
    /// Returns [`SkillError::InvalidLevel`] for a level outside `1..=99`.
    pub fn with_level(mut self, skill: Skill, level: u8) -> Result<Self, SkillError> {
        let threshold = experience_for_level(level).ok_or(SkillError::InvalidLevel(level))?;
        self.experience.insert(skill, Decimal::from(threshold));
        Ok(self)
    }

    /// Accumulated experience in `skill`.
    pub fn experience(&self, skill: Skill) -> Decimal {
        self.experience.get(&skill).copied().unwrap_or(Decimal::ZERO)
    }

    /// Current level in `skill`.
    pub fn level(&self, skill: Skill) -> u8 {
        level_for_experience(self.experience(skill))
    }

    /// Grant `amount` experience in `skill`, capped at [`MAX_EXPERIENCE`].
    ///
    /// Returns the new level if the grant caused a level-up. Negative
    /// amounts are ignored.
    pub fn add_experience(&mut self, skill: Skill, amount: Decimal) -> Option<u8> {
        if amount <= Decimal::ZERO {
            return None;
        }
        let before = self.level(skill);
        let cap = Decimal::from(MAX_EXPERIENCE);
        let total = self
            .experience(skill)
            .checked_add(amount)
            .map_or(cap, |sum| sum.min(cap));
        self.experience.insert(skill, total);
        let after = self.level(skill);
        (after > before).then_some(after)
    }
}
