//! Harvest delay computation.
//!
//! ```text
//! roll  = uniform[base / 2, base]
//! delay = roll - (tool_strength - resistance)
//! if level > required:
//!     delay -= level / 8 - required / 9
//! delay = clamp(delay, 1, base)
//! ```
//!
//! All intermediate values are computed in `i64` with saturating operations,
//! so no combination of catalog data can overflow or wrap.

use rand::Rng;

/// Inputs to one delay computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayInputs {
    /// Upper bound of the delay; the roll is drawn from `[base / 2, base]`.
    pub base_time_units: u32,
    /// Strength of the actor's tool.
    pub tool_strength: u32,
    /// How strongly the resource resists the tool.
    pub resistance: u32,
    /// The actor's level in the gated skill.
    pub actor_level: u8,
    /// The resource's required level.
    pub required_level: u8,
}

/// Draw a harvest delay in `[1, base_time_units]`.
///
/// A zero base yields 1.
pub fn harvest_delay<R: Rng + ?Sized>(inputs: &DelayInputs, rng: &mut R) -> u32 {
    let base = inputs.base_time_units;
    let roll = if base == 0 {
        0
    } else {
        rng.random_range(base / 2..=base)
    };
    delay_from_roll(inputs, roll)
}

/// Apply the tool and level modifiers to an already drawn roll.
pub fn delay_from_roll(inputs: &DelayInputs, roll: u32) -> u32 {
    let base = i64::from(inputs.base_time_units.max(1));
    let tool_bonus = i64::from(inputs.tool_strength).saturating_sub(i64::from(inputs.resistance));
    let mut delay = i64::from(roll).saturating_sub(tool_bonus);
    if inputs.actor_level > inputs.required_level {
        let level_bonus =
            i64::from(inputs.actor_level / 8).saturating_sub(i64::from(inputs.required_level / 9));
        delay = delay.saturating_sub(level_bonus);
    }
    let clamped = delay.clamp(1, base);
    u32::try_from(clamped).unwrap_or(1)
}
