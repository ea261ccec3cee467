//! Requirement checks evaluated before every invocation.
//!
//! A check is a pure predicate over the [`ActionContext`]. It never mutates
//! anything; a failed check carries the line to show the actor, or nothing
//! when the run should stop silently (the target was cut down by someone
//! else, for example).

use tickwork_types::{Skill, WorldObjectRef};

use crate::context::ActionContext;

/// A failed requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unmet {
    /// Line shown to the actor; `None` stops silently.
    pub message: Option<String>,
}

impl Unmet {
    /// A failure that tells the actor why.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// A failure with nothing to say.
    pub const fn silent() -> Self {
        Self { message: None }
    }
}

/// A precondition gating whether an action may start or continue.
pub trait RequirementCheck {
    /// Evaluate the precondition against the current context.
    fn check(&self, ctx: &ActionContext<'_>) -> Result<(), Unmet>;
}

/// Evaluate `checks` in order and stop at the first failure.
pub fn check_all(
    checks: &[&dyn RequirementCheck],
    ctx: &ActionContext<'_>,
) -> Result<(), Unmet> {
    checks.iter().try_for_each(|check| check.check(ctx))
}

/// The standard "level too low" line.
pub fn level_message(skill: Skill, level: u8, verb: &str) -> String {
    format!("You need a {skill} level of {level} to {verb}.")
}

/// The actor's level in a skill is at least a minimum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelAtLeast {
    /// The gated skill.
    pub skill: Skill,
    /// Minimum level.
    pub level: u8,
    /// Line shown when the level is too low.
    pub message: String,
}

impl RequirementCheck for LevelAtLeast {
    fn check(&self, ctx: &ActionContext<'_>) -> Result<(), Unmet> {
        if ctx.level(self.skill) < self.level {
            return Err(Unmet::with_message(self.message.clone()));
        }
        Ok(())
    }
}

/// The targeted world object is still the one the action was started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetLive(pub WorldObjectRef);

impl RequirementCheck for TargetLive {
    fn check(&self, ctx: &ActionContext<'_>) -> Result<(), Unmet> {
        if ctx.world.is_live(&self.0) {
            Ok(())
        } else {
            Err(Unmet::silent())
        }
    }
}
