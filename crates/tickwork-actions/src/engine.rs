//! The resumable timed-action state machine.
//!
//! A [`TimedAction`] describes one kind of gathering or production work:
//! what it checks, what it exchanges with the inventory, what it says and
//! plays. An [`ActionRun`] drives one live instance of it through
//! `Pending -> Started -> Ticking -> {Completed | Interrupted}`, one
//! [`advance`](ActionRun::advance) per game tick.
//!
//! # Invocation order
//!
//! 1. Requirement check. Failure interrupts with the check's message.
//! 2. Pending secondary cues count down and fire.
//! 3. First invocation only: the first delta is checked, then the begin
//!    effects are emitted, the initial countdown is set and the first swing
//!    cycle starts. Nothing is granted.
//! 4. Later invocations count down; the swing is re-issued every
//!    `swing_interval` ticks while waiting.
//! 5. When the countdown reaches zero the delta is checked and applied
//!    atomically. A rejected delta emits no grant effects.
//! 6. The action's own grant hook, the experience it reports, depletion,
//!    budget. If the run
//!    goes on, the next countdown is drawn and a new swing cycle starts.
//!
//! Both terminal states cancel pending cues and reset the actor to idle.

use rand::Rng;
use rust_decimal::Decimal;
use tickwork_types::{
    ActionPhase, ActionSignal, ActorId, CancelReason, RejectionReason, RunId, Skill,
};
use tickwork_world::OneIn;
use tracing::{debug, info, warn};

use crate::config::{ActionPolicy, FullInventoryPolicy};
use crate::context::ActionContext;
use crate::error::ActionError;
use crate::presentation::{ECHO_TIMER, SubTimers, Swing};
use crate::requirement::Unmet;
use crate::transaction::{self, InventoryDelta};

/// Line sent when a run stops because the output no longer fits.
pub const INVENTORY_FULL_MESSAGE: &str = "You do not have enough space in your inventory.";

/// One kind of timed gathering or production work.
pub trait TimedAction {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// The skill that receives experience.
    fn skill(&self) -> Skill;

    /// Preconditions evaluated before every invocation.
    fn check(&self, ctx: &ActionContext<'_>) -> Result<(), Unmet>;

    /// Emit the one-time begin effects and return the initial countdown.
    fn begin(&mut self, ctx: &mut ActionContext<'_>) -> u32;

    /// The exchange one successful tick makes.
    fn delta(&self, ctx: &ActionContext<'_>) -> InventoryDelta;

    /// Experience per successful tick.
    fn experience(&self) -> Decimal;

    /// Success side effects after the delta was applied: messages, bonus
    /// rolls. Returns the experience this tick earns, normally
    /// [`experience`](Self::experience); zero grants none.
    fn on_grant(&mut self, ctx: &mut ActionContext<'_>) -> Decimal;

    /// Countdown until the next tick body.
    fn next_delay(&mut self, ctx: &mut ActionContext<'_>) -> u32;

    /// Cues for the start of a swing cycle.
    fn swing(&self, ctx: &ActionContext<'_>) -> Option<Swing> {
        let _ = ctx;
        None
    }

    /// Chance that a successful tick uses up the target.
    fn depletion_chance(&self) -> Option<OneIn> {
        None
    }

    /// Consume the target after a depletion roll succeeded.
    fn deplete(&mut self, ctx: &mut ActionContext<'_>) {
        let _ = ctx;
    }

    /// Line sent when the output does not fit.
    fn full_message(&self) -> String {
        String::from(INVENTORY_FULL_MESSAGE)
    }

    /// Line sent when an input is missing.
    fn missing_input_message(&self) -> String;
}

/// Why a run completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionReason {
    /// The target was used up.
    Depleted,
    /// The iteration budget ran out.
    BudgetSpent,
    /// A mid-run rejection handled as a soft stop.
    SoftStop(RejectionReason),
}

/// Why a run was interrupted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterruptReason {
    /// A check or transaction failed.
    Failed(ActionError),
    /// The host cancelled it.
    Cancelled(CancelReason),
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Finished normally.
    Completed(CompletionReason),
    /// Stopped early.
    Interrupted(InterruptReason),
}

/// The level-up announcement.
pub fn level_up_message(skill: Skill, level: u8) -> String {
    format!("You've just advanced a {skill} level! You have reached level {level}.")
}

/// One live instance of a [`TimedAction`].
///
/// Owned by exactly one scheduler slot and dropped when it reaches a
/// terminal phase.
#[derive(Debug)]
pub struct ActionRun<A> {
    id: RunId,
    actor: ActorId,
    action: A,
    policy: ActionPolicy,
    phase: ActionPhase,
    budget: u32,
    remaining_iterations: u32,
    tick_countdown: u32,
    swing_countdown: u32,
    sub_timers: SubTimers,
    grants: u32,
    outcome: Option<RunOutcome>,
}

impl<A: TimedAction> ActionRun<A> {
    /// Create a pending run and draw its iteration budget.
    pub fn new<R: Rng + ?Sized>(
        actor: ActorId,
        action: A,
        policy: ActionPolicy,
        rng: &mut R,
    ) -> Self {
        let budget = policy.iterations.draw(rng);
        Self {
            id: RunId::new(),
            actor,
            action,
            policy,
            phase: ActionPhase::Pending,
            budget,
            remaining_iterations: budget,
            tick_countdown: 0,
            swing_countdown: 0,
            sub_timers: SubTimers::new(),
            grants: 0,
            outcome: None,
        }
    }

    /// Unique id of this run.
    pub const fn id(&self) -> RunId {
        self.id
    }

    /// The acting player.
    pub const fn actor(&self) -> ActorId {
        self.actor
    }

    /// The action being run.
    pub const fn action(&self) -> &A {
        &self.action
    }

    /// Current phase.
    pub const fn phase(&self) -> ActionPhase {
        self.phase
    }

    /// Iteration budget drawn at creation.
    pub const fn budget(&self) -> u32 {
        self.budget
    }

    /// Successful ticks left before the run stops on its own.
    pub const fn remaining_iterations(&self) -> u32 {
        self.remaining_iterations
    }

    /// Ticks until the next tick body.
    pub const fn tick_countdown(&self) -> u32 {
        self.tick_countdown
    }

    /// Successful ticks so far.
    pub const fn grants(&self) -> u32 {
        self.grants
    }

    /// Pending secondary cues.
    pub const fn sub_timers(&self) -> &SubTimers {
        &self.sub_timers
    }

    /// How the run ended, once it has.
    pub const fn outcome(&self) -> Option<&RunOutcome> {
        self.outcome.as_ref()
    }

    /// Run one invocation.
    pub fn advance(&mut self, ctx: &mut ActionContext<'_>) -> ActionSignal {
        if self.phase.is_terminal() {
            return self.phase.signal();
        }

        if let Err(unmet) = self.action.check(ctx) {
            let failure = ActionError::Precondition {
                message: unmet.message,
            };
            return self.interrupt(ctx, failure);
        }

        for cue in self.sub_timers.advance() {
            ctx.presentation.play_sound(cue);
        }

        match self.phase {
            ActionPhase::Pending => self.start(ctx),
            _ => self.tick(ctx),
        }
    }

    /// Stop the run at a tick boundary. Does nothing once terminal.
    pub fn cancel(&mut self, ctx: &mut ActionContext<'_>, reason: CancelReason) {
        if self.phase.is_terminal() {
            return;
        }
        self.finish(
            ctx,
            RunOutcome::Interrupted(InterruptReason::Cancelled(reason)),
            None,
        );
    }

    fn start(&mut self, ctx: &mut ActionContext<'_>) -> ActionSignal {
        let first = self.action.delta(ctx);
        if let Err(reason) = transaction::check(&*ctx.inventory, &first) {
            let failure = ActionError::Capacity {
                reason,
                message: self.rejection_message(reason),
            };
            return self.interrupt(ctx, failure);
        }

        self.phase = ActionPhase::Started;
        info!(
            run = %self.id,
            actor = %self.actor,
            action = self.action.name(),
            budget = self.budget,
            "action started"
        );
        self.tick_countdown = self.action.begin(ctx).max(1);
        self.start_swing(ctx);
        ActionSignal::Continue
    }

    fn tick(&mut self, ctx: &mut ActionContext<'_>) -> ActionSignal {
        self.phase = ActionPhase::Ticking;
        self.tick_countdown = self.tick_countdown.saturating_sub(1);
        if self.tick_countdown > 0 {
            self.maybe_reswing(ctx);
            return ActionSignal::Continue;
        }
        self.run_body(ctx)
    }

    fn run_body(&mut self, ctx: &mut ActionContext<'_>) -> ActionSignal {
        let delta = self.action.delta(ctx);
        if let Err(reason) = transaction::check(&*ctx.inventory, &delta) {
            return self.reject(ctx, reason);
        }
        if let Err(reason) = transaction::apply(&mut *ctx.inventory, &delta) {
            warn!(
                run = %self.id,
                actor = %self.actor,
                action = self.action.name(),
                ?reason,
                "inventory transaction rejected after passing its check"
            );
            return self.interrupt(ctx, ActionError::TransactionRejected { reason });
        }

        let earned = self.action.on_grant(ctx);
        let skill = self.action.skill();
        if earned > Decimal::ZERO
            && let Some(level) = ctx.skills.add_experience(skill, earned)
        {
            ctx.presentation.send_message(&level_up_message(skill, level));
        }
        self.grants = self.grants.saturating_add(1);
        self.remaining_iterations = self.remaining_iterations.saturating_sub(1);
        debug!(
            run = %self.id,
            grants = self.grants,
            remaining = self.remaining_iterations,
            "grant applied"
        );

        if let Some(chance) = self.action.depletion_chance()
            && chance.roll(&mut *ctx.rng)
        {
            self.action.deplete(ctx);
            return self.complete(ctx, CompletionReason::Depleted, None);
        }
        if self.remaining_iterations == 0 {
            return self.complete(ctx, CompletionReason::BudgetSpent, None);
        }

        let next = self.action.delta(ctx);
        if let Err(reason) = transaction::check(&*ctx.inventory, &next) {
            return self.reject(ctx, reason);
        }
        self.tick_countdown = self.action.next_delay(ctx).max(1);
        self.start_swing(ctx);
        ActionSignal::Continue
    }

    /// Resolve a rejected delta: interrupt before the first grant, otherwise
    /// follow the full-inventory policy.
    fn reject(&mut self, ctx: &mut ActionContext<'_>, reason: RejectionReason) -> ActionSignal {
        let message = self.rejection_message(reason);
        if self.grants > 0 && self.policy.on_inventory_full == FullInventoryPolicy::Complete {
            return self.complete(ctx, CompletionReason::SoftStop(reason), Some(&message));
        }
        self.interrupt(ctx, ActionError::Capacity { reason, message })
    }

    fn rejection_message(&self, reason: RejectionReason) -> String {
        match reason {
            RejectionReason::OutputFull => self.action.full_message(),
            RejectionReason::InsufficientInput => self.action.missing_input_message(),
        }
    }

    fn start_swing(&mut self, ctx: &mut ActionContext<'_>) {
        if let Some(swing) = self.action.swing(ctx) {
            ctx.presentation.play_animation(swing.animation);
            if let Some(sound) = swing.sound {
                ctx.presentation.play_sound(sound);
            }
            if let Some(echo) = swing.echo {
                self.sub_timers.arm(ECHO_TIMER, echo.after_ticks, echo.sound);
            }
        }
        if let Some(interval) = self.policy.swing_interval {
            self.swing_countdown = interval.get();
        }
    }

    fn maybe_reswing(&mut self, ctx: &mut ActionContext<'_>) {
        if self.policy.swing_interval.is_none() {
            return;
        }
        self.swing_countdown = self.swing_countdown.saturating_sub(1);
        if self.swing_countdown == 0 {
            self.start_swing(ctx);
        }
    }

    fn complete(
        &mut self,
        ctx: &mut ActionContext<'_>,
        reason: CompletionReason,
        message: Option<&str>,
    ) -> ActionSignal {
        self.finish(ctx, RunOutcome::Completed(reason), message)
    }

    fn interrupt(&mut self, ctx: &mut ActionContext<'_>, failure: ActionError) -> ActionSignal {
        let message = failure.message().map(str::to_owned);
        self.finish(
            ctx,
            RunOutcome::Interrupted(InterruptReason::Failed(failure)),
            message.as_deref(),
        )
    }

    fn finish(
        &mut self,
        ctx: &mut ActionContext<'_>,
        outcome: RunOutcome,
        message: Option<&str>,
    ) -> ActionSignal {
        if let Some(text) = message {
            ctx.presentation.send_message(text);
        }
        self.sub_timers.clear();
        ctx.presentation.reset_animation();
        self.phase = match outcome {
            RunOutcome::Completed(_) => ActionPhase::Completed,
            RunOutcome::Interrupted(_) => ActionPhase::Interrupted,
        };
        info!(
            run = %self.id,
            actor = %self.actor,
            action = self.action.name(),
            grants = self.grants,
            ?outcome,
            "action finished"
        );
        self.outcome = Some(outcome);
        self.phase.signal()
    }
}

/// A run as seen by the scheduler, independent of its action type.
pub trait ScheduledAction {
    /// Unique id of the run.
    fn id(&self) -> RunId;

    /// The acting player.
    fn actor(&self) -> ActorId;

    /// Short action name for logs.
    fn name(&self) -> &'static str;

    /// Current phase.
    fn phase(&self) -> ActionPhase;

    /// Successful ticks so far.
    fn grants(&self) -> u32;

    /// How the run ended, once it has.
    fn outcome(&self) -> Option<&RunOutcome>;

    /// Run one invocation.
    fn advance(&mut self, ctx: &mut ActionContext<'_>) -> ActionSignal;

    /// Stop the run at a tick boundary.
    fn cancel(&mut self, ctx: &mut ActionContext<'_>, reason: CancelReason);
}

impl<A: TimedAction> ScheduledAction for ActionRun<A> {
    fn id(&self) -> RunId {
        self.id
    }

    fn actor(&self) -> ActorId {
        self.actor
    }

    fn name(&self) -> &'static str {
        self.action.name()
    }

    fn phase(&self) -> ActionPhase {
        self.phase
    }

    fn grants(&self) -> u32 {
        self.grants
    }

    fn outcome(&self) -> Option<&RunOutcome> {
        self.outcome.as_ref()
    }

    fn advance(&mut self, ctx: &mut ActionContext<'_>) -> ActionSignal {
        Self::advance(self, ctx)
    }

    fn cancel(&mut self, ctx: &mut ActionContext<'_>, reason: CancelReason) {
        Self::cancel(self, ctx, reason);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::num::NonZeroU32;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use tickwork_types::{AnimationId, ItemId, ItemStack, Position, SoundCue, SoundId};
    use tickwork_world::MemoryWorld;

    use super::*;
    use crate::config::IterationBudget;
    use crate::inventory::{Inventory, ItemContainer};
    use crate::presentation::{Cue, CueLog, Echo};
    use crate::skills::SkillSet;
    use crate::timing::{DelayInputs, harvest_delay};

    const ORE: ItemId = ItemId(436);
    const PICK: AnimationId = AnimationId(625);
    const HIT: SoundCue = SoundCue::new(SoundId(432));

    /// Produces one ore every `delay` ticks.
    struct Produce {
        delay: u32,
        depletion: Option<OneIn>,
        swing: Option<Swing>,
        allowed: bool,
        depleted: bool,
        bonus: bool,
        timing: Option<DelayInputs>,
    }

    impl Produce {
        fn every(delay: u32) -> Self {
            Self {
                delay,
                depletion: None,
                swing: None,
                allowed: true,
                depleted: false,
                bonus: false,
                timing: None,
            }
        }
    }

    impl TimedAction for Produce {
        fn name(&self) -> &'static str {
            "produce"
        }
        fn skill(&self) -> Skill {
            Skill::Mining
        }
        fn check(&self, _ctx: &ActionContext<'_>) -> Result<(), Unmet> {
            if self.allowed {
                Ok(())
            } else {
                Err(Unmet::with_message("You cannot do that."))
            }
        }
        fn begin(&mut self, ctx: &mut ActionContext<'_>) -> u32 {
            ctx.presentation.send_message("begin");
            self.next_delay(ctx)
        }
        fn delta(&self, _ctx: &ActionContext<'_>) -> InventoryDelta {
            InventoryDelta::produce(vec![ItemStack::one(ORE)])
        }
        fn experience(&self) -> Decimal {
            Decimal::from(10)
        }
        fn on_grant(&mut self, ctx: &mut ActionContext<'_>) -> Decimal {
            ctx.presentation.send_message("granted");
            if self.bonus {
                Decimal::ZERO
            } else {
                self.experience()
            }
        }
        fn next_delay(&mut self, ctx: &mut ActionContext<'_>) -> u32 {
            self.timing
                .map_or(self.delay, |inputs| harvest_delay(&inputs, &mut *ctx.rng))
        }
        fn swing(&self, _ctx: &ActionContext<'_>) -> Option<Swing> {
            self.swing
        }
        fn depletion_chance(&self) -> Option<OneIn> {
            self.depletion
        }
        fn deplete(&mut self, _ctx: &mut ActionContext<'_>) {
            self.depleted = true;
        }
        fn missing_input_message(&self) -> String {
            String::from("You have nothing to work with.")
        }
    }

    struct Harness {
        actor: ActorId,
        skills: SkillSet,
        inventory: ItemContainer,
        world: MemoryWorld,
        log: CueLog,
        rng: SmallRng,
    }

    impl Harness {
        fn new(capacity: u32) -> Self {
            Self {
                actor: ActorId::new(),
                skills: SkillSet::new(),
                inventory: ItemContainer::new(capacity),
                world: MemoryWorld::new(),
                log: CueLog::new(),
                rng: SmallRng::seed_from_u64(5),
            }
        }

        fn run<A: TimedAction>(&mut self, action: A, iterations: u32) -> ActionRun<A> {
            self.run_with(action, policy(iterations, FullInventoryPolicy::Complete))
        }

        fn run_with<A: TimedAction>(&mut self, action: A, policy: ActionPolicy) -> ActionRun<A> {
            ActionRun::new(self.actor, action, policy, &mut self.rng)
        }

        fn advance<A: TimedAction>(&mut self, run: &mut ActionRun<A>) -> ActionSignal {
            let mut ctx = ActionContext {
                tick: 0,
                actor: self.actor,
                position: Position::ground(3000, 3000),
                wielded: None,
                skills: &mut self.skills,
                inventory: &mut self.inventory,
                world: &mut self.world,
                presentation: &mut self.log,
                rng: &mut self.rng,
            };
            run.advance(&mut ctx)
        }

        fn cancel<A: TimedAction>(&mut self, run: &mut ActionRun<A>, reason: CancelReason) {
            let mut ctx = ActionContext {
                tick: 0,
                actor: self.actor,
                position: Position::ground(3000, 3000),
                wielded: None,
                skills: &mut self.skills,
                inventory: &mut self.inventory,
                world: &mut self.world,
                presentation: &mut self.log,
                rng: &mut self.rng,
            };
            run.cancel(&mut ctx, reason);
        }

        /// Advance until the run leaves its slot, returning the final signal
        /// and the number of invocations.
        fn drive<A: TimedAction>(&mut self, run: &mut ActionRun<A>) -> (ActionSignal, u32) {
            for invocation in 1..=10_000 {
                let signal = self.advance(run);
                if signal.is_terminal() {
                    return (signal, invocation);
                }
            }
            (ActionSignal::Continue, 10_000)
        }
    }

    fn policy(iterations: u32, on_inventory_full: FullInventoryPolicy) -> ActionPolicy {
        ActionPolicy {
            iterations: IterationBudget::Fixed(iterations),
            on_inventory_full,
            swing_interval: None,
        }
    }

    #[test]
    fn first_invocation_only_begins() {
        let mut h = Harness::new(28);
        let mut run = h.run(Produce::every(3), 5);

        assert_eq!(h.advance(&mut run), ActionSignal::Continue);
        assert_eq!(run.phase(), ActionPhase::Started);
        assert_eq!(run.tick_countdown(), 3);
        assert_eq!(h.log.messages(), vec!["begin"]);
        assert_eq!(h.inventory.count(ORE), 0);
        assert_eq!(h.skills.experience(Skill::Mining), Decimal::ZERO);
    }

    #[test]
    fn tick_body_runs_when_countdown_reaches_zero() {
        let mut h = Harness::new(28);
        let mut run = h.run(Produce::every(3), 5);
        h.advance(&mut run);

        h.advance(&mut run);
        h.advance(&mut run);
        assert_eq!(run.phase(), ActionPhase::Ticking);
        assert_eq!(h.inventory.count(ORE), 0);

        h.advance(&mut run);
        assert_eq!(h.inventory.count(ORE), 1);
        assert_eq!(h.skills.experience(Skill::Mining), Decimal::from(10));
        assert_eq!(run.tick_countdown(), 3);
        assert_eq!(run.remaining_iterations(), 4);
    }

    #[test]
    fn budget_bounds_grants() {
        let mut h = Harness::new(28);
        let mut run = h.run(Produce::every(1), 4);
        let (signal, _) = h.drive(&mut run);

        assert_eq!(signal, ActionSignal::Complete);
        assert_eq!(h.inventory.count(ORE), 4);
        assert_eq!(run.grants(), 4);
        assert_eq!(
            run.outcome(),
            Some(&RunOutcome::Completed(CompletionReason::BudgetSpent))
        );
    }

    #[test]
    fn full_inventory_at_start_interrupts_without_mutation() {
        let mut h = Harness::new(2);
        h.inventory.add_all(&[ItemStack::new(ItemId(1), 2)]).unwrap();
        let before = h.inventory.clone();
        let mut run = h.run(Produce::every(2), 5);

        assert_eq!(h.advance(&mut run), ActionSignal::Interrupt);
        assert_eq!(run.phase(), ActionPhase::Interrupted);
        assert_eq!(h.inventory, before);
        assert_eq!(h.skills, SkillSet::new());
        assert_eq!(h.log.messages(), vec![INVENTORY_FULL_MESSAGE]);
        assert!(matches!(
            run.outcome(),
            Some(RunOutcome::Interrupted(InterruptReason::Failed(
                ActionError::Capacity {
                    reason: RejectionReason::OutputFull,
                    ..
                }
            )))
        ));
    }

    #[test]
    fn filling_up_mid_run_follows_policy() {
        for (policy_kind, expected) in [
            (FullInventoryPolicy::Complete, ActionSignal::Complete),
            (FullInventoryPolicy::Interrupt, ActionSignal::Interrupt),
        ] {
            let mut h = Harness::new(3);
            let mut run = h.run_with(Produce::every(1), policy(10, policy_kind));
            let (signal, _) = h.drive(&mut run);
            assert_eq!(signal, expected);
            assert_eq!(run.grants(), 3);
            assert_eq!(h.inventory.count(ORE), 3);
            assert_eq!(h.log.messages().last(), Some(&INVENTORY_FULL_MESSAGE));
        }
    }

    #[test]
    fn rejected_tick_emits_no_grant_effects() {
        let mut h = Harness::new(2);
        let mut run = h.run(Produce::every(3), 5);
        h.advance(&mut run);
        // The host fills the backpack between ticks.
        h.inventory.add_all(&[ItemStack::new(ItemId(1), 2)]).unwrap();
        let before = h.inventory.clone();
        h.log.clear();

        let (signal, _) = h.drive(&mut run);
        assert_eq!(signal, ActionSignal::Interrupt);
        assert_eq!(h.inventory, before);
        assert_eq!(h.skills.experience(Skill::Mining), Decimal::ZERO);
        assert!(!h.log.messages().contains(&"granted"));
        assert_eq!(h.log.cues(), &[
            Cue::Message(String::from(INVENTORY_FULL_MESSAGE)),
            Cue::ResetAnimation,
        ]);
    }

    #[test]
    fn certain_depletion_completes_after_first_grant() {
        let mut h = Harness::new(28);
        let mut action = Produce::every(2);
        action.depletion = Some(OneIn::ALWAYS);
        let mut run = h.run(action, 50);
        let (signal, _) = h.drive(&mut run);

        assert_eq!(signal, ActionSignal::Complete);
        assert_eq!(run.grants(), 1);
        assert!(run.action().depleted);
        assert_eq!(
            run.outcome(),
            Some(&RunOutcome::Completed(CompletionReason::Depleted))
        );
    }

    #[test]
    fn failed_check_interrupts_with_message() {
        let mut h = Harness::new(28);
        let mut action = Produce::every(5);
        action.allowed = false;
        let mut run = h.run(action, 5);
        assert_eq!(h.advance(&mut run), ActionSignal::Interrupt);
        assert_eq!(h.log.messages(), vec!["You cannot do that."]);
        assert_eq!(h.advance(&mut run), ActionSignal::Interrupt);
        assert_eq!(h.log.messages().len(), 1);
    }

    #[test]
    fn swing_echo_fires_and_is_cancelled_on_interrupt() {
        let mut h = Harness::new(28);
        let mut action = Produce::every(10);
        action.swing = Some(Swing {
            animation: PICK,
            sound: None,
            echo: Some(Echo {
                sound: HIT,
                after_ticks: 2,
            }),
        });
        let mut run = h.run(action, 5);

        h.advance(&mut run);
        assert_eq!(h.log.animations(), vec![PICK]);
        assert!(h.log.sounds().is_empty());
        h.advance(&mut run);
        assert!(h.log.sounds().is_empty());
        h.advance(&mut run);
        assert_eq!(h.log.sounds(), vec![HIT]);

        // A fresh swing re-arms the echo; cancelling drops it.
        h.log.clear();
        let mut action = Produce::every(10);
        action.swing = run.action().swing;
        let mut run = h.run(action, 5);
        h.advance(&mut run);
        assert!(!run.sub_timers().is_empty());
        h.cancel(&mut run, CancelReason::Movement);
        assert!(run.sub_timers().is_empty());
        assert_eq!(h.log.last(), Some(&Cue::ResetAnimation));
        assert_eq!(h.advance(&mut run), ActionSignal::Interrupt);
        assert!(h.log.sounds().is_empty());
    }

    #[test]
    fn swing_repeats_on_interval_while_waiting() {
        let mut h = Harness::new(28);
        let mut action = Produce::every(7);
        action.swing = Some(Swing {
            animation: PICK,
            sound: None,
            echo: None,
        });
        let mut run = h.run_with(action, ActionPolicy {
            swing_interval: NonZeroU32::new(3),
            ..policy(5, FullInventoryPolicy::Complete)
        });
        for _ in 0..7 {
            h.advance(&mut run);
        }
        // Start, then every third waiting tick.
        assert_eq!(h.log.animations().len(), 3);
    }

    #[test]
    fn cancel_leaves_inventory_untouched() {
        let mut h = Harness::new(28);
        let mut run = h.run(Produce::every(2), 5);
        h.advance(&mut run);
        h.advance(&mut run);
        h.advance(&mut run);
        let before = h.inventory.clone();
        h.cancel(&mut run, CancelReason::Logout);
        assert_eq!(h.inventory, before);
        assert_eq!(
            run.outcome(),
            Some(&RunOutcome::Interrupted(InterruptReason::Cancelled(
                CancelReason::Logout
            )))
        );
        // Cancelling twice keeps the first outcome.
        h.cancel(&mut run, CancelReason::Stopped);
        assert!(matches!(
            run.outcome(),
            Some(RunOutcome::Interrupted(InterruptReason::Cancelled(
                CancelReason::Logout
            )))
        ));
    }

    #[test]
    fn level_up_is_announced() {
        let mut h = Harness::new(28);
        let mut run = h.run(Produce::every(1), 9);
        h.drive(&mut run);
        assert!(
            h.log
                .messages()
                .contains(&"You've just advanced a Mining level! You have reached level 2.")
        );
    }

    #[test]
    fn bonus_tick_grants_items_without_experience() {
        let mut h = Harness::new(28);
        let mut action = Produce::every(1);
        action.bonus = true;
        let mut run = h.run(action, 3);
        let (signal, _) = h.drive(&mut run);

        assert_eq!(signal, ActionSignal::Complete);
        assert_eq!(h.inventory.count(ORE), 3);
        assert_eq!(h.skills.experience(Skill::Mining), Decimal::ZERO);
        assert_eq!(h.log.messages(), vec!["begin", "granted", "granted", "granted"]);
    }

    #[test]
    fn level_one_harvest_begins_then_grants_or_depletes() {
        let inputs = DelayInputs {
            base_time_units: 25,
            tool_strength: 0,
            resistance: 0,
            actor_level: 1,
            required_level: 1,
        };
        let mut kept_going: u32 = 0;
        for seed in 0..50 {
            let mut h = Harness::new(1_000);
            h.rng = SmallRng::seed_from_u64(seed);
            let mut action = Produce::every(1);
            action.timing = Some(inputs);
            action.depletion = Some(OneIn::new(8).unwrap());
            let mut run = h.run(action, 1_000);

            assert_eq!(h.advance(&mut run), ActionSignal::Continue);
            assert_eq!(h.inventory.count(ORE), 0);
            assert_eq!(h.log.messages(), vec!["begin"]);
            assert!((12..=25).contains(&run.tick_countdown()));

            let mut since_grant: u32 = 0;
            loop {
                let before = run.grants();
                let signal = h.advance(&mut run);
                since_grant = since_grant.saturating_add(1);
                if run.grants() > before {
                    assert!((12..=25).contains(&since_grant), "gap {since_grant}");
                    since_grant = 0;
                }
                if signal.is_terminal() {
                    break;
                }
                assert!(since_grant <= 25);
            }

            assert_eq!(
                run.outcome(),
                Some(&RunOutcome::Completed(CompletionReason::Depleted))
            );
            assert!(run.action().depleted);
            assert_eq!(h.inventory.count(ORE), run.grants());
            if run.grants() > 1 {
                kept_going = kept_going.saturating_add(1);
            }
        }
        assert!(kept_going > 0);
    }
}
