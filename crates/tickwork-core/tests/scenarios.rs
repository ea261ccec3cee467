//! Whole-engine scenarios: events in, ticks run, world and players checked.

#![allow(clippy::unwrap_used, clippy::panic)]

use rust_decimal_macros::dec;
use tickwork_actions::{
    ActionError, Axe, CompletionReason, InterruptReason, Inventory, RunOutcome, Textile, Tree,
};
use tickwork_core::config::EngineConfig;
use tickwork_core::events::{ContentEvent, Dispatched, EventError, dispatch};
use tickwork_core::scheduler::FinishedRun;
use tickwork_core::tick::{EngineState, TickSummary, run_tick};
use tickwork_types::{
    ActorId, ButtonId, CancelReason, Direction, ItemStack, ObjectId, ObjectType, Position, Skill,
};
use tickwork_world::{WorldCapability, WorldError};

const NORMAL_TREE: ObjectId = ObjectId(1276);
const NORMAL_STUMP: ObjectId = ObjectId(1342);
const TREE_TILE: Position = Position::ground(3200, 3230);
const MAKE_X: ButtonId = ButtonId(8890);

fn engine() -> EngineState {
    EngineState::new(&EngineConfig::default()).unwrap()
}

fn woodcutter(state: &mut EngineState, name: &str, x: u32) -> ActorId {
    let actor = state.host.join(name, Position::ground(x, 3230));
    let player = state.host.player_mut(actor).unwrap();
    player.inventory.add_all(&[ItemStack::one(Axe::Bronze.item())]).unwrap();
    actor
}

const fn chop(actor: ActorId) -> ContentEvent {
    ContentEvent::ObjectAction {
        actor,
        position: TREE_TILE,
        object_type: ObjectType::Interactable,
    }
}

/// Tick until no run is live. Returns every tick summary.
fn run_until_idle(state: &mut EngineState) -> Vec<TickSummary> {
    let mut summaries = Vec::new();
    for _ in 0..2_000 {
        let summary = run_tick(state).unwrap();
        let idle = summary.active == 0;
        summaries.push(summary);
        if idle {
            break;
        }
    }
    summaries
}

fn finished(summaries: &[TickSummary]) -> Vec<(u64, FinishedRun)> {
    summaries
        .iter()
        .flat_map(|s| s.finished.iter().map(|f| (s.tick, f.clone())))
        .collect()
}

#[test]
fn chopping_a_tree_runs_to_a_respawn() {
    let mut state = engine();
    let tree = state.host.place(NORMAL_TREE, TREE_TILE, Direction::West);
    let actor = woodcutter(&mut state, "Woody", 3201);

    assert!(matches!(
        dispatch(&mut state, chop(actor)).unwrap(),
        Dispatched::Submitted { replaced: None, .. }
    ));
    let summaries = run_until_idle(&mut state);
    let released = finished(&summaries);
    assert_eq!(released.len(), 1);
    let (felled_at, run) = released.first().cloned().unwrap();
    assert_eq!(run.actor, actor);
    assert_eq!(run.grants, 1);
    assert_eq!(
        run.outcome,
        Some(RunOutcome::Completed(CompletionReason::Depleted))
    );

    let player = state.host.player(actor).unwrap();
    assert_eq!(player.inventory.count(Tree::Normal.logs()), 1);
    assert_eq!(player.skills.experience(Skill::Woodcutting), dec!(25));
    assert_eq!(
        state.host.world().object_at(&tree.key()).map(|o| o.id),
        Some(NORMAL_STUMP)
    );

    // The tree grows back exactly respawn_ticks after it fell.
    let mut restored_at = None;
    for _ in 0..100 {
        let summary = run_tick(&mut state).unwrap();
        if summary.restored > 0 {
            restored_at = Some(summary.tick);
            break;
        }
    }
    assert_eq!(restored_at, felled_at.checked_add(50));
    assert_eq!(
        state.host.world().object_at(&tree.key()).map(|o| o.id),
        Some(NORMAL_TREE)
    );
}

#[test]
fn two_woodcutters_share_one_stump() {
    let mut state = engine();
    let tree = state.host.place(NORMAL_TREE, TREE_TILE, Direction::West);
    let first = woodcutter(&mut state, "First", 3201);
    let second = woodcutter(&mut state, "Second", 3199);
    dispatch(&mut state, chop(first)).unwrap();
    dispatch(&mut state, chop(second)).unwrap();

    let released = finished(&run_until_idle(&mut state));
    assert_eq!(released.len(), 2);
    let depleted = released
        .iter()
        .filter(|(_, run)| run.outcome == Some(RunOutcome::Completed(CompletionReason::Depleted)))
        .count();
    let silent = released
        .iter()
        .filter(|(_, run)| {
            run.outcome
                == Some(RunOutcome::Interrupted(InterruptReason::Failed(
                    ActionError::Precondition { message: None },
                )))
        })
        .count();
    assert_eq!((depleted, silent), (1, 1));

    let logs: u32 = [first, second]
        .iter()
        .map(|&actor| state.host.player(actor).unwrap().inventory.count(Tree::Normal.logs()))
        .sum();
    assert_eq!(logs, 1);
    assert_eq!(state.host.world().pending_mutations(), 1);
    assert_eq!(
        state.host.world().object_at(&tree.key()).map(|o| o.id),
        Some(NORMAL_STUMP)
    );
}

#[test]
fn new_action_replaces_the_running_one() {
    let mut state = engine();
    let tree = state.host.place(NORMAL_TREE, TREE_TILE, Direction::West);
    let actor = woodcutter(&mut state, "Switcher", 3201);
    state
        .host
        .player_mut(actor)
        .unwrap()
        .inventory
        .add_all(&[ItemStack::new(Textile::Wool.raw(), 2)])
        .unwrap();

    dispatch(&mut state, chop(actor)).unwrap();
    run_tick(&mut state).unwrap();
    run_tick(&mut state).unwrap();

    let spin = ContentEvent::MakeItem {
        actor,
        raw: Textile::Wool.raw(),
        button: MAKE_X,
        amount: Some(2),
    };
    let Dispatched::Submitted {
        replaced: Some(replaced),
        ..
    } = dispatch(&mut state, spin).unwrap()
    else {
        panic!("expected the chop to be replaced");
    };
    assert_eq!(replaced.action, "cut_tree");
    assert_eq!(
        replaced.outcome,
        Some(RunOutcome::Interrupted(InterruptReason::Cancelled(
            CancelReason::Replaced
        )))
    );
    assert!(state.host.world().is_live(&tree));

    run_until_idle(&mut state);
    let player = state.host.player(actor).unwrap();
    assert_eq!(player.inventory.count(Textile::Wool.processed()), 2);
    assert_eq!(player.inventory.count(Tree::Normal.logs()), 0);
}

#[test]
fn moving_cancels_and_logout_disconnects() {
    let mut state = engine();
    state.host.place(NORMAL_TREE, TREE_TILE, Direction::West);
    let actor = woodcutter(&mut state, "Walker", 3201);
    dispatch(&mut state, chop(actor)).unwrap();
    run_tick(&mut state).unwrap();

    let moved = ContentEvent::Moved {
        actor,
        to: Position::ground(3205, 3230),
    };
    let Dispatched::Cancelled(Some(run)) = dispatch(&mut state, moved).unwrap() else {
        panic!("expected a cancelled run");
    };
    assert_eq!(
        run.outcome,
        Some(RunOutcome::Interrupted(InterruptReason::Cancelled(
            CancelReason::Movement
        )))
    );
    assert!(state.scheduler.is_empty());
    assert_eq!(dispatch(&mut state, moved).unwrap(), Dispatched::Cancelled(None));
    assert_eq!(
        state.host.player(actor).unwrap().position,
        Position::ground(3205, 3230)
    );

    dispatch(&mut state, ContentEvent::Logout { actor }).unwrap();
    assert!(state.host.player(actor).is_none());
    assert_eq!(
        dispatch(&mut state, chop(actor)),
        Err(EventError::UnknownActor { actor })
    );
}

#[test]
fn actor_vanishing_mid_run_frees_the_slot() {
    let mut state = engine();
    state.host.place(NORMAL_TREE, TREE_TILE, Direction::West);
    let actor = woodcutter(&mut state, "Ghost", 3201);
    dispatch(&mut state, chop(actor)).unwrap();
    run_tick(&mut state).unwrap();

    state.host.leave(actor);
    let summary = run_tick(&mut state).unwrap();
    assert_eq!(summary.active, 0);
    assert_eq!(summary.advanced, 0);
    assert_eq!(summary.finished.first().map(|run| run.actor), Some(actor));
}

#[test]
fn clicks_that_start_nothing_are_errors() {
    let mut state = engine();
    let actor = woodcutter(&mut state, "Clicker", 3201);

    assert!(matches!(
        dispatch(&mut state, chop(actor)),
        Err(EventError::World {
            source: WorldError::ObjectNotFound { .. }
        })
    ));

    state.host.place(ObjectId(1), TREE_TILE, Direction::West);
    assert!(matches!(
        dispatch(&mut state, chop(actor)),
        Err(EventError::Content { .. })
    ));

    let spin = ContentEvent::MakeItem {
        actor,
        raw: Textile::Wool.raw(),
        button: ButtonId(8889),
        amount: None,
    };
    assert_eq!(
        dispatch(&mut state, spin),
        Err(EventError::NothingToMake {
            actor,
            raw: Textile::Wool.raw()
        })
    );
    assert!(state.scheduler.is_empty());
}

#[test]
fn emote_buttons_play_immediately() {
    let mut state = engine();
    let actor = woodcutter(&mut state, "Dancer", 3201);
    assert_eq!(
        dispatch(&mut state, ContentEvent::Emote {
            actor,
            button: ButtonId(166),
        }),
        Ok(Dispatched::Emoted(true))
    );
    assert!(state.scheduler.is_empty());
}
