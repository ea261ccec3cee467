//! A small demo world: a grove of trees, a spinning wheel's worth of
//! fibres, and a handful of players who keep working until the loop ends.
//!
//! The demo stands in for a content layer. Each tick, [`Demo::react`]
//! looks at idle players and issues the click a real client would send
//! next: chop the assigned tree once it has grown back, or spin whatever
//! fibre is still in the backpack.

use tickwork_actions::{Axe, Inventory, Textile, Tree};
use tickwork_core::events::ContentEvent;
use tickwork_core::host::Player;
use tickwork_core::tick::EngineState;
use tickwork_types::{
    ActorId, ButtonId, Direction, ItemStack, ObjectId, ObjectType, Position, Skill,
};
use tracing::info;

use crate::error::EngineError;

const MAKE_ALL: ButtonId = ButtonId(8889);
const WAVE: ButtonId = ButtonId(163);

/// One demo woodcutter: name, level, axe, and the tree they work.
struct Woodcutter {
    name: &'static str,
    level: u8,
    axe: Axe,
    wield: bool,
    tree: ObjectId,
    tile: Position,
}

const WOODCUTTERS: &[Woodcutter] = &[
    Woodcutter {
        name: "Alder",
        level: 1,
        axe: Axe::Bronze,
        wield: false,
        tree: ObjectId(1276),
        tile: Position::ground(3200, 3230),
    },
    Woodcutter {
        name: "Birch",
        level: 20,
        axe: Axe::Steel,
        wield: false,
        tree: ObjectId(1281),
        tile: Position::ground(3204, 3230),
    },
    Woodcutter {
        name: "Cedar",
        level: 50,
        axe: Axe::Rune,
        wield: true,
        tree: ObjectId(1307),
        tile: Position::ground(3208, 3230),
    },
];

/// Demo cast and the tiles they are bound to.
#[derive(Debug, Clone, Default)]
pub struct Demo {
    woodcutters: Vec<(ActorId, Position)>,
    spinners: Vec<ActorId>,
}

/// Build the demo world inside `state`.
///
/// # Errors
///
/// Returns [`EngineError::Setup`] when a player's skills or starting items
/// cannot be applied.
pub fn populate(state: &mut EngineState) -> Result<Demo, EngineError> {
    let mut demo = Demo::default();

    for cutter in WOODCUTTERS {
        state.host.place(cutter.tree, cutter.tile, Direction::South);
        let stand = Position::ground(cutter.tile.x(), cutter.tile.y().saturating_sub(1));
        let actor = state.host.join(cutter.name, stand);
        let player = player_mut(state, actor)?;
        player.skills = player
            .skills
            .clone()
            .with_level(Skill::Woodcutting, cutter.level)
            .map_err(|e| setup(cutter.name, &e))?;
        if cutter.wield {
            player.wielded = Some(cutter.axe.item());
        } else {
            player
                .inventory
                .add_all(&[ItemStack::one(cutter.axe.item())])
                .map_err(|e| setup(cutter.name, &e))?;
        }
        demo.woodcutters.push((actor, cutter.tile));
    }

    let actor = state.host.join("Dahlia", Position::ground(3212, 3226));
    let player = player_mut(state, actor)?;
    player.skills = player
        .skills
        .clone()
        .with_level(Skill::Crafting, 12)
        .map_err(|e| setup("Dahlia", &e))?;
    player
        .inventory
        .add_all(&[
            ItemStack::new(Textile::Wool.raw(), 14),
            ItemStack::new(Textile::Flax.raw(), 6),
        ])
        .map_err(|e| setup("Dahlia", &e))?;
    demo.spinners.push(actor);

    info!(
        woodcutters = demo.woodcutters().count(),
        spinners = demo.spinners().len(),
        trees = WOODCUTTERS.len(),
        "Demo world populated"
    );
    Ok(demo)
}

fn player_mut(state: &mut EngineState, actor: ActorId) -> Result<&mut Player, EngineError> {
    state.host.player_mut(actor).ok_or_else(|| EngineError::Setup {
        message: format!("player {actor} vanished during setup"),
    })
}

fn setup(name: &str, e: &dyn std::fmt::Display) -> EngineError {
    EngineError::Setup {
        message: format!("{name}: {e}"),
    }
}

impl Demo {
    /// Woodcutter ids, in setup order.
    pub fn woodcutters(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.woodcutters.iter().map(|&(actor, _)| actor)
    }

    /// Spinner ids, in setup order.
    pub fn spinners(&self) -> &[ActorId] {
        &self.spinners
    }

    /// Clicks sent once before the first tick.
    pub fn greetings(&self) -> Vec<ContentEvent> {
        self.woodcutters
            .iter()
            .map(|&(actor, _)| ContentEvent::Emote {
                actor,
                button: WAVE,
            })
            .collect()
    }

    /// The next click for every idle player with work left.
    pub fn react(&self, state: &EngineState) -> Vec<ContentEvent> {
        let idle = |actor: ActorId| state.scheduler.active(actor).is_none();
        let mut events = Vec::new();

        for &(actor, tile) in &self.woodcutters {
            let Some(player) = state.host.player(actor) else {
                continue;
            };
            if !idle(actor) || player.inventory.is_full() {
                continue;
            }
            let grown = state
                .host
                .target_at(tile, ObjectType::Interactable)
                .is_ok_and(|target| Tree::from_object(target.id).is_some());
            if grown {
                events.push(ContentEvent::ObjectAction {
                    actor,
                    position: tile,
                    object_type: ObjectType::Interactable,
                });
            }
        }

        for &actor in &self.spinners {
            let Some(player) = state.host.player(actor) else {
                continue;
            };
            if !idle(actor) {
                continue;
            }
            let fibre = [Textile::Wool, Textile::Flax]
                .into_iter()
                .find(|textile| player.inventory.contains(textile.raw()));
            if let Some(textile) = fibre {
                events.push(ContentEvent::MakeItem {
                    actor,
                    raw: textile.raw(),
                    button: MAKE_ALL,
                    amount: None,
                });
            }
        }

        events
    }

    /// Log what every demo player ended up with.
    pub fn log_summary(&self, state: &EngineState) {
        for &(actor, _) in &self.woodcutters {
            if let Some(player) = state.host.player(actor) {
                info!(
                    name = %player.name,
                    level = player.skills.level(Skill::Woodcutting),
                    experience = %player.skills.experience(Skill::Woodcutting),
                    logs = logs_held(player),
                    "Woodcutter finished"
                );
            }
        }
        for &actor in &self.spinners {
            if let Some(player) = state.host.player(actor) {
                info!(
                    name = %player.name,
                    level = player.skills.level(Skill::Crafting),
                    experience = %player.skills.experience(Skill::Crafting),
                    balls_of_wool = player.inventory.count(Textile::Wool.processed()),
                    bow_strings = player.inventory.count(Textile::Flax.processed()),
                    "Spinner finished"
                );
            }
        }
    }
}

fn logs_held(player: &Player) -> u32 {
    [
        Tree::Normal,
        Tree::Oak,
        Tree::Willow,
        Tree::Maple,
        Tree::Yew,
        Tree::Magic,
    ]
    .into_iter()
    .map(|tree| player.inventory.count(tree.logs()))
    .fold(0_u32, u32::saturating_add)
}
