//! The host seam and its in-memory reference implementation.
//!
//! [`ActionHost`] is what the scheduler needs from a game server: run the
//! deferred world mutations due this tick, and lend the capabilities of one
//! actor to a run for one invocation. [`MemoryHost`] implements it on top
//! of [`MemoryWorld`], [`ItemContainer`] and [`CueLog`], with one seeded
//! random source shared by every actor.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tickwork_actions::{
    ActionContext, CueLog, EmoteBindings, ItemContainer, ScheduledAction, SkillSet,
};
use tickwork_types::{
    ActionSignal, ActorId, ButtonId, CancelReason, Direction, ItemId, ObjectId, ObjectKey,
    ObjectType, Position, WorldObjectRef,
};
use tickwork_world::{MemoryWorld, WorldCapability, WorldError};
use tracing::{debug, info};

use crate::config::EngineConfig;

/// What the scheduler needs from the game server.
pub trait ActionHost {
    /// Run the deferred world mutations due at `tick`. Returns how many ran.
    fn begin_tick(&mut self, tick: u64) -> usize;

    /// Whether `actor` is present.
    fn knows(&self, actor: ActorId) -> bool;

    /// Invoke `run` once with its actor's capabilities. `None` when the
    /// actor is gone.
    fn advance(&mut self, tick: u64, run: &mut dyn ScheduledAction) -> Option<ActionSignal>;

    /// Cancel `run` with its actor's capabilities. Returns whether the
    /// actor was present.
    fn cancel(&mut self, tick: u64, run: &mut dyn ScheduledAction, reason: CancelReason) -> bool;
}

/// One connected player.
#[derive(Debug, Clone)]
pub struct Player {
    /// Display name.
    pub name: String,
    /// Current tile.
    pub position: Position,
    /// Item in the weapon slot.
    pub wielded: Option<ItemId>,
    /// Skill experience.
    pub skills: SkillSet,
    /// Backpack.
    pub inventory: ItemContainer,
    /// Everything presented to the player.
    pub log: CueLog,
}

/// Reference in-memory host.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    world: MemoryWorld,
    players: BTreeMap<ActorId, Player>,
    rng: SmallRng,
    capacity: u32,
    emotes: EmoteBindings,
}

impl MemoryHost {
    /// An empty world with a seeded random source.
    pub fn new(seed: u64, capacity: u32) -> Self {
        Self {
            world: MemoryWorld::new(),
            players: BTreeMap::new(),
            rng: SmallRng::seed_from_u64(seed),
            capacity,
            emotes: EmoteBindings::standard(),
        }
    }

    /// An empty world seeded and sized from `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.world.seed, config.inventory.capacity)
    }

    /// Log a new player in at `position` with an empty backpack.
    pub fn join(&mut self, name: impl Into<String>, position: Position) -> ActorId {
        let id = ActorId::new();
        let player = Player {
            name: name.into(),
            position,
            wielded: None,
            skills: SkillSet::new(),
            inventory: ItemContainer::new(self.capacity),
            log: CueLog::new(),
        };
        info!(actor = %id, name = %player.name, %position, "player joined");
        self.players.insert(id, player);
        id
    }

    /// Log a player out. The scheduler must be told separately.
    pub fn leave(&mut self, actor: ActorId) -> Option<Player> {
        let player = self.players.remove(&actor);
        if player.is_some() {
            info!(%actor, "player left");
        }
        player
    }

    /// A connected player.
    pub fn player(&self, actor: ActorId) -> Option<&Player> {
        self.players.get(&actor)
    }

    /// A connected player, mutably.
    pub fn player_mut(&mut self, actor: ActorId) -> Option<&mut Player> {
        self.players.get_mut(&actor)
    }

    /// Every connected player, by id.
    pub fn players(&self) -> impl Iterator<Item = (&ActorId, &Player)> {
        self.players.iter()
    }

    /// The world.
    pub const fn world(&self) -> &MemoryWorld {
        &self.world
    }

    /// The world, mutably.
    pub const fn world_mut(&mut self) -> &mut MemoryWorld {
        &mut self.world
    }

    /// The shared random source, for drawing run budgets.
    pub const fn rng_mut(&mut self) -> &mut SmallRng {
        &mut self.rng
    }

    /// Place an interactable object.
    pub fn place(
        &mut self,
        id: ObjectId,
        position: Position,
        direction: Direction,
    ) -> WorldObjectRef {
        self.world
            .add_object(id, position, ObjectType::Interactable, direction)
    }

    /// A reference to the live object at `(position, object_type)`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ObjectNotFound`] when the key is empty.
    pub fn target_at(
        &self,
        position: Position,
        object_type: ObjectType,
    ) -> Result<WorldObjectRef, WorldError> {
        let key = ObjectKey {
            position,
            object_type,
        };
        self.world
            .object_at(&key)
            .ok_or(WorldError::ObjectNotFound { key })
    }

    /// Play the emote bound to `button` for `actor`. Returns whether the
    /// actor exists and the button is an emote.
    pub fn perform_emote(&mut self, actor: ActorId, button: ButtonId) -> bool {
        let Some(player) = self.players.get_mut(&actor) else {
            return false;
        };
        let performed = self.emotes.perform(button, &mut player.log);
        debug!(%actor, button = button.0, performed, "emote requested");
        performed
    }

    /// Lend `actor`'s capabilities to `f` for one invocation.
    pub fn with_context<T>(
        &mut self,
        actor: ActorId,
        tick: u64,
        f: impl FnOnce(&mut ActionContext<'_>) -> T,
    ) -> Option<T> {
        let player = self.players.get_mut(&actor)?;
        let mut ctx = ActionContext {
            tick,
            actor,
            position: player.position,
            wielded: player.wielded,
            skills: &mut player.skills,
            inventory: &mut player.inventory,
            world: &mut self.world,
            presentation: &mut player.log,
            rng: &mut self.rng,
        };
        Some(f(&mut ctx))
    }
}

impl ActionHost for MemoryHost {
    fn begin_tick(&mut self, tick: u64) -> usize {
        self.world.advance_to(tick)
    }

    fn knows(&self, actor: ActorId) -> bool {
        self.players.contains_key(&actor)
    }

    fn advance(&mut self, tick: u64, run: &mut dyn ScheduledAction) -> Option<ActionSignal> {
        self.with_context(run.actor(), tick, |ctx| run.advance(ctx))
    }

    fn cancel(&mut self, tick: u64, run: &mut dyn ScheduledAction, reason: CancelReason) -> bool {
        self.with_context(run.actor(), tick, |ctx| run.cancel(ctx, reason))
            .is_some()
    }
}
