//! Value structs exchanged between the engine and the host.

use serde::{Deserialize, Serialize};

use crate::enums::{Direction, ObjectType};
use crate::ids::{ItemId, ObjectId, SoundId};

/// Highest valid height plane.
pub const MAX_PLANE: u8 = 3;

/// A single tile on the map.
///
/// `z` is the height plane and is always in `0..=MAX_PLANE`; the
/// constructor is the only way to build one outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    x: u32,
    y: u32,
    z: u8,
}

impl Position {
    /// Create a position, returning `None` when the plane is out of range.
    pub const fn new(x: u32, y: u32, z: u8) -> Option<Self> {
        if z > MAX_PLANE {
            return None;
        }
        Some(Self { x, y, z })
    }

    /// Create a position on the ground plane.
    pub const fn ground(x: u32, y: u32) -> Self {
        Self { x, y, z: 0 }
    }

    /// The x coordinate.
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// The y coordinate.
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// The height plane.
    pub const fn z(&self) -> u8 {
        self.z
    }

    /// Whether `other` is on the same plane and within `distance` tiles on
    /// both axes.
    pub const fn is_within_distance(&self, other: &Self, distance: u32) -> bool {
        if self.z != other.z {
            return false;
        }
        self.x.abs_diff(other.x) <= distance && self.y.abs_diff(other.y) <= distance
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// An amount of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    /// The item.
    pub item: ItemId,
    /// How many units. Always at least 1 when produced by the engine.
    pub amount: u32,
}

impl ItemStack {
    /// A stack of `amount` units.
    pub const fn new(item: ItemId, amount: u32) -> Self {
        Self { item, amount }
    }

    /// A single unit.
    pub const fn one(item: ItemId) -> Self {
        Self { item, amount: 1 }
    }
}

/// Where a world object sits: one object per `(tile, layer)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectKey {
    /// The tile.
    pub position: Position,
    /// The layer on that tile.
    pub object_type: ObjectType,
}

/// A weak reference to a placed world object.
///
/// The reference never keeps the object alive. `generation` is stamped by
/// the world when the object is placed; a reference whose generation no
/// longer matches the occupant of its key points at an object that has been
/// removed (and possibly replaced) since the reference was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldObjectRef {
    /// Object definition id.
    pub id: ObjectId,
    /// Tile the object occupies.
    pub position: Position,
    /// Layer the object occupies.
    pub object_type: ObjectType,
    /// Orientation it was placed with.
    pub direction: Direction,
    /// Placement stamp used to detect stale references.
    pub generation: u64,
}

impl WorldObjectRef {
    /// The `(tile, layer)` key of this object.
    pub const fn key(&self) -> ObjectKey {
        ObjectKey {
            position: self.position,
            object_type: self.object_type,
        }
    }
}

/// A sound effect with an optional volume override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundCue {
    /// The sound to play.
    pub sound: SoundId,
    /// Volume override, host default when absent.
    pub volume: Option<u8>,
}

impl SoundCue {
    /// A sound at the host's default volume.
    pub const fn new(sound: SoundId) -> Self {
        Self {
            sound,
            volume: None,
        }
    }

    /// A sound at an explicit volume.
    pub const fn with_volume(sound: SoundId, volume: u8) -> Self {
        Self {
            sound,
            volume: Some(volume),
        }
    }
}
