//! Type-safe identifier wrappers.
//!
//! Two families of identifiers exist:
//!
//! - Session identifiers ([`ActorId`], [`RunId`]) wrap a [`Uuid`] v7 so
//!   they sort by creation time in logs.
//! - Content identifiers ([`ItemId`], [`ObjectId`], [`AnimationId`],
//!   [`SoundId`], [`ButtonId`]) wrap the small integers the host's cache
//!   uses for items, world objects, animations, sounds and interface
//!   buttons. They are fixed by the game data and never generated here.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

/// Generates a newtype wrapper around a cache integer id.
macro_rules! define_content_id {
    (
        $(#[$meta:meta])*
        $name:ident($inner:ty)
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl $name {
            /// Return the raw cache id.
            pub const fn get(self) -> $inner {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id! {
    /// Unique identifier for a mob (player or npc) driving actions.
    ActorId
}

define_id! {
    /// Unique identifier for one live action run. Only used to correlate log lines.
    RunId
}

define_content_id! {
    /// Cache id of an item definition.
    ItemId(u32)
}

define_content_id! {
    /// Cache id of a world object definition (tree, stump, rock, ...).
    ObjectId(u32)
}

define_content_id! {
    /// Cache id of an animation sequence.
    AnimationId(u16)
}

define_content_id! {
    /// Cache id of a sound effect.
    SoundId(u16)
}

define_content_id! {
    /// Interface button id as reported by the client.
    ButtonId(u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(ActorId::new(), ActorId::new());
        assert_ne!(RunId::new().into_inner(), Uuid::nil());
    }

    #[test]
    fn content_ids_serialize_as_plain_integers() {
        let json = serde_json::to_string(&ItemId(1511)).ok();
        assert_eq!(json.as_deref(), Some("1511"));
        let back: Result<ObjectId, _> = serde_json::from_str("1276");
        assert_eq!(back.ok(), Some(ObjectId(1276)));
    }

    #[test]
    fn display_matches_inner() {
        let id = ActorId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
        assert_eq!(SoundId(471).to_string(), "471");
    }
}
