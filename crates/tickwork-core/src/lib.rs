//! Configuration, tick cycle and reference host for tickwork.
//!
//! This crate owns everything between the action engine and a running
//! server loop: the YAML configuration, the tick clock, per-actor action
//! slots, and an in-memory host that lends player and world capabilities
//! to each run.
//!
//! # Modules
//!
//! - [`clock`] -- Monotonic tick counter and its real-time pacing.
//! - [`config`] -- Configuration loading from `tickwork-config.yaml` into
//!   strongly-typed structs.
//! - [`events`] -- [`ContentEvent`] dispatch: clicks and movement to runs.
//! - [`host`] -- [`ActionHost`] trait and the [`MemoryHost`] reference.
//! - [`scheduler`] -- [`ActionScheduler`], one live run per actor.
//! - [`tick`] -- The per-tick engine loop body.
//!
//! [`ContentEvent`]: events::ContentEvent
//! [`ActionHost`]: host::ActionHost
//! [`MemoryHost`]: host::MemoryHost
//! [`ActionScheduler`]: scheduler::ActionScheduler

pub mod clock;
pub mod config;
pub mod events;
pub mod host;
pub mod scheduler;
pub mod tick;
