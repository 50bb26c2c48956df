//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed 60 Hz timestep only
//! - Seeded RNG only, owned by the [`World`]
//! - Stable iteration order (enemies in spawn order)
//! - No rendering or platform dependencies

pub mod ai;
pub mod combat;
pub mod enemy;
pub mod entity;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;
pub mod zone;

pub use ai::{Brain, Spell, WitchMind};
pub use combat::CombatOutcome;
pub use enemy::{Archetype, ArchetypeSpec, Enemy, EnemyId, HitOutcome, Spawn};
pub use entity::{Action, Body, Colour, Direction, FlashCode, Speed};
pub use player::{Intent, Player, PlayerStates};
pub use rect::{HitRect, WrappedRect};
pub use state::{SpawnError, WitchEvent, World};
pub use tick::{TickInput, TickReport, tick};
pub use zone::{ZoneOverlay, ZonePhase, is_vulnerable};
