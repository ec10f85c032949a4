//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (by entity ID)
//! - Physics and rendering reached only through the `PhysicsWorld` trait

pub mod catalog;
pub mod contact;
pub mod level;
pub mod physics;
pub mod scene;
pub mod state;
pub mod tick;

pub use catalog::{Category, EntityKind, EntityTemplate, Shape};
pub use contact::{Contact, resolve_contact};
pub use level::{Cell, LevelGrid, LevelLoadError};
pub use physics::{BodyDesc, HeadlessWorld, PhysicsWorld};
pub use scene::build_scene;
pub use state::{
    DeathSequence, Entity, EntityId, GameEvent, GamePhase, GameState, Label, LabelFade, Session,
};
pub use tick::{TickInput, tick, tilt_to_gravity};
