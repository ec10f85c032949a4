//! Game state and core simulation types
//!
//! The session (score, game over flag) plus the live entity set. Everything
//! here is mutated on the simulation thread only.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::catalog::{EntityKind, EntityTemplate, player_template};
use super::physics::{BodyDesc, PhysicsWorld};
use crate::consts::*;

/// Entity identifier, also the key of the entity's physics body
pub type EntityId = u32;

/// Score and the game-over gate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Can go negative (each death costs a point)
    pub score: i64,
    /// Suspends tilt gravity and contact handling while set
    pub game_over: bool,
}

/// Slide-into-vortex animation followed by a respawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeathSequence {
    /// The player body being consumed
    pub player: EntityId,
    /// Where the player was when it touched the vortex
    pub start: Vec2,
    /// Vortex center
    pub target: Vec2,
    /// Seconds since the contact
    pub elapsed: f32,
}

impl DeathSequence {
    pub fn new(player: EntityId, start: Vec2, target: Vec2) -> Self {
        Self {
            player,
            start,
            target,
            elapsed: 0.0,
        }
    }

    /// Position and scale after `elapsed` seconds of a `move_secs` slide then `scale_secs` shrink
    pub fn pose(&self, move_secs: f32, scale_secs: f32) -> (Vec2, f32) {
        if self.elapsed < move_secs {
            let t = (self.elapsed / move_secs).clamp(0.0, 1.0);
            (self.start.lerp(self.target, t), 1.0)
        } else {
            let t = if scale_secs > 0.0 {
                ((self.elapsed - move_secs) / scale_secs).clamp(0.0, 1.0)
            } else {
                1.0
            };
            (self.target, 1.0 + (DEATH_MIN_SCALE - 1.0) * t)
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Tilt steers the player, contacts are live
    Playing,
    /// Player is being pulled into a vortex; respawns when the sequence ends
    Dying(DeathSequence),
    /// Finish reached; terminal
    GameWon,
}

/// A live entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Vec2,
    /// Visual rotation (radians)
    pub rotation: f32,
    /// Visual scale (1.0 = full size)
    pub scale: f32,
    /// Continuous spin (radians per second)
    pub spin_rate: f32,
    pub body: BodyDesc,
}

/// How a label leaves the screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LabelFade {
    /// Stays until the level is torn down
    Persistent,
    /// Alpha ramps from 1 to 0 over `duration`, then the label is dropped
    FadeOut { duration: f32, elapsed: f32 },
}

/// On-screen text overlay (UI only, no physics body)
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub position: Vec2,
    pub alpha: f32,
    pub fade: LabelFade,
}

impl Label {
    /// "+1" shown where a star was collected
    pub fn score_popup(position: Vec2, duration: f32) -> Self {
        Self {
            text: "+1".to_string(),
            position,
            alpha: 1.0,
            fade: LabelFade::FadeOut {
                duration,
                elapsed: 0.0,
            },
        }
    }

    /// Banner shown on reaching the finish
    pub fn win_banner() -> Self {
        Self {
            text: "YOU WIN".to_string(),
            position: SCENE_CENTER,
            alpha: 1.0,
            fade: LabelFade::Persistent,
        }
    }

    /// Advance the fade. Returns false once the label should be removed.
    pub fn advance(&mut self, dt: f32) -> bool {
        match &mut self.fade {
            LabelFade::Persistent => true,
            LabelFade::FadeOut { duration, elapsed } => {
                *elapsed += dt;
                if *elapsed >= *duration {
                    self.alpha = 0.0;
                    false
                } else {
                    self.alpha = 1.0 - *elapsed / *duration;
                    true
                }
            }
        }
    }
}

/// Something the host may want to react to (sound, haptics, HUD)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    StarCollected { star: EntityId, score: i64 },
    PlayerDied { player: EntityId, vortex: EntityId, score: i64 },
    PlayerRespawned { player: EntityId },
    LevelWon { score: i64 },
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub session: Session,
    pub phase: GamePhase,
    /// Live entities (sorted by id for determinism)
    pub entities: Vec<Entity>,
    /// Current player entity, if one is spawned
    pub player: Option<EntityId>,
    /// Last gravity handed to the physics world
    pub gravity: Vec2,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Text overlays (not gameplay-affecting)
    #[serde(skip)]
    pub labels: Vec<Label>,
    /// Next entity ID
    next_id: EntityId,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Empty state with no entities
    pub fn new() -> Self {
        Self {
            session: Session::default(),
            phase: GamePhase::Playing,
            entities: Vec::new(),
            player: None,
            gravity: Vec2::ZERO,
            time_ticks: 0,
            labels: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Create an entity from a template and register its body
    pub fn spawn<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        template: &EntityTemplate,
        position: Vec2,
    ) -> EntityId {
        let id = self.next_entity_id();
        let body = BodyDesc::from(template);
        world.add_body(id, &body, position);
        self.entities.push(Entity {
            id,
            kind: template.kind,
            position,
            rotation: 0.0,
            scale: 1.0,
            spin_rate: template.spin_rate,
            body,
        });
        id
    }

    /// Spawn the player at the level start
    pub fn spawn_player<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        linear_damping: f32,
    ) -> EntityId {
        let id = self.spawn(world, &player_template(linear_damping), PLAYER_START);
        self.player = Some(id);
        id
    }

    /// Remove an entity and its body
    pub fn despawn<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        id: EntityId,
    ) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        world.remove_body(id);
        if self.player == Some(id) {
            self.player = None;
        }
        Some(self.entities.remove(idx))
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// The current player entity
    pub fn player_entity(&self) -> Option<&Entity> {
        self.player.and_then(|id| self.entity(id))
    }

    /// Number of live entities of a kind
    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }

    pub fn score(&self) -> i64 {
        self.session.score
    }

    pub fn is_game_over(&self) -> bool {
        self.session.game_over
    }
}
