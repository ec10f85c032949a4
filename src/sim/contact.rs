//! Contact resolution
//!
//! The physics engine reports contact-begin as an unordered pair of bodies.
//! Only pairs involving the current player matter; the other body decides
//! what happens:
//!
//! | Subject | Effect |
//! |---------|--------|
//! | Star    | removed, score +1, "+1" popup |
//! | Vortex  | player frozen, score -1, dying sequence then respawn |
//! | Finish  | game won (terminal), "YOU WIN" banner |
//! | Wall    | nothing |

use serde::{Deserialize, Serialize};

use super::catalog::EntityKind;
use super::physics::PhysicsWorld;
use super::state::{DeathSequence, EntityId, GameEvent, GamePhase, GameState, Label};
use crate::settings::Settings;

/// Contact-begin between two bodies, in whatever order the engine gave them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub a: EntityId,
    pub b: EntityId,
}

impl Contact {
    pub fn new(a: EntityId, b: EntityId) -> Self {
        Self { a, b }
    }

    /// Same pair, slots swapped
    pub fn swapped(self) -> Self {
        Self {
            a: self.b,
            b: self.a,
        }
    }
}

/// Split a contact into (player, subject), whichever slot held the player
pub fn normalize(state: &GameState, contact: Contact) -> Option<(EntityId, EntityId)> {
    let player = state.player?;
    if contact.a == contact.b {
        return None;
    }
    if contact.a == player {
        Some((player, contact.b))
    } else if contact.b == player {
        Some((player, contact.a))
    } else {
        None
    }
}

/// Apply the effect of one contact
pub fn resolve_contact<W: PhysicsWorld + ?Sized>(
    state: &mut GameState,
    world: &mut W,
    contact: Contact,
    settings: &Settings,
) -> Option<GameEvent> {
    if state.session.game_over {
        log::debug!("Ignoring contact {:?} while game over", contact);
        return None;
    }

    let Some((player, subject)) = normalize(state, contact) else {
        log::debug!("Ignoring contact {:?} without the player", contact);
        return None;
    };
    let Some(kind) = state.entity(subject).map(|e| e.kind) else {
        log::debug!("Ignoring contact with unknown entity {}", subject);
        return None;
    };

    match kind {
        EntityKind::Star => collect_star(state, world, subject, settings),
        EntityKind::Vortex => enter_vortex(state, world, player, subject),
        EntityKind::Finish => reach_finish(state),
        EntityKind::Wall | EntityKind::Player => None,
    }
}

fn collect_star<W: PhysicsWorld + ?Sized>(
    state: &mut GameState,
    world: &mut W,
    star: EntityId,
    settings: &Settings,
) -> Option<GameEvent> {
    let removed = state.despawn(world, star)?;
    state.session.score += 1;
    state
        .labels
        .push(Label::score_popup(removed.position, settings.score_popup_secs));
    log::info!("Star {} collected, score {}", star, state.session.score);
    Some(GameEvent::StarCollected {
        star,
        score: state.session.score,
    })
}

fn enter_vortex<W: PhysicsWorld + ?Sized>(
    state: &mut GameState,
    world: &mut W,
    player: EntityId,
    vortex: EntityId,
) -> Option<GameEvent> {
    let target = state.entity(vortex)?.position;
    let start = world
        .body_position(player)
        .or_else(|| state.entity(player).map(|e| e.position))?;

    world.set_dynamic(player, false);
    if let Some(entity) = state.entity_mut(player) {
        entity.body.dynamic = false;
        entity.position = start;
    }

    state.session.game_over = true;
    state.session.score -= 1;
    state.phase = GamePhase::Dying(DeathSequence::new(player, start, target));
    log::info!(
        "Player {} fell into vortex {}, score {}",
        player,
        vortex,
        state.session.score
    );
    Some(GameEvent::PlayerDied {
        player,
        vortex,
        score: state.session.score,
    })
}

fn reach_finish(state: &mut GameState) -> Option<GameEvent> {
    state.session.game_over = true;
    state.phase = GamePhase::GameWon;
    state.labels.push(Label::win_banner());
    log::info!("Level won with score {}", state.session.score);
    Some(GameEvent::LevelWon {
        score: state.session.score,
    })
}
