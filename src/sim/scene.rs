//! Scene construction
//!
//! Turns a parsed level into entities registered with the physics world, then
//! drops the player at the start point with gravity off (tilt takes over on the
//! first tick).

use glam::Vec2;

use super::catalog::{self, EntityKind};
use super::level::LevelGrid;
use super::physics::PhysicsWorld;
use super::state::GameState;
use crate::consts::PLAYER_START;
use crate::settings::Settings;

/// Build a fresh game state for `level`
pub fn build_scene<W: PhysicsWorld + ?Sized>(
    level: &LevelGrid,
    settings: &Settings,
    world: &mut W,
) -> GameState {
    let mut state = GameState::new();

    for cell in level.cells() {
        match catalog::template(cell.symbol) {
            Some(template) => {
                state.spawn(world, &template, cell.position);
            }
            None => log::debug!(
                "Skipping unrecognized symbol {:?} at row {}, column {}",
                cell.symbol,
                cell.row,
                cell.column
            ),
        }
    }

    if let Some(symbol) = level.symbol_at(PLAYER_START).filter(|s| *s != ' ') {
        log::warn!("Player start {} overlaps level symbol {:?}", PLAYER_START, symbol);
    }

    state.spawn_player(world, settings.player_damping);
    state.gravity = Vec2::ZERO;
    world.set_gravity(Vec2::ZERO);

    log::info!(
        "Scene built: {} walls, {} vortices, {} stars, {} finish",
        state.count(EntityKind::Wall),
        state.count(EntityKind::Vortex),
        state.count(EntityKind::Star),
        state.count(EntityKind::Finish)
    );

    state
}
