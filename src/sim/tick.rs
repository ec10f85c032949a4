//! Fixed timestep simulation tick
//!
//! Everything time-based the core owns: tilt -> gravity, vortex spin, label
//! fades and the dying sequence.

use glam::{Vec2, Vec3};

use super::physics::PhysicsWorld;
use super::state::{GameEvent, GamePhase, GameState};
use crate::settings::Settings;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Latest accelerometer sample in g, if the sensor had one
    pub tilt: Option<Vec3>,
}

/// Accelerometer sample to world gravity (device held in landscape)
#[inline]
pub fn tilt_to_gravity(tilt: Vec3, scale: f32) -> Vec2 {
    Vec2::new(tilt.y * -scale, tilt.x * scale)
}

/// Advance the game state by one fixed timestep
pub fn tick<W: PhysicsWorld + ?Sized>(
    state: &mut GameState,
    world: &mut W,
    input: &TickInput,
    settings: &Settings,
    dt: f32,
) -> Option<GameEvent> {
    state.time_ticks += 1;

    // Spin and pick up engine-integrated positions
    for entity in &mut state.entities {
        if entity.spin_rate != 0.0 {
            entity.rotation = crate::normalize_angle(entity.rotation + entity.spin_rate * dt);
        }
        if entity.body.dynamic {
            if let Some(pos) = world.body_position(entity.id) {
                entity.position = pos;
            }
        }
    }

    state.labels.retain_mut(|label| label.advance(dt));

    // Gravity only follows the tilt while playing; a missing sample keeps the last value
    if !state.session.game_over {
        if let Some(sample) = input.tilt {
            let gravity = tilt_to_gravity(sample, settings.tilt_gravity_scale);
            state.gravity = gravity;
            world.set_gravity(gravity);
        }
    }

    match state.phase {
        GamePhase::Dying(mut seq) => {
            seq.elapsed += dt;
            let total = settings.death_sequence_secs();

            if seq.elapsed >= total {
                state.despawn(world, seq.player);
                let player = state.spawn_player(world, settings.player_damping);
                state.session.game_over = false;
                state.phase = GamePhase::Playing;
                log::info!("Player respawned as {}", player);
                return Some(GameEvent::PlayerRespawned { player });
            }

            let (pos, scale) = seq.pose(settings.death_move_secs, settings.death_scale_secs);
            world.set_position(seq.player, pos);
            if let Some(entity) = state.entity_mut(seq.player) {
                entity.position = pos;
                entity.scale = scale;
            }
            state.phase = GamePhase::Dying(seq);
            None
        }
        GamePhase::Playing | GamePhase::GameWon => None,
    }
}
