//! Tilt Maze - logic core of a tilt-controlled 2D maze game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level grid, entities, contacts, game state)
//! - `platform`: Tilt sensor abstraction
//! - `levels`: Level resources compiled into the crate
//! - `settings`: Data-driven tunables

pub mod levels;
pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz, one physics step per frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Edge length of one grid cell in world units
    pub const TILE_SIZE: f32 = 64.0;
    /// Offset from a cell's corner to its center
    pub const TILE_HALF: f32 = 32.0;

    /// Scene dimensions (landscape)
    pub const SCENE_SIZE: Vec2 = Vec2::new(1024.0, 768.0);
    pub const SCENE_CENTER: Vec2 = Vec2::new(512.0, 384.0);

    /// Player spawn and respawn point (column 1, row 10 from bottom)
    pub const PLAYER_START: Vec2 = Vec2::new(96.0, 672.0);
    pub const PLAYER_RADIUS: f32 = 32.0;
    pub const PLAYER_DAMPING: f32 = 0.5;

    /// Radius of vortex, star and finish bodies
    pub const PICKUP_RADIUS: f32 = 32.0;
    /// Vortex spin (radians per second)
    pub const VORTEX_SPIN_RATE: f32 = std::f32::consts::PI;

    /// Accelerometer reading (in g) to world gravity
    pub const TILT_GRAVITY_SCALE: f32 = 50.0;

    /// Dying sequence: slide into the vortex, then shrink away
    pub const DEATH_MOVE_SECS: f32 = 0.25;
    pub const DEATH_SCALE_SECS: f32 = 0.25;
    /// Scale the player collapses to before removal
    pub const DEATH_MIN_SCALE: f32 = 0.0001;

    /// "+1" popup fade duration
    pub const SCORE_POPUP_SECS: f32 = 1.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// World-space center of grid cell (row counted from the bottom, column from the left)
#[inline]
pub fn grid_to_world(row: usize, column: usize) -> Vec2 {
    Vec2::new(
        consts::TILE_SIZE * column as f32 + consts::TILE_HALF,
        consts::TILE_SIZE * row as f32 + consts::TILE_HALF,
    )
}

/// Grid cell containing a world-space point, if it lies in the positive quadrant
#[inline]
pub fn world_to_grid(pos: Vec2) -> Option<(usize, usize)> {
    if pos.x < 0.0 || pos.y < 0.0 {
        return None;
    }
    let column = (pos.x / consts::TILE_SIZE).floor() as usize;
    let row = (pos.y / consts::TILE_SIZE).floor() as usize;
    Some((row, column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_to_world_centers_cells() {
        assert_eq!(grid_to_world(0, 0), Vec2::new(32.0, 32.0));
        assert_eq!(grid_to_world(2, 0), Vec2::new(32.0, 160.0));
        assert_eq!(grid_to_world(10, 1), consts::PLAYER_START);
    }

    #[test]
    fn test_normalize_angle_wraps() {
        use std::f32::consts::PI;
        assert!((normalize_angle(3.0 * PI) + PI).abs() < 1e-5);
        assert!((normalize_angle(-PI / 2.0) + PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_world_to_grid_inverts_centers() {
        assert_eq!(world_to_grid(grid_to_world(3, 7)), Some((3, 7)));
        assert_eq!(world_to_grid(Vec2::new(-1.0, 5.0)), None);
    }
}
