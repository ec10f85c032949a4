//! Level resources compiled into the binary
//!
//! Hosts that ship their own level files go through `LevelGrid::load_named`;
//! these are the fallback set.

/// Name of the level the game starts on
pub const DEFAULT_LEVEL: &str = "level1";

const LEVEL1: &str = include_str!("level1.txt");

/// Names of all built-in levels
pub const BUILTIN_LEVELS: &[&str] = &["level1"];

/// Raw text of a built-in level
pub fn builtin(name: &str) -> Option<&'static str> {
    match name {
        "level1" => Some(LEVEL1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYER_START;
    use crate::sim::LevelGrid;

    #[test]
    fn test_builtin_levels_resolve() {
        for name in BUILTIN_LEVELS {
            assert!(builtin(name).is_some(), "missing level {name}");
        }
        assert!(builtin(DEFAULT_LEVEL).is_some());
    }

    #[test]
    fn test_level1_fits_scene_and_start_is_open() {
        let grid = LevelGrid::builtin("level1").unwrap();
        assert_eq!(grid.width(), 16);
        assert_eq!(grid.height(), 12);
        assert_eq!(grid.symbol_at(PLAYER_START), Some(' '));
    }

    #[test]
    fn test_level1_contents() {
        let grid = LevelGrid::builtin("level1").unwrap();
        let count = |symbol| grid.cells().filter(|c| c.symbol == symbol).count();
        assert_eq!(count('s'), 3);
        assert_eq!(count('v'), 4);
        assert_eq!(count('f'), 1);
    }
}
