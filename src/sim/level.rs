//! Level grid parsing
//!
//! A level is plain text, one grid row per line. The first line of text is the
//! TOP of the maze, so rows are reversed on load: row 0 is the bottom line and
//! sits at the lowest world y.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{grid_to_world, world_to_grid};

/// Extension used for level resources on disk
pub const LEVEL_EXTENSION: &str = "txt";

/// Failure to obtain a level's text
#[derive(Debug)]
pub enum LevelLoadError {
    /// No level resource with this name or path
    NotFound { name: String },
    /// The resource exists but could not be read
    Io { path: PathBuf, source: io::Error },
    /// The resource is not valid UTF-8 text
    Encoding { name: String },
}

impl fmt::Display for LevelLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelLoadError::NotFound { name } => write!(f, "level '{}' not found", name),
            LevelLoadError::Io { path, source } => {
                write!(f, "failed to read level {}: {}", path.display(), source)
            }
            LevelLoadError::Encoding { name } => write!(f, "level '{}' is not valid UTF-8", name),
        }
    }
}

impl std::error::Error for LevelLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelLoadError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// One occupied grid cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Row counted from the bottom of the maze
    pub row: usize,
    pub column: usize,
    pub symbol: char,
    /// World-space center of the cell
    pub position: Vec2,
}

/// Parsed level, rows stored bottom-up
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelGrid {
    rows: Vec<Vec<char>>,
}

impl LevelGrid {
    /// Parse level text. Never fails: ragged rows are kept as-is and unknown
    /// symbols are left for the catalog to skip.
    pub fn parse(text: &str) -> Self {
        let rows = text
            .split('\n')
            .rev()
            .map(|line| line.chars().collect())
            .collect();
        Self { rows }
    }

    /// Decode raw resource bytes
    pub fn from_bytes(name: &str, bytes: &[u8]) -> Result<Self, LevelLoadError> {
        let text = std::str::from_utf8(bytes).map_err(|_| LevelLoadError::Encoding {
            name: name.to_string(),
        })?;
        Ok(Self::parse(text))
    }

    /// Read a level file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelLoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LevelLoadError::NotFound {
                name: path.display().to_string(),
            },
            _ => LevelLoadError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        let grid = Self::from_bytes(&path.display().to_string(), &bytes)?;
        log::info!(
            "Loaded level {} ({}x{})",
            path.display(),
            grid.width(),
            grid.height()
        );
        Ok(grid)
    }

    /// Read `<dir>/<name>.txt`
    pub fn load_named(dir: impl AsRef<Path>, name: &str) -> Result<Self, LevelLoadError> {
        let path = dir.as_ref().join(name).with_extension(LEVEL_EXTENSION);
        Self::load(path)
    }

    /// Level compiled into the crate
    pub fn builtin(name: &str) -> Result<Self, LevelLoadError> {
        crate::levels::builtin(name)
            .map(Self::parse)
            .ok_or_else(|| LevelLoadError::NotFound {
                name: name.to_string(),
            })
    }

    /// Number of rows (text lines)
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Symbol at (row from bottom, column); `None` past the end of a ragged row
    pub fn symbol(&self, row: usize, column: usize) -> Option<char> {
        self.rows.get(row).and_then(|r| r.get(column)).copied()
    }

    /// Symbol under a world-space point
    pub fn symbol_at(&self, pos: Vec2) -> Option<char> {
        world_to_grid(pos).and_then(|(row, column)| self.symbol(row, column))
    }

    /// Every non-space cell, bottom row first, left to right
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .filter(|(_, symbol)| **symbol != ' ')
                .map(move |(column, &symbol)| Cell {
                    row,
                    column,
                    symbol,
                    position: grid_to_world(row, column),
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rows_are_reversed() {
        let grid = LevelGrid::parse("f\ns\nx");
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), 3);
        assert_eq!((cells[0].symbol, cells[0].position), ('x', Vec2::new(32.0, 32.0)));
        assert_eq!((cells[1].symbol, cells[1].position), ('s', Vec2::new(32.0, 96.0)));
        assert_eq!((cells[2].symbol, cells[2].position), ('f', Vec2::new(32.0, 160.0)));
    }

    #[test]
    fn test_spaces_produce_no_cells() {
        let grid = LevelGrid::parse("x x\n   ");
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].row, 1);
        assert_eq!(cells[0].column, 0);
        assert_eq!(cells[1].column, 2);
        assert_eq!(cells[1].position, Vec2::new(160.0, 96.0));
    }

    #[test]
    fn test_ragged_rows_tolerated() {
        let grid = LevelGrid::parse("xxxxx\nx\nxxx");
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.symbol(1, 0), Some('x'));
        assert_eq!(grid.symbol(1, 1), None);
        assert_eq!(grid.cells().count(), 9);
    }

    #[test]
    fn test_trailing_newline_adds_empty_bottom_row() {
        let grid = LevelGrid::parse("x\n");
        assert_eq!(grid.height(), 2);
        let cell = grid.cells().next().unwrap();
        assert_eq!(cell.row, 1);
        assert_eq!(cell.position, Vec2::new(32.0, 96.0));
    }

    #[test]
    fn test_unknown_symbols_pass_through() {
        let grid = LevelGrid::parse("x?q");
        let symbols: Vec<_> = grid.cells().map(|c| c.symbol).collect();
        assert_eq!(symbols, vec!['x', '?', 'q']);
    }

    #[test]
    fn test_symbol_at_world_position() {
        let grid = LevelGrid::parse(" s\nxx");
        assert_eq!(grid.symbol_at(Vec2::new(96.0, 96.0)), Some('s'));
        assert_eq!(grid.symbol_at(Vec2::new(32.0, 96.0)), Some(' '));
        assert_eq!(grid.symbol_at(Vec2::new(32.0, 500.0)), None);
    }

    #[test]
    fn test_invalid_utf8_is_encoding_error() {
        let err = LevelGrid::from_bytes("bad", &[b'x', 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, LevelLoadError::Encoding { .. }));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = std::env::temp_dir().join("tilt_maze_no_such_dir");
        let err = LevelGrid::load_named(&dir, "level404").unwrap_err();
        match err {
            LevelLoadError::NotFound { name } => assert!(name.ends_with("level404.txt")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_named_reads_file() {
        let dir = std::env::temp_dir().join(format!("tilt_maze_levels_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("mini.txt"), "f\ns\nx").unwrap();

        let grid = LevelGrid::load_named(&dir, "mini").unwrap();
        assert_eq!(grid, LevelGrid::parse("f\ns\nx"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_unknown_builtin_is_not_found() {
        assert!(matches!(
            LevelGrid::builtin("level99"),
            Err(LevelLoadError::NotFound { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_positions_follow_grid_formula(lines in prop::collection::vec("[xvsf ?]{0,12}", 1..10)) {
            let text = lines.join("\n");
            let grid = LevelGrid::parse(&text);
            for cell in grid.cells() {
                prop_assert_eq!(cell.position.x, 64.0 * cell.column as f32 + 32.0);
                prop_assert_eq!(cell.position.y, 64.0 * cell.row as f32 + 32.0);
                let source_line = &lines[lines.len() - 1 - cell.row];
                prop_assert_eq!(source_line.chars().nth(cell.column), Some(cell.symbol));
            }
        }

        #[test]
        fn prop_parse_is_idempotent(text in "[xvsf \n]{0,80}") {
            let first: Vec<_> = LevelGrid::parse(&text).cells().collect();
            let second: Vec<_> = LevelGrid::parse(&text).cells().collect();
            prop_assert_eq!(first, second);
        }
    }
}
