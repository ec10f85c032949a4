//! Entity catalog: grid symbol -> entity template
//!
//! Physical classification is plain bitmask data: each kind owns one category
//! bit, and contact/collision masks are ORs of those bits.

use std::ops::{BitOr, BitOrAssign};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Category bitmask (one bit per entity kind, OR-able into masks)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(u32);

impl Category {
    pub const NONE: Category = Category(0);
    pub const PLAYER: Category = Category(1);
    pub const WALL: Category = Category(2);
    pub const STAR: Category = Category(4);
    pub const VORTEX: Category = Category(8);
    pub const FINISH: Category = Category(16);

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True if any bit is shared
    pub const fn intersects(self, other: Category) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Category {
    type Output = Category;

    fn bitor(self, rhs: Category) -> Category {
        Category(self.0 | rhs.0)
    }
}

impl BitOrAssign for Category {
    fn bitor_assign(&mut self, rhs: Category) {
        self.0 |= rhs.0;
    }
}

/// Entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Wall,
    Vortex,
    Star,
    Finish,
    Player,
}

impl EntityKind {
    /// Kind placed by a level symbol. Unrecognized symbols place nothing.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'x' => Some(EntityKind::Wall),
            'v' => Some(EntityKind::Vortex),
            's' => Some(EntityKind::Star),
            'f' => Some(EntityKind::Finish),
            _ => None,
        }
    }

    /// Level symbol (the player has none; it is spawned, not placed)
    pub fn symbol(self) -> Option<char> {
        match self {
            EntityKind::Wall => Some('x'),
            EntityKind::Vortex => Some('v'),
            EntityKind::Star => Some('s'),
            EntityKind::Finish => Some('f'),
            EntityKind::Player => None,
        }
    }

    pub fn category(self) -> Category {
        match self {
            EntityKind::Player => Category::PLAYER,
            EntityKind::Wall => Category::WALL,
            EntityKind::Star => Category::STAR,
            EntityKind::Vortex => Category::VORTEX,
            EntityKind::Finish => Category::FINISH,
        }
    }
}

/// Collision shape handed to the physics engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { radius: f32 },
    Rectangle { size: Vec2 },
}

/// Everything needed to spawn one kind of entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityTemplate {
    pub kind: EntityKind,
    pub shape: Shape,
    pub category: Category,
    /// Categories this body reports contacts against
    pub contact_mask: Category,
    /// Categories that physically block this body
    pub collision_mask: Category,
    pub is_static: bool,
    pub allows_rotation: bool,
    pub linear_damping: f32,
    /// Continuous visual spin (radians per second)
    pub spin_rate: f32,
}

impl EntityTemplate {
    fn fixed(kind: EntityKind, shape: Shape, contact_mask: Category) -> Self {
        Self {
            kind,
            shape,
            category: kind.category(),
            contact_mask,
            collision_mask: Category::NONE,
            is_static: true,
            allows_rotation: true,
            linear_damping: 0.0,
            spin_rate: 0.0,
        }
    }
}

/// Template for a level symbol
pub fn template(symbol: char) -> Option<EntityTemplate> {
    let kind = EntityKind::from_symbol(symbol)?;
    let pickup = Shape::Circle {
        radius: PICKUP_RADIUS,
    };
    let template = match kind {
        EntityKind::Wall => {
            let mut wall = EntityTemplate::fixed(
                kind,
                Shape::Rectangle {
                    size: Vec2::splat(TILE_SIZE),
                },
                Category::NONE,
            );
            // Walls block the player
            wall.collision_mask = Category::PLAYER;
            wall
        }
        EntityKind::Vortex => EntityTemplate {
            spin_rate: VORTEX_SPIN_RATE,
            ..EntityTemplate::fixed(kind, pickup, Category::PLAYER)
        },
        EntityKind::Star | EntityKind::Finish => {
            EntityTemplate::fixed(kind, pickup, Category::PLAYER)
        }
        EntityKind::Player => return None,
    };
    Some(template)
}

/// Template for the player ball
pub fn player_template(linear_damping: f32) -> EntityTemplate {
    EntityTemplate {
        kind: EntityKind::Player,
        shape: Shape::Circle {
            radius: PLAYER_RADIUS,
        },
        category: Category::PLAYER,
        contact_mask: Category::STAR | Category::VORTEX | Category::FINISH,
        collision_mask: Category::WALL,
        is_static: false,
        allows_rotation: false,
        linear_damping,
        spin_rate: 0.0,
    }
}
