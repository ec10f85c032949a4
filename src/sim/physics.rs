//! Physics engine boundary
//!
//! The core never integrates motion or detects overlaps. It registers bodies,
//! toggles them, moves frozen ones and sets world gravity; the engine behind
//! `PhysicsWorld` does the rest and reports contacts back as `Contact` pairs.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::catalog::{Category, EntityTemplate, Shape};
use super::state::EntityId;

/// Body parameters handed to the engine on creation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyDesc {
    pub shape: Shape,
    pub category: Category,
    pub contact_mask: Category,
    pub collision_mask: Category,
    pub dynamic: bool,
    pub allows_rotation: bool,
    pub linear_damping: f32,
}

impl From<&EntityTemplate> for BodyDesc {
    fn from(template: &EntityTemplate) -> Self {
        Self {
            shape: template.shape,
            category: template.category,
            contact_mask: template.contact_mask,
            collision_mask: template.collision_mask,
            dynamic: !template.is_static,
            allows_rotation: template.allows_rotation,
            linear_damping: template.linear_damping,
        }
    }
}

impl BodyDesc {
    /// Whether the engine reports a contact-begin between these two bodies
    pub fn reports_contact_with(&self, other: &BodyDesc) -> bool {
        self.contact_mask.intersects(other.category) || other.contact_mask.intersects(self.category)
    }
}

/// Operations the core needs from a rigid-body engine
pub trait PhysicsWorld {
    /// Register a body for an entity
    fn add_body(&mut self, id: EntityId, desc: &BodyDesc, position: Vec2);
    /// Unregister a body (no-op if unknown)
    fn remove_body(&mut self, id: EntityId);
    /// Switch a body between dynamic and frozen
    fn set_dynamic(&mut self, id: EntityId, dynamic: bool);
    /// Teleport a body
    fn set_position(&mut self, id: EntityId, position: Vec2);
    /// Current body position as integrated by the engine
    fn body_position(&self, id: EntityId) -> Option<Vec2>;
    /// Global gravity vector
    fn set_gravity(&mut self, gravity: Vec2);
}

/// A body tracked by `HeadlessWorld`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlessBody {
    pub desc: BodyDesc,
    pub position: Vec2,
}

/// Bookkeeping-only world: stores what it is told, integrates nothing.
///
/// Backs the headless runner and tests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeadlessWorld {
    pub bodies: BTreeMap<EntityId, HeadlessBody>,
    pub gravity: Vec2,
}

impl HeadlessWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(&self, id: EntityId) -> Option<&HeadlessBody> {
        self.bodies.get(&id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Whether the engine would report a contact between two registered bodies
    pub fn reports_contact(&self, a: EntityId, b: EntityId) -> bool {
        match (self.bodies.get(&a), self.bodies.get(&b)) {
            (Some(a), Some(b)) => a.desc.reports_contact_with(&b.desc),
            _ => false,
        }
    }
}

impl PhysicsWorld for HeadlessWorld {
    fn add_body(&mut self, id: EntityId, desc: &BodyDesc, position: Vec2) {
        self.bodies.insert(
            id,
            HeadlessBody {
                desc: *desc,
                position,
            },
        );
    }

    fn remove_body(&mut self, id: EntityId) {
        self.bodies.remove(&id);
    }

    fn set_dynamic(&mut self, id: EntityId, dynamic: bool) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.desc.dynamic = dynamic;
        }
    }

    fn set_position(&mut self, id: EntityId, position: Vec2) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.position = position;
        }
    }

    fn body_position(&self, id: EntityId) -> Option<Vec2> {
        self.bodies.get(&id).map(|b| b.position)
    }

    fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::{player_template, template};

    #[test]
    fn test_body_desc_from_template() {
        let desc = BodyDesc::from(&player_template(0.5));
        assert!(desc.dynamic);
        assert!(!desc.allows_rotation);
        assert_eq!(desc.linear_damping, 0.5);

        let wall = BodyDesc::from(&template('x').unwrap());
        assert!(!wall.dynamic);
    }

    #[test]
    fn test_contact_reporting_follows_masks() {
        let player = BodyDesc::from(&player_template(0.5));
        let wall = BodyDesc::from(&template('x').unwrap());
        let star = BodyDesc::from(&template('s').unwrap());
        let vortex = BodyDesc::from(&template('v').unwrap());

        assert!(player.reports_contact_with(&star));
        assert!(star.reports_contact_with(&player));
        assert!(player.reports_contact_with(&vortex));
        assert!(!player.reports_contact_with(&wall));
        assert!(!star.reports_contact_with(&vortex));
    }

    #[test]
    fn test_headless_world_bookkeeping() {
        let mut world = HeadlessWorld::new();
        let desc = BodyDesc::from(&player_template(0.5));
        world.add_body(7, &desc, Vec2::new(1.0, 2.0));
        assert_eq!(world.body_position(7), Some(Vec2::new(1.0, 2.0)));

        world.set_position(7, Vec2::new(3.0, 4.0));
        world.set_dynamic(7, false);
        let body = world.body(7).unwrap();
        assert_eq!(body.position, Vec2::new(3.0, 4.0));
        assert!(!body.desc.dynamic);

        world.remove_body(7);
        assert!(world.is_empty());
        assert_eq!(world.body_position(7), None);

        // Unknown ids are ignored
        world.set_position(99, Vec2::ZERO);
        world.remove_body(99);
        assert_eq!(world.len(), 0);
    }
}
