//! Pluggable collider shapes.
//!
//! Every entity owns exactly one [`Collider`]. During the collision sweep the
//! engine asks the first collider whether it overlaps the second; if that
//! collider answers [`Overlap::Unhandled`] the question is forwarded to the
//! second collider, and if it is still unanswered the engine falls back to an
//! edge-inclusive bounding-box test. A new shape only has to resolve the
//! pairings it actually knows about.
//!
//! Shipped shapes:
//! - [`NoCollider`] – never overlaps, disabled by default
//! - [`BoxCollider`](super::boxcollider::BoxCollider) – defers to the bounding-box fallback
//! - [`CircleCollider`](super::circlecollider::CircleCollider) – resolves circle vs circle itself

use std::any::Any;
use std::fmt::Debug;

use crate::components::vector::{BoundingBox, Vector};
use crate::resources::surface::RenderSurface;

/// Answer of a collider asked about one specific pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
    Resolved(bool),
    /// This collider has no opinion; try the other one, then the fallback.
    Unhandled,
}

impl Overlap {
    pub fn is_resolved(self) -> bool {
        matches!(self, Overlap::Resolved(_))
    }
}

impl From<bool> for Overlap {
    fn from(value: bool) -> Self {
        Overlap::Resolved(value)
    }
}

pub trait Collider: Debug + Any {
    /// Box covered by this collider when its owner sits at `position`.
    /// Must be pure.
    fn bounding_box(&self, position: Vector) -> BoundingBox;

    /// Overlap test against `other`; `position` is the owner's position and
    /// `other_position` the other owner's.
    fn overlaps(&self, position: Vector, other: &dyn Collider, other_position: Vector) -> Overlap;

    /// Visualize the collider. `hit` is set when the owner overlapped
    /// something this frame.
    fn draw_debug(&self, surface: &mut dyn RenderSurface, position: Vector, hit: bool);

    fn enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);

    fn as_any(&self) -> &dyn Any;
}

/// Collider of entities that never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoCollider {
    pub enabled: bool,
}

impl Default for NoCollider {
    fn default() -> Self {
        Self { enabled: false }
    }
}

impl NoCollider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Collider for NoCollider {
    fn bounding_box(&self, _position: Vector) -> BoundingBox {
        BoundingBox::default()
    }

    fn overlaps(&self, _: Vector, _: &dyn Collider, _: Vector) -> Overlap {
        Overlap::Resolved(false)
    }

    fn draw_debug(&self, _surface: &mut dyn RenderSurface, _position: Vector, _hit: bool) {}

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
