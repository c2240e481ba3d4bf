use std::any::Any;

use crate::components::collider::{Collider, Overlap};
use crate::components::color::Color;
use crate::components::vector::{BoundingBox, Vector};
use crate::resources::surface::RenderSurface;

/// Axis-aligned box centered on the owner's position plus `offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCollider {
    pub width: f32,
    pub height: f32,
    pub offset: Vector,
    pub enabled: bool,
}

impl BoxCollider {
    /// Create a BoxCollider with given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            offset: Vector::zero(),
            enabled: true,
        }
    }

    /// Modify BoxCollider with given offset
    pub fn with_offset(mut self, offset: Vector) -> Self {
        self.offset = offset;
        self
    }
}

impl Collider for BoxCollider {
    fn bounding_box(&self, position: Vector) -> BoundingBox {
        BoundingBox {
            x: position.x + self.offset.x - self.width / 2.0,
            y: position.y + self.offset.y - self.height / 2.0,
            width: self.width,
            height: self.height,
        }
    }

    /// Boxes never answer themselves; the engine's bounding-box fallback is
    /// exactly the box test.
    fn overlaps(&self, _: Vector, _: &dyn Collider, _: Vector) -> Overlap {
        Overlap::Unhandled
    }

    fn draw_debug(&self, surface: &mut dyn RenderSurface, position: Vector, hit: bool) {
        let color = if hit { Color::RED } else { Color::GREEN };
        surface.stroke_rect(self.bounding_box(position), color);
    }

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
