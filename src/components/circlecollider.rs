//! Circle collider.
//!
//! Resolves circle-vs-circle pairings with an exact distance test and leaves
//! every other pairing to the other collider or the bounding-box fallback.

use std::any::Any;

use crate::components::collider::{Collider, Overlap};
use crate::components::color::Color;
use crate::components::vector::{BoundingBox, Vector};
use crate::resources::surface::RenderSurface;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleCollider {
    pub radius: f32,
    pub offset: Vector,
    pub enabled: bool,
}

impl CircleCollider {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            offset: Vector::zero(),
            enabled: true,
        }
    }

    pub fn with_offset(mut self, offset: Vector) -> Self {
        self.offset = offset;
        self
    }

    pub fn center(&self, position: Vector) -> Vector {
        position + self.offset
    }
}

impl Collider for CircleCollider {
    fn bounding_box(&self, position: Vector) -> BoundingBox {
        let c = self.center(position);
        BoundingBox::new(
            c.x - self.radius,
            c.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }

    fn overlaps(&self, position: Vector, other: &dyn Collider, other_position: Vector) -> Overlap {
        let Some(other) = other.as_any().downcast_ref::<CircleCollider>() else {
            return Overlap::Unhandled;
        };
        let d = self.center(position) - other.center(other_position);
        let reach = self.radius + other.radius;
        Overlap::Resolved(d.length_sq() <= reach * reach)
    }

    fn draw_debug(&self, surface: &mut dyn RenderSurface, position: Vector, hit: bool) {
        let color = if hit { Color::RED } else { Color::GREEN };
        surface.stroke_circle(self.center(position), self.radius, color);
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
