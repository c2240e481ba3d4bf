//! Drawing passes: background, entities, debug overlay.

use rustc_hash::FxHashSet;

use crate::components::color::Color;
use crate::components::vector::BoundingBox;
use crate::entity::{Entity, EntityId};
use crate::resources::canvas::Canvas;
use crate::resources::surface::RenderSurface;

/// Clear the surface and paint the optional background fill.
pub fn background_pass(surface: &mut dyn RenderSurface, canvas: &Canvas, fill: Option<Color>) {
    surface.clear();
    if let Some(color) = fill {
        surface.fill_rect(BoundingBox::new(0.0, 0.0, canvas.width, canvas.height), color);
    }
}

/// Draw every entity in list order; disabled entities draw nothing.
pub fn draw_pass(entities: &mut [Entity], surface: &mut dyn RenderSurface) {
    for entity in entities.iter_mut() {
        entity.draw(surface);
    }
}

/// Debug overlay of every enabled entity, flagging those in `hit`.
pub fn debug_pass(entities: &[Entity], hit: &FxHashSet<EntityId>, surface: &mut dyn RenderSurface) {
    for entity in entities.iter().filter(|e| e.enabled) {
        entity.draw_debug(surface, hit.contains(&entity.id));
    }
}
