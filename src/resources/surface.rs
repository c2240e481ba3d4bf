//! Render surface abstraction (the "canvas").
//!
//! The engine never draws pixels itself; it issues a handful of primitive
//! calls against a [`RenderSurface`]. Backends:
//! - [`NullSurface`] – discards everything (headless runs).
//! - [`RecordingSurface`] – keeps a list of [`DrawCommand`]s, used by tests
//!   and by the debug dump of the demo.
//! - `RaylibSurface` (feature `window`) – draws into a raylib window.

use crate::components::color::Color;
use crate::components::vector::{BoundingBox, Vector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Start,
    Center,
    End,
}

/// A request to blit one frame of a sprite sheet centered at `center`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteBlit {
    pub sheet: String,
    pub source: BoundingBox,
    pub center: Vector,
    pub width: f32,
    pub height: f32,
    /// Degrees, clockwise on screen.
    pub rotation: f32,
}

pub trait RenderSurface {
    /// Surface size in pixels.
    fn size(&self) -> (f32, f32);
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: BoundingBox, color: Color);
    fn stroke_rect(&mut self, rect: BoundingBox, color: Color);
    fn stroke_circle(&mut self, center: Vector, radius: f32, color: Color);
    fn draw_sprite(&mut self, blit: &SpriteBlit);
    fn draw_text(&mut self, text: &str, position: Vector, size: f32, align: TextAlign, color: Color);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface {
    pub width: f32,
    pub height: f32,
}

impl NullSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl RenderSurface for NullSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }
    fn clear(&mut self) {}
    fn fill_rect(&mut self, _rect: BoundingBox, _color: Color) {}
    fn stroke_rect(&mut self, _rect: BoundingBox, _color: Color) {}
    fn stroke_circle(&mut self, _center: Vector, _radius: f32, _color: Color) {}
    fn draw_sprite(&mut self, _blit: &SpriteBlit) {}
    fn draw_text(&mut self, _: &str, _: Vector, _: f32, _: TextAlign, _: Color) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect(BoundingBox, Color),
    StrokeRect(BoundingBox, Color),
    StrokeCircle(Vector, f32, Color),
    Sprite(SpriteBlit),
    Text(String, Vector),
}

/// Surface that remembers every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Outline rectangles drawn with `color`, in call order.
    pub fn stroked_rects(&self, color: Color) -> Vec<BoundingBox> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::StrokeRect(bb, c) if *c == color => Some(*bb),
                _ => None,
            })
            .collect()
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl RenderSurface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, rect: BoundingBox, color: Color) {
        self.commands.push(DrawCommand::FillRect(rect, color));
    }

    fn stroke_rect(&mut self, rect: BoundingBox, color: Color) {
        self.commands.push(DrawCommand::StrokeRect(rect, color));
    }

    fn stroke_circle(&mut self, center: Vector, radius: f32, color: Color) {
        self.commands
            .push(DrawCommand::StrokeCircle(center, radius, color));
    }

    fn draw_sprite(&mut self, blit: &SpriteBlit) {
        self.commands.push(DrawCommand::Sprite(blit.clone()));
    }

    fn draw_text(&mut self, text: &str, position: Vector, _size: f32, _align: TextAlign, _color: Color) {
        self.commands
            .push(DrawCommand::Text(text.to_string(), position));
    }
}
