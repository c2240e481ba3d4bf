//! Raylib-backed [`RenderSurface`], available with the `window` feature.
//!
//! Sprite sheets are looked up by the path stored in each [`SpriteBlit`];
//! a blit whose sheet was never loaded is skipped.

use std::ffi::CString;

use raylib::ffi;
use raylib::prelude::*;
use rustc_hash::FxHashMap;

use crate::components::color::Color as EngineColor;
use crate::components::vector::{BoundingBox, Vector};
use crate::resources::surface::{RenderSurface, SpriteBlit, TextAlign};

/// Loaded sprite sheets keyed by path.
pub type TextureStore = FxHashMap<String, Texture2D>;

pub struct RaylibSurface<'a, 'b> {
    d: &'a mut RaylibDrawHandle<'b>,
    textures: &'a TextureStore,
    width: f32,
    height: f32,
}

impl<'a, 'b> RaylibSurface<'a, 'b> {
    pub fn new(
        d: &'a mut RaylibDrawHandle<'b>,
        textures: &'a TextureStore,
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            d,
            textures,
            width,
            height,
        }
    }
}

fn rl_color(c: EngineColor) -> Color {
    Color::new(c.r, c.g, c.b, c.a)
}

fn text_width(text: &str, size: i32) -> i32 {
    let Ok(c_text) = CString::new(text) else {
        return 0;
    };
    unsafe { ffi::MeasureText(c_text.as_ptr(), size) }
}

impl RenderSurface for RaylibSurface<'_, '_> {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.d.clear_background(Color::BLACK);
    }

    fn fill_rect(&mut self, rect: BoundingBox, color: EngineColor) {
        self.d.draw_rectangle(
            rect.x as i32,
            rect.y as i32,
            rect.width as i32,
            rect.height as i32,
            rl_color(color),
        );
    }

    fn stroke_rect(&mut self, rect: BoundingBox, color: EngineColor) {
        self.d.draw_rectangle_lines(
            rect.x as i32,
            rect.y as i32,
            rect.width as i32,
            rect.height as i32,
            rl_color(color),
        );
    }

    fn stroke_circle(&mut self, center: Vector, radius: f32, color: EngineColor) {
        self.d
            .draw_circle_lines(center.x as i32, center.y as i32, radius, rl_color(color));
    }

    fn draw_sprite(&mut self, blit: &SpriteBlit) {
        let Some(tex) = self.textures.get(&blit.sheet) else {
            return;
        };
        let src = Rectangle {
            x: blit.source.x,
            y: blit.source.y,
            width: blit.source.width,
            height: blit.source.height,
        };
        // Rotation pivots on the sprite center.
        let dest = Rectangle {
            x: blit.center.x,
            y: blit.center.y,
            width: blit.width,
            height: blit.height,
        };
        let origin = Vector2 {
            x: blit.width / 2.0,
            y: blit.height / 2.0,
        };
        self.d
            .draw_texture_pro(tex, src, dest, origin, blit.rotation, Color::WHITE);
    }

    fn draw_text(
        &mut self,
        text: &str,
        position: Vector,
        size: f32,
        align: TextAlign,
        color: EngineColor,
    ) {
        let size = size as i32;
        let width = text_width(text, size);
        let x = match align {
            TextAlign::Start => position.x as i32,
            TextAlign::Center => position.x as i32 - width / 2,
            TextAlign::End => position.x as i32 - width,
        };
        // Canvas text sits on its baseline; raylib anchors the top.
        let y = position.y as i32 - size;
        self.d.draw_text(text, x, y, size, rl_color(color));
    }
}
