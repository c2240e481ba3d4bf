use crate::components::vector::{BoundingBox, Vector};
use crate::entity::Entity;
use crate::resources::surface::{RenderSurface, SpriteBlit};

/// Anything an entity can render after its draw hook.
pub trait Drawable {
    fn enabled(&self) -> bool;
    fn draw(&self, owner: &Entity, surface: &mut dyn RenderSurface);
}

/// One frame of a sprite sheet: the source rectangle and the on-screen size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteFrame {
    pub source: BoundingBox,
    pub width: f32,
    pub height: f32,
}

impl SpriteFrame {
    /// Frame drawn at the same size as its source rectangle.
    pub fn from_source(source: BoundingBox) -> Self {
        Self {
            source,
            width: source.width,
            height: source.height,
        }
    }
}

/// Sprite is identified by a sheet key and a list of frames; `sprite_index`
/// selects the frame drawn. The frame is centered on the owner's position
/// plus `offset` and rotated by `rotation` degrees.
#[derive(Clone, Debug)]
pub struct Sprite {
    pub sheet: String,
    pub frames: Vec<SpriteFrame>,
    pub sprite_index: usize,
    pub offset: Vector,
    pub rotation: f32,
    pub enabled: bool,
}

impl Sprite {
    pub fn new(sheet: impl Into<String>, frames: Vec<SpriteFrame>) -> Self {
        Self {
            sheet: sheet.into(),
            frames,
            sprite_index: 0,
            offset: Vector::zero(),
            rotation: 0.0,
            enabled: true,
        }
    }

    /// Sprite without a sheet of its own; draw it with [`blit_on`](Self::blit_on).
    pub fn from_frames(frames: Vec<SpriteFrame>) -> Self {
        Self::new(String::new(), frames)
    }

    pub fn current_frame(&self) -> Option<&SpriteFrame> {
        self.frames.get(self.sprite_index)
    }

    /// Blit for the current frame with the owner at `position`.
    pub fn blit(&self, position: Vector) -> Option<SpriteBlit> {
        self.blit_on(&self.sheet, position)
    }

    /// Like [`blit`](Self::blit), taking frames from `sheet` instead.
    pub fn blit_on(&self, sheet: &str, position: Vector) -> Option<SpriteBlit> {
        let frame = self.current_frame()?;
        Some(SpriteBlit {
            sheet: sheet.to_string(),
            source: frame.source,
            center: position + self.offset,
            width: frame.width,
            height: frame.height,
            rotation: self.rotation,
        })
    }
}

impl Drawable for Sprite {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn draw(&self, owner: &Entity, surface: &mut dyn RenderSurface) {
        if let Some(blit) = self.blit(owner.position) {
            surface.draw_sprite(&blit);
        }
    }
}
