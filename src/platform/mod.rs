//! Platform abstraction layer
//!
//! The game only talks to its collaborators through these traits:
//! - [`Renderer`]: clear/present, filled rects, text textures
//! - [`EventPump`]: non-blocking drain of raw input events
//!
//! Backends:
//! - `headless`: records draw calls and replays scripted events
//! - `sdl` (feature `sdl`): SDL2 window, renderer, TTF font and event pump

pub mod headless;
#[cfg(feature = "sdl")]
pub mod sdl;

use glam::IVec2;

use crate::error::GameResult;
use crate::input::RawEvent;
use crate::sim::Rect;

pub use headless::{DrawCall, HeadlessRenderer, ScriptedEvents};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Handle to a texture owned by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

pub trait Renderer {
    fn clear(&mut self);

    fn present(&mut self);

    fn draw_rect(&mut self, rect: Rect, color: Color);

    /// Rasterize `text` with the backend's font into a texture sized to
    /// its glyph extents
    fn load_texture(&mut self, text: &str, color: Color) -> GameResult<TextureId>;

    /// Draw a texture centered on `center`, modulated by `alpha`
    fn draw_texture(&mut self, texture: TextureId, center: IVec2, alpha: u8);
}

pub trait EventPump {
    /// Everything queued since the last call; never blocks
    fn poll_events(&mut self) -> Vec<RawEvent>;
}
