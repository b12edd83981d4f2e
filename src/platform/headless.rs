//! Headless backend
//!
//! No window, no font. Textures are remembered by their text so frames can be
//! inspected, which makes this the backend used by tests.

use std::collections::VecDeque;

use glam::IVec2;

use super::{Color, EventPump, Renderer, TextureId};
use crate::error::GameResult;
use crate::input::RawEvent;
use crate::sim::Rect;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Rect(Rect, Color),
    Texture { id: TextureId, center: IVec2, alpha: u8 },
}

#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    textures: Vec<String>,
    current: Vec<DrawCall>,
    last_frame: Vec<DrawCall>,
    presented: u64,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames presented so far
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Draw calls of the most recently presented frame
    pub fn last_frame(&self) -> &[DrawCall] {
        &self.last_frame
    }

    pub fn texture_text(&self, id: TextureId) -> Option<&str> {
        self.textures.get(id.0).map(String::as_str)
    }

    /// Text of every texture drawn in the last presented frame, in draw order
    pub fn last_frame_texts(&self) -> Vec<&str> {
        self.last_frame
            .iter()
            .filter_map(|call| match call {
                DrawCall::Texture { id, .. } => self.texture_text(*id),
                DrawCall::Rect(..) => None,
            })
            .collect()
    }

    pub fn last_frame_rects(&self) -> Vec<Rect> {
        self.last_frame
            .iter()
            .filter_map(|call| match call {
                DrawCall::Rect(rect, _) => Some(*rect),
                DrawCall::Texture { .. } => None,
            })
            .collect()
    }
}

impl Renderer for HeadlessRenderer {
    fn clear(&mut self) {
        self.current.clear();
    }

    fn present(&mut self) {
        self.last_frame = std::mem::take(&mut self.current);
        self.presented += 1;
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.current.push(DrawCall::Rect(rect, color));
    }

    fn load_texture(&mut self, text: &str, _color: Color) -> GameResult<TextureId> {
        self.textures.push(text.to_string());
        Ok(TextureId(self.textures.len() - 1))
    }

    fn draw_texture(&mut self, texture: TextureId, center: IVec2, alpha: u8) {
        self.current.push(DrawCall::Texture {
            id: texture,
            center,
            alpha,
        });
    }
}

/// Event pump that hands out one pre-recorded batch per poll
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    batches: VecDeque<Vec<RawEvent>>,
}

impl ScriptedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the batch returned by a future poll
    pub fn push_batch(&mut self, events: Vec<RawEvent>) -> &mut Self {
        self.batches.push_back(events);
        self
    }

    /// Queue `frames` empty polls
    pub fn idle(&mut self, frames: usize) -> &mut Self {
        for _ in 0..frames {
            self.batches.push_back(Vec::new());
        }
        self
    }

    pub fn remaining(&self) -> usize {
        self.batches.len()
    }
}

impl EventPump for ScriptedEvents {
    fn poll_events(&mut self) -> Vec<RawEvent> {
        self.batches.pop_front().unwrap_or_default()
    }
}
