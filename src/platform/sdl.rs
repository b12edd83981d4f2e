//! SDL2 backend: window, accelerated renderer, TTF text and event pump

use glam::IVec2;
use sdl2::event::Event;
use sdl2::mouse::MouseButton;
use sdl2::render::{BlendMode, Canvas, Texture, TextureCreator};
use sdl2::ttf::{Font, Sdl2TtfContext};
use sdl2::video::{Window, WindowContext};
use sdl2::{Sdl, VideoSubsystem};

use super::{Color, EventPump, Renderer, TextureId};
use crate::error::{GameError, GameResult};
use crate::input::{Key, RawEvent};
use crate::settings::{DisplaySettings, FontSettings};
use crate::sim::Rect;

/// Everything the game needs from SDL, created in one go
pub struct SdlPlatform {
    pub renderer: SdlRenderer,
    pub events: SdlEvents,
}

impl SdlPlatform {
    pub fn init(display: &DisplaySettings, font: &FontSettings) -> GameResult<Self> {
        log::debug!("Initializing SDL");
        let sdl = sdl2::init().map_err(GameError::Sdl)?;
        let video = sdl.video().map_err(GameError::Sdl)?;

        log::debug!(
            "Creating window {:?} at ({}, {}) {}x{}",
            display.title,
            display.x,
            display.y,
            display.width,
            display.height
        );
        let window = video
            .window(&display.title, display.width, display.height)
            .position(display.x, display.y)
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;

        let mut canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        canvas.set_blend_mode(BlendMode::Blend);
        let texture_creator = canvas.texture_creator();

        log::debug!("Loading font {} at {}pt", font.path, font.point_size);
        // Fonts borrow the TTF context; it lives for the rest of the process
        let ttf: &'static Sdl2TtfContext = Box::leak(Box::new(
            sdl2::ttf::init().map_err(|e| GameError::Sdl(e.to_string()))?,
        ));
        let loaded_font = ttf
            .load_font(&font.path, font.point_size)
            .map_err(|reason| GameError::Font {
                path: font.path.clone(),
                reason,
            })?;

        let pump = sdl.event_pump().map_err(GameError::Sdl)?;

        log::info!("SDL platform ready");
        Ok(Self {
            renderer: SdlRenderer {
                canvas,
                texture_creator,
                font: loaded_font,
                textures: Vec::new(),
            },
            events: SdlEvents {
                pump,
                _video: video,
                _sdl: sdl,
            },
        })
    }
}

struct LoadedTexture {
    texture: Texture,
    width: u32,
    height: u32,
}

pub struct SdlRenderer {
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    font: Font<'static, 'static>,
    textures: Vec<LoadedTexture>,
}

fn sdl_color(color: Color) -> sdl2::pixels::Color {
    sdl2::pixels::Color::RGBA(color.r, color.g, color.b, color.a)
}

impl Renderer for SdlRenderer {
    fn clear(&mut self) {
        self.canvas.set_draw_color(sdl_color(Color::BLACK));
        self.canvas.clear();
    }

    fn present(&mut self) {
        self.canvas.present();
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.canvas.set_draw_color(sdl_color(color));
        let target = sdl2::rect::Rect::new(rect.x, rect.y, rect.w as u32, rect.h as u32);
        if let Err(e) = self.canvas.fill_rect(target) {
            log::warn!("Render error: {:?}", e);
        }
    }

    fn load_texture(&mut self, text: &str, color: Color) -> GameResult<TextureId> {
        let surface = self
            .font
            .render(text)
            .blended(sdl_color(color))
            .map_err(|e| GameError::Texture {
                text: text.to_string(),
                reason: e.to_string(),
            })?;
        let mut texture = self
            .texture_creator
            .create_texture_from_surface(&surface)
            .map_err(|e| GameError::Texture {
                text: text.to_string(),
                reason: e.to_string(),
            })?;
        texture.set_blend_mode(BlendMode::Blend);

        let query = texture.query();
        self.textures.push(LoadedTexture {
            texture,
            width: query.width,
            height: query.height,
        });
        Ok(TextureId(self.textures.len() - 1))
    }

    fn draw_texture(&mut self, texture: TextureId, center: IVec2, alpha: u8) {
        let Some(loaded) = self.textures.get_mut(texture.0) else {
            log::warn!("Render error: unknown texture {:?}", texture);
            return;
        };
        loaded.texture.set_alpha_mod(alpha);
        let target = sdl2::rect::Rect::new(
            center.x - loaded.width as i32 / 2,
            center.y - loaded.height as i32 / 2,
            loaded.width,
            loaded.height,
        );
        if let Err(e) = self.canvas.copy(&loaded.texture, None, Some(target)) {
            log::warn!("Render error: {:?}", e);
        }
    }
}

impl Drop for SdlRenderer {
    fn drop(&mut self) {
        for loaded in self.textures.drain(..) {
            // SAFETY: the canvas and texture creator that own these textures
            // are dropped only after this body runs.
            unsafe { loaded.texture.destroy() };
        }
    }
}

pub struct SdlEvents {
    pump: sdl2::EventPump,
    _video: VideoSubsystem,
    _sdl: Sdl,
}

fn mouse_button_index(button: MouseButton) -> Option<u8> {
    match button {
        MouseButton::Left => Some(1),
        MouseButton::Middle => Some(2),
        MouseButton::Right => Some(3),
        MouseButton::X1 => Some(4),
        MouseButton::X2 => Some(5),
        MouseButton::Unknown => None,
    }
}

impl EventPump for SdlEvents {
    fn poll_events(&mut self) -> Vec<RawEvent> {
        let mut events = Vec::new();
        for event in self.pump.poll_iter() {
            let raw = match event {
                Event::Quit { .. } => Some(RawEvent::Quit),
                // Auto-repeat would re-fire edge-triggered actions while held
                Event::KeyDown {
                    scancode: Some(scancode),
                    repeat: false,
                    ..
                } => Key::from_name(&scancode.name()).map(RawEvent::KeyDown),
                Event::KeyUp {
                    scancode: Some(scancode),
                    ..
                } => Key::from_name(&scancode.name()).map(RawEvent::KeyUp),
                Event::MouseButtonDown { mouse_btn, .. } => {
                    mouse_button_index(mouse_btn).map(RawEvent::MouseDown)
                }
                Event::MouseButtonUp { mouse_btn, .. } => {
                    mouse_button_index(mouse_btn).map(RawEvent::MouseUp)
                }
                _ => None,
            };
            events.extend(raw);
        }
        events
    }
}
