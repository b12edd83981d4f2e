//! Pong - two-player paddle game on a deferred-transition state machine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, entities, collisions, mode FSM)
//! - `game`: Game controller, per-state behavior, HUD text
//! - `input`: Raw input to logical action translation
//! - `platform`: Renderer / event pump traits with headless and SDL2 backends
//! - `app`: Fixed-cadence frame driver

pub mod app;
pub mod error;
pub mod game;
pub mod input;
pub mod platform;
pub mod settings;
pub mod sim;

pub use app::FrameDriver;
pub use error::{GameError, GameResult};
pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Ball edge length, pixels
    pub const BALL_SIZE: i32 = 8;
    /// Serve speed, pixels/s
    pub const BALL_SPEED: i32 = 300;

    pub const PADDLE_WIDTH: i32 = 8;
    pub const PADDLE_HEIGHT: i32 = 64;
    /// Vertical paddle speed while a direction is held, pixels/s
    pub const PADDLE_SPEED: i32 = 400;

    /// Points needed to win
    pub const DEFAULT_MAX_SCORE: u8 = 6;
    pub const TARGET_FPS: u32 = 60;

    /// Countdown shows 3, 2, 1, GO! for one interval each
    pub const COUNTDOWN_START: u16 = 3;
    pub const COUNTDOWN_INTERVAL_MS: u32 = 600;

    /// Prompt text alpha bounces inside [MIN, MAX]
    pub const PULSE_MIN_ALPHA: f32 = 60.0;
    pub const PULSE_MAX_ALPHA: f32 = 236.0;
    /// Alpha units per second
    pub const PULSE_SPEED: f32 = 301.0;
    pub const PULSE_START_ALPHA: f32 = 100.0;
}
