//! Moving entities: the ball and the two paddles
//!
//! Positions and velocities are integers. Each frame the new position is
//! computed in floating point and truncated, so sub-pixel remainders are lost.

use glam::IVec2;
use rand::Rng;

use super::rect::Rect;
use crate::consts::*;

/// Which side of the field an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// Position, size and velocity shared by every moving entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Body {
    pub rect: Rect,
    pub velocity: IVec2,
}

impl Body {
    pub fn with_size(w: i32, h: i32) -> Self {
        Self {
            rect: Rect::new(0, 0, w, h),
            velocity: IVec2::ZERO,
        }
    }

    /// Center of the box
    pub fn position(&self) -> IVec2 {
        self.rect.center()
    }

    /// Place the box so that its center sits at `(x, y)`
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.rect.x = x - self.rect.w / 2;
        self.rect.y = y - self.rect.h / 2;
    }

    pub fn set_velocity(&mut self, vx: i32, vy: i32) {
        self.velocity = IVec2::new(vx, vy);
    }

    pub fn top(&self) -> i32 {
        self.rect.top()
    }

    pub fn bottom(&self) -> i32 {
        self.rect.bottom()
    }

    pub fn left(&self) -> i32 {
        self.rect.left()
    }

    pub fn right(&self) -> i32 {
        self.rect.right()
    }

    pub fn set_top(&mut self, y: i32) {
        self.rect.y = y;
    }

    pub fn set_bottom(&mut self, y: i32) {
        self.rect.y = y - self.rect.h;
    }

    /// `position += velocity * delta`, with the sum truncated toward zero
    pub fn advance(&mut self, delta: f32) {
        let moved = (self.rect.position().as_vec2() + self.velocity.as_vec2() * delta).as_ivec2();
        self.rect.x = moved.x;
        self.rect.y = moved.y;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ball {
    pub body: Body,
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

impl Ball {
    pub fn new() -> Self {
        Self {
            body: Body::with_size(BALL_SIZE, BALL_SIZE),
        }
    }

    pub fn update(&mut self, delta: f32) {
        self.body.advance(delta);
    }

    /// Serve velocity: mostly horizontal with a random vertical skew and a
    /// random diagonal direction.
    ///
    /// The angle is `80 * (u1 - 0.5) + 10 * u2` degrees, so it spans roughly
    /// [-40, 50] degrees from horizontal before the sign flips.
    pub fn randomize_velocity<R: Rng>(&mut self, rng: &mut R) {
        let u1: f64 = rng.random();
        let u2: f64 = rng.random();
        let degrees = 80.0 * (u1 - 0.5) + 10.0 * u2;
        let radians = degrees.to_radians();

        let x_sign = if rng.random::<f64>() < 0.5 { -1.0 } else { 1.0 };
        let y_sign = if rng.random::<f64>() < 0.5 { -1.0 } else { 1.0 };

        let speed = f64::from(BALL_SPEED);
        let vx = (radians.cos() * x_sign * speed).floor() as i32;
        let vy = (radians.sin() * y_sign * speed).floor() as i32;
        self.body.set_velocity(vx, vy);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paddle {
    pub side: Side,
    pub body: Body,
}

impl Paddle {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            body: Body::with_size(PADDLE_WIDTH, PADDLE_HEIGHT),
        }
    }

    /// Drive the paddle from the current input state.
    ///
    /// `direction` is `down - up` over the two held actions, so it is one of
    /// -1, 0 or 1. Velocity is set directly, there is no inertia.
    pub fn update(&mut self, direction: i32, delta: f32) {
        self.body.set_velocity(0, direction.signum() * PADDLE_SPEED);
        self.body.advance(delta);
    }
}
