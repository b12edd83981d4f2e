//! Deterministic simulation module
//!
//! Geometry, entities, collision rules and the mode state machine. This
//! module must stay pure:
//! - No rendering or platform dependencies
//! - Integer positions and velocities
//! - Seeded RNG only

pub mod body;
pub mod collision;
pub mod countdown;
pub mod fade;
pub mod fsm;
pub mod rect;
pub mod score;

pub use body::{Ball, Body, Paddle, Side};
pub use collision::{FieldContact, clamp_paddle, resolve};
pub use countdown::Countdown;
pub use fade::Pulse;
pub use fsm::{StateId, StateMachine, TransitionGraph, Trigger};
pub use rect::{Edge, Rect};
pub use score::Score;
