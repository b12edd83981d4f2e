//! Per-frame collision resolution for the field, the paddles and the ball
//!
//! Runs once per frame while playing, in a fixed order: clamp both paddles,
//! bounce the ball off the top/bottom bounds or detect a goal, then bounce the
//! ball off either paddle.

use super::body::{Ball, Body, Paddle, Side};
use super::rect::Rect;

/// Result of the ball-vs-field check. At most one fires per resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldContact {
    None,
    TopBounce,
    BottomBounce,
    Goal(Side),
}

/// Snap a paddle back inside the field's vertical bounds.
///
/// A paddle taller than the field only ever snaps to the top.
pub fn clamp_paddle(field: &Rect, paddle: &mut Paddle) {
    let body = &mut paddle.body;
    if body.top() < field.top() {
        body.set_top(field.top());
    } else if body.bottom() > field.bottom() {
        body.set_bottom(field.bottom());
    }
}

/// Ball against the field bounds: bounce off top/bottom, else detect a goal.
pub fn resolve_ball_field(field: &Rect, ball: &mut Ball) -> FieldContact {
    let body = &mut ball.body;
    if body.top() < field.top() {
        body.velocity.y = body.velocity.y.abs();
        FieldContact::TopBounce
    } else if body.bottom() > field.bottom() {
        body.velocity.y = -body.velocity.y.abs();
        FieldContact::BottomBounce
    } else if body.left() < field.left() {
        FieldContact::Goal(Side::Left)
    } else if body.right() > field.right() {
        FieldContact::Goal(Side::Right)
    } else {
        FieldContact::None
    }
}

/// Force the ball away from a paddle it overlaps.
///
/// The direction depends only on the paddle's side, not on the contact point
/// or approach angle. Returns whether the ball was touching the paddle.
pub fn resolve_ball_paddle(paddle: &Paddle, ball: &mut Ball) -> bool {
    if !touching(&paddle.body, &ball.body) {
        return false;
    }
    let vx = ball.body.velocity.x.abs();
    ball.body.velocity.x = match paddle.side {
        Side::Left => vx,
        Side::Right => -vx,
    };
    true
}

fn touching(a: &Body, b: &Body) -> bool {
    (a.rect - b.rect).has_point(0, 0)
}

/// Resolve one frame of collisions. Returns the side whose goal line the ball
/// crossed, if any.
pub fn resolve(field: &Rect, left: &mut Paddle, right: &mut Paddle, ball: &mut Ball) -> Option<Side> {
    clamp_paddle(field, left);
    clamp_paddle(field, right);

    let contact = resolve_ball_field(field, ball);

    resolve_ball_paddle(left, ball);
    resolve_ball_paddle(right, ball);

    match contact {
        FieldContact::Goal(side) => Some(side),
        _ => None,
    }
}
