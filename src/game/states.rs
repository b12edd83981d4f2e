//! Per-state behavior table
//!
//! Each [`StateId`] gets optional `enter` / `exit` hooks and a frame processor.
//! Hooks are plain functions over the [`GameContext`], so the table holds no
//! captured state of its own.

use super::GameContext;
use crate::error::{GameError, GameResult};
use crate::input::Action;
use crate::platform::{Color, Renderer};
use crate::sim::{StateId, TransitionGraph, collision};

pub type Hook = fn(&mut GameContext);
pub type FrameFn = fn(&mut GameContext, &mut dyn Renderer, f32);

#[derive(Clone, Copy, Default)]
pub struct StateBehavior {
    pub enter: Option<Hook>,
    pub exit: Option<Hook>,
    pub frame: Option<FrameFn>,
}

impl StateBehavior {
    fn frame(frame: FrameFn) -> Self {
        Self {
            frame: Some(frame),
            ..Self::default()
        }
    }

    fn with_enter(mut self, enter: Hook) -> Self {
        self.enter = Some(enter);
        self
    }
}

pub struct StateTable {
    behaviors: [StateBehavior; StateId::COUNT],
}

impl StateTable {
    pub fn pong() -> Self {
        let mut table = Self {
            behaviors: [StateBehavior::default(); StateId::COUNT],
        };

        table.set(StateId::Start, StateBehavior::frame(start_frame));
        table.set(StateId::Reset, StateBehavior::frame(idle_frame).with_enter(reset_enter));
        table.set(
            StateId::FieldSetup,
            StateBehavior::frame(idle_frame).with_enter(field_setup_enter),
        );
        table.set(
            StateId::Countdown,
            StateBehavior::frame(countdown_frame).with_enter(countdown_enter),
        );
        table.set(StateId::Playing, StateBehavior::frame(playing_frame));
        table.set(StateId::Pause, StateBehavior::frame(pause_frame));
        table.set(StateId::GameOver, StateBehavior::frame(game_over_frame));
        table.set(StateId::Shutdown, StateBehavior::frame(idle_frame).with_enter(shutdown_enter));

        table
    }

    pub fn set(&mut self, state: StateId, behavior: StateBehavior) {
        self.behaviors[state.index()] = behavior;
    }

    pub fn behavior(&self, state: StateId) -> &StateBehavior {
        &self.behaviors[state.index()]
    }

    /// Every state reachable from `initial` must have a frame processor.
    ///
    /// Reports every offender in the log and fails with the first one.
    pub fn validate(&self, graph: &TransitionGraph, initial: StateId) -> GameResult<()> {
        let missing: Vec<StateId> = graph
            .reachable_from(initial)
            .into_iter()
            .filter(|state| self.behavior(*state).frame.is_none())
            .collect();

        for state in &missing {
            log::error!("{} state does not define a frame processor!", state);
        }
        match missing.first() {
            Some(state) => Err(GameError::MissingFrameHandler(state.tag())),
            None => Ok(()),
        }
    }
}

fn idle_frame(_ctx: &mut GameContext, _renderer: &mut dyn Renderer, _delta: f32) {}

fn start_frame(ctx: &mut GameContext, renderer: &mut dyn Renderer, delta: f32) {
    ctx.hud.press_start.update(delta);
    renderer.clear();
    ctx.hud.press_start.draw(renderer);
    renderer.present();
}

fn reset_enter(ctx: &mut GameContext) {
    ctx.left_score.reset();
    ctx.right_score.reset();
    ctx.fsm.next();
}

fn field_setup_enter(ctx: &mut GameContext) {
    let center = ctx.field.center();
    ctx.ball.body.set_position(center.x, center.y);
    ctx.ball.randomize_velocity(&mut ctx.rng);
    log::debug!("Serving at {:?}", ctx.ball.body.velocity);
    ctx.fsm.next();
}

fn countdown_enter(ctx: &mut GameContext) {
    ctx.countdown.reset();
}

fn countdown_frame(ctx: &mut GameContext, renderer: &mut dyn Renderer, delta: f32) {
    let finished = ctx.countdown.update(delta);
    if finished {
        ctx.fsm.next();
    }

    renderer.clear();
    draw_paddles(ctx, renderer);
    ctx.hud.draw_scores(renderer, &ctx.left_score, &ctx.right_score);
    if !finished {
        ctx.hud.draw_countdown(renderer, &ctx.countdown);
    }
    renderer.present();
}

fn playing_frame(ctx: &mut GameContext, renderer: &mut dyn Renderer, delta: f32) {
    ctx.ball.update(delta);
    let one = ctx.input.axis(Action::PlayerOneUp, Action::PlayerOneDown);
    let two = ctx.input.axis(Action::PlayerTwoUp, Action::PlayerTwoDown);
    ctx.left.update(one, delta);
    ctx.right.update(two, delta);

    if let Some(side) = collision::resolve(&ctx.field, &mut ctx.left, &mut ctx.right, &mut ctx.ball) {
        ctx.handle_goal(side);
    }

    renderer.clear();
    renderer.draw_rect(ctx.ball.body.rect, Color::WHITE);
    draw_paddles(ctx, renderer);
    ctx.hud.draw_scores(renderer, &ctx.left_score, &ctx.right_score);
    renderer.present();
}

fn pause_frame(ctx: &mut GameContext, renderer: &mut dyn Renderer, delta: f32) {
    ctx.hud.paused.update(delta);
    renderer.clear();
    ctx.hud.paused.draw(renderer);
    renderer.present();
}

fn game_over_frame(ctx: &mut GameContext, renderer: &mut dyn Renderer, delta: f32) {
    ctx.hud.game_over.update(delta);
    ctx.hud.play_again.update(delta);
    renderer.clear();
    ctx.hud.game_over.draw(renderer);
    ctx.hud.play_again.draw(renderer);
    renderer.present();
}

fn shutdown_enter(ctx: &mut GameContext) {
    ctx.stop();
}

fn draw_paddles(ctx: &GameContext, renderer: &mut dyn Renderer) {
    renderer.draw_rect(ctx.left.body.rect, Color::WHITE);
    renderer.draw_rect(ctx.right.body.rect, Color::WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_state_has_a_frame_processor() {
        let table = StateTable::pong();
        for state in StateId::ALL {
            assert!(table.behavior(state).frame.is_some(), "{state}");
        }
        table.validate(&TransitionGraph::pong(), StateId::Start).unwrap();
    }

    #[test]
    fn test_validation_reports_missing_frame_processor() {
        let mut table = StateTable::pong();
        table.set(StateId::Pause, StateBehavior::default());
        let err = table.validate(&TransitionGraph::pong(), StateId::Start).unwrap_err();
        assert!(matches!(err, GameError::MissingFrameHandler("Pause")));
    }

    #[test]
    fn test_unreachable_states_are_not_checked() {
        let mut table = StateTable::pong();
        table.set(StateId::Pause, StateBehavior::default());
        let mut graph = TransitionGraph::empty();
        graph.connect(StateId::Start, crate::sim::Trigger::Confirm, StateId::FieldSetup);
        table.validate(&graph, StateId::Start).unwrap();
    }
}
