//! The game controller
//!
//! [`Game`] owns the renderer, the state behavior table and a [`GameContext`]
//! holding everything the state hooks mutate. Each frame it applies at most
//! one pending transition and then runs the current state's frame processor.

pub mod hud;
pub mod states;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use rand_pcg::Pcg32;

pub use hud::{FadingText, Hud};
pub use states::{StateBehavior, StateTable};

use crate::consts::{COUNTDOWN_INTERVAL_MS, COUNTDOWN_START};
use crate::error::{GameError, GameResult};
use crate::input::{Action, InputBus, RawEvent, SubscriptionId};
use crate::platform::Renderer;
use crate::settings::Settings;
use crate::sim::{
    Ball, Countdown, Paddle, Rect, Score, Side, StateId, StateMachine, TransitionGraph, Trigger,
};

/// Mutable game data shared by every state hook
pub struct GameContext {
    pub fsm: StateMachine,
    pub input: InputBus,
    pub field: Rect,
    pub ball: Ball,
    pub left: Paddle,
    pub right: Paddle,
    pub left_score: Score,
    pub right_score: Score,
    pub countdown: Countdown,
    pub hud: Hud,
    pub rng: Pcg32,
    running: bool,
}

impl GameContext {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        if self.running {
            log::info!("Stopping");
        }
        self.running = false;
    }

    /// Score a goal for `side`, then queue game over or a re-serve
    pub fn handle_goal(&mut self, side: Side) {
        let score = match side {
            Side::Left => &mut self.left_score,
            Side::Right => &mut self.right_score,
        };
        if let Err(e) = score.increment() {
            log::warn!("Goal not counted: {}", e);
        }
        let at_max = score.is_at_max();
        let max = score.max();

        log::info!(
            "{:?} goal, score {} - {}",
            side,
            self.left_score.value(),
            self.right_score.value()
        );

        if at_max {
            log::info!("Game over, {:?} side reached {}", side, max);
            self.fsm.game_over();
        } else {
            self.fsm.next();
        }
    }
}

fn field_extent(pixels: u32) -> GameResult<i32> {
    i32::try_from(pixels)
        .map_err(|_| GameError::InvalidSettings(format!("window extent {pixels} does not fit the field")))
}

pub struct Game<R: Renderer> {
    ctx: GameContext,
    renderer: R,
    states: StateTable,
    /// Actions fired by the input bus since the last drain
    actions: Rc<RefCell<VecDeque<Action>>>,
    subscription: SubscriptionId,
}

impl<R: Renderer> Game<R> {
    pub fn new(settings: &Settings, mut renderer: R, rng: Pcg32) -> GameResult<Self> {
        settings.validate()?;

        let states = StateTable::pong();
        let graph = TransitionGraph::pong();
        if cfg!(debug_assertions) {
            states.validate(&graph, StateId::Start)?;
        }

        let field = Rect::new(
            0,
            0,
            field_extent(settings.display.width)?,
            field_extent(settings.display.height)?,
        );
        let hud = Hud::load(&mut renderer, &field, settings.max_score)?;

        let mut input = InputBus::new(settings.bindings.clone());
        let actions = Rc::new(RefCell::new(VecDeque::new()));
        let sink = actions.clone();
        let subscription = input.on_action_pressed(move |action| {
            sink.borrow_mut().push_back(action);
        });

        let center = field.center();
        let mut ball = Ball::new();
        ball.body.set_position(center.x, center.y);
        ball.body.set_velocity(0, 0);

        let mut left = Paddle::new(Side::Left);
        left.body.set_position(field.w / 6, center.y);
        let mut right = Paddle::new(Side::Right);
        right.body.set_position(field.w - field.w / 6, center.y);

        log::info!(
            "Game ready: field {}x{}, first to {}",
            field.w,
            field.h,
            settings.max_score
        );

        Ok(Self {
            ctx: GameContext {
                fsm: StateMachine::new(graph, StateId::Start),
                input,
                field,
                ball,
                left,
                right,
                left_score: Score::new(settings.max_score),
                right_score: Score::new(settings.max_score),
                countdown: Countdown::new(COUNTDOWN_START, COUNTDOWN_INTERVAL_MS),
                hud,
                rng,
                running: true,
            },
            renderer,
            states,
            actions,
            subscription,
        })
    }

    /// Feed one raw event through the input bus and turn the edge-triggered
    /// actions it fires into transition triggers
    pub fn process_event(&mut self, event: &RawEvent) {
        self.ctx.input.handle_event(event);

        let fired: Vec<Action> = self.actions.borrow_mut().drain(..).collect();
        for action in fired {
            let trigger = match action {
                Action::Quit => Trigger::Quit,
                Action::Pause => Trigger::Pause,
                Action::Confirm => Trigger::Confirm,
                Action::Cancel => Trigger::Cancel,
                _ => continue,
            };
            if !self.ctx.fsm.trigger(trigger) {
                log::trace!("{:?} does nothing in {}", action, self.ctx.fsm.current());
            }
        }
    }

    /// Apply at most one pending transition, then run the current state
    pub fn process_frame(&mut self, delta: f32) {
        if let Some(target) = self.ctx.fsm.take_pending() {
            self.apply_transition(target);
        }

        if let Some(frame) = self.states.behavior(self.ctx.fsm.current()).frame {
            frame(&mut self.ctx, &mut self.renderer, delta);
        }
    }

    fn apply_transition(&mut self, target: StateId) {
        let from = self.ctx.fsm.current();
        if let Some(exit) = self.states.behavior(from).exit {
            exit(&mut self.ctx);
        }

        self.ctx.fsm.set_current(target);
        log::debug!("{} -> {}", from, target);

        if let Some(enter) = self.states.behavior(target).enter {
            enter(&mut self.ctx);
        }
    }

    /// Queue the current state's edge for `trigger`
    pub fn trigger(&mut self, trigger: Trigger) -> bool {
        self.ctx.fsm.trigger(trigger)
    }

    pub fn state(&self) -> StateId {
        self.ctx.fsm.current()
    }

    pub fn is_running(&self) -> bool {
        self.ctx.is_running()
    }

    pub fn stop(&mut self) {
        self.ctx.stop();
    }

    pub fn context(&self) -> &GameContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut GameContext {
        &mut self.ctx
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn ball(&self) -> &Ball {
        &self.ctx.ball
    }

    pub fn paddles(&self) -> (&Paddle, &Paddle) {
        (&self.ctx.left, &self.ctx.right)
    }

    pub fn scores(&self) -> (u8, u8) {
        (self.ctx.left_score.value(), self.ctx.right_score.value())
    }

    pub fn field(&self) -> Rect {
        self.ctx.field
    }
}

impl<R: Renderer> Drop for Game<R> {
    fn drop(&mut self) {
        self.ctx.input.off(self.subscription);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::platform::HeadlessRenderer;
    use rand::SeedableRng;

    const DT: f32 = 1.0 / 60.0;

    fn game() -> Game<HeadlessRenderer> {
        Game::new(&Settings::default(), HeadlessRenderer::new(), Pcg32::seed_from_u64(1)).unwrap()
    }

    #[test]
    fn test_initial_layout() {
        let game = game();
        assert_eq!(game.state(), StateId::Start);
        assert!(game.is_running());
        assert_eq!(game.ball().body.position(), glam::IVec2::new(128, 128));
        assert_eq!(game.ball().body.velocity, glam::IVec2::ZERO);

        let (left, right) = game.paddles();
        assert_eq!(left.body.position(), glam::IVec2::new(42, 128));
        assert_eq!(right.body.position(), glam::IVec2::new(214, 128));
    }

    #[test]
    fn test_start_frame_draws_prompt() {
        let mut game = game();
        game.process_frame(DT);
        assert_eq!(game.renderer().last_frame_texts(), vec!["PRESS START"]);
    }

    #[test]
    fn test_confirm_key_queues_field_setup() {
        let mut game = game();
        game.process_event(&RawEvent::KeyDown(Key::Return));
        assert_eq!(game.state(), StateId::Start);
        game.process_frame(DT);
        assert_eq!(game.state(), StateId::FieldSetup);
        assert_ne!(game.ball().body.velocity, glam::IVec2::ZERO);
    }

    #[test]
    fn test_unmapped_action_is_ignored() {
        let mut game = game();
        game.process_event(&RawEvent::KeyDown(Key::P));
        game.process_event(&RawEvent::KeyDown(Key::A));
        game.process_frame(DT);
        assert_eq!(game.state(), StateId::Start);
    }

    #[test]
    fn test_goal_at_max_queues_game_over() {
        let mut game = game();
        game.context_mut().fsm.set_current(StateId::Playing);
        for _ in 0..5 {
            game.context_mut().handle_goal(Side::Right);
        }
        assert_eq!(game.scores(), (0, 5));
        assert_eq!(game.context_mut().fsm.take_pending(), Some(StateId::FieldSetup));

        // Drain the re-serves queued by the first goals
        while game.context_mut().fsm.take_pending().is_some() {}

        game.context_mut().handle_goal(Side::Right);
        assert_eq!(game.scores(), (0, 6));
        assert_eq!(game.context_mut().fsm.take_pending(), Some(StateId::GameOver));
    }

    #[test]
    fn test_actions_fired_in_one_batch_queue_in_order() {
        let mut game = game();
        game.context_mut().fsm.set_current(StateId::Playing);
        game.process_event(&RawEvent::KeyDown(Key::P));
        game.process_event(&RawEvent::KeyDown(Key::Q));

        assert!(game.actions.borrow().is_empty());
        let fsm = &mut game.context_mut().fsm;
        assert_eq!(fsm.take_pending(), Some(StateId::Pause));
        assert_eq!(fsm.take_pending(), Some(StateId::Shutdown));
        assert_eq!(fsm.take_pending(), None);
    }

    #[test]
    fn test_oversized_window_is_rejected() {
        let mut settings = Settings::default();
        settings.display.width = u32::MAX;
        let result = Game::new(&settings, HeadlessRenderer::new(), Pcg32::seed_from_u64(1));
        assert!(matches!(result, Err(GameError::InvalidSettings(_))));
        assert!(field_extent(u32::MAX).is_err());
        assert_eq!(field_extent(640).unwrap(), 640);
    }

    #[test]
    fn test_game_subscribes_to_input_bus() {
        let mut game = game();
        let id = game.subscription;
        assert!(game.context_mut().input.off(id));
        assert!(!game.context_mut().input.off(id));
    }
}
