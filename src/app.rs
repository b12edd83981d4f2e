//! Fixed-cadence frame driver

use std::time::{Duration, Instant};

use crate::game::Game;
use crate::input::RawEvent;
use crate::platform::{EventPump, Renderer};

pub struct FrameDriver {
    budget: Duration,
    max_frames: Option<u64>,
}

impl FrameDriver {
    pub fn new(target_fps: u32) -> Self {
        Self {
            budget: Duration::from_secs(1) / target_fps.max(1),
            max_frames: None,
        }
    }

    /// Stop after `frames` iterations even if the game keeps running
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Loop until the game stops. Returns the number of frames executed.
    ///
    /// Frames that overrun the budget are not made up; the next one simply
    /// starts without sleeping.
    pub fn run<R: Renderer>(&self, game: &mut Game<R>, events: &mut impl EventPump) -> u64 {
        log::info!("Application started");

        let mut frames = 0u64;
        let mut last = Instant::now();

        while game.is_running() && self.max_frames.is_none_or(|max| frames < max) {
            let start = Instant::now();
            let delta = start.duration_since(last).as_secs_f32();
            last = start;

            for event in events.poll_events() {
                match event {
                    RawEvent::Quit => game.stop(),
                    _ => game.process_event(&event),
                }
            }

            game.process_frame(delta);
            frames += 1;

            std::thread::sleep(self.budget.saturating_sub(start.elapsed()));
        }

        log::info!("Application stopped after {} frames", frames);
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::platform::{HeadlessRenderer, ScriptedEvents};
    use crate::settings::Settings;
    use crate::sim::StateId;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn game() -> Game<HeadlessRenderer> {
        Game::new(&Settings::default(), HeadlessRenderer::new(), Pcg32::seed_from_u64(3)).unwrap()
    }

    #[test]
    fn test_budget_from_fps() {
        assert_eq!(FrameDriver::new(50).budget(), Duration::from_millis(20));
        assert_eq!(FrameDriver::new(0).budget(), Duration::from_secs(1));
    }

    #[test]
    fn test_os_quit_stops_immediately() {
        let mut game = game();
        let mut events = ScriptedEvents::new();
        events.idle(2).push_batch(vec![RawEvent::Quit]);

        let frames = FrameDriver::new(1000).run(&mut game, &mut events);
        assert_eq!(frames, 3);
        assert!(!game.is_running());
        // Stopped without passing through Shutdown
        assert_eq!(game.state(), StateId::Start);
    }

    #[test]
    fn test_quit_action_goes_through_shutdown() {
        let mut game = game();
        let mut events = ScriptedEvents::new();
        events.push_batch(vec![RawEvent::KeyDown(Key::Q)]);

        let frames = FrameDriver::new(1000).with_frame_limit(10).run(&mut game, &mut events);
        // Events are drained before the frame, so the same tick applies it
        assert_eq!(frames, 1);
        assert_eq!(game.state(), StateId::Shutdown);
        assert!(!game.is_running());
    }

    #[test]
    fn test_frame_limit() {
        let mut game = game();
        let frames = FrameDriver::new(1000)
            .with_frame_limit(4)
            .run(&mut game, &mut ScriptedEvents::new());
        assert_eq!(frames, 4);
        assert!(game.is_running());
        assert_eq!(game.renderer().presented(), 4);
    }
}
