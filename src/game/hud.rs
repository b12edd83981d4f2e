//! Text widgets drawn over the field

use glam::IVec2;

use crate::consts::COUNTDOWN_START;
use crate::error::GameResult;
use crate::platform::{Color, Renderer, TextureId};
use crate::sim::{Countdown, Pulse, Rect, Score};

/// A text texture whose alpha pulses
#[derive(Debug, Clone, Copy)]
pub struct FadingText {
    texture: TextureId,
    center: IVec2,
    pulse: Pulse,
}

impl FadingText {
    pub fn load(renderer: &mut dyn Renderer, text: &str, center: IVec2) -> GameResult<Self> {
        Ok(Self {
            texture: renderer.load_texture(text, Color::WHITE)?,
            center,
            pulse: Pulse::default(),
        })
    }

    pub fn update(&mut self, delta: f32) {
        self.pulse.update(delta);
    }

    pub fn alpha(&self) -> u8 {
        self.pulse.alpha()
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        renderer.draw_texture(self.texture, self.center, self.pulse.alpha());
    }
}

/// Every texture the states draw, rasterized once at startup
#[derive(Debug, Clone)]
pub struct Hud {
    pub press_start: FadingText,
    pub paused: FadingText,
    pub game_over: FadingText,
    pub play_again: FadingText,
    /// Indexed by countdown step; 0 is "GO!"
    countdown_glyphs: Vec<TextureId>,
    /// Indexed by score value, `0..=max`
    digits: Vec<TextureId>,
    countdown_center: IVec2,
    left_score_center: IVec2,
    right_score_center: IVec2,
}

impl Hud {
    pub fn load(renderer: &mut dyn Renderer, field: &Rect, max_score: u8) -> GameResult<Self> {
        let center = field.center();
        let offset = IVec2::new(0, 16);

        let mut countdown_glyphs = vec![renderer.load_texture("GO!", Color::WHITE)?];
        for step in 1..=COUNTDOWN_START {
            countdown_glyphs.push(renderer.load_texture(&step.to_string(), Color::WHITE)?);
        }

        let digits = (0..=max_score)
            .map(|value| renderer.load_texture(&value.to_string(), Color::WHITE))
            .collect::<GameResult<Vec<_>>>()?;

        let score_y = field.h / 24;
        let score_dx = field.w / 6;

        Ok(Self {
            press_start: FadingText::load(renderer, "PRESS START", center)?,
            paused: FadingText::load(renderer, "PAUSED", center)?,
            game_over: FadingText::load(renderer, "GAME OVER", center - offset)?,
            play_again: FadingText::load(renderer, "Press START to play again", center + offset)?,
            countdown_glyphs,
            digits,
            countdown_center: center,
            left_score_center: IVec2::new(center.x - score_dx, score_y),
            right_score_center: IVec2::new(center.x + score_dx, score_y),
        })
    }

    pub fn draw_countdown(&self, renderer: &mut dyn Renderer, countdown: &Countdown) {
        let step = usize::from(countdown.current());
        if let Some(&glyph) = self.countdown_glyphs.get(step) {
            renderer.draw_texture(glyph, self.countdown_center, u8::MAX);
        }
    }

    pub fn draw_scores(&self, renderer: &mut dyn Renderer, left: &Score, right: &Score) {
        for (score, center) in [(left, self.left_score_center), (right, self.right_score_center)] {
            if let Some(&digit) = self.digits.get(usize::from(score.value())) {
                renderer.draw_texture(digit, center, u8::MAX);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{DrawCall, HeadlessRenderer};

    #[test]
    fn test_hud_loads_every_glyph() {
        let mut renderer = HeadlessRenderer::new();
        let hud = Hud::load(&mut renderer, &Rect::new(0, 0, 256, 256), 6).unwrap();
        assert_eq!(hud.countdown_glyphs.len(), 4);
        assert_eq!(hud.digits.len(), 7);
        assert_eq!(renderer.texture_text(hud.countdown_glyphs[0]), Some("GO!"));
        assert_eq!(renderer.texture_text(hud.countdown_glyphs[3]), Some("3"));
        assert_eq!(renderer.texture_text(hud.digits[6]), Some("6"));
    }

    #[test]
    fn test_score_layout() {
        let mut renderer = HeadlessRenderer::new();
        let hud = Hud::load(&mut renderer, &Rect::new(0, 0, 256, 256), 6).unwrap();
        let mut left = Score::new(6);
        left.increment().unwrap();
        let right = Score::new(6);

        renderer.clear();
        hud.draw_scores(&mut renderer, &left, &right);
        renderer.present();

        assert_eq!(renderer.last_frame_texts(), vec!["1", "0"]);
        let centers: Vec<IVec2> = renderer
            .last_frame()
            .iter()
            .filter_map(|call| match call {
                DrawCall::Texture { center, .. } => Some(*center),
                DrawCall::Rect(..) => None,
            })
            .collect();
        assert_eq!(centers, vec![IVec2::new(86, 10), IVec2::new(170, 10)]);
    }

    #[test]
    fn test_fading_text_pulses() {
        let mut renderer = HeadlessRenderer::new();
        let mut text = FadingText::load(&mut renderer, "PAUSED", IVec2::ZERO).unwrap();
        let start = text.alpha();
        text.update(0.1);
        assert!(text.alpha() > start);
    }
}
