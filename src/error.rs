//! Error types shared by the simulation, the game controller and the platform backends

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    /// Window, renderer or event pump creation failed
    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("Failed to load font {path}: {reason}")]
    Font { path: String, reason: String },

    #[error("Failed to rasterize {text:?}: {reason}")]
    Texture { text: String, reason: String },

    #[error("Cannot increment score further, must be within range [0, {max}]")]
    ScoreOutOfRange { max: u8 },

    /// A reachable state has no frame processor wired
    #[error("{0} state does not define a frame processor")]
    MissingFrameHandler(&'static str),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings format error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GameError {
    /// Errors raised while acquiring window, renderer or font resources.
    /// There is no degraded mode for these, the process must terminate.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            GameError::Sdl(_)
                | GameError::Font { .. }
                | GameError::Texture { .. }
                | GameError::MissingFrameHandler(_)
        )
    }
}

pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_error_message_names_range() {
        let err = GameError::ScoreOutOfRange { max: 6 };
        assert_eq!(
            err.to_string(),
            "Cannot increment score further, must be within range [0, 6]"
        );
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_resource_errors_are_fatal() {
        assert!(GameError::Sdl("no video device".into()).is_fatal());
        assert!(
            GameError::Font {
                path: "res/font.ttf".into(),
                reason: "missing".into()
            }
            .is_fatal()
        );
        assert!(GameError::MissingFrameHandler("Start").is_fatal());
    }
}
