//! Error types for the game core.

use thiserror::Error;

use crate::scenes::SceneKind;

#[derive(Debug, Error)]
pub enum GameError {
    /// An image or font name the resource tables do not know.
    #[error("failed to load asset `{name}`")]
    AssetLoad { name: String },

    /// A scene asked for a transition the director refuses to perform.
    #[error("invalid transition {from:?} -> {to:?}: {reason}")]
    InvalidTransition {
        from: SceneKind,
        to: SceneKind,
        reason: String,
    },

    #[error("state invariant violated: {0}")]
    StateInvariant(String),

    #[error("label count mismatch: expected {expected}, got {got}")]
    LabelCount { expected: usize, got: usize },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
