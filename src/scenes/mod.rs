//! Scenes: mutually exclusive game states.
//!
//! A scene consumes input events, advances its own entities and draws
//! itself. It never builds its successor: `update` returns a
//! `TransitionRequest` and the director decides what to construct.

mod end;
mod menu;
mod play;

pub use end::{EndScene, INPUT_GRACE};
pub use menu::MenuScene;
pub use play::PlayScene;

use crate::display::{DrawContext, Surface};
use crate::entities::Level;
use crate::error::Result;
use crate::input::InputEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneKind {
    Menu,
    Playing,
    Ended,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    Won,
    Lost,
}

/// The ship's last explosion, in screen cells, still burning for `frames`
/// more frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wreck {
    pub x: i32,
    pub y: i32,
    pub frames: u32,
}

impl Wreck {
    /// One frame later, or `None` once it has burnt out.
    pub fn burned(self) -> Option<Self> {
        (self.frames > 1).then(|| Self {
            frames: self.frames - 1,
            ..self
        })
    }
}

/// Everything that survives a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub result: GameResult,
    pub score: u32,
    /// Wave the game ended on (1-based).
    pub wave: u32,
    pub level: Level,
    /// Set when the ship was destroyed.
    pub wreck: Option<Wreck>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Payload {
    None,
    Difficulty(Level),
    Outcome(Outcome),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionRequest {
    pub target: SceneKind,
    pub payload: Payload,
}

impl TransitionRequest {
    pub fn to_menu() -> Self {
        Self {
            target: SceneKind::Menu,
            payload: Payload::None,
        }
    }

    pub fn to_playing(level: Level) -> Self {
        Self {
            target: SceneKind::Playing,
            payload: Payload::Difficulty(level),
        }
    }

    pub fn to_ended(outcome: Outcome) -> Self {
        Self {
            target: SceneKind::Ended,
            payload: Payload::Outcome(outcome),
        }
    }
}

pub trait Scene {
    fn kind(&self) -> SceneKind;

    /// Consume one discrete input event. State only, no drawing.
    fn handle_event(&mut self, event: &InputEvent);

    /// Advance one tick of `dt` seconds.
    fn update(&mut self, dt: f32) -> Result<Option<TransitionRequest>>;

    /// Render the current state. Must not change it.
    fn draw(&self, surface: &mut dyn Surface, ctx: &DrawContext) -> Result<()>;
}
