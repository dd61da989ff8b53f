use crossterm::style::Color;

use crate::display::{DrawContext, Surface};
use crate::error::Result;
use crate::input::{InputEvent, Key};
use crate::widgets::draw_centered;

use super::{GameResult, Outcome, Scene, SceneKind, TransitionRequest, Wreck};

/// Seconds the result screen ignores Confirm/Fire after it opens.
pub const INPUT_GRACE: f32 = 0.5;

/// Result screen. Holds nothing from the finished game except its `Outcome`.
pub struct EndScene {
    outcome: Outcome,
    lines: [String; 2],
    wreck: Option<Wreck>,
    elapsed: f32,
    confirmed: bool,
}

impl EndScene {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            lines: [
                format!("Final Score: {:>6}", outcome.score),
                format!("Wave {} on {}", outcome.wave, outcome.level.label()),
            ],
            wreck: outcome.wreck,
            outcome,
            elapsed: 0.0,
            confirmed: false,
        }
    }

    pub fn accepts_input(&self) -> bool {
        self.elapsed >= INPUT_GRACE
    }

    /// The ship's explosion while it is still burning.
    pub fn wreck(&self) -> Option<&Wreck> {
        self.wreck.as_ref()
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    fn title(&self) -> (&'static str, Color) {
        match self.outcome.result {
            GameResult::Won => ("You win!", Color::Green),
            GameResult::Lost => ("You lose!", Color::Red),
        }
    }
}

impl Scene for EndScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Ended
    }

    fn handle_event(&mut self, event: &InputEvent) {
        if let InputEvent::KeyDown(Key::Confirm | Key::Fire) = event {
            self.confirmed = self.accepts_input();
        }
    }

    fn update(&mut self, dt: f32) -> Result<Option<TransitionRequest>> {
        self.elapsed += dt;
        self.wreck = self.wreck.and_then(Wreck::burned);
        if std::mem::take(&mut self.confirmed) {
            return Ok(Some(TransitionRequest::to_menu()));
        }
        Ok(None)
    }

    fn draw(&self, surface: &mut dyn Surface, ctx: &DrawContext) -> Result<()> {
        let (_, height) = surface.size();
        let cy = height as i32 / 2;
        let (title, color) = self.title();

        if let Some(wreck) = &self.wreck {
            surface.blit(ctx.image(ctx.assets.explosion), wreck.x, wreck.y)?;
        }

        draw_centered(surface, ctx.font(ctx.assets.title_font), title, color, cy - 3)?;
        let body = ctx.font(ctx.assets.menu_font);
        draw_centered(surface, body, &self.lines[0], Color::Yellow, cy)?;
        draw_centered(surface, body, &self.lines[1], Color::DarkGrey, cy + 1)?;
        draw_centered(
            surface,
            ctx.font(ctx.assets.label_font),
            "ENTER - Menu   Q - Quit",
            Color::White,
            cy + 3,
        )
    }
}
