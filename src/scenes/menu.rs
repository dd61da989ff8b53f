use crossterm::style::Color;
use tracing::info;

use crate::display::{DrawContext, Surface};
use crate::error::Result;
use crate::input::{InputEvent, Key};
use crate::widgets::{draw_centered, Menu};

use super::{Scene, SceneKind, TransitionRequest};

/// Medium is preselected.
const DEFAULT_INDEX: usize = 1;

pub struct MenuScene {
    menu: Menu,
    start_requested: bool,
}

impl MenuScene {
    pub fn new() -> Self {
        Self {
            menu: Menu::new(DEFAULT_INDEX),
            start_requested: false,
        }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }
}

impl Default for MenuScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for MenuScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Menu
    }

    fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(Key::Left) => {
                self.menu.switch(-1);
            }
            InputEvent::KeyDown(Key::Right) => {
                self.menu.switch(1);
            }
            InputEvent::KeyDown(Key::Fire | Key::Confirm) => self.start_requested = true,
            _ => {}
        }
    }

    fn update(&mut self, _dt: f32) -> Result<Option<TransitionRequest>> {
        if std::mem::take(&mut self.start_requested) {
            let level = self.menu.selected();
            info!(level = level.label(), "starting game");
            return Ok(Some(TransitionRequest::to_playing(level)));
        }
        Ok(None)
    }

    fn draw(&self, surface: &mut dyn Surface, ctx: &DrawContext) -> Result<()> {
        let title = ctx.font(ctx.assets.title_font);
        let items = ctx.font(ctx.assets.menu_font);
        let hint = ctx.font(ctx.assets.label_font);

        self.menu.draw(surface, title, items)?;

        let (_, height) = surface.size();
        draw_centered(
            surface,
            hint,
            "← → / A D : Choose   SPACE / ENTER : Start   Q : Quit",
            Color::DarkGrey,
            height as i32 - 2,
        )
    }
}
