//! On-screen widgets. Each keeps only presentation state (text, selection,
//! bar ratio), refreshed by its scene during `update` and rendered in `draw`.

use crossterm::style::Color;

use crate::display::{render_text, Font, Surface};
use crate::entities::Level;
use crate::error::{GameError, Result};

/// Draw `text` horizontally centred on row `y`.
pub fn draw_centered(
    surface: &mut dyn Surface,
    font: &Font,
    text: &str,
    color: Color,
    y: i32,
) -> Result<()> {
    let rendered = render_text(font, text, color);
    let (width, _) = surface.size();
    let x = (width as i32 - rendered.width() as i32) / 2;
    surface.blit_text(&rendered, x.max(0), y)
}

// ── Menu ─────────────────────────────────────────────────────────────────────

const HEADER_COLOR: Color = Color::Red;
const ACTION_COLOR: Color = Color::White;
const ITEM_COLOR: Color = Color::White;
const SELECTED_ITEM_COLOR: Color = Color::Yellow;

/// Difficulty selector: three items in a row, one highlighted.
#[derive(Clone, Debug)]
pub struct Menu {
    index: usize,
}

impl Menu {
    pub fn new(start_index: usize) -> Self {
        Self {
            index: start_index.min(Level::ALL.len() - 1),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn selected(&self) -> Level {
        Level::from_index(self.index)
    }

    /// Move the selection one step; stays put at either end.
    pub fn switch(&mut self, direction: i32) -> usize {
        if direction < 0 && self.index > 0 {
            self.index -= 1;
        } else if direction > 0 && self.index < Level::ALL.len() - 1 {
            self.index += 1;
        }
        self.index
    }

    pub fn draw(&self, surface: &mut dyn Surface, header_font: &Font, item_font: &Font) -> Result<()> {
        let (width, height) = surface.size();
        let top = height as i32 / 3;

        draw_centered(surface, header_font, "Space Invaders", HEADER_COLOR, top)?;
        draw_centered(surface, item_font, "Select difficulty:", ACTION_COLOR, top + 3)?;

        let items: Vec<_> = Level::ALL
            .iter()
            .enumerate()
            .map(|(i, level)| {
                let color = if i == self.index {
                    SELECTED_ITEM_COLOR
                } else {
                    ITEM_COLOR
                };
                let label = if i == self.index {
                    format!("[{}]", level.label())
                } else {
                    format!(" {} ", level.label())
                };
                render_text(item_font, &label, color)
            })
            .collect();

        let gap = 4;
        let total: i32 =
            items.iter().map(|t| t.width() as i32).sum::<i32>() + gap * (items.len() as i32 - 1);
        let mut x = ((width as i32 - total) / 2).max(0);
        for item in &items {
            surface.blit_text(item, x, top + 5)?;
            x += item.width() as i32 + gap;
        }
        Ok(())
    }
}

// ── LabelPanel ───────────────────────────────────────────────────────────────

/// A fixed number of text labels laid out left to right on one row.
///
/// ```ignore
/// let mut labels = LabelPanel::new(3, 1, 0, 16);
/// labels.update(&[energy, score, wave])?;
/// labels.draw(surface, font)?;
/// ```
#[derive(Clone, Debug)]
pub struct LabelPanel {
    labels: Vec<String>,
    x: i32,
    y: i32,
    /// Column distance between label starts.
    spacing: i32,
    color: Color,
}

impl LabelPanel {
    pub fn new(count: usize, x: i32, y: i32, spacing: i32) -> Self {
        Self {
            labels: vec![String::new(); count],
            x,
            y,
            spacing,
            color: Color::White,
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Replace every label. The count must match the panel's.
    pub fn update<S: AsRef<str>>(&mut self, labels: &[S]) -> Result<()> {
        if labels.len() != self.labels.len() {
            return Err(GameError::LabelCount {
                expected: self.labels.len(),
                got: labels.len(),
            });
        }
        for (old, new) in self.labels.iter_mut().zip(labels) {
            old.clear();
            old.push_str(new.as_ref());
        }
        Ok(())
    }

    pub fn draw(&self, surface: &mut dyn Surface, font: &Font) -> Result<()> {
        for (i, label) in self.labels.iter().enumerate() {
            let text = render_text(font, label, self.color);
            surface.blit_text(&text, self.x + self.spacing * i as i32, self.y)?;
        }
        Ok(())
    }
}

// ── EnergyBar ────────────────────────────────────────────────────────────────

const BAR_OUTLINE: Color = Color::Grey;
const BAR_EMPTY: Color = Color::DarkGrey;

/// `[██████    ]` style gauge. The inner colour follows the fill ratio:
/// green above 70%, yellow above 30%, red otherwise.
#[derive(Clone, Debug)]
pub struct EnergyBar {
    x: i32,
    y: i32,
    /// Total width including the two bracket cells.
    width: u16,
    ratio: f32,
    color: Color,
}

impl EnergyBar {
    pub fn new(x: i32, y: i32, width: u16) -> Self {
        Self {
            x,
            y,
            width: width.max(3),
            ratio: 1.0,
            color: Color::Green,
        }
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn update(&mut self, value: u32, max: u32) {
        self.ratio = if max == 0 {
            0.0
        } else {
            (value as f32 / max as f32).clamp(0.0, 1.0)
        };
        self.color = if self.ratio > 0.7 {
            Color::Green
        } else if self.ratio > 0.3 {
            Color::Yellow
        } else {
            Color::Red
        };
    }

    fn inner_width(&self) -> u16 {
        self.width - 2
    }

    pub fn filled_cells(&self) -> u16 {
        (self.inner_width() as f32 * self.ratio).round() as u16
    }

    pub fn draw(&self, surface: &mut dyn Surface) -> Result<()> {
        let filled = self.filled_cells();
        let inner = self.inner_width();
        surface.fill(self.x, self.y, 1, '[', BAR_OUTLINE)?;
        surface.fill(self.x + 1, self.y, filled, '█', self.color)?;
        surface.fill(self.x + 1 + filled as i32, self.y, inner - filled, '·', BAR_EMPTY)?;
        surface.fill(self.x + 1 + inner as i32, self.y, 1, ']', BAR_OUTLINE)?;
        Ok(())
    }
}
