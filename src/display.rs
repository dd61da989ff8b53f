//! Presentation layer.
//!
//! Scenes draw onto a `Surface`. `Canvas` is an in-memory cell grid;
//! `Terminal` wraps one and, on `present`, translates it into crossterm
//! commands. No game logic lives here.
//!
//! "Assets" are glyph sprites and text styles from built-in tables, served
//! through a caching `ResourceManager` so every name is looked up once.

use std::collections::HashMap;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal, QueueableCommand,
};
use tracing::debug;

use crate::error::{GameError, Result};

// ── Surface ──────────────────────────────────────────────────────────────────

pub trait Surface {
    /// (columns, rows)
    fn size(&self) -> (u16, u16);
    fn clear(&mut self);
    /// Draw a sprite with its top-left corner at `(x, y)`. Spaces are transparent.
    fn blit(&mut self, sprite: &Sprite, x: i32, y: i32) -> Result<()>;
    fn blit_text(&mut self, text: &RenderedText, x: i32, y: i32) -> Result<()>;
    /// Paint `width` cells starting at `(x, y)` with `ch`.
    fn fill(&mut self, x: i32, y: i32, width: u16, ch: char, color: Color) -> Result<()>;
    /// Show the finished frame. In-memory surfaces have nothing to do.
    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bold: bool,
}

const BLANK: Cell = Cell {
    ch: ' ',
    fg: Color::Reset,
    bold: false,
};

/// Back buffer. Writes outside the grid are clipped.
#[derive(Clone, Debug)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![BLANK; width as usize * height as usize],
        }
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y as usize * self.width as usize + x as usize)
    }

    /// One row as plain text, for tests and debugging.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|c| c.ch)
            .collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        (0..self.height).any(|y| self.row_text(y).contains(needle))
    }

    fn put(&mut self, x: i32, y: i32, ch: char, fg: Color, bold: bool) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.cells[idx] = Cell { ch, fg, bold };
    }
}

impl Surface for Canvas {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    fn blit(&mut self, sprite: &Sprite, x: i32, y: i32) -> Result<()> {
        for (dy, row) in sprite.rows.iter().enumerate() {
            for (dx, ch) in row.chars().enumerate() {
                if ch != ' ' {
                    self.put(x + dx as i32, y + dy as i32, ch, sprite.color, false);
                }
            }
        }
        Ok(())
    }

    fn blit_text(&mut self, text: &RenderedText, x: i32, y: i32) -> Result<()> {
        for (dx, ch) in text.text.chars().enumerate() {
            self.put(x + dx as i32, y, ch, text.color, text.bold);
        }
        Ok(())
    }

    fn fill(&mut self, x: i32, y: i32, width: u16, ch: char, color: Color) -> Result<()> {
        for dx in 0..width as i32 {
            self.put(x + dx, y, ch, color, false);
        }
        Ok(())
    }
}

/// A `Canvas` that presents itself to a terminal writer.
pub struct Terminal<W: Write> {
    canvas: Canvas,
    out: W,
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W, width: u16, height: u16) -> Self {
        Self {
            canvas: Canvas::new(width, height),
            out,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }
}

impl<W: Write> Surface for Terminal<W> {
    fn size(&self) -> (u16, u16) {
        self.canvas.size()
    }

    fn clear(&mut self) {
        self.canvas.clear();
    }

    fn blit(&mut self, sprite: &Sprite, x: i32, y: i32) -> Result<()> {
        self.canvas.blit(sprite, x, y)
    }

    fn blit_text(&mut self, text: &RenderedText, x: i32, y: i32) -> Result<()> {
        self.canvas.blit_text(text, x, y)
    }

    fn fill(&mut self, x: i32, y: i32, width: u16, ch: char, color: Color) -> Result<()> {
        self.canvas.fill(x, y, width, ch, color)
    }

    fn present(&mut self) -> Result<()> {
        present(&mut self.out, &self.canvas)
    }
}

/// Render one complete frame to the terminal.
pub fn present<W: Write>(out: &mut W, canvas: &Canvas) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = canvas.size();
    let mut current: Option<(Color, bool)> = None;
    for y in 0..height {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..width {
            let cell = canvas.get(x, y).copied().unwrap_or(BLANK);
            if current != Some((cell.fg, cell.bold)) {
                out.queue(style::SetAttribute(Attribute::Reset))?;
                out.queue(style::SetForegroundColor(cell.fg))?;
                if cell.bold {
                    out.queue(style::SetAttribute(Attribute::Bold))?;
                }
                current = Some((cell.fg, cell.bold));
            }
            out.queue(Print(cell.ch))?;
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Sprites & text ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub rows: Vec<String>,
    pub color: Color,
}

impl Sprite {
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    pub name: String,
    pub size: u16,
    pub bold: bool,
    /// Extra blank columns between letters; large sizes render spaced out.
    pub spacing: usize,
}

/// Text ready to be blitted.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedText {
    pub text: String,
    pub color: Color,
    pub bold: bool,
}

impl RenderedText {
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }
}

pub fn render_text(font: &Font, text: &str, color: Color) -> RenderedText {
    let gap = " ".repeat(font.spacing);
    let text = text
        .chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(&gap);
    RenderedText {
        text,
        color,
        bold: font.bold,
    }
}

// ── Resource tables ──────────────────────────────────────────────────────────

//   ▲      player: nose over a fuselage with wings
//  /█\
const SPRITES: &[(&str, &[&str], Color)] = &[
    ("player", &[" ▲ ", "/█\\"], Color::White),
    ("spacecraft", &["«▼»", "╚═╝"], Color::Green),
    ("octopus", &["(◎)", "╰─╯"], Color::Red),
    ("player_shot", &["║"], Color::Cyan),
    ("enemy_shot", &["↓"], Color::Magenta),
    ("explosion", &["\\*/", "/*\\"], Color::Yellow),
];

const FONTS: &[&str] = &["display", "mono"];

/// Sizes at or above this render bold and letter-spaced.
const LARGE_FONT: u16 = 48;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageHandle(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontHandle(usize);

/// Asset cache. Each name (and font size) is loaded at most once per
/// process; later requests return the cached handle.
#[derive(Debug, Default)]
pub struct ResourceManager {
    images: Vec<Sprite>,
    image_index: HashMap<String, ImageHandle>,
    fonts: Vec<Font>,
    font_index: HashMap<(String, u16), FontHandle>,
}

impl ResourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_image(&mut self, name: &str) -> Result<ImageHandle> {
        if let Some(handle) = self.image_index.get(name) {
            return Ok(*handle);
        }
        let (_, rows, color) = SPRITES
            .iter()
            .find(|(n, _, _)| *n == name)
            .ok_or_else(|| GameError::AssetLoad {
                name: name.to_string(),
            })?;

        let handle = ImageHandle(self.images.len());
        self.images.push(Sprite {
            rows: rows.iter().map(|r| r.to_string()).collect(),
            color: *color,
        });
        self.image_index.insert(name.to_string(), handle);
        debug!(name, "image loaded");
        Ok(handle)
    }

    pub fn get_font(&mut self, name: &str, size: u16) -> Result<FontHandle> {
        let key = (name.to_string(), size);
        if let Some(handle) = self.font_index.get(&key) {
            return Ok(*handle);
        }
        if !FONTS.contains(&name) {
            return Err(GameError::AssetLoad {
                name: format!("{name}@{size}"),
            });
        }

        let handle = FontHandle(self.fonts.len());
        let large = size >= LARGE_FONT;
        self.fonts.push(Font {
            name: name.to_string(),
            size,
            bold: large,
            spacing: usize::from(large),
        });
        self.font_index.insert(key, handle);
        debug!(name, size, "font loaded");
        Ok(handle)
    }

    pub fn image(&self, handle: ImageHandle) -> &Sprite {
        &self.images[handle.0]
    }

    pub fn font(&self, handle: FontHandle) -> &Font {
        &self.fonts[handle.0]
    }

    /// Number of distinct assets actually loaded so far.
    pub fn loaded(&self) -> usize {
        self.images.len() + self.fonts.len()
    }
}

/// Every handle the scenes draw with, resolved once at startup.
#[derive(Clone, Copy, Debug)]
pub struct Assets {
    pub player: ImageHandle,
    pub spacecraft: ImageHandle,
    pub octopus: ImageHandle,
    pub player_shot: ImageHandle,
    pub enemy_shot: ImageHandle,
    pub explosion: ImageHandle,
    pub title_font: FontHandle,
    pub menu_font: FontHandle,
    pub label_font: FontHandle,
}

impl Assets {
    pub fn load(resources: &mut ResourceManager) -> Result<Self> {
        Ok(Self {
            player: resources.get_image("player")?,
            spacecraft: resources.get_image("spacecraft")?,
            octopus: resources.get_image("octopus")?,
            player_shot: resources.get_image("player_shot")?,
            enemy_shot: resources.get_image("enemy_shot")?,
            explosion: resources.get_image("explosion")?,
            title_font: resources.get_font("display", 72)?,
            menu_font: resources.get_font("display", 36)?,
            label_font: resources.get_font("mono", 24)?,
        })
    }
}

/// Read-only view of the loaded assets handed to `Scene::draw`.
#[derive(Clone, Copy)]
pub struct DrawContext<'a> {
    pub resources: &'a ResourceManager,
    pub assets: &'a Assets,
}

impl<'a> DrawContext<'a> {
    pub fn image(&self, handle: ImageHandle) -> &'a Sprite {
        self.resources.image(handle)
    }

    pub fn font(&self, handle: FontHandle) -> &'a Font {
        self.resources.font(handle)
    }
}
