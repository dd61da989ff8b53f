use crossterm::style::Color;

use space_invaders::display::*;
use space_invaders::entities::Level;
use space_invaders::error::GameError;
use space_invaders::widgets::*;

fn mono() -> Font {
    Font {
        name: "mono".to_string(),
        size: 24,
        bold: false,
        spacing: 0,
    }
}

// ── draw_centered ─────────────────────────────────────────────────────────────

#[test]
fn draw_centered_centres_on_row() {
    let mut canvas = Canvas::new(10, 2);
    draw_centered(&mut canvas, &mono(), "ab", Color::White, 1).unwrap();
    assert_eq!(canvas.row_text(1), "    ab    ");
}

#[test]
fn draw_centered_wider_than_surface_starts_at_zero() {
    let mut canvas = Canvas::new(4, 1);
    draw_centered(&mut canvas, &mono(), "abcdef", Color::White, 0).unwrap();
    assert_eq!(canvas.row_text(0), "abcd");
}

// ── Menu ──────────────────────────────────────────────────────────────────────

#[test]
fn menu_start_index_is_clamped() {
    assert_eq!(Menu::new(1).index(), 1);
    assert_eq!(Menu::new(7).index(), 2);
}

#[test]
fn menu_switch_moves_and_stops_at_ends() {
    let mut menu = Menu::new(1);
    assert_eq!(menu.switch(-1), 0);
    assert_eq!(menu.switch(-1), 0);
    assert_eq!(menu.switch(1), 1);
    assert_eq!(menu.switch(1), 2);
    assert_eq!(menu.switch(1), 2);
    assert_eq!(menu.switch(0), 2);
    assert_eq!(menu.selected(), Level::Hard);
}

#[test]
fn menu_draws_selection_in_brackets() {
    let mut canvas = Canvas::new(60, 24);
    let mut menu = Menu::new(1);
    menu.draw(&mut canvas, &mono(), &mono()).unwrap();
    assert!(canvas.contains_text("Space Invaders"));
    assert!(canvas.contains_text("[Medium]"));
    assert!(!canvas.contains_text("[Easy]"));

    menu.switch(-1);
    canvas.clear();
    menu.draw(&mut canvas, &mono(), &mono()).unwrap();
    assert!(canvas.contains_text("[Easy]"));
}

// ── LabelPanel ────────────────────────────────────────────────────────────────

#[test]
fn label_panel_starts_empty() {
    let panel = LabelPanel::new(3, 0, 0, 10);
    assert_eq!(panel.labels(), &["", "", ""]);
}

#[test]
fn label_panel_update_replaces_text() {
    let mut panel = LabelPanel::new(2, 0, 0, 10);
    panel.update(&["Energy: 3", "Score: 0"]).unwrap();
    assert_eq!(panel.labels(), &["Energy: 3", "Score: 0"]);
    panel.update(&[String::from("Energy: 2"), String::from("Score: 100")]).unwrap();
    assert_eq!(panel.labels()[1], "Score: 100");
}

#[test]
fn label_panel_rejects_wrong_count() {
    let mut panel = LabelPanel::new(3, 0, 0, 10);
    panel.update(&["a", "b", "c"]).unwrap();
    match panel.update(&["only one"]) {
        Err(GameError::LabelCount { expected, got }) => {
            assert_eq!(expected, 3);
            assert_eq!(got, 1);
        }
        other => panic!("expected LabelCount, got {other:?}"),
    }
    // Old labels survive a rejected update
    assert_eq!(panel.labels(), &["a", "b", "c"]);
}

#[test]
fn label_panel_lays_out_left_to_right() {
    let mut canvas = Canvas::new(20, 1);
    let mut panel = LabelPanel::new(2, 1, 0, 8);
    panel.update(&["A:1", "B:2"]).unwrap();
    panel.draw(&mut canvas, &mono()).unwrap();
    assert_eq!(canvas.row_text(0), " A:1     B:2        ");
}

// ── EnergyBar ─────────────────────────────────────────────────────────────────

#[test]
fn energy_bar_starts_full_and_green() {
    let bar = EnergyBar::new(0, 0, 12);
    assert_eq!(bar.ratio(), 1.0);
    assert_eq!(bar.color(), Color::Green);
    assert_eq!(bar.filled_cells(), 10);
}

#[test]
fn energy_bar_colour_thresholds() {
    let mut bar = EnergyBar::new(0, 0, 12);
    bar.update(8, 10);
    assert_eq!(bar.color(), Color::Green);
    bar.update(7, 10);
    assert_eq!(bar.color(), Color::Yellow);
    bar.update(4, 10);
    assert_eq!(bar.color(), Color::Yellow);
    bar.update(3, 10);
    assert_eq!(bar.color(), Color::Red);
    bar.update(0, 10);
    assert_eq!(bar.color(), Color::Red);
}

#[test]
fn energy_bar_ratio_is_clamped() {
    let mut bar = EnergyBar::new(0, 0, 12);
    bar.update(20, 10);
    assert_eq!(bar.ratio(), 1.0);
    bar.update(5, 0);
    assert_eq!(bar.ratio(), 0.0);
    assert_eq!(bar.filled_cells(), 0);
}

#[test]
fn energy_bar_draws_filled_and_empty_cells() {
    let mut canvas = Canvas::new(12, 1);
    let mut bar = EnergyBar::new(0, 0, 12);
    bar.update(1, 2);
    bar.draw(&mut canvas).unwrap();
    assert_eq!(canvas.row_text(0), "[█████·····]");
    assert_eq!(canvas.get(1, 0).map(|c| c.fg), Some(Color::Yellow));
}

#[test]
fn energy_bar_minimum_width() {
    let mut canvas = Canvas::new(5, 1);
    let bar = EnergyBar::new(0, 0, 0);
    bar.draw(&mut canvas).unwrap();
    assert_eq!(canvas.row_text(0), "[█]  ");
}
