//! Input-device events → discrete game events.
//!
//! Terminals differ in what they report. Keyboard-enhancement capable ones
//! (kitty protocol) send `Press` / `Repeat` / `Release`; classic ones only
//! send `Press`, with OS key-repeat showing up as more presses. The
//! `KeyTracker` records the tick each bound key was last seen and
//! synthesises a `KeyUp` once a key has been silent for `HOLD_WINDOW`
//! ticks, so scenes always see a matching down/up pair. A press of a key
//! that is already held only refreshes it: scenes get one `KeyDown` per
//! physical press, never one per OS repeat.

use std::collections::HashMap;
use std::sync::mpsc::{Receiver, TryRecvError};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key is still "held" if it was seen within this many ticks. OS
/// key-repeat runs at 15 Hz or faster, so 4 ticks at 30 Hz (≈133 ms) is
/// always refreshed before it runs out.
pub const HOLD_WINDOW: u64 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Left,
    Right,
    Fire,
    Confirm,
    Back,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
}

/// Anything that can hand the director the events of one tick.
pub trait InputSource {
    fn poll(&mut self, tick: u64) -> Vec<InputEvent>;
}

pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Fire),
        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => Some(Key::Confirm),
        KeyCode::Esc => Some(Key::Back),
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Bound key → tick it was last pressed or repeated.
    held: HashMap<Key, u64>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains_key(&key)
    }

    pub fn translate(&mut self, event: &Event, tick: u64) -> Vec<InputEvent> {
        let Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) = event
        else {
            return Vec::new();
        };

        if *kind == KeyEventKind::Press && is_quit(*code, *modifiers) {
            return vec![InputEvent::Quit];
        }
        let Some(key) = map_key(*code) else {
            return Vec::new();
        };

        match kind {
            KeyEventKind::Press => match self.held.insert(key, tick) {
                None => vec![InputEvent::KeyDown(key)],
                Some(_) => Vec::new(),
            },
            KeyEventKind::Repeat => {
                self.held.insert(key, tick);
                Vec::new()
            }
            KeyEventKind::Release => match self.held.remove(&key) {
                Some(_) => vec![InputEvent::KeyUp(key)],
                None => Vec::new(),
            },
        }
    }

    /// Release every key not refreshed within `HOLD_WINDOW` ticks.
    pub fn expire(&mut self, tick: u64) -> Vec<InputEvent> {
        let mut stale: Vec<Key> = self
            .held
            .iter()
            .filter(|(_, last)| tick.saturating_sub(**last) > HOLD_WINDOW)
            .map(|(key, _)| *key)
            .collect();
        stale.sort_unstable();

        for key in &stale {
            self.held.remove(key);
        }
        stale.into_iter().map(InputEvent::KeyUp).collect()
    }
}

/// Terminal events arriving over a channel from a dedicated reader thread.
pub struct TerminalInput {
    rx: Receiver<Event>,
    tracker: KeyTracker,
}

impl TerminalInput {
    pub fn new(rx: Receiver<Event>) -> Self {
        Self {
            rx,
            tracker: KeyTracker::new(),
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self, tick: u64) -> Vec<InputEvent> {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => events.extend(self.tracker.translate(&event, tick)),
                Err(TryRecvError::Empty) => break,
                // Reader thread is gone; nothing will ever arrive again.
                Err(TryRecvError::Disconnected) => {
                    events.push(InputEvent::Quit);
                    break;
                }
            }
        }
        events.extend(self.tracker.expire(tick));
        events
    }
}
