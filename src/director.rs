//! Scene director and fixed-timestep loop.
//!
//! One tick: feed the tick's input events to the active scene, update it,
//! swap scenes if it asked for a transition, draw, present. A `Quit` event
//! ends the loop before the scene sees it. Update errors are fatal; draw
//! errors are logged and the frame is skipped.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{error, info, warn};

use crate::config::GameConfig;
use crate::display::{Assets, DrawContext, ResourceManager, Surface};
use crate::error::{GameError, Result};
use crate::input::{InputEvent, InputSource};
use crate::scenes::{
    EndScene, MenuScene, Payload, PlayScene, Scene, SceneKind, TransitionRequest,
};

// ── Clock ────────────────────────────────────────────────────────────────────

/// Time source for pacing the loop.
pub trait Clock {
    fn now(&self) -> Instant;
    /// Block until `deadline`. Returns immediately if it already passed.
    fn sleep_until(&mut self, deadline: Instant);
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep_until(&mut self, deadline: Instant) {
        let now = Instant::now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
    }
}

/// Clock that only moves when slept on. Lets tests step the loop without
/// real delays.
pub struct ManualClock {
    now: Instant,
    start: Instant,
}

impl ManualClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self { now, start: now }
    }

    pub fn elapsed(&self) -> Duration {
        self.now - self.start
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now
    }

    fn sleep_until(&mut self, deadline: Instant) {
        self.now = self.now.max(deadline);
    }
}

// ── Active scene ─────────────────────────────────────────────────────────────

pub enum ActiveScene {
    Menu(MenuScene),
    Playing(PlayScene),
    Ended(EndScene),
}

impl ActiveScene {
    pub fn kind(&self) -> SceneKind {
        self.as_scene().kind()
    }

    pub fn as_scene(&self) -> &dyn Scene {
        match self {
            ActiveScene::Menu(scene) => scene,
            ActiveScene::Playing(scene) => scene,
            ActiveScene::Ended(scene) => scene,
        }
    }

    pub fn as_scene_mut(&mut self) -> &mut dyn Scene {
        match self {
            ActiveScene::Menu(scene) => scene,
            ActiveScene::Playing(scene) => scene,
            ActiveScene::Ended(scene) => scene,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
}

// ── Director ─────────────────────────────────────────────────────────────────

pub struct SceneDirector<S: Surface> {
    config: GameConfig,
    resources: ResourceManager,
    assets: Assets,
    scene: ActiveScene,
    surface: S,
    rng: StdRng,
    ticks: u64,
    dt: f32,
    /// Whether the last tick's draw succeeded.
    frame_drawn: bool,
}

impl<S: Surface> SceneDirector<S> {
    /// Loads every asset up front; a missing one is fatal before any frame
    /// is drawn.
    pub fn new(config: GameConfig, surface: S) -> Result<Self> {
        let mut resources = ResourceManager::new();
        let assets = Assets::load(&mut resources)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let dt = config.tick_duration().as_secs_f32();
        info!(
            width = config.playfield_width,
            height = config.playfield_height,
            tick_rate = config.tick_rate,
            "director ready"
        );

        Ok(Self {
            config,
            resources,
            assets,
            scene: ActiveScene::Menu(MenuScene::new()),
            surface,
            rng,
            ticks: 0,
            dt,
            frame_drawn: false,
        })
    }

    pub fn scene(&self) -> &ActiveScene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut ActiveScene {
        &mut self.scene
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn frame_drawn(&self) -> bool {
        self.frame_drawn
    }

    /// Run one tick against the given events, drawing into the surface
    /// without presenting it.
    pub fn tick(&mut self, events: &[InputEvent]) -> Result<TickOutcome> {
        self.ticks += 1;

        for event in events {
            if *event == InputEvent::Quit {
                info!(scene = ?self.scene.kind(), "quit requested");
                return Ok(TickOutcome::Quit);
            }
            self.scene.as_scene_mut().handle_event(event);
        }

        let request = match self.scene.as_scene_mut().update(self.dt) {
            Ok(request) => request,
            Err(e) => {
                error!(error = %e, scene = ?self.scene.kind(), "update failed");
                return Err(e);
            }
        };
        if let Some(request) = request {
            self.transition(request)?;
        }

        self.frame_drawn = self.draw();
        Ok(TickOutcome::Continue)
    }

    /// Returns false if the frame could not be drawn.
    fn draw(&mut self) -> bool {
        self.surface.clear();
        let ctx = DrawContext {
            resources: &self.resources,
            assets: &self.assets,
        };
        match self.scene.as_scene().draw(&mut self.surface, &ctx) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, tick = self.ticks, "draw failed, frame skipped");
                false
            }
        }
    }

    /// Replace the active scene as `request` asks. Edges other than
    /// Menu → Playing, Playing → Ended and Playing/Ended → Menu are refused.
    pub fn transition(&mut self, request: TransitionRequest) -> Result<()> {
        self.scene = self.build_scene(request)?;
        Ok(())
    }

    fn build_scene(&mut self, request: TransitionRequest) -> Result<ActiveScene> {
        let from = self.scene.kind();
        let invalid = |reason: &str| GameError::InvalidTransition {
            from,
            to: request.target,
            reason: reason.to_string(),
        };

        let scene = match (from, request.target, request.payload) {
            (SceneKind::Menu, SceneKind::Playing, Payload::Difficulty(level)) => {
                let rng = StdRng::seed_from_u64(self.rng.gen());
                ActiveScene::Playing(PlayScene::new(&self.config, level, rng)?)
            }
            (SceneKind::Playing, SceneKind::Ended, Payload::Outcome(outcome)) => {
                ActiveScene::Ended(EndScene::new(outcome))
            }
            (SceneKind::Playing | SceneKind::Ended, SceneKind::Menu, Payload::None) => {
                ActiveScene::Menu(MenuScene::new())
            }
            (_, SceneKind::Playing, p) if !matches!(p, Payload::Difficulty(_)) => {
                return Err(invalid("Playing needs a difficulty payload"))
            }
            (_, SceneKind::Ended, p) if !matches!(p, Payload::Outcome(_)) => {
                return Err(invalid("Ended needs an outcome payload"))
            }
            _ => return Err(invalid("no such edge")),
        };

        info!(from = ?from, to = ?request.target, "scene transition");
        Ok(scene)
    }

    /// Drive the loop until a quit event or a fatal error. Ticks are paced
    /// by `clock`; a loop that falls behind skips ahead instead of bursting.
    pub fn run<I, C>(&mut self, input: &mut I, clock: &mut C) -> Result<()>
    where
        I: InputSource,
        C: Clock,
    {
        let frame = self.config.tick_duration();
        let mut next = clock.now();

        loop {
            let events = input.poll(self.ticks);
            if self.tick(&events)? == TickOutcome::Quit {
                break;
            }
            if self.frame_drawn {
                self.surface.present()?;
            }

            next += frame;
            let now = clock.now();
            if now > next + frame {
                next = now;
            }
            clock.sleep_until(next);
        }

        info!(ticks = self.ticks, "loop finished");
        Ok(())
    }
}
