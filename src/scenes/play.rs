use crossterm::style::Color;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::collision::CollisionIndex;
use crate::compute::{
    enemy_fire, params_for, player_fire, spawn_formation, spawn_player, wave_speed, Params,
};
use crate::config::GameConfig;
use crate::display::{render_text, DrawContext, Surface};
use crate::entities::{EnemyKind, Explosion, Level, Owner, Player, Projectile};
use crate::error::{GameError, Result};
use crate::formation::{Formation, StepKind};
use crate::input::{InputEvent, Key};
use crate::widgets::{EnergyBar, LabelPanel};

use super::{GameResult, Outcome, Scene, SceneKind, TransitionRequest, Wreck};

/// Screen row the playfield starts on; row 0 is the HUD.
pub const PLAYFIELD_TOP: i32 = 1;

/// Damage taken when an enemy reaches the bottom of the playfield.
const BREACH_DAMAGE: u32 = 1;

#[derive(Clone, Copy, Debug, Default)]
struct Controls {
    left: bool,
    right: bool,
    fire: bool,
}

impl Controls {
    fn direction(&self) -> i8 {
        self.right as i8 - self.left as i8
    }
}

pub struct PlayScene {
    pub player: Player,
    pub formation: Formation,
    pub projectiles: Vec<Projectile>,
    pub explosions: Vec<Explosion>,
    pub score: u32,
    /// Current wave, starting at 1.
    pub wave: u32,
    config: GameConfig,
    params: Params,
    level: Level,
    controls: Controls,
    abort_requested: bool,
    rng: StdRng,
    labels: LabelPanel,
    energy_bar: EnergyBar,
    charge_bar: EnergyBar,
}

impl PlayScene {
    pub fn new(config: &GameConfig, level: Level, rng: StdRng) -> Result<Self> {
        let params = params_for(level);
        let width = config.playfield_width as f32;
        let height = config.playfield_height as f32;
        let hud_row = PLAYFIELD_TOP + config.playfield_height as i32;

        let mut scene = Self {
            player: spawn_player(width, height, config.player_start_energy, &params),
            formation: Formation::new(Vec::new(), 0.0, params.enemy_max_speed, params.enemy_drop),
            projectiles: Vec::new(),
            explosions: Vec::new(),
            score: 0,
            wave: 1,
            config: config.clone(),
            params,
            level,
            controls: Controls::default(),
            abort_requested: false,
            rng,
            labels: LabelPanel::new(3, 1, 0, 16),
            energy_bar: EnergyBar::new(1, hud_row, 12),
            charge_bar: EnergyBar::new(15, hud_row, 12),
        };
        scene.spawn_wave();
        scene.refresh_widgets()?;
        Ok(scene)
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn labels(&self) -> &LabelPanel {
        &self.labels
    }

    pub fn energy_bar(&self) -> &EnergyBar {
        &self.energy_bar
    }

    fn spawn_wave(&mut self) {
        let enemies = spawn_formation(
            self.config.enemy_rows,
            self.config.enemy_cols,
            self.config.playfield_width as f32,
        );
        self.formation = Formation::new(
            enemies,
            wave_speed(&self.params, self.wave),
            self.params.enemy_max_speed,
            self.params.enemy_drop,
        );
        info!(wave = self.wave, enemies = self.formation.enemies.len(), "wave spawned");
    }

    fn outcome(&self, result: GameResult) -> Outcome {
        Outcome {
            result,
            score: self.score,
            wave: self.wave,
            level: self.level,
            wreck: None,
        }
    }

    /// The ship's explosion, placed on screen for the end scene to finish.
    fn wreck(&self) -> Option<Wreck> {
        let (cx, cy) = self.player.bounds.center();
        let explosion = Explosion::new(cx, cy, self.params.explosion_frames);
        explosion.alive.then(|| Wreck {
            x: explosion.bounds.x.round() as i32,
            y: explosion.bounds.y.round() as i32 + PLAYFIELD_TOP,
            frames: explosion.frames_left,
        })
    }

    /// Move everything one tick and flip `alive` on whatever ran out.
    fn update_entities(&mut self, dt: f32) {
        let width = self.config.playfield_width as f32;
        let height = self.config.playfield_height as f32;

        self.player.update(dt, self.controls.direction(), width);
        if self.controls.fire {
            if let Some(shot) = player_fire(&mut self.player, &self.projectiles, &self.params) {
                debug!(x = shot.bounds.x, "player fired");
                self.projectiles.push(shot);
            }
        }

        if self.formation.step(dt, width) == StepKind::Drop {
            debug!(direction = self.formation.direction, "formation dropped");
        }
        for enemy in &mut self.formation.enemies {
            enemy.update(dt);
        }
        let shots = enemy_fire(&mut self.formation.enemies, &self.params, &mut self.rng);
        self.projectiles.extend(shots);

        for projectile in &mut self.projectiles {
            projectile.update(dt, width, height);
        }
        for explosion in &mut self.explosions {
            explosion.update();
        }

        // Breach: an enemy touching the bottom is lost and costs energy.
        let mut breaches = 0;
        if self.formation.bottom().is_some_and(|bottom| bottom >= height) {
            for enemy in self.formation.enemies.iter_mut().filter(|e| e.alive) {
                if enemy.bounds.bottom() >= height {
                    enemy.alive = false;
                    breaches += 1;
                }
            }
        }
        if breaches > 0 {
            debug!(breaches, "formation breached the bottom");
            self.player.take_damage(BREACH_DAMAGE * breaches);
        }
    }

    fn resolve_collisions(&mut self) {
        let events = CollisionIndex::detect(
            &self.player,
            &self.formation.enemies,
            &self.projectiles,
        );
        if events.is_empty() {
            return;
        }
        let resolution = CollisionIndex::apply(
            &events,
            &mut self.player,
            &mut self.formation.enemies,
            &mut self.projectiles,
        );
        debug!(
            destroyed = resolution.enemies_destroyed,
            damage = resolution.damage,
            energy = self.player.energy,
            "collisions resolved"
        );

        self.score += resolution.score;
        for (x, y) in resolution.explosions {
            self.explosions
                .push(Explosion::new(x, y, self.params.explosion_frames));
        }
    }

    fn remove_dead(&mut self) {
        self.projectiles.retain(|p| p.alive);
        self.explosions.retain(|e| e.alive);
        self.formation.remove_dead();
    }

    /// Fatal in debug builds; repaired with a warning in release builds.
    fn check_invariants(&mut self) -> Result<()> {
        let dead_left = self.projectiles.iter().any(|p| !p.alive)
            || self.explosions.iter().any(|e| !e.alive)
            || self.formation.enemies.iter().any(|e| !e.alive);
        let overcharged = self.player.energy > self.player.max_energy;

        if !dead_left && !overcharged {
            return Ok(());
        }
        let message = format!(
            "dead entities after removal: {dead_left}, energy {}/{}",
            self.player.energy, self.player.max_energy
        );
        if cfg!(debug_assertions) {
            return Err(GameError::StateInvariant(message));
        }
        warn!(%message, "repairing scene state");
        self.remove_dead();
        self.player.energy = self.player.energy.min(self.player.max_energy);
        Ok(())
    }

    fn refresh_widgets(&mut self) -> Result<()> {
        self.labels.update(&[
            format!("Energy: {}", self.player.energy),
            format!("Score: {}", self.score),
            format!("Wave: {}", self.wave),
        ])?;
        self.energy_bar
            .update(self.player.energy, self.player.max_energy);
        self.charge_bar
            .update(self.player.charge, self.player.max_charge);
        Ok(())
    }
}

impl Scene for PlayScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Playing
    }

    fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown(Key::Left) => self.controls.left = true,
            InputEvent::KeyUp(Key::Left) => self.controls.left = false,
            InputEvent::KeyDown(Key::Right) => self.controls.right = true,
            InputEvent::KeyUp(Key::Right) => self.controls.right = false,
            InputEvent::KeyDown(Key::Fire) => self.controls.fire = true,
            InputEvent::KeyUp(Key::Fire) => self.controls.fire = false,
            InputEvent::KeyDown(Key::Back) => self.abort_requested = true,
            _ => {}
        }
    }

    fn update(&mut self, dt: f32) -> Result<Option<TransitionRequest>> {
        if self.abort_requested {
            info!(score = self.score, "game aborted");
            return Ok(Some(TransitionRequest::to_menu()));
        }
        if self.player.energy == 0 {
            self.player.alive = false;
        }

        if self.player.alive {
            self.update_entities(dt);
            self.resolve_collisions();
        }
        self.remove_dead();
        self.check_invariants()?;
        self.refresh_widgets()?;

        if !self.player.alive {
            info!(score = self.score, wave = self.wave, "player destroyed");
            let outcome = Outcome {
                wreck: self.wreck(),
                ..self.outcome(GameResult::Lost)
            };
            return Ok(Some(TransitionRequest::to_ended(outcome)));
        }

        if self.formation.is_cleared() {
            if self.config.waves_to_win > 0 && self.wave >= self.config.waves_to_win {
                info!(score = self.score, wave = self.wave, "all waves cleared");
                return Ok(Some(TransitionRequest::to_ended(self.outcome(GameResult::Won))));
            }
            self.wave += 1;
            self.spawn_wave();
            self.refresh_widgets()?;
        }
        Ok(None)
    }

    fn draw(&self, surface: &mut dyn Surface, ctx: &DrawContext) -> Result<()> {
        let assets = ctx.assets;
        let at = |x: f32, y: f32| (x.round() as i32, y.round() as i32 + PLAYFIELD_TOP);

        for enemy in self.formation.enemies.iter().filter(|e| e.alive) {
            let sprite = match enemy.kind {
                EnemyKind::Spacecraft => ctx.image(assets.spacecraft),
                EnemyKind::Octopus => ctx.image(assets.octopus),
            };
            let (x, y) = at(enemy.bounds.x, enemy.bounds.y);
            surface.blit(sprite, x, y)?;
        }
        for projectile in self.projectiles.iter().filter(|p| p.alive) {
            let sprite = match projectile.owner {
                Owner::Player => ctx.image(assets.player_shot),
                Owner::Enemy => ctx.image(assets.enemy_shot),
            };
            let (x, y) = at(projectile.bounds.x, projectile.bounds.y);
            surface.blit(sprite, x, y)?;
        }
        if self.player.alive {
            let (x, y) = at(self.player.bounds.x, self.player.bounds.y);
            surface.blit(ctx.image(assets.player), x, y)?;
        }
        for explosion in self.explosions.iter().filter(|e| e.alive) {
            let (x, y) = at(explosion.bounds.x, explosion.bounds.y);
            surface.blit(ctx.image(assets.explosion), x, y)?;
        }

        let font = ctx.font(assets.label_font);
        self.labels.draw(surface, font)?;
        self.energy_bar.draw(surface)?;
        self.charge_bar.draw(surface)?;

        let hint = render_text(font, "SPACE Fire  ESC Menu  Q Quit", Color::DarkGrey);
        let (_, height) = surface.size();
        surface.blit_text(&hint, 29, height as i32 - 1)
    }
}
