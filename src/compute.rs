//! Pure game-logic helpers: difficulty tables, scoring, formation layout
//! and the fire rules. Randomness only enters through an injected `Rng`.

use rand::Rng;

use crate::entities::{
    Enemy, EnemyKind, Level, Owner, Player, Projectile, ENEMY_W,
};

// ── Formation layout ─────────────────────────────────────────────────────────

/// Horizontal distance between neighbouring enemy columns (left edge to left edge).
pub const ENEMY_SPACING_X: f32 = 5.0;
/// Vertical distance between formation rows.
pub const ENEMY_SPACING_Y: f32 = 3.0;
/// Row the first formation row starts on.
pub const FORMATION_TOP: f32 = 1.0;

// ── Difficulty tables ────────────────────────────────────────────────────────

/// Every tunable that depends on the chosen difficulty.
#[derive(Clone, Debug, PartialEq)]
pub struct Params {
    pub player_speed: f32,
    /// Seconds between two player shots.
    pub player_cooldown: f32,
    pub max_charge: u32,
    pub shot_cost: u32,
    pub max_player_shots: usize,
    pub projectile_speed: f32,
    pub projectile_damage: u32,
    pub enemy_base_speed: f32,
    pub enemy_max_speed: f32,
    pub enemy_drop: f32,
    pub enemy_projectile_speed: f32,
    pub enemy_damage: u32,
    /// Per-tick chance that a ready front-row enemy fires.
    pub enemy_fire_chance: f64,
    pub enemy_fire_cooldown: f32,
    pub explosion_frames: u32,
}

fn enemy_base_speed(level: Level) -> f32 {
    match level {
        Level::Easy => 3.0,
        Level::Medium => 4.0,
        Level::Hard => 6.0,
    }
}

fn enemy_fire_chance(level: Level) -> f64 {
    match level {
        Level::Easy => 1.0 / 400.0,
        Level::Medium => 1.0 / 250.0,
        Level::Hard => 1.0 / 120.0,
    }
}

fn enemy_damage(level: Level) -> u32 {
    match level {
        Level::Easy | Level::Medium => 1,
        Level::Hard => 2,
    }
}

/// (max charge, cost per shot). Charge regenerates by one per tick.
fn weapon_charge(level: Level) -> (u32, u32) {
    match level {
        Level::Easy => (300, 15),
        Level::Medium => (275, 18),
        Level::Hard => (200, 20),
    }
}

pub fn params_for(level: Level) -> Params {
    let (max_charge, shot_cost) = weapon_charge(level);
    Params {
        player_speed: 30.0,
        player_cooldown: 0.15,
        max_charge,
        shot_cost,
        max_player_shots: 3,
        projectile_speed: 30.0,
        projectile_damage: 1,
        enemy_base_speed: enemy_base_speed(level),
        enemy_max_speed: 30.0,
        enemy_drop: 1.0,
        enemy_projectile_speed: 15.0,
        enemy_damage: enemy_damage(level),
        enemy_fire_chance: enemy_fire_chance(level),
        enemy_fire_cooldown: 2.0,
        explosion_frames: 4,
    }
}

/// Formation base speed for a given wave: +20% per cleared wave.
pub fn wave_speed(params: &Params, wave: u32) -> f32 {
    let speed = params.enemy_base_speed * (1.0 + 0.2 * wave.saturating_sub(1) as f32);
    speed.min(params.enemy_max_speed)
}

/// Score awarded per enemy destroyed.
pub fn score_for(kind: EnemyKind) -> u32 {
    match kind {
        EnemyKind::Spacecraft => 100,
        EnemyKind::Octopus => 150,
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Lay out a `rows`×`cols` grid centred horizontally. The top row is
/// octopuses, the rest spacecraft.
pub fn spawn_formation(rows: u16, cols: u16, playfield_width: f32) -> Vec<Enemy> {
    let formation_w = cols.saturating_sub(1) as f32 * ENEMY_SPACING_X + ENEMY_W;
    let left = ((playfield_width - formation_w) / 2.0).max(0.0).floor();

    let mut enemies = Vec::with_capacity(rows as usize * cols as usize);
    for row in 0..rows {
        let kind = if row == 0 {
            EnemyKind::Octopus
        } else {
            EnemyKind::Spacecraft
        };
        for col in 0..cols {
            let x = left + col as f32 * ENEMY_SPACING_X;
            let y = FORMATION_TOP + row as f32 * ENEMY_SPACING_Y;
            enemies.push(Enemy::new(x, y, kind, (row, col)));
        }
    }
    enemies
}

/// Player ship centred on the bottom rows of the playfield.
pub fn spawn_player(
    playfield_width: f32,
    playfield_height: f32,
    energy: u32,
    params: &Params,
) -> Player {
    let mut player = Player::new(0.0, 0.0, energy, params.max_charge, params.player_speed);
    player.bounds.x = ((playfield_width - player.bounds.w) / 2.0).floor();
    player.bounds.y = playfield_height - player.bounds.h;
    player
}

// ── Fire rules ───────────────────────────────────────────────────────────────

/// Fire from the player's ship if the cooldown has elapsed, the weapon has
/// enough charge and fewer than `max_player_shots` player projectiles are live.
/// Spends the charge and restarts the cooldown on success.
pub fn player_fire(
    player: &mut Player,
    projectiles: &[Projectile],
    params: &Params,
) -> Option<Projectile> {
    let active = projectiles
        .iter()
        .filter(|p| p.alive && p.owner == Owner::Player)
        .count();
    if active >= params.max_player_shots || !player.can_fire(params.shot_cost) {
        return None;
    }

    player.charge -= params.shot_cost;
    player.fire_cooldown = params.player_cooldown;

    let (x, y) = player.muzzle();
    Some(Projectile::new(
        x,
        y,
        (0.0, -params.projectile_speed),
        Owner::Player,
        params.projectile_damage,
    ))
}

/// Indices of enemies with nothing alive below them in their column.
pub fn front_row(enemies: &[Enemy]) -> Vec<usize> {
    let mut front: Vec<usize> = Vec::new();
    for (i, enemy) in enemies.iter().enumerate() {
        if !enemy.alive {
            continue;
        }
        match front
            .iter_mut()
            .find(|j| enemies[**j].slot.1 == enemy.slot.1)
        {
            Some(j) if enemies[*j].slot.0 < enemy.slot.0 => *j = i,
            Some(_) => {}
            None => front.push(i),
        }
    }
    front.sort_unstable();
    front
}

/// Return fire: every ready front-row enemy fires with `enemy_fire_chance`.
pub fn enemy_fire(enemies: &mut [Enemy], params: &Params, rng: &mut impl Rng) -> Vec<Projectile> {
    let mut shots = Vec::new();
    for i in front_row(enemies) {
        let enemy = &mut enemies[i];
        if enemy.fire_cooldown > 0.0 || !rng.gen_bool(params.enemy_fire_chance) {
            continue;
        }
        enemy.fire_cooldown = params.enemy_fire_cooldown;
        let (x, _) = enemy.bounds.center();
        shots.push(Projectile::new(
            x,
            enemy.bounds.bottom(),
            (0.0, params.enemy_projectile_speed),
            Owner::Enemy,
            params.enemy_damage,
        ));
    }
    shots
}
