//! Per-frame collision detection and resolution.
//!
//! Detection is a naive O(n·m) bounding-box sweep. Entity counts are a few
//! dozen at most, so no spatial index is kept. The smaller candidate set is
//! used as the outer loop; the overlapping pairs are then resolved in
//! (projectile, enemy) order, so the result does not depend on which side
//! was iterated first.
//!
//! Projectiles are tested with their swept box, so a shot that moves
//! further than a target's height in one tick still hits it.
//!
//! `detect` only reads its inputs. All flag flips and damage happen in
//! `apply`, after detection has finished, and removal is left to the owner
//! of the collections.

use crate::compute::score_for;
use crate::entities::{Enemy, Owner, Player, Projectile};

/// Damage the ship takes when an enemy rams it.
pub const RAM_DAMAGE: u32 = 1;

/// One resolved pair. Indices point into the slices passed to `detect`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collision {
    /// A player projectile destroyed an enemy.
    EnemyHit { projectile: usize, enemy: usize },
    /// An enemy projectile hit the player.
    PlayerHit { projectile: usize, damage: u32 },
    /// An enemy flew into the player's ship.
    Ram { enemy: usize },
}

/// What applying a frame's collisions produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resolution {
    pub score: u32,
    pub damage: u32,
    pub enemies_destroyed: usize,
    /// Centres where explosions should spawn.
    pub explosions: Vec<(f32, f32)>,
}

pub struct CollisionIndex;

impl CollisionIndex {
    pub fn detect(player: &Player, enemies: &[Enemy], projectiles: &[Projectile]) -> Vec<Collision> {
        let mut events = Vec::new();
        let mut enemy_taken = vec![false; enemies.len()];

        // ── Player projectiles ↔ enemies ─────────────────────────────────────
        let shots: Vec<usize> = projectiles
            .iter()
            .enumerate()
            .filter(|(_, p)| p.alive && p.owner == Owner::Player)
            .map(|(i, _)| i)
            .collect();
        let targets: Vec<usize> = enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| e.alive)
            .map(|(i, _)| i)
            .collect();

        let mut pairs: Vec<(usize, usize)> = Vec::new();
        if shots.len() <= targets.len() {
            for &pi in &shots {
                for &ei in &targets {
                    if projectiles[pi].swept.intersects(&enemies[ei].bounds) {
                        pairs.push((pi, ei));
                    }
                }
            }
        } else {
            for &ei in &targets {
                for &pi in &shots {
                    if projectiles[pi].swept.intersects(&enemies[ei].bounds) {
                        pairs.push((pi, ei));
                    }
                }
            }
            pairs.sort_unstable();
        }

        // First enemy in iteration order wins; the rest are ignored for that projectile.
        let mut last_projectile = None;
        for (pi, ei) in pairs {
            if last_projectile == Some(pi) || enemy_taken[ei] {
                continue;
            }
            enemy_taken[ei] = true;
            last_projectile = Some(pi);
            events.push(Collision::EnemyHit {
                projectile: pi,
                enemy: ei,
            });
        }

        if !player.alive {
            return events;
        }

        // ── Enemy projectiles ↔ player ───────────────────────────────────────
        for (pi, projectile) in projectiles.iter().enumerate() {
            if projectile.alive
                && projectile.owner == Owner::Enemy
                && projectile.swept.intersects(&player.bounds)
            {
                events.push(Collision::PlayerHit {
                    projectile: pi,
                    damage: projectile.damage,
                });
            }
        }

        // ── Enemies ↔ player ─────────────────────────────────────────────────
        for (ei, enemy) in enemies.iter().enumerate() {
            if enemy.alive && !enemy_taken[ei] && enemy.bounds.intersects(&player.bounds) {
                events.push(Collision::Ram { enemy: ei });
            }
        }

        events
    }

    pub fn apply(
        events: &[Collision],
        player: &mut Player,
        enemies: &mut [Enemy],
        projectiles: &mut [Projectile],
    ) -> Resolution {
        let mut resolution = Resolution::default();

        for event in events {
            match *event {
                Collision::EnemyHit { projectile, enemy } => {
                    projectiles[projectile].alive = false;
                    let enemy = &mut enemies[enemy];
                    enemy.alive = false;
                    resolution.score += score_for(enemy.kind);
                    resolution.enemies_destroyed += 1;
                    resolution.explosions.push(enemy.bounds.center());
                }
                Collision::PlayerHit { projectile, damage } => {
                    projectiles[projectile].alive = false;
                    resolution.damage += damage;
                }
                Collision::Ram { enemy } => {
                    let enemy = &mut enemies[enemy];
                    enemy.alive = false;
                    resolution.score += score_for(enemy.kind);
                    resolution.enemies_destroyed += 1;
                    resolution.damage += RAM_DAMAGE;
                    resolution.explosions.push(enemy.bounds.center());
                }
            }
        }

        if resolution.damage > 0 {
            player.take_damage(resolution.damage);
        }
        resolution
    }
}
