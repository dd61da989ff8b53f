//! The enemy formation and its "marquee" sweep: drift sideways until the
//! next step would push any enemy past a side wall, then drop one step and
//! reverse instead of drifting.

use crate::entities::Enemy;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepKind {
    Drift,
    Drop,
}

#[derive(Clone, Debug)]
pub struct Formation {
    pub enemies: Vec<Enemy>,
    /// +1.0 moves right, -1.0 moves left.
    pub direction: f32,
    /// Enemy count at spawn; speed scales with `initial_count / remaining`.
    pub initial_count: usize,
    pub base_speed: f32,
    pub max_speed: f32,
    /// Vertical distance of one drop step.
    pub drop: f32,
}

impl Formation {
    pub fn new(enemies: Vec<Enemy>, base_speed: f32, max_speed: f32, drop: f32) -> Self {
        Self {
            initial_count: enemies.len(),
            enemies,
            direction: 1.0,
            base_speed,
            max_speed,
            drop,
        }
    }

    pub fn remaining(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }

    pub fn is_cleared(&self) -> bool {
        self.remaining() == 0
    }

    /// Horizontal speed in cells per second. Fewer enemies move faster,
    /// capped at `max_speed`.
    pub fn speed(&self) -> f32 {
        let remaining = self.remaining();
        if remaining == 0 {
            return 0.0;
        }
        let scaled = self.base_speed * self.initial_count as f32 / remaining as f32;
        scaled.min(self.max_speed)
    }

    /// Move the formation by one tick.
    pub fn step(&mut self, dt: f32, playfield_width: f32) -> StepKind {
        let dx = self.speed() * dt * self.direction;

        let would_cross = self.enemies.iter().filter(|e| e.alive).any(|e| {
            let next = e.bounds.translated(dx, 0.0);
            next.left() < 0.0 || next.right() > playfield_width
        });

        if would_cross {
            for enemy in self.enemies.iter_mut().filter(|e| e.alive) {
                enemy.bounds.y += self.drop;
            }
            self.direction = -self.direction;
            StepKind::Drop
        } else {
            for enemy in self.enemies.iter_mut().filter(|e| e.alive) {
                enemy.bounds.x += dx;
            }
            StepKind::Drift
        }
    }

    /// Lowest edge of any live enemy, if there is one.
    pub fn bottom(&self) -> Option<f32> {
        self.enemies
            .iter()
            .filter(|e| e.alive)
            .map(|e| e.bounds.bottom())
            .reduce(f32::max)
    }

    pub fn remove_dead(&mut self) {
        self.enemies.retain(|e| e.alive);
    }
}
