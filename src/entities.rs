//! Game entity types: plain data plus the per-tick movement/lifetime rules
//! of each variant. Nothing here removes an entity from its collection;
//! an update only ever flips `alive` to false.

// ── Sizes (terminal cells) ───────────────────────────────────────────────────

pub const PLAYER_W: f32 = 3.0;
pub const PLAYER_H: f32 = 2.0;
pub const ENEMY_W: f32 = 3.0;
pub const ENEMY_H: f32 = 2.0;
pub const PROJECTILE_W: f32 = 1.0;
pub const PROJECTILE_H: f32 = 1.0;
pub const EXPLOSION_W: f32 = 3.0;
pub const EXPLOSION_H: f32 = 2.0;

// ── Tags ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Spacecraft,
    Octopus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Easy, Level::Medium, Level::Hard];

    /// Menu index → level. Out-of-range indices clamp to `Hard`.
    pub fn from_index(index: usize) -> Level {
        Level::ALL[index.min(Level::ALL.len() - 1)]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Level::Easy => "Easy",
            Level::Medium => "Medium",
            Level::Hard => "Hard",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Owner {
    Player,
    Enemy,
}

// ── Bounding box ─────────────────────────────────────────────────────────────

/// Axis-aligned box; `(x, y)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// A box of size `w`×`h` centred on `(cx, cy)`.
    pub fn centered(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self::new(cx - w / 2.0, cy - h / 2.0, w, h)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Smallest box covering both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        let x = self.left().min(other.left());
        let y = self.top().min(other.top());
        Bounds::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    /// Strict overlap: boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub bounds: Bounds,
    pub alive: bool,
    /// Health. Never exceeds `max_energy`; the ship dies at 0.
    pub energy: u32,
    pub max_energy: u32,
    /// Weapon charge, spent per shot and regenerated every tick.
    pub charge: u32,
    pub max_charge: u32,
    /// Seconds until the next shot is allowed.
    pub fire_cooldown: f32,
    /// Horizontal speed in cells per second.
    pub speed: f32,
}

impl Player {
    pub fn new(x: f32, y: f32, energy: u32, max_charge: u32, speed: f32) -> Self {
        Self {
            bounds: Bounds::new(x, y, PLAYER_W, PLAYER_H),
            alive: true,
            energy,
            max_energy: energy,
            charge: max_charge,
            max_charge,
            fire_cooldown: 0.0,
            speed,
        }
    }

    /// `direction` is -1 (left), 0 or 1 (right). The ship is clamped to the
    /// playfield, never wrapped.
    pub fn update(&mut self, dt: f32, direction: i8, playfield_width: f32) {
        if !self.alive {
            return;
        }
        let max_x = (playfield_width - self.bounds.w).max(0.0);
        let x = self.bounds.x + direction.signum() as f32 * self.speed * dt;
        self.bounds.x = x.max(0.0).min(max_x);

        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
        self.charge = (self.charge + 1).min(self.max_charge);
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.energy = self.energy.saturating_sub(amount);
        if self.energy == 0 {
            self.alive = false;
        }
    }

    pub fn can_fire(&self, shot_cost: u32) -> bool {
        self.alive && self.fire_cooldown <= 0.0 && self.charge >= shot_cost
    }

    /// Spawn point for the ship's projectiles: centred, just above the nose.
    pub fn muzzle(&self) -> (f32, f32) {
        (self.bounds.center().0, self.bounds.top() - PROJECTILE_H)
    }
}

// ── Enemy ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    pub bounds: Bounds,
    pub alive: bool,
    pub kind: EnemyKind,
    /// (row, column) in the formation grid.
    pub slot: (u16, u16),
    /// Seconds until this enemy may return fire again.
    pub fire_cooldown: f32,
}

impl Enemy {
    pub fn new(x: f32, y: f32, kind: EnemyKind, slot: (u16, u16)) -> Self {
        Self {
            bounds: Bounds::new(x, y, ENEMY_W, ENEMY_H),
            alive: true,
            kind,
            slot,
            fire_cooldown: 0.0,
        }
    }

    /// Ticks timers only; the formation owns movement.
    pub fn update(&mut self, dt: f32) {
        if self.alive {
            self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
        }
    }
}

// ── Projectile ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Projectile {
    pub bounds: Bounds,
    /// Area covered during the last step, from the old box to the new one.
    pub swept: Bounds,
    pub alive: bool,
    /// Cells per second.
    pub velocity: (f32, f32),
    pub owner: Owner,
    pub damage: u32,
}

impl Projectile {
    /// `(x, y)` is the centre of the muzzle the projectile leaves from.
    pub fn new(x: f32, y: f32, velocity: (f32, f32), owner: Owner, damage: u32) -> Self {
        let bounds = Bounds::new(x - PROJECTILE_W / 2.0, y, PROJECTILE_W, PROJECTILE_H);
        Self {
            bounds,
            swept: bounds,
            alive: true,
            velocity,
            owner,
            damage,
        }
    }

    pub fn update(&mut self, dt: f32, playfield_width: f32, playfield_height: f32) {
        if !self.alive {
            return;
        }
        let before = self.bounds;
        self.bounds = before.translated(self.velocity.0 * dt, self.velocity.1 * dt);
        self.swept = before.union(&self.bounds);

        let b = &self.bounds;
        if b.bottom() <= 0.0
            || b.top() >= playfield_height
            || b.right() <= 0.0
            || b.left() >= playfield_width
        {
            self.alive = false;
        }
    }
}

// ── Explosion ────────────────────────────────────────────────────────────────

/// Short-lived visual. Never collides.
#[derive(Clone, Debug)]
pub struct Explosion {
    pub bounds: Bounds,
    pub alive: bool,
    pub frames_left: u32,
}

impl Explosion {
    pub fn new(cx: f32, cy: f32, frames: u32) -> Self {
        Self {
            bounds: Bounds::centered(cx, cy, EXPLOSION_W, EXPLOSION_H),
            alive: frames > 0,
            frames_left: frames,
        }
    }

    pub fn update(&mut self) {
        self.frames_left = self.frames_left.saturating_sub(1);
        if self.frames_left == 0 {
            self.alive = false;
        }
    }
}
