//! Movable game objects: data, per-tick movement laws and collision
//! predicates. Entities never reference the map; terrain is passed in as a
//! borrowed snapshot of bounding boxes.

use crate::geometry::{BoundingBox, Position};

// ── Speeds (pixels per tick) ─────────────────────────────────────────────────

/// Ship speed on one axis with a single directional flag held.
pub const SPACESHIP_SPEED: i32 = 5;

/// Leftward world-scroll speed; rockets and fuel tanks ride the landscape
/// at exactly this rate.
pub const SCROLL_SPEED: i32 = 4;

/// Horizontal bullet speed.
pub const HORIZONTAL_BULLET_SPEED: i32 = 8;

/// Bomb arc: small forward drift, larger drop.
pub const BOMB_SPEED_X: i32 = 2;
pub const BOMB_SPEED_Y: i32 = 4;

/// Rocket climb rate once launched.
pub const ROCKET_CLIMB_SPEED: i32 = 1;

/// Both axes scale by this when the ship moves diagonally, keeping diagonal
/// speed close to the single-axis speed.
pub const DIAGONAL_DAMPING: f64 = std::f64::consts::FRAC_1_SQRT_2;

// ── Sizes (pixels) ───────────────────────────────────────────────────────────

pub const SHIP_WIDTH: i32 = 32;
pub const SHIP_HEIGHT: i32 = 16;
pub const ROCKET_WIDTH: i32 = 8;
pub const ROCKET_HEIGHT: i32 = 16;
pub const FUEL_TANK_WIDTH: i32 = 16;
pub const FUEL_TANK_HEIGHT: i32 = 16;

// ── Lifecycle constants ──────────────────────────────────────────────────────

/// Ticks an explosion animation runs before the entity is removed. One
/// policy for every entity; nothing is tied to rendering cadence.
pub const EXPLOSION_DURATION: u32 = 15;

/// Fuel units credited when a destroyed tank finishes exploding.
pub const FUEL_REFILL: u32 = 15;

// ── Animation frame counts ───────────────────────────────────────────────────

pub const SHIP_FRAMES: usize = 2;
pub const SHIP_EXPLOSION_FRAMES: usize = 4;
pub const BULLET_EXPLOSION_FRAMES: usize = 4;
pub const BOMB_FRAMES: usize = 4;
pub const BOMB_EXPLOSION_FRAMES: usize = 4;
pub const ROCKET_FRAMES: usize = 5;
pub const ROCKET_EXPLOSION_FRAMES: usize = 4;
pub const FUEL_TANK_FRAMES: usize = 2;
pub const FUEL_TANK_EXPLOSION_FRAMES: usize = 4;

// ── Shared lifecycle capabilities ────────────────────────────────────────────

/// Hit bookkeeping shared by every collidable entity.
pub trait Hittable {
    fn is_hit(&self) -> bool;
    fn set_hit(&mut self, hit: bool);
}

/// Counter + duration pair driving timed removal after a hit. Composed into
/// every variant that explodes, instead of each one re-implementing the
/// bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExplosionTimer {
    counter: u32,
    duration: u32,
}

impl ExplosionTimer {
    pub fn new(duration: u32) -> Self {
        Self { counter: 0, duration }
    }

    /// Advances the timer one tick, capped at the duration. Returns the new
    /// counter value.
    pub fn increment(&mut self) -> u32 {
        if self.counter < self.duration {
            self.counter += 1;
        }
        self.counter
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn finished(&self) -> bool {
        self.counter >= self.duration
    }

    /// Animation frame for a cycle of `frames` sprites.
    pub fn frame(&self, frames: usize) -> usize {
        self.counter as usize % frames
    }
}

/// What the rendering sink should draw for an entity or terrain block this
/// tick: variant plus animation frame index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Ship(usize),
    ShipExplosion(usize),
    Bullet,
    BulletExplosion(usize),
    Bomb(usize),
    BombExplosion(usize),
    Rocket(usize),
    RocketExplosion(usize),
    FuelTank(usize),
    FuelTankExplosion(usize),
    Terrain,
}

// ── Ship ─────────────────────────────────────────────────────────────────────

/// The player-controlled ship. Directional intent flags are set by the
/// input collaborator between ticks; `advance` turns them into motion.
#[derive(Clone, Debug)]
pub struct Ship {
    position: Position,
    width: i32,
    height: i32,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    x_speed: i32,
    y_speed: i32,
    hit: bool,
    explosion: ExplosionTimer,
}

impl Ship {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            position: Position::new(x, y),
            width: SHIP_WIDTH,
            height: SHIP_HEIGHT,
            left: false,
            right: false,
            up: false,
            down: false,
            x_speed: 0,
            y_speed: 0,
            hit: false,
            explosion: ExplosionTimer::new(EXPLOSION_DURATION),
        }
    }

    /// One movement step. With no intent flags set this is an immediate
    /// no-op, not a decay to zero. Opposing flags cancel each other, and
    /// diagonal movement damps both axes by the same factor.
    pub fn advance(&mut self) {
        if !self.left && !self.right && !self.up && !self.down {
            return;
        }

        self.x_speed = 0;
        self.y_speed = 0;

        if self.left && !self.right {
            self.x_speed = -SPACESHIP_SPEED;
        } else if self.right && !self.left {
            self.x_speed = SPACESHIP_SPEED;
        }

        if self.up && !self.down {
            self.y_speed = -SPACESHIP_SPEED;
        } else if self.down && !self.up {
            self.y_speed = SPACESHIP_SPEED;
        }

        if (self.left || self.right) && (self.up || self.down) {
            self.x_speed = (f64::from(self.x_speed) * DIAGONAL_DAMPING).round() as i32;
            self.y_speed = (f64::from(self.y_speed) * DIAGONAL_DAMPING).round() as i32;
        }

        self.position = self.position.translated(self.x_speed, self.y_speed);
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn x_speed(&self) -> i32 {
        self.x_speed
    }

    pub fn y_speed(&self) -> i32 {
        self.y_speed
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::at(self.position, self.width, self.height)
    }

    /// Marks the ship hit if it overlaps any terrain block. Idempotent:
    /// re-testing an already-hit ship never clears the flag.
    pub fn check_ground_collision(&mut self, terrain: &[BoundingBox]) -> bool {
        if terrain.iter().any(|block| self.bounds().intersects(block)) {
            self.hit = true;
            return true;
        }
        false
    }

    /// Marks the ship hit if it overlaps any rocket.
    pub fn check_enemy_collision(&mut self, rockets: &[Rocket]) -> bool {
        if rockets.iter().any(|r| self.bounds().intersects(&r.bounds())) {
            self.hit = true;
            return true;
        }
        false
    }

    /// Advances the explosion animation. Returns true once it has played
    /// out and the ship should be removed.
    pub fn tick_explosion(&mut self) -> bool {
        self.explosion.increment();
        self.explosion.finished()
    }

    pub fn sprite(&self, clock: u64) -> Sprite {
        if self.hit {
            Sprite::ShipExplosion(self.explosion.frame(SHIP_EXPLOSION_FRAMES))
        } else {
            Sprite::Ship(clock as usize % SHIP_FRAMES)
        }
    }
}

impl Hittable for Ship {
    fn is_hit(&self) -> bool {
        self.hit
    }

    fn set_hit(&mut self, hit: bool) {
        self.hit = hit;
    }
}

// ── Bullets ──────────────────────────────────────────────────────────────────

/// Bullet variants, fully enumerated: every movement and sprite selection
/// matches exhaustively, so an unknown kind cannot exist at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BulletKind {
    /// Straight shot at constant horizontal speed.
    Horizontal,
    /// Lobbed bomb with a dominant vertical component.
    Bomb,
}

impl BulletKind {
    /// Fixed (width, height) per kind.
    pub fn size(self) -> (i32, i32) {
        match self {
            BulletKind::Horizontal => (8, 4),
            BulletKind::Bomb => (12, 12),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Bullet {
    position: Position,
    width: i32,
    height: i32,
    kind: BulletKind,
    hit: bool,
    explosion: ExplosionTimer,
    x_speed: i32,
    y_speed: i32,
}

impl Bullet {
    pub fn new(x: i32, y: i32, kind: BulletKind) -> Self {
        let (width, height) = kind.size();
        Self {
            position: Position::new(x, y),
            width,
            height,
            kind,
            hit: false,
            explosion: ExplosionTimer::new(EXPLOSION_DURATION),
            x_speed: 0,
            y_speed: 0,
        }
    }

    pub fn kind(&self) -> BulletKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::at(self.position, self.width, self.height)
    }

    /// One movement step under the kind's law. A hit bullet abandons its
    /// normal law: it drifts left with the landscape while its explosion
    /// frames cycle, until the driver discards it.
    pub fn advance(&mut self) {
        if self.hit {
            self.x_speed = -SCROLL_SPEED;
            self.y_speed = 0;
            self.explosion.increment();
        } else {
            match self.kind {
                BulletKind::Horizontal => {
                    self.x_speed = HORIZONTAL_BULLET_SPEED;
                    self.y_speed = 0;
                }
                BulletKind::Bomb => {
                    self.x_speed = BOMB_SPEED_X;
                    self.y_speed = BOMB_SPEED_Y;
                }
            }
        }
        self.position = self.position.translated(self.x_speed, self.y_speed);
    }

    /// Marks the bullet hit if it overlaps any terrain block.
    pub fn check_ground_collision(&mut self, terrain: &[BoundingBox]) -> bool {
        if terrain.iter().any(|block| self.bounds().intersects(block)) {
            self.hit = true;
            return true;
        }
        false
    }

    /// True once the explosion animation has played out and the driver
    /// should discard the bullet.
    pub fn explosion_finished(&self) -> bool {
        self.hit && self.explosion.finished()
    }

    pub fn sprite(&self, clock: u64) -> Sprite {
        match (self.hit, self.kind) {
            (true, BulletKind::Horizontal) => {
                Sprite::BulletExplosion(self.explosion.frame(BULLET_EXPLOSION_FRAMES))
            }
            (true, BulletKind::Bomb) => {
                Sprite::BombExplosion(self.explosion.frame(BOMB_EXPLOSION_FRAMES))
            }
            (false, BulletKind::Horizontal) => Sprite::Bullet,
            (false, BulletKind::Bomb) => Sprite::Bomb(clock as usize % BOMB_FRAMES),
        }
    }
}

impl Hittable for Bullet {
    fn is_hit(&self) -> bool {
        self.hit
    }

    fn set_hit(&mut self, hit: bool) {
        self.hit = hit;
    }
}

// ── Rocket ───────────────────────────────────────────────────────────────────

/// Ground-launched rocket. Climbs while alive; a hit freezes its vertical
/// speed at exactly that moment, but it keeps scrolling left with the world
/// until its explosion finishes.
#[derive(Clone, Debug)]
pub struct Rocket {
    position: Position,
    width: i32,
    height: i32,
    speed_y: i32,
    hit: bool,
    explosion: ExplosionTimer,
}

impl Rocket {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            position: Position::new(x, y),
            width: ROCKET_WIDTH,
            height: ROCKET_HEIGHT,
            speed_y: ROCKET_CLIMB_SPEED,
            hit: false,
            explosion: ExplosionTimer::new(EXPLOSION_DURATION),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn speed_y(&self) -> i32 {
        self.speed_y
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::at(self.position, self.width, self.height)
    }

    /// One movement step: leftward at world-scroll speed, upward at the
    /// climb rate. Once hit, vertical speed is forced to zero, so only the
    /// x coordinate keeps changing.
    pub fn advance(&mut self) {
        if self.hit {
            self.speed_y = 0;
        }
        self.position = self.position.translated(-SCROLL_SPEED, -self.speed_y);
    }

    /// Marks the rocket hit if any bullet overlaps it.
    pub fn check_bullet_collision(&mut self, bullets: &[Bullet]) -> bool {
        if bullets.iter().any(|b| self.bounds().intersects(&b.bounds())) {
            self.hit = true;
            return true;
        }
        false
    }

    /// Advances the explosion animation. Returns true once it has played
    /// out and the rocket should be removed.
    pub fn tick_explosion(&mut self) -> bool {
        self.explosion.increment();
        self.explosion.finished()
    }

    pub fn sprite(&self, clock: u64) -> Sprite {
        if self.hit {
            Sprite::RocketExplosion(self.explosion.frame(ROCKET_EXPLOSION_FRAMES))
        } else {
            Sprite::Rocket(clock as usize % ROCKET_FRAMES)
        }
    }
}

impl Hittable for Rocket {
    fn is_hit(&self) -> bool {
        self.hit
    }

    fn set_hit(&mut self, hit: bool) {
        self.hit = hit;
    }
}

// ── Fuel tank ────────────────────────────────────────────────────────────────

/// Ground-bound fuel dump. Rides the landscape leftward with no vertical
/// motion of its own; once hit it counts ticks until the explosion duration
/// elapses, at which point it is removed and its fuel is credited.
#[derive(Clone, Debug)]
pub struct FuelTank {
    position: Position,
    width: i32,
    height: i32,
    hit: bool,
    exploded: bool,
    explosion: ExplosionTimer,
}

impl FuelTank {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            position: Position::new(x, y),
            width: FUEL_TANK_WIDTH,
            height: FUEL_TANK_HEIGHT,
            hit: false,
            exploded: false,
            explosion: ExplosionTimer::new(EXPLOSION_DURATION),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::at(self.position, self.width, self.height)
    }

    /// One movement step: pure leftward scroll.
    pub fn advance(&mut self) {
        self.position = self.position.translated(-SCROLL_SPEED, 0);
    }

    /// Marks the tank hit if any bullet overlaps it.
    pub fn check_bullet_collision(&mut self, bullets: &[Bullet]) -> bool {
        if bullets.iter().any(|b| self.bounds().intersects(&b.bounds())) {
            self.hit = true;
            return true;
        }
        false
    }

    /// Advances the explosion counter, capped at [`EXPLOSION_DURATION`].
    /// Reaching the cap flips `exploded`, the gate for removal and the one
    /// fuel credit. Returns the new counter value.
    pub fn increment_counter_for_explosion(&mut self) -> u32 {
        let counter = self.explosion.increment();
        if self.explosion.finished() {
            self.exploded = true;
        }
        counter
    }

    pub fn counter_for_explosion(&self) -> u32 {
        self.explosion.counter()
    }

    pub fn is_exploded(&self) -> bool {
        self.exploded
    }

    pub fn sprite(&self, clock: u64) -> Sprite {
        if self.hit {
            Sprite::FuelTankExplosion(self.explosion.frame(FUEL_TANK_EXPLOSION_FRAMES))
        } else {
            Sprite::FuelTank(clock as usize % FUEL_TANK_FRAMES)
        }
    }
}

impl Hittable for FuelTank {
    fn is_hit(&self) -> bool {
        self.hit
    }

    fn set_hit(&mut self, hit: bool) {
        self.hit = hit;
    }
}
