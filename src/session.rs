//! Per-tick orchestration: one [`GameSession`] owns the map controller, the
//! entity collections and the fuel/score/pause state, and advances them all
//! exactly once per call to [`GameSession::tick`].
//!
//! All randomness (enemy spawn placement) comes through an injected RNG so
//! callers control determinism, and within one tick every movement is
//! applied before any collision test runs.

use log::{debug, info};
use rand::Rng;

use crate::entities::{
    Bullet, BulletKind, FuelTank, Hittable, Rocket, Ship, Sprite, FUEL_REFILL, FUEL_TANK_HEIGHT,
    ROCKET_HEIGHT, SCROLL_SPEED,
};
use crate::geometry::{BoundingBox, Position};
use crate::map::{MapColumn, MapError, MapStage, STAGE_HEIGHT_PX, TILE_SIZE};
use crate::stage;
use crate::stage_data::{self, COLUMNS_PER_PRESTAGE, COLUMNS_PER_STAGE};
use crate::window::{MapController, COLUMNS_ON_SCREEN, STEP_SIZE};

/// Visible playfield width in pixels.
pub const SCREEN_WIDTH_PX: i32 = COLUMNS_ON_SCREEN as i32 * TILE_SIZE;

/// Fuel gauge capacity and starting value.
pub const FUEL_CAPACITY: u32 = 100;

/// One fuel unit drains every this many ticks; an empty gauge downs the ship.
pub const FUEL_DRAIN_PERIOD: u64 = 30;

/// Score per destroyed rocket / fuel tank.
pub const ROCKET_SCORE: u32 = 50;
pub const FUEL_TANK_SCORE: u32 = 150;

/// 1-in-N per-tick odds of an enemy appearing on the column entering the
/// right screen edge.
pub const ROCKET_SPAWN_CHANCE: u32 = 40;
pub const FUEL_TANK_SPAWN_CHANCE: u32 = 90;

/// Ship spawn point, in screen pixels.
pub const SHIP_START_X: i32 = 4 * TILE_SIZE;
pub const SHIP_START_Y: i32 = 20 * TILE_SIZE;

/// Pixels scrolled between window refreshes: one refresh per cursor step.
const REFRESH_PERIOD_PX: i32 = STEP_SIZE as i32 * TILE_SIZE;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Whether a second bullet of a kind may be fired while one is in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FirePolicy {
    /// One live bullet per kind at a time.
    SingleInFlight,
    /// No cap.
    Unrestricted,
}

/// A (position, size, sprite-frame) triple for the rendering sink, in
/// screen coordinates. The sink only ever reads these.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Drawable {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub sprite: Sprite,
}

/// One independent game: map, entities, fuel, score, pause flag. Multiple
/// sessions can coexist; nothing here is process-global.
pub struct GameSession {
    map: MapController,
    /// Snapshot of the currently windowed columns, refreshed every
    /// [`REFRESH_PERIOD_PX`] of scroll.
    window: Vec<MapColumn>,
    /// Total pixels scrolled since the window last started from column 0.
    /// Screen x of a world-space element is `world_x - scroll_px`.
    scroll_px: i32,
    ship: Ship,
    bullets: Vec<Bullet>,
    rockets: Vec<Rocket>,
    fuel_tanks: Vec<FuelTank>,
    fuel: u32,
    score: u32,
    frame: u64,
    started: bool,
    paused: bool,
    status: GameStatus,
    fire_policy: FirePolicy,
    spawning: bool,
    /// World x of the last column rolled for a spawn. The edge column stays
    /// in the roll band for several ticks; each column gets one roll.
    last_spawn_roll_x: Option<i32>,
}

impl GameSession {
    /// Builds a session over the built-in level (prestage + stage 1).
    pub fn new() -> Result<Self, MapError> {
        let stages = vec![
            stage::generate(stage_data::prestage_data(), COLUMNS_PER_PRESTAGE)?,
            stage::generate(stage_data::stage1_data(), COLUMNS_PER_STAGE)?,
        ];
        Ok(Self::with_stages(stages))
    }

    /// Builds a session over caller-supplied stages. Tests use this to run
    /// tiny synthetic levels.
    pub fn with_stages(stages: Vec<MapStage>) -> Self {
        let mut map = MapController::new(stages);
        let window = map.columns_to_display().to_vec();
        Self {
            map,
            window,
            scroll_px: 0,
            ship: Ship::new(SHIP_START_X, SHIP_START_Y),
            bullets: Vec::new(),
            rockets: Vec::new(),
            fuel_tanks: Vec::new(),
            fuel: FUEL_CAPACITY,
            score: 0,
            frame: 0,
            started: false,
            paused: false,
            status: GameStatus::Playing,
            fire_policy: FirePolicy::SingleInFlight,
            spawning: true,
            last_spawn_roll_x: None,
        }
    }

    // ── Commands from the input collaborator ─────────────────────────────────

    /// Arms the session: ticks are ignored until this is called.
    pub fn start(&mut self) {
        if !self.started {
            self.started = true;
            info!("session started");
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_fire_policy(&mut self, policy: FirePolicy) {
        self.fire_policy = policy;
    }

    /// Enables or disables random enemy spawning. Tests turn it off to run
    /// hand-placed scenarios.
    pub fn set_spawning(&mut self, spawning: bool) {
        self.spawning = spawning;
    }

    /// Places a rocket at screen coordinates.
    pub fn spawn_rocket(&mut self, x: i32, y: i32) {
        self.rockets.push(Rocket::new(x, y));
    }

    /// Places a fuel tank at screen coordinates.
    pub fn spawn_fuel_tank(&mut self, x: i32, y: i32) {
        self.fuel_tanks.push(FuelTank::new(x, y));
    }

    /// Spawns a bullet of `kind` at the ship, subject to the fire policy.
    /// Returns true if a bullet was actually fired.
    pub fn fire(&mut self, kind: BulletKind) -> bool {
        if !self.started || self.ship.is_hit() || self.status == GameStatus::GameOver {
            return false;
        }
        if self.fire_policy == FirePolicy::SingleInFlight
            && self.bullets.iter().any(|b| b.kind() == kind && !b.is_hit())
        {
            return false;
        }

        let ship_pos = self.ship.position();
        let (width, height) = kind.size();
        let bullet = match kind {
            // Straight shots leave the nose; bombs drop from the belly.
            BulletKind::Horizontal => Bullet::new(
                ship_pos.x + self.ship.width(),
                ship_pos.y + (self.ship.height() - height) / 2,
                kind,
            ),
            BulletKind::Bomb => Bullet::new(
                ship_pos.x + (self.ship.width() - width) / 2,
                ship_pos.y + self.ship.height(),
                kind,
            ),
        };
        debug!("fired {kind:?} at {:?}", bullet.position());
        self.bullets.push(bullet);
        true
    }

    /// Warps the window to the start of stage `index` and respawns the
    /// ship there. Returns false when no such stage exists.
    pub fn jump_to_stage(&mut self, index: usize) -> bool {
        let Some(&start) = self.map.stage_starts().get(index) else {
            return false;
        };
        self.map.reset_to_column(start);
        self.window = self.map.columns_to_display().to_vec();
        self.scroll_px = self.window.first().map_or(0, MapColumn::x);
        self.bullets.clear();
        self.rockets.clear();
        self.fuel_tanks.clear();
        self.ship = Ship::new(SHIP_START_X, SHIP_START_Y);
        self.fuel = FUEL_CAPACITY;
        self.status = GameStatus::Playing;
        self.last_spawn_roll_x = None;
        info!("jumped to stage {index} (column {start})");
        true
    }

    // ── The tick driver ──────────────────────────────────────────────────────

    /// Advances the whole session by one tick. Withheld ticks are lost
    /// time; there is no catch-up.
    pub fn tick(&mut self, rng: &mut impl Rng) {
        if !self.started || self.paused || self.status == GameStatus::GameOver {
            return;
        }
        self.frame += 1;

        self.advance_landscape();

        // Movement phase: every entity moves before any collision test, so
        // contacts made this frame are detected at post-move positions.
        if !self.ship.is_hit() {
            self.ship.advance();
        }
        for bullet in &mut self.bullets {
            bullet.advance();
        }
        for rocket in &mut self.rockets {
            rocket.advance();
        }
        for tank in &mut self.fuel_tanks {
            tank.advance();
        }

        // Collision phase, against this tick's terrain snapshot.
        let terrain = self.terrain_snapshot();
        if !self.ship.is_hit() {
            self.ship.check_ground_collision(&terrain);
            self.ship.check_enemy_collision(&self.rockets);
        }
        for bullet in &mut self.bullets {
            if !bullet.is_hit() {
                bullet.check_ground_collision(&terrain);
            }
        }
        for rocket in &mut self.rockets {
            if !rocket.is_hit() {
                rocket.check_bullet_collision(&self.bullets);
            }
        }
        for tank in &mut self.fuel_tanks {
            if !tank.is_hit() {
                tank.check_bullet_collision(&self.bullets);
            }
        }

        self.run_lifecycle();
        self.drain_fuel();
        self.spawn_enemies(rng);
    }

    /// Scrolls the landscape and refreshes the window snapshot once per
    /// cursor step of scroll past the window's base column. A refresh that
    /// comes back somewhere other than one step ahead means the cursor
    /// wrapped (or was clamped): the level restarts there, so the scroll
    /// origin snaps to the new base.
    fn advance_landscape(&mut self) {
        self.scroll_px += SCROLL_SPEED;
        let window_base = self.window.first().map_or(0, MapColumn::x);
        if self.scroll_px - window_base >= REFRESH_PERIOD_PX {
            self.window = self.map.columns_to_display().to_vec();
            let new_base = self.window.first().map_or(0, MapColumn::x);
            if new_base != self.scroll_px {
                debug!("level wrapped, scroll origin reset to {new_base}");
                self.scroll_px = new_base;
            }
        }
    }

    /// Hit → (exploding →) removed transitions, plus scoring, fuel credit
    /// and off-screen cleanup.
    fn run_lifecycle(&mut self) {
        if self.ship.is_hit() && self.ship.tick_explosion() {
            self.status = GameStatus::GameOver;
            info!("ship destroyed, game over (score {})", self.score);
        }

        self.bullets.retain(|b| {
            !b.explosion_finished()
                && b.position().x <= SCREEN_WIDTH_PX
                && b.position().y <= STAGE_HEIGHT_PX
        });

        let mut gained = 0;
        self.rockets.retain_mut(|rocket| {
            if rocket.is_hit() {
                if rocket.tick_explosion() {
                    gained += ROCKET_SCORE;
                    return false;
                }
            }
            rocket.position().x + rocket.width() > 0
        });

        let mut credited = 0;
        self.fuel_tanks.retain_mut(|tank| {
            if tank.is_hit() {
                tank.increment_counter_for_explosion();
                if tank.is_exploded() {
                    credited += FUEL_REFILL;
                    gained += FUEL_TANK_SCORE;
                    return false;
                }
            }
            tank.position().x + tank.width() > 0
        });

        self.score += gained;
        if credited > 0 {
            self.fuel = (self.fuel + credited).min(FUEL_CAPACITY);
            debug!("fuel credited: +{credited} -> {}", self.fuel);
        }
    }

    fn drain_fuel(&mut self) {
        if self.frame % FUEL_DRAIN_PERIOD == 0 {
            self.fuel = self.fuel.saturating_sub(1);
            if self.fuel == 0 && !self.ship.is_hit() {
                debug!("fuel exhausted");
                self.ship.set_hit(true);
            }
        }
    }

    /// Rolls enemy spawns onto the floor of the column just past the right
    /// screen edge, so new enemies scroll in with the terrain.
    fn spawn_enemies(&mut self, rng: &mut impl Rng) {
        if !self.spawning {
            return;
        }
        let Some(column) = self
            .window
            .iter()
            .find(|c| {
                let screen_x = c.x() - self.scroll_px;
                screen_x >= SCREEN_WIDTH_PX && screen_x < SCREEN_WIDTH_PX + TILE_SIZE
            })
            .cloned()
        else {
            return;
        };

        // The column sits in the band for several ticks of scroll; roll it
        // once, whether or not the roll spawns anything.
        if self.last_spawn_roll_x == Some(column.x()) {
            return;
        }
        self.last_spawn_roll_x = Some(column.x());

        let screen_x = column.x() - self.scroll_px;
        let floor_y = column.start_floor_y();

        if rng.gen_ratio(1, ROCKET_SPAWN_CHANCE) {
            debug!("rocket spawned at column x {screen_x}");
            self.rockets.push(Rocket::new(screen_x, floor_y - ROCKET_HEIGHT));
        } else if rng.gen_ratio(1, FUEL_TANK_SPAWN_CHANCE) {
            debug!("fuel tank spawned at column x {screen_x}");
            self.fuel_tanks
                .push(FuelTank::new(screen_x, floor_y - FUEL_TANK_HEIGHT));
        }
    }

    // ── Views for the rendering sink and tests ───────────────────────────────

    /// Screen-space hitboxes of every terrain block in the current window.
    pub fn terrain_snapshot(&self) -> Vec<BoundingBox> {
        self.window
            .iter()
            .flat_map(MapColumn::elements)
            .map(|e| e.bounds().shifted_x(-self.scroll_px))
            .collect()
    }

    /// Everything to draw this tick, terrain first so entities overlay it.
    /// Terrain outside the visible strip is skipped.
    pub fn drawables(&self) -> Vec<Drawable> {
        let mut out = Vec::new();

        for element in self.window.iter().flat_map(MapColumn::elements) {
            let x = element.position().x - self.scroll_px;
            if x + element.width() < 0 || x >= SCREEN_WIDTH_PX {
                continue;
            }
            out.push(Drawable {
                x,
                y: element.position().y,
                width: element.width(),
                height: element.height(),
                sprite: Sprite::Terrain,
            });
        }

        for tank in &self.fuel_tanks {
            out.push(entity_drawable(
                tank.position(),
                tank.width(),
                tank.height(),
                tank.sprite(self.frame),
            ));
        }
        for rocket in &self.rockets {
            out.push(entity_drawable(
                rocket.position(),
                rocket.width(),
                rocket.height(),
                rocket.sprite(self.frame),
            ));
        }
        for bullet in &self.bullets {
            out.push(entity_drawable(
                bullet.position(),
                bullet.width(),
                bullet.height(),
                bullet.sprite(self.frame),
            ));
        }
        if self.status == GameStatus::Playing {
            out.push(entity_drawable(
                self.ship.position(),
                self.ship.width(),
                self.ship.height(),
                self.ship.sprite(self.frame),
            ));
        }

        out
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    /// Mutable ship access for the input collaborator's intent flags.
    pub fn ship_mut(&mut self) -> &mut Ship {
        &mut self.ship
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn rockets(&self) -> &[Rocket] {
        &self.rockets
    }

    pub fn fuel_tanks(&self) -> &[FuelTank] {
        &self.fuel_tanks
    }

    pub fn map(&self) -> &MapController {
        &self.map
    }

    pub fn window_columns(&self) -> &[MapColumn] {
        &self.window
    }

    pub fn scroll_px(&self) -> i32 {
        self.scroll_px
    }

    pub fn fuel(&self) -> u32 {
        self.fuel
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_started(&self) -> bool {
        self.started
    }
}

fn entity_drawable(position: Position, width: i32, height: i32, sprite: Sprite) -> Drawable {
    Drawable { x: position.x, y: position.y, width, height, sprite }
}
