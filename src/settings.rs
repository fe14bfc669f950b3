use std::time::Duration;

/// Ships per game, counting the one in play
const SHIP_LIMIT: u32 = 3;
const PROJECTILE_LIMIT: usize = 3;
/// Rows the fleet drops each time it touches an edge
const FLEET_DROP_SPEED: f32 = 1.0;
/// How quickly the game speeds up on each new level
const SPEEDUP_SCALE: f32 = 1.1;
/// How quickly enemy point values grow on each new level
const SCORE_SCALE: f32 = 1.5;

// Speeds are in terminal cells per frame
const BASE_SHIP_SPEED: f32 = 1.0;
const BASE_ENEMY_SPEED: f32 = 0.25;
const BASE_PROJECTILE_SPEED: f32 = 0.6;
const BASE_SCORE_MULTIPLIER: u64 = 50;

/// Game tunables.
///
/// The static part is fixed for the lifetime of the process. The dynamic
/// part is restored with [`Settings::reset_dynamic`] at the start of every
/// game and scaled by [`Settings::increase_difficulty`] on each level-up.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub ship_limit: u32,
    pub projectile_limit: usize,
    pub fleet_drop_speed: f32,
    pub speedup_scale: f32,
    pub score_scale: f32,
    /// Freeze after losing a ship before play resumes
    pub respawn_pause: Duration,
    /// Target time per frame; simulation steps are frame-locked
    pub frame_duration: Duration,

    pub ship_speed: f32,
    pub enemy_speed: f32,
    pub projectile_speed: f32,
    /// 1.0 marches right, -1.0 marches left
    pub fleet_direction: f32,
    /// Points for each enemy destroyed
    pub score_multiplier: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    pub fn new() -> Self {
        Self {
            ship_limit: SHIP_LIMIT,
            projectile_limit: PROJECTILE_LIMIT,
            fleet_drop_speed: FLEET_DROP_SPEED,
            speedup_scale: SPEEDUP_SCALE,
            score_scale: SCORE_SCALE,
            respawn_pause: Duration::from_millis(500),
            frame_duration: Duration::from_millis(16),
            ship_speed: BASE_SHIP_SPEED,
            enemy_speed: BASE_ENEMY_SPEED,
            projectile_speed: BASE_PROJECTILE_SPEED,
            fleet_direction: 1.0,
            score_multiplier: BASE_SCORE_MULTIPLIER,
        }
    }

    /// Restores the settings that change during a game.
    pub fn reset_dynamic(&mut self) {
        self.ship_speed = BASE_SHIP_SPEED;
        self.enemy_speed = BASE_ENEMY_SPEED;
        self.projectile_speed = BASE_PROJECTILE_SPEED;
        self.fleet_direction = 1.0;
        self.score_multiplier = BASE_SCORE_MULTIPLIER;
    }

    /// Speeds everything up and makes each enemy worth more.
    pub fn increase_difficulty(&mut self) {
        self.ship_speed *= self.speedup_scale;
        self.projectile_speed *= self.speedup_scale;
        self.enemy_speed *= self.speedup_scale;
        self.score_multiplier = (self.score_multiplier as f64 * self.score_scale as f64) as u64;
    }

    pub fn flip_fleet_direction(&mut self) {
        self.fleet_direction = -self.fleet_direction;
    }

    /// Horizontal velocity shared by every enemy in the fleet.
    pub fn fleet_velocity(&self) -> f32 {
        self.enemy_speed * self.fleet_direction
    }
}
