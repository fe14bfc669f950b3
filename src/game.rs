use crate::button::Button;
use crate::collision;
use crate::entities::{Fleet, Projectile, Screen, Ship, Sprite};
use crate::scoreboard::Scoreboard;
use crate::settings::Settings;
use crate::stats::Stats;

/// Art for the two sprite-backed entity kinds.
#[derive(Debug, Clone)]
pub struct Sprites {
    pub ship: Sprite,
    pub enemy: Sprite,
}

/// Things that happened during a frame that the outer loop may react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    ProjectileFired,
    EnemiesDestroyed { count: usize },
    LevelCleared { level: u32 },
    /// A ship was lost and a fresh fleet is waiting; play resumes after the
    /// respawn pause
    ShipLost { lives_left: u32 },
    GameOver { score: u64 },
}

/// The whole simulation state, owned by the game loop.
pub struct Game {
    pub settings: Settings,
    pub stats: Stats,
    pub scoreboard: Scoreboard,
    pub ship: Ship,
    pub fleet: Fleet,
    pub projectiles: Vec<Projectile>,
    pub play_button: Button,
    pub screen: Screen,
    pub sprites: Sprites,
    /// Visible while waiting on the Play button, hidden during play
    pub cursor_visible: bool,
    events: Vec<GameEvent>,
}

impl Game {
    /// Creates an inactive game with a fleet already on screen behind the
    /// Play button.
    pub fn new(sprites: Sprites, screen: Screen) -> Self {
        let settings = Settings::new();
        let stats = Stats::new(settings.ship_limit);
        let scoreboard = Scoreboard::new(&stats);
        let ship = Ship::new(
            sprites.ship.width(),
            sprites.ship.height(),
            screen.width,
            screen.height,
        );

        let mut game = Self {
            settings,
            stats,
            scoreboard,
            ship,
            fleet: Fleet::default(),
            projectiles: Vec::new(),
            play_button: Button::new("Play", screen),
            screen,
            sprites,
            cursor_visible: true,
            events: Vec::new(),
        };
        game.create_fleet();
        game
    }

    pub fn is_active(&self) -> bool {
        self.stats.game_active
    }

    /// Takes the events raised since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Adopts a new playfield size.
    pub fn resize(&mut self, screen: Screen) {
        if screen == self.screen {
            return;
        }
        log::debug!(
            "Playfield resized from {}x{} to {}x{}",
            self.screen.width,
            self.screen.height,
            screen.width,
            screen.height
        );

        self.screen = screen;
        self.play_button.center_on(screen);
        if self.is_active() {
            self.ship.fit_to(screen.width, screen.height);
            let shift = self.fleet.fit_to(screen.width);
            if shift > 0 {
                log::debug!("Fleet pulled {shift} cells left to fit the playfield");
            }
        } else {
            self.ship.center(screen.width, screen.height);
            self.create_fleet();
        }
    }

    /// Starts a new game if none is running. Returns true if it started.
    pub fn start_game(&mut self) -> bool {
        if self.is_active() {
            return false;
        }

        self.settings.reset_dynamic();
        self.stats.reset(self.settings.ship_limit);
        self.stats.game_active = true;
        self.scoreboard.prep_all(&self.stats);

        self.fleet.clear();
        self.projectiles.clear();
        self.create_fleet();
        self.ship.center(self.screen.width, self.screen.height);
        self.ship.moving_left = false;
        self.ship.moving_right = false;
        self.cursor_visible = false;

        log::info!(
            "Game started with {} ships against {} enemies",
            self.stats.lives_left,
            self.fleet.len()
        );
        self.events.push(GameEvent::Started);
        true
    }

    /// Handles a pointer click; only the Play button reacts, and only while
    /// no game is running.
    pub fn click(&mut self, column: u16, row: u16) -> bool {
        if !self.is_active() && self.play_button.is_clicked(column, row) {
            return self.start_game();
        }
        false
    }

    /// Fires a projectile if the on-screen limit allows another.
    pub fn fire_projectile(&mut self) -> bool {
        if !self.is_active() || self.projectiles.len() >= self.settings.projectile_limit {
            return false;
        }

        self.projectiles
            .push(self.ship.fire(self.settings.projectile_speed));
        self.events.push(GameEvent::ProjectileFired);
        true
    }

    /// Advances the simulation by one frame. Does nothing while inactive.
    pub fn update(&mut self) {
        if !self.is_active() {
            return;
        }

        self.ship
            .update(self.settings.ship_speed, self.screen.width);
        self.update_projectiles();
        self.update_fleet();

        // Losing the last ship freezes the board as it was
        if self.is_active() {
            self.resolve_projectile_hits();
        }
    }

    /// Moves projectiles and drops the ones that left the screen.
    pub fn update_projectiles(&mut self) {
        for projectile in &mut self.projectiles {
            projectile.advance();
        }
        self.projectiles.retain(|p| !p.is_expired());
    }

    /// Marches the fleet and handles it reaching the ship or the ground.
    pub fn update_fleet(&mut self) {
        if self.fleet.check_edges(self.screen) {
            self.fleet.on_edge_reached(&mut self.settings);
        }
        self.fleet.advance(self.settings.fleet_velocity());

        if self.fleet.check_ship_collision(&self.ship.bounds()) {
            log::debug!("Fleet collided with the ship");
            self.ship_hit();
            return;
        }

        if self.fleet.check_bottom_reached(self.screen) {
            log::debug!("Fleet reached the bottom of the screen");
            self.ship_hit();
        }
    }

    /// Scores every projectile/enemy overlap and starts the next level once
    /// the fleet is wiped out.
    pub fn resolve_projectile_hits(&mut self) {
        let destroyed = collision::remove_overlapping(&mut self.projectiles, &mut self.fleet);
        if destroyed == 0 {
            return;
        }

        self.stats.score += self.settings.score_multiplier * destroyed as u64;
        self.scoreboard.prep_score(&self.stats);
        if self.stats.check_high_score() {
            log::debug!("New high score {}", self.stats.high_score);
            self.scoreboard.prep_high_score(&self.stats);
        }
        self.events.push(GameEvent::EnemiesDestroyed { count: destroyed });

        if self.fleet.is_empty() {
            self.start_new_level();
        }
    }

    fn start_new_level(&mut self) {
        self.projectiles.clear();
        self.settings.increase_difficulty();
        self.stats.level += 1;
        self.scoreboard.prep_level(&self.stats);
        self.create_fleet();

        log::info!(
            "Fleet destroyed, level {} begins at {} points per enemy",
            self.stats.level,
            self.settings.score_multiplier
        );
        self.events.push(GameEvent::LevelCleared {
            level: self.stats.level,
        });
    }

    /// Responds to the ship being rammed or the fleet landing.
    ///
    /// `lives_left` counts the ship in play, so losing the last one ends the
    /// game and leaves the board untouched for the game-over screen.
    pub fn ship_hit(&mut self) {
        if self.stats.lives_left > 1 {
            self.stats.lives_left -= 1;
            self.scoreboard.prep_ships(&self.stats);

            self.fleet.clear();
            self.projectiles.clear();
            self.create_fleet();
            self.ship.center(self.screen.width, self.screen.height);

            log::info!("Ship lost, {} left", self.stats.lives_left);
            self.events.push(GameEvent::ShipLost {
                lives_left: self.stats.lives_left,
            });
        } else {
            self.stats.lives_left = 0;
            self.scoreboard.prep_ships(&self.stats);
            self.stats.game_active = false;
            self.cursor_visible = true;

            log::info!(
                "Game over at level {} with {} points",
                self.stats.level,
                self.stats.score
            );
            self.events.push(GameEvent::GameOver {
                score: self.stats.score,
            });
        }
    }

    fn create_fleet(&mut self) {
        self.fleet = Fleet::build(
            self.sprites.enemy.width(),
            self.sprites.enemy.height(),
            self.ship.bounds(),
            self.screen,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Enemy;

    fn sprites() -> Sprites {
        Sprites {
            ship: Sprite::from_art(" _^_ \n<=|=>").unwrap(),
            enemy: Sprite::from_art("{o-o}\n/^^^\\").unwrap(),
        }
    }

    fn active_game(width: u16, height: u16) -> Game {
        let mut game = Game::new(sprites(), Screen::new(width, height));
        game.start_game();
        game.drain_events();
        game
    }

    #[test]
    fn test_new_game_is_inactive_with_fleet() {
        let game = Game::new(sprites(), Screen::new(80, 24));
        assert!(!game.is_active());
        assert!(game.cursor_visible);
        assert_eq!(game.fleet.len(), 28);
        assert!(game.projectiles.is_empty());
    }

    #[test]
    fn test_start_game_resets_state() {
        let mut game = Game::new(sprites(), Screen::new(80, 24));
        game.settings.increase_difficulty();
        game.settings.flip_fleet_direction();
        game.stats.score = 900;
        game.stats.high_score = 900;
        game.stats.level = 5;
        game.fleet.clear();
        game.ship.x = 0.0;

        assert!(game.start_game());
        assert!(game.is_active());
        assert!(!game.cursor_visible);
        assert_eq!(game.settings, Settings::new());
        assert_eq!(game.stats.score, 0);
        assert_eq!(game.stats.level, 1);
        assert_eq!(game.stats.lives_left, 3);
        assert_eq!(game.stats.high_score, 900);
        assert_eq!(game.scoreboard.score_text, "0");
        assert_eq!(game.scoreboard.high_score_text, "900");
        assert_eq!(game.fleet.len(), 28);
        assert_eq!(game.ship.x, 37.5);
        assert_eq!(game.drain_events(), vec![GameEvent::Started]);
    }

    #[test]
    fn test_start_game_ignored_while_active() {
        let mut game = active_game(80, 24);
        game.stats.score = 100;
        assert!(!game.start_game());
        assert_eq!(game.stats.score, 100);
    }

    #[test]
    fn test_click_on_play_button_starts_game() {
        let mut game = Game::new(sprites(), Screen::new(80, 24));
        assert!(!game.click(0, 0));
        assert!(!game.is_active());
        assert!(game.click(40, 11));
        assert!(game.is_active());
    }

    #[test]
    fn test_click_ignored_while_active() {
        let mut game = active_game(80, 24);
        assert!(!game.click(40, 11));
    }

    #[test]
    fn test_fire_respects_limit() {
        let mut game = active_game(80, 24);
        assert!(game.fire_projectile());
        assert!(game.fire_projectile());
        assert!(game.fire_projectile());
        assert!(!game.fire_projectile());
        assert_eq!(game.projectiles.len(), 3);
        assert_eq!(game.drain_events().len(), 3);
    }

    #[test]
    fn test_fire_ignored_while_inactive() {
        let mut game = Game::new(sprites(), Screen::new(80, 24));
        assert!(!game.fire_projectile());
        assert!(game.projectiles.is_empty());
    }

    #[test]
    fn test_expired_projectiles_are_dropped() {
        let mut game = active_game(80, 24);
        game.fleet.clear();
        game.projectiles.push(Projectile::new(40, 0, 1.0));
        game.projectiles.push(Projectile::new(40, 10, 1.0));
        game.update_projectiles();
        assert_eq!(game.projectiles.len(), 1);
        assert_eq!(game.projectiles[0].y, 9.0);
    }

    #[test]
    fn test_fleet_flips_and_drops_at_edge() {
        let mut game = active_game(80, 24);
        game.fleet = Fleet::new(vec![Enemy::new(75.0, 2.0, 5, 2)]);

        game.update_fleet();
        assert_eq!(game.settings.fleet_direction, -1.0);
        assert_eq!(game.fleet.enemies[0].y, 3.0);
        assert_eq!(game.fleet.enemies[0].x, 74.75);

        // Moved off the edge, so no second drop
        game.update_fleet();
        assert_eq!(game.settings.fleet_direction, -1.0);
        assert_eq!(game.fleet.enemies[0].y, 3.0);
    }

    #[test]
    fn test_shrinking_playfield_drops_fleet_at_most_once() {
        let mut game = active_game(80, 24);
        game.fleet = Fleet::new(vec![Enemy::new(70.0, 2.0, 5, 2)]);

        game.resize(Screen::new(60, 24));
        assert!(game.fleet.enemies[0].bounds().right() < 60);

        let mut drops = 0;
        let mut last_y = game.fleet.enemies[0].y;
        for _ in 0..6 {
            game.update();
            let y = game.fleet.enemies[0].y;
            if y > last_y {
                drops += 1;
                last_y = y;
            }
            assert!(game.fleet.enemies[0].bounds().right() <= 60);
        }
        assert!(drops <= 1);
        assert_eq!(game.stats.lives_left, 3);
    }

    #[test]
    fn test_fleet_reaching_bottom_costs_a_ship() {
        let mut game = active_game(80, 24);
        game.fleet = Fleet::new(vec![Enemy::new(5.0, 22.0, 5, 2)]);

        game.update_fleet();
        assert_eq!(game.stats.lives_left, 2);
        assert!(game.is_active());
        assert_eq!(game.fleet.len(), 28);
    }

    #[test]
    fn test_fleet_ramming_ship_costs_a_ship() {
        let mut game = active_game(80, 24);
        let ship = game.ship.bounds();
        game.fleet = Fleet::new(vec![Enemy::new(ship.x as f32, 21.0, 5, 2)]);

        game.update_fleet();
        assert_eq!(game.stats.lives_left, 2);
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::ShipLost { lives_left: 2 }]
        );
    }

    #[test]
    fn test_ship_hit_respawns() {
        let mut game = active_game(80, 24);
        game.projectiles.push(Projectile::new(10, 10, 0.6));
        game.fleet.enemies.truncate(3);
        game.ship.x = 2.0;

        game.ship_hit();
        assert_eq!(game.stats.lives_left, 2);
        assert_eq!(game.scoreboard.ships_left, 2);
        assert!(game.projectiles.is_empty());
        assert_eq!(game.fleet.len(), 28);
        assert_eq!(game.ship.x, 37.5);
        assert!(game.is_active());
    }

    #[test]
    fn test_last_ship_hit_ends_game() {
        let mut game = active_game(80, 24);
        game.stats.lives_left = 1;
        game.projectiles.push(Projectile::new(10, 10, 0.6));
        game.fleet.enemies.truncate(3);

        game.ship_hit();
        assert!(!game.is_active());
        assert!(game.cursor_visible);
        assert_eq!(game.stats.lives_left, 0);
        assert_eq!(game.projectiles.len(), 1);
        assert_eq!(game.fleet.len(), 3);
        assert_eq!(game.drain_events(), vec![GameEvent::GameOver { score: 0 }]);
    }

    #[test]
    fn test_score_adds_multiplier_per_enemy() {
        let mut game = active_game(80, 24);
        game.fleet = Fleet::new(vec![
            Enemy::new(10.0, 2.0, 5, 2),
            Enemy::new(11.0, 3.0, 5, 2),
            Enemy::new(40.0, 2.0, 5, 2),
        ]);
        game.projectiles.push(Projectile::new(12, 3, 0.6));

        game.resolve_projectile_hits();
        assert_eq!(game.stats.score, 100);
        assert_eq!(game.stats.high_score, 100);
        assert_eq!(game.scoreboard.score_text, "100");
        assert_eq!(game.stats.level, 1);
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::EnemiesDestroyed { count: 2 }]
        );
    }

    #[test]
    fn test_clearing_fleet_starts_next_level() {
        let mut game = active_game(80, 24);
        game.fleet = Fleet::new(vec![Enemy::new(10.0, 2.0, 5, 2)]);
        game.projectiles.push(Projectile::new(12, 3, 0.6));
        game.projectiles.push(Projectile::new(60, 15, 0.6));

        game.resolve_projectile_hits();
        assert_eq!(game.stats.level, 2);
        assert_eq!(game.scoreboard.level_text, "2");
        assert_eq!(game.settings.score_multiplier, 75);
        assert!(game.projectiles.is_empty());
        assert_eq!(game.fleet.len(), 28);
        assert_eq!(
            game.drain_events(),
            vec![
                GameEvent::EnemiesDestroyed { count: 1 },
                GameEvent::LevelCleared { level: 2 },
            ]
        );
    }

    #[test]
    fn test_high_score_kept_across_games() {
        let mut game = active_game(80, 24);
        game.fleet = Fleet::new(vec![
            Enemy::new(10.0, 2.0, 5, 2),
            Enemy::new(40.0, 2.0, 5, 2),
        ]);
        game.projectiles.push(Projectile::new(12, 3, 0.6));
        game.resolve_projectile_hits();

        game.stats.lives_left = 1;
        game.ship_hit();
        game.start_game();
        assert_eq!(game.stats.score, 0);
        assert_eq!(game.stats.high_score, 50);
        assert_eq!(game.scoreboard.high_score_text, "50");
    }

    #[test]
    fn test_update_does_nothing_while_inactive() {
        let mut game = Game::new(sprites(), Screen::new(80, 24));
        let before = game.fleet.enemies.clone();
        game.update();
        assert_eq!(game.fleet.enemies, before);
    }

    #[test]
    fn test_update_moves_fleet_right() {
        let mut game = active_game(80, 24);
        game.update();
        assert_eq!(game.fleet.enemies[0].x, 5.25);
    }

    #[test]
    fn test_resize_while_inactive_rebuilds_fleet() {
        let mut game = Game::new(sprites(), Screen::new(80, 24));
        game.resize(Screen::new(120, 40));
        // (120 - 10) / 10 columns, (40 - 6 - 2) / 4 rows
        assert_eq!(game.fleet.len(), 11 * 8);
        assert_eq!(game.ship.bounds().bottom(), 40);
        assert_eq!(game.play_button.bounds.x, 50);
    }

    #[test]
    fn test_resize_while_active_keeps_fleet() {
        let mut game = active_game(80, 24);
        game.fleet.enemies.truncate(5);
        game.resize(Screen::new(60, 30));
        assert_eq!(game.fleet.len(), 5);
        assert_eq!(game.ship.bounds().bottom(), 30);
    }
}
