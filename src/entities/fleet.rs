use super::enemy::Enemy;
use super::sprite::{Bounds, Screen};
use crate::settings::Settings;

/// The grid of live enemies, marching as one body.
#[derive(Debug, Clone, Default)]
pub struct Fleet {
    pub enemies: Vec<Enemy>,
}

impl Fleet {
    pub fn new(enemies: Vec<Enemy>) -> Self {
        Self { enemies }
    }

    /// Number of (columns, rows) that fit on screen for the given sizes.
    ///
    /// One enemy width of margin on each side and one enemy width of gap
    /// between columns; rows leave three enemy heights plus the ship free
    /// at the bottom.
    pub fn grid_size(
        enemy_width: u16,
        enemy_height: u16,
        ship_height: u16,
        screen: Screen,
    ) -> (u16, u16) {
        if enemy_width == 0 || enemy_height == 0 {
            return (0, 0);
        }

        let column_pitch = enemy_width.saturating_mul(2);
        let available_x = screen.width.saturating_sub(column_pitch);
        let columns = available_x / column_pitch;

        let available_y = screen
            .height
            .saturating_sub(enemy_height.saturating_mul(3))
            .saturating_sub(ship_height);
        let rows = available_y / enemy_height.saturating_mul(2);

        (columns, rows)
    }

    /// Lays out a full fleet, one enemy per grid cell.
    pub fn build(enemy_width: u16, enemy_height: u16, ship_bounds: Bounds, screen: Screen) -> Self {
        let ship_height = u16::try_from(ship_bounds.height).unwrap_or(0);
        let (columns, rows) = Self::grid_size(enemy_width, enemy_height, ship_height, screen);

        let mut enemies = Vec::with_capacity(columns as usize * rows as usize);
        for row in 0..rows {
            for column in 0..columns {
                let x = enemy_width as f32 * (1.0 + 2.0 * column as f32);
                let y = enemy_height as f32 * (1.0 + 2.0 * row as f32);
                enemies.push(Enemy::new(x, y, enemy_width, enemy_height));
            }
        }

        Self { enemies }
    }

    /// Moves every enemy sideways by the shared fleet velocity.
    pub fn advance(&mut self, velocity_x: f32) {
        for enemy in &mut self.enemies {
            enemy.advance(velocity_x);
        }
    }

    /// True if any enemy touches a vertical screen edge.
    pub fn check_edges(&self, screen: Screen) -> bool {
        self.enemies
            .iter()
            .any(|enemy| enemy.at_edge(screen.width as i32))
    }

    /// Drops the whole fleet one step and reverses its direction.
    ///
    /// Must run at most once per frame so the fleet drops a single step no
    /// matter how many enemies touch the edge.
    pub fn on_edge_reached(&mut self, settings: &mut Settings) {
        for enemy in &mut self.enemies {
            enemy.drop_by(settings.fleet_drop_speed);
        }
        settings.flip_fleet_direction();
    }

    /// Shifts the fleet left so its rightmost enemy sits one cell inside a
    /// narrower screen. Returns the distance moved.
    pub fn fit_to(&mut self, screen_width: u16) -> i32 {
        let Some(right) = self.enemies.iter().map(|enemy| enemy.bounds().right()).max() else {
            return 0;
        };
        let overshoot = right - screen_width as i32;
        if overshoot < 0 {
            return 0;
        }

        let shift = overshoot + 1;
        for enemy in &mut self.enemies {
            enemy.x -= shift as f32;
        }
        shift
    }

    /// True if any enemy has reached the bottom of the screen.
    pub fn check_bottom_reached(&self, screen: Screen) -> bool {
        self.enemies
            .iter()
            .any(|enemy| enemy.bounds().bottom() >= screen.height as i32)
    }

    pub fn check_ship_collision(&self, ship_bounds: &Bounds) -> bool {
        self.enemies
            .iter()
            .any(|enemy| enemy.bounds().overlaps(ship_bounds))
    }

    pub fn clear(&mut self) {
        self.enemies.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }
}
