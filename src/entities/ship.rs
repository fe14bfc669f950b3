use super::projectile::Projectile;
use super::sprite::Bounds;

/// The player's ship. Slides along the bottom edge of the screen.
#[derive(Debug, Clone)]
pub struct Ship {
    /// Left edge as a float accumulator
    pub x: f32,
    pub y: f32,
    pub width: u16,
    pub height: u16,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Ship {
    /// Creates a ship centred at the bottom of the screen.
    pub fn new(width: u16, height: u16, screen_width: u16, screen_height: u16) -> Self {
        let mut ship = Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
            moving_left: false,
            moving_right: false,
        };
        ship.center(screen_width, screen_height);
        ship
    }

    /// Recentres horizontally and sits the ship on the bottom edge.
    pub fn center(&mut self, screen_width: u16, screen_height: u16) {
        self.x = (screen_width as f32 - self.width as f32) / 2.0;
        self.y = screen_height.saturating_sub(self.height) as f32;
    }

    /// Keeps the ship's column but moves it back onto a resized screen.
    pub fn fit_to(&mut self, screen_width: u16, screen_height: u16) {
        self.y = screen_height.saturating_sub(self.height) as f32;
        let max_x = screen_width.saturating_sub(self.width) as f32;
        self.x = self.x.clamp(0.0, max_x);
    }

    /// Applies the held direction flags for one frame.
    pub fn update(&mut self, speed: f32, screen_width: u16) {
        let bounds = self.bounds();
        if self.moving_right && bounds.right() < screen_width as i32 {
            self.x += speed;
        }
        if self.moving_left && bounds.left() > 0 {
            self.x -= speed;
        }

        // Speeds above one cell per frame would otherwise overshoot an edge
        let max_x = screen_width.saturating_sub(self.width) as f32;
        self.x = self.x.clamp(0.0, max_x);
    }

    /// Builds a projectile leaving the nose of the ship.
    pub fn fire(&self, speed: f32) -> Projectile {
        let bounds = self.bounds();
        Projectile::new(bounds.center_x(), bounds.top(), speed)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::at(self.x, self.y, self.width, self.height)
    }
}
