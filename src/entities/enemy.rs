use super::sprite::Bounds;

/// A single alien in the fleet.
///
/// The fleet marches as one body, so an enemy carries no velocity of its own;
/// the shared horizontal step is handed in by the caller each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: u16,
    pub height: u16,
}

impl Enemy {
    pub fn new(x: f32, y: f32, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Moves sideways by `velocity_x` cells.
    pub fn advance(&mut self, velocity_x: f32) {
        self.x += velocity_x;
    }

    pub fn drop_by(&mut self, rows: f32) {
        self.y += rows;
    }

    /// True when the enemy touches either vertical edge of a screen
    /// `screen_width` cells wide.
    pub fn at_edge(&self, screen_width: i32) -> bool {
        let bounds = self.bounds();
        bounds.right() >= screen_width || bounds.left() <= 0
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::at(self.x, self.y, self.width, self.height)
    }
}
