use super::sprite::Bounds;

/// A player shot travelling straight up the screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    /// Vertical velocity in cells per frame; negative is screen-up.
    pub velocity_y: f32,
}

impl Projectile {
    pub const WIDTH: u16 = 1;
    pub const HEIGHT: u16 = 1;
    pub const GLYPH: char = '|';

    /// Spawns a projectile centred on `center_x` with its top at `top`.
    pub fn new(center_x: i32, top: i32, speed: f32) -> Self {
        Self {
            x: center_x as f32,
            y: top as f32,
            velocity_y: -speed,
        }
    }

    pub fn advance(&mut self) {
        self.y += self.velocity_y;
    }

    /// True once the projectile has left through the top of the screen.
    pub fn is_expired(&self) -> bool {
        self.bounds().bottom() <= 0
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::at(self.x, self.y, Self::WIDTH, Self::HEIGHT)
    }
}
