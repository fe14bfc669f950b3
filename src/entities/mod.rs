mod enemy;
mod fleet;
mod projectile;
mod ship;
mod sprite;

// Re-export all public types
pub use enemy::Enemy;
pub use fleet::Fleet;
pub use projectile::Projectile;
pub use ship::Ship;
pub use sprite::{Bounds, Screen, Sprite};
