// Library exports for the binary and for testing
pub use entities::{Bounds, Enemy, Fleet, Projectile, Screen, Ship, Sprite};
pub use game::{Game, GameEvent, Sprites};
pub use scoreboard::Scoreboard;
pub use settings::Settings;
pub use stats::Stats;

pub mod app;
pub mod audio;
pub mod button;
pub mod collision;
pub mod entities;
pub mod game;
pub mod input;
pub mod renderer;
pub mod scoreboard;
pub mod settings;
pub mod stats;
