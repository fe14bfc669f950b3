use crate::entities::{Bounds, Screen};

/// The centred "Play" button shown while no game is running.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: String,
    pub bounds: Bounds,
}

impl Button {
    pub const WIDTH: u16 = 20;
    pub const HEIGHT: u16 = 3;

    pub fn new(label: impl Into<String>, screen: Screen) -> Self {
        let mut button = Self {
            label: label.into(),
            bounds: Bounds::new(0, 0, Self::WIDTH as i32, Self::HEIGHT as i32),
        };
        button.center_on(screen);
        button
    }

    /// Re-centres the button, e.g. after the terminal was resized.
    pub fn center_on(&mut self, screen: Screen) {
        self.bounds.x = (screen.width as i32 - self.bounds.width) / 2;
        self.bounds.y = (screen.height as i32 - self.bounds.height) / 2;
    }

    pub fn is_clicked(&self, column: u16, row: u16) -> bool {
        self.bounds.contains(column as i32, row as i32)
    }
}
