use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use std::fs;
use std::path::Path;

/// Integer bounding box in terminal cells.
///
/// Always derived from an entity's float position, never stored as the
/// source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box anchored at a float position, truncating toward zero.
    pub fn at(x: f32, y: f32, width: u16, height: u16) -> Self {
        Self::new(x as i32, y as i32, width as i32, height as i32)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    /// Strict AABB overlap; boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }
}

/// Size of the playfield in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    pub width: u16,
    pub height: u16,
}

impl Screen {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(0, 0, self.width as i32, self.height as i32)
    }
}

/// Multi-line ASCII art used to draw an entity and to size its bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    lines: Vec<String>,
    width: u16,
    height: u16,
}

impl Sprite {
    /// Builds a sprite from in-memory art. Trailing blank lines are dropped.
    pub fn from_art(art: &str) -> Result<Self> {
        let mut lines: Vec<String> = art.lines().map(str::to_owned).collect();
        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }

        let width = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        if width == 0 {
            return Err(eyre!("sprite art is empty"));
        }

        let width = u16::try_from(width).wrap_err("sprite is too wide")?;
        let height = u16::try_from(lines.len()).wrap_err("sprite is too tall")?;

        Ok(Self {
            lines,
            width,
            height,
        })
    }

    /// Loads a sprite from an asset file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let art = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read sprite {}", path.display()))?;
        Self::from_art(&art).wrap_err_with(|| format!("invalid sprite {}", path.display()))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }
}
