use serde::{Deserialize, Serialize};

/// Axis-aligned pixel rectangle (`x + width` and `y + height` are exclusive).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// `true` if `other` reaches past this rectangle on any side.
    pub fn is_exceeded_by(&self, other: &PixelRect) -> bool {
        other.x < self.x
            || other.y < self.y
            || other.right() > self.right()
            || other.bottom() > self.bottom()
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.right() && y < self.bottom()
    }
}
