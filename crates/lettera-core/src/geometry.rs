use std::ops::Mul;

use crate::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

impl<T> Size<T> {
    pub fn new(width: T, height: T) -> Self {
        Size { width, height }
    }
}

impl<T: Mul + Copy> Mul<T> for Size<T> {
    type Output = Size<<T as Mul>::Output>;

    fn mul(self, rhs: T) -> Self::Output {
        Size {
            width: self.width * rhs,
            height: self.height * rhs,
        }
    }
}

/// The rectangle a text object flows inside of.
///
/// `pivot` is normalized to `0..=1` on both axes, with `(0, 0)` at the
/// bottom-left and `(1, 1)` at the top-right, so the rectangle may be
/// anchored anywhere inside itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Container {
    pub size: Size<f32>,
    pub pivot: Vec2,
}

impl Container {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Size::new(width, height),
            pivot: Vec2::splat(0.5),
        }
    }

    pub fn with_pivot(mut self, x: f32, y: f32) -> Self {
        self.pivot = Vec2::new(x, y);
        self
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Distance from the pivot back to the logical top-left corner:
    /// `(pivot.x * width, (1 - pivot.y) * height)`.
    pub fn pivot_shift(&self) -> Vec2 {
        Vec2::new(
            self.pivot.x * self.size.width,
            (1.0 - self.pivot.y) * self.size.height,
        )
    }

    /// Translation, relative to the pivot, where the first glyph starts.
    pub fn top_left(&self) -> Vec2 {
        let shift = self.pivot_shift();
        Vec2::new(-shift.x, shift.y)
    }
}

impl Default for Container {
    /// 10x10 centered, matching a freshly created rect.
    fn default() -> Self {
        Self::new(10.0, 10.0)
    }
}
