// File: crates/hydroplot-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectI32 {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectI32 {
    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }
    pub const fn width(&self) -> i32 { self.right - self.left }
    pub const fn height(&self) -> i32 { self.bottom - self.top }
    pub const fn is_empty(&self) -> bool { self.width() <= 0 || self.height() <= 0 }

    /// Shrink by the given amounts on each side.
    pub const fn inset(&self, left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::from_ltrb(self.left + left, self.top + top, self.right - right, self.bottom - bottom)
    }

    pub fn to_skia(&self) -> skia_safe::Rect {
        skia_safe::Rect::from_ltrb(self.left as f32, self.top as f32, self.right as f32, self.bottom as f32)
    }
}
