/// Pixel sub-rectangle of the output surface (physical pixels, top-left origin).
///
/// Used both for GPU viewport/scissor state and for routing pointer events.
/// Containment is half-open on both axes: the left and top edges belong to the
/// rectangle, the right and bottom edges belong to whatever is next to it.
/// Two viewports that share an edge therefore never both claim a point on it.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct ViewportRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ViewportRect {
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height, or `None` for a degenerate rectangle.
    #[inline]
    pub fn aspect(self) -> Option<f32> {
        if self.is_empty() {
            None
        } else {
            Some(self.width as f32 / self.height as f32)
        }
    }

    /// Half-open containment of a surface-space point.
    #[inline]
    pub fn contains(self, px: f32, py: f32) -> bool {
        let x0 = self.x as f32;
        let y0 = self.y as f32;
        px >= x0 && py >= y0 && px < x0 + self.width as f32 && py < y0 + self.height as f32
    }

    /// Translates a surface-space point into this viewport's local space.
    ///
    /// The point is not required to lie inside; captured drags keep receiving
    /// coordinates after the pointer leaves the viewport.
    #[inline]
    pub fn to_local(self, px: f32, py: f32) -> (f32, f32) {
        (px - self.x as f32, py - self.y as f32)
    }

    /// Clamps this rectangle so it lies inside a `width` x `height` surface.
    ///
    /// wgpu rejects viewports and scissors that extend past the attachment.
    pub fn clamped_to(self, width: u32, height: u32) -> ViewportRect {
        let x = self.x.min(width);
        let y = self.y.min(height);
        ViewportRect {
            x,
            y,
            width: self.width.min(width - x),
            height: self.height.min(height - y),
        }
    }
}
