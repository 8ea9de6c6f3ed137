/// Shared geometry primitives — axis-aligned boxes and direction vectors.
///
/// Positions are fractional terminal cells (`f32`) so sub-cell speeds stay
/// smooth; the display layer rounds to whole cells when drawing.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    pub fn len(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// Center-anchored axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub cx: f32,
    pub cy: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Rect { cx, cy, w, h }
    }

    pub fn left(&self) -> f32 {
        self.cx - self.w / 2.0
    }

    pub fn right(&self) -> f32 {
        self.cx + self.w / 2.0
    }

    pub fn top(&self) -> f32 {
        self.cy - self.h / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.cy + self.h / 2.0
    }

    /// Copy of this box translated by `(dx, dy)`.
    pub fn shifted(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            cx: self.cx + dx,
            cy: self.cy + dy,
            ..*self
        }
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Per-axis visibility of `rect` against a `width` × `height` screen.
///
/// An axis reads `false` as soon as the box crosses that screen edge —
/// partially off-screen already counts as out on that axis.
pub fn in_bounds(rect: &Rect, width: f32, height: f32) -> (bool, bool) {
    let horizontal = rect.left() >= 0.0 && rect.right() <= width;
    let vertical = rect.top() >= 0.0 && rect.bottom() <= height;
    (horizontal, vertical)
}

/// Unit vector from `from`'s center toward `to`'s center.
///
/// Callers must guarantee the centers are distinct; a zero-length vector
/// has no direction.
pub fn direction_to(from: &Rect, to: &Rect) -> Vec2 {
    let dx = to.cx - from.cx;
    let dy = to.cy - from.cy;
    let norm = (dx * dx + dy * dy).sqrt();
    debug_assert!(norm > 0.0, "direction_to called with coincident centers");
    Vec2::new(dx / norm, dy / norm)
}
