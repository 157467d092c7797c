//! Screen-space geometry and the row/grid arrangement popup sections use.
//!
//! Coordinates are host screen pixels with the origin at the top-left.

/// A rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Returns true if the point is inside. Right and bottom edges are exclusive.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Overlapping part of two rectangles, if any.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        (right > x && bottom > y).then(|| Self::new(x, y, right - x, bottom - y))
    }

    /// Grows the rectangle by `amount` on every side.
    #[must_use]
    pub fn expand(&self, amount: f32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Width times height.
    #[must_use]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Returns the rectangle moved by `(dx, dy)`.
    #[must_use]
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Returns the rectangle moved so its top-left corner is at `(x, y)`.
    #[must_use]
    pub fn with_origin(&self, x: f32, y: f32) -> Self {
        Self::new(x, y, self.width, self.height)
    }

    /// Shifts the rectangle the minimum distance needed to lie inside `bounds`.
    ///
    /// If the rectangle is larger than `bounds` on an axis, it is aligned to
    /// the start edge of `bounds` on that axis.
    #[must_use]
    pub fn clamp_within(&self, bounds: &Self) -> Self {
        let x = if self.width >= bounds.width {
            bounds.x
        } else {
            self.x.clamp(bounds.x, bounds.right() - self.width)
        };
        let y = if self.height >= bounds.height {
            bounds.y
        } else {
            self.y.clamp(bounds.y, bounds.bottom() - self.height)
        };
        self.with_origin(x, y)
    }
}

/// Where an item sits across a row's height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Top of the row.
    #[default]
    Start,
    /// Vertically centered.
    Center,
    /// Bottom of the row.
    End,
}

/// Arranges fixed-size items left to right, either as one row or as a
/// grid that wraps at the available width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Space between neighbouring items, both axes.
    pub gap: f32,
    /// Cross-axis placement for rows.
    pub cross: Alignment,
}

impl Layout {
    /// Creates a layout with `gap` between items.
    #[must_use]
    pub const fn new(gap: f32) -> Self {
        Self {
            gap,
            cross: Alignment::Start,
        }
    }

    /// Sets cross-axis alignment.
    #[must_use]
    pub const fn align_cross(mut self, alignment: Alignment) -> Self {
        self.cross = alignment;
        self
    }

    /// Places `sizes` left to right from `bounds`' top-left corner.
    ///
    /// Items are aligned within `bounds.height`; overflow past the right
    /// edge is not wrapped.
    #[must_use]
    pub fn row(&self, bounds: Rect, sizes: &[(f32, f32)]) -> Vec<Rect> {
        let mut x = bounds.x;
        sizes
            .iter()
            .map(|&(w, h)| {
                let y = match self.cross {
                    Alignment::Start => bounds.y,
                    Alignment::Center => bounds.y + (bounds.height - h) * 0.5,
                    Alignment::End => bounds.bottom() - h,
                };
                let rect = Rect::new(x, y, w, h);
                x += w + self.gap;
                rect
            })
            .collect()
    }

    /// Square `cell`s per grid row within `width`; always at least one.
    #[must_use]
    pub fn columns(&self, width: f32, cell: f32) -> usize {
        let fit = ((width + self.gap) / (cell + self.gap)).floor();
        if fit >= 1.0 {
            fit as usize
        } else {
            1
        }
    }

    /// Places `count` square cells in rows of [`Layout::columns`], starting
    /// at `origin`.
    #[must_use]
    pub fn grid(&self, origin: (f32, f32), width: f32, cell: f32, count: usize) -> Vec<Rect> {
        let columns = self.columns(width, cell);
        let pitch = cell + self.gap;
        (0..count)
            .map(|i| {
                let column = (i % columns) as f32;
                let row = (i / columns) as f32;
                Rect::new(origin.0 + column * pitch, origin.1 + row * pitch, cell, cell)
            })
            .collect()
    }

    /// Height taken by [`Layout::grid`] for the same arguments.
    #[must_use]
    pub fn grid_height(&self, width: f32, cell: f32, count: usize) -> f32 {
        if count == 0 {
            return 0.0;
        }
        let rows = count.div_ceil(self.columns(width, cell)) as f32;
        rows * cell + (rows - 1.0) * self.gap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);

        assert!(rect.contains(50.0, 30.0));
        assert!(!rect.contains(5.0, 30.0));
        assert!(!rect.contains(50.0, 80.0));
        assert!(!rect.contains(110.0, 30.0));
    }

    #[test]
    fn test_intersection() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);

        assert_eq!(
            a.intersection(&Rect::new(50.0, 80.0, 100.0, 100.0)),
            Some(Rect::new(50.0, 80.0, 50.0, 20.0))
        );
        assert_eq!(a.intersection(&Rect::new(100.0, 0.0, 10.0, 10.0)), None);
    }

    #[test]
    fn test_clamp_within_shifts_inside() {
        let bounds = Rect::new(0.0, 0.0, 800.0, 600.0);
        let rect = Rect::new(700.0, -20.0, 200.0, 100.0);

        assert_eq!(rect.clamp_within(&bounds), Rect::new(600.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn test_clamp_within_oversized_aligns_start() {
        let bounds = Rect::new(10.0, 10.0, 100.0, 100.0);
        let rect = Rect::new(50.0, 50.0, 300.0, 20.0);

        let clamped = rect.clamp_within(&bounds);

        assert_eq!(clamped.x, 10.0);
        assert_eq!(clamped.y, 50.0);
    }

    #[test]
    fn test_row_centers_glyphs_between_icons() {
        let layout = Layout::new(4.0).align_cross(Alignment::Center);
        let bounds = Rect::new(8.0, 100.0, 300.0, 32.0);

        let rects = layout.row(bounds, &[(32.0, 32.0), (16.0, 16.0), (32.0, 32.0)]);

        assert_eq!(rects[0], Rect::new(8.0, 100.0, 32.0, 32.0));
        assert_eq!(rects[1], Rect::new(44.0, 108.0, 16.0, 16.0));
        assert_eq!(rects[2], Rect::new(64.0, 100.0, 32.0, 32.0));
    }

    #[test]
    fn test_grid_wraps_at_width() {
        let layout = Layout::new(4.0);

        // 304 wide, 32 cells, 4 gaps: 8 per row
        assert_eq!(layout.columns(304.0, 32.0), 8);
        assert_eq!(layout.columns(10.0, 32.0), 1);

        let cells = layout.grid((8.0, 50.0), 304.0, 32.0, 9);
        assert_eq!(cells[7], Rect::new(8.0 + 7.0 * 36.0, 50.0, 32.0, 32.0));
        assert_eq!(cells[8], Rect::new(8.0, 86.0, 32.0, 32.0));
        assert_eq!(layout.grid_height(304.0, 32.0, 9), 68.0);
        assert_eq!(layout.grid_height(304.0, 32.0, 0), 0.0);
    }
}
