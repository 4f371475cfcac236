//! Primitive rasterizer
//!
//! Every routine writes straight into the canvas and clips silently at the
//! buffer edges. Coordinates are row/column indices; the rasterizer makes no
//! assumption about which way Y points on screen.

use log::warn;

use super::edge_table::{dda_samples, EdgeTable, Window};
use super::{Color, Image};
use crate::math::Vec2;

impl Image {
    /// Draw a clipped horizontal span from x1 to x2 inclusive.
    /// Nothing is drawn when `x1 > x2`.
    fn span(&mut self, x1: i32, x2: i32, y: i32, color: Color) {
        if y < 0 || y >= self.height() as i32 || x1 > x2 {
            return;
        }
        let start = x1.max(0);
        let end = x2.min(self.width() as i32 - 1);
        for x in start..=end {
            // Safety: start/end clamped to [0, width) and y checked above
            unsafe {
                self.set_pixel_unchecked(x as u32, y as u32, color);
            }
        }
    }

    /// Line using a digital differential analyzer.
    ///
    /// Walks `max(|dx|, |dy|) + 1` samples and floors each to a pixel.
    /// A zero-length segment plots its single point.
    pub fn draw_line_dda(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        for (x, y) in dda_samples(x0, y0, x1, y1, Window::of(self.width(), self.height())) {
            if self.in_bounds(x, y) {
                // Safety: in_bounds checked
                unsafe {
                    self.set_pixel_unchecked(x as u32, y as u32, color);
                }
            }
        }
    }

    /// One-pixel outline on the rectangle's own boundary
    pub fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        if w <= 0 || h <= 0 {
            return;
        }
        let right = x.saturating_add(w - 1);
        let bottom = y.saturating_add(h - 1);
        self.span(x, right, y, color);
        self.span(x, right, bottom, color);
        for row in y.max(0)..=bottom.min(self.height() as i32 - 1) {
            self.set_pixel_safe(x, row, color);
            self.set_pixel_safe(right, row, color);
        }
    }

    /// Axis-aligned rectangle with optional fill and a border that grows
    /// outward: layer `i` sits `i + 1` pixels outside the `w x h` fill area.
    ///
    /// `border_width <= 0` is rejected with a warning and nothing is drawn.
    pub fn draw_rect_update(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        border_color: Color,
        border_width: i32,
        is_filled: bool,
        fill_color: Color,
    ) {
        if border_width <= 0 {
            warn!("Border width must be greater than 0 (got {})", border_width);
            return;
        }

        if is_filled && w > 0 {
            let right = x.saturating_add(w - 1);
            for row in y.max(0)..y.saturating_add(h).min(self.height() as i32) {
                self.span(x, right, row, fill_color);
            }
        }

        let last_row = self.height() as i32 - 1;
        for i in 0..border_width {
            let offset = i.saturating_add(1);
            let left = x.saturating_sub(offset);
            let right = x.saturating_add(w).saturating_sub(1).saturating_add(offset);
            let top = y.saturating_sub(offset);
            let bottom = y.saturating_add(h).saturating_sub(1).saturating_add(offset);

            self.span(left, right, top, border_color);
            self.span(left, right, bottom, border_color);
            for row in top.max(0)..=bottom.min(last_row) {
                self.set_pixel_safe(left, row, border_color);
                self.set_pixel_safe(right, row, border_color);
            }
        }
    }

    /// Midpoint circle with optional fill.
    ///
    /// Border layers are stacked along each octant's major axis (x for the
    /// octants near the horizontal, y for those near the vertical), so thick
    /// borders are heavier at the compass points than on the diagonals.
    pub fn draw_circle(
        &mut self,
        cx: i32,
        cy: i32,
        r: i32,
        border_color: Color,
        border_width: i32,
        is_filled: bool,
        fill_color: Color,
    ) {
        let mut x1 = r;
        let mut y1 = 0;
        let mut v = 1i32.saturating_sub(r);

        while y1 <= x1 {
            // Saturating so far off-canvas centers clip instead of overflowing
            let (left, right) = (cx.saturating_sub(x1), cx.saturating_add(x1));
            let (near_left, near_right) = (cx.saturating_sub(y1), cx.saturating_add(y1));
            let (low, high) = (cy.saturating_sub(y1), cy.saturating_add(y1));
            let (far_low, far_high) = (cy.saturating_sub(x1), cy.saturating_add(x1));

            if is_filled {
                self.span(left, right, high, fill_color);
                self.span(left, right, low, fill_color);
                self.span(near_left, near_right, far_high, fill_color);
                self.span(near_left, near_right, far_low, fill_color);
            }

            for w in 0..border_width {
                self.set_pixel_safe(right.saturating_add(w), high, border_color);
                self.set_pixel_safe(left.saturating_sub(w), high, border_color);
                self.set_pixel_safe(right.saturating_add(w), low, border_color);
                self.set_pixel_safe(left.saturating_sub(w), low, border_color);
                self.set_pixel_safe(near_right, far_high.saturating_add(w), border_color);
                self.set_pixel_safe(near_left, far_high.saturating_add(w), border_color);
                self.set_pixel_safe(near_right, far_low.saturating_sub(w), border_color);
                self.set_pixel_safe(near_left, far_low.saturating_sub(w), border_color);
            }

            y1 += 1;
            if v <= 0 {
                v += 2 * y1 + 1;
            } else {
                x1 -= 1;
                v += 2 * (y1 - x1 + 1);
            }
        }
    }

    /// Triangle with optional scanline fill.
    ///
    /// The interior comes from an [`EdgeTable`] built over all three edges.
    /// Border copy `i` is the outline shifted by (-i, -i).
    pub fn draw_triangle(
        &mut self,
        p0: Vec2,
        p1: Vec2,
        p2: Vec2,
        border_color: Color,
        border_width: i32,
        is_filled: bool,
        fill_color: Color,
    ) {
        let (x0, y0) = p0.to_pixel();
        let (x1, y1) = p1.to_pixel();
        let (x2, y2) = p2.to_pixel();

        if is_filled {
            let mut table = EdgeTable::new(self.height());
            table.add_edge(x0, y0, x1, y1);
            table.add_edge(x1, y1, x2, y2);
            table.add_edge(x2, y2, x0, y0);

            self.draw_triangle_outline([(x0, y0), (x1, y1), (x2, y2)], 0, border_color);
            for (y, cell) in table.spans() {
                self.span(cell.min_x, cell.max_x, y, fill_color);
            }
        }

        for i in 0..border_width {
            self.draw_triangle_outline([(x0, y0), (x1, y1), (x2, y2)], i, border_color);
        }
    }

    fn draw_triangle_outline(&mut self, points: [(i32, i32); 3], offset: i32, color: Color) {
        for k in 0..3 {
            let (ax, ay) = points[k];
            let (bx, by) = points[(k + 1) % 3];
            self.draw_line_dda(
                ax.saturating_sub(offset),
                ay.saturating_sub(offset),
                bx.saturating_sub(offset),
                by.saturating_sub(offset),
                color,
            );
        }
    }

    /// Blit `src` with its top-left corner at (x, y).
    ///
    /// With `top_anchored`, source row `j` lands on row `y - j` (for canvases
    /// whose Y grows upward); otherwise on `y + j`. Off-canvas pixels clip.
    pub fn draw_image(&mut self, src: &Image, x: i32, y: i32, top_anchored: bool) {
        for j in 0..src.height() as i32 {
            let dy = if top_anchored {
                y.saturating_sub(j)
            } else {
                y.saturating_add(j)
            };
            for i in 0..src.width() as i32 {
                self.set_pixel_safe(x.saturating_add(i), dy, src.get_pixel_safe(i, j));
            }
        }
    }
}
