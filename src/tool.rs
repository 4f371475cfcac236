//! Tool selection state machine
//!
//! The active [`Tool`] decides what a mouse drag does to the canvas. A drag
//! starts on press, is previewed while the button is held, and is committed
//! on release.

use crate::math::Vec2;
use crate::raster::{Color, Image};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Idle,
    DrawingLine,
    DrawingRect,
    DrawingCircle,
    DrawingTriangle,
    Erasing,
    ParticleDemo,
}

impl Tool {
    /// Number-key shortcuts 1-6
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            1 => Some(Self::DrawingLine),
            2 => Some(Self::DrawingRect),
            3 => Some(Self::DrawingCircle),
            4 => Some(Self::DrawingTriangle),
            5 => Some(Self::Erasing),
            6 => Some(Self::ParticleDemo),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::DrawingLine => "Line",
            Self::DrawingRect => "Rectangle",
            Self::DrawingCircle => "Circle",
            Self::DrawingTriangle => "Triangle",
            Self::Erasing => "Eraser",
            Self::ParticleDemo => "Particles",
        }
    }

    fn draws_shape(&self) -> bool {
        matches!(
            self,
            Self::DrawingLine | Self::DrawingRect | Self::DrawingCircle | Self::DrawingTriangle
        )
    }
}

/// Current brush parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub color: Color,
    pub border_width: i32,
    pub filled: bool,
}

impl Style {
    pub fn new(color: Color, border_width: i32) -> Self {
        Self {
            color,
            border_width: border_width.max(1),
            filled: false,
        }
    }

    pub fn toggle_fill(&mut self) {
        self.filled = !self.filled;
    }

    pub fn grow_border(&mut self) {
        self.border_width += 1;
    }

    /// Shrink the border, never below one pixel
    pub fn shrink_border(&mut self) {
        if self.border_width > 1 {
            self.border_width -= 1;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    start: Vec2,
    current: Vec2,
}

pub struct ToolState {
    tool: Tool,
    style: Style,
    drag: Option<Drag>,
}

impl ToolState {
    pub fn new(style: Style) -> Self {
        Self {
            tool: Tool::Idle,
            style,
            drag: None,
        }
    }

    #[inline]
    pub fn tool(&self) -> Tool {
        self.tool
    }

    #[inline]
    pub fn style(&self) -> &Style {
        &self.style
    }

    #[inline]
    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Switch tools, abandoning any drag in progress
    pub fn select(&mut self, tool: Tool) {
        self.tool = tool;
        self.drag = None;
    }

    /// Begin a drag. The eraser erases under the cursor immediately.
    pub fn press(&mut self, pos: Vec2, canvas: &mut Image, erase_radius: i32) {
        if self.tool == Tool::Erasing {
            erase_square(canvas, pos, erase_radius);
        }
        self.drag = Some(Drag {
            start: pos,
            current: pos,
        });
    }

    pub fn drag_to(&mut self, pos: Vec2, canvas: &mut Image, erase_radius: i32) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        drag.current = pos;
        if self.tool == Tool::Erasing {
            erase_square(canvas, pos, erase_radius);
        }
    }

    /// Finish the drag, committing the shape to the canvas
    pub fn release(&mut self, pos: Vec2, canvas: &mut Image) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        draw_shape(self.tool, &self.style, drag.start, pos, canvas);
    }

    /// Draw the in-progress shape onto a scratch frame
    pub fn preview(&self, frame: &mut Image) {
        if let Some(drag) = self.drag {
            draw_shape(self.tool, &self.style, drag.start, drag.current, frame);
        }
    }
}

fn draw_shape(tool: Tool, style: &Style, start: Vec2, end: Vec2, target: &mut Image) {
    if !tool.draws_shape() {
        return;
    }
    let (sx, sy) = start.to_pixel();
    let (ex, ey) = end.to_pixel();
    let Style {
        color,
        border_width,
        filled,
    } = *style;

    match tool {
        Tool::DrawingLine => target.draw_line_dda(sx, sy, ex, ey, color),
        Tool::DrawingRect => target.draw_rect_update(
            sx.min(ex),
            sy.min(ey),
            (ex - sx).abs(),
            (ey - sy).abs(),
            color,
            border_width,
            filled,
            color,
        ),
        Tool::DrawingCircle => target.draw_circle(
            sx,
            sy,
            start.distance_to(&end) as i32,
            color,
            border_width,
            filled,
            color,
        ),
        Tool::DrawingTriangle => target.draw_triangle(
            Vec2::new(end.x, end.y),
            Vec2::new(end.x, start.y),
            Vec2::new(start.x, start.y),
            color,
            border_width,
            filled,
            color,
        ),
        Tool::Idle | Tool::Erasing | Tool::ParticleDemo => {},
    }
}

/// Blank a `(2r + 1)` square centered on `pos`
fn erase_square(canvas: &mut Image, pos: Vec2, radius: i32) {
    let (cx, cy) = pos.to_pixel();
    for j in -radius..=radius {
        for i in -radius..=radius {
            canvas.set_pixel_safe(cx.saturating_add(i), cy.saturating_add(j), Color::BLACK);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(img: &Image, color: Color) -> usize {
        img.pixels().iter().filter(|c| **c == color).count()
    }

    #[test]
    fn test_from_digit() {
        assert_eq!(Tool::from_digit(1), Some(Tool::DrawingLine));
        assert_eq!(Tool::from_digit(6), Some(Tool::ParticleDemo));
        assert_eq!(Tool::from_digit(0), None);
        assert_eq!(Tool::from_digit(7), None);
    }

    #[test]
    fn test_style_border_floor() {
        let mut style = Style::new(Color::RED, 0);
        assert_eq!(style.border_width, 1);
        style.shrink_border();
        assert_eq!(style.border_width, 1);
        style.grow_border();
        style.grow_border();
        assert_eq!(style.border_width, 3);
        style.toggle_fill();
        assert!(style.filled);
    }

    #[test]
    fn test_line_committed_on_release() {
        let mut canvas = Image::new(20, 20);
        let mut state = ToolState::new(Style::new(Color::GREEN, 1));
        state.select(Tool::DrawingLine);

        state.press(Vec2::new(2.0, 3.0), &mut canvas, 5);
        state.drag_to(Vec2::new(8.0, 3.0), &mut canvas, 5);
        assert!(state.is_dragging());
        assert_eq!(count(&canvas, Color::GREEN), 0);

        state.release(Vec2::new(10.0, 3.0), &mut canvas);
        assert!(!state.is_dragging());
        assert_eq!(count(&canvas, Color::GREEN), 9);
        assert_eq!(canvas.get_pixel(10, 3), Color::GREEN);
    }

    #[test]
    fn test_preview_leaves_canvas_untouched() {
        let mut canvas = Image::new(20, 20);
        let mut frame = Image::new(20, 20);
        let mut state = ToolState::new(Style::new(Color::RED, 1));
        state.select(Tool::DrawingCircle);
        state.press(Vec2::new(10.0, 10.0), &mut canvas, 5);
        state.drag_to(Vec2::new(14.0, 10.0), &mut canvas, 5);
        state.preview(&mut frame);

        assert_eq!(frame.get_pixel(14, 10), Color::RED);
        assert_eq!(count(&canvas, Color::RED), 0);
    }

    #[test]
    fn test_rect_from_any_drag_direction() {
        let mut canvas = Image::new(30, 30);
        let mut state = ToolState::new(Style::new(Color::BLUE, 1));
        state.select(Tool::DrawingRect);
        state.style_mut().toggle_fill();
        state.press(Vec2::new(20.0, 20.0), &mut canvas, 5);
        state.release(Vec2::new(10.0, 15.0), &mut canvas);

        assert_eq!(canvas.get_pixel(15, 17), Color::BLUE);
        assert_eq!(canvas.get_pixel(9, 14), Color::BLUE);
        assert_eq!(canvas.get_pixel(20, 20), Color::BLUE);
        assert_eq!(canvas.get_pixel(21, 21), Color::BLACK);
    }

    #[test]
    fn test_triangle_uses_drag_corners() {
        let mut canvas = Image::new(30, 30);
        let mut state = ToolState::new(Style::new(Color::CYAN, 1));
        state.select(Tool::DrawingTriangle);
        state.press(Vec2::new(5.0, 5.0), &mut canvas, 5);
        state.release(Vec2::new(20.0, 20.0), &mut canvas);

        assert_eq!(canvas.get_pixel(20, 20), Color::CYAN);
        assert_eq!(canvas.get_pixel(20, 5), Color::CYAN);
        assert_eq!(canvas.get_pixel(5, 5), Color::CYAN);
        assert_eq!(canvas.get_pixel(5, 20), Color::BLACK);
    }

    #[test]
    fn test_eraser_blanks_square() {
        let mut canvas = Image::new(20, 20);
        canvas.fill(Color::WHITE);
        let mut state = ToolState::new(Style::new(Color::RED, 1));
        state.select(Tool::Erasing);
        state.press(Vec2::new(5.0, 5.0), &mut canvas, 2);
        assert_eq!(count(&canvas, Color::BLACK), 25);
        state.drag_to(Vec2::new(15.0, 5.0), &mut canvas, 2);
        assert_eq!(count(&canvas, Color::BLACK), 50);
        state.release(Vec2::new(15.0, 5.0), &mut canvas);
        assert_eq!(count(&canvas, Color::BLACK), 50);
    }

    #[test]
    fn test_select_cancels_drag() {
        let mut canvas = Image::new(10, 10);
        let mut state = ToolState::new(Style::new(Color::RED, 1));
        state.select(Tool::DrawingLine);
        state.press(Vec2::new(1.0, 1.0), &mut canvas, 1);
        state.select(Tool::DrawingRect);
        state.release(Vec2::new(5.0, 5.0), &mut canvas);
        assert_eq!(count(&canvas, Color::RED), 0);
    }
}
