/// Horizontal extent seen on one scanline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub min_x: i32,
    pub max_x: i32,
}

impl Cell {
    pub const EMPTY: Self = Self {
        min_x: i32::MAX,
        max_x: i32::MIN,
    };

    /// True once any edge has visited this row
    #[inline]
    pub fn has_span(&self) -> bool {
        self.min_x <= self.max_x
    }

    #[inline]
    fn include(&mut self, x: i32) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Per-row min/max X accumulator used to fill triangle interiors.
/// Rows only ever widen as edges are added.
pub struct EdgeTable {
    rows: Vec<Cell>,
}

impl EdgeTable {
    pub fn new(height: u32) -> Self {
        Self {
            rows: vec![Cell::EMPTY; height as usize],
        }
    }

    /// Walk the segment with the same DDA stepping as `draw_line_dda`,
    /// recording the floored X of every sample on the row it lands in.
    /// Samples on rows outside the table are ignored.
    pub fn add_edge(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        for (x, y) in dda_samples(x0, y0, x1, y1, Window::rows(self.rows.len() as u32)) {
            if y >= 0 && (y as usize) < self.rows.len() {
                self.rows[y as usize].include(x);
            }
        }
    }

    #[inline]
    pub fn row(&self, y: usize) -> Option<&Cell> {
        self.rows.get(y)
    }

    /// Rows with a non-empty span, as (y, cell)
    pub fn spans(&self) -> impl Iterator<Item = (i32, Cell)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.has_span())
            .map(|(y, cell)| (y as i32, *cell))
    }
}

/// Inclusive pixel rectangle a DDA walk is restricted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Window {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Window {
    pub(crate) const UNBOUNDED: Self = Self {
        min_x: i32::MIN,
        min_y: i32::MIN,
        max_x: i32::MAX,
        max_y: i32::MAX,
    };

    /// Every pixel of a `width x height` buffer
    pub(crate) fn of(width: u32, height: u32) -> Self {
        Self {
            min_x: 0,
            min_y: 0,
            max_x: width as i32 - 1,
            max_y: height as i32 - 1,
        }
    }

    /// Rows `0..height`, any column
    pub(crate) fn rows(height: u32) -> Self {
        Self {
            min_y: 0,
            max_y: height as i32 - 1,
            ..Self::UNBOUNDED
        }
    }
}

/// Sample indices (as a float interval) whose position along one axis floors
/// into `[lo, hi]`. None when a constant coordinate never enters it.
fn axis_window(start: f64, v: f64, lo: i32, hi: i32) -> Option<(f64, f64)> {
    let (lo, hi) = (f64::from(lo), f64::from(hi) + 1.0);
    if v == 0.0 {
        return (start >= lo && start < hi).then_some((f64::NEG_INFINITY, f64::INFINITY));
    }
    let a = (lo - start) / v;
    let b = (hi - start) / v;
    Some((a.min(b), a.max(b)))
}

/// Integer pixel positions visited by a DDA walk from (x0, y0) to (x1, y1).
///
/// `max(|dx|, |dy|) + 1` samples at unit steps along the dominant axis, each
/// floored. A zero-length segment yields its single point. Samples that can't
/// land inside `window` are skipped without being stepped through, so far
/// off-canvas endpoints cost no more than the visible part of the segment.
/// Callers still bounds-check what they get.
pub(crate) fn dda_samples(
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    window: Window,
) -> impl Iterator<Item = (i32, i32)> {
    // Differences in float: endpoints may be further apart than i32::MAX
    let dx = x1 as f32 - x0 as f32;
    let dy = y1 as f32 - y0 as f32;
    let d = dx.abs().max(dy.abs());
    let (vx, vy) = if d == 0.0 { (0.0, 0.0) } else { (dx / d, dy / d) };
    let steps = d as i64;

    let visible = match (
        axis_window(f64::from(x0), f64::from(vx), window.min_x, window.max_x),
        axis_window(f64::from(y0), f64::from(vy), window.min_y, window.max_y),
    ) {
        (Some((ax, bx)), Some((ay, by))) => Some((ax.max(ay), bx.min(by))),
        _ => None,
    };
    // Padded by one sample on each side for float rounding
    let (first, last) = match visible {
        Some((lo, hi)) if lo <= hi => (
            (lo.floor() as i64).saturating_sub(1).max(0),
            (hi.ceil() as i64).saturating_add(1).min(steps),
        ),
        _ => (1, 0),
    };

    // Skipped prefix is computed in f64; stepping stays in f32
    let mut x = (f64::from(x0) + first as f64 * f64::from(vx)) as f32;
    let mut y = (f64::from(y0) + first as f64 * f64::from(vy)) as f32;
    (first..=last).map(move |_| {
        let sample = (x.floor() as i32, y.floor() as i32);
        x += vx;
        y += vy;
        sample
    })
}
