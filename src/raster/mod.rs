//! Row-major raster buffers
//!
//! `Raster<T>` is the canvas every drawing routine mutates. The sample type is
//! generic so the RGB canvas (`Image`) and scalar maps (`FloatImage`) share one
//! implementation of resize, scale and flip.

mod color;
mod draw;
mod edge_table;
mod io;

pub use color::Color;
pub use edge_table::{Cell, EdgeTable};

/// RGB canvas
pub type Image = Raster<Color>;

/// Single-channel float raster
pub type FloatImage = Raster<f32>;

/// Owned `width * height` samples indexed `row * width + col`
#[derive(Debug, Clone, PartialEq)]
pub struct Raster<T> {
    width: u32,
    height: u32,
    pixels: Vec<T>,
}

impl<T: Copy + Default> Raster<T> {
    /// Create a buffer with every sample set to `T::default()`
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![T::default(); width as usize * height as usize],
        }
    }

    /// Wrap existing samples. Returns None if the length doesn't match.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<T>) -> Option<Self> {
        if pixels.len() == width as usize * height as usize {
            Some(Self {
                width,
                height,
                pixels,
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[T] {
        &self.pixels
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Read a sample. The caller guarantees `x < width && y < height`;
    /// out-of-range coordinates either panic or alias another row.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> T {
        debug_assert!(x < self.width && y < self.height);
        self.pixels[self.index(x, y)]
    }

    /// Write a sample. Same contract as [`Raster::get_pixel`].
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: T) {
        debug_assert!(x < self.width && y < self.height);
        let idx = self.index(x, y);
        self.pixels[idx] = value;
    }

    /// Fast unchecked read - use when bounds already verified
    ///
    /// # Safety
    /// `x < width` and `y < height` must hold.
    #[inline]
    pub unsafe fn get_pixel_unchecked(&self, x: u32, y: u32) -> T {
        *self.pixels.get_unchecked(self.index(x, y))
    }

    /// Fast unchecked write - use when bounds already verified
    ///
    /// # Safety
    /// `x < width` and `y < height` must hold.
    #[inline]
    pub unsafe fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: T) {
        let idx = self.index(x, y);
        *self.pixels.get_unchecked_mut(idx) = value;
    }

    /// Bounds-checked read; `T::default()` outside the buffer
    #[inline]
    pub fn get_pixel_safe(&self, x: i32, y: i32) -> T {
        if self.in_bounds(x, y) {
            self.pixels[self.index(x as u32, y as u32)]
        } else {
            T::default()
        }
    }

    /// Bounds-checked write; silently clipped outside the buffer
    #[inline]
    pub fn set_pixel_safe(&mut self, x: i32, y: i32, value: T) {
        if self.in_bounds(x, y) {
            let idx = self.index(x as u32, y as u32);
            self.pixels[idx] = value;
        }
    }

    pub fn fill(&mut self, value: T) {
        self.pixels.fill(value);
    }

    /// Copy contents from another buffer (must be same size)
    pub fn copy_from(&mut self, src: &Self) {
        if self.width == src.width && self.height == src.height {
            self.pixels.copy_from_slice(&src.pixels);
        }
    }

    /// Change the dimensions, keeping the overlapping top-left region.
    /// Samples outside the old bounds start as `T::default()`.
    pub fn resize(&mut self, width: u32, height: u32) {
        let mut resized = Self::new(width, height);
        let min_width = self.width.min(width) as usize;
        let min_height = self.height.min(height);

        for y in 0..min_height {
            let src = self.index(0, y);
            let dst = resized.index(0, y);
            resized.pixels[dst..dst + min_width].copy_from_slice(&self.pixels[src..src + min_width]);
        }

        *self = resized;
    }

    /// Nearest-neighbor rescale to new dimensions
    pub fn scale(&mut self, width: u32, height: u32) {
        let mut scaled = Self::new(width, height);
        if self.width == 0 || self.height == 0 {
            *self = scaled;
            return;
        }

        for y in 0..height {
            let sy = (self.height as f32 * (y as f32 / height as f32)) as u32;
            for x in 0..width {
                let sx = (self.width as f32 * (x as f32 / width as f32)) as u32;
                let value = self.get_pixel(sx.min(self.width - 1), sy.min(self.height - 1));
                scaled.set_pixel(x, y, value);
            }
        }

        *self = scaled;
    }

    /// Reverse row order in place
    pub fn flip_y(&mut self) {
        let row = self.width as usize;
        let height = self.height as usize;
        if row == 0 {
            return;
        }

        for y in 0..height / 2 {
            let (top, bottom) = self.pixels.split_at_mut((height - y - 1) * row);
            top[y * row..(y + 1) * row].swap_with_slice(&mut bottom[..row]);
        }
    }

    /// Copy out a `width x height` region starting at (start_x, start_y).
    /// Samples that fall outside this buffer stay `T::default()`.
    pub fn get_area(&self, start_x: u32, start_y: u32, width: u32, height: u32) -> Self {
        let mut area = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let (sx, sy) = (x + start_x, y + start_y);
                if sx < self.width && sy < self.height {
                    area.set_pixel(x, y, self.get_pixel(sx, sy));
                }
            }
        }
        area
    }

    /// Combine with an equally sized buffer, storing `f(self, other)` per sample.
    /// No-op if the sizes differ.
    pub fn combine(&mut self, other: &Self, f: impl Fn(T, T) -> T) {
        if self.width != other.width || self.height != other.height {
            return;
        }
        for (dst, &src) in self.pixels.iter_mut().zip(&other.pixels) {
            *dst = f(*dst, src);
        }
    }
}
