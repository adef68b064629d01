// Core types shared by the mosaic/eraser operations, the stroke rasterizer and history.

use crate::error::{Error, Result};

/// Bytes per pixel: R, G, B, A.
pub const CHANNELS: usize = 4;

/// Range the UI keeps the mosaic block size and brush diameter in.
pub const MIN_BRUSH_VALUE: u32 = 1;
pub const MAX_BRUSH_VALUE: u32 = 100;

/// An RGBA8 image, row-major, top row first.
/// Two buffers are only interchangeable when their width and height match exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>, // length = width * height * 4
}

impl PixelBuffer {
    /// Transparent black buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, data: vec![0; width * height * CHANNELS] }
    }

    /// Buffer where every pixel is `rgba`.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(width * height * CHANNELS);
        for _ in 0..width * height {
            data.extend_from_slice(&rgba);
        }
        Self { width, height, data }
    }

    /// Wrap decoded RGBA bytes. The length must be exactly width * height * 4.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width * height * CHANNELS;
        if data.len() != expected {
            return Err(Error::BufferLength { width, height, expected, actual: data.len() });
        }
        Ok(Self { width, height, data })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn same_dimensions(&self, other: &PixelBuffer) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Fails with `DimensionMismatch` unless this buffer is `width` x `height`.
    pub fn ensure_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if self.width != width || self.height != height {
            return Err(Error::dimension_mismatch((width, height), self.dimensions()));
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn index(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * CHANNELS
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    /// Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.index(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&rgba);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Bytes held by the pixel data.
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }
}

/// A pointer position in image (buffer) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned rectangle requested by the caller. It may hang off any edge of
/// the buffer; operations clamp it first and do nothing if no area is left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// A clamped, non-empty, half-open pixel rectangle: x0 <= x < x1, y0 <= y < y1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// The square brush footprint of side `diameter` centred on `center`,
    /// clamped to a `width` x `height` buffer. Edges snap outward (floor/ceil).
    pub fn brush_square(center: Point, diameter: u32, width: usize, height: usize) -> Self {
        let half = diameter as f32 / 2.0;
        let x0 = ((center.x - half).floor() as i64).max(0);
        let y0 = ((center.y - half).floor() as i64).max(0);
        let x1 = ((center.x + half).ceil() as i64).min(width as i64);
        let y1 = ((center.y + half).ceil() as i64).min(height as i64);
        Self {
            x: saturate_i32(x0),
            y: saturate_i32(y0),
            width: saturate_i32((x1 - x0).max(0)),
            height: saturate_i32((y1 - y0).max(0)),
        }
    }

    /// Intersect with [0, width) x [0, height). `None` when nothing is left.
    pub fn clamp(&self, width: usize, height: usize) -> Option<Bounds> {
        let x0 = (self.x as i64).max(0);
        let y0 = (self.y as i64).max(0);
        let x1 = (self.x as i64 + self.width as i64).min(width as i64);
        let y1 = (self.y as i64 + self.height as i64).min(height as i64);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Bounds { x0: x0 as usize, y0: y0 as usize, x1: x1 as usize, y1: y1 as usize })
    }
}

#[inline]
fn saturate_i32(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BrushMode {
    #[default]
    Mosaic,
    Eraser,
}

impl BrushMode {
    pub fn label(&self) -> &'static str {
        match self {
            BrushMode::Mosaic => "MOSAIC",
            BrushMode::Eraser => "ERASER",
        }
    }
}

/// Brush parameters owned by the UI; the core only reads them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrushSettings {
    pub block_size: u32,
    pub brush_diameter: u32,
    pub mode: BrushMode,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self { block_size: 10, brush_diameter: 20, mode: BrushMode::Mosaic }
    }
}

impl BrushSettings {
    pub fn set_block_size(&mut self, value: u32) {
        self.block_size = value.clamp(MIN_BRUSH_VALUE, MAX_BRUSH_VALUE);
    }

    pub fn set_brush_diameter(&mut self, value: u32) {
        self.brush_diameter = value.clamp(MIN_BRUSH_VALUE, MAX_BRUSH_VALUE);
    }

    /// Step a value by `delta` and keep it in range (used by the +/- keys).
    pub fn adjust_block_size(&mut self, delta: i32) {
        self.set_block_size(step(self.block_size, delta));
    }

    pub fn adjust_brush_diameter(&mut self, delta: i32) {
        self.set_brush_diameter(step(self.brush_diameter, delta));
    }
}

fn step(value: u32, delta: i32) -> u32 {
    (value as i64 + delta as i64).max(0) as u32
}
