// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the photo being edited, scaled down to fit the screen.
// 2) A square outline of the brush plus a crosshair that follow the mouse.
// 3) A tiny 5x7 bitmap font to render HUD text on top of the image.

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::error::{Error, Result};
use crate::types::{PixelBuffer, Point};

/// Screen-side pixels, each 0x00RRGGBB for minifb.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }
}

/* ---------- Image <-> view mapping ---------- */

/// How the image is fitted into the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewLayout {
    pub image_w: usize,
    pub image_h: usize,
    pub view_w: usize,
    pub view_h: usize,
}

impl ViewLayout {
    /// Fit the image into 90% of `max_w` x `max_h`, keeping aspect ratio and never upscaling.
    pub fn fit(image_w: usize, image_h: usize, max_w: usize, max_h: usize) -> Self {
        let avail_w = (max_w as f32 * 0.9).max(1.0);
        let avail_h = (max_h as f32 * 0.9).max(1.0);
        let scale = (avail_w / image_w.max(1) as f32)
            .min(avail_h / image_h.max(1) as f32)
            .min(1.0);
        Self {
            image_w,
            image_h,
            view_w: ((image_w as f32 * scale).round() as usize).max(1),
            view_h: ((image_h as f32 * scale).round() as usize).max(1),
        }
    }

    /// Image pixels per view pixel.
    pub fn scale(&self) -> f32 {
        self.image_w as f32 / self.view_w as f32
    }

    /// Window pixel -> image coordinate.
    pub fn to_image(&self, vx: f32, vy: f32) -> Point {
        Point::new(
            vx * self.image_w as f32 / self.view_w as f32,
            vy * self.image_h as f32 / self.view_h as f32,
        )
    }

    /// Resample `image` into `fb` (nearest neighbour), blending alpha over a checkerboard.
    /// Visual: transparent areas show the usual grey checks.
    pub fn render(&self, image: &PixelBuffer, fb: &mut FrameBuffer) {
        let bytes = image.as_bytes();
        for vy in 0..self.view_h.min(fb.height) {
            let iy = (vy * self.image_h / self.view_h).min(self.image_h.saturating_sub(1));
            for vx in 0..self.view_w.min(fb.width) {
                let ix = (vx * self.image_w / self.view_w).min(self.image_w.saturating_sub(1));
                let i = (iy * self.image_w + ix) * 4;
                let bg: u32 = if ((vx / 8) + (vy / 8)) % 2 == 0 { 0xCC } else { 0x99 };
                let a = bytes[i + 3] as u32;
                let mix = |c: u8| (c as u32 * a + bg * (255 - a) + 127) / 255;
                fb.pixels[vy * fb.width + vx] = (mix(bytes[i]) << 16) | (mix(bytes[i + 1]) << 8) | mix(bytes[i + 2]);
            }
        }
    }
}

/* ---------- Window ---------- */

/// Keys the app reacts to, read once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyActions {
    pub mosaic_mode: bool,
    pub eraser_mode: bool,
    pub undo: bool,
    pub redo: bool,
    pub export: bool,
    pub brush_delta: i32,
    pub block_delta: i32,
}

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window sized to the fitted view.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<()> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Mouse position in window pixels; `None` once it leaves the window.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    fn pressed(&self, key: Key) -> bool {
        self.window.is_key_pressed(key, KeyRepeat::No)
    }

    fn held(&self, keys: &[Key]) -> bool {
        keys.iter().any(|k| self.window.is_key_down(*k))
    }

    /// Ctrl/Cmd+Z undo, Ctrl/Cmd+Y or Ctrl/Cmd+Shift+Z redo,
    /// M/E switch mode, [ ] brush size, - = block size, S export.
    pub fn key_actions(&self) -> KeyActions {
        let ctrl = self.held(&[Key::LeftCtrl, Key::RightCtrl, Key::LeftSuper, Key::RightSuper]);
        let shift = self.held(&[Key::LeftShift, Key::RightShift]);
        let z = self.pressed(Key::Z);
        let step = if shift { 10 } else { 1 };

        let delta = |down: Key, up: Key| {
            let mut d = 0;
            if self.window.is_key_pressed(down, KeyRepeat::Yes) { d -= step; }
            if self.window.is_key_pressed(up, KeyRepeat::Yes) { d += step; }
            d
        };

        KeyActions {
            mosaic_mode: !ctrl && self.pressed(Key::M),
            eraser_mode: !ctrl && self.pressed(Key::E),
            undo: ctrl && z && !shift,
            redo: ctrl && ((z && shift) || self.pressed(Key::Y)),
            export: !ctrl && self.pressed(Key::S),
            brush_delta: delta(Key::LeftBracket, Key::RightBracket),
            block_delta: delta(Key::Minus, Key::Equal),
        }
    }
}

/* ---------- Software drawing: pixels, outlines, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0, x1, y1) = (x0, y0, x1, y1);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Draw a small crosshair centered at (cx,cy).
pub fn draw_crosshair(fb: &mut FrameBuffer, cx: i32, cy: i32, size: i32, color: u32) {
    draw_line(fb, cx - size, cy, cx - 2, cy, color);
    draw_line(fb, cx + 2, cy, cx + size, cy, color);
    draw_line(fb, cx, cy - size, cx, cy - 2, color);
    draw_line(fb, cx, cy + 2, cx, cy + size, color);
    put_pixel(fb, cx, cy, color);
}

/// Outline of the brush footprint: a square of `side` view pixels centred at (cx,cy).
/// Visual: shows exactly which area the next dab will touch.
pub fn draw_brush_outline(fb: &mut FrameBuffer, cx: i32, cy: i32, side: i32, color: u32) {
    let half = side.max(2) / 2;
    let (l, t, r, b) = (cx - half, cy - half, cx + half, cy + half);
    draw_line(fb, l, t, r, t, color);
    draw_line(fb, r, t, r, b, color);
    draw_line(fb, r, b, l, b, color);
    draw_line(fb, l, b, l, t, color);
}

/// Darken a horizontal strip so HUD text stays readable on bright photos.
pub fn shade_strip(fb: &mut FrameBuffer, y: usize, height: usize) {
    let end = (y + height).min(fb.height);
    for px in &mut fb.pixels[y.min(end) * fb.width..end * fb.width] {
        *px = (*px >> 1) & 0x007F_7F7F;
    }
}

/* ---------- 5x7 bitmap font (uppercase ASCII, digits, HUD punctuation) ---------- */

/// Return a 5x7 glyph bitmap. Lowercase letters render as uppercase.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '_' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b11111),
        '=' => g!(0b00000,0b00000,0b11111,0b00000,0b11111,0b00000,0b00000),
        '+' => g!(0b00000,0b00100,0b00100,0b11111,0b00100,0b00100,0b00000),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),
        '[' => g!(0b01110,0b01000,0b01000,0b01000,0b01000,0b01000,0b01110),
        ']' => g!(0b01110,0b00010,0b00010,0b00010,0b00010,0b00010,0b01110),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y), with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        for (shift, c) in [(1, 0x00000000), (0, color)] {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        put_pixel(fb, x + rx + shift, y + ry as i32 + shift, c);
                    }
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs, 1 pixel apart.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_keeps_small_images_at_full_size() {
        let v = ViewLayout::fit(200, 100, 1280, 800);
        assert_eq!((v.view_w, v.view_h), (200, 100));
        assert_eq!(v.to_image(10.0, 20.0), Point::new(10.0, 20.0));
    }

    #[test]
    fn fit_scales_large_images_and_maps_back() {
        let v = ViewLayout::fit(4000, 2000, 1000, 1000);
        assert_eq!((v.view_w, v.view_h), (900, 450));
        let p = v.to_image(450.0, 225.0);
        assert!((p.x - 2000.0).abs() < 0.01);
        assert!((p.y - 1000.0).abs() < 0.01);
    }

    #[test]
    fn render_packs_opaque_rgb() {
        let image = PixelBuffer::filled(2, 2, [0x12, 0x34, 0x56, 255]);
        let v = ViewLayout::fit(2, 2, 100, 100);
        let mut fb = FrameBuffer::new(v.view_w, v.view_h);
        v.render(&image, &mut fb);
        assert!(fb.pixels.iter().all(|p| *p == 0x0012_3456));
    }

    #[test]
    fn text_and_outline_stay_in_bounds() {
        let mut fb = FrameBuffer::new(20, 10);
        draw_text_5x7(&mut fb, 15, 5, "MOSAIC 10", 0x00FF_FFFF);
        draw_brush_outline(&mut fb, 0, 0, 30, 0x00FF_0000);
        draw_crosshair(&mut fb, 19, 9, 12, 0x00FF_CC33);
        shade_strip(&mut fb, 8, 10);
        assert_eq!(fb.pixels.len(), 200);
        assert!(fb.pixels.iter().any(|p| *p != 0));
    }

    #[test]
    fn lowercase_uses_uppercase_glyphs() {
        assert_eq!(glyph5x7('m'), glyph5x7('M'));
        assert!(glyph5x7('~').is_none());
    }
}
