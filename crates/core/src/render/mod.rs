//! Frame buffer shared by the screens, the overlays and the capture pipeline.

use crate::input::Rect;

pub const SCREEN_WIDTH: usize = 240;
pub const SCREEN_HEIGHT: usize = 136;
/// Full frame including the border around the visible screen.
pub const FULL_WIDTH: usize = 256;
pub const FULL_HEIGHT: usize = 144;
pub const FRAME_PIXELS: usize = FULL_WIDTH * FULL_HEIGHT;
pub const FRAME_RATE: u32 = 60;
pub const FONT_WIDTH: i32 = 6;
pub const FONT_HEIGHT: i32 = 6;

const BORDER_LEFT: usize = (FULL_WIDTH - SCREEN_WIDTH) / 2;
const BORDER_TOP: usize = (FULL_HEIGHT - SCREEN_HEIGHT) / 2;

/// Packs a colour into the RGBA8888 layout used by every frame buffer.
pub const fn rgba(r: u8, g: u8, b: u8) -> u32 {
    u32::from_le_bytes([r, g, b, 0xff])
}

/// Sixteen-colour palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette(pub [u32; 16]);

impl Palette {
    pub const BLACK: usize = 0;
    pub const RED: usize = 2;
    pub const WHITE: usize = 12;
    pub const DARK_GREY: usize = 15;

    /// Palette the studio chrome is drawn with.
    pub const fn system() -> Self {
        Self([
            rgba(0x1a, 0x1c, 0x2c),
            rgba(0x5d, 0x27, 0x5d),
            rgba(0xb1, 0x3e, 0x53),
            rgba(0xef, 0x7d, 0x57),
            rgba(0xff, 0xcd, 0x75),
            rgba(0xa7, 0xf0, 0x70),
            rgba(0x38, 0xb7, 0x64),
            rgba(0x25, 0x71, 0x79),
            rgba(0x29, 0x36, 0x6f),
            rgba(0x3b, 0x5d, 0xc9),
            rgba(0x41, 0xa6, 0xf6),
            rgba(0x73, 0xef, 0xf7),
            rgba(0xf4, 0xf4, 0xf4),
            rgba(0x94, 0xb0, 0xc2),
            rgba(0x56, 0x6c, 0x86),
            rgba(0x33, 0x3c, 0x57),
        ])
    }

    pub fn color(&self, index: usize) -> u32 {
        self.0[index % self.0.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::system()
    }
}

/// Full-size RGBA8888 frame, row-major, `FULL_WIDTH` pixels per row.
#[derive(Debug, Clone)]
pub struct Frame {
    pub pixels: Vec<u32>,
    pub palette: Palette,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame {
    pub fn new() -> Self {
        Self {
            pixels: vec![0; FRAME_PIXELS],
            palette: Palette::system(),
        }
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [u32] {
        let start = row * FULL_WIDTH;
        &mut self.pixels[start..start + FULL_WIDTH]
    }

    /// Fills a rectangle given in screen coordinates, clipped to the frame.
    pub fn fill_rect(&mut self, rect: Rect, color: u32) {
        let x0 = (rect.x + BORDER_LEFT as i32).clamp(0, FULL_WIDTH as i32) as usize;
        let y0 = (rect.y + BORDER_TOP as i32).clamp(0, FULL_HEIGHT as i32) as usize;
        let x1 = (rect.x + rect.w + BORDER_LEFT as i32).clamp(0, FULL_WIDTH as i32) as usize;
        let y1 = (rect.y + rect.h + BORDER_TOP as i32).clamp(0, FULL_HEIGHT as i32) as usize;

        for y in y0..y1 {
            self.pixels[y * FULL_WIDTH + x0..y * FULL_WIDTH + x1].fill(color);
        }
    }

    /// Copies the visible screen area (without border) into a new buffer.
    pub fn screen_pixels(&self) -> Vec<u32> {
        let mut out = Vec::with_capacity(SCREEN_WIDTH * SCREEN_HEIGHT);
        for row in BORDER_TOP..BORDER_TOP + SCREEN_HEIGHT {
            let start = row * FULL_WIDTH + BORDER_LEFT;
            out.extend_from_slice(&self.pixels[start..start + SCREEN_WIDTH]);
        }
        out
    }
}

const RECORD_LABEL: [u16; 5] = [
    0b0111001100110011,
    0b1111101010100100,
    0b1111101100110100,
    0b1111101010100100,
    0b0111001010110011,
];

/// Stamps the 16x5 "REC" glyph into a full-size frame at `(sx, sy)`.
pub fn draw_record_label(pixels: &mut [u32], sx: usize, sy: usize, color: u32) {
    for (y, bits) in RECORD_LABEL.iter().enumerate() {
        for x in 0..16 {
            if bits & (1 << x) != 0 {
                let index = (sy + y) * FULL_WIDTH + sx + 15 - x;
                if let Some(pixel) = pixels.get_mut(index) {
                    *pixel = color;
                }
            }
        }
    }
}
