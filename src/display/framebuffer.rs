//! Framebuffer state: both pixel grids, the active resolution, sprite drawing and scrolling.
//!
//! All coordinates wrap modulo the active grid's width and height, so sprites that run
//! off one edge reappear on the opposite one.

/// Value stored for a lit pixel.
pub const PIXEL_ON: u8 = 0xFF;
pub const PIXEL_OFF: u8 = 0x00;

const STANDARD_WIDTH: usize = 64;
const STANDARD_HEIGHT: usize = 32;
const EXTENDED_WIDTH: usize = STANDARD_WIDTH * 2;
const EXTENDED_HEIGHT: usize = STANDARD_HEIGHT * 2;

/// Columns moved by the horizontal scroll opcodes, in either resolution.
const HORIZONTAL_SCROLL: usize = 4;

/// Which grid is being addressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Resolution {
    /// 64×32
    #[default]
    Standard,
    /// 128×64 (SUPER-CHIP)
    Extended,
}

impl Resolution {
    pub const fn width(self) -> usize {
        match self {
            Resolution::Standard => STANDARD_WIDTH,
            Resolution::Extended => EXTENDED_WIDTH,
        }
    }

    pub const fn height(self) -> usize {
        match self {
            Resolution::Standard => STANDARD_HEIGHT,
            Resolution::Extended => EXTENDED_HEIGHT,
        }
    }

    pub const fn pixel_count(self) -> usize {
        self.width() * self.height()
    }

    /// Row-major index of `(x, y)` after wrapping both coordinates onto the grid.
    pub fn index(self, x: usize, y: usize) -> usize {
        (y % self.height()) * self.width() + (x % self.width())
    }
}

/// Both grids plus the active mode. Switching modes never touches either grid.
pub struct Framebuffer {
    standard: Box<[u8; STANDARD_WIDTH * STANDARD_HEIGHT]>,
    extended: Box<[u8; EXTENDED_WIDTH * EXTENDED_HEIGHT]>,
    resolution: Resolution,
}

impl Framebuffer {
    pub fn new() -> Self {
        Self {
            standard: Box::new([PIXEL_OFF; STANDARD_WIDTH * STANDARD_HEIGHT]),
            extended: Box::new([PIXEL_OFF; EXTENDED_WIDTH * EXTENDED_HEIGHT]),
            resolution: Resolution::Standard,
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn extended_mode(&self) -> bool {
        self.resolution == Resolution::Extended
    }

    pub fn set_extended_mode(&mut self, enabled: bool) {
        self.resolution = if enabled {
            Resolution::Extended
        } else {
            Resolution::Standard
        };
    }

    pub fn width(&self) -> usize {
        self.resolution.width()
    }

    pub fn height(&self) -> usize {
        self.resolution.height()
    }

    /// Pixels of the active grid, row-major.
    pub fn pixels(&self) -> &[u8] {
        match self.resolution {
            Resolution::Standard => &self.standard[..],
            Resolution::Extended => &self.extended[..],
        }
    }

    fn pixels_mut(&mut self) -> &mut [u8] {
        match self.resolution {
            Resolution::Standard => &mut self.standard[..],
            Resolution::Extended => &mut self.extended[..],
        }
    }

    /// Pixel of the active grid at wrapped `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels()[self.resolution.index(x, y)]
    }

    /// Blank the active grid.
    pub fn clear(&mut self) {
        self.pixels_mut().fill(PIXEL_OFF);
    }

    /// Blank both grids and return to the standard resolution.
    pub fn reset(&mut self) {
        self.standard.fill(PIXEL_OFF);
        self.extended.fill(PIXEL_OFF);
        self.resolution = Resolution::Standard;
    }

    /// XOR an 8-pixel-wide sprite, one byte per row, MSB leftmost.
    /// Returns true if any lit pixel was switched off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, rows: &[u8]) -> bool {
        let mut collision = false;
        for (row, &bits) in rows.iter().enumerate() {
            collision |= self.xor_row(x as usize, y as usize + row, bits as u16, 8);
        }
        collision
    }

    /// XOR a 16×16 sprite, one big-endian word per row. Used by `Dxy0` in extended mode.
    pub fn draw_sprite16x16(&mut self, x: u8, y: u8, rows: &[u16; 16]) -> bool {
        let mut collision = false;
        for (row, &bits) in rows.iter().enumerate() {
            collision |= self.xor_row(x as usize, y as usize + row, bits, 16);
        }
        collision
    }

    fn xor_row(&mut self, x: usize, y: usize, bits: u16, width: usize) -> bool {
        let resolution = self.resolution;
        let grid = self.pixels_mut();
        let mut collision = false;
        for col in 0..width {
            if bits & (1 << (width - 1 - col)) == 0 {
                continue;
            }
            let i = resolution.index(x + col, y);
            if grid[i] == PIXEL_ON {
                collision = true;
                grid[i] = PIXEL_OFF;
            } else {
                grid[i] = PIXEL_ON;
            }
        }
        collision
    }

    /// Move the active grid down `n` rows; the top `n` rows come in blank.
    pub fn scroll_down(&mut self, n: usize) {
        let w = self.width();
        let h = self.height();
        let grid = self.pixels_mut();
        if n >= h {
            grid.fill(PIXEL_OFF);
            return;
        }
        grid.copy_within(0..(h - n) * w, n * w);
        grid[..n * w].fill(PIXEL_OFF);
    }

    /// Move every row of the active grid 4 pixels right.
    pub fn scroll_right4(&mut self) {
        let w = self.width();
        for row in self.pixels_mut().chunks_exact_mut(w) {
            row.copy_within(0..w - HORIZONTAL_SCROLL, HORIZONTAL_SCROLL);
            row[..HORIZONTAL_SCROLL].fill(PIXEL_OFF);
        }
    }

    /// Move every row of the active grid 4 pixels left.
    pub fn scroll_left4(&mut self) {
        let w = self.width();
        for row in self.pixels_mut().chunks_exact_mut(w) {
            row.copy_within(HORIZONTAL_SCROLL.., 0);
            row[w - HORIZONTAL_SCROLL..].fill(PIXEL_OFF);
        }
    }

    /// Copy of the active grid for the presentation side.
    pub fn snapshot(&self) -> Frame {
        Frame {
            resolution: self.resolution,
            pixels: self.pixels().to_vec(),
        }
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable picture of the active grid, published once per tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub resolution: Resolution,
    pub pixels: Vec<u8>,
}

impl Frame {
    pub fn width(&self) -> usize {
        self.resolution.width()
    }

    pub fn height(&self) -> usize {
        self.resolution.height()
    }

    /// Expand to 0xRRGGBB for window backends; `buffer` is resized to fit.
    pub fn to_rgb(&self, on: u32, off: u32, buffer: &mut Vec<u32>) {
        buffer.clear();
        buffer.extend(
            self.pixels
                .iter()
                .map(|&p| if p == PIXEL_ON { on } else { off }),
        );
    }

    /// Bordered text rendering, `0` for lit pixels.
    pub fn to_ascii(&self) -> String {
        let w = self.width();
        let rule = "-".repeat(w);
        let mut out = String::with_capacity((w + 3) * (self.height() + 2));
        out.push('/');
        out.push_str(&rule);
        out.push_str("\\\n");
        for row in self.pixels.chunks_exact(w) {
            out.push('|');
            out.extend(row.iter().map(|&p| if p == PIXEL_ON { '0' } else { ' ' }));
            out.push_str("|\n");
        }
        out.push('\\');
        out.push_str(&rule);
        out.push_str("/\n");
        out
    }
}
