//! Built-in glyphs loaded below the program area.

use crate::{bus::Bus, error::Result};

/// Address of the 4×5 hex digit glyphs.
pub const SMALL_FONT_ADDR: u16 = 0x100;
/// Bytes per small glyph.
pub const SMALL_GLYPH_LEN: u16 = 5;
/// Address of the 8×10 SUPER-CHIP digit glyphs.
pub const BIG_FONT_ADDR: u16 = 0x150;
/// Bytes per big glyph.
pub const BIG_GLYPH_LEN: u16 = 10;

#[rustfmt::skip]
pub const SMALL_FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Digits 0-9 only; the slots for A-F stay zeroed.
#[rustfmt::skip]
pub const BIG_FONT: [u8; 100] = [
    0xFF, 0xFF, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xFF, 0xFF, // 0
    0x18, 0x78, 0x78, 0x18, 0x18, 0x18, 0x18, 0x18, 0xFF, 0xFF, // 1
    0xFF, 0xFF, 0x03, 0x03, 0xFF, 0xFF, 0xC0, 0xC0, 0xFF, 0xFF, // 2
    0xFF, 0xFF, 0x03, 0x03, 0xFF, 0xFF, 0x03, 0x03, 0xFF, 0xFF, // 3
    0xC3, 0xC3, 0xC3, 0xC3, 0xFF, 0xFF, 0x03, 0x03, 0x03, 0x03, // 4
    0xFF, 0xFF, 0xC0, 0xC0, 0xFF, 0xFF, 0x03, 0x03, 0xFF, 0xFF, // 5
    0xFF, 0xFF, 0xC0, 0xC0, 0xFF, 0xFF, 0xC3, 0xC3, 0xFF, 0xFF, // 6
    0xFF, 0xFF, 0x03, 0x03, 0x06, 0x0C, 0x18, 0x18, 0x18, 0x18, // 7
    0xFF, 0xFF, 0xC3, 0xC3, 0xFF, 0xFF, 0xC3, 0xC3, 0xFF, 0xFF, // 8
    0xFF, 0xFF, 0xC3, 0xC3, 0xFF, 0xFF, 0x03, 0x03, 0xFF, 0xFF, // 9
];

/// Write both glyph sets into memory.
pub fn load<B: Bus>(bus: &mut B) -> Result<()> {
    bus.load(SMALL_FONT_ADDR as usize, &SMALL_FONT)?;
    bus.load(BIG_FONT_ADDR as usize, &BIG_FONT)
}

/// Address of the small glyph for hex `digit`.
pub fn small_glyph(digit: u8) -> u16 {
    SMALL_FONT_ADDR + digit as u16 * SMALL_GLYPH_LEN
}

pub fn big_glyph(digit: u8) -> u16 {
    BIG_FONT_ADDR + digit as u16 * BIG_GLYPH_LEN
}
