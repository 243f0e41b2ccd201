//! CHIP-8 / SUPER-CHIP instruction engine.
//!
//! Fetches big-endian instruction words, decodes by nibble and executes against the
//! register file, a [`Bus`](crate::bus::Bus) and the framebuffer. Unknown words stop the
//! run with [`Error::InvalidOpcode`](crate::error::Error::InvalidOpcode).

pub mod cpu;
pub mod registers;

#[cfg(test)]
mod tests;
