//! Two-resolution monochrome framebuffer.
//!
//! A 64×32 standard grid and a 128×64 SUPER-CHIP extended grid live side by side; the
//! active [`Resolution`](framebuffer::Resolution) picks which one drawing, scrolling and
//! clearing address. One byte per pixel, 0 (off) or 0xFF (on). Hosts read an immutable
//! [`Frame`](framebuffer::Frame) taken at tick boundaries.

pub mod framebuffer;
