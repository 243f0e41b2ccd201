//! chip8vm: a CHIP-8 and SUPER-CHIP interpreter written in Rust.
//!
//! Runs programs for the classic 64×32 CHIP-8 virtual machine and the SUPER-CHIP
//! extension (128×64 mode, scrolling, 16×16 sprites, big digit font, RPL flags).
//!
//! ## Modules
//!
//! - **audio** – sound timer tone: rodio sine wave or silence, toggled on edges
//! - **bus** – 4 KiB addressable store, big-endian words, bounds-checked
//! - **cpu** – register file and the fetch/decode/execute engine
//! - **display** – standard and extended pixel grids, sprites, scrolling, frame snapshots
//! - **error** – fatal run conditions
//! - **font** – 5-byte hex glyphs at 0x100, 10-byte digit glyphs at 0x150
//! - **keypad** – 16-key hex keypad state and the QWERTY layout
//! - **log** – coloured status lines
//! - **machine** – the assembled VM, configuration and the 60 Hz tick
//! - **rom** – reading program images
//! - **timer** – delay and sound timers

pub mod audio;
pub mod bus;
pub mod cpu;
pub mod display;
pub mod error;
pub mod font;
pub mod keypad;
pub mod log;
pub mod machine;
pub mod rom;
pub mod timer;
