//! Register file.

use crate::timer::Timers;

/// Where programs are loaded and where execution starts.
pub const PROGRAM_START: u16 = 0x200;

/// VF doubles as the carry / borrow / collision flag.
pub const FLAG: usize = 0xF;

/// Number of SUPER-CHIP RPL user flags (`Fx75` / `Fx85`).
pub const RPL_FLAGS: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Registers {
    pub pc: u16,
    /// Index register.
    pub i: u16,
    pub v: [u8; 16],
    /// Address of the current top of the call stack in memory; grows upward by 2.
    pub sp: u8,
    pub timers: Timers,
}

impl Default for Registers {
    fn default() -> Self {
        Self {
            pc: PROGRAM_START,
            i: 0,
            v: [0; 16],
            sp: 0,
            timers: Timers::default(),
        }
    }
}

impl Registers {
    pub fn set_flag(&mut self, set: bool) {
        self.v[FLAG] = set as u8;
    }
}
