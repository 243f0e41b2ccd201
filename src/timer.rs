//! 60 Hz delay and sound timers.
//!
//! Both count down once per tick and stop at zero. The sound timer's only observable
//! effect is that a tone plays while it is non-zero; starting and stopping that tone is
//! left to the host (see [`crate::audio`]).

/// Nominal tick rate of both timers.
pub const TICK_RATE_HZ: u32 = 60;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timers {
    /// Delay timer (DT), read and written by `Fx07` / `Fx15`.
    pub delay: u8,
    /// Sound timer (ST), written by `Fx18`.
    pub sound: u8,
}

impl Timers {
    /// One tick: decrement whichever timers are still running.
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    /// True while the tone should be audible.
    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }
}
