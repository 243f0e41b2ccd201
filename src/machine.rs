//! The whole virtual machine and its tick loop.
//!
//! One [`Machine::tick`] is one 60 Hz frame: timers count down once, then a configurable
//! batch of instructions runs. Hosts sample [`Machine::frame`] between ticks, so the
//! picture they show is always the state at a tick boundary.

use crate::{
    bus::{Bus, Memory, MEMORY_SIZE},
    cpu::{
        cpu::{Cpu, Flow},
        registers::{Registers, PROGRAM_START},
    },
    display::framebuffer::{Frame, Framebuffer},
    error::{Error, Result},
    font,
    keypad::Keypad,
    log,
    timer::TICK_RATE_HZ,
};

/// Instructions executed per tick unless configured otherwise.
pub const DEFAULT_INSTRUCTIONS_PER_TICK: u32 = 10;

/// Timing knobs and debugging switches.
#[derive(Clone, Debug)]
pub struct Config {
    pub instructions_per_tick: u32,
    pub tick_rate_hz: u32,
    /// Print every executed instruction.
    pub trace: bool,
    /// Fixed seed for `Cxkk`; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            instructions_per_tick: DEFAULT_INSTRUCTIONS_PER_TICK,
            tick_rate_hz: TICK_RATE_HZ,
            trace: false,
            seed: None,
        }
    }
}

/// Result of a tick that did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    /// The program executed `00FD`; the host should shut down cleanly.
    Exited,
}

pub struct Machine {
    pub cpu: Cpu<Memory>,
    pub keypad: Keypad,
    pub config: Config,
    exited: bool,
}

impl Machine {
    /// Fresh machine with fonts loaded and nothing at the program address.
    pub fn new(config: Config) -> Result<Self> {
        let mut memory = Memory::new();
        font::load(&mut memory)?;
        let mut cpu = match config.seed {
            Some(seed) => Cpu::with_seed(memory, seed),
            None => Cpu::new(memory),
        };
        cpu.trace = config.trace;
        Ok(Self {
            cpu,
            keypad: Keypad::new(),
            config,
            exited: false,
        })
    }

    /// Copy a program image to 0x200.
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        let capacity = MEMORY_SIZE - PROGRAM_START as usize;
        if program.len() > capacity {
            return Err(Error::ProgramTooLarge {
                size: program.len(),
                capacity,
            });
        }
        self.cpu.bus.load(PROGRAM_START as usize, program)?;
        log::info(&format!(
            "Loaded {} bytes at {:#06X}",
            program.len(),
            PROGRAM_START
        ));
        Ok(())
    }

    /// Timers once, then up to `instructions_per_tick` instructions.
    pub fn tick(&mut self) -> Result<Status> {
        if self.exited {
            return Ok(Status::Exited);
        }
        self.cpu.regs.timers.tick();
        for _ in 0..self.config.instructions_per_tick {
            if self.step()? == Status::Exited {
                break;
            }
        }
        Ok(self.status())
    }

    /// A single instruction with no timer tick.
    pub fn step(&mut self) -> Result<Status> {
        if self.exited {
            return Ok(Status::Exited);
        }
        if self.cpu.step(&self.keypad)? == Flow::Exit {
            log::info("Program requested exit");
            self.exited = true;
        }
        Ok(self.status())
    }

    pub fn status(&self) -> Status {
        if self.exited {
            Status::Exited
        } else {
            Status::Running
        }
    }

    /// Registers to power-on state and the screen blanked; program, fonts and RPL flags stay.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.keypad.release_all();
        self.exited = false;
    }

    /// Snapshot of the active grid.
    pub fn frame(&self) -> Frame {
        self.cpu.display.snapshot()
    }

    pub fn display(&self) -> &Framebuffer {
        &self.cpu.display
    }

    pub fn registers(&self) -> &Registers {
        &self.cpu.regs
    }

    /// True while the sound timer is running; drives the host's tone.
    pub fn sound_active(&self) -> bool {
        self.cpu.regs.timers.sound_active()
    }
}
