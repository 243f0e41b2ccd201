use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    bus::Bus,
    cpu::registers::{Registers, FLAG, RPL_FLAGS},
    display::framebuffer::Framebuffer,
    error::{Error, Result},
    font,
    keypad::Keypad,
};

/// What the host should do after an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// `00FD`: the program asked the interpreter to exit.
    Exit,
}

pub struct Cpu<B: Bus> {
    pub regs: Registers,
    pub bus: B,
    pub display: Framebuffer,
    /// SUPER-CHIP RPL user flags; survive [`Cpu::reset`].
    pub rpl: [u8; RPL_FLAGS],
    /// Print one line per instruction.
    pub trace: bool,
    rng: StdRng,
}

impl<B: Bus> Cpu<B> {
    pub fn new(bus: B) -> Self {
        Self::with_rng(bus, StdRng::from_entropy())
    }

    /// Deterministic `Cxkk` for replays and tests.
    pub fn with_seed(bus: B, seed: u64) -> Self {
        Self::with_rng(bus, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bus: B, rng: StdRng) -> Self {
        Self {
            regs: Registers::default(),
            bus,
            display: Framebuffer::new(),
            rpl: [0; RPL_FLAGS],
            trace: false,
            rng,
        }
    }

    /// Registers back to power-on values and both grids blanked. Memory is left alone.
    pub fn reset(&mut self) {
        self.regs = Registers::default();
        self.display.reset();
    }

    /// Fetch, advance PC, execute. On error the machine is left as it was before the
    /// fetch, PC included.
    pub fn step(&mut self, keypad: &Keypad) -> Result<Flow> {
        let pc = self.regs.pc;
        let opcode = self.bus.get16(pc)?;
        if self.trace {
            self.trace(pc, opcode);
        }
        self.regs.pc = pc.wrapping_add(2);
        let result = self.execute(opcode, keypad);
        if result.is_err() {
            self.regs.pc = pc;
        }
        result
    }

    fn trace(&self, pc: u16, opcode: u16) {
        let v: Vec<String> = self.regs.v.iter().map(|r| format!("{:02X}", r)).collect();
        println!(
            "{:04X}  {:04X}  V:{} I:{:04X} SP:{:02X} DT:{:02X} ST:{:02X}",
            pc,
            opcode,
            v.join(" "),
            self.regs.i,
            self.regs.sp,
            self.regs.timers.delay,
            self.regs.timers.sound
        );
    }

    fn execute(&mut self, opcode: u16, keypad: &Keypad) -> Result<Flow> {
        let x = ((opcode >> 8) & 0xF) as usize;
        let y = ((opcode >> 4) & 0xF) as usize;
        let n = (opcode & 0xF) as u8;
        let kk = opcode as u8;
        let nnn = opcode & 0x0FFF;

        match opcode >> 12 {
            0x0 => match opcode {
                0x00E0 => self.display.clear(),
                0x00EE => self.ret()?,
                0x00C0..=0x00CF => self.display.scroll_down(n as usize),
                0x00FB => self.display.scroll_right4(),
                0x00FC => self.display.scroll_left4(),
                0x00FD => return Ok(Flow::Exit),
                0x00FE => self.display.set_extended_mode(false),
                0x00FF => self.display.set_extended_mode(true),
                _ => return Err(self.invalid(opcode)),
            },
            0x1 => self.regs.pc = nnn,
            0x2 => self.call(nnn)?,
            0x3 => self.skip_if(self.regs.v[x] == kk),
            0x4 => self.skip_if(self.regs.v[x] != kk),
            0x5 if n == 0 => self.skip_if(self.regs.v[x] == self.regs.v[y]),
            0x6 => self.regs.v[x] = kk,
            0x7 => self.regs.v[x] = self.regs.v[x].wrapping_add(kk),
            0x8 => self.alu(opcode, x, y)?,
            0x9 if n == 0 => self.skip_if(self.regs.v[x] != self.regs.v[y]),
            0xA => self.regs.i = nnn,
            0xB => self.regs.pc = self.regs.v[0] as u16 + nnn,
            0xC => self.regs.v[x] = self.rng.r#gen::<u8>() & kk,
            0xD => self.draw(x, y, n)?,
            0xE => match kk {
                0x9E => self.skip_if(keypad.is_pressed(self.regs.v[x])),
                0xA1 => self.skip_if(!keypad.is_pressed(self.regs.v[x])),
                _ => return Err(self.invalid(opcode)),
            },
            0xF => self.misc(opcode, x, keypad)?,
            _ => return Err(self.invalid(opcode)),
        }
        Ok(Flow::Continue)
    }

    /// Built after PC has moved past the word, so the faulting address is 2 back.
    fn invalid(&self, opcode: u16) -> Error {
        Error::InvalidOpcode {
            opcode,
            pc: self.regs.pc.wrapping_sub(2),
        }
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.regs.pc = self.regs.pc.wrapping_add(2);
        }
    }

    fn call(&mut self, addr: u16) -> Result<()> {
        let sp = self.regs.sp.wrapping_add(2);
        self.bus.set16(sp as u16, self.regs.pc)?;
        self.regs.sp = sp;
        self.regs.pc = addr;
        Ok(())
    }

    fn ret(&mut self) -> Result<()> {
        self.regs.pc = self.bus.get16(self.regs.sp as u16)?;
        self.regs.sp = self.regs.sp.wrapping_sub(2);
        Ok(())
    }

    /// `8xy_`. Results go to Vx first and VF last, so VF holds the flag even when x is F.
    fn alu(&mut self, opcode: u16, x: usize, y: usize) -> Result<()> {
        let vx = self.regs.v[x];
        let vy = self.regs.v[y];
        match opcode & 0xF {
            0x0 => self.regs.v[x] = vy,
            0x1 => self.regs.v[x] = vx | vy,
            0x2 => self.regs.v[x] = vx & vy,
            0x3 => self.regs.v[x] = vx ^ vy,
            0x4 => {
                let (sum, carry) = vx.overflowing_add(vy);
                self.regs.v[x] = sum;
                self.regs.set_flag(carry);
            }
            0x5 => {
                self.regs.v[x] = vx.wrapping_sub(vy);
                self.regs.set_flag(vx >= vy);
            }
            0x6 => {
                self.regs.v[x] = vx >> 1;
                self.regs.set_flag(vx & 0x01 != 0);
            }
            0x7 => {
                self.regs.v[x] = vy.wrapping_sub(vx);
                self.regs.set_flag(vy >= vx);
            }
            0xE => {
                self.regs.v[x] = vx << 1;
                self.regs.set_flag(vx & 0x80 != 0);
            }
            _ => return Err(self.invalid(opcode)),
        }
        Ok(())
    }

    /// `Dxyn`. Sprite rows are read before anything is drawn so a bad I leaves the
    /// screen untouched.
    fn draw(&mut self, x: usize, y: usize, n: u8) -> Result<()> {
        let vx = self.regs.v[x];
        let vy = self.regs.v[y];
        let collision = if n == 0 && self.display.extended_mode() {
            let mut raw = [0u8; 32];
            self.bus.read_into(self.regs.i, &mut raw)?;
            let mut rows = [0u16; 16];
            for (row, pair) in rows.iter_mut().zip(raw.chunks_exact(2)) {
                *row = u16::from_be_bytes([pair[0], pair[1]]);
            }
            self.display.draw_sprite16x16(vx, vy, &rows)
        } else {
            let mut raw = [0u8; 15];
            let rows = &mut raw[..n as usize];
            self.bus.read_into(self.regs.i, rows)?;
            self.display.draw_sprite(vx, vy, rows)
        };
        self.regs.set_flag(collision);
        Ok(())
    }

    fn misc(&mut self, opcode: u16, x: usize, keypad: &Keypad) -> Result<()> {
        match opcode & 0xFF {
            0x07 => self.regs.v[x] = self.regs.timers.delay,
            0x0A => match keypad.first_pressed() {
                Some(key) => self.regs.v[x] = key,
                // Refetch this instruction next cycle.
                None => self.regs.pc = self.regs.pc.wrapping_sub(2),
            },
            0x15 => self.regs.timers.delay = self.regs.v[x],
            0x18 => self.regs.timers.sound = self.regs.v[x],
            0x1E => {
                let sum = self.regs.i as u32 + self.regs.v[x] as u32;
                self.regs.i = sum as u16;
                self.regs.set_flag(sum > 0xFFF);
            }
            0x29 => self.regs.i = font::small_glyph(self.regs.v[x]),
            0x30 => self.regs.i = font::big_glyph(self.regs.v[x]),
            0x33 => {
                let v = self.regs.v[x];
                self.bus
                    .load(self.regs.i as usize, &[v / 100, (v % 100) / 10, v % 10])?;
            }
            0x55 => self.bus.load(self.regs.i as usize, &self.regs.v[..=x])?,
            0x65 => {
                let mut buf = [0u8; 16];
                self.bus.read_into(self.regs.i, &mut buf[..=x])?;
                self.regs.v[..=x].copy_from_slice(&buf[..=x]);
            }
            0x75 => {
                let last = x.min(RPL_FLAGS - 1);
                self.rpl[..=last].copy_from_slice(&self.regs.v[..=last]);
            }
            0x85 => {
                let last = x.min(RPL_FLAGS - 1);
                self.regs.v[..=last].copy_from_slice(&self.rpl[..=last]);
            }
            _ => return Err(self.invalid(opcode)),
        }
        Ok(())
    }
}
