//! Addressable store for the interpreter.
//!
//! A flat, zero-initialised byte array. Words are big-endian: the byte at the lower
//! address is the high-order byte, which is also how instructions are fetched.

use crate::error::{Error, Result};

/// Size of the store in the base machine.
pub const MEMORY_SIZE: usize = 0x1000;

/// Trait for the memory the CPU fetches from and stores into.
///
/// Every access is bounds-checked; multi-byte accesses are checked in full before
/// anything is written so a failing access never leaves a partial write behind.
pub trait Bus {
    /// Capacity in bytes.
    fn capacity(&self) -> usize;
    fn get8(&self, addr: u16) -> Result<u8>;
    fn set8(&mut self, addr: u16, data: u8) -> Result<()>;

    fn get16(&self, addr: u16) -> Result<u16> {
        self.check(addr as usize, 2)?;
        let hi = self.get8(addr)? as u16;
        let lo = self.get8(addr + 1)? as u16;
        Ok((hi << 8) | lo)
    }

    fn set16(&mut self, addr: u16, data: u16) -> Result<()> {
        self.check(addr as usize, 2)?;
        self.set8(addr, (data >> 8) as u8)?;
        self.set8(addr + 1, data as u8)
    }

    /// Copy `data` into the store starting at `offset`.
    fn load(&mut self, offset: usize, data: &[u8]) -> Result<()> {
        self.check(offset, data.len())?;
        for (i, byte) in data.iter().enumerate() {
            self.set8((offset + i) as u16, *byte)?;
        }
        Ok(())
    }

    /// Fill `buf` with the bytes starting at `addr`.
    fn read_into(&self, addr: u16, buf: &mut [u8]) -> Result<()> {
        self.check(addr as usize, buf.len())?;
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = self.get8(addr + i as u16)?;
        }
        Ok(())
    }

    /// Fails with the first offending address if `[start, start + len)` leaves the store.
    fn check(&self, start: usize, len: usize) -> Result<()> {
        let end = start + len;
        if end > self.capacity() {
            return Err(Error::OutOfRange {
                addr: start.max(self.capacity()),
            });
        }
        Ok(())
    }
}

/// The machine's 4 KiB of RAM.
pub struct Memory {
    bytes: Box<[u8; MEMORY_SIZE]>,
}

impl Memory {
    pub fn new() -> Self {
        Self {
            bytes: Box::new([0; MEMORY_SIZE]),
        }
    }

    /// Raw view of the whole store.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..]
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for Memory {
    fn capacity(&self) -> usize {
        MEMORY_SIZE
    }

    fn get8(&self, addr: u16) -> Result<u8> {
        self.bytes
            .get(addr as usize)
            .copied()
            .ok_or(Error::OutOfRange {
                addr: addr as usize,
            })
    }

    fn set8(&mut self, addr: u16, data: u8) -> Result<()> {
        match self.bytes.get_mut(addr as usize) {
            Some(byte) => {
                *byte = data;
                Ok(())
            }
            None => Err(Error::OutOfRange {
                addr: addr as usize,
            }),
        }
    }

    fn load(&mut self, offset: usize, data: &[u8]) -> Result<()> {
        self.check(offset, data.len())?;
        self.bytes[offset..offset + data.len()].copy_from_slice(data);
        Ok(())
    }

    fn read_into(&self, addr: u16, buf: &mut [u8]) -> Result<()> {
        let start = addr as usize;
        self.check(start, buf.len())?;
        buf.copy_from_slice(&self.bytes[start..start + buf.len()]);
        Ok(())
    }
}
