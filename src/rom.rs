//! Program images.
//!
//! A ROM is the raw bytes of a program: no header, no checksum, no length field. It is
//! copied as-is to 0x200 by [`crate::machine::Machine::load_program`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::Result;

pub struct Rom {
    pub data: Vec<u8>,
}

impl Rom {
    /// Read the whole file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut file = File::open(path)?;
        Self::read(&mut file)
    }

    /// Read everything the reader has.
    pub fn read(reader: &mut impl Read) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(Self { data })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
