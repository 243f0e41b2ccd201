//! Fatal conditions reported by the virtual machine.
//!
//! None of these are recoverable mid-instruction: an opcode either completes or leaves
//! the machine untouched, and the host decides whether to stop or show a diagnostic.

use thiserror::Error;

/// Every way a run can fail. The clean `00FD` exit is not an error; see
/// [`crate::machine::Status`].
#[derive(Debug, Error)]
pub enum Error {
    /// Store or word access beyond the end of memory.
    #[error("memory access out of range at address {addr:#06X}")]
    OutOfRange { addr: usize },

    /// An instruction word that matches no documented pattern.
    #[error("invalid opcode {opcode:#06X} at {pc:#06X}")]
    InvalidOpcode { opcode: u16, pc: u16 },

    /// The program does not fit between the load address and the end of memory.
    #[error("program is {size} bytes but only {capacity} bytes are available")]
    ProgramTooLarge { size: usize, capacity: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
