use std::io;
use std::path::PathBuf;

/// Failure to get a program into memory.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not read ROM {path:?}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    TooLarge { size: usize, max_size: usize },
}

/// Conditions that end a run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown opcode {opcode:#06X} at address {address:#05X}")]
    UnknownOpcode { opcode: u16, address: u16 },

    #[error("stack overflow: subroutine call at {address:#05X} exceeds 16 levels of nesting")]
    StackOverflow { address: u16 },

    #[error("stack underflow: return at {address:#05X} with an empty call stack")]
    StackUnderflow { address: u16 },

    #[error("input or output device failed")]
    Device(#[from] io::Error),
}
