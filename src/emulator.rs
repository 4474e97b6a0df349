//! The CHIP-8 virtual machine as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.
//!
//! [`Emulator`](emulator::Emulator) owns every piece of machine state.
//! The remaining modules hold the parts it is built from,
//! and the traits a frontend implements to drive it.

pub mod emulator;
pub mod error;
pub mod input;
pub mod instruction;
pub mod memory;
pub mod output;
pub mod timer;

pub use emulator::{Emulator, Frame, State};
pub use error::{Error, LoadError};
