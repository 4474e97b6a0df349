//! Small helpers shared by the emulator modules.

pub mod opcode;
