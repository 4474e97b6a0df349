use super::error::LoadError;

pub const MEM_SIZE: usize = 4096;
pub const PROGRAM_START: u16 = 0x200;
pub const MAX_PROGRAM_SIZE: usize = MEM_SIZE - PROGRAM_START as usize;
pub const FONT_START: u16 = 0x050;
pub const GLYPH_SIZE: u16 = 5;

/// Addresses are 12 bits wide.
const ADDRESS_MASK: u16 = 0x0FFF;

const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Wrap an address into the 12-bit address space.
pub fn mask_address(addr: u16) -> u16 {
    addr & ADDRESS_MASK
}

/// The 4KB address space.
///
/// ```text
/// 0x000-0x04F  unused
/// 0x050-0x09F  built in font, 16 glyphs of 5 bytes
/// 0x0A0-0x1FF  unused
/// 0x200-0xFFF  program image and work RAM
/// ```
pub struct Memory {
    bytes: [u8; MEM_SIZE],
}

impl Memory {
    /// Zeroed memory with the font loaded.
    pub fn new() -> Memory {
        let mut memory = Memory {
            bytes: [0; MEM_SIZE],
        };
        memory.reset();
        memory
    }

    /// Zero everything and reload the font.
    pub fn reset(&mut self) {
        self.bytes = [0; MEM_SIZE];
        let font_start = FONT_START as usize;
        self.bytes[font_start..font_start + FONT.len()].copy_from_slice(&FONT);
    }

    /// Copy a program to 0x200. Memory is left untouched if it does not fit.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadError> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(LoadError::TooLarge {
                size: program.len(),
                max_size: MAX_PROGRAM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[mask_address(addr) as usize]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[mask_address(addr) as usize] = value;
    }

    /// The two bytes of the instruction at `addr`.
    pub fn fetch(&self, addr: u16) -> (u8, u8) {
        (self.read(addr), self.read(addr.wrapping_add(1)))
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn font_is_loaded_at_font_region() {
        let memory = Memory::new();
        let font_start = FONT_START as usize;
        assert_eq!(&memory.as_slice()[font_start..font_start + 80], &FONT[..]);
        assert_eq!(memory.read(0x04F), 0);
        assert_eq!(memory.read(0x0A0), 0);
    }

    #[test]
    fn program_of_maximum_size_fills_memory_through_0xfff() {
        let mut memory = Memory::new();
        let program = vec![0xAB; MAX_PROGRAM_SIZE];
        memory.load_program(&program).unwrap();
        assert_eq!(memory.read(0x200), 0xAB);
        assert_eq!(memory.read(0xFFF), 0xAB);
    }

    #[test]
    fn program_one_byte_too_large_is_rejected() {
        let mut memory = Memory::new();
        let program = vec![0xAB; MAX_PROGRAM_SIZE + 1];
        match memory.load_program(&program) {
            Err(LoadError::TooLarge { size, max_size }) => {
                assert_eq!(size, 3585);
                assert_eq!(max_size, 3584);
            }
            other => panic!("expected TooLarge, got {:?}", other),
        }
        assert_eq!(memory.read(0x200), 0);
    }

    #[test]
    fn addresses_wrap_at_twelve_bits() {
        let mut memory = Memory::new();
        memory.write(0x1000, 0x42);
        assert_eq!(memory.read(0x000), 0x42);
        memory.write(0xFFF, 0x12);
        assert_eq!(memory.fetch(0xFFF), (0x12, 0x42));
    }

    #[test]
    fn reset_restores_font_and_clears_program() {
        let mut memory = Memory::new();
        memory.load_program(&[1, 2, 3]).unwrap();
        memory.write(FONT_START, 0);
        memory.reset();
        assert_eq!(memory.read(0x200), 0);
        assert_eq!(memory.read(FONT_START), 0xF0);
    }
}
