use std::fmt;

/// A raw 16-bit instruction word, with accessors for the
/// nibble and immediate fields CHIP-8 packs into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode(u16);

impl Opcode {
    /// Combine two bytes fetched from memory, most significant byte first.
    pub fn new(left: u8, right: u8) -> Opcode {
        Opcode(u16::from_be_bytes([left, right]))
    }

    pub fn as_u16(self) -> u16 {
        self.0
    }

    /// The four nibbles from most to least significant.
    pub fn as_four_u8(self) -> (u8, u8, u8, u8) {
        let [left, right] = self.0.to_be_bytes();
        (left >> 4, left & 0x0F, right >> 4, right & 0x0F)
    }

    /// The `NN` field.
    pub fn last_8_bits(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    /// The `NNN` field.
    pub fn last_12_bits(self) -> u16 {
        self.0 & 0x0FFF
    }
}

impl From<u16> for Opcode {
    fn from(value: u16) -> Opcode {
        Opcode(value)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_are_combined_big_endian() {
        assert_eq!(0x1234, Opcode::new(0x12, 0x34).as_u16());
        assert_eq!(0xFF00, Opcode::new(0xFF, 0x00).as_u16());
    }

    #[test]
    fn nibbles_are_split_in_order() {
        assert_eq!((0xA, 0xB, 0xC, 0xD), Opcode::from(0xABCD).as_four_u8());
        assert_eq!((0, 0, 0xE, 0), Opcode::from(0x00E0).as_four_u8());
    }

    #[test]
    fn immediates_are_masked_to_field_width() {
        let opcode = Opcode::from(0xABCD);
        assert_eq!(0xCD, opcode.last_8_bits());
        assert_eq!(0xBCD, opcode.last_12_bits());
    }

    #[test]
    fn displays_as_four_hex_digits() {
        assert_eq!("00EE", Opcode::from(0x00EE).to_string());
        assert_eq!("F265", Opcode::from(0xF265).to_string());
    }
}
