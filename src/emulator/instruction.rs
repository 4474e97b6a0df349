use crate::util::opcode::Opcode;
use std::fmt;

/// A wrapper for addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A wrapper for registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

/// A wrapper for constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const(pub u8);

/// A single instruction from the CHIP-8 instruction set.
/// Two bytes written in hexadecimal, with the following special characters:
/// - NNN: address
/// - NN: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifier
/// - PC: Program counter
/// - I: 16 bit register for memory address
/// - VN: One of the 16 available variables (register identifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen, // 00E0
    Return, // 00EE
    Goto(Addr), // 1NNN
    Call(Addr), // 2NNN
    IfRegEqConst(Reg, Const), // 3XNN
    IfRegNeqConst(Reg, Const), // 4XNN
    IfRegEqReg(Reg, Reg), // 5XY0
    SetRegToConst(Reg, Const), // 6XNN
    IncRegByConst(Reg, Const), // 7XNN
    SetRegToReg(Reg, Reg), // 8XY0
    BitwiseOr(Reg, Reg), // 8XY1
    BitwiseAnd(Reg, Reg), // 8XY2
    BitwiseXor(Reg, Reg), // 8XY3
    IncRegByReg(Reg, Reg), // 8XY4
    DecRegByReg(Reg, Reg), // 8XY5
    BitshiftRight(Reg), // 8XY6
    SetVxVyMinusVx(Reg, Reg), // 8XY7
    BitshiftLeft(Reg), // 8XYE
    IfRegNeqReg(Reg, Reg), // 9XY0
    SetI(Addr), // ANNN
    SetPcToV0PlusAddr(Addr), // BNNN
    SetVxRand(Reg, Const), // CXNN
    Draw(Reg, Reg, Const), // DXYN
    IfKeyEqVx(Reg), // EX9E
    IfKeyNeqVx(Reg), // EXA1
    SetRegToDelayTimer(Reg), // FX07
    SetRegToGetKey(Reg), // FX0A
    SetDelayTimerToReg(Reg), // FX15
    SetSoundTimerToReg(Reg), // FX18
    AddRegToI(Reg), // FX1E
    SetIToSpriteAddrVx(Reg), // FX29
    SetIToBcdOfReg(Reg), // FX33
    RegDump(Reg), // FX55
    RegLoad(Reg) // FX65
}

impl Instruction {

    /// Decode an instruction word, or `None` if it is not one of the 35 opcodes.
    pub fn from_u16(value: u16) -> Option<Instruction> {
        Instruction::decode(Opcode::from(value))
    }

    pub fn from_two_u8(left: u8, right: u8) -> Option<Instruction> {
        Instruction::decode(Opcode::new(left, right))
    }

    fn decode(opcode: Opcode) -> Option<Instruction> {
        let nnn = Addr(opcode.last_12_bits());
        let nn = Const(opcode.last_8_bits());
        let instruction = match opcode.as_four_u8() {
            (0, 0, 0xE, 0) => Instruction::ClearScreen,
            (0, 0, 0xE, 0xE) => Instruction::Return,
            (1, _, _, _) => Instruction::Goto(nnn),
            (2, _, _, _) => Instruction::Call(nnn),
            (3, x, _, _) => Instruction::IfRegEqConst(Reg(x), nn),
            (4, x, _, _) => Instruction::IfRegNeqConst(Reg(x), nn),
            (5, x, y, 0) => Instruction::IfRegEqReg(Reg(x), Reg(y)),
            (6, x, _, _) => Instruction::SetRegToConst(Reg(x), nn),
            (7, x, _, _) => Instruction::IncRegByConst(Reg(x), nn),
            (8, x, y, 0) => Instruction::SetRegToReg(Reg(x), Reg(y)),
            (8, x, y, 1) => Instruction::BitwiseOr(Reg(x), Reg(y)),
            (8, x, y, 2) => Instruction::BitwiseAnd(Reg(x), Reg(y)),
            (8, x, y, 3) => Instruction::BitwiseXor(Reg(x), Reg(y)),
            (8, x, y, 4) => Instruction::IncRegByReg(Reg(x), Reg(y)),
            (8, x, y, 5) => Instruction::DecRegByReg(Reg(x), Reg(y)),
            (8, x, _, 6) => Instruction::BitshiftRight(Reg(x)),
            (8, x, y, 7) => Instruction::SetVxVyMinusVx(Reg(x), Reg(y)),
            (8, x, _, 0xE) => Instruction::BitshiftLeft(Reg(x)),
            (9, x, y, 0) => Instruction::IfRegNeqReg(Reg(x), Reg(y)),
            (0xA, _, _, _) => Instruction::SetI(nnn),
            (0xB, _, _, _) => Instruction::SetPcToV0PlusAddr(nnn),
            (0xC, x, _, _) => Instruction::SetVxRand(Reg(x), nn),
            (0xD, x, y, n) => Instruction::Draw(Reg(x), Reg(y), Const(n)),
            (0xE, x, 9, 0xE) => Instruction::IfKeyEqVx(Reg(x)),
            (0xE, x, 0xA, 1) => Instruction::IfKeyNeqVx(Reg(x)),
            (0xF, x, 0, 7) => Instruction::SetRegToDelayTimer(Reg(x)),
            (0xF, x, 0, 0xA) => Instruction::SetRegToGetKey(Reg(x)),
            (0xF, x, 1, 5) => Instruction::SetDelayTimerToReg(Reg(x)),
            (0xF, x, 1, 8) => Instruction::SetSoundTimerToReg(Reg(x)),
            (0xF, x, 1, 0xE) => Instruction::AddRegToI(Reg(x)),
            (0xF, x, 2, 9) => Instruction::SetIToSpriteAddrVx(Reg(x)),
            (0xF, x, 3, 3) => Instruction::SetIToBcdOfReg(Reg(x)),
            (0xF, x, 5, 5) => Instruction::RegDump(Reg(x)),
            (0xF, x, 6, 5) => Instruction::RegLoad(Reg(x)),
            _ => return None,
        };
        Some(instruction)
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V{:X}", self.0)
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#05X}", self.0)
    }
}

impl fmt::Display for Const {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04X}", self.0)
    }
}

/// Disassembly in the usual assembler mnemonics.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match self {
            ClearScreen => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Goto(addr) => write!(f, "JP {}", addr),
            Call(addr) => write!(f, "CALL {}", addr),
            IfRegEqConst(x, n) => write!(f, "SE {}, {}", x, n),
            IfRegNeqConst(x, n) => write!(f, "SNE {}, {}", x, n),
            IfRegEqReg(x, y) => write!(f, "SE {}, {}", x, y),
            SetRegToConst(x, n) => write!(f, "LD {}, {}", x, n),
            IncRegByConst(x, n) => write!(f, "ADD {}, {}", x, n),
            SetRegToReg(x, y) => write!(f, "LD {}, {}", x, y),
            BitwiseOr(x, y) => write!(f, "OR {}, {}", x, y),
            BitwiseAnd(x, y) => write!(f, "AND {}, {}", x, y),
            BitwiseXor(x, y) => write!(f, "XOR {}, {}", x, y),
            IncRegByReg(x, y) => write!(f, "ADD {}, {}", x, y),
            DecRegByReg(x, y) => write!(f, "SUB {}, {}", x, y),
            BitshiftRight(x) => write!(f, "SHR {}", x),
            SetVxVyMinusVx(x, y) => write!(f, "SUBN {}, {}", x, y),
            BitshiftLeft(x) => write!(f, "SHL {}", x),
            IfRegNeqReg(x, y) => write!(f, "SNE {}, {}", x, y),
            SetI(addr) => write!(f, "LD I, {}", addr),
            SetPcToV0PlusAddr(addr) => write!(f, "JP V0, {}", addr),
            SetVxRand(x, n) => write!(f, "RND {}, {}", x, n),
            Draw(x, y, Const(n)) => write!(f, "DRW {}, {}, {}", x, y, n),
            IfKeyEqVx(x) => write!(f, "SKP {}", x),
            IfKeyNeqVx(x) => write!(f, "SKNP {}", x),
            SetRegToDelayTimer(x) => write!(f, "LD {}, DT", x),
            SetRegToGetKey(x) => write!(f, "LD {}, K", x),
            SetDelayTimerToReg(x) => write!(f, "LD DT, {}", x),
            SetSoundTimerToReg(x) => write!(f, "LD ST, {}", x),
            AddRegToI(x) => write!(f, "ADD I, {}", x),
            SetIToSpriteAddrVx(x) => write!(f, "LD F, {}", x),
            SetIToBcdOfReg(x) => write!(f, "LD B, {}", x),
            RegDump(x) => write!(f, "LD [I], {}", x),
            RegLoad(x) => write!(f, "LD {}, [I]", x),
        }
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use test_case::test_case;

    #[test]
    fn opcodes_are_parsed_correctly() {
        let parse = |value| Instruction::from_u16(value).unwrap();
        assert_eq!(Instruction::ClearScreen, parse(0x00E0));
        assert_eq!(Instruction::Return, parse(0x00EE));
        assert_eq!(Instruction::Goto(Addr(0x25)), parse(0x1025));
        assert_eq!(Instruction::Call(Addr(0x37)), parse(0x2037));
        assert_eq!(Instruction::IfRegEqConst(Reg(0xA), Const(8)), parse(0x3A08));
        assert_eq!(Instruction::IfRegNeqConst(Reg(0xA), Const(8)), parse(0x4A08));
        assert_eq!(Instruction::IfRegEqReg(Reg(0xA), Reg(0xB)), parse(0x5AB0));
        assert_eq!(Instruction::SetRegToConst(Reg(0xB), Const(0x23)), parse(0x6B23));
        assert_eq!(Instruction::IncRegByConst(Reg(0xC), Const(0xA1)), parse(0x7CA1));
        assert_eq!(Instruction::SetRegToReg(Reg(0xA), Reg(0xB)), parse(0x8AB0));
        assert_eq!(Instruction::BitwiseOr(Reg(0xD), Reg(0xE)), parse(0x8DE1));
        assert_eq!(Instruction::BitwiseAnd(Reg(0xD), Reg(0xE)), parse(0x8DE2));
        assert_eq!(Instruction::BitwiseXor(Reg(0xD), Reg(0xE)), parse(0x8DE3));
        assert_eq!(Instruction::IncRegByReg(Reg(0xA), Reg(0xB)), parse(0x8AB4));
        assert_eq!(Instruction::DecRegByReg(Reg(0xA), Reg(0xB)), parse(0x8AB5));
        assert_eq!(Instruction::BitshiftRight(Reg(0xA)), parse(0x8AB6));
        assert_eq!(Instruction::SetVxVyMinusVx(Reg(0xA), Reg(0xB)), parse(0x8AB7));
        assert_eq!(Instruction::BitshiftLeft(Reg(0xA)), parse(0x8A0E));
        assert_eq!(Instruction::IfRegNeqReg(Reg(0xA), Reg(0xB)), parse(0x9AB0));
        assert_eq!(Instruction::SetI(Addr(0x25)), parse(0xA025));
        assert_eq!(Instruction::SetPcToV0PlusAddr(Addr(0x25)), parse(0xB025));
        assert_eq!(Instruction::SetVxRand(Reg(0xA), Const(0x23)), parse(0xCA23));
        assert_eq!(Instruction::Draw(Reg(0xA), Reg(0xB), Const(0xC)), parse(0xDABC));
        assert_eq!(Instruction::IfKeyEqVx(Reg(0xA)), parse(0xEA9E));
        assert_eq!(Instruction::IfKeyNeqVx(Reg(0xA)), parse(0xEAA1));
        assert_eq!(Instruction::SetRegToDelayTimer(Reg(0xA)), parse(0xFA07));
        assert_eq!(Instruction::SetRegToGetKey(Reg(0xA)), parse(0xFA0A));
        assert_eq!(Instruction::SetDelayTimerToReg(Reg(0xA)), parse(0xFA15));
        assert_eq!(Instruction::SetSoundTimerToReg(Reg(0xA)), parse(0xFA18));
        assert_eq!(Instruction::AddRegToI(Reg(0xA)), parse(0xFA1E));
        assert_eq!(Instruction::SetIToSpriteAddrVx(Reg(0xA)), parse(0xFA29));
        assert_eq!(Instruction::SetIToBcdOfReg(Reg(0xA)), parse(0xFA33));
        assert_eq!(Instruction::RegDump(Reg(0xA)), parse(0xFA55));
        assert_eq!(Instruction::RegLoad(Reg(0xA)), parse(0xFA65));
    }

    #[test]
    fn from_two_u8_equals_from_u16() {
        assert_eq!(Instruction::from_two_u8(0x12, 0x34), Instruction::from_u16(0x1234));
        assert_eq!(Instruction::from_two_u8(0x2F, 0x2F), Instruction::from_u16(0x2F2F));
        assert_eq!(Instruction::from_two_u8(0x10, 0x20), Instruction::from_u16(0x1020));
    }

    #[test_case(0x0000 ; "machine code routine zero")]
    #[test_case(0x0123 ; "machine code routine")]
    #[test_case(0x00E1 ; "near clear screen")]
    #[test_case(0x5AB1 ; "register skip with nonzero low nibble")]
    #[test_case(0x8AB8 ; "unused arithmetic")]
    #[test_case(0x9AB1 ; "register skip not equal with nonzero low nibble")]
    #[test_case(0xEA9F ; "unused key operation")]
    #[test_case(0xFA00 ; "unused misc operation")]
    #[test_case(0xFFFF ; "all ones")]
    fn unknown_opcodes_are_rejected(value: u16) {
        assert_eq!(Instruction::from_u16(value), None);
    }

    #[test_case(0x00E0 => "CLS" ; "clear")]
    #[test_case(0x2ABC => "CALL 0xABC" ; "call")]
    #[test_case(0x3A08 => "SE VA, 0x08" ; "skip equal constant")]
    #[test_case(0x8AB7 => "SUBN VA, VB" ; "reverse subtract")]
    #[test_case(0xB025 => "JP V0, 0x025" ; "jump offset")]
    #[test_case(0xD125 => "DRW V1, V2, 5" ; "draw")]
    #[test_case(0xF30A => "LD V3, K" ; "wait for key")]
    #[test_case(0xF265 => "LD V2, [I]" ; "load registers")]
    fn disassembles(value: u16) -> String {
        Instruction::from_u16(value).unwrap().to_string()
    }
}
