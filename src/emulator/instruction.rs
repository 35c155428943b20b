use crate::util::bit_splitter::BitSplitter;
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
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen, // 00E0
    Return, // 00EE
    Sys(Addr), // 0NNN
    Goto(Addr), // 1NNN
    Call(Addr), // 2NNN
    SkipIfRegEqConst(Reg, Const), // 3XNN
    SkipIfRegNeqConst(Reg, Const), // 4XNN
    SkipIfRegEqReg(Reg, Reg), // 5XY0
    SetRegToConst(Reg, Const), // 6XNN
    IncRegByConst(Reg, Const), // 7XNN
    SetRegToReg(Reg, Reg), // 8XY0
    BitwiseOr(Reg, Reg), // 8XY1
    BitwiseAnd(Reg, Reg), // 8XY2
    BitwiseXor(Reg, Reg), // 8XY3
    IncRegByReg(Reg, Reg), // 8XY4
    DecRegByReg(Reg, Reg), // 8XY5
    ShiftRight(Reg, Reg), // 8XY6
    DecRegByRegNegated(Reg, Reg), // 8XY7
    ShiftLeft(Reg, Reg), // 8XYE
    SkipIfRegNeqReg(Reg, Reg), // 9XY0
    SetI(Addr), // ANNN
    GotoPlusV0(Addr), // BNNN
    SetRegToRandom(Reg, Const), // CXNN
    Draw(Reg, Reg, Const), // DXYN
    SkipIfKeyPressed(Reg), // EX9E
    SkipIfKeyNotPressed(Reg), // EXA1
    SetRegToDelayTimer(Reg), // FX07
    WaitForKey(Reg), // FX0A
    SetDelayTimerToReg(Reg), // FX15
    SetSoundTimerToReg(Reg), // FX18
    AddRegToI(Reg), // FX1E
    SetIToGlyph(Reg), // FX29
    StoreBcd(Reg), // FX33
    RegDump(Reg), // FX55
    RegLoad(Reg), // FX65
    /// Anything the table does not recognise. Executing it does nothing,
    /// not even advancing the program counter.
    Unknown(u16),
}

/// One row of the decode table: an opcode matches when `opcode & mask == pattern`.
struct Pattern {
    mask: u16,
    pattern: u16,
    build: fn(BitSplitter) -> Instruction,
}

/// The decode table, searched top to bottom. Order matters:
/// `00E0` and `00EE` must come before the catch-all `0NNN`.
static PATTERNS: [Pattern; 35] = [
    Pattern { mask: 0xFFFF, pattern: 0x00E0, build: |_| Instruction::ClearScreen },
    Pattern { mask: 0xFFFF, pattern: 0x00EE, build: |_| Instruction::Return },
    Pattern { mask: 0xF000, pattern: 0x0000, build: |op| Instruction::Sys(addr(op)) },
    Pattern { mask: 0xF000, pattern: 0x1000, build: |op| Instruction::Goto(addr(op)) },
    Pattern { mask: 0xF000, pattern: 0x2000, build: |op| Instruction::Call(addr(op)) },
    Pattern { mask: 0xF000, pattern: 0x3000, build: |op| Instruction::SkipIfRegEqConst(x(op), nn(op)) },
    Pattern { mask: 0xF000, pattern: 0x4000, build: |op| Instruction::SkipIfRegNeqConst(x(op), nn(op)) },
    Pattern { mask: 0xF000, pattern: 0x5000, build: |op| Instruction::SkipIfRegEqReg(x(op), y(op)) },
    Pattern { mask: 0xF000, pattern: 0x6000, build: |op| Instruction::SetRegToConst(x(op), nn(op)) },
    Pattern { mask: 0xF000, pattern: 0x7000, build: |op| Instruction::IncRegByConst(x(op), nn(op)) },
    Pattern { mask: 0xF00F, pattern: 0x8000, build: |op| Instruction::SetRegToReg(x(op), y(op)) },
    Pattern { mask: 0xF00F, pattern: 0x8001, build: |op| Instruction::BitwiseOr(x(op), y(op)) },
    Pattern { mask: 0xF00F, pattern: 0x8002, build: |op| Instruction::BitwiseAnd(x(op), y(op)) },
    Pattern { mask: 0xF00F, pattern: 0x8003, build: |op| Instruction::BitwiseXor(x(op), y(op)) },
    Pattern { mask: 0xF00F, pattern: 0x8004, build: |op| Instruction::IncRegByReg(x(op), y(op)) },
    Pattern { mask: 0xF00F, pattern: 0x8005, build: |op| Instruction::DecRegByReg(x(op), y(op)) },
    Pattern { mask: 0xF00F, pattern: 0x8006, build: |op| Instruction::ShiftRight(x(op), y(op)) },
    Pattern { mask: 0xF00F, pattern: 0x8007, build: |op| Instruction::DecRegByRegNegated(x(op), y(op)) },
    Pattern { mask: 0xF00F, pattern: 0x800E, build: |op| Instruction::ShiftLeft(x(op), y(op)) },
    Pattern { mask: 0xF000, pattern: 0x9000, build: |op| Instruction::SkipIfRegNeqReg(x(op), y(op)) },
    Pattern { mask: 0xF000, pattern: 0xA000, build: |op| Instruction::SetI(addr(op)) },
    Pattern { mask: 0xF000, pattern: 0xB000, build: |op| Instruction::GotoPlusV0(addr(op)) },
    Pattern { mask: 0xF000, pattern: 0xC000, build: |op| Instruction::SetRegToRandom(x(op), nn(op)) },
    Pattern { mask: 0xF000, pattern: 0xD000, build: |op| Instruction::Draw(x(op), y(op), Const(op.n())) },
    Pattern { mask: 0xF0FF, pattern: 0xE09E, build: |op| Instruction::SkipIfKeyPressed(x(op)) },
    Pattern { mask: 0xF0FF, pattern: 0xE0A1, build: |op| Instruction::SkipIfKeyNotPressed(x(op)) },
    Pattern { mask: 0xF0FF, pattern: 0xF007, build: |op| Instruction::SetRegToDelayTimer(x(op)) },
    Pattern { mask: 0xF0FF, pattern: 0xF00A, build: |op| Instruction::WaitForKey(x(op)) },
    Pattern { mask: 0xF0FF, pattern: 0xF015, build: |op| Instruction::SetDelayTimerToReg(x(op)) },
    Pattern { mask: 0xF0FF, pattern: 0xF018, build: |op| Instruction::SetSoundTimerToReg(x(op)) },
    Pattern { mask: 0xF0FF, pattern: 0xF01E, build: |op| Instruction::AddRegToI(x(op)) },
    Pattern { mask: 0xF0FF, pattern: 0xF029, build: |op| Instruction::SetIToGlyph(x(op)) },
    Pattern { mask: 0xF0FF, pattern: 0xF033, build: |op| Instruction::StoreBcd(x(op)) },
    Pattern { mask: 0xF0FF, pattern: 0xF055, build: |op| Instruction::RegDump(x(op)) },
    Pattern { mask: 0xF0FF, pattern: 0xF065, build: |op| Instruction::RegLoad(x(op)) },
];

fn addr(op: BitSplitter) -> Addr {
    Addr(op.last_12_bits())
}

fn x(op: BitSplitter) -> Reg {
    Reg(op.x())
}

fn y(op: BitSplitter) -> Reg {
    Reg(op.y())
}

fn nn(op: BitSplitter) -> Const {
    Const(op.last_8_bits())
}

impl Instruction {

    /// Decode an opcode. The first matching table row wins.
    pub fn decode(opcode: u16) -> Instruction {
        PATTERNS
            .iter()
            .find(|p| opcode & p.mask == p.pattern)
            .map(|p| (p.build)(BitSplitter::from_u16(opcode)))
            .unwrap_or(Instruction::Unknown(opcode))
    }

    /// Decode the two bytes of an opcode, most significant first.
    pub fn from_two_u8(left: u8, right: u8) -> Instruction {
        Instruction::decode(BitSplitter::new(left, right).as_u16())
    }
}

/// Disassembly in the usual mnemonic notation.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match *self {
            ClearScreen => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Sys(Addr(a)) => write!(f, "SYS {:#05X}", a),
            Goto(Addr(a)) => write!(f, "JP {:#05X}", a),
            Call(Addr(a)) => write!(f, "CALL {:#05X}", a),
            SkipIfRegEqConst(Reg(x), Const(n)) => write!(f, "SE V{:X}, {:#04X}", x, n),
            SkipIfRegNeqConst(Reg(x), Const(n)) => write!(f, "SNE V{:X}, {:#04X}", x, n),
            SkipIfRegEqReg(Reg(x), Reg(y)) => write!(f, "SE V{:X}, V{:X}", x, y),
            SetRegToConst(Reg(x), Const(n)) => write!(f, "LD V{:X}, {:#04X}", x, n),
            IncRegByConst(Reg(x), Const(n)) => write!(f, "ADD V{:X}, {:#04X}", x, n),
            SetRegToReg(Reg(x), Reg(y)) => write!(f, "LD V{:X}, V{:X}", x, y),
            BitwiseOr(Reg(x), Reg(y)) => write!(f, "OR V{:X}, V{:X}", x, y),
            BitwiseAnd(Reg(x), Reg(y)) => write!(f, "AND V{:X}, V{:X}", x, y),
            BitwiseXor(Reg(x), Reg(y)) => write!(f, "XOR V{:X}, V{:X}", x, y),
            IncRegByReg(Reg(x), Reg(y)) => write!(f, "ADD V{:X}, V{:X}", x, y),
            DecRegByReg(Reg(x), Reg(y)) => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight(Reg(x), Reg(y)) => write!(f, "SHR V{:X}, V{:X}", x, y),
            DecRegByRegNegated(Reg(x), Reg(y)) => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft(Reg(x), Reg(y)) => write!(f, "SHL V{:X}, V{:X}", x, y),
            SkipIfRegNeqReg(Reg(x), Reg(y)) => write!(f, "SNE V{:X}, V{:X}", x, y),
            SetI(Addr(a)) => write!(f, "LD I, {:#05X}", a),
            GotoPlusV0(Addr(a)) => write!(f, "JP V0, {:#05X}", a),
            SetRegToRandom(Reg(x), Const(n)) => write!(f, "RND V{:X}, {:#04X}", x, n),
            Draw(Reg(x), Reg(y), Const(n)) => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipIfKeyPressed(Reg(x)) => write!(f, "SKP V{:X}", x),
            SkipIfKeyNotPressed(Reg(x)) => write!(f, "SKNP V{:X}", x),
            SetRegToDelayTimer(Reg(x)) => write!(f, "LD V{:X}, DT", x),
            WaitForKey(Reg(x)) => write!(f, "LD V{:X}, K", x),
            SetDelayTimerToReg(Reg(x)) => write!(f, "LD DT, V{:X}", x),
            SetSoundTimerToReg(Reg(x)) => write!(f, "LD ST, V{:X}", x),
            AddRegToI(Reg(x)) => write!(f, "ADD I, V{:X}", x),
            SetIToGlyph(Reg(x)) => write!(f, "LD F, V{:X}", x),
            StoreBcd(Reg(x)) => write!(f, "LD B, V{:X}", x),
            RegDump(Reg(x)) => write!(f, "LD [I], V{:X}", x),
            RegLoad(Reg(x)) => write!(f, "LD V{:X}, [I]", x),
            Unknown(op) => write!(f, "UNKNOWN {:#06X}", op),
        }
    }
}
