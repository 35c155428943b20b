//! The 4 KiB address space, with the font preloaded at [`FONT_START`].

use super::error::{EmulatorError, Result};
use std::io::{self, Write};

pub const MEM_SIZE: usize = 4096;
pub const PROGRAM_START: u16 = 0x200;
pub const FONT_START: u16 = 0x050;
/// Each font glyph is five rows of one byte.
pub const GLYPH_SIZE: u16 = 5;

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

/// Flat byte-addressable memory.
/// Every access is bounds-checked and reports the offending address.
#[derive(Clone)]
pub struct Memory {
    cells: [u8; MEM_SIZE],
}

impl Memory {

    /// Create zeroed memory with the font loaded.
    pub fn new() -> Memory {
        let mut memory = Memory { cells: [0; MEM_SIZE] };
        memory.load_fontset();
        memory
    }

    fn load_fontset(&mut self) {
        let start = FONT_START as usize;
        self.cells[start..start + FONT.len()].copy_from_slice(&FONT);
    }

    /// Copy a program into memory at 0x200.
    /// Memory is left untouched if the program does not fit.
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        let start = PROGRAM_START as usize;
        let max_size = MEM_SIZE - start;
        if program.len() > max_size {
            return Err(EmulatorError::ProgramTooLarge { size: program.len(), max_size });
        }
        self.cells[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    pub fn read(&self, address: usize) -> Result<u8> {
        self.cells
            .get(address)
            .copied()
            .ok_or(EmulatorError::MemoryOutOfBounds { address })
    }

    /// Read the big-endian opcode stored at `address` and `address + 1`.
    pub fn read_u16(&self, address: usize) -> Result<u16> {
        let bytes = self.slice(address, 2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Borrow `len` bytes starting at `address`.
    pub fn slice(&self, address: usize, len: usize) -> Result<&[u8]> {
        self.check_range(address, len)?;
        Ok(&self.cells[address..address + len])
    }

    /// Write all of `data` starting at `address`, or nothing at all.
    pub fn write_all(&mut self, address: usize, data: &[u8]) -> Result<()> {
        self.check_range(address, data.len())?;
        self.cells[address..address + data.len()].copy_from_slice(data);
        Ok(())
    }

    fn check_range(&self, address: usize, len: usize) -> Result<()> {
        match address.checked_add(len) {
            Some(end) if end <= MEM_SIZE => Ok(()),
            // Report the first address that does not exist.
            _ => Err(EmulatorError::MemoryOutOfBounds { address: address.max(MEM_SIZE) }),
        }
    }

    /// Write a hex dump, 16 cells per line.
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in self.cells.chunks(16) {
            for cell in line {
                write!(out, "{:02X} ", cell)?;
            }
            writeln!(out)?;
        }
        out.flush()
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
    use proptest::prelude::*;

    #[test]
    fn font_is_loaded_at_font_start() {
        let memory = Memory::new();
        assert_eq!(memory.slice(0x050, 5).unwrap(), &[0xF0, 0x90, 0x90, 0x90, 0xF0]);
        assert_eq!(memory.slice(0x050 + 5 * 0xF, 5).unwrap(), &[0xF0, 0x80, 0xF0, 0x80, 0x80]);
        assert_eq!(memory.read(0x04F).unwrap(), 0);
        assert_eq!(memory.read(0x0A0).unwrap(), 0);
    }

    #[test]
    fn largest_program_fits() {
        let mut memory = Memory::new();
        let program = vec![0xAB; MEM_SIZE - 0x200];
        memory.load_program(&program).unwrap();
        assert_eq!(memory.read(MEM_SIZE - 1).unwrap(), 0xAB);
    }

    #[test]
    fn oversized_program_leaves_memory_untouched() {
        let mut memory = Memory::new();
        let program = vec![0xAB; MEM_SIZE - 0x200 + 1];
        match memory.load_program(&program) {
            Err(EmulatorError::ProgramTooLarge { size, max_size }) => {
                assert_eq!(size, 3585);
                assert_eq!(max_size, 3584);
            }
            other => panic!("expected ProgramTooLarge, got {:?}", other),
        }
        assert_eq!(memory.read(0x200).unwrap(), 0);
    }

    #[test]
    fn out_of_bounds_reads_are_errors() {
        let memory = Memory::new();
        assert!(memory.read(MEM_SIZE).is_err());
        assert!(memory.read_u16(MEM_SIZE - 1).is_err());
        assert!(memory.slice(MEM_SIZE - 2, 3).is_err());
        assert!(memory.slice(MEM_SIZE, 0).is_ok());
        assert!(memory.slice(0xFFFF, 0).is_err());
    }

    #[test]
    fn out_of_bounds_write_is_not_partial() {
        let mut memory = Memory::new();
        assert!(memory.write_all(MEM_SIZE - 2, &[1, 2, 3]).is_err());
        assert_eq!(memory.read(MEM_SIZE - 2).unwrap(), 0);
        assert_eq!(memory.read(MEM_SIZE - 1).unwrap(), 0);
    }

    #[test]
    fn opcodes_are_big_endian() {
        let mut memory = Memory::new();
        memory.load_program(&[0x6A, 0x3C]).unwrap();
        assert_eq!(memory.read_u16(0x200).unwrap(), 0x6A3C);
    }

    #[test]
    fn dump_has_sixteen_cells_per_line() {
        let memory = Memory::new();
        let mut out = Vec::new();
        memory.dump(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), MEM_SIZE / 16);
        assert_eq!(lines[0], "00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 ");
        assert_eq!(lines[5], "F0 90 90 90 F0 20 60 20 20 70 F0 10 F0 80 F0 F0 ");
    }

    proptest! {
        #[test]
        fn load_round_trips(program in proptest::collection::vec(any::<u8>(), 0..3584)) {
            let mut memory = Memory::new();
            memory.load_program(&program).unwrap();
            prop_assert_eq!(memory.slice(0x200, program.len()).unwrap(), &program[..]);
        }
    }
}
