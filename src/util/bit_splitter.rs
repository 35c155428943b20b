/// A structure for splitting an opcode into the fields
/// the instruction set addresses: nibbles, the low byte
/// and the low 12 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitSplitter(u8, u8);

impl BitSplitter {

    pub fn from_u16(value: u16) -> BitSplitter {
        BitSplitter((value >> 8) as u8, (value & 0x00FF) as u8)
    }

    /// Build from the two bytes of an opcode, most significant first.
    pub fn new(left: u8, right: u8) -> BitSplitter {
        BitSplitter(left, right)
    }

    /// Left-shift the first u8-component 8 bits,
    /// then take bitwise or with the second component.
    pub fn as_u16(&self) -> u16 {
        ((self.0 as u16) << 8) | self.1 as u16
    }

    /// The four nibbles, most significant first.
    pub fn as_four_u8(&self) -> (u8, u8, u8, u8) {
        (self.0 >> 4, self.0 & 0x0F, self.1 >> 4, self.1 & 0x0F)
    }

    /// Bits 8-11, the `x` register operand.
    pub fn x(&self) -> u8 {
        self.0 & 0x0F
    }

    /// Bits 4-7, the `y` register operand.
    pub fn y(&self) -> u8 {
        self.1 >> 4
    }

    /// Bits 0-3, the `n` immediate.
    pub fn n(&self) -> u8 {
        self.1 & 0x0F
    }

    pub fn last_8_bits(&self) -> u8 {
        self.1
    }

    pub fn last_12_bits(&self) -> u16 {
        self.as_u16() & 0x0FFF
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_equals_from_u16() {
        assert_eq!(BitSplitter::new(0x12, 0x34), BitSplitter::from_u16(0x1234));
        assert_eq!(BitSplitter::new(0xF0, 0x0F).as_u16(), 0xF00F);
    }

    #[test]
    fn nibbles_are_split_in_order() {
        let op = BitSplitter::from_u16(0xABCD);
        assert_eq!(op.as_four_u8(), (0xA, 0xB, 0xC, 0xD));
        assert_eq!(op.x(), 0xB);
        assert_eq!(op.y(), 0xC);
        assert_eq!(op.n(), 0xD);
    }

    #[test]
    fn immediates() {
        let op = BitSplitter::from_u16(0xABCD);
        assert_eq!(op.last_8_bits(), 0xCD);
        assert_eq!(op.last_12_bits(), 0xBCD);
    }
}
