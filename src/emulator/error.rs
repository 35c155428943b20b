use thiserror::Error;

/// Everything that can go wrong while loading or running a program.
///
/// An instruction that fails has no effect on the machine,
/// so the host may inspect the state and decide whether to continue.
#[derive(Debug, Error)]
pub enum EmulatorError {
    #[error("program is too large ({size} bytes), at most {max_size} bytes fit in memory")]
    ProgramTooLarge { size: usize, max_size: usize },

    #[error("memory access out of bounds at address {address:#06X}")]
    MemoryOutOfBounds { address: usize },

    #[error("call at {pc:#06X} exceeds the maximum nesting depth of {depth}")]
    StackOverflow { pc: u16, depth: usize },

    #[error("return at {pc:#06X} with an empty call stack")]
    StackUnderflow { pc: u16 },

    #[error("key {key:#04X} is outside the keypad range 0x0..=0xF")]
    InvalidKey { key: u8 },

    #[error("could not read program: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EmulatorError>;
