use super::error::{EmulatorError, Result};

pub const NUM_KEYS: usize = 16;

/// Latch for the hexadecimal keypad, keys 0x0..=0xF.
/// The host presses and releases keys, instructions only read them.
#[derive(Debug, Clone, Default)]
pub struct Keypad {
    keys: [bool; NUM_KEYS],
}

impl Keypad {

    pub fn new() -> Keypad {
        Keypad::default()
    }

    pub fn set(&mut self, key: u8, pressed: bool) -> Result<()> {
        let slot = self
            .keys
            .get_mut(key as usize)
            .ok_or(EmulatorError::InvalidKey { key })?;
        *slot = pressed;
        Ok(())
    }

    pub fn is_pressed(&self, key: u8) -> Result<bool> {
        self.keys
            .get(key as usize)
            .copied()
            .ok_or(EmulatorError::InvalidKey { key })
    }

    /// The lowest key currently held down.
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|pressed| *pressed).map(|key| key as u8)
    }
}
