use super::error::{EmulatorError, Result};

pub const STACK_SIZE: usize = 16;

/// The call stack of return addresses.
#[derive(Debug, Clone)]
pub struct Stack {
    slots: [u16; STACK_SIZE],
    pointer: usize,
}

impl Stack {

    pub fn new() -> Stack {
        Stack {
            slots: [0; STACK_SIZE],
            pointer: 0,
        }
    }

    /// Store the address of a call site.
    /// `pc` is only used for error reporting.
    pub fn push(&mut self, pc: u16) -> Result<()> {
        let slot = self
            .slots
            .get_mut(self.pointer)
            .ok_or(EmulatorError::StackOverflow { pc, depth: STACK_SIZE })?;
        *slot = pc;
        self.pointer += 1;
        Ok(())
    }

    /// Take the most recent call site, `pc` is the address of the return.
    pub fn pop(&mut self, pc: u16) -> Result<u16> {
        if self.pointer == 0 {
            return Err(EmulatorError::StackUnderflow { pc });
        }
        self.pointer -= 1;
        Ok(self.slots[self.pointer])
    }

    pub fn depth(&self) -> usize {
        self.pointer
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn pop_returns_pushes_in_reverse() {
        let mut stack = Stack::new();
        stack.push(0x200).unwrap();
        stack.push(0x300).unwrap();
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.pop(0).unwrap(), 0x300);
        assert_eq!(stack.pop(0).unwrap(), 0x200);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn seventeenth_push_overflows() {
        let mut stack = Stack::new();
        for i in 0..STACK_SIZE as u16 {
            stack.push(0x200 + 2 * i).unwrap();
        }
        match stack.push(0x400) {
            Err(EmulatorError::StackOverflow { pc: 0x400, depth: 16 }) => {}
            other => panic!("expected StackOverflow, got {:?}", other),
        }
        assert_eq!(stack.depth(), STACK_SIZE);
        assert_eq!(stack.pop(0).unwrap(), 0x21E);
    }

    #[test]
    fn pop_on_empty_underflows() {
        let mut stack = Stack::new();
        match stack.pop(0x202) {
            Err(EmulatorError::StackUnderflow { pc: 0x202 }) => {}
            other => panic!("expected StackUnderflow, got {:?}", other),
        }
        assert_eq!(stack.depth(), 0);
    }
}
