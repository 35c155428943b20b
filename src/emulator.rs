//! The CHIP-8 virtual machine as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

pub mod config;
pub mod error;
pub mod instruction;
pub mod keypad;
pub mod memory;
pub mod screen;
pub mod stack;
pub mod timers;

use config::{AluMode, Config, TimerMode};
use error::Result;
use instruction::*;
use keypad::Keypad;
use memory::{Memory, FONT_START, GLYPH_SIZE, PROGRAM_START};
use screen::Screen;
use stack::Stack;
use timers::Timers;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::{self, Write};
use std::path::Path;

const NUM_REGISTERS: usize = 16;
const VF: usize = 0xF;

/// What a single call to [`Emulator::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub instruction: Instruction,
    /// The screen changed and should be repainted.
    pub redraw: bool,
}

/// A CHIP-8 machine. It owns all of its state, including the
/// random number generator used by `CXNN`, so that a seeded
/// emulator is fully deterministic.
pub struct Emulator<R = StdRng> {
    memory: Memory,
    registers: [u8; NUM_REGISTERS],
    i: u16,
    program_counter: u16,
    stack: Stack,
    timers: Timers,
    keypad: Keypad,
    screen: Screen,
    needs_redraw: bool,

    rng: R,
    config: Config,
}

impl Emulator<StdRng> {

    /// Create a new emulator with the default configuration and an entropy-seeded generator.
    pub fn new() -> Emulator<StdRng> {
        Emulator::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Emulator<StdRng> {
        Emulator::with_rng(StdRng::from_entropy(), config)
    }

    /// Create an emulator whose random numbers are reproducible.
    pub fn with_seed(seed: u64, config: Config) -> Emulator<StdRng> {
        Emulator::with_rng(StdRng::seed_from_u64(seed), config)
    }
}

impl Default for Emulator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Emulator<R> {

    /// Create an emulator drawing random numbers from `rng`.
    pub fn with_rng(rng: R, config: Config) -> Emulator<R> {
        Emulator {
            memory: Memory::new(),
            registers: [0; NUM_REGISTERS],
            i: 0,
            program_counter: PROGRAM_START,
            stack: Stack::new(),
            timers: Timers::default(),
            keypad: Keypad::new(),
            screen: Screen::new(),
            needs_redraw: false,

            rng,
            config,
        }
    }

    /// Copy a program into memory at 0x200.
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        self.memory.load_program(program)?;
        log::info!("Loaded {} byte program", program.len());
        Ok(())
    }

    /// Read a program image from disk and load it.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        log::info!("Reading {:?}", path.as_ref());
        let program = std::fs::read(path)?;
        self.load_program(&program)
    }

    /// Perform a single cycle: fetch and execute one instruction,
    /// then update the timers.
    ///
    /// On error nothing has changed, including the timers.
    pub fn step(&mut self) -> Result<Step> {
        // Each opcode is two bytes
        let opcode = self.memory.read_u16(self.program_counter as usize)?;
        let instruction = Instruction::decode(opcode);

        log::trace!("{:#05X}: {:#06X} {}", self.program_counter, opcode, instruction);

        self.execute_single(instruction)?;

        if self.config.timers == TimerMode::PerInstruction {
            self.timers.tick();
        }

        let redraw = matches!(instruction, Instruction::ClearScreen | Instruction::Draw(..));
        Ok(Step { instruction, redraw })
    }

    /// Count both timers down once. Use with [`TimerMode::External`].
    pub fn tick_timers(&mut self) {
        self.timers.tick();
    }

    /// Execute instructions in order, stopping at the first error.
    pub fn execute_many(&mut self, instructions: &[Instruction]) -> Result<()> {
        for instruction in instructions {
            self.execute_single(*instruction)?;
        }
        Ok(())
    }

    /// Execute a single instruction, including its effect on the program counter.
    pub fn execute_single(&mut self, instruction: Instruction) -> Result<()> {
        match instruction {

            Instruction::ClearScreen => {
                self.screen.clear();
                self.needs_redraw = true;
                self.next();
            }

            // Return to the instruction after the call site.
            Instruction::Return => {
                let call_site = self.stack.pop(self.program_counter).map_err(|e| {
                    log::debug!("{}", e);
                    e
                })?;
                self.program_counter = call_site.wrapping_add(2);
            }

            // Machine code routines are not supported
            Instruction::Sys(_) => self.next(),

            Instruction::Goto(Addr(addr)) => {
                self.program_counter = addr;
            }

            // Store the current address on the stack, then jump to the specified address
            Instruction::Call(Addr(addr)) => {
                self.stack.push(self.program_counter).map_err(|e| {
                    log::debug!("{}", e);
                    e
                })?;
                self.program_counter = addr;
            }

            Instruction::SkipIfRegEqConst(Reg(x), Const(n)) => {
                self.skip_if(self.reg(x) == n);
            }

            Instruction::SkipIfRegNeqConst(Reg(x), Const(n)) => {
                self.skip_if(self.reg(x) != n);
            }

            Instruction::SkipIfRegEqReg(Reg(x), Reg(y)) => {
                self.skip_if(self.reg(x) == self.reg(y));
            }

            Instruction::SetRegToConst(Reg(x), Const(n)) => {
                self.set_reg(x, n);
                self.next();
            }

            // Wraps, and leaves VF alone.
            Instruction::IncRegByConst(Reg(x), Const(n)) => {
                self.set_reg(x, self.reg(x).wrapping_add(n));
                self.next();
            }

            Instruction::SetRegToReg(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(y));
                self.next();
            }

            Instruction::BitwiseOr(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(x) | self.reg(y));
                self.next();
            }

            Instruction::BitwiseAnd(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(x) & self.reg(y));
                self.next();
            }

            Instruction::BitwiseXor(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(x) ^ self.reg(y));
                self.next();
            }

            // VF is the carry. It is written before VX.
            Instruction::IncRegByReg(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.registers[VF] = (vy > 0xFF - vx) as u8;
                self.set_reg(x, vx.wrapping_add(vy));
                self.next();
            }

            // VF is 1 when there is no borrow.
            Instruction::DecRegByReg(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.registers[VF] = (vx > vy) as u8;
                self.set_reg(x, vx.wrapping_sub(vy));
                self.next();
            }

            Instruction::ShiftRight(Reg(x), _) => {
                let vx = self.reg(x);
                self.registers[VF] = vx & 0x1;
                let shifted = match self.config.alu {
                    AluMode::Reference => vx << 1,
                    AluMode::Canonical => vx >> 1,
                };
                self.set_reg(x, shifted);
                self.next();
            }

            Instruction::DecRegByRegNegated(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                let (flag, result) = match self.config.alu {
                    AluMode::Reference => (vx <= vy, vx.wrapping_sub(vy)),
                    AluMode::Canonical => (vy >= vx, vy.wrapping_sub(vx)),
                };
                self.registers[VF] = flag as u8;
                self.set_reg(x, result);
                self.next();
            }

            Instruction::ShiftLeft(Reg(x), _) => {
                let vx = self.reg(x);
                self.registers[VF] = match self.config.alu {
                    AluMode::Reference => vx & 0x80,
                    AluMode::Canonical => vx >> 7,
                };
                self.set_reg(x, vx << 1);
                self.next();
            }

            Instruction::SkipIfRegNeqReg(Reg(x), Reg(y)) => {
                self.skip_if(self.reg(x) != self.reg(y));
            }

            Instruction::SetI(Addr(addr)) => {
                self.i = addr;
                self.next();
            }

            Instruction::GotoPlusV0(Addr(addr)) => {
                self.program_counter = addr + self.registers[0] as u16;
            }

            Instruction::SetRegToRandom(Reg(x), Const(n)) => {
                let value = self.rng.gen::<u8>() & n;
                self.set_reg(x, value);
                self.next();
            }

            // The sprite is read before the screen is touched,
            // so a sprite hanging off the end of memory draws nothing.
            Instruction::Draw(Reg(x), Reg(y), Const(height)) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                let sprite = self.memory.slice(self.i as usize, height as usize)?;
                let collision = self.screen.draw(vx, vy, sprite);
                self.registers[VF] = collision as u8;
                self.needs_redraw = true;
                self.next();
            }

            Instruction::SkipIfKeyPressed(Reg(x)) => {
                let pressed = self.keypad.is_pressed(self.reg(x))?;
                self.skip_if(pressed);
            }

            Instruction::SkipIfKeyNotPressed(Reg(x)) => {
                let pressed = self.keypad.is_pressed(self.reg(x))?;
                self.skip_if(!pressed);
            }

            Instruction::SetRegToDelayTimer(Reg(x)) => {
                self.set_reg(x, self.timers.delay);
                self.next();
            }

            // Without a pressed key the program counter stays put,
            // so the next step executes this instruction again.
            Instruction::WaitForKey(Reg(x)) => {
                if let Some(key) = self.keypad.first_pressed() {
                    self.set_reg(x, key);
                    self.next();
                }
            }

            Instruction::SetDelayTimerToReg(Reg(x)) => {
                self.timers.delay = self.reg(x);
                self.next();
            }

            Instruction::SetSoundTimerToReg(Reg(x)) => {
                self.timers.sound = self.reg(x);
                self.next();
            }

            // I is not masked to 12 bits.
            Instruction::AddRegToI(Reg(x)) => {
                self.i = self.i.wrapping_add(self.reg(x) as u16);
                self.next();
            }

            Instruction::SetIToGlyph(Reg(x)) => {
                self.i = FONT_START + self.reg(x) as u16 * GLYPH_SIZE;
                self.next();
            }

            Instruction::StoreBcd(Reg(x)) => {
                let value = self.reg(x);
                let digits = [value / 100, value / 10 % 10, value % 10];
                self.memory.write_all(self.i as usize, &digits)?;
                self.next();
            }

            // Dump register values up to VX
            Instruction::RegDump(Reg(x)) => {
                self.memory.write_all(self.i as usize, &self.registers[..=x as usize])?;
                self.next();
            }

            // Load register values up to VX, then move I past them
            Instruction::RegLoad(Reg(x)) => {
                let count = x as usize + 1;
                let values = self.memory.slice(self.i as usize, count)?;
                self.registers[..count].copy_from_slice(values);
                self.i = self.i.wrapping_add(count as u16);
                self.next();
            }

            Instruction::Unknown(opcode) => {
                log::warn!("Unknown opcode {:#06X} at {:#05X}", opcode, self.program_counter);
            }
        };

        Ok(())
    }

    fn reg(&self, x: u8) -> u8 {
        self.registers[x as usize]
    }

    fn set_reg(&mut self, x: u8, value: u8) {
        self.registers[x as usize] = value;
    }

    fn next(&mut self) {
        self.program_counter = self.program_counter.wrapping_add(2);
    }

    fn skip_if(&mut self, condition: bool) {
        let delta = if condition { 4 } else { 2 };
        self.program_counter = self.program_counter.wrapping_add(delta);
    }

    /// Press or release one of the keys 0x0..=0xF.
    pub fn set_key(&mut self, key: u8, pressed: bool) -> Result<()> {
        self.keypad.set(key, pressed)
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Whether the screen changed since the last call, clearing the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::replace(&mut self.needs_redraw, false)
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn register(&self, x: u8) -> u8 {
        self.reg(x & 0xF)
    }

    pub fn registers(&self) -> &[u8; NUM_REGISTERS] {
        &self.registers
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn delay_timer(&self) -> u8 {
        self.timers.delay
    }

    pub fn sound_timer(&self) -> u8 {
        self.timers.sound
    }

    /// The host should play a tone while this is true.
    pub fn sound_active(&self) -> bool {
        self.timers.sound > 0
    }

    pub fn config(&self) -> Config {
        self.config
    }

    /// Write the memory as hex, 16 bytes per line.
    pub fn memory_dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.memory.dump(out)
    }

    /// Write the screen with one glyph per pixel.
    pub fn display_dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self.screen)?;
        out.flush()
    }
}
