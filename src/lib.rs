/*!

A CHIP-8 interpreter core as specified at https://en.wikipedia.org/wiki/CHIP-8.

The crate contains the virtual machine only: memory, registers, timers, the keypad
latch and the framebuffer, plus the fetch-decode-execute loop that drives them.
Painting the screen, reading the keyboard and playing sound is up to the host.

# Headless runner

To try a program without a front end, run
`cargo run --release --bin headless -- <program>`.
It executes a fixed number of cycles and prints the screen when done.
Set `RUST_LOG=trace` to see every instruction as it executes.

# Library

The main way of running a program is to load it as bytes and call `step` repeatedly.

```rust
use chip_8_core::emulator::Emulator;

let mut emulator = Emulator::new();

// Load a program at address 0x200.
let program = [0x6A, 0x3C, 0x00, 0xE0];
emulator.load_program(&program).unwrap();

let step = emulator.step().unwrap(); // LD VA, 0x3C
assert_eq!(emulator.register(0xA), 0x3C);
assert!(!step.redraw);

let step = emulator.step().unwrap(); // CLS
assert!(step.redraw);
assert_eq!(emulator.program_counter(), 0x204);
```

Alternatively, you can experiment by executing instructions manually.

```rust
use chip_8_core::emulator::Emulator;
use chip_8_core::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut emulator = Emulator::new();

// Execute instructions manually
emulator.execute_single(Instruction::ClearScreen).unwrap();

// Or many sequentially
emulator.execute_many(&[
    Instruction::Goto(Addr(0x250)),
    Instruction::SetRegToConst(Reg(0xA), Const(35)),
    Instruction::SetRegToReg(Reg(0xB), Reg(0xA))
]).unwrap();
assert_eq!(emulator.register(0xB), 35);
```

## Input, sound and timing

The host feeds key presses with `set_key`, reads `screen` after a step that reports
`redraw`, and plays a tone while `sound_active` is true.
`FX0A` (wait for a key) never blocks: it simply does not advance the program
counter until a key is down, so the host keeps calling `step` as usual.

By default both timers count down once per executed instruction, so pace `step`
at 60 Hz for authentic timing, or choose `TimerMode::External` and call
`tick_timers` from your own 60 Hz clock.

```rust
use chip_8_core::emulator::Emulator;
use chip_8_core::emulator::config::{AluMode, Config, TimerMode};

let config = Config { alu: AluMode::Canonical, timers: TimerMode::External };
let mut emulator = Emulator::with_seed(7, config);

emulator.load_program(&[0xF3, 0x0A]).unwrap(); // LD V3, K
emulator.step().unwrap();
assert_eq!(emulator.program_counter(), 0x200); // still waiting

emulator.set_key(0x5, true).unwrap();
emulator.step().unwrap();
assert_eq!(emulator.register(3), 0x5);
```
*/

pub mod emulator;
pub mod util;
