/*!

A CHIP-8 emulator as specified at https://en.wikipedia.org/wiki/CHIP-8.

# Crossterm Frontend

If you want to try the emulator on some programs, there is a ready-to-use implementation
you can run by using `cargo run --release --bin crossterm_frontend -- <program>`.
Pass a directory instead of a file to pick a program from a menu.
The keypad is mapped onto the left side of the keyboard (`1234`, `qwer`, `asdf`, `zxcv`),
and escape quits.

# Library

The emulator never sleeps and never reads a device by itself.
A driver loads a program and then repeatedly steps the machine.

```rust
use chip8_vm::emulator::{Emulator, State};

let mut emulator = Emulator::new();

// Load a program at address 0x200.
let clear_display = [0x00, 0xE0];
emulator.load(&clear_display).unwrap();
assert_eq!(emulator.step().unwrap(), State::Running); // Will now clear the display
assert!(emulator.screen().clear_requested());
```

Alternatively, you can experiment by executing instructions manually.

```rust
use chip8_vm::emulator::Emulator;
use chip8_vm::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut emulator = Emulator::new();

// Execute instructions manually
emulator.execute_single(Instruction::ClearScreen).unwrap();

// Or many sequentially
emulator.execute_many(&[
    Instruction::Goto(Addr(0x250)),
    Instruction::SetRegToConst(Reg(0xA), Const(35)),
    Instruction::SetRegToReg(Reg(0xB), Reg(0xA))
]).unwrap();
assert_eq!(emulator.registers()[0xB], 35);
```

## Driving the emulator

Each frame, the driver feeds key input and executes a number of instructions,
then ticks the timers once and hands the changed pixels to the display.
[`Emulator::run_frame`](emulator::Emulator::run_frame) does exactly that.

```rust
use chip8_vm::emulator::{Emulator, Frame};
use chip8_vm::emulator::input::DummyInput;
use chip8_vm::emulator::output::DummyOutput;

let mut emulator = Emulator::new().with_seed(0);
emulator.load(&[0x60, 0x0A, 0xF0, 0x29, 0xD0, 0x05, 0x12, 0x06]).unwrap();

let mut output = DummyOutput::new();
let frame = emulator.run_frame(9, &mut DummyInput, &mut output).unwrap();
assert_eq!(frame, Frame::Continue);
```

## Custom input and output

To get keypresses and show the screen, implement `EmulatorInput` and `EmulatorOutput`,
which represent somewhere to get keyboard input from and a screen respectively.
Take a look at `src/emulator/input.rs` and `src/emulator/output.rs` to see how to implement this.
A sound can be played by handing an `EmulatorAudio` to `Emulator::with_audio`.

The interpreter quirks that differ between CHIP-8 implementations are chosen with
[`Quirks`](config::Quirks).
*/

pub mod config;
pub mod emulator;
pub mod rom;
pub mod util;
