use super::error::{Error, LoadError};
use super::input::{EmulatorInput, InputEvent, Keypad};
use super::instruction::*;
use super::memory::{self, Memory, FONT_START, GLYPH_SIZE, PROGRAM_START};
use super::output::{EmulatorOutput, Screen};
use super::timer::{EmulatorAudio, Silence, Timers};
use crate::config::{FontGlyphs, KeyRelease, Quirks, ShiftFlag};
use crate::util::opcode::Opcode;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const NUM_REGISTERS: usize = 16;
const STACK_SIZE: usize = 16;
const FLAG: usize = 0xF;

/// Whether the machine can make progress on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    /// Executing `FX0A`, which repeats until a key is down.
    AwaitingKey { register: u8 },
}

/// Outcome of [`Emulator::run_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Continue,
    Quit,
}

/// Where execution continues after an instruction.
enum Next {
    Advance,
    Skip,
    Jump(u16),
    Wait,
}

pub struct Emulator<A: EmulatorAudio = Silence> {
    memory: Memory,
    registers: [u8; NUM_REGISTERS],
    i: u16,
    program_counter: u16,
    stack_pointer: usize,
    stack: [u16; STACK_SIZE],
    timers: Timers,
    keypad: Keypad,
    screen: Screen,
    state: State,

    quirks: Quirks,
    rng: StdRng,
    audio: A,
}

impl Emulator<Silence> {
    /// Create a new emulator that makes no sound.
    pub fn new() -> Emulator<Silence> {
        Emulator::with_audio(Silence)
    }
}

impl Default for Emulator<Silence> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: EmulatorAudio> Emulator<A> {
    /// Create a new emulator that beeps through `audio`.
    pub fn with_audio(audio: A) -> Emulator<A> {
        Emulator {
            memory: Memory::new(),
            registers: [0; NUM_REGISTERS],
            i: 0,
            program_counter: PROGRAM_START,
            stack_pointer: 0,
            stack: [0; STACK_SIZE],
            timers: Timers::default(),
            keypad: Keypad::new(),
            screen: Screen::new(),
            state: State::Running,

            quirks: Quirks::default(),
            rng: StdRng::from_entropy(),
            audio,
        }
    }

    pub fn with_quirks(mut self, quirks: Quirks) -> Self {
        self.quirks = quirks;
        self
    }

    /// Make `CXNN` deterministic.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Return to the power-on state: everything zeroed, font loaded, pc at 0x200.
    pub fn reset(&mut self) {
        log::debug!("Resetting emulator");
        self.memory.reset();
        self.registers = [0; NUM_REGISTERS];
        self.i = 0;
        self.program_counter = PROGRAM_START;
        self.stack_pointer = 0;
        self.stack = [0; STACK_SIZE];
        self.timers = Timers::default();
        self.keypad.release_all();
        self.screen = Screen::new();
        self.state = State::Running;
    }

    /// Copy a program into memory at 0x200.
    pub fn load(&mut self, program: &[u8]) -> Result<(), LoadError> {
        self.memory.load_program(program)?;
        log::debug!("Loaded {} byte program", program.len());
        Ok(())
    }

    /// Fetch the instruction at the program counter and execute it.
    pub fn step(&mut self) -> Result<State, Error> {
        let address = self.program_counter;
        let (left, right) = self.memory.fetch(address);
        let instruction = match Instruction::from_two_u8(left, right) {
            Some(instruction) => instruction,
            None => {
                let opcode = Opcode::new(left, right);
                log::error!("Unknown opcode {} at {:#05x}", opcode, address);
                return Err(Error::UnknownOpcode {
                    opcode: opcode.as_u16(),
                    address,
                });
            }
        };

        log::trace!("{:#05x}: {}", address, instruction);
        self.execute_single(instruction)
    }

    /// Execute a single instruction as if it was fetched from the program counter.
    pub fn execute_single(&mut self, instruction: Instruction) -> Result<State, Error> {
        let address = self.program_counter;
        let next = self.execute_at(address, instruction)?;

        self.program_counter = memory::mask_address(match next {
            Next::Advance => address.wrapping_add(2),
            Next::Skip => address.wrapping_add(4),
            Next::Jump(addr) => addr,
            Next::Wait => address,
        });

        Ok(self.state)
    }

    /// Execute instructions in order, stopping at the first error.
    pub fn execute_many(&mut self, instructions: &[Instruction]) -> Result<State, Error> {
        let mut state = self.state;
        for instruction in instructions {
            state = self.execute_single(*instruction)?;
        }
        Ok(state)
    }

    fn execute_at(&mut self, address: u16, instruction: Instruction) -> Result<Next, Error> {
        let next = match instruction {

            Instruction::ClearScreen => {
                self.screen.clear();
                Next::Advance
            }

            // Jump back to the instruction after the call site
            Instruction::Return => {
                if self.stack_pointer == 0 {
                    return Err(Error::StackUnderflow { address });
                }
                self.stack_pointer -= 1;
                Next::Jump(self.stack[self.stack_pointer].wrapping_add(2))
            }

            Instruction::Goto(Addr(addr)) => Next::Jump(addr),

            // The call site is stored, not the return address
            Instruction::Call(Addr(addr)) => {
                if self.stack_pointer == STACK_SIZE {
                    return Err(Error::StackOverflow { address });
                }
                self.stack[self.stack_pointer] = address;
                self.stack_pointer += 1;
                Next::Jump(addr)
            }

            Instruction::IfRegEqConst(Reg(x), Const(n)) => skip_if(self.reg(x) == n),

            Instruction::IfRegNeqConst(Reg(x), Const(n)) => skip_if(self.reg(x) != n),

            Instruction::IfRegEqReg(Reg(x), Reg(y)) => skip_if(self.reg(x) == self.reg(y)),

            Instruction::SetRegToConst(Reg(x), Const(n)) => {
                self.set_reg(x, n);
                Next::Advance
            }

            // Wraps, and leaves VF alone
            Instruction::IncRegByConst(Reg(x), Const(n)) => {
                self.set_reg(x, self.reg(x).wrapping_add(n));
                Next::Advance
            }

            Instruction::SetRegToReg(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(y));
                Next::Advance
            }

            Instruction::BitwiseOr(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(x) | self.reg(y));
                Next::Advance
            }

            Instruction::BitwiseAnd(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(x) & self.reg(y));
                Next::Advance
            }

            Instruction::BitwiseXor(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(x) ^ self.reg(y));
                Next::Advance
            }

            // VF is the carry
            Instruction::IncRegByReg(Reg(x), Reg(y)) => {
                let (sum, carry) = self.reg(x).overflowing_add(self.reg(y));
                self.set_flag_then_reg(carry as u8, x, sum);
                Next::Advance
            }

            // VF is 0 on borrow
            Instruction::DecRegByReg(Reg(x), Reg(y)) => {
                let (difference, borrow) = self.reg(x).overflowing_sub(self.reg(y));
                self.set_flag_then_reg(!borrow as u8, x, difference);
                Next::Advance
            }

            Instruction::BitshiftRight(Reg(x)) => {
                let value = self.reg(x);
                self.set_flag_then_reg(value & 0x01, x, value >> 1);
                Next::Advance
            }

            Instruction::SetVxVyMinusVx(Reg(x), Reg(y)) => {
                let (difference, borrow) = self.reg(y).overflowing_sub(self.reg(x));
                self.set_flag_then_reg(!borrow as u8, x, difference);
                Next::Advance
            }

            Instruction::BitshiftLeft(Reg(x)) => {
                let value = self.reg(x);
                let flag = match self.quirks.shift_flag {
                    ShiftFlag::Raw => value & 0x80,
                    ShiftFlag::Normalized => value >> 7,
                };
                self.set_flag_then_reg(flag, x, value << 1);
                Next::Advance
            }

            Instruction::IfRegNeqReg(Reg(x), Reg(y)) => skip_if(self.reg(x) != self.reg(y)),

            Instruction::SetI(Addr(addr)) => {
                self.i = memory::mask_address(addr);
                Next::Advance
            }

            Instruction::SetPcToV0PlusAddr(Addr(addr)) => {
                Next::Jump(u16::from(self.reg(0)) + addr)
            }

            Instruction::SetVxRand(Reg(x), Const(n)) => {
                let random: u8 = self.rng.gen();
                self.set_reg(x, random & n);
                Next::Advance
            }

            Instruction::Draw(Reg(x), Reg(y), Const(sprite_height)) => {
                self.draw(self.reg(x), self.reg(y), sprite_height);
                Next::Advance
            }

            Instruction::IfKeyEqVx(Reg(x)) => {
                let key = self.key_in(x);
                let pressed = self.keypad.is_pressed(key);
                if pressed {
                    self.consume_key(key);
                }
                skip_if(pressed)
            }

            Instruction::IfKeyNeqVx(Reg(x)) => {
                let key = self.key_in(x);
                let pressed = self.keypad.is_pressed(key);
                if pressed {
                    self.consume_key(key);
                }
                skip_if(!pressed)
            }

            Instruction::SetRegToDelayTimer(Reg(x)) => {
                self.set_reg(x, self.timers.delay);
                Next::Advance
            }

            // Repeats until some key is down
            Instruction::SetRegToGetKey(Reg(x)) => match self.keypad.first_pressed() {
                Some(key) => {
                    self.set_reg(x, key);
                    self.state = State::Running;
                    Next::Advance
                }
                None => {
                    if self.state == State::Running {
                        log::debug!("Waiting for a key press into V{:X}", x);
                    }
                    self.state = State::AwaitingKey { register: x };
                    Next::Wait
                }
            },

            Instruction::SetDelayTimerToReg(Reg(x)) => {
                self.timers.delay = self.reg(x);
                Next::Advance
            }

            Instruction::SetSoundTimerToReg(Reg(x)) => {
                self.timers.sound = self.reg(x);
                Next::Advance
            }

            // VF tells whether I left the address space
            Instruction::AddRegToI(Reg(x)) => {
                let sum = self.i + u16::from(self.reg(x));
                self.registers[FLAG] = (sum > 0xFFF) as u8;
                self.i = memory::mask_address(sum);
                Next::Advance
            }

            // Each glyph is five bytes
            Instruction::SetIToSpriteAddrVx(Reg(x)) => {
                let digit = u16::from(self.reg(x));
                self.i = match self.quirks.font_glyphs {
                    FontGlyphs::Unoffset => digit * GLYPH_SIZE,
                    FontGlyphs::FontRegion => FONT_START + (digit & 0xF) * GLYPH_SIZE,
                };
                Next::Advance
            }

            Instruction::SetIToBcdOfReg(Reg(x)) => {
                let value = self.reg(x);
                self.memory.write(self.i, value / 100);
                self.memory.write(self.i.wrapping_add(1), value / 10 % 10);
                self.memory.write(self.i.wrapping_add(2), value % 10);
                Next::Advance
            }

            // Dump register values up to Vx
            Instruction::RegDump(Reg(x)) => {
                for reg_no in 0..=x {
                    let addr = self.i.wrapping_add(u16::from(reg_no));
                    self.memory.write(addr, self.reg(reg_no));
                }
                self.advance_i_past(x);
                Next::Advance
            }

            // Load register values up to Vx
            Instruction::RegLoad(Reg(x)) => {
                for reg_no in 0..=x {
                    let addr = self.i.wrapping_add(u16::from(reg_no));
                    self.set_reg(reg_no, self.memory.read(addr));
                }
                self.advance_i_past(x);
                Next::Advance
            }
        };

        Ok(next)
    }

    /// XOR an 8 pixel wide sprite from memory at I onto the screen, setting VF on collision.
    fn draw(&mut self, x_coord: u8, y_coord: u8, sprite_height: u8) {
        let mut any_collisions = false;
        for row in 0..sprite_height {
            let sprite_row = self.memory.read(self.i.wrapping_add(u16::from(row)));
            for column in 0..8 {
                if sprite_row & (0x80 >> column) != 0 {
                    let x = usize::from(x_coord) + column;
                    let y = usize::from(y_coord) + usize::from(row);
                    any_collisions |= self.screen.toggle(x, y);
                }
            }
        }

        self.registers[FLAG] = any_collisions as u8;
    }

    fn reg(&self, x: u8) -> u8 {
        self.registers[usize::from(x)]
    }

    fn set_reg(&mut self, x: u8, value: u8) {
        self.registers[usize::from(x)] = value;
    }

    /// Arithmetic writes the flag first, so with X = F the result is what remains in VF.
    fn set_flag_then_reg(&mut self, flag: u8, x: u8, value: u8) {
        self.registers[FLAG] = flag;
        self.set_reg(x, value);
    }

    /// The keypad has 16 keys, so only the low nibble of the register counts.
    fn key_in(&self, x: u8) -> u8 {
        self.reg(x) & 0x0F
    }

    fn consume_key(&mut self, key: u8) {
        if self.quirks.key_release == KeyRelease::Edge {
            self.keypad.release(key);
        }
    }

    fn advance_i_past(&mut self, x: u8) {
        if self.quirks.load_store_increment {
            self.i = memory::mask_address(self.i + u16::from(x) + 1);
        }
    }

    /// Count the delay and sound timers down, beeping when the sound timer reaches 1.
    pub fn tick_timers(&mut self) {
        if self.timers.tick() {
            self.audio.beep();
        }
    }

    pub fn set_key(&mut self, key: u8, pressed: bool) {
        self.keypad.set(key, pressed);
    }

    /// Send the display changes since the last flush to `output`.
    pub fn flush<O: EmulatorOutput>(&mut self, output: &mut O) -> Result<(), Error> {
        self.screen.flush(output)?;
        Ok(())
    }

    /// One iteration of the driver loop: `cycles` times apply input and execute an
    /// instruction, then tick the timers once and flush the display.
    pub fn run_frame<I, O>(&mut self, cycles: u32, input: &mut I, output: &mut O) -> Result<Frame, Error>
    where
        I: EmulatorInput,
        O: EmulatorOutput,
    {
        for _ in 0..cycles {
            for event in input.poll()? {
                match event {
                    InputEvent::Key { key, pressed } => self.set_key(key, pressed),
                    InputEvent::Quit => return Ok(Frame::Quit),
                }
            }
            self.step()?;
        }

        self.tick_timers();
        self.flush(output)?;
        Ok(Frame::Continue)
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn registers(&self) -> &[u8; NUM_REGISTERS] {
        &self.registers
    }

    pub fn i(&self) -> u16 {
        self.i
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn stack_pointer(&self) -> usize {
        self.stack_pointer
    }

    pub fn timers(&self) -> Timers {
        self.timers
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn quirks(&self) -> Quirks {
        self.quirks
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }
}

fn skip_if(condition: bool) -> Next {
    if condition {
        Next::Skip
    } else {
        Next::Advance
    }
}
