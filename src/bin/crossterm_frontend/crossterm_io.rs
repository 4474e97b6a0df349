use chip8_vm::config::Rgb;
use chip8_vm::emulator::input::{key_for_char, EmulatorInput, InputEvent};
use chip8_vm::emulator::output::{EmulatorOutput, SCREEN_HEIGHT, SCREEN_WIDTH};
use chip8_vm::emulator::timer::EmulatorAudio;

use super::key_buffer::KeyBuffer;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use std::io::{self, stdout, Stdout, Write};
use std::time::{Duration, Instant};

fn to_io(error: crossterm::ErrorKind) -> io::Error {
    io::Error::new(io::ErrorKind::Other, error.to_string())
}

/// Keypad input read from a raw mode terminal.
pub struct CrosstermInput {
    keys: KeyBuffer,
}

impl CrosstermInput {
    /// `hold` is how long a key stays pressed after the terminal last reported it.
    pub fn new(hold: Duration) -> CrosstermInput {
        CrosstermInput {
            keys: KeyBuffer::new(hold),
        }
    }
}

impl EmulatorInput for CrosstermInput {
    fn poll(&mut self) -> io::Result<Vec<InputEvent>> {
        let mut events = Vec::new();

        while event::poll(Duration::from_millis(0)).map_err(to_io)? {
            let key_event = match event::read().map_err(to_io)? {
                Event::Key(key_event) => key_event,
                _ => continue,
            };
            log::debug!("Got event {:?}", key_event);

            match key_event.code {
                KeyCode::Esc => events.push(InputEvent::Quit),
                KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                    events.push(InputEvent::Quit)
                }
                KeyCode::Char(c) => {
                    if let Some(key) = key_for_char(c) {
                        if !self.keys.is_held(key) {
                            log::debug!("Key {:X} down", key);
                        }
                        self.keys.press(key, Instant::now());
                        events.push(InputEvent::Key { key, pressed: true });
                    }
                }
                _ => {}
            }
        }

        for key in self.keys.expire(Instant::now()) {
            log::debug!("Key {:X} up", key);
            events.push(InputEvent::Key { key, pressed: false });
        }

        Ok(events)
    }
}

/// Draws the screen inside a box, two terminal cells per pixel.
/// The terminal is restored when this is dropped.
pub struct CrosstermOutput {
    stdout: Stdout,
    color: Color,
}

impl CrosstermOutput {
    pub fn new(color: Rgb) -> crossterm::Result<CrosstermOutput> {
        let mut output = CrosstermOutput {
            stdout: stdout(),
            color: Color::Rgb {
                r: color.r,
                g: color.g,
                b: color.b,
            },
        };

        terminal::enable_raw_mode()?;
        execute!(output.stdout, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;
        output.draw_border()?;
        output.stdout.flush()?;
        Ok(output)
    }

    fn draw_border(&mut self) -> crossterm::Result<()> {
        let right = (2 * SCREEN_WIDTH + 1) as u16;
        let bottom = (SCREEN_HEIGHT + 1) as u16;

        queue!(self.stdout, ResetColor)?;
        for x in 0..=right {
            for &y in &[0, bottom] {
                let c = if x == 0 && y == 0 {
                    '┏'
                } else if x == right && y == 0 {
                    '┓'
                } else if x == 0 {
                    '┗'
                } else if x == right {
                    '┛'
                } else {
                    '━'
                };
                queue!(self.stdout, cursor::MoveTo(x, y), Print(c))?;
            }
        }
        for y in 1..bottom {
            for &x in &[0, right] {
                queue!(self.stdout, cursor::MoveTo(x, y), Print('┃'))?;
            }
        }
        Ok(())
    }
}

impl Drop for CrosstermOutput {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, ResetColor, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl EmulatorOutput for CrosstermOutput {
    fn clear(&mut self) -> io::Result<()> {
        queue!(self.stdout, Clear(ClearType::All)).map_err(to_io)?;
        self.draw_border().map_err(to_io)
    }

    fn set(&mut self, x: usize, y: usize, on: bool) -> io::Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(2 * x as u16 + 1, y as u16 + 1),
            SetForegroundColor(self.color),
            Print(if on { "██" } else { "  " })
        )
        .map_err(to_io)
    }

    fn refresh(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

/// Rings the terminal bell.
pub struct TerminalBell;

impl EmulatorAudio for TerminalBell {
    fn beep(&mut self) {
        let mut stdout = stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            log::warn!("Could not ring the bell: {}", e);
        }
    }
}
