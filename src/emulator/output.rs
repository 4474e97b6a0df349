use std::collections::HashMap;
use std::fmt;
use std::io;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;

/// A pixel whose state should be shown by the output device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelChange {
    pub x: usize,
    pub y: usize,
    pub on: bool,
}

/// Represents an output device that can be written to.
pub trait EmulatorOutput {
    /// Blank the whole display.
    fn clear(&mut self) -> io::Result<()>;
    fn set(&mut self, x: usize, y: usize, on: bool) -> io::Result<()>;
    /// Called once after each batch of changes.
    fn refresh(&mut self) -> io::Result<()>;
}

/// A simple output device that keeps track of set coordinates.
#[derive(Debug, Default)]
pub struct DummyOutput {
    screen: HashMap<(usize, usize), bool>,
}

impl DummyOutput {
    pub fn new() -> DummyOutput {
        DummyOutput {
            screen: HashMap::new(),
        }
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.screen.get(&(x, y)).copied().unwrap_or(false)
    }
}

impl EmulatorOutput for DummyOutput {
    fn clear(&mut self) -> io::Result<()> {
        self.screen.clear();
        Ok(())
    }
    fn set(&mut self, x: usize, y: usize, on: bool) -> io::Result<()> {
        self.screen.insert((x, y), on);
        Ok(())
    }
    fn refresh(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// The 64x32 framebuffer, together with what changed since it was last flushed.
pub struct Screen {
    pixels: [[bool; SCREEN_HEIGHT]; SCREEN_WIDTH],
    changes: Vec<(usize, usize)>,
    draw_requested: bool,
    clear_requested: bool,
}

impl Screen {
    pub fn new() -> Screen {
        Screen {
            pixels: [[false; SCREEN_HEIGHT]; SCREEN_WIDTH],
            changes: Vec::new(),
            draw_requested: false,
            clear_requested: false,
        }
    }

    /// Turn every pixel off and forget pending changes.
    pub fn clear(&mut self) {
        self.pixels = [[false; SCREEN_HEIGHT]; SCREEN_WIDTH];
        self.changes.clear();
        self.draw_requested = false;
        self.clear_requested = true;
    }

    /// Flip the pixel at `(x, y)`, wrapping coordinates that fall off the edge.
    /// Returns `true` if the pixel was on, i.e. there was a collision.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        let (x, y) = (x % SCREEN_WIDTH, y % SCREEN_HEIGHT);
        let pixel = &mut self.pixels[x][y];
        let was_on = *pixel;
        *pixel = !was_on;
        self.changes.push((x, y));
        self.draw_requested = true;
        was_on
    }

    /// Coordinates outside the screen read as off.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels
            .get(x)
            .and_then(|column| column.get(y))
            .copied()
            .unwrap_or(false)
    }

    pub fn draw_requested(&self) -> bool {
        self.draw_requested
    }

    pub fn clear_requested(&self) -> bool {
        self.clear_requested
    }

    /// Coordinates toggled since the last flush, oldest first.
    pub fn pending_changes(&self) -> &[(usize, usize)] {
        &self.changes
    }

    /// Take the logged toggles along with the current state of each pixel.
    pub fn drain_changes(&mut self) -> Vec<PixelChange> {
        let pixels = &self.pixels;
        self.changes
            .drain(..)
            .map(|(x, y)| PixelChange {
                x,
                y,
                on: pixels[x][y],
            })
            .collect()
    }

    /// Send everything that happened since the last flush to `output`.
    pub fn flush<O: EmulatorOutput>(&mut self, output: &mut O) -> io::Result<()> {
        if self.clear_requested {
            output.clear()?;
            self.clear_requested = false;
        }

        if self.draw_requested {
            for change in self.drain_changes() {
                output.set(change.x, change.y, change.on)?;
            }
            self.draw_requested = false;
        }

        output.refresh()
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..SCREEN_HEIGHT {
            for x in 0..SCREEN_WIDTH {
                write!(f, "{}", if self.pixels[x][y] { "#" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
