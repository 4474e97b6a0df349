use std::io;

pub const NUM_KEYS: usize = 16;

/// Physical keys of a QWERTY keyboard and the hex keypad position they stand for.
///
/// ```text
/// 1 2 3 4      1 2 3 C
/// q w e r  ->  4 5 6 D
/// a s d f      7 8 9 E
/// z x c v      A 0 B F
/// ```
pub const KEYMAP: [(char, u8); NUM_KEYS] = [
    ('1', 0x1),
    ('2', 0x2),
    ('3', 0x3),
    ('4', 0xC),
    ('q', 0x4),
    ('w', 0x5),
    ('e', 0x6),
    ('r', 0xD),
    ('a', 0x7),
    ('s', 0x8),
    ('d', 0x9),
    ('f', 0xE),
    ('z', 0xA),
    ('x', 0x0),
    ('c', 0xB),
    ('v', 0xF),
];

/// Look up the keypad position of a physical key, ignoring case.
pub fn key_for_char(c: char) -> Option<u8> {
    let c = c.to_ascii_lowercase();
    KEYMAP
        .iter()
        .find(|(physical, _)| *physical == c)
        .map(|(_, key)| *key)
}

/// Something the driver learned from the input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A keypad key changed state.
    Key { key: u8, pressed: bool },
    /// The user asked to stop.
    Quit,
}

/// Represents an input device that reports changes to the keys in the range 0..0xF.
pub trait EmulatorInput {
    /// Everything that happened since the last poll. Must not block.
    fn poll(&mut self) -> io::Result<Vec<InputEvent>>;
}

/// An input device that never provides any input.
#[derive(Debug, Default, Clone, Copy)]
pub struct DummyInput;

impl EmulatorInput for DummyInput {
    fn poll(&mut self) -> io::Result<Vec<InputEvent>> {
        Ok(Vec::new())
    }
}

/// Pressed state of the 16 hex keys.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Keypad {
    pressed: [bool; NUM_KEYS],
}

impl Keypad {
    pub fn new() -> Keypad {
        Keypad::default()
    }

    /// Codes outside 0x0..=0xF are ignored.
    pub fn set(&mut self, key: u8, pressed: bool) {
        match self.pressed.get_mut(key as usize) {
            Some(slot) => *slot = pressed,
            None => log::warn!("Ignoring state change of unknown key {:#04x}", key),
        }
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed.get(key as usize).copied().unwrap_or(false)
    }

    pub fn release(&mut self, key: u8) {
        self.set(key, false);
    }

    /// The lowest-numbered key that is currently down.
    pub fn first_pressed(&self) -> Option<u8> {
        self.pressed
            .iter()
            .position(|pressed| *pressed)
            .map(|key| key as u8)
    }

    pub fn release_all(&mut self) {
        self.pressed = [false; NUM_KEYS];
    }
}
