use chip8_vm::emulator::input::NUM_KEYS;
use std::time::{Duration, Instant};

/// Remembers when each keypad key was last pressed.
///
/// Terminals report key presses (and repeats while a key is held),
/// but never releases. A key therefore counts as held until
/// `timeout` has passed without it being reported again.
pub struct KeyBuffer {
    timeout: Duration,
    pressed_at: [Option<Instant>; NUM_KEYS],
}

impl KeyBuffer {

    pub fn new(timeout: Duration) -> KeyBuffer {
        KeyBuffer {
            timeout,
            pressed_at: [None; NUM_KEYS],
        }
    }

    /// Record a press of `key` at `now`.
    pub fn press(&mut self, key: u8, now: Instant) {
        if let Some(slot) = self.pressed_at.get_mut(key as usize) {
            *slot = Some(now);
        }
    }

    pub fn is_held(&self, key: u8) -> bool {
        matches!(self.pressed_at.get(key as usize), Some(Some(_)))
    }

    /// Forget keys that have not been pressed for `timeout`, returning them in key order.
    pub fn expire(&mut self, now: Instant) -> Vec<u8> {
        let timeout = self.timeout;
        let mut released = Vec::new();
        for (key, slot) in self.pressed_at.iter_mut().enumerate() {
            if let Some(pressed_at) = *slot {
                if now.saturating_duration_since(pressed_at) >= timeout {
                    *slot = None;
                    released.push(key as u8);
                }
            }
        }
        released
    }
}
