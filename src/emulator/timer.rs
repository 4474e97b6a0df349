/// Something that can make a sound when the sound timer runs out.
pub trait EmulatorAudio {
    fn beep(&mut self);
}

/// An audio device that never makes a sound.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silence;

impl EmulatorAudio for Silence {
    fn beep(&mut self) {}
}

/// The delay and sound timers.
///
/// Both count down towards zero once per call to `tick`,
/// which the driver is expected to do at 60Hz.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    /// Count both timers down by one.
    /// Returns `true` when the sound timer just reached 1, which is when to beep.
    pub fn tick(&mut self) -> bool {
        self.delay = self.delay.saturating_sub(1);

        if self.sound > 0 {
            self.sound -= 1;
            return self.sound == 1;
        }

        false
    }
}
