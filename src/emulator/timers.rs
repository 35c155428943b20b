/// The delay and sound timers. Both count down to zero and stay there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {

    pub fn tick(&mut self) {
        self.sound = self.sound.saturating_sub(1);
        self.delay = self.delay.saturating_sub(1);
    }
}
