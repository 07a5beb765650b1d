/// Whole-second round countdown, advanced once per timer callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Running(u32), // seconds left after this tick
    Expired,      // this tick reached zero
    Idle,         // already at zero, nothing happened
}

impl Countdown {
    pub fn new(seconds: u32) -> Self {
        Self { remaining: seconds }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn tick(&mut self) -> TickOutcome {
        match self.remaining {
            0 => TickOutcome::Idle,
            1 => {
                self.remaining = 0;
                TickOutcome::Expired
            }
            n => {
                self.remaining = n - 1;
                TickOutcome::Running(self.remaining)
            }
        }
    }
}
