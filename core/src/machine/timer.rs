use std::time::Duration;

use crate::host::Clock;

/// Paces sync points to a fixed frame interval.
#[derive(Copy, Clone, Debug)]
pub struct FramePacer {
    interval: u64,
    poll: Duration,
    last_sync: u64,
    pub frames: u64,
}

impl FramePacer {
    pub fn new(interval: Duration, poll: Duration) -> FramePacer {
        FramePacer {
            interval: interval.as_millis() as u64,
            poll,
            last_sync: 0,
            frames: 0,
        }
    }

    /// Blocks until at least one interval has passed since the previous
    /// sync, polling the clock and sleeping `poll` between reads.
    pub fn wait<C: Clock + ?Sized>(&mut self, clock: &mut C) -> u64 {
        let deadline = self.last_sync.saturating_add(self.interval);
        let mut now = clock.now_ms();
        while now < deadline {
            clock.sleep(self.poll);
            now = clock.now_ms();
        }

        self.last_sync = now;
        self.frames += 1;
        now
    }

    pub fn last_sync(&self) -> u64 {
        self.last_sync
    }
}
