//! Collaborators the machine talks to but does not own.
//!
//! The machine never opens a window or reads a keyboard. A host supplies a
//! monotonic millisecond clock, the state of the two logical buttons, a
//! cancel signal, somewhere to put finished frames and a text sink for
//! `PUTI`/`PUTC`.

use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use crate::machine::screen::FrameBuffer;

pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin. Never decreases.
    fn now_ms(&self) -> u64;
    fn sleep(&mut self, duration: Duration);
}

pub trait Input {
    /// Logical buttons are 0 and 1. Any other index reads as released.
    fn button_held(&self, button: i32) -> bool;
    fn cancel_requested(&mut self) -> bool;
}

pub trait Presenter {
    fn present(&mut self, frame: &FrameBuffer);
}

pub trait Host: Clock + Input + Presenter {
    fn text_out(&mut self) -> &mut dyn Write;
}

/// Wall clock backed by `Instant`, counting from construction.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> SystemClock {
        SystemClock { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> SystemClock {
        SystemClock::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}
