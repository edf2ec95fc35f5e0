use std::io::Write;
use std::time::Duration;

use crate::host::{Clock, Host, Input, Presenter};
use crate::machine::screen::FrameBuffer;

/// Deterministic host: time only moves when the machine sleeps, frames are
/// copied out as they are presented.
pub struct TestHost {
    pub now: u64,
    pub slept: u64,
    pub held: [bool; 2],
    pub cancel_after_frames: Option<usize>,
    pub cancel_now: bool,
    pub frames: Vec<Vec<u32>>,
    pub out: Vec<u8>,
}

impl TestHost {
    pub fn new() -> TestHost {
        TestHost {
            now: 0,
            slept: 0,
            held: [false; 2],
            cancel_after_frames: None,
            cancel_now: false,
            frames: Vec::new(),
            out: Vec::new(),
        }
    }

    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }
}

impl Clock for TestHost {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        let ms = duration.as_millis() as u64;
        self.now += ms;
        self.slept += ms;
    }
}

impl Input for TestHost {
    fn button_held(&self, button: i32) -> bool {
        usize::try_from(button)
            .ok()
            .and_then(|idx| self.held.get(idx).copied())
            .unwrap_or(false)
    }

    fn cancel_requested(&mut self) -> bool {
        self.cancel_now
            || self
                .cancel_after_frames
                .map_or(false, |limit| self.frames.len() >= limit)
    }
}

impl Presenter for TestHost {
    fn present(&mut self, frame: &FrameBuffer) {
        self.frames.push(frame.pixels().to_vec());
    }
}

impl Host for TestHost {
    fn text_out(&mut self) -> &mut dyn Write {
        &mut self.out
    }
}
