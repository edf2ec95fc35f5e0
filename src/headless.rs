use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::Path;
use std::time::Duration;

use pixvm_core::{Clock, FrameBuffer, Host, Input, Presenter, SystemClock};

/// Host without a window: frames are counted, buttons are fixed for the
/// whole run and text goes to stdout.
pub struct HeadlessHost<W: Write = Stdout> {
    clock: SystemClock,
    held: [bool; 2],
    max_frames: Option<u64>,
    pub frames: u64,
    out: W,
}

impl HeadlessHost<Stdout> {
    pub fn new(held: &[u8], max_frames: Option<u64>) -> HeadlessHost<Stdout> {
        HeadlessHost::with_output(held, max_frames, io::stdout())
    }
}

impl<W: Write> HeadlessHost<W> {
    pub fn with_output(held: &[u8], max_frames: Option<u64>, out: W) -> HeadlessHost<W> {
        let mut buttons = [false; 2];
        for &button in held {
            if let Some(slot) = buttons.get_mut(button as usize) {
                *slot = true;
            }
        }

        HeadlessHost {
            clock: SystemClock::new(),
            held: buttons,
            max_frames,
            frames: 0,
            out,
        }
    }
}

impl<W: Write> Clock for HeadlessHost<W> {
    fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    fn sleep(&mut self, duration: Duration) {
        self.clock.sleep(duration);
    }
}

impl<W: Write> Input for HeadlessHost<W> {
    fn button_held(&self, button: i32) -> bool {
        usize::try_from(button)
            .ok()
            .and_then(|idx| self.held.get(idx).copied())
            .unwrap_or(false)
    }

    fn cancel_requested(&mut self) -> bool {
        self.max_frames.map_or(false, |limit| self.frames >= limit)
    }
}

impl<W: Write> Presenter for HeadlessHost<W> {
    fn present(&mut self, _frame: &FrameBuffer) {
        self.frames += 1;
        if self.frames % 60 == 0 {
            log::debug!("presented {} frames", self.frames);
        }
    }
}

impl<W: Write> Host for HeadlessHost<W> {
    fn text_out(&mut self) -> &mut dyn Write {
        &mut self.out
    }
}

/// Binary PPM of the frame. Cells are laid out little-endian RGBA, so red
/// is the low byte.
pub fn encode_ppm<W: Write>(frame: &FrameBuffer, out: &mut W) -> io::Result<()> {
    write!(out, "P6\n{} {}\n255\n", frame.width(), frame.height())?;
    for &cell in frame.pixels() {
        let [r, g, b, _a] = cell.to_le_bytes();
        out.write_all(&[r, g, b])?;
    }
    out.flush()
}

pub fn write_ppm<P: AsRef<Path>>(path: P, frame: &FrameBuffer) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    encode_ppm(frame, &mut out)
}
