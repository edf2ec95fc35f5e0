pub const W: usize = 128;
pub const H: usize = 128;

/// Row-major grid of packed 32-bit colors.
pub struct FrameBuffer {
    pixels: Box<[u32; W * H]>,
}

impl FrameBuffer {
    pub fn new() -> FrameBuffer {
        FrameBuffer {
            pixels: Box::new([0; W * H]),
        }
    }

    pub fn width(&self) -> usize {
        W
    }

    pub fn height(&self) -> usize {
        H
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels[..]
    }

    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        Self::index(x, y).map(|idx| self.pixels[idx])
    }

    /// Writes one cell. Coordinates outside the grid are dropped and
    /// reported as `false`.
    pub fn set(&mut self, x: i32, y: i32, color: u32) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.pixels[idx] = color;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    fn index(x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < W)?;
        let y = usize::try_from(y).ok().filter(|&y| y < H)?;

        Some(y * W + x)
    }
}

impl Default for FrameBuffer {
    fn default() -> FrameBuffer {
        FrameBuffer::new()
    }
}
