//! RGBA pixel buffer type.

/// Row-major, interleaved 8-bit RGBA image.
///
/// Invariant: `data.len() == width * height * 4` and both dimensions are
/// non-zero. Construction through [`PixelBuffer::new`] enforces this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap an RGBA byte vector, validating its dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, String> {
        if width == 0 || height == 0 {
            return Err(format!(
                "Image dimensions must be non-zero, got {}x{}",
                width, height
            ));
        }

        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(format!(
                "RGBA buffer length mismatch for {}x{}: expected {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            ));
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Uniform image where every pixel equals `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, String> {
        let pixels = width as usize * height as usize;
        Self::new(width, height, rgba.repeat(pixels))
    }

    /// Unchecked constructor for buffers derived from an already valid one.
    pub(crate) fn from_parts(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw interleaved RGBA bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// RGBA value at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Consume the buffer, returning its bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}
