use crate::{GifError, Result};

/// Paletted intermediate image: one palette index per pixel, row-major, origin at (0, 0).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl IndexBuffer {
    /// Creates a zero filled buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        let expected = width * height;
        if pixels.len() != expected {
            return Err(GifError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    pub fn row(&self, y: usize) -> &[u8] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    /// The pixels of a contiguous row range.
    pub fn rows(&self, rows: std::ops::Range<usize>) -> &[u8] {
        &self.pixels[rows.start * self.width..rows.end * self.width]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pixels_checks_size() {
        assert!(IndexBuffer::from_pixels(2, 2, vec![1, 2, 3, 4]).is_ok());
        match IndexBuffer::from_pixels(2, 2, vec![1, 2, 3]) {
            Err(GifError::BufferSizeMismatch { expected: 4, actual: 3 }) => {}
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_accessors() {
        let buf = IndexBuffer::from_pixels(3, 2, vec![0, 1, 2, 3, 4, 5]).unwrap();
        assert_eq!(buf.get(2, 1), Some(5));
        assert_eq!(buf.get(3, 0), None);
        assert_eq!(buf.row(1), &[3, 4, 5]);
        assert_eq!(buf.rows(0..2).len(), 6);
    }
}
