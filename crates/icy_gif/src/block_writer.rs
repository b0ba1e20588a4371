use std::io::{self, Write};

/// Largest payload of a GIF data sub-block.
pub const MAX_BLOCK_LEN: usize = 255;

/// Frames a byte stream into GIF data sub-blocks.
///
/// Every 255 bytes a full block (`0xFF` + payload) is written to the inner
/// writer. [`BlockWriter::finish`] writes the remaining bytes as a final short
/// block. The zero length block terminator is not written here.
pub struct BlockWriter<W: Write> {
    inner: W,
    buf: [u8; MAX_BLOCK_LEN + 1],
    len: usize,
}

impl<W: Write> BlockWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            buf: [0; MAX_BLOCK_LEN + 1],
            len: 0,
        }
    }

    /// Writes the pending short block (if any) and returns the inner writer.
    pub fn finish(mut self) -> io::Result<W> {
        if self.len > 0 {
            self.buf[0] = self.len as u8;
            self.inner.write_all(&self.buf[..=self.len])?;
            self.len = 0;
        }
        Ok(self.inner)
    }
}

impl<W: Write> Write for BlockWriter<W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut rest = data;
        while !rest.is_empty() {
            let n = rest.len().min(MAX_BLOCK_LEN - self.len);
            self.buf[1 + self.len..1 + self.len + n].copy_from_slice(&rest[..n]);
            self.len += n;
            rest = &rest[n..];

            if self.len == MAX_BLOCK_LEN {
                self.buf[0] = MAX_BLOCK_LEN as u8;
                self.inner.write_all(&self.buf)?;
                self.len = 0;
            }
        }
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn frame(data: &[u8], chunk: usize) -> Vec<u8> {
        let mut writer = BlockWriter::new(Vec::new());
        for part in data.chunks(chunk.max(1)) {
            writer.write_all(part).unwrap();
        }
        writer.finish().unwrap()
    }

    #[test]
    fn test_empty_stream_emits_nothing() {
        assert!(frame(&[], 1).is_empty());
    }

    #[test]
    fn test_short_block() {
        assert_eq!(frame(&[1, 2, 3], 2), vec![3, 1, 2, 3]);
    }

    #[test]
    fn test_exact_block_has_no_trailing_empty_block() {
        let data = vec![0xAB; 255];
        let out = frame(&data, 100);
        assert_eq!(out.len(), 256);
        assert_eq!(out[0], 255);
        assert!(out[1..].iter().all(|&b| b == 0xAB));
    }

    #[test]
    fn test_block_boundaries() {
        let data: Vec<u8> = (0..600).map(|i| i as u8).collect();
        let out = frame(&data, 37);
        assert_eq!(out.len(), 600 + 3);
        assert_eq!(out[0], 255);
        assert_eq!(out[256], 255);
        assert_eq!(out[512], 90);
        let mut payload = Vec::new();
        payload.extend_from_slice(&out[1..256]);
        payload.extend_from_slice(&out[257..512]);
        payload.extend_from_slice(&out[513..]);
        assert_eq!(payload, data);
    }

    #[test]
    fn test_framing_independent_of_write_pattern() {
        let data: Vec<u8> = (0..2000).map(|i| (i * 7) as u8).collect();
        let reference = frame(&data, data.len());
        for chunk in [1, 3, 254, 255, 256, 1000] {
            assert_eq!(frame(&data, chunk), reference, "chunk = {chunk}");
        }
    }

    #[test]
    fn test_partial_block_held_until_finish() {
        let mut writer = BlockWriter::new(Vec::new());
        writer.write_all(&[0; 300]).unwrap();
        let out = writer.finish().unwrap();
        assert_eq!(out.len(), 256 + 1 + 45);
        assert_eq!(out[256], 45);
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("sink closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_error_is_propagated() {
        let mut writer = BlockWriter::new(FailingWriter);
        writer.write_all(&[0; 10]).unwrap();
        assert!(writer.write_all(&[0; 300]).is_err());
    }
}
