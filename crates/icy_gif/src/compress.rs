//! Block parallel LZW compression of an index buffer.
//!
//! The buffer is cut into horizontal strips and every strip is compressed with
//! its own fresh code table. Strip 0 opens the stream with a clear code, each
//! following strip relies on the clear code its predecessor ended with, and
//! the last strip writes end-of-information. The strip outputs are joined at
//! the bit level in strip order.
//!
//! Restarting the table per strip costs some compression ratio compared to
//! one continuous stream. That is the price for compressing strips in
//! parallel, the dictionary must not be threaded across strips.

use std::io::Write;

use rayon::prelude::*;

use crate::{
    lzw::{BitTail, LzwEncoder, Terminator},
    strips, IndexBuffer, Result,
};

/// Compressed bytes of one strip plus the bits that did not fill a byte.
#[derive(Debug, Default)]
pub struct StripOutput {
    pub bytes: Vec<u8>,
    pub tail: BitTail,
}

/// Compresses `indices` with up to `workers` parallel workers and writes the
/// code stream (without sub-block framing) to `sink`.
pub fn compress<W: Write>(sink: &mut W, indices: &IndexBuffer, lit_width: u8, workers: usize) -> Result<()> {
    let strips = if indices.is_empty() { Vec::new() } else { strips::partition(indices.height(), workers) };

    if strips.len() <= 1 {
        log::debug!("compressing {} pixels in a single stream", indices.pixels().len());
        let mut encoder = LzwEncoder::new(&mut *sink, lit_width);
        encoder.encode(indices.pixels())?;
        let (sink, tail) = encoder.finish(Terminator::EndOfInformation)?;
        if !tail.is_empty() {
            sink.write_all(&[tail.bits])?;
        }
        return Ok(());
    }

    let last = strips.len() - 1;
    // collect() on an indexed iterator fills one slot per strip, so the order
    // below is the strip order no matter which worker finished first.
    let outputs: Result<Vec<StripOutput>> = strips
        .par_iter()
        .enumerate()
        .map(|(i, rows)| compress_strip(indices.rows(rows.clone()), lit_width, i == 0, i == last))
        .collect();
    let outputs = outputs?;

    log::debug!(
        "compressed {} strips into {} bytes",
        outputs.len(),
        outputs.iter().map(|o| o.bytes.len()).sum::<usize>()
    );

    let mut splicer = BitSplicer::new(sink);
    for (i, output) in outputs.iter().enumerate() {
        log::trace!("strip {i}: {} bytes + {} bits", output.bytes.len(), output.tail.len);
        splicer.write_strip(output)?;
    }
    splicer.finish()?;
    Ok(())
}

/// Compresses one strip with a fresh code table into a private buffer.
pub fn compress_strip(data: &[u8], lit_width: u8, first: bool, last: bool) -> Result<StripOutput> {
    let mut encoder = LzwEncoder::new(Vec::with_capacity(data.len() / 2), lit_width).with_leading_clear(first);
    encoder.encode(data)?;
    let terminator = if last { Terminator::EndOfInformation } else { Terminator::Clear };
    let (bytes, tail) = encoder.finish(terminator)?;
    Ok(StripOutput { bytes, tail })
}

/// Concatenates strip outputs bit by bit, LSB first.
struct BitSplicer<'a, W: Write> {
    sink: &'a mut W,
    acc: u32,
    n_bits: u8,
    scratch: Vec<u8>,
}

impl<'a, W: Write> BitSplicer<'a, W> {
    fn new(sink: &'a mut W) -> Self {
        Self {
            sink,
            acc: 0,
            n_bits: 0,
            scratch: Vec::new(),
        }
    }

    fn write_strip(&mut self, strip: &StripOutput) -> Result<()> {
        if self.n_bits == 0 {
            self.sink.write_all(&strip.bytes)?;
        } else {
            self.scratch.clear();
            self.scratch.reserve(strip.bytes.len());
            for &b in &strip.bytes {
                self.acc |= (b as u32) << self.n_bits;
                self.scratch.push(self.acc as u8);
                self.acc >>= 8;
            }
            self.sink.write_all(&self.scratch)?;
        }
        self.push_bits(strip.tail)
    }

    fn push_bits(&mut self, tail: BitTail) -> Result<()> {
        self.acc |= (tail.bits as u32) << self.n_bits;
        self.n_bits += tail.len;
        if self.n_bits >= 8 {
            self.sink.write_all(&[self.acc as u8])?;
            self.acc >>= 8;
            self.n_bits -= 8;
        }
        Ok(())
    }

    /// Pads the final partial byte with zero bits.
    fn finish(self) -> Result<()> {
        if self.n_bits > 0 {
            self.sink.write_all(&[self.acc as u8])?;
        }
        Ok(())
    }
}
