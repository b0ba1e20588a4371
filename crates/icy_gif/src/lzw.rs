//! Variable width LZW encoder as used by GIF (LSB first bit packing).
//!
//! The encoder can open a stream with a clear code or continue one, and close
//! it with either end-of-information or a clear code. A stream that ends in a
//! clear code leaves the decoder in its initial state, which is what allows
//! independently compressed strips to be joined at the bit level. The bits
//! after the last whole byte are handed back as a [`BitTail`] instead of
//! being padded.

use std::io::Write;

use crate::{GifError, Result};

/// Codes never exceed 12 bits.
pub const MAX_CODE_WIDTH: u8 = 12;

const MAX_CODE: u32 = (1 << MAX_CODE_WIDTH) - 1;

// Open addressing hash table, entries are `key << 12 | code`.
const TABLE_SIZE: usize = 4 * (1 << MAX_CODE_WIDTH);
const TABLE_MASK: u32 = TABLE_SIZE as u32 - 1;
const INVALID_ENTRY: u32 = 0;

const FLUSH_THRESHOLD: usize = 4096;

/// Last code written by [`LzwEncoder::finish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    /// Ends the image data.
    EndOfInformation,
    /// Resets the decoder, another stream follows.
    Clear,
}

/// Bits left over after the last whole byte, `len` is 0..8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitTail {
    pub bits: u8,
    pub len: u8,
}

impl BitTail {
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

pub struct LzwEncoder<W: Write> {
    sink: W,
    out: Vec<u8>,

    lit_width: u8,
    leading_clear: bool,

    // current code width and the next code to be assigned
    width: u8,
    hi: u32,
    overflow: u32,
    saved_code: Option<u32>,

    bits: u32,
    n_bits: u8,

    table: Vec<u32>,
}

impl<W: Write> LzwEncoder<W> {
    /// Creates an encoder for literals of `lit_width` bits (2..=8) that opens the stream with a clear code.
    pub fn new(sink: W, lit_width: u8) -> Self {
        debug_assert!((2..=8).contains(&lit_width));
        let clear = 1u32 << lit_width;
        Self {
            sink,
            out: Vec::with_capacity(FLUSH_THRESHOLD + 2),
            lit_width,
            leading_clear: true,
            width: lit_width + 1,
            hi: clear + 1,
            overflow: clear << 1,
            saved_code: None,
            bits: 0,
            n_bits: 0,
            table: vec![INVALID_ENTRY; TABLE_SIZE],
        }
    }

    /// Whether the stream starts with a clear code. Disable it for a stream
    /// that continues one ending in [`Terminator::Clear`].
    pub fn with_leading_clear(mut self, leading_clear: bool) -> Self {
        self.leading_clear = leading_clear;
        self
    }

    fn clear_code(&self) -> u32 {
        1 << self.lit_width
    }

    fn end_code(&self) -> u32 {
        self.clear_code() + 1
    }

    pub fn encode(&mut self, data: &[u8]) -> Result<()> {
        let mut input = data.iter();
        let mut code = match self.saved_code {
            Some(code) => code,
            None => {
                let Some(&first) = input.next() else {
                    return Ok(());
                };
                self.check_literal(first)?;
                if self.leading_clear {
                    self.emit(self.clear_code())?;
                }
                first as u32
            }
        };

        'next: for &x in input {
            self.check_literal(x)?;
            let literal = x as u32;
            let key = code << 8 | literal;

            let mut hash = (key >> 12 ^ key) & TABLE_MASK;
            let mut h = hash;
            loop {
                let t = self.table[h as usize];
                if t == INVALID_ENTRY {
                    break;
                }
                if key == t >> 12 {
                    code = t & MAX_CODE;
                    continue 'next;
                }
                h = (h + 1) & TABLE_MASK;
            }

            self.emit(code)?;
            code = literal;
            if self.inc_hi()? {
                continue;
            }
            while self.table[hash as usize] != INVALID_ENTRY {
                hash = (hash + 1) & TABLE_MASK;
            }
            self.table[hash as usize] = key << 12 | self.hi;
        }
        self.saved_code = Some(code);
        Ok(())
    }

    /// Writes the pending code and the terminator, returns the sink and the unwritten bits.
    pub fn finish(mut self, terminator: Terminator) -> Result<(W, BitTail)> {
        match self.saved_code {
            Some(code) => {
                self.emit(code)?;
                // the decoder grows its table on this code as well
                self.inc_hi()?;
            }
            None => {
                if self.leading_clear {
                    self.emit(self.clear_code())?;
                }
            }
        }
        let last = match terminator {
            Terminator::EndOfInformation => self.end_code(),
            Terminator::Clear => self.clear_code(),
        };
        self.emit(last)?;
        self.flush_out()?;

        let tail = BitTail {
            bits: self.bits as u8,
            len: self.n_bits,
        };
        Ok((self.sink, tail))
    }

    fn check_literal(&self, x: u8) -> Result<()> {
        if (x as u32) >> self.lit_width != 0 {
            return Err(GifError::IndexOutOfRange {
                index: x,
                lit_width: self.lit_width,
            });
        }
        Ok(())
    }

    /// Advances to the next code, returns true if the table ran full and was reset.
    fn inc_hi(&mut self) -> Result<bool> {
        self.hi += 1;
        if self.hi == self.overflow {
            self.width += 1;
            self.overflow <<= 1;
        }
        if self.hi == MAX_CODE {
            let clear = self.clear_code();
            self.emit(clear)?;
            self.width = self.lit_width + 1;
            self.hi = clear + 1;
            self.overflow = clear << 1;
            self.table.fill(INVALID_ENTRY);
            return Ok(true);
        }
        Ok(false)
    }

    fn emit(&mut self, code: u32) -> Result<()> {
        self.bits |= code << self.n_bits;
        self.n_bits += self.width;
        while self.n_bits >= 8 {
            self.out.push(self.bits as u8);
            self.bits >>= 8;
            self.n_bits -= 8;
        }
        if self.out.len() >= FLUSH_THRESHOLD {
            self.flush_out()?;
        }
        Ok(())
    }

    fn flush_out(&mut self) -> Result<()> {
        if !self.out.is_empty() {
            self.sink.write_all(&self.out)?;
            self.out.clear();
        }
        Ok(())
    }
}

/// Compresses `data` as one complete stream, the final byte is zero padded.
pub fn compress_to_vec(data: &[u8], lit_width: u8) -> Result<Vec<u8>> {
    let mut encoder = LzwEncoder::new(Vec::new(), lit_width);
    encoder.encode(data)?;
    let (mut out, tail) = encoder.finish(Terminator::EndOfInformation)?;
    if !tail.is_empty() {
        out.push(tail.bits);
    }
    Ok(out)
}
