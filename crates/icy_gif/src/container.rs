//! GIF89a container: header, logical screen descriptor, global color table,
//! image descriptor and the framed LZW payload of a single frame.

use std::io::{BufWriter, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::{
    block_writer::BlockWriter,
    compress::compress,
    palette::{lit_width, padded_palette_size, table_size_exponent},
    GifError, IndexBuffer, Result,
};

pub const SIGNATURE: &[u8; 6] = b"GIF89a";
pub const IMAGE_SEPARATOR: u8 = 0x2C;
pub const BLOCK_TERMINATOR: u8 = 0x00;
pub const TRAILER: u8 = 0x3B;

const GLOBAL_COLOR_TABLE_FLAG: u8 = 0x80;

/// Largest width or height a GIF can describe.
pub const MAX_DIMENSION: u64 = u16::MAX as u64;

/// Fails with [`GifError::ImageTooLarge`] if a dimension does not fit the 16 bit size fields.
pub fn check_dimensions(width: u64, height: u64) -> Result<()> {
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(GifError::ImageTooLarge { width, height });
    }
    Ok(())
}

/// Writes `indices` as a complete single frame GIF using `palette` as global color table.
///
/// All preconditions are checked before the first byte is written.
pub fn write_gif<W: Write>(writer: W, indices: &IndexBuffer, palette: &[[u8; 3]], workers: usize) -> Result<()> {
    if palette.is_empty() {
        return Err(GifError::EmptyPalette);
    }
    check_dimensions(indices.width() as u64, indices.height() as u64)?;
    let lit_width = lit_width(palette.len());
    check_indices(indices, lit_width)?;

    let width = indices.width() as u16;
    let height = indices.height() as u16;
    let padded_size = padded_palette_size(palette.len());

    let mut w = BufWriter::new(writer);
    w.write_all(SIGNATURE)?;

    // Logical Screen Descriptor
    w.write_u16::<LittleEndian>(width)?;
    w.write_u16::<LittleEndian>(height)?;
    w.write_u8(GLOBAL_COLOR_TABLE_FLAG | table_size_exponent(padded_size))?;
    w.write_u8(0x00)?; // background color index
    w.write_u8(0x00)?; // pixel aspect ratio

    write_color_table(&mut w, palette, padded_size)?;

    // Image Descriptor
    w.write_u8(IMAGE_SEPARATOR)?;
    w.write_u16::<LittleEndian>(0)?; // left
    w.write_u16::<LittleEndian>(0)?; // top
    w.write_u16::<LittleEndian>(width)?;
    w.write_u16::<LittleEndian>(height)?;
    w.write_u8(0x00)?; // no local color table, not interlaced

    w.write_u8(lit_width)?;

    let mut blocks = BlockWriter::new(&mut w);
    compress(&mut blocks, indices, lit_width, workers)?;
    blocks.finish()?;

    w.write_u8(BLOCK_TERMINATOR)?;
    w.write_u8(TRAILER)?;
    w.flush()?;
    Ok(())
}

/// Fails with [`GifError::IndexOutOfRange`] on the first index that needs more than `lit_width` bits.
fn check_indices(indices: &IndexBuffer, lit_width: u8) -> Result<()> {
    match indices.pixels().iter().find(|&&index| (index as u32) >> lit_width != 0) {
        Some(&index) => Err(GifError::IndexOutOfRange { index, lit_width }),
        None => Ok(()),
    }
}

/// Writes `padded_size` RGB entries, entries past the palette are black.
fn write_color_table<W: Write>(w: &mut W, palette: &[[u8; 3]], padded_size: usize) -> Result<()> {
    for i in 0..padded_size {
        match palette.get(i) {
            Some(rgb) => w.write_all(rgb)?,
            None => w.write_all(&[0, 0, 0])?,
        }
    }
    Ok(())
}
