//! Parallel mapping of source pixels onto the web safe palette.
//!
//! Rows are partitioned into strips, each worker owns the matching disjoint
//! slice of the index buffer. No locks are taken, the level table and the
//! source are only read.

use std::ops::Range;

use rayon::prelude::*;

use crate::{palette::palette_index, strips, Bounds, IndexBuffer, PixelSource, Rgba16};

/// Quantizes `source` into an index buffer using up to `workers` parallel workers.
///
/// The result is independent of the worker count. The source origin is
/// normalized away, index (0, 0) is the top left pixel of the source bounds.
pub fn quantize<S: PixelSource + ?Sized>(source: &S, workers: usize) -> IndexBuffer {
    let bounds = source.bounds();
    let mut buffer = IndexBuffer::new(bounds.width as usize, bounds.height as usize);
    if bounds.is_empty() {
        return buffer;
    }

    let strips = strips::partition(bounds.height as usize, workers);
    let parts = strips::split_rows_mut(buffer.pixels_mut(), bounds.width as usize, &strips);

    match source.as_rgba64() {
        Some(fast) => {
            log::debug!("quantizing {}x{} (16 bit path) with {} workers", bounds.width, bounds.height, strips.len());
            quantize_strips(bounds, parts, &strips, |x, y| fast.rgba64_at(x, y));
        }
        None => {
            log::debug!("quantizing {}x{} (generic path) with {} workers", bounds.width, bounds.height, strips.len());
            quantize_strips(bounds, parts, &strips, |x, y| source.color_at(x, y));
        }
    }
    buffer
}

fn quantize_strips<F>(bounds: Bounds, parts: Vec<&mut [u8]>, strips: &[Range<usize>], color: F)
where
    F: Fn(i32, i32) -> Rgba16 + Sync,
{
    if parts.len() == 1 {
        for (rows, strip) in parts.into_iter().zip(strips) {
            quantize_rows(rows, strip.start, bounds, &color);
        }
        return;
    }

    parts
        .into_par_iter()
        .zip(strips.par_iter())
        .for_each(|(rows, strip)| quantize_rows(rows, strip.start, bounds, &color));
}

fn quantize_rows<F>(rows: &mut [u8], first_row: usize, bounds: Bounds, color: &F)
where
    F: Fn(i32, i32) -> Rgba16,
{
    for (dy, row) in rows.chunks_exact_mut(bounds.width as usize).enumerate() {
        let y = bounds.y.wrapping_add((first_row + dy) as i32);
        for (dx, index) in row.iter_mut().enumerate() {
            let (r, g, b) = color(bounds.x.wrapping_add(dx as i32), y).to_rgb8();
            *index = palette_index(r, g, b);
        }
    }
}
