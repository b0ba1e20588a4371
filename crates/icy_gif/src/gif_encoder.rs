//! Fast single frame GIF export.
//!
//! Colors are mapped onto the fixed 216 color web safe palette without
//! dithering, trading color fidelity for encoding speed. Both the color
//! mapping and the LZW compression run on parallel workers.
//!
//! # Example
//! ```no_run
//! use icy_gif::{EncodeOptions, GifEncoder};
//!
//! let img = image::RgbaImage::new(320, 200);
//! let encoder = GifEncoder::new(EncodeOptions::new().with_workers(4));
//! encoder.encode_to_file("output.gif", &img).unwrap();
//! ```

use std::io::Write;
use std::path::Path;

use crate::{container, quantize, web_safe_palette, EncodeOptions, PixelSource, Result};

/// Encodes `source` as a GIF into `writer`.
///
/// Fails with [`crate::GifError::ImageTooLarge`] before anything is written if a
/// dimension exceeds 65535, sink errors are returned as they occur.
pub fn encode<W: Write, S: PixelSource + ?Sized>(writer: W, source: &S, options: &EncodeOptions) -> Result<()> {
    let bounds = source.bounds();
    container::check_dimensions(bounds.width as u64, bounds.height as u64)?;

    let workers = options.effective_workers();
    let indices = quantize::quantize(source, workers);
    container::write_gif(writer, &indices, web_safe_palette(), workers)
}

/// GIF encoder carrying its configuration.
#[derive(Debug, Clone, Default)]
pub struct GifEncoder {
    pub options: EncodeOptions,
}

impl GifEncoder {
    pub fn new(options: EncodeOptions) -> Self {
        Self { options }
    }

    /// Encode to a writer (e.g., file or buffer).
    pub fn encode_to_writer<W: Write, S: PixelSource + ?Sized>(&self, writer: W, source: &S) -> Result<()> {
        encode(writer, source, &self.options)
    }

    pub fn encode_to_vec<S: PixelSource + ?Sized>(&self, source: &S) -> Result<Vec<u8>> {
        let mut result = Vec::new();
        self.encode_to_writer(&mut result, source)?;
        Ok(result)
    }

    /// Encode to a GIF file. The file is not created if the image is too large.
    pub fn encode_to_file<S: PixelSource + ?Sized>(&self, path: impl AsRef<Path>, source: &S) -> Result<()> {
        let bounds = source.bounds();
        container::check_dimensions(bounds.width as u64, bounds.height as u64)?;
        let file = std::fs::File::create(path.as_ref())?;
        self.encode_to_writer(file, source)
    }
}
