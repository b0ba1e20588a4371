#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_lossless,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]
//! Fast parallel GIF encoder using the 216 color web safe palette.
//!
//! The pipeline has two parallel stages: [`quantize`] maps the source pixels
//! onto the palette, [`write_gif`] serializes the resulting [`IndexBuffer`]
//! with a block parallel LZW compressor.

mod error;
pub use error::*;

mod options;
pub use options::*;

pub mod palette;
pub use palette::{web_safe_palette, WEB_SAFE_COLORS};

mod source;
pub use source::*;

mod index_buffer;
pub use index_buffer::*;

mod strips;

mod quantize;
pub use quantize::quantize;

pub mod block_writer;
pub use block_writer::BlockWriter;

pub mod lzw;
pub mod compress;

pub mod container;
pub use container::write_gif;

mod gif_encoder;
pub use gif_encoder::*;
