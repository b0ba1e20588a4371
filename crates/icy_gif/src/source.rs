//! Pixel sources the quantizer reads from.
//!
//! A source exposes its bounds and a per-pixel color query. Sources that store
//! 16 bit channels natively can additionally hand out a [`Rgba64Source`] view,
//! which the quantizer prefers when it is available.

use std::ops::Deref;

use image::{DynamicImage, GenericImageView, ImageBuffer, Luma, LumaA, Rgb, Rgba};

/// Pixel rectangle of a source. The origin does not need to be (0, 0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A color with 16 bits per channel. 8 bit values are expanded by `* 257`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgba16 {
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub a: u16,
}

impl Rgba16 {
    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(r as u16 * 257, g as u16 * 257, b as u16 * 257, a as u16 * 257)
    }

    /// The high byte of each color channel.
    #[inline]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        ((self.r >> 8) as u8, (self.g >> 8) as u8, (self.b >> 8) as u8)
    }
}

/// Random access to sources storing 16 bits per channel.
pub trait Rgba64Source: Sync {
    fn rgba64_at(&self, x: i32, y: i32) -> Rgba16;
}

/// An in-memory image the encoder can read from.
///
/// Coordinates passed to the query methods are absolute, i.e. they lie inside
/// [`PixelSource::bounds`] and include its origin.
pub trait PixelSource: Sync {
    fn bounds(&self) -> Bounds;

    /// Generic color query, normalized to 16 bits per channel.
    fn color_at(&self, x: i32, y: i32) -> Rgba16;

    /// Native 16 bit access, if the source has it.
    fn as_rgba64(&self) -> Option<&dyn Rgba64Source> {
        None
    }
}

impl<S: PixelSource + ?Sized> PixelSource for &S {
    fn bounds(&self) -> Bounds {
        (**self).bounds()
    }

    fn color_at(&self, x: i32, y: i32) -> Rgba16 {
        (**self).color_at(x, y)
    }

    fn as_rgba64(&self) -> Option<&dyn Rgba64Source> {
        (**self).as_rgba64()
    }
}

macro_rules! impl_8bit_source {
    ($pixel:ty, |$p:ident| $color:expr) => {
        impl<C> PixelSource for ImageBuffer<$pixel, C>
        where
            C: Deref<Target = [u8]> + Sync,
        {
            fn bounds(&self) -> Bounds {
                Bounds::from_size(self.width(), self.height())
            }

            #[inline]
            fn color_at(&self, x: i32, y: i32) -> Rgba16 {
                let $p = self.get_pixel(x as u32, y as u32);
                $color
            }
        }
    };
}

macro_rules! impl_16bit_source {
    ($pixel:ty, |$p:ident| $color:expr) => {
        impl<C> Rgba64Source for ImageBuffer<$pixel, C>
        where
            C: Deref<Target = [u16]> + Sync,
        {
            #[inline]
            fn rgba64_at(&self, x: i32, y: i32) -> Rgba16 {
                let $p = self.get_pixel(x as u32, y as u32);
                $color
            }
        }

        impl<C> PixelSource for ImageBuffer<$pixel, C>
        where
            C: Deref<Target = [u16]> + Sync,
        {
            fn bounds(&self) -> Bounds {
                Bounds::from_size(self.width(), self.height())
            }

            fn color_at(&self, x: i32, y: i32) -> Rgba16 {
                self.rgba64_at(x, y)
            }

            fn as_rgba64(&self) -> Option<&dyn Rgba64Source> {
                Some(self as &dyn Rgba64Source)
            }
        }
    };
}

impl_8bit_source!(Rgba<u8>, |p| Rgba16::from_rgba8(p[0], p[1], p[2], p[3]));
impl_8bit_source!(Rgb<u8>, |p| Rgba16::from_rgba8(p[0], p[1], p[2], 0xFF));
impl_8bit_source!(Luma<u8>, |p| Rgba16::from_rgba8(p[0], p[0], p[0], 0xFF));
impl_8bit_source!(LumaA<u8>, |p| Rgba16::from_rgba8(p[0], p[0], p[0], p[1]));

impl_16bit_source!(Rgba<u16>, |p| Rgba16::new(p[0], p[1], p[2], p[3]));
impl_16bit_source!(Rgb<u16>, |p| Rgba16::new(p[0], p[1], p[2], 0xFFFF));
impl_16bit_source!(Luma<u16>, |p| Rgba16::new(p[0], p[0], p[0], 0xFFFF));
impl_16bit_source!(LumaA<u16>, |p| Rgba16::new(p[0], p[0], p[0], p[1]));

impl PixelSource for DynamicImage {
    fn bounds(&self) -> Bounds {
        Bounds::from_size(self.width(), self.height())
    }

    fn color_at(&self, x: i32, y: i32) -> Rgba16 {
        match self {
            DynamicImage::ImageRgba8(buf) => buf.color_at(x, y),
            DynamicImage::ImageRgb8(buf) => buf.color_at(x, y),
            DynamicImage::ImageLuma8(buf) => buf.color_at(x, y),
            DynamicImage::ImageLumaA8(buf) => buf.color_at(x, y),
            DynamicImage::ImageRgba16(buf) => buf.color_at(x, y),
            DynamicImage::ImageRgb16(buf) => buf.color_at(x, y),
            DynamicImage::ImageLuma16(buf) => buf.color_at(x, y),
            DynamicImage::ImageLumaA16(buf) => buf.color_at(x, y),
            _ => {
                let p = self.get_pixel(x as u32, y as u32);
                Rgba16::from_rgba8(p[0], p[1], p[2], p[3])
            }
        }
    }

    fn as_rgba64(&self) -> Option<&dyn Rgba64Source> {
        match self {
            DynamicImage::ImageRgba16(buf) => Some(buf as &dyn Rgba64Source),
            DynamicImage::ImageRgb16(buf) => Some(buf as &dyn Rgba64Source),
            DynamicImage::ImageLuma16(buf) => Some(buf as &dyn Rgba64Source),
            DynamicImage::ImageLumaA16(buf) => Some(buf as &dyn Rgba64Source),
            _ => None,
        }
    }
}

/// Places a source at a different origin.
pub struct Offset<S> {
    source: S,
    x: i32,
    y: i32,
}

impl<S: PixelSource> Offset<S> {
    pub fn new(source: S, x: i32, y: i32) -> Self {
        Self { source, x, y }
    }
}

impl<S: PixelSource> PixelSource for Offset<S> {
    fn bounds(&self) -> Bounds {
        let inner = self.source.bounds();
        Bounds::new(inner.x.wrapping_add(self.x), inner.y.wrapping_add(self.y), inner.width, inner.height)
    }

    fn color_at(&self, x: i32, y: i32) -> Rgba16 {
        self.source.color_at(x.wrapping_sub(self.x), y.wrapping_sub(self.y))
    }

    fn as_rgba64(&self) -> Option<&dyn Rgba64Source> {
        self.source.as_rgba64().map(|_| self as &dyn Rgba64Source)
    }
}

impl<S: PixelSource> Rgba64Source for Offset<S> {
    fn rgba64_at(&self, x: i32, y: i32) -> Rgba16 {
        match self.source.as_rgba64() {
            Some(inner) => inner.rgba64_at(x.wrapping_sub(self.x), y.wrapping_sub(self.y)),
            None => self.source.color_at(x.wrapping_sub(self.x), y.wrapping_sub(self.y)),
        }
    }
}
