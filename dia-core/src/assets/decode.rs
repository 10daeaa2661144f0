use std::io::Cursor;

use anyhow::Context;
use image::{DynamicImage, ImageFormat, imageops::FilterType};

use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{DiaError, DiaResult};

/// Turns encoded bytes into [`PixelBuffer`]s and resizes them.
pub trait ImageCodec: Send + Sync {
    /// Decode `bytes` into a 3-channel (RGB) or 4-channel (RGBA) buffer.
    ///
    /// Sources with an alpha channel decode to RGBA; everything else decodes to RGB.
    fn decode(&self, bytes: &[u8]) -> anyhow::Result<PixelBuffer>;

    /// Return a resized copy of `src`. Used by presentation code, never by the compositor.
    fn scale(&self, src: &PixelBuffer, width: u32, height: u32) -> DiaResult<PixelBuffer>;
}

/// [`ImageCodec`] backed by the `image` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageRsCodec;

impl ImageCodec for ImageRsCodec {
    fn decode(&self, bytes: &[u8]) -> anyhow::Result<PixelBuffer> {
        let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
        let (width, height) = (dyn_img.width(), dyn_img.height());

        let buf = if dyn_img.color().has_alpha() {
            PixelBuffer::from_packed(width, height, 4, dyn_img.to_rgba8().into_raw())?
        } else {
            // Grayscale sources are widened so channel 0 still carries intensity.
            PixelBuffer::from_packed(width, height, 3, dyn_img.to_rgb8().into_raw())?
        };
        Ok(buf)
    }

    fn scale(&self, src: &PixelBuffer, width: u32, height: u32) -> DiaResult<PixelBuffer> {
        if width == 0 || height == 0 {
            return Err(DiaError::invalid_buffer(format!(
                "cannot scale to empty size {width}x{height}"
            )));
        }
        let scaled = match to_dynamic(src)? {
            DynamicImage::ImageRgb8(img) => {
                let out = image::imageops::resize(&img, width, height, FilterType::Triangle);
                PixelBuffer::from_packed(width, height, 3, out.into_raw())?
            }
            other => {
                let img = other.to_rgba8();
                let out = image::imageops::resize(&img, width, height, FilterType::Triangle);
                PixelBuffer::from_packed(width, height, 4, out.into_raw())?
            }
        };
        Ok(scaled)
    }
}

/// Encode `buf` as PNG, keeping its channel layout.
pub fn encode_png(buf: &PixelBuffer) -> DiaResult<Vec<u8>> {
    let img = to_dynamic(buf)?;
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .context("encode png")?;
    Ok(out)
}

fn to_dynamic(buf: &PixelBuffer) -> DiaResult<DynamicImage> {
    let (w, h) = (buf.width(), buf.height());
    let mut packed = Vec::with_capacity(buf.stride() * h as usize);
    for y in 0..h {
        packed.extend_from_slice(buf.row(y));
    }

    let img = if buf.has_alpha() {
        image::RgbaImage::from_raw(w, h, packed).map(DynamicImage::ImageRgba8)
    } else {
        image::RgbImage::from_raw(w, h, packed).map(DynamicImage::ImageRgb8)
    };
    img.ok_or_else(|| DiaError::invalid_buffer(format!("{w}x{h} buffer has too few bytes")))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
