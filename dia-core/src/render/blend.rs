use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{DiaError, DiaResult};
use crate::foundation::math::mul_div255_floor;

/// How an alpha map's intensity is merged into the canvas alpha channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlphaPolicy {
    /// `alpha = map`. Used for the base layer's own alpha map.
    Replace,
    /// `alpha = floor(alpha * map / 255)`. Used for overlay alpha maps.
    Combine,
}

impl AlphaPolicy {
    /// New alpha for a pixel with alpha `existing` under map intensity `map`.
    #[inline]
    pub fn apply(self, existing: u8, map: u8) -> u8 {
        match self {
            AlphaPolicy::Replace => map,
            AlphaPolicy::Combine => mul_div255_floor(existing, map),
        }
    }
}

/// Merge `alpha_map` channel 0 into `canvas`'s alpha channel over the whole canvas.
///
/// The map is read as an intensity mask, so it may be RGB or RGBA. Its dimensions must match
/// the canvas exactly, and the canvas must be RGBA; both are checked before any byte changes.
pub fn apply_alpha_map(
    canvas: &mut PixelBuffer,
    alpha_map: &PixelBuffer,
    policy: AlphaPolicy,
) -> DiaResult<()> {
    if canvas.size() != alpha_map.size() {
        return Err(DiaError::AlphaSizeMismatch {
            expected: canvas.size().as_tuple(),
            actual: alpha_map.size().as_tuple(),
        });
    }
    if !canvas.has_alpha() {
        return Err(DiaError::MissingAlphaChannel {
            channels: canvas.channels(),
        });
    }

    let map_channels = usize::from(alpha_map.channels());
    for y in 0..canvas.height() {
        let map_row = alpha_map.row(y);
        let row = canvas.row_mut(y);
        for (px, m) in row.chunks_exact_mut(4).zip(map_row.chunks_exact(map_channels)) {
            px[3] = policy.apply(px[3], m[0]);
        }
    }
    Ok(())
}

/// Overwrite the top-left-aligned overlap of `canvas` and `overlay` with `overlay`'s pixels.
///
/// 1:1 scale, nearest sampling, full opacity: the overlap rectangle takes the overlay's
/// channels verbatim and everything outside it keeps the canvas's prior content. Returns the
/// pasted `(width, height)`; `(0, 0)`-area overlaps are a no-op.
pub fn paste_overlay(canvas: &mut PixelBuffer, overlay: &PixelBuffer) -> DiaResult<(u32, u32)> {
    if canvas.channels() != overlay.channels() {
        return Err(DiaError::invalid_buffer(format!(
            "cannot paste {}-channel overlay onto {}-channel canvas",
            overlay.channels(),
            canvas.channels()
        )));
    }

    let w = canvas.width().min(overlay.width());
    let h = canvas.height().min(overlay.height());
    if w == 0 || h == 0 {
        return Ok((0, 0));
    }

    let span = (w as usize) * usize::from(canvas.channels());
    for y in 0..h {
        canvas.row_mut(y)[..span].copy_from_slice(&overlay.row(y)[..span]);
    }
    Ok((w, h))
}

#[cfg(test)]
#[path = "../../tests/unit/render/blend.rs"]
mod tests;
