use crate::assets::decode::ImageCodec;
use crate::foundation::core::{PixelBuffer, Size};
use crate::foundation::error::DiaResult;

/// Pixels kept free on each axis when fitting into a viewport.
pub const VIEWPORT_MARGIN: u32 = 5;

/// Largest size no bigger than `image` that fits inside `viewport` minus [`VIEWPORT_MARGIN`],
/// keeping the aspect ratio. Only ever scales down.
///
/// Returns `None` when the usable viewport area or the fitted size is empty.
pub fn fit_within(image: Size, viewport: Size) -> Option<Size> {
    if image.is_empty() {
        return None;
    }
    let avail_w = viewport.width.checked_sub(VIEWPORT_MARGIN)?;
    let avail_h = viewport.height.checked_sub(VIEWPORT_MARGIN)?;
    if avail_w == 0 || avail_h == 0 {
        return None;
    }

    let scale_x = f64::from(avail_w) / f64::from(image.width);
    let scale_y = f64::from(avail_h) / f64::from(image.height);
    let scale = scale_x.min(scale_y).min(1.0);

    let out = Size::new(
        (f64::from(image.width) * scale) as u32,
        (f64::from(image.height) * scale) as u32,
    );
    (!out.is_empty()).then_some(out)
}

/// Scale `src` down to fit `viewport` with `codec`. Returns `None` when nothing would be visible.
pub fn scale_to_fit(
    codec: &dyn ImageCodec,
    src: &PixelBuffer,
    viewport: Size,
) -> DiaResult<Option<PixelBuffer>> {
    let Some(target) = fit_within(src.size(), viewport) else {
        return Ok(None);
    };
    if target == src.size() {
        return Ok(Some(src.clone()));
    }
    codec.scale(src, target.width, target.height).map(Some)
}

#[cfg(test)]
#[path = "../../tests/unit/render/fit.rs"]
mod tests;
