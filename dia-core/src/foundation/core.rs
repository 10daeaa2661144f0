use crate::foundation::error::{DiaError, DiaResult};
use crate::foundation::math::checked_byte_len;

/// Width/height pair in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Construct a size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub(crate) fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Rectangular 8-bit pixel buffer with 3 (RGB) or 4 (RGBA) interleaved channels.
///
/// Byte for channel `c` of pixel `(x, y)` lives at `y * stride + x * channels + c`.
/// Channel 3, when present, is straight (non-premultiplied) alpha.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    stride: usize,
    data: Vec<u8>,
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .field("stride", &self.stride)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl PixelBuffer {
    /// Allocate a tightly packed buffer with every pixel set to `px`.
    ///
    /// `px.len()` is the channel count and must be 3 or 4.
    pub fn new_filled(width: u32, height: u32, px: &[u8]) -> DiaResult<Self> {
        let channels = validate_channels(px.len())?;
        let stride = (width as usize)
            .checked_mul(usize::from(channels))
            .ok_or_else(|| DiaError::invalid_buffer("row stride overflow"))?;
        let len = checked_byte_len(stride, height)
            .ok_or_else(|| DiaError::invalid_buffer("buffer size overflow"))?;
        let mut data = Vec::with_capacity(len);
        for _ in 0..(width as usize) * (height as usize) {
            data.extend_from_slice(px);
        }
        Ok(Self {
            width,
            height,
            channels,
            stride,
            data,
        })
    }

    /// Wrap raw bytes laid out as `height` rows of `stride` bytes.
    ///
    /// Rows may be padded (`stride > width * channels`); the final row may omit its padding.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: u8,
        stride: usize,
        data: Vec<u8>,
    ) -> DiaResult<Self> {
        let channels = validate_channels(usize::from(channels))?;
        let row_len = (width as usize)
            .checked_mul(usize::from(channels))
            .ok_or_else(|| DiaError::invalid_buffer("row stride overflow"))?;
        if stride < row_len {
            return Err(DiaError::invalid_buffer(format!(
                "stride {stride} is smaller than a {width}px row of {channels} channels"
            )));
        }
        let needed = if height == 0 {
            0
        } else {
            checked_byte_len(stride, height - 1)
                .and_then(|v| v.checked_add(row_len))
                .ok_or_else(|| DiaError::invalid_buffer("buffer size overflow"))?
        };
        if data.len() < needed {
            return Err(DiaError::invalid_buffer(format!(
                "expected at least {needed} bytes for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            stride,
            data,
        })
    }

    /// Wrap tightly packed bytes (`stride == width * channels`).
    pub fn from_packed(width: u32, height: u32, channels: u8, data: Vec<u8>) -> DiaResult<Self> {
        let stride = (width as usize) * usize::from(channels);
        Self::from_raw(width, height, channels, stride, data)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as a [`Size`].
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Channels per pixel: 3 (RGB) or 4 (RGBA).
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Bytes per row, including padding.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Whether channel 3 (alpha) is present.
    pub fn has_alpha(&self) -> bool {
        self.channels == 4
    }

    /// Backing bytes, row padding included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, returning its backing bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Channel bytes of pixel `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let at = self.offset(x, y);
        &self.data[at..at + usize::from(self.channels)]
    }

    /// Mutable channel bytes of pixel `(x, y)`. Panics when out of bounds.
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [u8] {
        let at = self.offset(x, y);
        let n = usize::from(self.channels);
        &mut self.data[at..at + n]
    }

    /// The first `width * channels` bytes of row `y`.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = (y as usize) * self.stride;
        &self.data[start..start + self.row_len()]
    }

    /// Mutable view of [`PixelBuffer::row`].
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = (y as usize) * self.stride;
        let len = self.row_len();
        &mut self.data[start..start + len]
    }

    /// Return an RGBA copy with the added alpha channel set to 255. RGBA input is returned as-is.
    pub fn with_alpha_channel(self) -> Self {
        if self.has_alpha() {
            return self;
        }
        let mut data = Vec::with_capacity((self.width as usize) * (self.height as usize) * 4);
        for y in 0..self.height {
            for px in self.row(y).chunks_exact(3) {
                data.extend_from_slice(&[px[0], px[1], px[2], 255]);
            }
        }
        Self {
            width: self.width,
            height: self.height,
            channels: 4,
            stride: (self.width as usize) * 4,
            data,
        }
    }

    /// Tightly packed straight RGBA8 bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        if self.has_alpha() && self.stride == self.row_len() {
            return self.data[..self.row_len() * self.height as usize].to_vec();
        }
        self.clone().with_alpha_channel().repack().data
    }

    fn repack(self) -> Self {
        if self.stride == self.row_len() {
            return self;
        }
        let mut data = Vec::with_capacity(self.row_len() * self.height as usize);
        for y in 0..self.height {
            data.extend_from_slice(self.row(y));
        }
        Self {
            stride: self.row_len(),
            data,
            ..self
        }
    }

    fn row_len(&self) -> usize {
        (self.width as usize) * usize::from(self.channels)
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x},{y}) out of bounds for {}x{}",
            self.width,
            self.height
        );
        (y as usize) * self.stride + (x as usize) * usize::from(self.channels)
    }
}

fn validate_channels(n: usize) -> DiaResult<u8> {
    match n {
        3 | 4 => Ok(n as u8),
        _ => Err(DiaError::invalid_buffer(format!(
            "unsupported channel count {n} (expected 3 or 4)"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
