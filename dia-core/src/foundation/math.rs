/// `floor(x * y / 255)` for 8-bit channel values. Truncates toward zero.
pub(crate) fn mul_div255_floor(x: u8, y: u8) -> u8 {
    ((u16::from(x) * u16::from(y)) / 255) as u8
}

/// Bytes needed for `rows` rows of `stride` bytes, or `None` on overflow.
pub(crate) fn checked_byte_len(stride: usize, rows: u32) -> Option<usize> {
    stride.checked_mul(rows as usize)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
