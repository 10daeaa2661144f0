use super::*;

#[test]
fn mul_div255_floor_truncates() {
    assert_eq!(mul_div255_floor(200, 128), 100);
    assert_eq!(mul_div255_floor(255, 255), 255);
    assert_eq!(mul_div255_floor(0, 77), 0);
    assert_eq!(mul_div255_floor(77, 0), 0);
    // 254 * 254 / 255 = 253.0039..
    assert_eq!(mul_div255_floor(254, 254), 253);
    assert_eq!(mul_div255_floor(1, 254), 0);
}

#[test]
fn mul_div255_floor_identity_at_full_scale() {
    for x in 0..=255u8 {
        assert_eq!(mul_div255_floor(x, 255), x);
        assert_eq!(mul_div255_floor(255, x), x);
    }
}

#[test]
fn checked_byte_len_detects_overflow() {
    assert_eq!(checked_byte_len(12, 3), Some(36));
    assert_eq!(checked_byte_len(usize::MAX, 2), None);
}
