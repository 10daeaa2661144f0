use super::*;

fn gray_map(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> PixelBuffer {
    let mut data = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let v = f(x, y);
            data.extend_from_slice(&[v, v, v]);
        }
    }
    PixelBuffer::from_packed(width, height, 3, data).unwrap()
}

#[test]
fn policy_arithmetic() {
    assert_eq!(AlphaPolicy::Combine.apply(200, 128), 100);
    assert_eq!(AlphaPolicy::Combine.apply(255, 255), 255);
    for m in [0u8, 1, 128, 255] {
        assert_eq!(AlphaPolicy::Combine.apply(0, m), 0);
        assert_eq!(AlphaPolicy::Replace.apply(17, m), m);
    }
}

#[test]
fn replace_sets_alpha_from_channel_zero() {
    let mut canvas = PixelBuffer::new_filled(3, 2, &[9, 8, 7, 42]).unwrap();
    let map = gray_map(3, 2, |x, y| (x * 50 + y * 100) as u8);

    apply_alpha_map(&mut canvas, &map, AlphaPolicy::Replace).unwrap();
    for y in 0..2 {
        for x in 0..3 {
            assert_eq!(canvas.pixel(x, y), &[9, 8, 7, (x * 50 + y * 100) as u8]);
        }
    }
}

#[test]
fn map_reads_channel_zero_not_its_own_alpha() {
    let mut canvas = PixelBuffer::new_filled(1, 1, &[0, 0, 0, 255]).unwrap();
    let map = PixelBuffer::from_packed(1, 1, 4, vec![64, 1, 2, 255]).unwrap();
    apply_alpha_map(&mut canvas, &map, AlphaPolicy::Replace).unwrap();
    assert_eq!(canvas.pixel(0, 0)[3], 64);
}

#[test]
fn combine_attenuates_existing_alpha() {
    let mut canvas = PixelBuffer::from_packed(
        3,
        1,
        4,
        vec![1, 1, 1, 200, 2, 2, 2, 255, 3, 3, 3, 0],
    )
    .unwrap();
    let map = gray_map(3, 1, |x, _| [128, 255, 77][x as usize]);

    apply_alpha_map(&mut canvas, &map, AlphaPolicy::Combine).unwrap();
    assert_eq!(canvas.pixel(0, 0), &[1, 1, 1, 100]);
    assert_eq!(canvas.pixel(1, 0), &[2, 2, 2, 255]);
    assert_eq!(canvas.pixel(2, 0), &[3, 3, 3, 0]);
}

#[test]
fn size_mismatch_leaves_canvas_untouched() {
    let mut canvas = PixelBuffer::new_filled(4, 3, &[5, 6, 7, 200]).unwrap();
    let before = canvas.clone();
    let map = gray_map(3, 3, |_, _| 0);

    for policy in [AlphaPolicy::Replace, AlphaPolicy::Combine] {
        let err = apply_alpha_map(&mut canvas, &map, policy).unwrap_err();
        assert!(matches!(
            err,
            DiaError::AlphaSizeMismatch {
                expected: (4, 3),
                actual: (3, 3)
            }
        ));
        assert_eq!(canvas, before);
    }
}

#[test]
fn rgb_canvas_is_rejected() {
    let mut canvas = PixelBuffer::new_filled(2, 2, &[1, 2, 3]).unwrap();
    let before = canvas.clone();
    let map = gray_map(2, 2, |_, _| 9);
    let err = apply_alpha_map(&mut canvas, &map, AlphaPolicy::Replace).unwrap_err();
    assert!(matches!(err, DiaError::MissingAlphaChannel { channels: 3 }));
    assert_eq!(canvas, before);
}

#[test]
fn padded_alpha_map_rows_are_respected() {
    let mut canvas = PixelBuffer::new_filled(2, 2, &[0, 0, 0, 0]).unwrap();
    // stride 8 for a 2px RGB row (6 bytes) plus 2 bytes padding.
    let data = vec![10, 0, 0, 20, 0, 0, 99, 99, 30, 0, 0, 40, 0, 0];
    let map = PixelBuffer::from_raw(2, 2, 3, 8, data).unwrap();
    apply_alpha_map(&mut canvas, &map, AlphaPolicy::Replace).unwrap();
    let alphas: Vec<u8> = (0..2)
        .flat_map(|y| (0..2).map(move |x| (x, y)))
        .map(|(x, y)| canvas.pixel(x, y)[3])
        .collect();
    assert_eq!(alphas, vec![10, 20, 30, 40]);
}

#[test]
fn larger_overlay_is_clipped_to_canvas() {
    let mut canvas = PixelBuffer::new_filled(2, 2, &[0, 0, 0, 255]).unwrap();
    let overlay = PixelBuffer::new_filled(5, 4, &[200, 100, 50, 255]).unwrap();
    assert_eq!(paste_overlay(&mut canvas, &overlay).unwrap(), (2, 2));
    assert_eq!(canvas, PixelBuffer::new_filled(2, 2, &[200, 100, 50, 255]).unwrap());
}

#[test]
fn smaller_overlay_keeps_outer_pixels() {
    let mut canvas = PixelBuffer::new_filled(3, 3, &[1, 1, 1, 255]).unwrap();
    let overlay = PixelBuffer::new_filled(2, 1, &[9, 9, 9, 128]).unwrap();
    assert_eq!(paste_overlay(&mut canvas, &overlay).unwrap(), (2, 1));

    for y in 0..3 {
        for x in 0..3 {
            let expected: &[u8] = if x < 2 && y < 1 {
                &[9, 9, 9, 128]
            } else {
                &[1, 1, 1, 255]
            };
            assert_eq!(canvas.pixel(x, y), expected, "pixel ({x},{y})");
        }
    }
}

#[test]
fn paste_is_overwrite_not_blend() {
    let mut canvas = PixelBuffer::new_filled(1, 1, &[255, 255, 255, 255]).unwrap();
    let overlay = PixelBuffer::new_filled(1, 1, &[0, 0, 0, 0]).unwrap();
    paste_overlay(&mut canvas, &overlay).unwrap();
    assert_eq!(canvas.pixel(0, 0), &[0, 0, 0, 0]);
}

#[test]
fn empty_overlap_is_noop() {
    let mut canvas = PixelBuffer::new_filled(2, 2, &[4, 4, 4, 4]).unwrap();
    let before = canvas.clone();
    let overlay = PixelBuffer::from_packed(0, 3, 4, vec![]).unwrap();
    assert_eq!(paste_overlay(&mut canvas, &overlay).unwrap(), (0, 0));
    assert_eq!(canvas, before);
}

#[test]
fn channel_mismatch_is_rejected() {
    let mut canvas = PixelBuffer::new_filled(1, 1, &[4, 4, 4, 4]).unwrap();
    let overlay = PixelBuffer::new_filled(1, 1, &[1, 2, 3]).unwrap();
    assert!(paste_overlay(&mut canvas, &overlay).is_err());
}
