//! End-to-end container round-trip, exercised through the public API only
//! (`jcodec::encode`/`jcodec::decode`), the way an external user of this
//! crate would call it.

#[test]
fn gray_16x16_at_quality_100_round_trips_closely()
{
    // S1. A flat gray image at quality 100 has zero AC energy and an
    // exactly representable DC level, and 16x16 needs no MCU padding, so
    // this round trip should be exact, not just within spec.md's usual
    // +-1 rounding slack.
    let width = 16;
    let height = 16;
    let rgb = vec![128u8; width * height * 3];

    let bytes = jcodec::encode(&rgb, width, height, 100).unwrap();
    let (decoded, w, h) = jcodec::decode(&bytes).unwrap();

    assert_eq!((w, h), (width, height));
    assert_eq!(rgb, decoded);
}

#[test]
fn red_8x8_at_quality_90_stays_recognizably_red()
{
    // S2
    let width = 8;
    let height = 8;
    let rgb: Vec<u8> = [255u8, 0, 0].repeat(width * height);

    let bytes = jcodec::encode(&rgb, width, height, 90).unwrap();
    let (decoded, _, _) = jcodec::decode(&bytes).unwrap();

    for px in decoded.chunks(3)
    {
        assert!(px[0] > px[1] + 80);
        assert!(px[0] > px[2] + 80);
    }
}

#[test]
fn compressed_size_trends_upward_with_quality()
{
    // S6: a textured image should not get smaller as quality increases.
    let width = 32;
    let height = 24;
    let rgb: Vec<u8> = (0..width * height * 3).map(|i| ((i * 91 + 13) % 256) as u8).collect();

    let mut sizes = Vec::new();
    for quality in [1u8, 25, 50, 75, 100]
    {
        let bytes = jcodec::encode(&rgb, width, height, quality).unwrap();
        sizes.push(bytes.len());
    }

    for window in sizes.windows(2)
    {
        assert!(window[1] >= window[0], "size shrank going to a higher quality: {sizes:?}");
    }
}

#[test]
fn non_mcu_aligned_dimensions_round_trip()
{
    // exercises the zero-padding path: 20x13 is neither an 8 nor 16 multiple.
    let width = 20;
    let height = 13;
    let rgb: Vec<u8> = (0..width * height * 3).map(|i| ((i * 29 + 5) % 256) as u8).collect();

    let bytes = jcodec::encode(&rgb, width, height, 80).unwrap();
    let (decoded, w, h) = jcodec::decode(&bytes).unwrap();

    assert_eq!((w, h), (width, height));
    assert_eq!(decoded.len(), rgb.len());
}

#[test]
fn invalid_quality_is_rejected()
{
    let rgb = vec![0u8; 4 * 4 * 3];
    assert!(jcodec::encode(&rgb, 4, 4, 0).is_err());
    assert!(jcodec::encode(&rgb, 4, 4, 101).is_err());
}
