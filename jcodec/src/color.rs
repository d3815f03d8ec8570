//! RGB <-> YCbCr conversion and 4:2:0 chroma subsampling (`spec.md` §4.7,
//! C7).
//!
//! Coefficients are BT.601 full-range, grounded on
//! `examples/original_source/rgb_to_ycbcr.py`. The teacher's
//! `zune-jpeg/src/color_convert/scalar.rs` does the inverse direction with
//! integer fixed-point math for speed; `spec.md` doesn't ask for that, so
//! this stays in plain `f64` like the rest of the pipeline.

/// One interleaved RGB pixel buffer, `width * height * 3` bytes.
pub struct RgbImage
{
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>
}

/// Planar Y, Cb, Cr planes. Cb/Cr are subsampled 4:2:0 relative to Y.
pub struct YCbCrImage
{
    pub width: usize,
    pub height: usize,
    pub y: Vec<u8>,
    pub cb: Vec<u8>,
    pub cr: Vec<u8>,
    pub chroma_width: usize,
    pub chroma_height: usize
}

fn clamp_to_u8(v: f64) -> u8
{
    v.round().clamp(0.0, 255.0) as u8
}

/// Convert one RGB pixel to YCbCr (BT.601, full range, JPEG convention).
pub fn rgb_to_ycbcr_pixel(r: u8, g: u8, b: u8) -> (u8, u8, u8)
{
    let (r, g, b) = (f64::from(r), f64::from(g), f64::from(b));
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cb = -0.168736 * r - 0.331264 * g + 0.5 * b + 128.0;
    let cr = 0.5 * r - 0.418688 * g - 0.081312 * b + 128.0;
    (clamp_to_u8(y), clamp_to_u8(cb), clamp_to_u8(cr))
}

/// Convert one YCbCr pixel back to RGB.
pub fn ycbcr_to_rgb_pixel(y: u8, cb: u8, cr: u8) -> (u8, u8, u8)
{
    let y = f64::from(y);
    let cb = f64::from(cb) - 128.0;
    let cr = f64::from(cr) - 128.0;
    let r = y + 1.402 * cr;
    let g = y - 0.344136 * cb - 0.714136 * cr;
    let b = y + 1.772 * cb;
    (clamp_to_u8(r), clamp_to_u8(g), clamp_to_u8(b))
}

/// Convert a full RGB image to full-resolution YCbCr planes, then
/// 4:2:0-subsample the chroma planes (2x2 box average, rounded;
/// edge blocks that fall off the image average only the samples that
/// exist).
pub fn rgb_to_ycbcr_420(image: &RgbImage) -> YCbCrImage
{
    let RgbImage { width, height, data } = image;
    let (width, height) = (*width, *height);

    let mut y_plane = vec![0u8; width * height];
    let mut cb_full = vec![0u8; width * height];
    let mut cr_full = vec![0u8; width * height];

    for i in 0..width * height
    {
        let (r, g, b) = (data[i * 3], data[i * 3 + 1], data[i * 3 + 2]);
        let (y, cb, cr) = rgb_to_ycbcr_pixel(r, g, b);
        y_plane[i] = y;
        cb_full[i] = cb;
        cr_full[i] = cr;
    }

    let chroma_width = width.div_ceil(2);
    let chroma_height = height.div_ceil(2);
    let cb = downsample_420(&cb_full, width, height, chroma_width, chroma_height);
    let cr = downsample_420(&cr_full, width, height, chroma_width, chroma_height);

    YCbCrImage { width, height, y: y_plane, cb, cr, chroma_width, chroma_height }
}

fn downsample_420(plane: &[u8], width: usize, height: usize, cw: usize, ch: usize) -> Vec<u8>
{
    let mut out = vec![0u8; cw * ch];
    for cy in 0..ch
    {
        for cx in 0..cw
        {
            let x0 = cx * 2;
            let y0 = cy * 2;
            let mut sum = 0u32;
            let mut count = 0u32;
            for dy in 0..2
            {
                for dx in 0..2
                {
                    let (x, y) = (x0 + dx, y0 + dy);
                    if x < width && y < height
                    {
                        sum += u32::from(plane[y * width + x]);
                        count += 1;
                    }
                }
            }
            out[cy * cw + cx] = ((sum + count / 2) / count) as u8;
        }
    }
    out
}

/// Upsample a 4:2:0 chroma plane back to the Y plane's resolution by
/// nearest-neighbour 2x2 replication, cropped to `(width, height)`.
pub fn upsample_420(plane: &[u8], cw: usize, width: usize, height: usize) -> Vec<u8>
{
    let mut out = vec![0u8; width * height];
    for y in 0..height
    {
        for x in 0..width
        {
            out[y * width + x] = plane[(y / 2) * cw + (x / 2)];
        }
    }
    out
}

/// Reassemble an RGB image from full-resolution Y plus 4:2:0 Cb/Cr planes.
pub fn ycbcr_420_to_rgb(image: &YCbCrImage) -> RgbImage
{
    let cb_full = upsample_420(&image.cb, image.chroma_width, image.width, image.height);
    let cr_full = upsample_420(&image.cr, image.chroma_width, image.width, image.height);

    let mut data = vec![0u8; image.width * image.height * 3];
    for i in 0..image.width * image.height
    {
        let (r, g, b) = ycbcr_to_rgb_pixel(image.y[i], cb_full[i], cr_full[i]);
        data[i * 3] = r;
        data[i * 3 + 1] = g;
        data[i * 3 + 2] = b;
    }

    RgbImage { width: image.width, height: image.height, data }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn gray_pixel_round_trips_exactly()
    {
        // a neutral gray has zero chroma energy, so conversion error should
        // be at most the usual +-1 rounding slack.
        let (y, cb, cr) = rgb_to_ycbcr_pixel(128, 128, 128);
        assert_eq!(y, 128);
        assert!((i32::from(cb) - 128).abs() <= 1);
        assert!((i32::from(cr) - 128).abs() <= 1);

        let (r, g, b) = ycbcr_to_rgb_pixel(y, cb, cr);
        assert!((i32::from(r) - 128).abs() <= 1);
        assert!((i32::from(g) - 128).abs() <= 1);
        assert!((i32::from(b) - 128).abs() <= 1);
    }

    #[test]
    fn subsample_then_upsample_preserves_flat_color()
    {
        let image = RgbImage { width: 4, height: 4, data: vec![10, 20, 30].repeat(16) };
        let ycc = rgb_to_ycbcr_420(&image);
        assert_eq!(ycc.chroma_width, 2);
        assert_eq!(ycc.chroma_height, 2);
        let back = ycbcr_420_to_rgb(&ycc);
        for px in back.data.chunks(3)
        {
            assert!((i32::from(px[0]) - 10).abs() <= 2);
            assert!((i32::from(px[1]) - 20).abs() <= 2);
            assert!((i32::from(px[2]) - 30).abs() <= 2);
        }
    }

    #[test]
    fn odd_dimensions_are_handled()
    {
        let image = RgbImage { width: 3, height: 3, data: vec![200u8; 27] };
        let ycc = rgb_to_ycbcr_420(&image);
        assert_eq!(ycc.chroma_width, 2);
        assert_eq!(ycc.chroma_height, 2);
        let back = ycbcr_420_to_rgb(&ycc);
        assert_eq!(back.width, 3);
        assert_eq!(back.height, 3);
    }
}
