//! Split a plane into 8x8 blocks and reassemble it (`spec.md` §4.7, C7).
//!
//! Grounded on `examples/original_source/split_into_blocks.py` and
//! `reassemble_from_blocks.py`: zero-pad to a multiple of the block size,
//! blocks in row-major reading order, reassembly crops back to the
//! logical size.

pub const BLOCK_SIZE: usize = 8;

/// Zero-pad `plane` (logical `width x height`) out to a multiple of
/// [`BLOCK_SIZE`] and split it into row-major 8x8 blocks.
pub fn split_into_blocks(plane: &[u8], width: usize, height: usize) -> Vec<[u8; 64]>
{
    let padded_width = width.div_ceil(BLOCK_SIZE) * BLOCK_SIZE;
    let padded_height = height.div_ceil(BLOCK_SIZE) * BLOCK_SIZE;

    let mut blocks = Vec::with_capacity((padded_width / BLOCK_SIZE) * (padded_height / BLOCK_SIZE));
    for by in (0..padded_height).step_by(BLOCK_SIZE)
    {
        for bx in (0..padded_width).step_by(BLOCK_SIZE)
        {
            let mut block = [0u8; 64];
            for row in 0..BLOCK_SIZE
            {
                let y = by + row;
                if y >= height
                {
                    continue;
                }
                for col in 0..BLOCK_SIZE
                {
                    let x = bx + col;
                    if x < width
                    {
                        block[row * BLOCK_SIZE + col] = plane[y * width + x];
                    }
                }
            }
            blocks.push(block);
        }
    }
    blocks
}

/// Inverse of [`split_into_blocks`]: reassemble blocks in row-major order
/// back into a `width x height` plane, discarding the zero padding.
pub fn reassemble_from_blocks(blocks: &[[u8; 64]], width: usize, height: usize) -> Vec<u8>
{
    let padded_width = width.div_ceil(BLOCK_SIZE) * BLOCK_SIZE;
    let blocks_per_row = padded_width / BLOCK_SIZE;

    let mut plane = vec![0u8; width * height];
    for (idx, block) in blocks.iter().enumerate()
    {
        let bx = (idx % blocks_per_row) * BLOCK_SIZE;
        let by = (idx / blocks_per_row) * BLOCK_SIZE;
        for row in 0..BLOCK_SIZE
        {
            let y = by + row;
            if y >= height
            {
                continue;
            }
            for col in 0..BLOCK_SIZE
            {
                let x = bx + col;
                if x < width
                {
                    plane[y * width + x] = block[row * BLOCK_SIZE + col];
                }
            }
        }
    }
    plane
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn round_trip_exact_multiple()
    {
        let plane: Vec<u8> = (0..64).map(|i| i as u8).collect();
        let blocks = split_into_blocks(&plane, 8, 8);
        assert_eq!(blocks.len(), 1);
        assert_eq!(reassemble_from_blocks(&blocks, 8, 8), plane);
    }

    #[test]
    fn round_trip_with_padding()
    {
        let width = 10;
        let height = 5;
        let plane: Vec<u8> = (0..width * height).map(|i| (i % 256) as u8).collect();
        let blocks = split_into_blocks(&plane, width, height);
        // padded to 16x8 -> 2x1 blocks
        assert_eq!(blocks.len(), 2);
        assert_eq!(reassemble_from_blocks(&blocks, width, height), plane);
    }

    #[test]
    fn padding_bytes_are_zero()
    {
        let plane = vec![255u8; 3 * 3];
        let blocks = split_into_blocks(&plane, 3, 3);
        let block = &blocks[0];
        // row 3.. and col 3.. of the single 8x8 block are padding
        for row in 0..8
        {
            for col in 0..8
            {
                let v = block[row * 8 + col];
                if row < 3 && col < 3
                {
                    assert_eq!(v, 255);
                }
                else
                {
                    assert_eq!(v, 0);
                }
            }
        }
    }
}
