// Region operations behind the two brush modes.
// Visual expectation: the mosaic brush turns the area under the cursor into flat
// colour blocks; the eraser brush brings back the untouched photo pixel for pixel.
use crate::error::{Error, Result};
use crate::types::{CHANNELS, PixelBuffer, Region};

/// Pixelate `region` in place with `block_size` x `block_size` blocks.
///
/// The block grid starts at the region's (clamped) top-left corner, not at the
/// image origin, so two overlapping dabs can tile the same pixels with a
/// different phase. Blocks on the right/bottom edge are cut to the region.
/// A `block_size` of 0 is treated as 1 (every pixel keeps its own colour).
pub fn apply_mosaic(buffer: &mut PixelBuffer, region: Region, block_size: u32) {
    // 1) Clamp to the image; nothing left means nothing to do.
    let Some(bounds) = region.clamp(buffer.width(), buffer.height()) else {
        return;
    };
    let block = (block_size as usize).max(1);
    let width = buffer.width();
    let data = buffer.as_bytes_mut();

    // 2) Walk the block grid anchored at (x0, y0).
    for by in (bounds.y0..bounds.y1).step_by(block) {
        let ey = (by + block).min(bounds.y1);
        for bx in (bounds.x0..bounds.x1).step_by(block) {
            let ex = (bx + block).min(bounds.x1);

            // 3) Sum each channel over the clipped block.
            let mut sum = [0u64; CHANNELS];
            for y in by..ey {
                let row = (y * width + bx) * CHANNELS..(y * width + ex) * CHANNELS;
                for px in data[row].chunks_exact(CHANNELS) {
                    for c in 0..CHANNELS {
                        sum[c] += px[c] as u64;
                    }
                }
            }

            // 4) Mean per channel, round-half-up in integers (n >= 1 here).
            let n = ((ex - bx) * (ey - by)) as u64;
            let mut mean = [0u8; CHANNELS];
            for c in 0..CHANNELS {
                mean[c] = ((sum[c] + n / 2) / n) as u8;
            }

            // 5) Flood the block with the mean colour.
            for y in by..ey {
                let row = (y * width + bx) * CHANNELS..(y * width + ex) * CHANNELS;
                for px in data[row].chunks_exact_mut(CHANNELS) {
                    px.copy_from_slice(&mean);
                }
            }
        }
    }
}

/// Copy `region` from `original` back into `current`, byte for byte.
/// Both buffers must share dimensions; a mismatch is rejected before any write.
pub fn restore_original(current: &mut PixelBuffer, original: &PixelBuffer, region: Region) -> Result<()> {
    if !current.same_dimensions(original) {
        return Err(Error::dimension_mismatch(original.dimensions(), current.dimensions()));
    }
    let Some(bounds) = region.clamp(current.width(), current.height()) else {
        return Ok(());
    };

    // Rows are contiguous in both buffers, so each row is one slice copy.
    for y in bounds.y0..bounds.y1 {
        let start = current.index(bounds.x0, y);
        let end = current.index(bounds.x1 - 1, y) + CHANNELS;
        current.as_bytes_mut()[start..end].copy_from_slice(&original.as_bytes()[start..end]);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const BASE: [u8; 4] = [200, 100, 50, 255];

    /// Every pixel gets a distinct-ish colour so averaging is visible.
    fn gradient(w: usize, h: usize) -> PixelBuffer {
        let mut buf = PixelBuffer::new(w, h);
        for y in 0..h {
            for x in 0..w {
                buf.set_pixel(x, y, [(x * 17 % 256) as u8, (y * 29 % 256) as u8, ((x + y) * 7 % 256) as u8, 255 - (x % 5) as u8]);
            }
        }
        buf
    }

    fn colours_in(buf: &PixelBuffer, r: Region) -> HashSet<[u8; 4]> {
        let b = r.clamp(buf.width(), buf.height()).unwrap();
        let mut set = HashSet::new();
        for y in b.y0..b.y1 {
            for x in b.x0..b.x1 {
                set.insert(buf.pixel(x, y).unwrap());
            }
        }
        set
    }

    #[test]
    fn uniform_buffer_is_unchanged() {
        let mut buf = PixelBuffer::filled(4, 4, BASE);
        apply_mosaic(&mut buf, Region::new(0, 0, 4, 4), 2);
        assert_eq!(buf, PixelBuffer::filled(4, 4, BASE));
    }

    #[test]
    fn block_mean_rounds_half_up() {
        let mut buf = PixelBuffer::filled(4, 4, BASE);
        buf.set_pixel(0, 0, [0, 0, 0, 255]);
        apply_mosaic(&mut buf, Region::new(0, 0, 2, 2), 2);
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            assert_eq!(buf.pixel(x, y), Some([150, 75, 38, 255]));
        }
        // Outside the region stays put.
        assert_eq!(buf.pixel(2, 0), Some(BASE));
        assert_eq!(buf.pixel(0, 2), Some(BASE));
    }

    #[test]
    fn distinct_colours_bounded_by_block_count() {
        let region = Region::new(3, 2, 11, 7);
        for block in [1u32, 2, 3, 4, 5, 20] {
            let mut buf = gradient(20, 12);
            apply_mosaic(&mut buf, region, block);
            let b = block as i32;
            let limit = ((region.width + b - 1) / b * ((region.height + b - 1) / b)) as usize;
            assert!(colours_in(&buf, region).len() <= limit, "block {block}");
        }
    }

    #[test]
    fn every_block_in_grid_is_uniform() {
        // 11 x 7 at block 4: last column is 3 wide, last row 3 tall.
        let region = Region::new(3, 2, 11, 7);
        let block = 4;
        let mut buf = gradient(20, 12);
        apply_mosaic(&mut buf, region, block as u32);

        let b = region.clamp(buf.width(), buf.height()).unwrap();
        let mut blocks = 0;
        for by in (b.y0..b.y1).step_by(block) {
            for bx in (b.x0..b.x1).step_by(block) {
                let first = buf.pixel(bx, by);
                for y in by..(by + block).min(b.y1) {
                    for x in bx..(bx + block).min(b.x1) {
                        assert_eq!(buf.pixel(x, y), first, "block at ({bx},{by}) pixel ({x},{y})");
                    }
                }
                blocks += 1;
            }
        }
        assert_eq!(blocks, 3 * 2);
    }

    #[test]
    fn blocks_are_anchored_at_region_origin() {
        let mut buf = gradient(10, 10);
        apply_mosaic(&mut buf, Region::new(1, 1, 4, 4), 2);
        // (1,1)-(2,2) form one block, (3,1) starts the next.
        let c = buf.pixel(1, 1).unwrap();
        assert_eq!(buf.pixel(2, 2), Some(c));
        assert_eq!(buf.pixel(2, 1), Some(c));
        assert_ne!(buf.pixel(3, 1), Some(c));
    }

    #[test]
    fn edge_blocks_are_clipped() {
        // 5 wide with block 2: columns {0,1} {2,3} {4}.
        let mut buf = gradient(5, 1);
        let last = buf.pixel(4, 0);
        apply_mosaic(&mut buf, Region::new(0, 0, 5, 1), 2);
        assert_eq!(buf.pixel(4, 0), last);
        assert_eq!(buf.pixel(0, 0), buf.pixel(1, 0));
        assert_eq!(buf.pixel(2, 0), buf.pixel(3, 0));
    }

    #[test]
    fn oversized_block_flattens_region() {
        let mut buf = gradient(8, 8);
        let region = Region::new(2, 2, 3, 3);
        apply_mosaic(&mut buf, region, 50);
        assert_eq!(colours_in(&buf, region).len(), 1);
    }

    #[test]
    fn region_off_buffer_is_clamped_or_ignored() {
        let mut buf = gradient(6, 6);
        let before = buf.clone();
        apply_mosaic(&mut buf, Region::new(6, 0, 4, 4), 2);
        apply_mosaic(&mut buf, Region::new(0, 0, 0, 0), 2);
        assert_eq!(buf, before);

        apply_mosaic(&mut buf, Region::new(-2, -2, 4, 4), 2);
        assert_eq!(colours_in(&buf, Region::new(0, 0, 2, 2)).len(), 1);
        assert_eq!(buf.pixel(2, 2), before.pixel(2, 2));
    }

    #[test]
    fn mosaic_is_deterministic() {
        let mut a = gradient(16, 16);
        let mut b = gradient(16, 16);
        apply_mosaic(&mut a, Region::new(1, 3, 9, 9), 4);
        apply_mosaic(&mut b, Region::new(1, 3, 9, 9), 4);
        assert_eq!(a, b);
    }

    #[test]
    fn restore_copies_original_exactly() {
        let original = gradient(12, 12);
        let mut current = original.clone();
        apply_mosaic(&mut current, Region::new(0, 0, 12, 12), 4);
        apply_mosaic(&mut current, Region::new(2, 5, 7, 7), 3);

        let region = Region::new(3, 3, 5, 4);
        restore_original(&mut current, &original, region).unwrap();
        for y in 3..7 {
            for x in 3..8 {
                assert_eq!(current.pixel(x, y), original.pixel(x, y));
            }
        }
        // Just outside the region is still pixelated.
        assert_ne!(current.pixel(2, 3), original.pixel(2, 3));
    }

    #[test]
    fn restore_twice_equals_once() {
        let original = gradient(10, 10);
        let mut once = original.clone();
        apply_mosaic(&mut once, Region::new(0, 0, 10, 10), 5);
        let mut twice = once.clone();

        let region = Region::new(-4, 2, 9, 20);
        restore_original(&mut once, &original, region).unwrap();
        restore_original(&mut twice, &original, region).unwrap();
        restore_original(&mut twice, &original, region).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn restore_rejects_mismatched_buffers() {
        let original = gradient(4, 4);
        let mut current = PixelBuffer::filled(4, 5, BASE);
        let err = restore_original(&mut current, &original, Region::new(0, 0, 4, 4)).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { expected_h: 4, actual_h: 5, .. }));
        assert_eq!(current, PixelBuffer::filled(4, 5, BASE));
    }

    #[test]
    fn restore_out_of_bounds_is_noop() {
        let original = gradient(4, 4);
        let mut current = PixelBuffer::filled(4, 4, BASE);
        restore_original(&mut current, &original, Region::new(10, 10, 3, 3)).unwrap();
        assert_eq!(current, PixelBuffer::filled(4, 4, BASE));
    }
}
