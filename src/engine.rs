//! # 像素 LSB 引擎
//!
//! 按固定扫描顺序遍历像素网格：自上而下逐行，行内自左向右，
//! 每个像素依次访问 R、G、B 三个通道，每个通道承载一位。
//! Alpha 通道既不读取也不修改。
//!
//! 位在数据流中的位置完全由扫描位置决定，任何并行化都必须保持这一顺序。

use crate::constants::{CHANNELS_PER_PIXEL, HEADER_BITS};
use crate::error::{Result, StegoError};
use crate::grid::{PixelGrid, PixelGridMut, RgbaGrid};
use crate::header::{Header, parse_header};
use log::debug;

/// 将通道的最低位替换为 `bit`。
#[inline]
pub fn set_lsb(channel: u8, bit: u8) -> u8 {
    (channel & 0xFE) | (bit & 1)
}

/// 读取通道的最低位。
#[inline]
pub fn lsb(channel: u8) -> u8 {
    channel & 1
}

/// 网格可承载的总位数。
pub fn capacity_bits<G: PixelGrid + ?Sized>(grid: &G) -> u64 {
    grid.bounds().area() * CHANNELS_PER_PIXEL as u64
}

/// 网格扣除头部后可承载的负载字节数；放不下头部时为 0。
pub fn max_capacity<G: PixelGrid + ?Sized>(grid: &G) -> u64 {
    capacity_bits(grid)
        .checked_sub(HEADER_BITS as u64)
        .map_or(0, |bits| bits / 8)
}

/// 将 `bits` 依次写入各通道的最低位，返回边界相同的新网格。
///
/// 位用尽后其余通道原样复制。超出容量的位被静默忽略，
/// 容量检查由调用方在调用前完成。
pub fn embed<G: PixelGrid + ?Sized>(grid: &G, bits: &[u8]) -> RgbaGrid {
    let bounds = grid.bounds();
    let mut output = RgbaGrid::new(bounds);
    let mut pending = bits.iter();

    for (x, y) in bounds.scan() {
        let mut pixel = grid.rgba(x, y);
        for channel in pixel.iter_mut().take(CHANNELS_PER_PIXEL) {
            if let Some(&bit) = pending.next() {
                *channel = set_lsb(*channel, bit);
            }
        }
        output.set_rgba(x, y, pixel);
    }

    debug!(
        "Embedded {} of {} bits into a {}x{} grid",
        bits.len() - pending.len(),
        bits.len(),
        bounds.width(),
        bounds.height()
    );
    output
}

/// 从网格中提取负载位 (不含头部)。
///
/// 先读取 `HEADER_BITS` 位并校验头部，再从同一扫描位置继续读取，
/// 直到收集满头部声明的位数后立即停止。
///
/// # Errors
///
/// * `HeaderNotFound`：魔数不匹配。
/// * `InvalidLength`：声明的长度超过网格容量。
/// * `TruncatedData`：网格在收集完所需位数之前耗尽。
pub fn extract<G: PixelGrid + ?Sized>(grid: &G) -> Result<Vec<u8>> {
    let capacity = max_capacity(grid);
    let mut lsbs = grid.bounds().scan().flat_map(|(x, y)| {
        let pixel = grid.rgba(x, y);
        [lsb(pixel[0]), lsb(pixel[1]), lsb(pixel[2])]
    });

    let header_bits: Vec<u8> = lsbs.by_ref().take(HEADER_BITS).collect();
    if header_bits.len() < HEADER_BITS {
        return Err(StegoError::TruncatedData {
            needed: HEADER_BITS as u64,
            available: header_bits.len() as u64,
        });
    }

    let header = parse_header(&header_bits)?;
    if u64::from(header.length) > capacity {
        return Err(StegoError::InvalidLength {
            length: header.length,
            capacity,
        });
    }
    debug!(
        "Found header: {} payload bytes (capacity {capacity})",
        header.length
    );

    read_payload(lsbs, header)
}

fn read_payload(lsbs: impl Iterator<Item = u8>, header: Header) -> Result<Vec<u8>> {
    let needed = header.total_bits() - HEADER_BITS as u64;
    let payload: Vec<u8> = lsbs.take(needed as usize).collect();

    if (payload.len() as u64) < needed {
        return Err(StegoError::TruncatedData {
            needed: header.total_bits(),
            available: HEADER_BITS as u64 + payload.len() as u64,
        });
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::bytes_to_bits;
    use crate::grid::Bounds;
    use crate::header::serialize_header;
    use image::{Rgba, RgbaImage};

    fn grid(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 7) as u8, (y * 13) as u8, (x + y) as u8 | 1, 200])
        })
    }

    #[test]
    fn lsb_helpers() {
        assert_eq!(set_lsb(0b1010_1010, 1), 0b1010_1011);
        assert_eq!(set_lsb(0b1010_1011, 0), 0b1010_1010);
        assert_eq!(lsb(0xFF), 1);
        assert_eq!(lsb(0xFE), 0);
    }

    #[test]
    fn capacity_formula() {
        assert_eq!(max_capacity(&grid(10, 10)), 31);
        assert_eq!(max_capacity(&grid(4, 4)), 0);
        assert_eq!(max_capacity(&grid(4, 5)), 1);
        assert_eq!(max_capacity(&grid(0, 100)), 0);
    }

    #[test]
    fn embed_fills_channels_in_scan_order() {
        let source = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 9]));
        let out = embed(&source, &[1, 1, 0, 1]);
        assert_eq!(out.rgba(0, 0), [1, 1, 0, 9]);
        assert_eq!(out.rgba(1, 0), [1, 0, 0, 9]);
    }

    #[test]
    fn embed_ignores_excess_bits() {
        let source = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0]));
        let out = embed(&source, &[1; 10]);
        assert_eq!(out.rgba(0, 0), [1, 1, 1, 0]);
    }

    #[test]
    fn extract_strips_header() {
        let mut bits = serialize_header(2);
        bits.extend(bytes_to_bits(&[0xAB, 0xCD]));
        let stego = embed(&grid(8, 8), &bits);
        assert_eq!(extract(&stego).unwrap(), bytes_to_bits(&[0xAB, 0xCD]));
    }

    #[test]
    fn oversized_length_is_invalid() {
        let stego = embed(&grid(10, 10), &serialize_header(32));
        assert_eq!(
            extract(&stego),
            Err(StegoError::InvalidLength {
                length: 32,
                capacity: 31
            })
        );
    }

    #[test]
    fn grid_smaller_than_header_is_truncated() {
        let stego = embed(&grid(3, 3), &serialize_header(0));
        assert_eq!(
            extract(&stego),
            Err(StegoError::TruncatedData {
                needed: 48,
                available: 27
            })
        );
    }

    #[test]
    fn works_on_offset_bounds() {
        let source = RgbaGrid::with_origin(grid(6, 6), 100, 50).unwrap();
        let mut bits = serialize_header(1);
        bits.extend(bytes_to_bits(b"!"));
        let stego = embed(&source, &bits);
        assert_eq!(
            crate::grid::PixelGrid::bounds(&stego),
            Bounds {
                min_x: 100,
                min_y: 50,
                max_x: 106,
                max_y: 56
            }
        );
        assert_eq!(extract(&stego).unwrap(), bytes_to_bits(b"!"));
    }
}
