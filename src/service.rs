//! # 隐藏/提取服务
//!
//! 在引擎之上完成容量预检、拼接头部与负载，以及剥离头部后还原字节。

use crate::bits::{bits_to_bytes, bytes_to_bits};
use crate::engine;
use crate::error::{Result, StegoError};
use crate::grid::{PixelGrid, RgbaGrid};
use crate::header::serialize_header;

pub use crate::engine::max_capacity;

/// 将 `payload` 隐藏到 `grid` 中，返回新的网格。输入网格不会被修改。
///
/// # Errors
///
/// * `ImageTooSmall`：网格连头部都放不下。
/// * `MessageTooLarge`：负载超过网格容量。
pub fn hide<G: PixelGrid + ?Sized>(payload: &[u8], grid: &G) -> Result<RgbaGrid> {
    let capacity = max_capacity(grid);
    if capacity == 0 {
        let bounds = grid.bounds();
        return Err(StegoError::ImageTooSmall {
            width: bounds.width(),
            height: bounds.height(),
        });
    }

    let length = u32::try_from(payload.len())
        .ok()
        .filter(|&len| u64::from(len) <= capacity)
        .ok_or(StegoError::MessageTooLarge {
            size: payload.len(),
            capacity,
        })?;

    let mut bits = serialize_header(length);
    bits.extend(bytes_to_bits(payload));
    Ok(engine::embed(grid, &bits))
}

/// 从 `grid` 中提取隐藏的负载字节。引擎错误原样向上传递。
pub fn extract<G: PixelGrid + ?Sized>(grid: &G) -> Result<Vec<u8>> {
    let bits = engine::extract(grid)?;
    Ok(bits_to_bytes(&bits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn hello_on_ten_by_ten() {
        let cover = RgbaImage::from_pixel(10, 10, Rgba([120, 80, 40, 255]));
        let stego = hide(b"HELLO", &cover).unwrap();
        assert_eq!(extract(&stego).unwrap(), b"HELLO");

        assert_eq!(
            hide(&[0u8; 32], &cover),
            Err(StegoError::MessageTooLarge {
                size: 32,
                capacity: 31
            })
        );
    }

    #[test]
    fn tiny_image_is_too_small() {
        let cover = RgbaImage::new(4, 4);
        assert_eq!(
            hide(b"", &cover),
            Err(StegoError::ImageTooSmall {
                width: 4,
                height: 4
            })
        );
    }

    #[test]
    fn empty_payload_round_trips() {
        let cover = RgbaImage::new(5, 5);
        let stego = hide(b"", &cover).unwrap();
        assert!(extract(&stego).unwrap().is_empty());
    }
}
