//! # 头部编解码模块
//!
//! 头部固定为 48 位：16 位魔数，随后是 32 位负载长度 (字节)。

use crate::bits::{bits_to_uint, uint_to_bits};
use crate::constants::{HEADER_BITS, LENGTH_BITS, MAGIC_BITS, MAGIC_VALUE};
use crate::error::{Result, StegoError};

/// 解析后的头部。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub magic: u16,
    pub length: u32,
}

impl Header {
    /// 携带 `length` 字节负载的合法头部。
    pub fn new(length: u32) -> Self {
        Self {
            magic: MAGIC_VALUE,
            length,
        }
    }

    /// 头部与负载合计需要的位数。
    pub fn total_bits(&self) -> u64 {
        HEADER_BITS as u64 + u64::from(self.length) * 8
    }
}

/// 将负载长度序列化为恰好 `HEADER_BITS` 位的头部。
pub fn serialize_header(payload_len: u32) -> Vec<u8> {
    let mut bits = uint_to_bits(u64::from(MAGIC_VALUE), MAGIC_BITS);
    bits.extend(uint_to_bits(u64::from(payload_len), LENGTH_BITS));
    bits
}

/// 从位序列开头解析头部。
///
/// 只校验魔数；长度是否超出图像容量由引擎判断。
///
/// # Errors
///
/// * 位数不足 `HEADER_BITS` 时返回 `TruncatedData`。
/// * 魔数不匹配时返回 `HeaderNotFound`。
pub fn parse_header(bits: &[u8]) -> Result<Header> {
    let bits = bits.get(..HEADER_BITS).ok_or(StegoError::TruncatedData {
        needed: HEADER_BITS as u64,
        available: bits.len() as u64,
    })?;
    let (magic_bits, length_bits) = bits.split_at(MAGIC_BITS as usize);

    let magic = bits_to_uint(magic_bits) as u16;
    if magic != MAGIC_VALUE {
        return Err(StegoError::HeaderNotFound { found: magic });
    }

    Ok(Header {
        magic,
        length: bits_to_uint(length_bits) as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::bytes_to_bits;

    #[test]
    fn header_layout_is_magic_then_big_endian_length() {
        let bits = serialize_header(0x0102_0304);
        assert_eq!(bits.len(), HEADER_BITS);
        assert_eq!(bits, bytes_to_bits(&[0x44, 0x54, 0x01, 0x02, 0x03, 0x04]));
    }

    #[test]
    fn parse_reads_back_length() {
        let header = parse_header(&serialize_header(31)).unwrap();
        assert_eq!(header, Header::new(31));
        assert_eq!(header.total_bits(), 48 + 31 * 8);
    }

    #[test]
    fn parse_ignores_bits_after_header() {
        let mut bits = serialize_header(2);
        bits.extend(bytes_to_bits(b"zz"));
        assert_eq!(parse_header(&bits).unwrap().length, 2);
    }

    #[test]
    fn wrong_magic_is_rejected() {
        let bits = bytes_to_bits(&[0x44, 0x55, 0, 0, 0, 1]);
        assert_eq!(
            parse_header(&bits),
            Err(StegoError::HeaderNotFound { found: 0x4455 })
        );
    }

    #[test]
    fn short_input_is_truncated() {
        assert_eq!(
            parse_header(&[1, 0, 1]),
            Err(StegoError::TruncatedData {
                needed: 48,
                available: 3
            })
        );
    }
}
