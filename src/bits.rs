//! # 位编解码模块
//!
//! 在字节序列、无符号整数与位序列之间相互转换。
//! 位序列中每个元素是取值为 0 或 1 的 `u8`，均为高位在前。

/// 将字节序列展开为位序列，每个字节按高位在前输出 8 位。
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1))
        .collect()
}

/// 将位序列按每 8 位一组合并为字节。
///
/// 末尾不足 8 位的部分会被静默丢弃，这不是错误：
/// 调用方若需要精确往返，应保证位数是 8 的倍数。
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | (bit & 1)))
        .collect()
}

/// 将 `value` 的低 `width` 位按高位在前展开为位序列。
///
/// `width` 不应超过 64；超出 `width` 的高位被截断。
pub fn uint_to_bits(value: u64, width: u32) -> Vec<u8> {
    (0..width)
        .rev()
        .map(|i| value.checked_shr(i).map_or(0, |v| (v & 1) as u8))
        .collect()
}

/// 将位序列折叠为无符号整数，第一个位为最高位。
///
/// 不做溢出检查：超过 64 位时，最早移入的高位会丢失。
pub fn bits_to_uint(bits: &[u8]) -> u64 {
    bits.iter()
        .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit & 1))
}
