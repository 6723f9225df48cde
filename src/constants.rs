/// 标记图像中存在隐藏数据的魔数 (ASCII "DT")。
pub const MAGIC_VALUE: u16 = 0x4454;

/// 魔数字段占用的位数。
pub const MAGIC_BITS: u32 = 16;

/// 负载长度字段占用的位数。
/// 长度以字节为单位，按 `u32` 写入。
pub const LENGTH_BITS: u32 = 32;

/// 头部总位数：魔数 + 长度。
pub const HEADER_BITS: usize = (MAGIC_BITS + LENGTH_BITS) as usize;

/// 每个像素中承载数据的通道数 (R, G, B)。Alpha 通道从不修改。
pub const CHANNELS_PER_PIXEL: usize = 3;
