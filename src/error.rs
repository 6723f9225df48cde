//! 隐写编解码过程中可能出现的错误类型。

use thiserror::Error;

/// 隐写操作的结果类型别名。
pub type Result<T> = std::result::Result<T, StegoError>;

/// 编码或解码失败的原因。每种失败都是终止性的，不会重试。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// 头部魔数不匹配：图像中没有可识别的隐藏数据。
    #[error("Steganography header not found (magic {found:#06x})")]
    HeaderNotFound { found: u16 },

    /// 头部声明的长度超过了图像的承载能力。
    #[error("Invalid message length in header: {length} bytes, image holds at most {capacity}")]
    InvalidLength { length: u32, capacity: u64 },

    /// 在收集到所需的位数之前图像数据已耗尽。
    #[error("Unexpected end of image data: needed {needed} bits, found {available}")]
    TruncatedData { needed: u64, available: u64 },

    /// 负载超过图像容量。
    #[error("Message too large: {size} bytes, capacity is {capacity} bytes")]
    MessageTooLarge { size: usize, capacity: u64 },

    /// 图像过小，连头部都放不下。
    #[error("Image too small to hold any data: {width}x{height}")]
    ImageTooSmall { width: u32, height: u32 },
}
