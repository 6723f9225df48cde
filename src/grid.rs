//! # 像素网格模块
//!
//! 编解码核心不关心图像文件格式，只通过 [`PixelGrid`] 读取有界的 RGBA 像素，
//! 通过 [`PixelGridMut`] 写入。这里为 `image` crate 的常用类型以及自有的
//! [`RgbaGrid`] 提供实现。

use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

/// 半开区间矩形 `[min_x, max_x) × [min_y, max_y)`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Bounds {
    /// 以 (0, 0) 为原点、给定宽高的矩形。
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            min_x: 0,
            min_y: 0,
            max_x: width,
            max_y: height,
        }
    }

    pub fn width(&self) -> u32 {
        self.max_x.saturating_sub(self.min_x)
    }

    pub fn height(&self) -> u32 {
        self.max_y.saturating_sub(self.min_y)
    }

    /// 像素总数，使用 `u64` 以免大图溢出。
    pub fn area(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// 按扫描顺序 (自上而下逐行、行内自左向右) 产出每个像素坐标。
    pub fn scan(&self) -> impl Iterator<Item = (u32, u32)> + use<> {
        let Bounds {
            min_x,
            min_y,
            max_x,
            max_y,
        } = *self;
        (min_y..max_y).flat_map(move |y| (min_x..max_x).map(move |x| (x, y)))
    }
}

/// 可按坐标读取 RGBA 通道 (8 位) 的像素网格。
///
/// 坐标必须位于 [`PixelGrid::bounds`] 之内。
pub trait PixelGrid {
    fn bounds(&self) -> Bounds;

    fn rgba(&self, x: u32, y: u32) -> [u8; 4];
}

/// 可写入的像素网格。
pub trait PixelGridMut: PixelGrid {
    fn set_rgba(&mut self, x: u32, y: u32, rgba: [u8; 4]);
}

impl PixelGrid for RgbaImage {
    fn bounds(&self) -> Bounds {
        Bounds::from_size(self.width(), self.height())
    }

    fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        self.get_pixel(x, y).0
    }
}

impl PixelGridMut for RgbaImage {
    fn set_rgba(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        self.put_pixel(x, y, Rgba(rgba));
    }
}

/// 任意颜色类型与位深的解码图像，读取时统一归一化为 8 位 RGBA。
impl PixelGrid for DynamicImage {
    fn bounds(&self) -> Bounds {
        Bounds::from_size(self.width(), self.height())
    }

    fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        self.get_pixel(x, y).0
    }
}

/// 自有的 RGBA 网格，允许原点不为 (0, 0)。
///
/// 嵌入操作总是返回这个类型：它与输入网格边界相同，
/// 可通过 [`RgbaGrid::into_image`] 交给图像编码器。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaGrid {
    min_x: u32,
    min_y: u32,
    buffer: RgbaImage,
}

impl RgbaGrid {
    /// 创建全零 (透明黑) 的网格。
    pub fn new(bounds: Bounds) -> Self {
        Self {
            min_x: bounds.min_x,
            min_y: bounds.min_y,
            buffer: RgbaImage::new(bounds.width(), bounds.height()),
        }
    }

    /// 将已有缓冲区放置到 `(min_x, min_y)`。
    ///
    /// 右下角坐标超出 `u32` 范围时返回 `None`。
    pub fn with_origin(buffer: RgbaImage, min_x: u32, min_y: u32) -> Option<Self> {
        min_x.checked_add(buffer.width())?;
        min_y.checked_add(buffer.height())?;
        Some(Self {
            min_x,
            min_y,
            buffer,
        })
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.buffer
    }

    pub fn into_image(self) -> RgbaImage {
        self.buffer
    }
}

impl From<RgbaImage> for RgbaGrid {
    fn from(buffer: RgbaImage) -> Self {
        Self {
            min_x: 0,
            min_y: 0,
            buffer,
        }
    }
}

impl PixelGrid for RgbaGrid {
    fn bounds(&self) -> Bounds {
        Bounds {
            min_x: self.min_x,
            min_y: self.min_y,
            max_x: self.min_x + self.buffer.width(),
            max_y: self.min_y + self.buffer.height(),
        }
    }

    fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        self.buffer.get_pixel(x - self.min_x, y - self.min_y).0
    }
}

impl PixelGridMut for RgbaGrid {
    fn set_rgba(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        self.buffer
            .put_pixel(x - self.min_x, y - self.min_y, Rgba(rgba));
    }
}
