//! # lsb_stego 库
//!
//! 将任意字节负载隐藏到图像 R、G、B 通道的最低有效位中，并从载体图像中恢复。
//!
//! 核心编解码 (`bits`、`header`、`engine`、`service`) 只处理内存中的像素网格；
//! `cli` 与 `handler` 负责命令行和图像文件读写。

// 声明库包含的所有模块。

pub mod bits;
pub mod cli;
pub mod constants;
pub mod engine;
pub mod error;
pub mod grid;
pub mod handler;
pub mod header;
pub mod service;

pub use error::{Result, StegoError};
pub use grid::{Bounds, PixelGrid, PixelGridMut, RgbaGrid};
pub use service::{extract, hide, max_capacity};
