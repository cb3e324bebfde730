//! # lsb_conceal 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：把文本按位写入真彩色图像每个通道的低 k 位 (k = 1~3)，
//! 并以一个全零字节作为结束标记，之后可以无损地恢复原文。
//!
//! 编解码器只处理内存中的 [`image::RgbImage`]，文件读写由 [`handler`] 负责。

// 声明库包含的所有模块。

pub mod bits;
pub mod capacity;
pub mod channel;
pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod steganography;

pub use channel::BitDepth;
pub use error::StegoError;
pub use steganography::{embed, embed_parallel, extract};
