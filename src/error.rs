//! # 错误类型
//!
//! [`StegoError`] 覆盖编解码器的全部失败情形。
//! 所有错误都在修改任何像素之前产生，调用方持有的原始图像永远不会被部分改写。

use std::fmt;

/// 隐写与恢复过程中可能出现的错误。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// 消息中含有无法用单个字节表示的字符 (序数大于 255)，或者是与终止字节冲突的 NUL 字符。
    UnsupportedCharacter { ch: char, index: usize },
    /// 位深度不在 `1..=MAX_BIT_DEPTH` 范围内。
    InvalidBitDepth(u8),
    /// 消息加终止字节所需的比特数超过了图像在该位深度下的容量。
    CapacityExceeded { required: usize, available: usize },
    /// 扫描完整幅图像也没有找到终止字节。
    NoHiddenMessage,
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedCharacter { ch, index } => write!(
                f,
                "unsupported character {ch:?} (U+{:04X}) at index {index}; only ordinals 1..=255 can be hidden",
                u32::from(*ch)
            ),
            Self::InvalidBitDepth(bits) => write!(
                f,
                "invalid bit depth {bits}; expected a value between 1 and {}",
                crate::constants::MAX_BIT_DEPTH
            ),
            Self::CapacityExceeded {
                required,
                available,
            } => write!(
                f,
                "not enough space in the image: {required} bits required, {available} bits available"
            ),
            Self::NoHiddenMessage => write!(f, "no hidden message found in the image"),
        }
    }
}

impl std::error::Error for StegoError {}
