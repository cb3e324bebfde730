//! # 容量规划模块
//!
//! 计算图像在给定位深度下能够容纳的比特数，并在改写任何像素之前校验消息是否放得下。

use crate::bits::required_bits;
use crate::channel::BitDepth;
use crate::constants::{BITS_PER_CHAR, CHANNELS_PER_PIXEL};
use crate::error::StegoError;
use image::RgbImage;

/// 图像在位深度 `depth` 下的容量 (比特)：`W × H × 3 × k`。
pub fn capacity_bits(image: &RgbImage, depth: BitDepth) -> usize {
    image.width() as usize * image.height() as usize * CHANNELS_PER_PIXEL * usize::from(depth.get())
}

/// 在位深度 `depth` 下最多能隐藏的字符数 (已扣除终止字节)。
pub fn max_message_len(image: &RgbImage, depth: BitDepth) -> usize {
    (capacity_bits(image, depth) / BITS_PER_CHAR).saturating_sub(1)
}

/// 校验消息连同终止字节能否完整写入图像。
///
/// # Errors
///
/// 所需比特数超过容量时返回 [`StegoError::CapacityExceeded`]。
pub fn validate(message: &str, depth: BitDepth, image: &RgbImage) -> Result<(), StegoError> {
    let required = required_bits(message.chars().count());
    let available = capacity_bits(image, depth);

    if required > available {
        return Err(StegoError::CapacityExceeded {
            required,
            available,
        });
    }

    Ok(())
}
