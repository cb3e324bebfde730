//! # 隐写核心模块
//!
//! 按行优先顺序 (外层 y，内层 x) 遍历像素，每个像素依次访问 R、G、B 通道。
//! 整幅图像共享一个单调递增的比特游标，嵌入与提取使用完全相同的遍历顺序。
//!
//! `RgbImage` 的底层缓冲区正好按这个顺序排列通道，所以遍历直接作用在通道切片上。

use crate::bits;
use crate::capacity;
use crate::channel::{self, BitDepth};
use crate::constants::CHANNELS_PER_PIXEL;
use crate::error::StegoError;
use bit_vec::BitVec;
use image::RgbImage;
use rayon::prelude::*;

/// 从全局比特游标 `cursor` 开始，把 `stream` 的比特依次写入 `channels` 的低 k 位。
///
/// 每个通道消耗 k 个比特；最后一组不足 k 位时低位补零。
/// 游标到达比特流末尾之后的通道保持原样。
pub fn modify(channels: &mut [u8], cursor: usize, stream: &BitVec, depth: BitDepth) {
    let k = usize::from(depth.get());

    for (i, value) in channels.iter_mut().enumerate() {
        let start = cursor + i * k;
        if start >= stream.len() {
            break;
        }
        *value = channel::write(*value, depth, bits::take(stream, start, depth.get()));
    }
}

/// 依次读出每个通道的低 k 位并拼接成比特流，直到出现按字节对齐的终止字节。
///
/// 每追加一个比特都检查一次，终止字节可以在像素或通道的中间结束。
/// 扫描完所有通道仍未找到终止字节时返回 `None`。
pub fn recover(channels: &[u8], depth: BitDepth) -> Option<BitVec> {
    let k = depth.get();
    let mut stream = BitVec::new();

    for &value in channels {
        let payload = channel::read(value, depth);
        for shift in (0..k).rev() {
            stream.push((payload >> shift) & 1 == 1);
            if bits::ends_with_terminator(&stream) {
                return Some(stream);
            }
        }
    }

    None
}

/// 编码消息并校验容量。任何失败都发生在复制图像之前。
fn prepare(image: &RgbImage, message: &str, depth: BitDepth) -> Result<BitVec, StegoError> {
    let stream = bits::encode(message)?;
    capacity::validate(message, depth, image)?;
    Ok(stream)
}

/// 把消息隐藏到图像副本中并返回该副本，输入图像不会被修改。
///
/// # Errors
///
/// * [`StegoError::UnsupportedCharacter`] - 消息含有序数为 0 或大于 255 的字符。
/// * [`StegoError::CapacityExceeded`] - 图像在该位深度下放不下消息和终止字节。
pub fn embed(image: &RgbImage, message: &str, depth: BitDepth) -> Result<RgbImage, StegoError> {
    let stream = prepare(image, message, depth)?;

    let mut doctored = image.clone();
    modify(&mut doctored, 0, &stream, depth);

    Ok(doctored)
}

/// 与 [`embed`] 结果完全一致，但各扫描行并行写入。
///
/// 第 y 行的起始游标预先按行优先顺序算出：`y × W × 3 × k`。
pub fn embed_parallel(
    image: &RgbImage,
    message: &str,
    depth: BitDepth,
) -> Result<RgbImage, StegoError> {
    let stream = prepare(image, message, depth)?;

    let mut doctored = image.clone();
    let row_len = doctored.width() as usize * CHANNELS_PER_PIXEL;
    let row_bits = row_len * usize::from(depth.get());
    let channels: &mut [u8] = &mut doctored;

    channels
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| modify(row, y * row_bits, &stream, depth));

    Ok(doctored)
}

/// 从图像中提取隐藏的消息。
///
/// # Errors
///
/// 扫描完整幅图像都没有遇到终止字节时返回 [`StegoError::NoHiddenMessage`]。
pub fn extract(image: &RgbImage, depth: BitDepth) -> Result<String, StegoError> {
    let stream = recover(image, depth).ok_or(StegoError::NoHiddenMessage)?;
    bits::decode(&stream)
}

/// 以原始整数给出位深度的 [`embed`]。
///
/// # Errors
///
/// 除 [`embed`] 的错误外，位深度非法时返回 [`StegoError::InvalidBitDepth`]。
pub fn embed_with_depth(image: &RgbImage, message: &str, bits: u8) -> Result<RgbImage, StegoError> {
    embed(image, message, BitDepth::try_from(bits)?)
}

/// 以原始整数给出位深度的 [`extract`]。
///
/// # Errors
///
/// 除 [`extract`] 的错误外，位深度非法时返回 [`StegoError::InvalidBitDepth`]。
pub fn extract_with_depth(image: &RgbImage, bits: u8) -> Result<String, StegoError> {
    extract(image, BitDepth::try_from(bits)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn depth(bits: u8) -> BitDepth {
        BitDepth::try_from(bits).unwrap()
    }

    #[test]
    fn bits_follow_row_major_channel_order() {
        let cover = RgbImage::from_pixel(6, 1, Rgb([0x80, 0x80, 0x80]));
        let doctored = embed(&cover, "A", depth(1)).unwrap();

        // 'A' = 0100_0001，随后是 8 个零比特；最后两个通道未被触及。
        let expected = [
            0x80, 0x81, 0x80, 0x80, 0x80, 0x80, 0x80, 0x81, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80,
            0x80, 0x80, 0x80, 0x80,
        ];
        assert_eq!(doctored.as_raw().as_slice(), &expected);
    }

    #[test]
    fn short_final_group_is_zero_padded() {
        // k = 3：010 000 010 000 000 0(00)
        let cover = RgbImage::from_pixel(2, 1, Rgb([0xFF, 0xFF, 0xFF]));
        let doctored = embed(&cover, "A", depth(3)).unwrap();

        assert_eq!(doctored.as_raw().as_slice(), &[0xFA, 0xF8, 0xFA, 0xF8, 0xF8, 0xF8]);
        assert_eq!(extract(&doctored, depth(3)).unwrap(), "A");
    }

    #[test]
    fn terminator_completing_mid_pixel_is_detected() {
        // 终止字节在第 6 个像素的 G 通道之前结束，其后的通道仍然全为 1。
        let cover = RgbImage::from_pixel(6, 1, Rgb([0xFF, 0xFF, 0xFF]));
        let doctored = embed(&cover, "A", depth(1)).unwrap();

        assert_eq!(doctored.get_pixel(5, 0), &Rgb([0xFE, 0xFF, 0xFF]));
        assert_eq!(extract(&doctored, depth(1)).unwrap(), "A");
    }

    #[test]
    fn failed_embed_leaves_cover_untouched() {
        let cover = RgbImage::from_pixel(2, 2, Rgb([255, 255, 255]));
        let snapshot = cover.clone();

        assert_eq!(
            embed(&cover, "A", depth(1)),
            Err(StegoError::CapacityExceeded {
                required: 16,
                available: 12
            })
        );
        assert_eq!(cover, snapshot);
    }

    #[test]
    fn unsupported_character_wins_over_capacity() {
        let cover = RgbImage::new(1, 1);
        let message = char::from_u32(300).unwrap().to_string();
        assert!(matches!(
            embed(&cover, &message, depth(1)),
            Err(StegoError::UnsupportedCharacter { index: 0, .. })
        ));
    }

    #[test]
    fn saturated_image_has_no_message() {
        let image = RgbImage::from_pixel(3, 3, Rgb([0xFF, 0x0F, 0xF1]));
        for depth in BitDepth::all() {
            assert_eq!(extract(&image, depth), Err(StegoError::NoHiddenMessage));
        }
    }

    #[test]
    fn raw_depth_is_validated() {
        let image = RgbImage::new(4, 4);
        assert_eq!(
            embed_with_depth(&image, "x", 4),
            Err(StegoError::InvalidBitDepth(4))
        );
        assert_eq!(extract_with_depth(&image, 0), Err(StegoError::InvalidBitDepth(0)));
    }

    #[test]
    fn parallel_embed_matches_sequential() {
        let cover = RgbImage::from_fn(16, 9, |x, y| {
            Rgb([(x * 31) as u8, (y * 47) as u8, (x ^ y) as u8 | 0x40])
        });
        for depth in BitDepth::all() {
            let message = "Parallel scanlines";
            let sequential = embed(&cover, message, depth).unwrap();
            let parallel = embed_parallel(&cover, message, depth).unwrap();
            assert_eq!(sequential, parallel);
            assert_eq!(extract(&parallel, depth).unwrap(), message);
        }
    }
}
