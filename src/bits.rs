//! # 比特流模块
//!
//! 负责消息与比特序列之间的相互转换。
//! 每个字符按其序数写成 8 位大端二进制 (高位在前)，最后追加一个全零的终止字节。
//!
//! 比特序列直接使用 [`BitVec`]，其字节视图同样是高位在前。

use crate::constants::{BITS_PER_CHAR, TERMINATOR};
use crate::error::StegoError;
use bit_vec::BitVec;

/// 以高位在前的顺序追加一个完整字节。
pub fn push_byte(stream: &mut BitVec, byte: u8) {
    (0..BITS_PER_CHAR)
        .rev()
        .for_each(|shift| stream.push((byte >> shift) & 1 == 1));
}

/// 从 `start` 开始取出 `count` 个比特，组合成一个无符号整数 (先取出的比特在高位)。
///
/// 超出序列末尾的位置按 0 补齐，补齐的零总是落在结果的低位。
pub fn take(stream: &BitVec, start: usize, count: u8) -> u8 {
    (0..usize::from(count)).fold(0u8, |acc, i| {
        (acc << 1) | u8::from(stream.get(start + i).unwrap_or(false))
    })
}

/// 序列长度是 8 的倍数且最后 8 个比特全为零。
pub fn ends_with_terminator(stream: &BitVec) -> bool {
    let len = stream.len();
    len >= BITS_PER_CHAR
        && len % BITS_PER_CHAR == 0
        && (len - BITS_PER_CHAR..len).all(|i| stream.get(i) == Some(false))
}

/// 已经凑满 8 位的字节。末尾不足一个字节的比特不包含在内。
pub fn complete_bytes(stream: &BitVec) -> Vec<u8> {
    let mut bytes = stream.to_bytes();
    bytes.truncate(stream.len() / BITS_PER_CHAR);
    bytes
}

/// 把消息编码为带终止字节的比特流。
///
/// # Errors
///
/// 字符序数大于 255 或等于 0 (会与终止字节混淆) 时返回 [`StegoError::UnsupportedCharacter`]。
pub fn encode(message: &str) -> Result<BitVec, StegoError> {
    let mut stream = BitVec::with_capacity(required_bits(message.chars().count()));

    for (index, ch) in message.chars().enumerate() {
        let byte = u8::try_from(u32::from(ch))
            .ok()
            .filter(|&byte| byte != TERMINATOR)
            .ok_or(StegoError::UnsupportedCharacter { ch, index })?;
        push_byte(&mut stream, byte);
    }

    push_byte(&mut stream, TERMINATOR);
    Ok(stream)
}

/// 把比特流还原为消息，丢弃终止字节及其后的全部比特。
///
/// # Errors
///
/// 比特流中不存在按字节对齐的终止字节时返回 [`StegoError::NoHiddenMessage`]。
pub fn decode(stream: &BitVec) -> Result<String, StegoError> {
    let bytes = complete_bytes(stream);
    let end = bytes
        .iter()
        .position(|&byte| byte == TERMINATOR)
        .ok_or(StegoError::NoHiddenMessage)?;

    Ok(bytes[..end].iter().map(|&byte| char::from(byte)).collect())
}

/// 长度为 `message_len` 个字符的消息连同终止字节所需的比特数。
pub fn required_bits(message_len: usize) -> usize {
    (message_len + 1) * BITS_PER_CHAR
}
