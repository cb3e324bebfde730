//! # 通道读写模块
//!
//! 对单个 8 位颜色通道的低 k 位进行读写，高 (8 - k) 位保持不变。

use crate::constants::{DEFAULT_BIT_DEPTH, MAX_BIT_DEPTH};
use crate::error::StegoError;
use std::fmt;

/// 每个通道中用于携带数据的最低有效位数量 (k)。
///
/// 只能通过 [`TryFrom<u8>`] 构造，保证取值在 `1..=MAX_BIT_DEPTH` 之内。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitDepth(u8);

impl BitDepth {
    pub const fn get(self) -> u8 {
        self.0
    }

    /// 低 k 位全为 1 的掩码，即 `(1 << k) - 1`。
    pub const fn mask(self) -> u8 {
        (1 << self.0) - 1
    }

    /// 所有受支持的位深度，从小到大。
    pub fn all() -> impl Iterator<Item = BitDepth> {
        (1..=MAX_BIT_DEPTH).map(BitDepth)
    }
}

impl Default for BitDepth {
    fn default() -> Self {
        BitDepth(DEFAULT_BIT_DEPTH)
    }
}

impl TryFrom<u8> for BitDepth {
    type Error = StegoError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            1..=MAX_BIT_DEPTH => Ok(BitDepth(bits)),
            _ => Err(StegoError::InvalidBitDepth(bits)),
        }
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 清除 `value` 的低 k 位后写入 `bits`。`bits` 超出 k 位的部分会被丢弃。
pub fn write(value: u8, depth: BitDepth, bits: u8) -> u8 {
    (value & !depth.mask()) | (bits & depth.mask())
}

/// 读取 `value` 的低 k 位。
pub fn read(value: u8, depth: BitDepth) -> u8 {
    value & depth.mask()
}
