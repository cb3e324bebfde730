/// 每个像素参与隐写的颜色通道数 (R, G, B)，不使用 alpha 通道。
pub const CHANNELS_PER_PIXEL: usize = 3;

/// 每个字符编码后占用的比特数。
/// 字符的序数必须落在 0..=255 之间，因此恰好是一个字节。
pub const BITS_PER_CHAR: usize = 8;

/// 消息末尾的终止字节，8 个全零比特。
pub const TERMINATOR: u8 = 0;

/// 每个通道可用于携带数据的最低有效位数量的上限。
pub const MAX_BIT_DEPTH: u8 = 3;

/// 命令行未指定 `--bits` 时使用的位深度。
pub const DEFAULT_BIT_DEPTH: u8 = 1;

/// 未指定输出路径时，隐写结果图像文件名的前缀。
pub const HIDDEN_IMAGE_PREFIX: &str = "doctored_";

/// 未指定输出路径时，隐写结果图像的扩展名。
pub const HIDDEN_IMAGE_EXTENSION: &str = "png";

/// 未指定输出路径时，恢复出的文本文件名的前缀。
pub const RECOVERED_TEXT_PREFIX: &str = "recovered_";
