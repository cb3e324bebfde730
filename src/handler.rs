//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::bits::required_bits;
use crate::capacity::{capacity_bits, max_message_len};
use crate::channel::BitDepth;
use crate::cli::{CapacityArgs, HideArgs, RecoverArgs};
use crate::constants::{HIDDEN_IMAGE_EXTENSION, HIDDEN_IMAGE_PREFIX, RECOVERED_TEXT_PREFIX};
use crate::error::StegoError;
use crate::steganography::{embed, extract};
use anyhow::{Context, Result};
use colored::Colorize;
use image::RgbImage;
use std::fs;
use std::path::{Path, PathBuf};

/// 读取图像并转换为 8 位 RGB，alpha 通道被丢弃。
fn load_image(path: &Path) -> Result<RgbImage> {
    let picture = image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    Ok(picture.to_rgb8())
}

/// 在 `source` 所在目录下生成 `<prefix><文件名>.<extension>`。
fn default_output(source: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    source.with_file_name(format!("{prefix}{stem}.{extension}"))
}

/// 未指定 `--force` 时拒绝覆盖已存在的文件。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );

    Ok(())
}

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像和文本文件 (去掉首尾空白)、调用隐写核心函数隐藏文本，
/// 最后将结果写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径、位深度和覆盖选项的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 位深度不在 1~3 之间。
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取输入的图像或文本文件，或者文本文件只含空白。
/// * 图像文件没有足够的空间来隐藏文本。
/// * 文本中含有无法隐藏的字符。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let depth = BitDepth::try_from(args.bits)?;
    let dest = args.dest.unwrap_or_else(|| {
        default_output(&args.image, HIDDEN_IMAGE_PREFIX, HIDDEN_IMAGE_EXTENSION)
    });
    ensure_writable(&dest, args.force)?;

    let picture = load_image(&args.image)?;

    let content = fs::read_to_string(&args.text).with_context(|| {
        format!(
            "Unable to read text file: {}",
            args.text.to_string_lossy().red().bold()
        )
    })?;
    let text = content.trim();
    anyhow::ensure!(
        !text.is_empty(),
        "The text file is empty: {}",
        args.text.to_string_lossy().red().bold()
    );

    log::debug!(
        "cover {}x{}, depth {depth}: {} of {} bits required",
        picture.width(),
        picture.height(),
        required_bits(text.chars().count()),
        capacity_bits(&picture, depth)
    );

    let doctored = embed(&picture, text, depth).with_context(|| {
        format!(
            "Failed to hide the text from {}.",
            args.text.to_string_lossy().red().bold()
        )
    })?;

    doctored.save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、按给定位深度提取隐藏的文本，
/// 最后将恢复的文本内容写入目标文本文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径、位深度和覆盖选项的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 位深度不在 1~3 之间。
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取输入的图像文件。
/// * 图像中没有找到隐藏的文本。
/// * 无法写入到目标文本文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let depth = BitDepth::try_from(args.bits)?;
    let text_path = args
        .text
        .unwrap_or_else(|| default_output(&args.image, RECOVERED_TEXT_PREFIX, "txt"));
    ensure_writable(&text_path, args.force)?;

    let picture = load_image(&args.image)?;
    log::debug!(
        "scanning {}x{} image at depth {depth}",
        picture.width(),
        picture.height()
    );

    let text = match extract(&picture, depth) {
        Err(StegoError::NoHiddenMessage) => anyhow::bail!(
            "No hidden text found in '{}' at {} bit(s) per channel. \nThe image may not contain a hidden message or was hidden with a different depth.",
            args.image.to_string_lossy().red().bold(),
            depth.to_string().red().bold()
        ),
        result => result?,
    };
    log::debug!("recovered {} characters", text.chars().count());

    fs::write(&text_path, text).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            text_path.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully recovered and saved: {}",
        text_path.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令的执行逻辑。
///
/// 打印图像在每个受支持的位深度下的容量 (比特) 和可隐藏的最大字符数。
///
/// # Errors
///
/// 无法读取输入的图像文件时返回错误。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let picture = load_image(&args.image)?;

    println!(
        "{} ({}x{})",
        args.image.to_string_lossy().green().bold(),
        picture.width(),
        picture.height()
    );

    for depth in BitDepth::all() {
        println!(
            "  {} bit(s) per channel: {} bits, up to {} characters",
            depth.to_string().bold(),
            capacity_bits(&picture, depth),
            max_message_len(&picture, depth).to_string().green().bold()
        );
    }

    Ok(())
}
