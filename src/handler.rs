//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责图像文件的读写、调用核心隐写服务以及向用户报告结果。

use crate::cli::{CapacityArgs, HideArgs, RecoverArgs};
use crate::service::{extract, hide, max_capacity};
use anyhow::{Context, Result};
use colored::Colorize;
use image::DynamicImage;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// 可以安全保存隐写结果的无损图像扩展名。
const LOSSLESS_EXTENSIONS: [&str; 6] = ["png", "bmp", "tif", "tiff", "qoi", "webp"];

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像与待隐藏的数据、检查容量、调用隐写服务，
/// 最后将结果以无损格式写入目标图像文件。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标路径不是无损格式，或已存在且未指定 `--force`。
/// * 无法读取或解码输入的图像，或无法读取数据文件。
/// * 图像容量不足以隐藏数据。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| default_output_path(&args.image, "doctored", "png"));
    ensure_lossless(&dest)?;
    ensure_writable(&dest, args.force)?;

    let payload = match (&args.text, args.message) {
        (Some(path), _) => fs::read(path).with_context(|| {
            format!(
                "Unable to read text file: {}",
                path.to_string_lossy().red().bold()
            )
        })?,
        (None, Some(message)) => message.into_bytes(),
        (None, None) => anyhow::bail!("Nothing to hide: pass either --text or --message"),
    };

    let picture = load_image(&args.image)?;
    let available = max_capacity(&picture);
    info!(
        "Hiding {} bytes in {} ({} bytes available)",
        payload.len(),
        args.image.display(),
        available
    );

    let stego = hide(&payload, &picture).with_context(|| {
        format!(
            "Not enough space in the image to hide the data. \nRequired: {}, Available: {}",
            payload.len().to_string().red().bold(),
            available.to_string().green().bold()
        )
    })?;

    stego.into_image().save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The data has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像、调用隐写服务提取数据，
/// 最后将数据写入目标文件或打印到标准输出。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入的图像。
/// * 图像中没有有效的隐藏数据 (头部缺失、长度非法或数据被截断)。
/// * 目标文件已存在且未指定 `--force`，或无法写入。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let picture = load_image(&args.image)?;

    let data = extract(&picture).with_context(|| {
        format!(
            "Failed to recover hidden data from '{}'. \nThe image may not contain a hidden message or is corrupted.",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    info!(
        "Recovered {} bytes from {}",
        data.len(),
        args.image.display()
    );

    if args.print {
        println!("{}", String::from_utf8_lossy(&data));
        return Ok(());
    }

    let dest = args
        .text
        .unwrap_or_else(|| default_output_path(&args.image, "recovered", "txt"));
    ensure_writable(&dest, args.force)?;

    fs::write(&dest, data).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The data has been successfully recovered and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令：打印图像最多可隐藏的字节数。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let picture = load_image(&args.image)?;
    let capacity = max_capacity(&picture);

    println!(
        "{} ({}x{}) can hide up to {} bytes",
        args.image.to_string_lossy().bold(),
        picture.width(),
        picture.height(),
        capacity.to_string().green().bold()
    );
    Ok(())
}

fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

/// 在输入图像旁生成 `<prefix>_<名称>.<extension>` 形式的默认输出路径。
pub fn default_output_path(image: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_else(|| "image".into());
    image.with_file_name(format!("{prefix}_{stem}.{extension}"))
}

fn ensure_lossless(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    anyhow::ensure!(
        LOSSLESS_EXTENSIONS.contains(&extension.as_str()),
        "Output must use a lossless image format ({}), got: {}",
        LOSSLESS_EXTENSIONS.join(", "),
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}
