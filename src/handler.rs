//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `inspect` 子命令的高级业务逻辑。
//! 本模块负责协调图像与文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::cli::{HideArgs, InspectArgs, RecoverArgs};
use crate::constants::HEADER_SIZE;
use crate::error::StegError;
use crate::header::compose;
use crate::steganography::{capacity, embed, extract, read_header};
use anyhow::{Context, Result};
use colored::Colorize;
use image::RgbImage;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::info;

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取载体图像和待隐藏文件、生成头部、检查容量是否足够、
/// 调用核心函数写入像素，最后保存结果图像。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取载体图像或待隐藏文件。
/// * 文件超过头部能表示的最大大小。
/// * 图像没有足够的像素来容纳文件。
/// * 输出文件已存在且未指定 `--force`。
/// * 无法写入结果图像。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = match args.dest {
        Some(dest) => dest,
        None => default_dest(&args.image),
    };
    ensure_writable(&dest, args.force)?;

    let mut picture = load_carrier(&args.image)?;

    let file_size = fs::metadata(&args.file)
        .with_context(|| {
            format!(
                "Unable to read file to hide: {}",
                args.file.to_string_lossy().red().bold()
            )
        })?
        .len();

    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| {
            format!(
                "The path to hide has no file name: {}",
                args.file.to_string_lossy().red().bold()
            )
        })?;

    let header = compose(file_size, &file_name).with_context(|| {
        format!(
            "Unable to hide {}: the file is too large for the header.",
            args.file.to_string_lossy().red().bold()
        )
    })?;

    // 在读取载荷之前按文件大小检查容量
    let available_space = capacity(&picture);
    if file_size > available_space as u64 {
        return Err(StegError::CapacityOverflow {
            required: usize::try_from(file_size)
                .map_or(usize::MAX, |size| size.saturating_add(HEADER_SIZE)),
            available: available_space + HEADER_SIZE,
        })
        .with_context(|| {
            format!(
                "Not enough space in the image to hide the file. \nRequired: {}, Available: {}",
                file_size.to_string().red().bold(),
                available_space.to_string().green().bold()
            )
        });
    }

    let payload = fs::read(&args.file).with_context(|| {
        format!(
            "Unable to read file to hide: {}",
            args.file.to_string_lossy().red().bold()
        )
    })?;
    anyhow::ensure!(
        payload.len() as u64 == file_size,
        "The file to hide changed while it was being read: {}",
        args.file.to_string_lossy().red().bold()
    );

    embed(&mut picture, &header, &payload)
        .with_context(|| "Failed to embed the file into the image.")?;
    info!(
        bytes = payload.len(),
        name = %file_name,
        "file embedded"
    );

    picture.save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The file has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像、解析头部并恢复载荷，
/// 最后以头部中记录的文件名写入输出目录。
///
/// # Arguments
///
/// * `args` - 包含输入路径和输出目录的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入图像。
/// * 图像中没有有效的头部，或像素数少于头部声明的大小。
/// * 输出文件已存在且未指定 `--force`。
/// * 无法写入恢复的文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let picture = load_carrier(&args.image)?;

    let extracted = extract(&picture).with_context(|| {
        format!(
            "Failed to recover a hidden file from '{}'. \nThe image may not contain hidden data or is corrupted.",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    info!(
        bytes = extracted.payload.len(),
        name = %extracted.file_name,
        "file extracted"
    );

    let out_dir = match args.out_dir {
        Some(dir) => dir,
        None => parent_dir(&args.image),
    };
    let dest = out_dir.join(recovered_name(&extracted.file_name, &args.image));
    ensure_writable(&dest, args.force)?;

    fs::write(&dest, &extracted.payload).with_context(|| {
        format!(
            "Unable to write to recovered file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The file has been successfully recovered and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Inspect' 命令的执行逻辑。
///
/// 打印图像尺寸和可用容量；若前 30 个像素构成有效头部，
/// 同时打印其中记录的文件名和大小。不会写入任何文件。
pub fn handle_inspect(args: InspectArgs) -> Result<()> {
    let picture = load_carrier(&args.image)?;

    println!(
        "Image: {} ({}x{}, {} pixels)",
        args.image.to_string_lossy().green().bold(),
        picture.width(),
        picture.height(),
        picture.width() as u64 * picture.height() as u64
    );
    println!(
        "Capacity: {} bytes ({} reserved for the header)",
        capacity(&picture).to_string().green().bold(),
        HEADER_SIZE
    );

    match read_header(&picture) {
        Ok(header) => println!(
            "Hidden file: {} ({} bytes)",
            header.file_name.green().bold(),
            header.file_size.to_string().green().bold()
        ),
        Err(err) => println!("No hidden file detected: {}", err.to_string().yellow()),
    }

    Ok(())
}

fn load_carrier(path: &Path) -> Result<RgbImage> {
    let picture = image::open(path)
        .with_context(|| {
            format!(
                "Unable to read image file: {}",
                path.to_string_lossy().red().bold()
            )
        })?
        .to_rgb8();
    info!(
        width = picture.width(),
        height = picture.height(),
        "carrier loaded"
    );
    Ok(picture)
}

fn ensure_writable(dest: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !dest.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        dest.to_string_lossy().red().bold()
    );
    Ok(())
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

fn image_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}

/// 载体旁的 `doctored_<名称>.png`。
fn default_dest(image: &Path) -> PathBuf {
    parent_dir(image).join(format!("doctored_{}.png", image_stem(image)))
}

/// 头部中的文件名来自图像，不可信；无法安全用作文件名时改用
/// `recovered_<图像名称>.bin`。
fn recovered_name(name: &str, image: &Path) -> String {
    let mut components = Path::new(name).components();
    let single_file_name = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    // '/' 与 ':' 需单独拒绝：`a/.` 会被规整为单个组件，`C:x` 在 Windows 上相对盘符
    let unsafe_name = !single_file_name || name.contains(['/', '\\', ':', '\0']);
    if unsafe_name {
        format!("recovered_{}.bin", image_stem(image))
    } else {
        name.to_string()
    }
}
