//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::Parser;
use std::path::PathBuf;

/// 将任意文件隐藏在无损格式图像 (如 PNG, BMP) 像素的低位中，并可原样恢复。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "将任意文件隐藏在无损格式图像 (如 PNG, BMP) 像素的低位中，并可原样恢复。每个像素承载一个字节。"
)]
pub struct Cli {
    /// 输出调试日志 (可被 RUST_LOG 覆盖)。
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏)、recover (恢复) 和 inspect (查看)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 将文件隐藏到载体图像中。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复文件。
    Recover(RecoverArgs),

    /// 查看图像的容量以及其中隐藏的文件信息。
    Inspect(InspectArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 作为载体的输入图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文件路径。
    #[arg(short, long)]
    pub file: PathBuf,

    /// 结果图像的输出路径，默认为载体旁的 `doctored_<名称>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 覆盖已存在的输出文件。
    #[arg(long)]
    pub force: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 已隐藏文件的图像路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复文件的保存目录，默认为图像所在目录。
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// 覆盖已存在的输出文件。
    #[arg(long)]
    pub force: bool,
}

/// 'inspect' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// 要查看的图像路径。
    #[arg(short, long)]
    pub image: PathBuf,
}
