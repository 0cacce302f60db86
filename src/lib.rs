//! # vessel_hide 库
//!
//! 本库包含文件隐写工具的核心逻辑：30 字节头部编解码
//! 以及按 3/3/2 位拆分字节的像素位平面编解码。

pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod header;
pub mod steganography;

pub use error::{Result, StegError};
