//! # 错误类型
//!
//! 隐写编解码核心可能产生的所有错误。

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StegError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StegError {
    /// 载荷大小超出 8 位十进制头部字段的表示范围。
    #[error("payload of {size} bytes exceeds the header limit of 99999999 bytes")]
    SizeOverflow { size: u64 },

    /// 载体图像的像素数不足以容纳头部和载荷。
    #[error("embedding capacity overflow: {required} pixels required, {available} available")]
    CapacityOverflow { required: usize, available: usize },

    /// 头部结构校验失败。
    #[error("malformed header: {reason}")]
    MalformedHeader { reason: String },

    /// 载体图像的像素数少于头部声明需要读取的数量。
    #[error("truncated carrier: {required} pixels required, {available} available")]
    TruncatedCarrier { required: usize, available: usize },
}
