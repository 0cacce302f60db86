//! # 位平面编解码模块
//!
//! 每个像素承载一个字节：字节被拆成 3/3/2 位三组，
//! 分别写入三个通道的最低位。字节按光栅顺序 (逐行、行内逐列)
//! 依次写入像素，先写 30 字节头部，再写载荷。

use crate::constants::{CHANNEL_FREE_BITS, HEADER_SIZE};
use crate::error::{Result, StegError};
use crate::header::{self, Header};
use image::RgbImage;
use tracing::debug;

/// 一个字节拆分后的三组位。
pub type BitTriple = [u8; 3];

/// 从载体中恢复出的全部内容。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub header: [u8; HEADER_SIZE],
    pub file_name: String,
    pub payload: Vec<u8>,
}

/// 将字节拆分为高 3 位、中 3 位和低 2 位。
pub fn split_bits(n: u8) -> BitTriple {
    [n >> 5, (n >> 2) & 0b111, n & 0b11]
}

/// [`split_bits`] 的逆运算。
pub fn merge_bits([high, middle, low]: BitTriple) -> u8 {
    (((high << 3) | middle) << 2) | low
}

/// 将一个字节写入单个像素的三个通道。
pub fn embed_byte(pixel: &mut [u8; 3], value: u8) {
    let groups = split_bits(value);
    for ((channel, &free_bits), group) in pixel.iter_mut().zip(&CHANNEL_FREE_BITS).zip(groups) {
        *channel = ((*channel >> free_bits) << free_bits) | group;
    }
}

/// 从单个像素的三个通道中读出一个字节。
pub fn extract_byte(pixel: &[u8; 3]) -> u8 {
    let mut groups = [0u8; 3];
    for ((group, &channel), &free_bits) in groups.iter_mut().zip(pixel).zip(&CHANNEL_FREE_BITS) {
        *group = channel & ((1u8 << free_bits) - 1);
    }
    merge_bits(groups)
}

/// 载体在头部之外还能容纳的载荷字节数。
pub fn capacity(carrier: &RgbImage) -> usize {
    pixel_count(carrier).saturating_sub(HEADER_SIZE)
}

/// 将头部和载荷依次写入载体。
///
/// 容量检查在任何像素被修改之前完成，失败时载体保持原样。
/// 超出 `HEADER_SIZE + payload.len()` 的像素不会被触碰。
///
/// # Errors
///
/// 像素数不足时返回 [`StegError::CapacityOverflow`]。
pub fn embed(carrier: &mut RgbImage, header: &[u8; HEADER_SIZE], payload: &[u8]) -> Result<()> {
    let required = HEADER_SIZE + payload.len();
    let available = pixel_count(carrier);
    if required > available {
        return Err(StegError::CapacityOverflow {
            required,
            available,
        });
    }

    carrier
        .pixels_mut()
        .zip(header.iter().chain(payload))
        .for_each(|(pixel, &byte)| embed_byte(&mut pixel.0, byte));

    debug!(
        embedded = required,
        width = carrier.width(),
        height = carrier.height(),
        "bytes embedded into carrier"
    );
    Ok(())
}

/// 仅读取并解析载体前 30 个像素中的头部。
///
/// # Errors
///
/// 像素数不足 30 时返回 [`StegError::TruncatedCarrier`]，
/// 头部结构无效时返回 [`StegError::MalformedHeader`]。
pub fn read_header(carrier: &RgbImage) -> Result<Header> {
    header::parse(&read_header_bytes(carrier)?)
}

/// 从载体中恢复头部、文件名和载荷。
///
/// # Errors
///
/// 载体像素数少于 `30 + file_size` 时返回 [`StegError::TruncatedCarrier`]，
/// 头部结构无效时返回 [`StegError::MalformedHeader`]。
pub fn extract(carrier: &RgbImage) -> Result<Extracted> {
    let raw_header = read_header_bytes(carrier)?;
    let Header {
        file_size,
        file_name,
    } = header::parse(&raw_header)?;

    let available = pixel_count(carrier);
    let required = usize::try_from(file_size)
        .ok()
        .and_then(|size| size.checked_add(HEADER_SIZE))
        .unwrap_or(usize::MAX);
    if required > available {
        return Err(StegError::TruncatedCarrier {
            required,
            available,
        });
    }

    let payload: Vec<u8> = carrier
        .pixels()
        .skip(HEADER_SIZE)
        .take(required - HEADER_SIZE)
        .map(|pixel| extract_byte(&pixel.0))
        .collect();

    debug!(file_size, %file_name, "payload extracted from carrier");
    Ok(Extracted {
        header: raw_header,
        file_name,
        payload,
    })
}

fn read_header_bytes(carrier: &RgbImage) -> Result<[u8; HEADER_SIZE]> {
    let available = pixel_count(carrier);
    if available < HEADER_SIZE {
        return Err(StegError::TruncatedCarrier {
            required: HEADER_SIZE,
            available,
        });
    }

    let mut header = [0u8; HEADER_SIZE];
    for (byte, pixel) in header.iter_mut().zip(carrier.pixels()) {
        *byte = extract_byte(&pixel.0);
    }
    Ok(header)
}

fn pixel_count(carrier: &RgbImage) -> usize {
    carrier.width() as usize * carrier.height() as usize
}
