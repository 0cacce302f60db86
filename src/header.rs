//! # 头部编解码模块
//!
//! 头部固定为 30 个 ASCII 字节，记录载荷的大小和原始文件名：
//!
//! ```text
//! <00000003_______________a.txt>
//! ^ 大小(8) ^ 文件名(20)         ^
//! ```
//!
//! 超过 20 字节的文件名只保留最后 20 字节，即从前部截断。

use crate::constants::{
    HEADER_END, HEADER_SIZE, HEADER_START, MAX_PAYLOAD_SIZE, NAME_PAD, NAME_WIDTH, SIZE_DIGITS,
};
use crate::error::{Result, StegError};

/// 从头部中解析出的元数据。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub file_size: u64,
    pub file_name: String,
}

/// 根据载荷大小和文件名生成 30 字节的头部。
///
/// # Errors
///
/// `file_size` 大于 99,999,999 时返回 [`StegError::SizeOverflow`]。
pub fn compose(file_size: u64, file_name: &str) -> Result<[u8; HEADER_SIZE]> {
    if file_size > MAX_PAYLOAD_SIZE {
        return Err(StegError::SizeOverflow { size: file_size });
    }

    let mut header = [NAME_PAD; HEADER_SIZE];
    header[0] = HEADER_START;
    header[HEADER_SIZE - 1] = HEADER_END;

    let size_field = format!("{:0width$}", file_size, width = SIZE_DIGITS);
    header[1..=SIZE_DIGITS].copy_from_slice(size_field.as_bytes());

    // 右对齐：左侧保留 '_'，过长时只取末尾 NAME_WIDTH 字节
    let name = file_name.as_bytes();
    let kept = &name[name.len().saturating_sub(NAME_WIDTH)..];
    let name_end = HEADER_SIZE - 1;
    header[name_end - kept.len()..name_end].copy_from_slice(kept);

    Ok(header)
}

/// 解析 30 字节的头部，恢复载荷大小和文件名。
///
/// 文件名字段两端的 '_' 会被全部去除。
///
/// # Errors
///
/// 长度不为 30、起止标记缺失或大小字段不是 8 位十进制数字时，
/// 返回 [`StegError::MalformedHeader`]。
pub fn parse(header: &[u8]) -> Result<Header> {
    if header.len() != HEADER_SIZE {
        return Err(malformed(format!(
            "expected {} bytes, found {}",
            HEADER_SIZE,
            header.len()
        )));
    }
    if header[0] != HEADER_START || header[HEADER_SIZE - 1] != HEADER_END {
        return Err(malformed("missing '<' or '>' boundary marker".to_string()));
    }

    let size_field = &header[1..=SIZE_DIGITS];
    if !size_field.iter().all(u8::is_ascii_digit) {
        return Err(malformed(format!(
            "size field {:?} is not decimal",
            String::from_utf8_lossy(size_field)
        )));
    }
    let file_size = size_field
        .iter()
        .fold(0u64, |acc, &digit| acc * 10 + u64::from(digit - b'0'));

    let name_field = &header[SIZE_DIGITS + 1..HEADER_SIZE - 1];
    let file_name = match name_field.iter().position(|&b| b != NAME_PAD) {
        Some(start) => {
            let end = name_field.iter().rposition(|&b| b != NAME_PAD).unwrap_or(start) + 1;
            String::from_utf8_lossy(&name_field[start..end]).into_owned()
        }
        None => String::new(),
    };

    Ok(Header {
        file_size,
        file_name,
    })
}

fn malformed(reason: String) -> StegError {
    StegError::MalformedHeader { reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_matches_fixed_layout() {
        let header = compose(3, "a.txt").unwrap();
        assert_eq!(&header, b"<00000003_______________a.txt>");
    }

    #[test]
    fn compose_and_parse_agree() {
        let cases = [
            (0, "x"),
            (1, "a.txt"),
            (4096, "photo.png"),
            (12_345_678, "eport-2024.final.pdf"),
            (MAX_PAYLOAD_SIZE, "exactly20chars.bin!!"),
            (99, "名前.txt"),
        ];
        for (size, name) in cases {
            let header = compose(size, name).unwrap();
            assert_eq!(header.len(), HEADER_SIZE);
            let parsed = parse(&header).unwrap();
            assert_eq!(parsed.file_size, size);
            assert_eq!(parsed.file_name, name);
        }
    }

    #[test]
    fn long_name_keeps_last_twenty_bytes() {
        let name = "abcdefghijklmnopqrstuvwxy";
        assert_eq!(name.len(), 25);

        let header = compose(10, name).unwrap();
        assert_eq!(&header[9..29], b"fghijklmnopqrstuvwxy");
        assert_eq!(parse(&header).unwrap().file_name, "fghijklmnopqrstuvwxy");
    }

    #[test]
    fn size_over_eight_digits_is_rejected() {
        assert_eq!(
            compose(100_000_000, "a.txt"),
            Err(StegError::SizeOverflow { size: 100_000_000 })
        );
    }

    #[test]
    fn underscores_are_stripped_from_both_ends() {
        let header = compose(7, "_draft_v2_").unwrap();
        assert_eq!(parse(&header).unwrap().file_name, "draft_v2");
    }

    #[test]
    fn empty_name_field_parses_to_empty_string() {
        let header = compose(0, "").unwrap();
        assert_eq!(&header, b"<00000000____________________>");
        assert_eq!(parse(&header).unwrap().file_name, "");
    }

    #[test]
    fn missing_markers_are_rejected() {
        let mut header = compose(3, "a.txt").unwrap();
        header[0] = b'[';
        assert!(matches!(
            parse(&header),
            Err(StegError::MalformedHeader { .. })
        ));

        let mut header = compose(3, "a.txt").unwrap();
        header[29] = b']';
        assert!(matches!(
            parse(&header),
            Err(StegError::MalformedHeader { .. })
        ));
    }

    #[test]
    fn non_decimal_size_is_rejected() {
        let mut header = compose(3, "a.txt").unwrap();
        header[4] = b'x';
        assert!(matches!(
            parse(&header),
            Err(StegError::MalformedHeader { .. })
        ));
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(matches!(
            parse(b"<00000003_a.txt>"),
            Err(StegError::MalformedHeader { .. })
        ));
    }
}
