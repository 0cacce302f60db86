/// 隐写头部的固定长度 (字节)。
/// 布局为 `<` + 8 位十进制大小 + 20 字符文件名 + `>`。
pub const HEADER_SIZE: usize = 30;

/// 头部中表示载荷大小的十进制位数。
pub const SIZE_DIGITS: usize = 8;

/// 8 位十进制能表示的最大载荷大小 (字节)。
pub const MAX_PAYLOAD_SIZE: u64 = 99_999_999;

/// 头部中文件名字段的固定宽度。
pub const NAME_WIDTH: usize = 20;

/// 文件名字段的左侧填充字符。
pub const NAME_PAD: u8 = b'_';

/// 头部的起始标记。
pub const HEADER_START: u8 = b'<';

/// 头部的结束标记。
pub const HEADER_END: u8 = b'>';

/// 每个通道被清空并用于存放数据的低位数量。
/// 三个通道依次存放一个字节的高 3 位、中 3 位和低 2 位，
/// 因此每个像素恰好承载一个字节。
pub const CHANNEL_FREE_BITS: [u32; 3] = [3, 3, 2];
