//! 定型读写族：8 种标量 × 相对/绝对寻址，外加整片与缓冲间的批量搬运。
//!
//! ## 设计概要（How）
//! - 标量操作由 [`scalar_rw`] 宏按统一模板展开：相对操作“校验 → 落存储 →
//!   前移游标”，绝对操作“校验 → 落存储”，错误契约与前移时机在宏内单点
//!   定义，杜绝 32 个方法各自为政；
//! - 批量操作按 `length` 而非固定标量宽度计量，沿用同一套
//!   Underflow/Overflow/OutOfBounds 规则；
//! - 缓冲间搬运经一次栈外临时分配完成，简单性优先——跨后端的直接
//!   存储到存储拷贝留待出现真实热点后再做。

use super::Buffer;
use crate::error::{IoError, Result};

/// 按统一模板展开一种标量的四个访问方法。
///
/// 模板参数依次为：标量类型、字节宽度、中文描述、四个方法名、
/// 存储层的对应原语。
macro_rules! scalar_rw {
    (
        $ty:ty, $size:expr, $desc:literal,
        $read:ident, $read_at:ident, $write:ident, $write_at:ident,
        $get:ident, $set:ident
    ) => {
        #[doc = concat!("在当前游标处读取", $desc, "，成功后游标前移 ", stringify!($size), " 字节。")]
        #[doc = ""]
        #[doc = "# 错误"]
        #[doc = concat!("- 剩余字节不足 ", stringify!($size), " 时返回 [`IoError::Underflow`]，游标不变。")]
        pub fn $read(&mut self) -> Result<$ty> {
            let offset = self.checked_read($size)?;
            let value = self.storage.$get(offset)?;
            self.advance($size);
            Ok(value)
        }

        #[doc = concat!("在给定偏移处读取", $desc, "，不移动游标。")]
        #[doc = ""]
        #[doc = "# 错误"]
        #[doc = "- 访问区间越过 `limit` 时返回 [`IoError::OutOfBounds`]。"]
        pub fn $read_at(&self, offset: u64) -> Result<$ty> {
            let offset = self.checked_absolute(offset, $size)?;
            self.storage.$get(offset)
        }

        #[doc = concat!("在当前游标处写入", $desc, "，成功后游标前移 ", stringify!($size), " 字节。")]
        #[doc = ""]
        #[doc = "# 错误"]
        #[doc = concat!("- 剩余字节不足 ", stringify!($size), " 时返回 [`IoError::Overflow`]，游标与内容均不变。")]
        pub fn $write(&mut self, value: $ty) -> Result<&mut Self> {
            let offset = self.checked_write($size)?;
            self.storage.$set(offset, value)?;
            self.advance($size);
            Ok(self)
        }

        #[doc = concat!("在给定偏移处写入", $desc, "，不移动游标。")]
        #[doc = ""]
        #[doc = "# 错误"]
        #[doc = "- 访问区间越过 `limit` 时返回 [`IoError::OutOfBounds`]，内容不变。"]
        pub fn $write_at(&mut self, offset: u64, value: $ty) -> Result<&mut Self> {
            let offset = self.checked_absolute(offset, $size)?;
            self.storage.$set(offset, value)?;
            Ok(self)
        }
    };
}

impl Buffer {
    scalar_rw!(u8, 1, "1 字节", read_byte, read_byte_at, write_byte, write_byte_at, get_u8, set_u8);
    scalar_rw!(u16, 2, "16 位字符（UTF-16 码元）", read_char, read_char_at, write_char, write_char_at, get_u16, set_u16);
    scalar_rw!(i16, 2, "16 位有符号整数", read_short, read_short_at, write_short, write_short_at, get_i16, set_i16);
    scalar_rw!(i32, 4, "32 位有符号整数", read_int, read_int_at, write_int, write_int_at, get_i32, set_i32);
    scalar_rw!(i64, 8, "64 位有符号整数", read_long, read_long_at, write_long, write_long_at, get_i64, set_i64);
    scalar_rw!(f32, 4, "IEEE 754 单精度浮点数", read_float, read_float_at, write_float, write_float_at, get_f32, set_f32);
    scalar_rw!(f64, 8, "IEEE 754 双精度浮点数", read_double, read_double_at, write_double, write_double_at, get_f64, set_f64);
    scalar_rw!(bool, 1, "1 字节布尔值（非零即真）", read_bool, read_bool_at, write_bool, write_bool_at, get_bool, set_bool);

    /// 读取恰好 `dst.len()` 字节填满目标切片，游标前移同样的字节数。
    ///
    /// # 错误
    /// - `dst.len() > remaining()` 时返回 [`IoError::Underflow`]，
    ///   游标与 `dst` 内容均不变。
    pub fn read_bytes(&mut self, dst: &mut [u8]) -> Result<&mut Self> {
        let len = dst.len() as u64;
        let offset = self.checked_read(len)?;
        self.storage.get_slice(offset, dst)?;
        self.advance(len);
        Ok(self)
    }

    /// 读取 `len` 字节写入 `dst[offset .. offset + len)`。
    ///
    /// # 契约说明
    /// - `offset`/`len` 描述目标切片内的落点；区间越过 `dst` 边界时返回
    ///   [`IoError::InvalidArgument`]；
    /// - 源侧不足 `len` 字节时返回 [`IoError::Underflow`]。
    pub fn read_bytes_into(&mut self, dst: &mut [u8], offset: u64, len: u64) -> Result<&mut Self> {
        let range = checked_slice_range(dst.len(), offset, len)?;
        let src_offset = self.checked_read(len)?;
        self.storage.get_slice(src_offset, &mut dst[range])?;
        self.advance(len);
        Ok(self)
    }

    /// 将本缓冲的内容读入 `dst`，搬运量为 `dst.remaining()`，双方游标同步前移。
    ///
    /// # 错误
    /// - `dst.remaining() > self.remaining()` 时返回 [`IoError::Underflow`]，
    ///   双方状态均不变。
    pub fn read_buffer(&mut self, dst: &mut Buffer) -> Result<&mut Self> {
        let len = dst.remaining();
        let src_offset = self.checked_read(len)?;
        let dst_offset = dst.checked_write(len)?;
        let mut staging = vec![0u8; len as usize];
        self.storage.get_slice(src_offset, &mut staging)?;
        dst.storage.set_slice(dst_offset, &staging)?;
        self.advance(len);
        dst.advance(len);
        Ok(self)
    }

    /// 写入整个 `src`，游标前移 `src.len()` 字节。
    ///
    /// # 错误
    /// - `src.len() > remaining()` 时返回 [`IoError::Overflow`]，
    ///   游标与内容均不变。
    pub fn write_bytes(&mut self, src: &[u8]) -> Result<&mut Self> {
        let len = src.len() as u64;
        let offset = self.checked_write(len)?;
        self.storage.set_slice(offset, src)?;
        self.advance(len);
        Ok(self)
    }

    /// 写入 `src[offset .. offset + len)` 的内容。
    ///
    /// # 契约说明
    /// - 区间越过 `src` 边界时返回 [`IoError::InvalidArgument`]；
    /// - 本侧剩余不足 `len` 字节时返回 [`IoError::Overflow`]。
    pub fn write_bytes_from(&mut self, src: &[u8], offset: u64, len: u64) -> Result<&mut Self> {
        let range = checked_slice_range(src.len(), offset, len)?;
        let dst_offset = self.checked_write(len)?;
        self.storage.set_slice(dst_offset, &src[range])?;
        self.advance(len);
        Ok(self)
    }

    /// 将 `src` 的剩余内容写入本缓冲，搬运量为 `src.remaining()`，双方游标同步前移。
    ///
    /// # 错误
    /// - `src.remaining() > self.remaining()` 时返回 [`IoError::Overflow`]，
    ///   双方状态均不变。
    pub fn write_buffer(&mut self, src: &mut Buffer) -> Result<&mut Self> {
        let len = src.remaining();
        let dst_offset = self.checked_write(len)?;
        let src_offset = src.checked_read(len)?;
        let mut staging = vec![0u8; len as usize];
        src.storage.get_slice(src_offset, &mut staging)?;
        self.storage.set_slice(dst_offset, &staging)?;
        src.advance(len);
        self.advance(len);
        Ok(self)
    }
}

/// 校验调用方切片内的 `[offset, offset + len)` 区间并转换为索引范围。
fn checked_slice_range(
    slice_len: usize,
    offset: u64,
    len: u64,
) -> Result<core::ops::Range<usize>> {
    let end = offset.checked_add(len).ok_or(IoError::InvalidArgument {
        what: "slice range",
        value: u64::MAX,
        max: slice_len as u64,
    })?;
    if end > slice_len as u64 {
        return Err(IoError::InvalidArgument {
            what: "slice range",
            value: end,
            max: slice_len as u64,
        });
    }
    Ok(offset as usize..end as usize)
}
