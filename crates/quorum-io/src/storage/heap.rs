//! 堆后端：以一块定长堆分配承载存储契约，是测试与短生命周期编解码的默认选择。

use parking_lot::RwLock;

use crate::error::{IoError, Result};
use crate::storage::{RawStorage, checked_span};

/// `HeapStorage` 是基于堆分配的裸存储后端。
///
/// # 设计动机（Why）
/// - 日志帧编码、网络消息组装等短生命周期场景需要一个零系统调用、
///   分配即用的后端；
/// - 同时充当游标层契约测试的标准替身：所有 [`Buffer`](crate::buffer::Buffer)
///   行为只需针对堆后端验证一次即可覆盖全部后端。
///
/// # 结构设计（How）
/// - `capacity` 在构造时快照，读取容量无需加锁；
/// - 内容置于 `parking_lot::RwLock<Box<[u8]>>` 之内：读取并发、写入互斥，
///   满足 [`RawStorage`] 对 `&self` 访问的同步要求。
///
/// # 契约说明（What）
/// - **构造后置条件**：[`allocate`](Self::allocate) 返回的存储内容全零；
///   [`wrap`](Self::wrap) 保留传入字节，容量即其长度；
/// - 越界访问返回 [`IoError::OutOfBounds`]，内容不受影响。
///
/// # 取舍（Trade-offs）
/// - 原型系统的“包装外部数组”后端在此坍缩为 [`wrap`](Self::wrap)：
///   Rust 的所有权模型不允许在不转移所有权的前提下别名化调用方数组，
///   因此包装语义表达为“接管一个既有 `Vec<u8>`”。
pub struct HeapStorage {
    capacity: u64,
    cells: RwLock<Box<[u8]>>,
}

impl HeapStorage {
    /// 分配一块全零的堆存储。
    ///
    /// # 错误
    /// - 当 `capacity` 超出本平台可寻址范围时返回 [`IoError::InvalidArgument`]。
    pub fn allocate(capacity: u64) -> Result<Self> {
        let len = usize::try_from(capacity).map_err(|_| IoError::InvalidArgument {
            what: "capacity",
            value: capacity,
            max: usize::MAX as u64,
        })?;
        Ok(Self {
            capacity,
            cells: RwLock::new(vec![0u8; len].into_boxed_slice()),
        })
    }

    /// 接管一个既有字节向量，容量与长度一致。
    pub fn wrap(bytes: Vec<u8>) -> Self {
        Self {
            capacity: bytes.len() as u64,
            cells: RwLock::new(bytes.into_boxed_slice()),
        }
    }
}

impl RawStorage for HeapStorage {
    fn capacity(&self) -> u64 {
        self.capacity
    }

    fn get_slice(&self, offset: u64, dst: &mut [u8]) -> Result<()> {
        let start = checked_span(offset, dst.len() as u64, self.capacity)?;
        let cells = self.cells.read();
        dst.copy_from_slice(&cells[start..start + dst.len()]);
        Ok(())
    }

    fn set_slice(&self, offset: u64, src: &[u8]) -> Result<()> {
        let start = checked_span(offset, src.len() as u64, self.capacity)?;
        let mut cells = self.cells.write();
        cells[start..start + src.len()].copy_from_slice(src);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 零长度存储上的零长度访问应当合法，任何实际跨度都越界。
    #[test]
    fn zero_capacity_storage_accepts_only_empty_spans() {
        let storage = HeapStorage::allocate(0).expect("零容量分配应成功");
        storage
            .get_slice(0, &mut [])
            .expect("零长度读取不应越界");
        let err = storage.get_u8(0).expect_err("任何实际读取都应越界");
        assert_eq!(err.code(), crate::error::codes::OUT_OF_BOUNDS);
    }

    /// `wrap` 保留原始内容，容量等于传入长度。
    #[test]
    fn wrap_preserves_bytes_and_capacity() {
        let storage = HeapStorage::wrap(vec![7, 8, 9]);
        assert_eq!(storage.capacity(), 3);
        assert_eq!(storage.get_u8(2).expect("读取应成功"), 9);
    }

    /// 跨度末端恰好贴合容量时应成功，多一字节即失败。
    #[test]
    fn span_boundary_is_exclusive_at_capacity() {
        let storage = HeapStorage::allocate(8).expect("分配应成功");
        storage.set_i64(0, i64::MAX).expect("贴合容量的写入应成功");
        let err = storage
            .set_i64(1, 1)
            .expect_err("越过容量一字节的写入应失败");
        assert!(matches!(err, IoError::OutOfBounds { bound: 8, .. }));
    }
}
