//! # storage 模块说明
//!
//! ## 角色定位（Why）
//! - 定义缓冲核心消费的“裸存储”契约：一段容量固定的线性字节地址空间，
//!   支持按绝对偏移读写标量与字节跨度，但不携带任何游标状态；
//! - 将堆内存、内存映射文件等后端收敛为一个封闭的小变体集合，
//!   使 [`Buffer`](crate::buffer::Buffer) 的游标逻辑可以只针对契约测试一次。
//!
//! ## 设计概要（How）
//! - [`RawStorage`] 仅要求后端实现四个原语：`capacity`、`get_slice`、
//!   `set_slice` 与 `flush`；全部定型标量读写由 trait 默认方法基于跨度原语
//!   派生，保证所有后端共享同一套大端（网络序）编码；
//! - 所有访问方法接受 `&self`，后端以内部可变性（`parking_lot` 读写锁）
//!   承担存储层的同步职责，从而允许兄弟切片通过 `Arc<dyn RawStorage>`
//!   共享同一块分配。
//!
//! ## 契约定义（What）
//! - 每次绝对访问必须校验 `offset + size <= capacity`，违例返回
//!   [`IoError::OutOfBounds`]，绝不静默截断；
//! - 成功路径之外不得修改存储内容：失败的写入对内容零影响。

mod heap;
mod mapped;

pub use heap::HeapStorage;
pub use mapped::MappedStorage;

use crate::error::{IoError, Result};

/// 校验 `[offset, offset + len)` 是否完整落在 `[0, bound)` 内。
///
/// 返回可直接用于切片索引的 `usize` 偏移；`offset + len` 的加法溢出
/// 同样按越界处理。
pub(crate) fn checked_span(offset: u64, len: u64, bound: u64) -> Result<usize> {
    let end = offset.checked_add(len).ok_or(IoError::OutOfBounds {
        offset,
        len,
        bound,
    })?;
    if end > bound {
        return Err(IoError::OutOfBounds { offset, len, bound });
    }
    // bound 来自一块真实存在的分配，必然可被 usize 表示。
    Ok(offset as usize)
}

/// `RawStorage` 描述一段无游标语义的线性字节存储。
///
/// # 设计背景（Why）
/// - **对标实践**：综合 `java.nio` 的 heap/direct/mapped 三分后端、TurDB 的
///   `MmapStorage` 与 LevelDB 系存储层，抽象出“容量 + 绝对读写 + 刷写”的
///   最小契约；
/// - **框架定位**：日志段、快照文件与线上编解码共用同一契约，后端差异
///   （堆、映射文件）对游标层完全透明；
/// - **封闭集合**：后端集合刻意保持小而封闭，新变体的准入条件是出现
///   现有变体无法表达的介质（如共享内存、RDMA 注册区）。
///
/// # 逻辑解析（How）
/// - 实现方只需提供 `capacity`/`get_slice`/`set_slice`/`flush` 四个原语；
/// - 全部定型标量访问（8 种标量 × 读写）由默认方法派生：先在栈上组装
///   定长字节组，再经 `from_be_bytes`/`to_be_bytes` 转换，统一为大端
///   网络序——这也把“字节序策略”固化在契约层而非各后端。
///
/// # 契约说明（What）
/// - **前置条件**：`offset + size <= capacity()`，违例返回
///   [`IoError::OutOfBounds`]；
/// - **后置条件**：读取不修改内容；写入仅在成功时生效；
/// - **线程模型**：方法接受 `&self`，实现必须自行保证并发访问下的内容
///   一致性（本 crate 的后端使用读写锁）；游标一致性则由上层各自持有的
///   [`Buffer`](crate::buffer::Buffer) 负责。
///
/// # 设计取舍（Trade-offs）
/// - 默认方法的“跨度组装”路径比直接指针访问多一次栈拷贝，换来的是后端
///   实现面最小化与字节序的单点定义；热路径如需极限优化，后端可以
///   覆写默认方法。
pub trait RawStorage: Send + Sync {
    /// 返回存储容量（字节），构造后不可变。
    fn capacity(&self) -> u64;

    /// 将 `[offset, offset + dst.len())` 的内容复制进 `dst`。
    fn get_slice(&self, offset: u64, dst: &mut [u8]) -> Result<()>;

    /// 将 `src` 完整写入 `[offset, offset + src.len())`。
    fn set_slice(&self, offset: u64, src: &[u8]) -> Result<()>;

    /// 将内部缓冲的内容落到介质上；无内部缓冲的后端为空操作。
    fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// 读取 1 字节无符号整数。
    fn get_u8(&self, offset: u64) -> Result<u8> {
        let mut raw = [0u8; 1];
        self.get_slice(offset, &mut raw)?;
        Ok(raw[0])
    }

    /// 写入 1 字节无符号整数。
    fn set_u8(&self, offset: u64, value: u8) -> Result<()> {
        self.set_slice(offset, &[value])
    }

    /// 读取 16 位字符（UTF-16 码元），大端序。
    fn get_u16(&self, offset: u64) -> Result<u16> {
        let mut raw = [0u8; 2];
        self.get_slice(offset, &mut raw)?;
        Ok(u16::from_be_bytes(raw))
    }

    /// 写入 16 位字符（UTF-16 码元），大端序。
    fn set_u16(&self, offset: u64, value: u16) -> Result<()> {
        self.set_slice(offset, &value.to_be_bytes())
    }

    /// 读取 16 位有符号整数，大端序。
    fn get_i16(&self, offset: u64) -> Result<i16> {
        let mut raw = [0u8; 2];
        self.get_slice(offset, &mut raw)?;
        Ok(i16::from_be_bytes(raw))
    }

    /// 写入 16 位有符号整数，大端序。
    fn set_i16(&self, offset: u64, value: i16) -> Result<()> {
        self.set_slice(offset, &value.to_be_bytes())
    }

    /// 读取 32 位有符号整数，大端序。
    fn get_i32(&self, offset: u64) -> Result<i32> {
        let mut raw = [0u8; 4];
        self.get_slice(offset, &mut raw)?;
        Ok(i32::from_be_bytes(raw))
    }

    /// 写入 32 位有符号整数，大端序。
    fn set_i32(&self, offset: u64, value: i32) -> Result<()> {
        self.set_slice(offset, &value.to_be_bytes())
    }

    /// 读取 64 位有符号整数，大端序。
    fn get_i64(&self, offset: u64) -> Result<i64> {
        let mut raw = [0u8; 8];
        self.get_slice(offset, &mut raw)?;
        Ok(i64::from_be_bytes(raw))
    }

    /// 写入 64 位有符号整数，大端序。
    fn set_i64(&self, offset: u64, value: i64) -> Result<()> {
        self.set_slice(offset, &value.to_be_bytes())
    }

    /// 读取 IEEE 754 单精度浮点数，大端序。
    fn get_f32(&self, offset: u64) -> Result<f32> {
        let mut raw = [0u8; 4];
        self.get_slice(offset, &mut raw)?;
        Ok(f32::from_be_bytes(raw))
    }

    /// 写入 IEEE 754 单精度浮点数，大端序。
    fn set_f32(&self, offset: u64, value: f32) -> Result<()> {
        self.set_slice(offset, &value.to_be_bytes())
    }

    /// 读取 IEEE 754 双精度浮点数，大端序。
    fn get_f64(&self, offset: u64) -> Result<f64> {
        let mut raw = [0u8; 8];
        self.get_slice(offset, &mut raw)?;
        Ok(f64::from_be_bytes(raw))
    }

    /// 写入 IEEE 754 双精度浮点数，大端序。
    fn set_f64(&self, offset: u64, value: f64) -> Result<()> {
        self.set_slice(offset, &value.to_be_bytes())
    }

    /// 读取 1 字节布尔值：非零即 `true`。
    fn get_bool(&self, offset: u64) -> Result<bool> {
        Ok(self.get_u8(offset)? != 0)
    }

    /// 写入 1 字节布尔值：`true` 编码为 `1`，`false` 编码为 `0`。
    fn set_bool(&self, offset: u64, value: bool) -> Result<()> {
        self.set_u8(offset, u8::from(value))
    }
}
