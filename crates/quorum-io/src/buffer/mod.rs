//! # buffer 模块说明
//!
//! ## 角色定位（Why）
//! - 在裸存储之上叠加有状态的游标视图：`position`/`limit`/`mark` 三指针
//!   支撑“写入 → flip → 读取”的双模式纪律，使一块定长缓冲可以在日志追加
//!   与网络帧编码的热路径上反复复用而无需重新分配；
//! - 通过零拷贝切片把同一块存储的受限窗口移交给其它消费者，
//!   游标彼此独立、内容互相可见。
//!
//! ## 设计概要（How）
//! - [`Buffer`] 持有 `Arc<dyn RawStorage>` 与自己的游标三元组；
//!   切片仅克隆 `Arc` 并平移基准偏移，最后一个视图释放时整块分配随之回收；
//! - 相对操作“先校验、再落存储、成功才前移游标”，失败路径对游标与内容
//!   零影响；绝对操作只校验不动游标；
//! - 定型读写族在 [`rw`](self) 子模块中由宏按统一模板展开，
//!   保证 8 种标量 × 相对/绝对 × 读写的错误契约完全一致。
//!
//! ## 不变量（What）
//! - 任何操作完成后恒有 `0 <= position <= limit <= capacity`；
//! - 绝对偏移以 `limit` 为界而非 `capacity`：可见窗口可以小于底层容量。

mod rw;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{IoError, Result};
use crate::storage::{HeapStorage, MappedStorage, RawStorage};

/// `Buffer` 是绑定在一个裸存储实例上的可导航游标视图。
///
/// # 设计动机（Why）
/// - 复刻经典的“写满后翻转再读”双模式游标纪律：单个缓冲无需重新分配即可
///   在填充与排空之间切换，这是日志追加与帧编码热路径的基本功；
/// - 游标状态（`position`/`limit`/`mark`/基准偏移）由每个视图独立持有，
///   字节本体则经 `Arc` 与兄弟切片共享——受控别名是显式设计而非事故。
///
/// # 架构关系（How）
/// - 所有内容访问最终委派给 [`RawStorage`] 的绝对原语，缓冲层只负责
///   偏移换算与窗口校验；
/// - [`slice`](Self::slice) 以 `base + position` 为新基准克隆出独立视图，
///   切片可继续切片，形成根植于同一块分配的视图树。
///
/// # 契约说明（What）
/// - **构造后置条件**：`position = 0`，`limit = capacity`，无 mark；
/// - **失败语义**：相对读写在越界时分别报 [`IoError::Underflow`] /
///   [`IoError::Overflow`]，且游标与内容保持原状；绝对读写越过 `limit`
///   报 [`IoError::OutOfBounds`]；
/// - **线程模型**：单个 `Buffer` 不做内部加锁，并发修改游标需要外部互斥，
///   或让每个并发方各持一个切片、仅在存储层同步。
///
/// # 风险与取舍（Trade-offs）
/// - 游标不加锁换来了热路径上的零同步开销，代价是把跨线程纪律交给调用方；
/// - 所有多字节标量固定为大端网络序（由存储契约单点定义），不提供运行时
///   字节序切换。
pub struct Buffer {
    storage: Arc<dyn RawStorage>,
    base: u64,
    capacity: u64,
    position: u64,
    limit: u64,
    mark: Option<u64>,
}

impl Buffer {
    /// 将缓冲绑定到调用方选定的裸存储实例上。
    ///
    /// # 后置条件
    /// - `capacity()` 为存储容量的构造期快照；`position = 0`，
    ///   `limit = capacity`，mark 未设置。
    pub fn new(storage: Arc<dyn RawStorage>) -> Self {
        let capacity = storage.capacity();
        Self {
            storage,
            base: 0,
            capacity,
            position: 0,
            limit: capacity,
            mark: None,
        }
    }

    /// 在堆上分配一块全零存储并绑定缓冲。
    pub fn allocate(capacity: u64) -> Result<Self> {
        Ok(Self::new(Arc::new(HeapStorage::allocate(capacity)?)))
    }

    /// 接管既有字节向量作为缓冲内容，容量与窗口均为其长度。
    pub fn wrap(bytes: Vec<u8>) -> Self {
        Self::new(Arc::new(HeapStorage::wrap(bytes)))
    }

    /// 打开（必要时创建）映射文件并绑定缓冲。
    pub fn map(path: impl AsRef<Path>, capacity: u64) -> Result<Self> {
        Ok(Self::new(Arc::new(MappedStorage::open(path, capacity)?)))
    }

    /// 返回缓冲容量（构造期快照；切片的容量是切片自身的固定跨度）。
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// 返回当前读写游标。
    pub fn position(&self) -> u64 {
        self.position
    }

    /// 设置读写游标。
    ///
    /// # 错误
    /// - `position > limit` 时返回 [`IoError::InvalidArgument`]，游标不变。
    pub fn set_position(&mut self, position: u64) -> Result<&mut Self> {
        if position > self.limit {
            return Err(IoError::InvalidArgument {
                what: "position",
                value: position,
                max: self.limit,
            });
        }
        self.position = position;
        Ok(self)
    }

    /// 返回当前可见窗口上界。
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// 设置可见窗口上界。
    ///
    /// # 契约说明
    /// - `limit > capacity` 时返回 [`IoError::InvalidArgument`]；
    /// - 新上界低于当前游标时立即钳制 `position = limit`，
    ///   高于新上界的 mark 同步失效——窗口收缩后绝不允许游标悬空在
    ///   窗口之外（安全钳制策略，见设计文档）。
    pub fn set_limit(&mut self, limit: u64) -> Result<&mut Self> {
        if limit > self.capacity {
            return Err(IoError::InvalidArgument {
                what: "limit",
                value: limit,
                max: self.capacity,
            });
        }
        self.limit = limit;
        if self.position > limit {
            self.position = limit;
        }
        if self.mark.is_some_and(|mark| mark > limit) {
            self.mark = None;
        }
        Ok(self)
    }

    /// 返回剩余字节数：`limit - position`。
    pub fn remaining(&self) -> u64 {
        self.limit - self.position
    }

    /// 判断是否仍有剩余字节。
    pub fn has_remaining(&self) -> bool {
        self.remaining() > 0
    }

    /// 翻转缓冲：`limit = position; position = 0`，丢弃 mark。
    ///
    /// 把刚写满的区域切换为可读窗口，是双模式纪律的枢纽操作。
    pub fn flip(&mut self) -> &mut Self {
        self.limit = self.position;
        self.position = 0;
        self.mark = None;
        self
    }

    /// 在当前游标处设置 mark。
    pub fn mark(&mut self) -> &mut Self {
        self.mark = Some(self.position);
        self
    }

    /// 将游标恢复到 mark 处；mark 本身保留，可重复恢复。
    ///
    /// # 错误
    /// - 未设置 mark 时返回 [`IoError::InvalidState`]。
    pub fn reset(&mut self) -> Result<&mut Self> {
        let mark = self.mark.ok_or(IoError::InvalidState {
            operation: "reset",
            requirement: "a previously set mark",
        })?;
        self.position = mark;
        Ok(self)
    }

    /// 回绕缓冲：`position = 0`，丢弃 mark；`limit` 不变。
    pub fn rewind(&mut self) -> &mut Self {
        self.position = 0;
        self.mark = None;
        self
    }

    /// 清空缓冲：`position = 0`，`limit = capacity`，丢弃 mark。
    ///
    /// 仅重置游标，不擦除存储内容。
    pub fn clear(&mut self) -> &mut Self {
        self.position = 0;
        self.limit = self.capacity;
        self.mark = None;
        self
    }

    /// 返回底层裸存储的共享句柄（bytes 访问器）。
    pub fn storage(&self) -> Arc<dyn RawStorage> {
        Arc::clone(&self.storage)
    }

    /// 从当前游标处切出一个独立视图。
    ///
    /// # 契约说明（What）
    /// - 新视图共享同一块存储：`base' = base + position`，
    ///   `capacity' = limit' = remaining()`，`position' = 0`，无 mark；
    /// - 游标状态互不传染；内容修改双向可见；
    /// - 切片可继续切片，整块分配在最后一个视图释放时回收。
    pub fn slice(&self) -> Buffer {
        let extent = self.remaining();
        Buffer {
            storage: Arc::clone(&self.storage),
            base: self.base + self.position,
            capacity: extent,
            position: 0,
            limit: extent,
            mark: None,
        }
    }

    /// 将后端缓冲的内容落盘；无内部缓冲的后端为空操作。
    pub fn flush(&self) -> Result<()> {
        self.storage.flush()
    }

    /// 校验相对读取并返回存储绝对偏移；调用方在存储操作成功后自行前移游标。
    pub(crate) fn checked_read(&self, len: u64) -> Result<u64> {
        if len > self.remaining() {
            return Err(IoError::Underflow {
                requested: len,
                remaining: self.remaining(),
            });
        }
        Ok(self.base + self.position)
    }

    /// 校验相对写入并返回存储绝对偏移；调用方在存储操作成功后自行前移游标。
    pub(crate) fn checked_write(&self, len: u64) -> Result<u64> {
        if len > self.remaining() {
            return Err(IoError::Overflow {
                requested: len,
                remaining: self.remaining(),
            });
        }
        Ok(self.base + self.position)
    }

    /// 校验绝对访问区间 `[offset, offset + len)` 是否落在窗口内并返回存储绝对偏移。
    ///
    /// 边界是 `limit` 而非 `capacity`：窗口之外即使仍有容量也不可寻址。
    pub(crate) fn checked_absolute(&self, offset: u64, len: u64) -> Result<u64> {
        let end = offset.checked_add(len).ok_or(IoError::OutOfBounds {
            offset,
            len,
            bound: self.limit,
        })?;
        if end > self.limit {
            return Err(IoError::OutOfBounds {
                offset,
                len,
                bound: self.limit,
            });
        }
        Ok(self.base + offset)
    }

    /// 前移游标；仅供读写族在存储操作成功后调用。
    pub(crate) fn advance(&mut self, len: u64) {
        debug_assert!(self.position + len <= self.limit);
        self.position += len;
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("base", &self.base)
            .field("capacity", &self.capacity)
            .field("position", &self.position)
            .field("limit", &self.limit)
            .field("mark", &self.mark)
            .finish_non_exhaustive()
    }
}
