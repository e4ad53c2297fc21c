//! 映射文件后端：把日志段或快照文件直接映射进地址空间，读写即内存访问。

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use memmap2::MmapMut;
use parking_lot::RwLock;

use crate::error::Result;
use crate::storage::{RawStorage, checked_span};

/// `MappedStorage` 是基于内存映射文件的裸存储后端。
///
/// # 设计动机（Why）
/// - 日志段与快照要求“写入可持久、重启可恢复”，映射文件让存储契约
///   直接落在页缓存之上，读路径零系统调用；
/// - 与堆后端共享同一 [`RawStorage`] 契约，游标层与编解码逻辑无需感知
///   持久化介质的存在。
///
/// # 结构设计（How）
/// - 构造时将文件扩展到目标容量并建立可写映射；
/// - 映射置于读写锁内，与堆后端保持一致的同步模型；
/// - `flush` 显式回写脏页；`Drop` 时再兜底刷一次，失败仅记录
///   `tracing::warn`——析构路径绝不 panic。
///
/// # 契约说明（What）
/// - **前置条件**：调用方独占目标文件的生命周期管理（参见资源作用域
///   约定）；映射期间不得在进程外截断该文件；
/// - **后置条件**：`open` 成功后文件长度等于 `capacity`，既有内容保留；
///   `flush` 返回后，已写入的字节对后续重新映射可见。
///
/// # 风险提示（Trade-offs）
/// - 映射建立依赖一处 `unsafe`（`memmap2` 的固有签名），安全性由上述
///   文件独占前置条件保证；
/// - 容量在构造后不可变，扩容需要重建存储并由调用方迁移视图。
pub struct MappedStorage {
    capacity: u64,
    path: PathBuf,
    map: RwLock<MmapMut>,
}

impl MappedStorage {
    /// 打开（必要时创建）文件并映射为定长存储。
    ///
    /// 文件不存在时创建为全零；已存在且长度不足时扩展到 `capacity`，
    /// 长度超出时保留多余内容但仅映射前 `capacity` 字节所在区间。
    pub fn open(path: impl AsRef<Path>, capacity: u64) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;
        if file.metadata()?.len() < capacity {
            file.set_len(capacity)?;
        }
        // SAFETY: 文件句柄在映射期间由调用方独占，契约要求映射存续期内
        // 不得在进程外截断该文件。
        let map = unsafe { MmapMut::map_mut(&file)? };
        tracing::debug!(path = %path.display(), capacity, "mapped storage opened");
        Ok(Self {
            capacity,
            path,
            map: RwLock::new(map),
        })
    }

    /// 返回映射的文件路径。
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RawStorage for MappedStorage {
    fn capacity(&self) -> u64 {
        self.capacity
    }

    fn get_slice(&self, offset: u64, dst: &mut [u8]) -> Result<()> {
        let start = checked_span(offset, dst.len() as u64, self.capacity)?;
        let map = self.map.read();
        dst.copy_from_slice(&map[start..start + dst.len()]);
        Ok(())
    }

    fn set_slice(&self, offset: u64, src: &[u8]) -> Result<()> {
        let start = checked_span(offset, src.len() as u64, self.capacity)?;
        let mut map = self.map.write();
        map[start..start + src.len()].copy_from_slice(src);
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.map.read().flush()?;
        Ok(())
    }
}

impl Drop for MappedStorage {
    fn drop(&mut self) {
        if let Err(err) = self.flush() {
            tracing::warn!(
                path = %self.path.display(),
                error = %err,
                "failed to flush mapped storage on release"
            );
        }
    }
}
