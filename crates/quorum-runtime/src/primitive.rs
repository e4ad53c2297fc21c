//! # primitive 模块说明
//!
//! ## 角色定位（Why）
//! - 分布式原语（复制树、计数器等）以字符串标识符对外命名，运行时在
//!   创建或挂载具名实例时需要一张“标识符 → 类型工厂”的注册表；
//! - 缓冲核心只经手原语的字节化状态：服务把快照编码进
//!   [`Buffer`](quorum_io::Buffer)，恢复时再从中解码——注册表本身是
//!   纯粹的装配层，不承载任何分布式语义。
//!
//! ## 契约定义（What）
//! - 标识符在注册表内唯一，重复注册立即失败而非静默覆盖；
//! - 注册表只读路径（查找、建服务）可被并发共享（`Send + Sync`），
//!   注册阶段通常发生在启动期。

use std::collections::HashMap;
use std::sync::Arc;

use quorum_io::Buffer;

use crate::error::{Result, RuntimeError};

/// `PrimitiveService` 是原语的复制状态机侧契约。
///
/// # 设计背景（Why）
/// - 共识层对状态机的唯一字节级要求是“可快照、可恢复”：快照写入由
///   日志压缩触发，恢复发生在新节点追赶或重启回放时；
/// - 契约刻意只暴露缓冲而非具体编码格式，各原语自行决定其状态的
///   线格式，核心只保证字节搬运的安全性。
///
/// # 契约说明（What）
/// - `snapshot` 将当前状态编码进缓冲并前移其游标；
/// - `restore` 从缓冲当前游标处解码并覆盖自身状态；
/// - 同一版本的 `snapshot` → `restore` 必须构成恒等往返。
pub trait PrimitiveService: Send {
    /// 将当前状态编码进 `buffer`。
    fn snapshot(&self, buffer: &mut Buffer) -> Result<()>;

    /// 从 `buffer` 当前游标处解码并覆盖自身状态。
    fn restore(&mut self, buffer: &mut Buffer) -> Result<()>;
}

/// `PrimitiveType` 描述一种具名分布式原语的类型级工厂。
///
/// # 契约说明（What）
/// - `id` 返回稳定的类型标识符（如 `"document-tree"`），一经发布不变；
/// - `new_service` 为一次原语实例化构造全新的状态机服务。
pub trait PrimitiveType: Send + Sync {
    /// 稳定的类型标识符。
    fn id(&self) -> &'static str;

    /// 构造该类型的全新状态机服务。
    fn new_service(&self) -> Box<dyn PrimitiveService>;
}

impl std::fmt::Debug for dyn PrimitiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrimitiveType").field("id", &self.id()).finish()
    }
}

/// `PrimitiveTypeRegistry` 维护“标识符 → 原语类型”的映射。
///
/// # 设计动机（Why）
/// - 具名原语的创建与挂载都从标识符出发，注册表是这条路径的单一入口；
/// - 采用 `Arc<dyn PrimitiveType>` 存储，注册表可被克隆句柄共享到
///   各分区线程而无需复制工厂本体。
///
/// # 使用方式（How）
/// - 启动期依次 [`register`](Self::register) 各内建与扩展原语类型；
/// - 运行期通过 [`resolve`](Self::resolve) 或
///   [`new_service`](Self::new_service) 按标识符取用。
#[derive(Default)]
pub struct PrimitiveTypeRegistry {
    types: HashMap<&'static str, Arc<dyn PrimitiveType>>,
}

impl PrimitiveTypeRegistry {
    /// 创建空注册表。
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一种原语类型。
    ///
    /// # 错误
    /// - 标识符已存在时返回 [`RuntimeError::DuplicatePrimitiveType`]，
    ///   原注册保持不变。
    pub fn register(&mut self, primitive: Arc<dyn PrimitiveType>) -> Result<()> {
        let id = primitive.id();
        if self.types.contains_key(id) {
            return Err(RuntimeError::DuplicatePrimitiveType { id: id.to_owned() });
        }
        self.types.insert(id, primitive);
        tracing::debug!(primitive = id, "primitive type registered");
        Ok(())
    }

    /// 按标识符解析原语类型。
    ///
    /// # 错误
    /// - 未命中时返回 [`RuntimeError::UnknownPrimitiveType`]。
    pub fn resolve(&self, id: &str) -> Result<Arc<dyn PrimitiveType>> {
        self.types
            .get(id)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownPrimitiveType { id: id.to_owned() })
    }

    /// 按标识符直接构造一个全新的状态机服务。
    pub fn new_service(&self, id: &str) -> Result<Box<dyn PrimitiveService>> {
        Ok(self.resolve(id)?.new_service())
    }

    /// 返回已注册的类型数量。
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// 判断注册表是否为空。
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
