//! # error 模块说明
//!
//! ## 角色定位（Why）
//! - 收敛注册表与配置装配层的失败语义，使“重复注册”“未知类型标签”
//!   这类装配期错误与字节层的 [`IoError`] 明确分域；
//! - 快照/恢复路径上的字节层失败以 `source` 链完整上浮，排障时可以
//!   沿错误链回溯到具体的越界或后端故障。

use quorum_io::IoError;
use thiserror::Error;

/// 稳定错误码表，约定与 `quorum-io` 一致：`<域>.<语义>`。
pub mod codes {
    /// 原语类型标识符重复注册。
    pub const PRIMITIVE_DUPLICATE: &str = "runtime.primitive.duplicate";
    /// 按标识符查找原语类型未命中。
    pub const PRIMITIVE_UNKNOWN: &str = "runtime.primitive.unknown";
    /// 快照编码或恢复解码阶段的字节层失败。
    pub const PRIMITIVE_SNAPSHOT: &str = "runtime.primitive.snapshot";
    /// 配置值缺少 `type` 标签。
    pub const CONFIG_MISSING_TYPE: &str = "runtime.config.missing_type";
    /// `type` 标签未注册任何分区组工厂。
    pub const CONFIG_UNKNOWN_GROUP: &str = "runtime.config.unknown_group";
    /// 标签命中但配置形状不符合该类型的约定。
    pub const CONFIG_MALFORMED: &str = "runtime.config.malformed";
}

/// `RuntimeError` 是注册表与配置装配层的统一错误域。
///
/// # 契约说明（What）
/// - 所有变体 `Send + Sync + 'static`，可跨线程传播；
/// - [`code`](Self::code) 返回稳定错误码，供日志与测试断言使用；
/// - 字节层失败（[`Snapshot`](Self::Snapshot)）与配置解析失败
///   （[`MalformedConfig`](Self::MalformedConfig)）均保留底层 `source`。
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// 同一原语类型标识符被注册了两次。
    #[error("primitive type `{id}` is already registered")]
    DuplicatePrimitiveType {
        /// 冲突的类型标识符。
        id: String,
    },

    /// 按标识符查找原语类型未命中。
    #[error("primitive type `{id}` is not registered")]
    UnknownPrimitiveType {
        /// 未命中的类型标识符。
        id: String,
    },

    /// 快照编码或恢复解码时的字节层失败。
    #[error("snapshot encoding failure: {source}")]
    Snapshot {
        /// 上浮的缓冲核心错误。
        #[from]
        source: IoError,
    },

    /// 配置值缺少多态分发所需的 `type` 标签。
    #[error("partition group configuration is missing its `type` tag")]
    MissingTypeTag,

    /// `type` 标签没有对应的分区组工厂。
    #[error("no partition group factory registered for type `{tag}`")]
    UnknownPartitionGroupType {
        /// 未注册的类型标签。
        tag: String,
    },

    /// 标签命中，但配置形状不符合该类型的约定。
    #[error("malformed `{tag}` partition group configuration: {source}")]
    MalformedConfig {
        /// 命中的类型标签。
        tag: String,
        /// 底层反序列化错误。
        #[source]
        source: serde_json::Error,
    },
}

impl RuntimeError {
    /// 返回稳定错误码，见 [`codes`]。
    pub fn code(&self) -> &'static str {
        match self {
            RuntimeError::DuplicatePrimitiveType { .. } => codes::PRIMITIVE_DUPLICATE,
            RuntimeError::UnknownPrimitiveType { .. } => codes::PRIMITIVE_UNKNOWN,
            RuntimeError::Snapshot { .. } => codes::PRIMITIVE_SNAPSHOT,
            RuntimeError::MissingTypeTag => codes::CONFIG_MISSING_TYPE,
            RuntimeError::UnknownPartitionGroupType { .. } => codes::CONFIG_UNKNOWN_GROUP,
            RuntimeError::MalformedConfig { .. } => codes::CONFIG_MALFORMED,
        }
    }
}

/// 本 crate 统一的返回值别名，默认错误类型为 [`RuntimeError`]。
pub type Result<T, E = RuntimeError> = core::result::Result<T, E>;
