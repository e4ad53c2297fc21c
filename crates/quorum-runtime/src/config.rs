//! # config 模块说明
//!
//! ## 角色定位（Why）
//! - 分区组实现是运行期可选的（Raft 组、主备组……），配置文件里以
//!   `type` 标签声明具体实现；本模块提供按标签查找工厂并反序列化
//!   标签专属配置形状的多态分发机制；
//! - 缓冲核心不参与这条分发链：它只会在更上层看到装配完成的配置值
//!   被字节化之后的形态。
//!
//! ## 设计概要（How）
//! - [`PartitionGroupFactory`] 将“标签 → 配置形状”的知识下放给各实现；
//! - [`PartitionGroupRegistry`] 只做查表与错误归一，装配逻辑零膨胀；
//! - 反序列化经 `serde_json::Value` 中转，与配置文件的载体格式解耦。

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::de::Error as _;
use serde_json::Value;

use crate::error::{Result, RuntimeError};

/// 配置值中声明具体实现的标签字段名。
const TYPE_TAG: &str = "type";

/// `PartitionGroupConfig` 是装配完成的分区组配置的最小公共面。
///
/// # 契约说明（What）
/// - `name` 返回组名，在一个集群配置内唯一；
/// - `partitions` 返回该组的分区数量，必须大于零；
/// - 具体实现可携带任意多的专属字段，公共面刻意保持窄。
pub trait PartitionGroupConfig: fmt::Debug + Send {
    /// 分区组名称。
    fn name(&self) -> &str;

    /// 分区数量。
    fn partitions(&self) -> u32;
}

/// `PartitionGroupFactory` 把一个 `type` 标签绑定到其配置形状。
///
/// # 设计背景（Why）
/// - 原型系统通过“按标签查工厂、再由工厂给出配置类”完成多态反序列化，
///   本契约是该机制的 Rust 表达：标签与形状的知识归属各实现，
///   注册表只负责路由。
pub trait PartitionGroupFactory: Send + Sync {
    /// 本工厂响应的 `type` 标签。
    fn type_tag(&self) -> &'static str;

    /// 将标签专属的配置形状从通用值装配为具体配置。
    fn deserialize(&self, value: Value) -> Result<Box<dyn PartitionGroupConfig>>;
}

/// `PartitionGroupRegistry` 维护“`type` 标签 → 工厂”的映射并执行分发。
#[derive(Default)]
pub struct PartitionGroupRegistry {
    factories: HashMap<&'static str, Arc<dyn PartitionGroupFactory>>,
}

impl PartitionGroupRegistry {
    /// 创建空注册表。
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一个分区组工厂；同名标签后注册者覆盖先注册者。
    ///
    /// 与原语注册表不同，这里允许覆盖：部署方常用自定义工厂替换
    /// 内建实现，覆盖行为会留下日志以便审计。
    pub fn register(&mut self, factory: Arc<dyn PartitionGroupFactory>) {
        let tag = factory.type_tag();
        if self.factories.insert(tag, factory).is_some() {
            tracing::debug!(tag, "partition group factory replaced");
        } else {
            tracing::debug!(tag, "partition group factory registered");
        }
    }

    /// 依据配置值内的 `type` 标签装配具体配置。
    ///
    /// # 错误
    /// - 缺少 `type` 标签：[`RuntimeError::MissingTypeTag`]；
    /// - 标签未注册：[`RuntimeError::UnknownPartitionGroupType`]；
    /// - 形状不符：[`RuntimeError::MalformedConfig`]，携带底层 serde 错误。
    pub fn resolve(&self, value: &Value) -> Result<Box<dyn PartitionGroupConfig>> {
        let tag = value
            .get(TYPE_TAG)
            .and_then(Value::as_str)
            .ok_or(RuntimeError::MissingTypeTag)?;
        let factory = self
            .factories
            .get(tag)
            .ok_or_else(|| RuntimeError::UnknownPartitionGroupType {
                tag: tag.to_owned(),
            })?;
        factory.deserialize(value.clone())
    }
}

/// Raft 分区组的配置形状，作为内建参考实现。
///
/// # 契约说明（What）
/// - `name`/`partitions` 为必填；`partitions` 为零视为形状非法；
/// - `data_dir` 可选，缺省时由部署层决定落盘位置。
#[derive(Debug, Deserialize)]
pub struct RaftPartitionGroupConfig {
    name: String,
    partitions: u32,
    #[serde(default)]
    data_dir: Option<String>,
}

impl RaftPartitionGroupConfig {
    /// 返回可选的数据目录。
    pub fn data_dir(&self) -> Option<&str> {
        self.data_dir.as_deref()
    }
}

impl PartitionGroupConfig for RaftPartitionGroupConfig {
    fn name(&self) -> &str {
        &self.name
    }

    fn partitions(&self) -> u32 {
        self.partitions
    }
}

/// Raft 分区组工厂，响应 `"raft"` 标签。
pub struct RaftPartitionGroupFactory;

impl PartitionGroupFactory for RaftPartitionGroupFactory {
    fn type_tag(&self) -> &'static str {
        "raft"
    }

    fn deserialize(&self, value: Value) -> Result<Box<dyn PartitionGroupConfig>> {
        let config: RaftPartitionGroupConfig =
            serde_json::from_value(value).map_err(|source| RuntimeError::MalformedConfig {
                tag: self.type_tag().to_owned(),
                source,
            })?;
        if config.partitions == 0 {
            return Err(RuntimeError::MalformedConfig {
                tag: self.type_tag().to_owned(),
                source: serde_json::Error::custom("`partitions` must be greater than zero"),
            });
        }
        Ok(Box::new(config))
    }
}
