//! `quorum-runtime` 承载分布式协调运行时的薄装配层。
//!
//! # 模块定位（Why）
//! - 字节核心（`quorum-io`）之上、共识与传输之下，存在两类纯粹的
//!   注册/布线工作：具名分布式原语的类型注册表，以及按 `type` 标签
//!   多态分发的分区组配置装配——本 crate 即这两块薄层的落点；
//! - 两条路径与缓冲核心的边界都只有字节：原语状态机把快照编码进
//!   [`Buffer`](quorum_io::Buffer)，配置值在装配完成后才进入字节化流程。
//!
//! # 设计概要（How）
//! - [`primitive`] 模块：`PrimitiveType` 类型工厂 + 标识符注册表，
//!   服务契约仅含 `snapshot`/`restore` 两个字节级操作；
//! - [`config`] 模块：`PartitionGroupFactory` 按标签注册，
//!   反序列化经 `serde_json::Value` 中转，与配置载体格式解耦；
//! - [`error`] 模块以稳定错误码收敛装配期失败，字节层错误经
//!   `source` 链上浮。

pub mod config;
pub mod error;
pub mod primitive;

pub use config::{
    PartitionGroupConfig, PartitionGroupFactory, PartitionGroupRegistry, RaftPartitionGroupConfig,
    RaftPartitionGroupFactory,
};
pub use error::{Result, RuntimeError, codes};
pub use primitive::{PrimitiveService, PrimitiveType, PrimitiveTypeRegistry};
