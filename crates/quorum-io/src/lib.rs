//! `quorum-io` 提供分布式协调运行时的可导航二进制缓冲核心。
//!
//! # 模块定位（Why）
//! - 日志条目编码、快照状态读写与线上消息组帧共用同一个字节级游标契约，
//!   本 crate 即该契约及其参考实现：裸存储抽象 + 游标缓冲 + 定型读写族；
//! - 核心坐落在每一次日志追加与网络编解码的关键路径上，因此在保持
//!   存储无关的同时，必须提供“无越界、无别名破坏”的内存安全保证。
//!
//! # 设计概要（How）
//! - [`storage`] 模块定义 [`RawStorage`]：容量固定、按绝对偏移读写、
//!   无游标状态的线性字节空间，堆与映射文件两个后端落地该契约；
//! - [`buffer`] 模块在其上叠加 [`Buffer`]：`position`/`limit`/`mark`
//!   三指针游标、双模式（写 → flip → 读）导航、以及共享存储的零拷贝切片；
//! - [`error`] 模块以稳定错误码收敛全部失败路径，错误即“完全未发生”。
//!
//! # 命名约定（Consistency）
//! - 相对操作命名为 `read_*`/`write_*`，绝对操作加 `_at` 后缀；
//!   存储层原语命名为 `get_*`/`set_*`，与游标层方法形成清晰分界。

pub mod buffer;
pub mod error;
pub mod storage;

pub use buffer::Buffer;
pub use error::{IoError, Result, codes};
pub use storage::{HeapStorage, MappedStorage, RawStorage};
