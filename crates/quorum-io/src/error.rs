//! # error 模块说明
//!
//! ## 角色定位（Why）
//! - 为缓冲与底层存储的所有失败路径提供集中定义，确保日志编码、快照读写等
//!   上层子系统可以按稳定错误码执行精确的自动化处置；
//! - 区分“游标越界”“绝对偏移越界”“导航参数非法”等类别，避免调用方解析
//!   错误消息字符串来推断语义。
//!
//! ## 设计要求（What）
//! - 所有错误类型实现 `thiserror::Error`，兼容 `std::error::Error` 与 `?` 传播；
//! - 每个变体对应一个 `<域>.<语义>` 形式的稳定错误码（见 [`codes`] 模块），
//!   错误码一经发布不再变更；
//! - 错误是本地、同步、立即上报的：核心不做内部重试，也不存在部分读写语义。
//!
//! ## 扩展建议（How）
//! - 新增后端若引入专属失败模式（如 RDMA 注册失败），应追加变体而非复用
//!   [`IoError::Backend`]，以维持告警维度的可读性。

use thiserror::Error;

/// 稳定错误码表。
///
/// # 契约说明（What）
/// - 常量值遵循 `<域>.<语义>` 约定，供日志、指标与测试断言直接引用；
/// - 与 [`IoError::code`] 一一对应：任何新增变体必须在此登记。
pub mod codes {
    /// 相对读取请求超过 `remaining()`。
    pub const BUFFER_UNDERFLOW: &str = "io.buffer.underflow";
    /// 相对写入请求超过 `remaining()`。
    pub const BUFFER_OVERFLOW: &str = "io.buffer.overflow";
    /// 绝对偏移操作越过当前可见窗口（`limit`）或存储容量。
    pub const OUT_OF_BOUNDS: &str = "io.storage.out_of_bounds";
    /// 导航调用（`set_position`/`set_limit` 等）收到非法参数。
    pub const INVALID_ARGUMENT: &str = "io.buffer.invalid_argument";
    /// 在不满足前置状态时调用了导航操作（如未 `mark` 先 `reset`）。
    pub const INVALID_STATE: &str = "io.buffer.invalid_state";
    /// 存储后端（文件映射、刷盘）报告的系统级失败。
    pub const STORAGE_BACKEND: &str = "io.storage.backend";
}

/// `IoError` 是缓冲核心的统一错误域。
///
/// # 教案式说明
/// - **意图 (Why)**：缓冲位于每一次日志追加与网络编解码的热路径上，失败语义
///   必须足够细以支撑调用方决策（扩容重试、丢弃帧、熔断）；同时保持
///   `Send + Sync + 'static`，可安全跨线程传播。
/// - **契约 (What)**：
///   - 相对操作失败时游标不前移；写失败时存储内容不变——错误即表示“完全未发生”；
///   - 变体携带机读上下文（请求字节数、剩余字节数、越界偏移等），
///     `Display` 输出面向排障人员；
///   - [`code`](Self::code) 返回稳定错误码，供指标与断言使用。
/// - **权衡 (Trade-offs)**：变体直接携带 `u64` 字段而非 `String` 上下文，
///   热路径上构造错误不产生堆分配；仅 [`Backend`](Self::Backend) 包含装箱的
///   系统错误源。
#[derive(Debug, Error)]
pub enum IoError {
    /// 相对读取请求的字节数超过了剩余可读字节数。
    #[error("buffer underflow: requested {requested} bytes with only {remaining} remaining")]
    Underflow {
        /// 本次操作需要的字节数。
        requested: u64,
        /// 失败时刻的 `remaining()`。
        remaining: u64,
    },

    /// 相对写入请求的字节数超过了剩余可写字节数。
    #[error("buffer overflow: requested {requested} bytes with only {remaining} remaining")]
    Overflow {
        /// 本次操作需要的字节数。
        requested: u64,
        /// 失败时刻的 `remaining()`。
        remaining: u64,
    },

    /// 绝对偏移操作的访问区间 `[offset, offset + len)` 落在边界之外。
    ///
    /// 注意：缓冲层的边界是 `limit` 而非 `capacity`——可见窗口可能小于
    /// 底层存储容量；存储层的边界则是其自身容量。
    #[error("offset {offset} with span {len} exceeds bound {bound}")]
    OutOfBounds {
        /// 请求的起始偏移。
        offset: u64,
        /// 请求的字节跨度。
        len: u64,
        /// 校验所用的上界（缓冲层为 `limit`，存储层为 `capacity`）。
        bound: u64,
    },

    /// 导航调用收到超出允许区间的参数。
    #[error("invalid {what}: {value} exceeds maximum {max}")]
    InvalidArgument {
        /// 非法参数的名称，如 `"position"`、`"limit"`。
        what: &'static str,
        /// 调用方传入的值。
        value: u64,
        /// 允许的最大值。
        max: u64,
    },

    /// 操作的前置状态不满足，例如未设置 `mark` 就调用 `reset`。
    #[error("invalid state: {operation} requires {requirement}")]
    InvalidState {
        /// 被拒绝的操作名。
        operation: &'static str,
        /// 缺失的前置条件描述。
        requirement: &'static str,
    },

    /// 存储后端上浮的系统级失败（映射建立、刷盘等）。
    #[error("storage backend failure: {source}")]
    Backend {
        /// 底层操作系统错误。
        #[from]
        source: std::io::Error,
    },
}

impl IoError {
    /// 返回稳定错误码，见 [`codes`]。
    pub fn code(&self) -> &'static str {
        match self {
            IoError::Underflow { .. } => codes::BUFFER_UNDERFLOW,
            IoError::Overflow { .. } => codes::BUFFER_OVERFLOW,
            IoError::OutOfBounds { .. } => codes::OUT_OF_BOUNDS,
            IoError::InvalidArgument { .. } => codes::INVALID_ARGUMENT,
            IoError::InvalidState { .. } => codes::INVALID_STATE,
            IoError::Backend { .. } => codes::STORAGE_BACKEND,
        }
    }
}

/// `Result` 为本 crate 统一的返回值别名。
///
/// # 契约说明（What）
/// - 默认错误类型为 [`IoError`]；上层 crate 可在第二个泛型参数中覆盖；
/// - 与标准库 `Result` 行为完全一致，可直接与 `?` 协同。
pub type Result<T, E = IoError> = core::result::Result<T, E>;
