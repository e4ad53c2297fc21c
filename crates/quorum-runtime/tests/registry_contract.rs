//! `registry_contract` 集成测试：原语类型注册表与字节级快照往返。
//!
//! # 测试总览（Why）
//! - 校验注册、查找、重复注册与未知标识符的错误路径；
//! - 以一个最小的复制计数器原语验证 `snapshot → restore` 经
//!   `Buffer` 构成恒等往返，确认注册表与字节核心的协作边界。

use std::sync::Arc;

use quorum_io::Buffer;
use quorum_runtime::{
    PrimitiveService, PrimitiveType, PrimitiveTypeRegistry, Result, codes,
};

/// 最小的复制计数器原语：状态即一个 i64，线格式为单个 long。
struct CounterService {
    value: i64,
}

impl PrimitiveService for CounterService {
    fn snapshot(&self, buffer: &mut Buffer) -> Result<()> {
        buffer.write_long(self.value)?;
        Ok(())
    }

    fn restore(&mut self, buffer: &mut Buffer) -> Result<()> {
        self.value = buffer.read_long()?;
        Ok(())
    }
}

struct CounterType;

impl PrimitiveType for CounterType {
    fn id(&self) -> &'static str {
        "counter"
    }

    fn new_service(&self) -> Box<dyn PrimitiveService> {
        Box::new(CounterService { value: 0 })
    }
}

/// 注册后可按标识符解析并构造服务。
#[test]
fn register_then_resolve_and_build_service() {
    let mut registry = PrimitiveTypeRegistry::new();
    assert!(registry.is_empty());
    registry
        .register(Arc::new(CounterType))
        .expect("首次注册应成功");
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.resolve("counter").expect("解析应成功").id(), "counter");
    registry.new_service("counter").expect("建服务应成功");
}

/// 重复注册与未知标识符分别返回各自的稳定错误码。
#[test]
fn duplicate_and_unknown_ids_are_rejected_with_stable_codes() {
    let mut registry = PrimitiveTypeRegistry::new();
    registry
        .register(Arc::new(CounterType))
        .expect("首次注册应成功");
    let err = registry
        .register(Arc::new(CounterType))
        .expect_err("重复注册应失败");
    assert_eq!(err.code(), codes::PRIMITIVE_DUPLICATE);
    let err = registry.resolve("document-tree").expect_err("未注册应失败");
    assert_eq!(err.code(), codes::PRIMITIVE_UNKNOWN);
}

/// 快照经缓冲往返后恢复出等价状态。
#[test]
fn snapshot_restore_round_trips_through_a_buffer() {
    let registry = {
        let mut registry = PrimitiveTypeRegistry::new();
        registry
            .register(Arc::new(CounterType))
            .expect("注册应成功");
        registry
    };

    let source = CounterService { value: -99 };
    let mut buffer = Buffer::allocate(16).expect("分配应成功");
    source.snapshot(&mut buffer).expect("快照编码应成功");
    buffer.flip();

    let mut restored = registry.new_service("counter").expect("建服务应成功");
    restored.restore(&mut buffer).expect("恢复解码应成功");

    let mut check = Buffer::allocate(16).expect("分配应成功");
    restored.snapshot(&mut check).expect("再快照应成功");
    check.flip();
    assert_eq!(
        check.read_long().expect("读取应成功"),
        -99,
        "快照 → 恢复应构成恒等往返"
    );
}

/// 快照遇到容量不足时，字节层错误沿 source 链上浮。
#[test]
fn snapshot_surfaces_io_errors_with_source_chain() {
    let source = CounterService { value: 1 };
    let mut tiny = Buffer::allocate(4).expect("分配应成功");
    let err = source.snapshot(&mut tiny).expect_err("容量不足应失败");
    assert_eq!(err.code(), codes::PRIMITIVE_SNAPSHOT);
    assert!(
        std::error::Error::source(&err).is_some(),
        "底层 IoError 应保留在错误链上"
    );
}
