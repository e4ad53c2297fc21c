//! `config_contract` 集成测试：分区组配置的多态标签分发。
//!
//! # 测试总览（Why）
//! - 校验 `type` 标签路由：命中工厂、未知标签、缺失标签三条路径；
//! - 校验标签专属形状的反序列化错误携带底层 serde 原因；
//! - 验证覆盖注册语义（部署方以自定义工厂替换内建实现）。

use std::sync::Arc;

use quorum_runtime::{
    PartitionGroupConfig, PartitionGroupFactory, PartitionGroupRegistry,
    RaftPartitionGroupFactory, Result, RuntimeError, codes,
};
use serde_json::json;

fn registry_with_raft() -> PartitionGroupRegistry {
    let mut registry = PartitionGroupRegistry::new();
    registry.register(Arc::new(RaftPartitionGroupFactory));
    registry
}

/// 命中 `raft` 标签时装配出完整的配置对象。
#[test]
fn raft_tag_resolves_to_concrete_config() {
    let registry = registry_with_raft();
    let value = json!({
        "type": "raft",
        "name": "consensus",
        "partitions": 7,
        "data_dir": "/var/lib/quorum"
    });
    let config = registry.resolve(&value).expect("装配应成功");
    assert_eq!(config.name(), "consensus");
    assert_eq!(config.partitions(), 7);
}

/// 缺失与未知的 `type` 标签分别返回各自的稳定错误码。
#[test]
fn missing_and_unknown_tags_are_rejected() {
    let registry = registry_with_raft();
    let err = registry
        .resolve(&json!({ "name": "x", "partitions": 1 }))
        .expect_err("缺失标签应失败");
    assert_eq!(err.code(), codes::CONFIG_MISSING_TYPE);

    let err = registry
        .resolve(&json!({ "type": "primary-backup", "name": "x", "partitions": 1 }))
        .expect_err("未注册标签应失败");
    assert_eq!(err.code(), codes::CONFIG_UNKNOWN_GROUP);
    assert!(matches!(
        err,
        RuntimeError::UnknownPartitionGroupType { tag } if tag == "primary-backup"
    ));
}

/// 形状不符时报 Malformed，底层 serde 错误保留在错误链上。
#[test]
fn malformed_shapes_keep_the_serde_source() {
    let registry = registry_with_raft();
    let err = registry
        .resolve(&json!({ "type": "raft", "partitions": "seven" }))
        .expect_err("形状不符应失败");
    assert_eq!(err.code(), codes::CONFIG_MALFORMED);
    assert!(
        std::error::Error::source(&err).is_some(),
        "serde 原因应保留在错误链上"
    );

    let err = registry
        .resolve(&json!({ "type": "raft", "name": "zero", "partitions": 0 }))
        .expect_err("零分区应视为形状非法");
    assert_eq!(err.code(), codes::CONFIG_MALFORMED);
}

/// 覆盖注册：同名标签后注册者生效。
#[test]
fn re_registering_a_tag_replaces_the_factory() {
    struct FixedConfig;

    impl std::fmt::Debug for FixedConfig {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("FixedConfig")
        }
    }

    impl PartitionGroupConfig for FixedConfig {
        fn name(&self) -> &str {
            "fixed"
        }

        fn partitions(&self) -> u32 {
            1
        }
    }

    struct FixedFactory;

    impl PartitionGroupFactory for FixedFactory {
        fn type_tag(&self) -> &'static str {
            "raft"
        }

        fn deserialize(&self, _value: serde_json::Value) -> Result<Box<dyn PartitionGroupConfig>> {
            Ok(Box::new(FixedConfig))
        }
    }

    let mut registry = registry_with_raft();
    registry.register(Arc::new(FixedFactory));
    let config = registry
        .resolve(&json!({ "type": "raft" }))
        .expect("覆盖后的工厂应生效");
    assert_eq!(config.name(), "fixed");
}
