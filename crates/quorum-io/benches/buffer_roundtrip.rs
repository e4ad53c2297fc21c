use std::{env, time::Duration};

use criterion::{Criterion, black_box};
use quorum_io::Buffer;

/// 简单的基准测试：验证“写满 → flip → 读空”往返的游标开销。
///
/// # 设计背景（Why）
/// - 缓冲位于日志追加与帧编码热路径，导航与定型读写的固定开销需要
///   基准守护，防止边界校验的实现改动引入回归。
///
/// # 逻辑解析（How）
/// - 基准循环执行：向 1 KiB 堆缓冲写入 128 个 long，flip 后逐个读回；
/// - 复用同一块缓冲（clear 重置游标），隔离分配成本，只度量游标路径。
fn bench_buffer_roundtrip(c: &mut Criterion) {
    let mut buffer = Buffer::allocate(1024).expect("分配基准缓冲失败");
    c.bench_function("buffer_roundtrip", |b| {
        b.iter(|| {
            buffer.clear();
            for i in 0..128i64 {
                buffer.write_long(i).unwrap();
            }
            buffer.flip();
            let mut sum = 0i64;
            while buffer.has_remaining() {
                sum = sum.wrapping_add(buffer.read_long().unwrap());
            }
            black_box(sum)
        });
    });
}

fn main() {
    let mut quick_mode = false;
    for arg in env::args().skip(1) {
        if arg == "--quick" {
            quick_mode = true;
        }
    }

    let mut criterion = Criterion::default();
    if quick_mode {
        criterion = criterion
            .sample_size(10)
            .warm_up_time(Duration::from_millis(100))
            .measurement_time(Duration::from_millis(250));
    }

    bench_buffer_roundtrip(&mut criterion);
    criterion.final_summary();
}
