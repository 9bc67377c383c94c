use criterion::{black_box, criterion_group, criterion_main, Criterion};
use emitkit_events::{AsyncEventEmitter, DeliveryMode, EventEmitter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const LISTENERS: usize = 16;

fn bench_sync_emit(c: &mut Criterion) {
    let emitter = EventEmitter::<u64>::new();
    let total = Arc::new(AtomicU64::new(0));
    for _ in 0..LISTENERS {
        let total = total.clone();
        emitter.subscribe(move |value: &u64| {
            total.fetch_add(*value, Ordering::Relaxed);
        });
    }

    c.bench_function("sync_emit_16_listeners", |b| {
        b.iter(|| emitter.emit(black_box(1)))
    });
}

fn bench_async_emit(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime builds");

    for delivery in [DeliveryMode::Sequential, DeliveryMode::Concurrent] {
        let emitter = AsyncEventEmitter::<u64>::with_delivery(delivery);
        let total = Arc::new(AtomicU64::new(0));
        for _ in 0..LISTENERS {
            let total = total.clone();
            emitter.subscribe(move |value| {
                total.fetch_add(value, Ordering::Relaxed);
                async {}
            });
        }

        c.bench_function(&format!("async_emit_16_listeners_{delivery}"), |b| {
            b.to_async(&runtime).iter(|| emitter.emit(black_box(1)))
        });
    }
}

criterion_group!(benches, bench_sync_emit, bench_async_emit);
criterion_main!(benches);
