//! Criterion benchmarks for datagram hand-off throughput.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dgram_tokio::{CloseReason, Datagram, DatagramConfig, DatagramQueue, WakeFn};
use std::sync::Arc;

fn noop_wake() -> WakeFn {
    Arc::new(|| {})
}

/// Drive `count` datagrams through send/dequeue on one runtime: the
/// dequeuer side yields whenever the queue is momentarily empty.
async fn pump_outbound(queue: Arc<DatagramQueue>, count: usize, payload_len: usize) {
    let sender = {
        let queue = queue.clone();
        async move {
            let payload = bytes::Bytes::from(vec![0xABu8; payload_len]);
            for _ in 0..count {
                queue.send(Datagram::new(payload.clone())).await.unwrap();
            }
        }
    };
    let drainer = {
        let queue = queue.clone();
        async move {
            let mut drained = 0;
            while drained < count {
                match queue.dequeue() {
                    Some(_) => drained += 1,
                    None => tokio::task::yield_now().await,
                }
            }
        }
    };
    tokio::join!(sender, drainer);
}

fn outbound_handoff(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let mut group = c.benchmark_group("outbound_handoff");

    for &count in &[100, 1000] {
        let payload_len = 64;
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(
            BenchmarkId::new("64B_datagrams", count),
            &count,
            |b, &count| {
                b.iter(|| {
                    let queue =
                        Arc::new(DatagramQueue::new(DatagramConfig::default(), noop_wake()).unwrap());
                    rt.block_on(pump_outbound(queue.clone(), count, payload_len));
                    assert_eq!(queue.stats().datagrams_sent, count as u64);
                });
            },
        );
    }

    group.finish();
}

fn inbound_path(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let mut group = c.benchmark_group("inbound_path");
    let count = 1000;
    let payload = vec![0xCDu8; 256];
    group.throughput(Throughput::Bytes((count * payload.len()) as u64));

    group.bench_function("deliver_recv_256B", |b| {
        b.iter(|| {
            let config = DatagramConfig::new().recv_queue_len(count);
            let queue = DatagramQueue::new(config, noop_wake()).unwrap();
            for _ in 0..count {
                queue.deliver(&payload);
            }
            rt.block_on(async {
                for _ in 0..count {
                    queue.recv().await.unwrap();
                }
            });
            let stats = queue.stats();
            assert_eq!(stats.datagrams_received, count as u64);
            assert_eq!(stats.datagrams_dropped, 0);
            queue.close(CloseReason::local(0, "bench done"));
        });
    });

    group.finish();
}

criterion_group!(benches, outbound_handoff, inbound_path);
criterion_main!(benches);
