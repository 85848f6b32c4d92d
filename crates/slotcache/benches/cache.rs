use blockdev::{MemDevice, Whence};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use slotcache::{SlotCache, DEFAULT_CAPACITY};

const DEVICE_LEN: usize = 256 * 1024;

fn device() -> MemDevice {
    MemDevice::from_vec((0..DEVICE_LEN).map(|i| i as u8).collect())
}

fn bench_warm_hits(c: &mut Criterion) {
    let mut group = c.benchmark_group("warm_hits");
    group.sample_size(50);
    group.throughput(Throughput::Bytes(256));

    group.bench_function("read_256b_hit", |b| {
        let mut cache = SlotCache::new(device(), DEFAULT_CAPACITY).unwrap();
        let mut buf = vec![0u8; 256];

        // Warm the slot
        cache.read(&mut buf).unwrap();

        b.iter(|| {
            cache.seek(64, Whence::Absolute).unwrap();
            black_box(cache.read(&mut buf).unwrap());
        });
    });

    group.finish();
}

fn bench_forced_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("forced_miss");
    group.sample_size(50);
    group.throughput(Throughput::Bytes(256));

    group.bench_function("read_256b_miss", |b| {
        let mut cache = SlotCache::new(device(), DEFAULT_CAPACITY).unwrap();
        let mut buf = vec![0u8; 256];

        // Ping-pong between two ranges wider than one slot apart
        let mut counter = 0u64;
        b.iter(|| {
            let pos = if counter % 2 == 0 { 0 } else { 2 * DEFAULT_CAPACITY as i64 };
            cache.seek(pos, Whence::Absolute).unwrap();
            black_box(cache.read(&mut buf).unwrap());
            counter += 1;
        });
    });

    group.finish();
}

fn bench_oversize_bypass(c: &mut Criterion) {
    let mut group = c.benchmark_group("oversize_bypass");
    group.sample_size(50);
    group.throughput(Throughput::Bytes((DEFAULT_CAPACITY + 1) as u64));

    group.bench_function("read_oversize", |b| {
        let mut cache = SlotCache::new(device(), DEFAULT_CAPACITY).unwrap();
        let mut buf = vec![0u8; DEFAULT_CAPACITY + 1];

        b.iter(|| {
            cache.seek(0, Whence::Absolute).unwrap();
            black_box(cache.read(&mut buf).unwrap());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_warm_hits,
    bench_forced_miss,
    bench_oversize_bypass
);
criterion_main!(benches);
