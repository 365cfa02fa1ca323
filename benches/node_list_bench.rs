use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use mtf_table::node_list::{NodeList, Position};
use std::time::Duration;

fn filled(n: u64) -> NodeList<u64> {
    let mut list = NodeList::with_capacity(n as usize);
    for i in 0..n {
        list.push_front(i);
    }
    list
}

// Position of the last element, found by walking from the sentinel.
fn last_position(list: &NodeList<u64>) -> Position {
    let mut p = list.first();
    while let Some(next) = list.next(p) {
        if list.is_end(next) {
            break;
        }
        p = next;
    }
    p
}

fn bench_push_front_100k(c: &mut Criterion) {
    c.bench_function("node_list::push_front_100k", |b| {
        b.iter_batched(
            NodeList::<u64>::new,
            |mut list| {
                for i in 0..100_000u64 {
                    list.push_front(i);
                }
                black_box(list)
            },
            BatchSize::SmallInput,
        )
    });
}

// Includes the walk to the tail, as a lookup miss-then-hit would.
fn bench_splice_tail_10k(c: &mut Criterion) {
    c.bench_function("node_list::splice_tail_of_10k", |b| {
        let mut list = filled(10_000);
        b.iter(|| {
            let p = last_position(&list);
            black_box(list.splice_to_front(p));
        })
    });
}

fn bench_splice_second(c: &mut Criterion) {
    c.bench_function("node_list::splice_second", |b| {
        let mut list = filled(1_000);
        b.iter(|| {
            let p = list.next(Position::HEAD).unwrap();
            black_box(list.splice_to_front(p));
        })
    });
}

fn bench_drain_front_100k(c: &mut Criterion) {
    c.bench_function("node_list::drain_front_100k", |b| {
        b.iter_batched(
            || filled(100_000),
            |mut list| {
                while let Some(v) = list.remove(Position::HEAD) {
                    black_box(v);
                }
                black_box(list)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_push_front_100k, bench_splice_tail_10k, bench_splice_second, bench_drain_front_100k
}
criterion_main!(benches);
