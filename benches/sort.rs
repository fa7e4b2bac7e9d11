use criterion::{black_box, criterion_group, criterion_main, Criterion};
use toposort::prelude::*;

fn chain(n: u32) -> Vec<(u32, u32)> {
    (1..n).map(|i| (i, i - 1)).collect()
}

/// Every key below `n` has up to `fanout` dependents.
fn wide_tree(n: u32, fanout: u32) -> Vec<(u32, u32)> {
    (1..n).map(|i| (i, (i - 1) / fanout)).collect()
}

fn names(n: u32) -> Vec<(String, String)> {
    let name = |i: u32| {
        let mut i = i;
        let mut name = String::from("n");
        loop {
            name.push((b'a' + (i % 26) as u8) as char);
            i /= 26;
            if i == 0 {
                break name;
            }
        }
    };
    (1..n).map(|i| (name(i), name((i - 1) / 4))).collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let long_chain = chain(100_000);
    let tree = wide_tree(100_000, 16);
    let named = names(20_000);

    c.bench_function("sort_long_chain", |b| {
        b.iter(|| sort(black_box(long_chain.iter().copied())))
    });

    c.bench_function("sort_wide_tree", |b| {
        b.iter(|| sort(black_box(tree.iter().copied())))
    });

    c.bench_function("sort_wide_tree_subtree_delta", |b| {
        let options = SortOptions::new().root_detection(RootDetection::SubtreeDelta);
        b.iter(|| sort_with(black_box(tree.iter().copied()), &options))
    });

    c.bench_function("sort_names_tree", |b| {
        b.iter(|| sort_names(black_box(named.iter().map(|(c, p)| (c.as_str(), p.as_str())))))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
