use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;
use threadwood::{Threadwood, ThreadwoodSet};

fn bench_baseline_multi_insertions(data: Vec<usize>) {
    let mut tree = BTreeSet::new();

    for i in data {
        tree.insert(i);
    }
}

fn bench_multi_insertions(data: Vec<usize>) {
    let mut tree = ThreadwoodSet::new();

    for i in data {
        tree.insert(i);
    }
}

fn bench_multi_insertions_hint(data: Vec<usize>) {
    let mut tree = ThreadwoodSet::with_capacity(data.len());

    for i in data {
        tree.insert(i);
    }
}

fn init_large_btree() -> BTreeSet<usize> {
    random_insertion_order().into_iter().collect()
}

fn init_large_threadwood_set() -> ThreadwoodSet<usize> {
    random_insertion_order().into_iter().collect()
}

fn random_insertion_order() -> Vec<usize> {
    let mut rng = rand::thread_rng();
    let mut indices: Vec<usize> = (0..100000).collect();

    indices.shuffle(&mut rng);

    indices
}

fn init_random_data(count: usize, range_opt: Option<Range<usize>>) -> Vec<usize> {
    let mut rng = rand::thread_rng();
    let range = range_opt.unwrap_or(0..100000);
    let range = rand::distributions::Uniform::new(range.start, range.end);

    (0..count).map(|_| rng.sample(&range)).collect()
}

fn bench_baseline_random_deletions(mut tree: BTreeSet<usize>, indices: Vec<usize>) {
    for idx in indices {
        tree.remove(&idx);
    }
}

fn bench_random_deletions(mut tree: ThreadwoodSet<usize>, indices: Vec<usize>) {
    for idx in indices {
        tree.remove(&idx);
    }
}

fn bench_baseline_random_lookups(tree: BTreeSet<usize>, indices: Vec<usize>) {
    for idx in indices {
        assert!(tree.contains(&idx));
    }
}

fn bench_random_lookups(tree: ThreadwoodSet<usize>, indices: Vec<usize>) {
    for idx in indices {
        assert!(tree.contains(&idx));
    }
}

fn inorder_iteration_btree(tree: BTreeSet<usize>) {
    for (i, &elem) in tree.iter().enumerate() {
        assert_eq!(i, elem);
    }
}

fn inorder_iteration(tree: ThreadwoodSet<usize>) {
    for (i, &elem) in tree.iter().enumerate() {
        assert_eq!(i, elem);
    }
}

fn reverse_iteration(tree: ThreadwoodSet<usize>) {
    for (i, &elem) in tree.iter().rev().enumerate() {
        assert_eq!(tree.len() - 1 - i, elem);
    }
}

mod fill_drain {
    use super::*;

    /// Inserts `0..count` then deletes it in the same order, leaving the map empty.
    pub fn bench_fill_drain(count: usize) {
        let mut tree = Threadwood::new();

        for key in 0..count {
            tree.insert(key, key);
        }
        for key in 0..count {
            tree.delete(&key);
        }

        assert!(tree.is_empty());
    }

    pub fn bench_baseline_fill_drain(count: usize) {
        let mut tree = BTreeMap::new();

        for key in 0..count {
            tree.insert(key, key);
        }
        for key in 0..count {
            tree.remove(&key);
        }

        assert!(tree.is_empty());
    }
}

mod insert_delete {
    use super::*;

    pub fn bench_insert_delete(
        mut tree: ThreadwoodSet<usize>,
        insertions: &[usize],
        deletions: &[usize],
    ) {
        for idx in deletions {
            tree.remove(idx);
        }
        for &idx in insertions {
            tree.insert(idx);
        }
    }

    pub fn bench_baseline_insert_delete(
        mut tree: BTreeSet<usize>,
        insertions: &[usize],
        deletions: &[usize],
    ) {
        for idx in deletions {
            tree.remove(idx);
        }
        for &idx in insertions {
            tree.insert(idx);
        }
    }
}

fn threadwood_benchmark(c: &mut Criterion) {
    c.bench_function("baseline tree insert delete", |b| {
        b.iter_batched(
            || {
                (
                    init_large_btree(),
                    init_random_data(2000, Some(100000..300000)),
                    init_random_data(2000, Some(0..100000)),
                )
            },
            |(tree, holes, to_insert)| {
                insert_delete::bench_baseline_insert_delete(tree, &holes, &to_insert)
            },
            BatchSize::LargeInput,
        )
    });

    c.bench_function("tree insert delete", |b| {
        b.iter_batched(
            || {
                (
                    init_large_threadwood_set(),
                    init_random_data(2000, Some(100000..300000)),
                    init_random_data(2000, Some(0..100000)),
                )
            },
            |(tree, holes, to_insert)| insert_delete::bench_insert_delete(tree, &holes, &to_insert),
            BatchSize::LargeInput,
        )
    });

    c.bench_function("baseline tree 100K insertions", |b| {
        b.iter_batched(
            random_insertion_order,
            bench_baseline_multi_insertions,
            BatchSize::LargeInput,
        )
    });

    c.bench_function("tree 100K insertions", |b| {
        b.iter_batched(
            random_insertion_order,
            bench_multi_insertions,
            BatchSize::LargeInput,
        )
    });

    c.bench_function("tree 100K insertions with size hint", |b| {
        b.iter_batched(
            random_insertion_order,
            bench_multi_insertions_hint,
            BatchSize::LargeInput,
        )
    });

    c.bench_function("baseline tree 100K ascending fill and drain", |b| {
        b.iter(|| fill_drain::bench_baseline_fill_drain(100000))
    });

    c.bench_function("tree 100K ascending fill and drain", |b| {
        b.iter(|| fill_drain::bench_fill_drain(100000))
    });

    c.bench_function("baseline tree random lookups", |b| {
        b.iter_batched(
            || (init_large_btree(), init_random_data(5000, None)),
            |(tree, indices)| bench_baseline_random_lookups(tree, indices),
            BatchSize::LargeInput,
        )
    });

    c.bench_function("tree random lookups", |b| {
        b.iter_batched(
            || (init_large_threadwood_set(), init_random_data(5000, None)),
            |(tree, indices)| bench_random_lookups(tree, indices),
            BatchSize::LargeInput,
        )
    });

    c.bench_function("baseline tree random deletions", |b| {
        b.iter_batched(
            || (init_large_btree(), init_random_data(5000, None)),
            |(tree, indices)| bench_baseline_random_deletions(tree, indices),
            BatchSize::LargeInput,
        )
    });

    c.bench_function("tree random deletions", |b| {
        b.iter_batched(
            || (init_large_threadwood_set(), init_random_data(5000, None)),
            |(tree, indices)| bench_random_deletions(tree, indices),
            BatchSize::LargeInput,
        )
    });

    c.bench_function("tree inorder iteration", |b| {
        b.iter_batched(
            init_large_threadwood_set,
            inorder_iteration,
            BatchSize::LargeInput,
        )
    });

    c.bench_function("tree reverse iteration", |b| {
        b.iter_batched(
            init_large_threadwood_set,
            reverse_iteration,
            BatchSize::LargeInput,
        )
    });

    c.bench_function("baseline tree inorder iteration", |b| {
        b.iter_batched(
            init_large_btree,
            inorder_iteration_btree,
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, threadwood_benchmark);
criterion_main!(benches);
