// ==============================================
// BUILD-THEN-COMBINE (integration)
// ==============================================
//
// One summary per partition on its own thread, then a tree reduction on
// the calling thread.

use std::collections::HashMap;
use std::thread;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand_distr::{Distribution, Zipf};
use topnkit::TopNCounter;

const PARTITIONS: usize = 8;
const PER_PARTITION: usize = 20_000;
const CAPACITY: usize = 256;

fn partition(seed: u64) -> Vec<u32> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let zipf = Zipf::new(20_000.0, 1.1).unwrap();
    (0..PER_PARTITION)
        .map(|_| zipf.sample(&mut rng) as u32)
        .collect()
}

fn tree_reduce(mut layer: Vec<TopNCounter<u32>>) -> TopNCounter<u32> {
    while layer.len() > 1 {
        let mut next = Vec::with_capacity(layer.len().div_ceil(2));
        let mut iter = layer.into_iter();
        while let Some(mut left) = iter.next() {
            if let Some(right) = iter.next() {
                left.merge(right);
            }
            next.push(left);
        }
        layer = next;
    }
    layer.pop().unwrap()
}

#[test]
fn threaded_partitions_reduce_to_valid_summary() {
    let streams: Vec<Vec<u32>> = (0..PARTITIONS as u64).map(partition).collect();

    let summaries: Vec<TopNCounter<u32>> = thread::scope(|scope| {
        let handles: Vec<_> = streams
            .iter()
            .map(|stream| {
                scope.spawn(move || {
                    let mut counter = TopNCounter::new(CAPACITY);
                    for &item in stream {
                        counter.offer(item);
                    }
                    counter
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let merged = tree_reduce(summaries);
    merged.check_invariants().unwrap();
    assert!(merged.len() <= CAPACITY);

    let mut exact: HashMap<u32, f64> = HashMap::new();
    for item in streams.iter().flatten() {
        *exact.entry(*item).or_insert(0.0) += 1.0;
    }
    for meta in merged.iter() {
        assert!(
            meta.count >= exact[meta.item],
            "{} reported {} below true {}",
            meta.item,
            meta.count,
            exact[meta.item]
        );
    }

    // The most frequent key dominates every partition.
    let top = merged.peek(1);
    assert_eq!(top, vec![&1u32]);
}

#[test]
fn merge_scenario_keeps_shared_item() {
    let mut left = TopNCounter::new(2);
    left.offer_weighted('X', 5.0);
    left.offer_weighted('Y', 3.0);
    let mut right = TopNCounter::new(2);
    right.offer_weighted('Y', 4.0);
    right.offer_weighted('Z', 2.0);

    left.merge(right);

    assert_eq!(left.len(), 2);
    assert_eq!(left.count(&'Y'), Some(7.0));
    let z = left.get(&'Z').unwrap();
    assert_eq!(z.error, 3.0);
}

#[test]
fn merge_then_retain_for_final_answer() {
    let mut total = TopNCounter::new(CAPACITY);
    for seed in 0..3u64 {
        let mut part = TopNCounter::new(CAPACITY);
        for item in partition(seed + 100) {
            part.offer(item);
        }
        total.merge(part);
    }
    total.retain(10);
    assert!(total.len() <= 10);
    assert!(!total.is_empty());
    total.check_invariants().unwrap();
}
