#![no_main]

use std::collections::HashMap;

use libfuzzer_sys::fuzz_target;
use topnkit::TopNCounter;

// Fuzz merges of two independently fed summaries
//
// The first byte splits the input into two streams; both are fed with unit
// offers, merged, and the result checked against the exact combined counts.
fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let capacity = usize::from(data[0] % 12) + 1;
    let split = 2 + usize::from(data[1]) % (data.len() - 1);
    let split = split.min(data.len());
    let (left_stream, right_stream) = data[2..].split_at(split - 2);

    let mut exact: HashMap<u8, f64> = HashMap::new();
    let mut left = TopNCounter::new(capacity);
    for &item in left_stream {
        left.offer(item % 32);
        *exact.entry(item % 32).or_insert(0.0) += 1.0;
    }
    let mut right = TopNCounter::new(capacity);
    for &item in right_stream {
        right.offer(item % 32);
        *exact.entry(item % 32).or_insert(0.0) += 1.0;
    }

    left.merge(right);
    left.check_invariants().unwrap();
    assert!(left.len() <= capacity);
    for meta in left.iter() {
        assert!(meta.count >= exact[meta.item]);
    }

    left.retain(usize::from(data[1] % 4) + 1);
    left.check_invariants().unwrap();
});
