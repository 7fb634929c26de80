#![no_main]

use libfuzzer_sys::fuzz_target;
use topnkit::TopNCounter;

// Fuzz arbitrary operation sequences on TopNCounter
//
// Tests random sequences of offer, offer_weighted, peek, retain, clear and
// export/import, checking structure and capacity after every step.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let capacity = usize::from(data[0] % 16) + 1;
    let mut counter: TopNCounter<u8> = TopNCounter::new(capacity);

    let mut idx = 1;
    while idx + 1 < data.len() {
        let op = data[idx] % 7;
        let value = data[idx + 1];

        match op {
            0 | 1 => {
                // offer
                let was_tracked = counter.contains(&value);
                let outcome = counter.offer(value);
                assert_eq!(outcome.is_new, !was_tracked);
                assert!(counter.contains(&value));
                if let Some(evicted) = outcome.evicted {
                    assert!(!counter.contains(&evicted));
                }
            }
            2 => {
                // offer_weighted
                let weight = f64::from(value % 8);
                let before = counter.count(&value).unwrap_or(0.0);
                counter.offer_weighted(value, weight);
                assert!(counter.count(&value).unwrap() >= before + weight);
            }
            3 => {
                // peek
                let k = usize::from(value % 20);
                let top = counter.top_k(k);
                assert_eq!(top.len(), k.min(counter.len()));
                for pair in top.windows(2) {
                    assert!(pair[0].count >= pair[1].count);
                }
            }
            4 => {
                // retain
                let new_capacity = usize::from(value % 16) + 1;
                counter.retain(new_capacity);
                assert!(counter.len() <= new_capacity);
            }
            5 => {
                // export / import
                let (counts, items) = counter.to_external();
                let len = counter.len();
                counter.from_external(counts.len(), &counts, items);
                assert_eq!(counter.len(), len);
            }
            6 => {
                // clear
                if value % 8 == 0 {
                    counter.clear();
                    assert!(counter.is_empty());
                }
            }
            _ => unreachable!(),
        }

        assert!(counter.len() <= counter.capacity());
        counter.check_invariants().unwrap();
        idx += 2;
    }
});
