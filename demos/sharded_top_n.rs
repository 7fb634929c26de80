use std::thread;

use topnkit::prelude::*;

const LOG: &str = "\
GET /index.html GET /about.html GET /index.html POST /login GET /index.html
GET /pricing.html GET /index.html GET /about.html POST /login GET /docs.html
GET /index.html GET /blog.html GET /about.html GET /index.html GET /faq.html";

fn main() {
    let lines: Vec<&str> = LOG.lines().collect();

    // One summary per shard, built on its own thread.
    let shards: Vec<TopNCounter<&str>> = thread::scope(|scope| {
        let handles: Vec<_> = lines
            .iter()
            .map(|line| {
                scope.spawn(move || {
                    let mut counter = TopNBuilder::for_top_n(2).extra_space_rate(2).build();
                    for path in line.split_whitespace().filter(|w| w.starts_with('/')) {
                        counter.offer(path);
                    }
                    counter
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let mut total = TopNCounter::new(8);
    for shard in shards {
        total.merge(shard);
    }

    for meta in total.top_k(2) {
        println!(
            "{:<14} ~{} (at least {})",
            meta.item,
            meta.count,
            meta.guaranteed_count()
        );
    }
    println!("{}", total);
}

// Expected output (first two lines):
// /index.html    ~6 (at least 6)
// /about.html    ~3 (at least 3)
//
// Explanation: each shard holds 4 counters. Shards that fill up contribute
// their minimum count as error for paths they did not track, so `/login` and
// `/docs.html` end with a non-zero error while the two hottest paths stay exact.
