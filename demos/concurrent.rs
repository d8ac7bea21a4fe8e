use std::sync::Arc;
use std::thread;

use rescache::ConcurrentResourceCache;

fn main() {
    let cache = Arc::new(ConcurrentResourceCache::new(64));

    let writers: Vec<_> = (0..4)
        .map(|id| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..16 {
                    let body = format!("payload from thread {id}");
                    cache.put(format!("/t{id}/{i}"), "text/plain", body.as_bytes());
                }
            })
        })
        .collect();

    for writer in writers {
        writer.join().unwrap();
    }

    let metrics = cache.metrics();
    println!("entries: {}", cache.len());
    println!("inserts: {}", metrics.inserts);
}

// Expected output:
// entries: 64
// inserts: 64
