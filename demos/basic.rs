use rescache::ResourceCache;

fn main() {
    let mut cache = ResourceCache::new(2);

    cache.put("/index.html", "text/html", b"<h1>hello</h1>");
    cache.put("/logo.png", "image/png", b"\x89PNG");

    if let Some(entry) = cache.get("/index.html") {
        println!("hit /index.html: {} bytes", entry.content_length());
    }

    cache.put("/styles.css", "text/css", b"body{}");

    println!("contains /logo.png? {}", cache.contains("/logo.png"));
}

// Expected output:
// hit /index.html: 14 bytes
// contains /logo.png? false
//
// Explanation: capacity=2; after get("/index.html") that entry is MRU and
// "/logo.png" is LRU. Inserting "/styles.css" evicts "/logo.png".
