use boundcache::cache::RecencyCache;

/// Resolution record kept per hostname.
#[derive(Debug, Clone, Copy)]
struct ResolveRecord {
    reachable: bool,
    updated_at: u64,
}

fn main() {
    const CAPACITY: usize = 100_000;

    let mut cache: RecencyCache<String, ResolveRecord> = RecencyCache::new(CAPACITY);

    for i in 0..CAPACITY as u64 {
        cache.insert(
            format!("host-{i}.example"),
            ResolveRecord {
                reachable: i % 2 == 1,
                updated_at: CAPACITY as u64 + 100 - i,
            },
        );
    }

    let mut hits = 0u64;
    let mut lookups = 0u64;
    for i in (4..CAPACITY as u64).step_by(3) {
        lookups += 1;
        if cache.get(&format!("host-{i}.example")).is_some() {
            hits += 1;
        }
    }

    println!("capacity:   {CAPACITY}");
    println!("entries:    {}", cache.len());
    println!("lookups:    {lookups} ({hits} hits)");
    println!("stats:      {:?}", cache.stats());

    // The least recently touched record is the next eviction target.
    if let Some((host, record)) = cache.pull() {
        println!(
            "pulled:     {host} (reachable={}, updated_at={})",
            record.reachable, record.updated_at
        );
    }
}
