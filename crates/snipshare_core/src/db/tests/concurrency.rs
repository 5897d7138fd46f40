use super::*;
use std::collections::HashSet;

#[test]
fn concurrent_publishes_receive_unique_ids() {
    const WORKERS: usize = 8;
    const PER_WORKER: usize = 16;

    let (registry, _clock, _temp) = setup_temp_registry();
    let registry = Arc::new(registry);
    let barrier = Arc::new(Barrier::new(WORKERS));

    let handles: Vec<_> = (0..WORKERS)
        .map(|worker| {
            let registry = registry.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                (0..PER_WORKER)
                    .map(|n| {
                        registry
                            .publish(&format!("worker {} item {}", worker, n), None, None)
                            .expect("publish")
                            .share_id
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        for id in handle.join().expect("worker panicked") {
            assert!(ids.insert(id.clone()), "duplicate share id {}", id);
        }
    }
    assert_eq!(ids.len(), WORKERS * PER_WORKER);
    assert_eq!(registry.stored_count().unwrap(), (WORKERS * PER_WORKER) as u64);
}

#[test]
fn concurrent_colliding_publishes_never_overwrite() {
    const WORKERS: usize = 4;

    let (registry, _clock, _temp) = setup_temp_registry();
    let registry = Arc::new(registry.with_id_generator(Arc::new(ScriptedShareIds::new(&[
        "SAMEIDXX", "SAMEIDXX", "SAMEIDXX", "SAMEIDXX", "OTHERID1", "OTHERID2", "OTHERID3",
    ]))));
    let barrier = Arc::new(Barrier::new(WORKERS));

    let handles: Vec<_> = (0..WORKERS)
        .map(|worker| {
            let registry = registry.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                registry.publish(&format!("body {}", worker), None, None)
            })
        })
        .collect();

    let mut stored = HashSet::new();
    for handle in handles {
        // Once the script runs dry every draw repeats the last id, so a late
        // worker may legitimately exhaust its attempts.
        if let Ok(receipt) = handle.join().expect("worker panicked") {
            let fetched = registry
                .fetch(&receipt.share_id)
                .unwrap()
                .expect("published share must be readable");
            assert!(stored.insert(receipt.share_id));
            assert!(fetched.content.starts_with("body "));
        }
    }
    assert_eq!(registry.stored_count().unwrap(), stored.len() as u64);
    assert!(stored.contains("SAMEIDXX"));
}

#[test]
fn concurrent_fetches_of_expired_share_all_report_missing() {
    const READERS: usize = 8;

    let (registry, clock, _temp) = setup_temp_registry();
    let receipt = registry.publish("ephemeral", None, Some(1)).expect("publish");
    clock.advance(Duration::days(2));

    let registry = Arc::new(registry);
    let barrier = Arc::new(Barrier::new(READERS));
    let handles: Vec<_> = (0..READERS)
        .map(|_| {
            let registry = registry.clone();
            let barrier = barrier.clone();
            let share_id = receipt.share_id.clone();
            thread::spawn(move || {
                barrier.wait();
                registry.fetch(&share_id)
            })
        })
        .collect();

    for handle in handles {
        let result = handle.join().expect("reader panicked");
        assert!(result.expect("fetch").is_none());
    }
    assert_eq!(registry.stored_count().unwrap(), 0);
}

#[test]
fn concurrent_creates_assign_distinct_ids() {
    const WORKERS: usize = 6;
    const PER_WORKER: usize = 10;

    let (store, _clock, _temp) = setup_temp_store();
    let store = Arc::new(store);
    let barrier = Arc::new(Barrier::new(WORKERS));

    let handles: Vec<_> = (0..WORKERS)
        .map(|worker| {
            let store = store.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                (0..PER_WORKER)
                    .map(|n| {
                        store
                            .create(&format!("w{}-{}", worker, n), "body", None)
                            .expect("create")
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        for id in handle.join().expect("worker panicked") {
            assert!(ids.insert(id), "duplicate snippet id {}", id);
        }
    }
    assert_eq!(store.list().unwrap().len(), WORKERS * PER_WORKER);
}
