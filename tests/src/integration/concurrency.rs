//! # Concurrency Tests
//!
//! - Concurrent adds never lose bits (bit-set is commutative and idempotent)
//! - A check that follows a completed add never reports the key absent
//! - Reconfiguration is observed atomically: old instance or new, never mixed

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bloom_membership::{FilterService, HashAlgorithm, Membership, MembershipFilterApi};
    use tokio::sync::mpsc;

    use crate::support::{config, configured_service, keys};

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_match_sequential_bits() {
        let shared = Arc::new(configured_service(20_000, 2_000, &["sha256", "blake3"]));
        let sequential = configured_service(20_000, 2_000, &["sha256", "blake3"]);
        let all_keys = keys("user", 2_000);

        let mut handles = Vec::new();
        for chunk in all_keys.chunks(250) {
            let service = Arc::clone(&shared);
            let chunk = chunk.to_vec();
            handles.push(tokio::spawn(async move {
                for key in chunk {
                    service.add(&key).unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        for key in all_keys.iter().rev() {
            sequential.add(key).unwrap();
        }

        assert_eq!(shared.snapshot().unwrap(), sequential.snapshot().unwrap());
        assert_eq!(shared.status().unwrap().keys_added, 2_000);
        for key in &all_keys {
            assert_eq!(shared.check(key).unwrap(), Membership::PossiblyPresent);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_check_after_completed_add_is_positive() {
        let service = Arc::new(configured_service(50_000, 5_000, &["sha3_256"]));
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        let writer = {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                for key in keys("stream", 5_000) {
                    service.add(&key).unwrap();
                    // Published only after the add has completed
                    tx.send(key).unwrap();
                }
            })
        };

        let reader = {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                let mut seen = 0usize;
                while let Some(key) = rx.recv().await {
                    assert_eq!(
                        service.check(&key).unwrap(),
                        Membership::PossiblyPresent,
                        "false negative for {}",
                        key
                    );
                    seen += 1;
                }
                seen
            })
        };

        writer.await.unwrap();
        assert_eq!(reader.await.unwrap(), 5_000);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_reconfiguration_is_atomic_for_readers() {
        let small = config(1_000, 100, &["sha256"]);
        let large = config(5_000, 100, &["blake3"]);
        let service = Arc::new(FilterService::new());
        service.configure(&small).unwrap();

        let reconfigurer = {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                for i in 0..200 {
                    let next = if i % 2 == 0 { &large } else { &small };
                    service.configure(next).unwrap();
                    tokio::task::yield_now().await;
                }
            })
        };

        let mut readers = Vec::new();
        for r in 0..3 {
            let service = Arc::clone(&service);
            readers.push(tokio::spawn(async move {
                for i in 0..2_000 {
                    let status = service.status().unwrap();
                    let pair = (status.capacity, status.hash_round_count, status.algorithms[0]);
                    assert!(
                        pair == (1_000, 7, HashAlgorithm::Sha256)
                            || pair == (5_000, 35, HashAlgorithm::Blake3),
                        "mixed filter state observed: {:?}",
                        pair
                    );
                    let key = format!("reader_{}_{}", r, i);
                    service.add(&key).unwrap();
                    service.check(&key).unwrap();
                    if i % 64 == 0 {
                        tokio::task::yield_now().await;
                    }
                }
            }));
        }

        reconfigurer.await.unwrap();
        for reader in readers {
            reader.await.unwrap();
        }
        assert!(service.is_configured());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_shared_handle_survives_reconfiguration() {
        let service = Arc::new(configured_service(1_000, 100, &["sha256"]));
        let old = service.active_filter().unwrap();
        old.add("pinned");

        service.configure(&config(1_000, 100, &["sha256"])).unwrap();

        // The retired instance stays intact for holders of the old handle
        assert!(old.check("pinned").is_possibly_present());
        assert_eq!(service.check("pinned").unwrap(), Membership::DefinitelyAbsent);
    }
}
