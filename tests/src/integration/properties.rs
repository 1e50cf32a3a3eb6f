//! # Membership Filter Properties
//!
//! 1. No false negatives
//! 2. Idempotent adds
//! 3. Deterministic bits for identical configuration and input
//! 4. Optimal round count
//! 5. Reconfiguration discards state
//! 6. Configuration validation
//! 7. Empirical false positive rate close to (1 - e^(-kn/m))^k

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use bloom_membership::domain::calculate_fpr;
    use bloom_membership::{FilterError, FilterService, Membership, MembershipFilterApi};
    use proptest::prelude::*;
    use rand::distributions::Alphanumeric;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::support::{config, configured_service, init_tracing, keys};

    // =========================================================================
    // 1-3: no false negatives, idempotence, determinism
    // =========================================================================

    proptest! {
        #[test]
        fn prop_no_false_negatives(
            inserted in prop::collection::vec(".{0,40}", 1..40),
            extra in prop::collection::vec(".{0,40}", 0..40),
        ) {
            let service = configured_service(2000, 100, &["sha256", "blake3"]);
            for key in &inserted {
                service.add(key).unwrap();
            }
            // Adds after the fact must not hide earlier keys
            for key in &extra {
                service.add(key).unwrap();
            }
            for key in inserted.iter().chain(extra.iter()) {
                prop_assert_eq!(service.check(key).unwrap(), Membership::PossiblyPresent);
            }
        }

        #[test]
        fn prop_add_is_idempotent(
            background in prop::collection::vec("[a-z0-9]{1,16}", 0..30),
            key in ".{0,32}",
        ) {
            let service = configured_service(1024, 64, &["sha3_256"]);
            for k in &background {
                service.add(k).unwrap();
            }
            service.add(&key).unwrap();
            let once = service.snapshot().unwrap();
            service.add(&key).unwrap();
            prop_assert_eq!(service.snapshot().unwrap(), once);
        }

        #[test]
        fn prop_identical_configuration_is_deterministic(
            inserted in prop::collection::vec(".{0,24}", 0..40),
            probes in prop::collection::vec(".{0,24}", 0..40),
        ) {
            let a = configured_service(4096, 256, &["sha512", "keccak256"]);
            let b = configured_service(4096, 256, &["sha512", "keccak256"]);
            for key in &inserted {
                a.add(key).unwrap();
                b.add(key).unwrap();
            }
            prop_assert_eq!(a.snapshot().unwrap(), b.snapshot().unwrap());
            for probe in &probes {
                prop_assert_eq!(a.check(probe).unwrap(), b.check(probe).unwrap());
            }
        }
    }

    // =========================================================================
    // 4: optimal round count
    // =========================================================================

    #[test]
    fn test_optimal_round_count_reference() {
        let service = configured_service(1000, 100, &["sha256"]);
        let expected = ((1000.0_f64 / 100.0) * std::f64::consts::LN_2).round() as usize;
        assert_eq!(expected, 7);
        assert_eq!(service.status().unwrap().hash_round_count, expected);
    }

    #[test]
    fn test_round_count_never_below_one() {
        let service = configured_service(8, 1000, &["sha256"]);
        assert_eq!(service.status().unwrap().hash_round_count, 1);
    }

    // =========================================================================
    // 5: reconfiguration
    // =========================================================================

    #[test]
    fn test_replacement_discards_state() {
        let service = configured_service(1000, 100, &["sha256"]);
        service.add("x").unwrap();
        assert_eq!(service.check("x").unwrap(), Membership::PossiblyPresent);

        service.configure(&config(500, 50, &["blake3"])).unwrap();
        assert_eq!(service.check("x").unwrap(), Membership::DefinitelyAbsent);

        let status = service.status().unwrap();
        assert_eq!(status.capacity, 500);
        assert_eq!(status.keys_added, 0);
    }

    #[test]
    fn test_same_configuration_twice_still_resets() {
        let service = configured_service(1000, 100, &["sha256"]);
        for key in keys("old", 50) {
            service.add(&key).unwrap();
        }
        service.configure(&config(1000, 100, &["sha256"])).unwrap();
        assert_eq!(service.status().unwrap().bits_set, 0);
        assert!(keys("old", 50)
            .iter()
            .all(|k| service.check(k).unwrap() == Membership::DefinitelyAbsent));
    }

    // =========================================================================
    // 6: configuration validation
    // =========================================================================

    #[test]
    fn test_configuration_validation() {
        init_tracing();
        let service = FilterService::new();

        let zero = service.configure(&config(0, 100, &["sha256"]));
        assert!(matches!(zero, Err(FilterError::Configuration(_))));

        let zero_n = service.configure(&config(100, 0, &["sha256"]));
        assert!(matches!(zero_n, Err(FilterError::Configuration(_))));

        let unknown = service.configure(&config(1000, 100, &["not-a-real-algorithm"]));
        assert!(matches!(unknown, Err(FilterError::Configuration(_))));

        assert!(!service.is_configured());
        assert_eq!(service.add("x"), Err(FilterError::Uninitialized));
        assert_eq!(service.check("x"), Err(FilterError::Uninitialized));
    }

    #[test]
    fn test_error_messages_name_the_problem() {
        init_tracing();
        let service = FilterService::new();
        let err = service
            .configure(&config(1000, 100, &["sha256", "whirlpool"]))
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("whirlpool"), "{}", message);
        assert!(message.contains("sha256"), "{}", message);
    }

    // =========================================================================
    // 7: statistical false positive rate
    // =========================================================================

    fn random_keys(rng: &mut StdRng, count: usize, exclude: &HashSet<String>) -> HashSet<String> {
        let mut out = HashSet::with_capacity(count);
        while out.len() < count {
            let key: String = (0..16)
                .map(|_| char::from(rng.sample(Alphanumeric)))
                .collect();
            if !exclude.contains(&key) {
                out.insert(key);
            }
        }
        out
    }

    #[test]
    fn test_false_positive_rate_matches_theory() {
        let (m, n) = (10_000, 1_000);
        let service = configured_service(m, n, &["sha256"]);
        let k = service.status().unwrap().hash_round_count;
        assert_eq!(k, 7);

        let mut rng = StdRng::seed_from_u64(0x5EED_B100);
        let inserted = random_keys(&mut rng, n, &HashSet::new());
        for key in &inserted {
            service.add(key).unwrap();
        }

        let probes = random_keys(&mut rng, 10_000, &inserted);
        let false_positives = probes
            .iter()
            .filter(|key| service.check(key).unwrap().is_possibly_present())
            .count();

        let observed = false_positives as f64 / probes.len() as f64;
        let theoretical = calculate_fpr(m, n, k);
        tracing::info!(observed, theoretical, "Single-algorithm false positive rate");
        assert!(
            (observed - theoretical).abs() <= theoretical * 0.5,
            "observed FPR {} vs theoretical {}",
            observed,
            theoretical
        );
    }

    #[test]
    fn test_fpr_with_multiple_algorithms() {
        let (m, n) = (20_000, 2_000);
        let service = configured_service(m, n, &["sha256", "sha3_256", "blake3"]);
        let k = service.status().unwrap().hash_round_count;

        for key in keys("member", n) {
            service.add(&key).unwrap();
        }
        let probes = keys("stranger", 20_000);
        let false_positives = probes
            .iter()
            .filter(|key| service.check(key).unwrap().is_possibly_present())
            .count();

        let observed = false_positives as f64 / probes.len() as f64;
        let theoretical = calculate_fpr(m, n, k);
        assert!(
            (observed - theoretical).abs() <= theoretical * 0.5,
            "observed FPR {} vs theoretical {}",
            observed,
            theoretical
        );
    }
}
