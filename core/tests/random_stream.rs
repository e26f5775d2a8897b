use proptest::prelude::*;
use randomizer_core::{error::RandoError, rng::RandomStream};
use std::collections::BTreeSet;

#[test]
fn int_in_range_is_inclusive() {
    let mut rng = RandomStream::new(7);
    let mut seen = BTreeSet::new();
    for _ in 0..500 {
        let v = rng.next_int_in_range(3, 5).unwrap();
        assert!((3..=5).contains(&v));
        seen.insert(v);
    }
    assert_eq!(seen.len(), 3, "Both bounds should be reachable");
    assert_eq!(rng.next_int_in_range(4, 4).unwrap(), 4);
}

#[test]
fn inverted_range_is_rejected() {
    let mut rng = RandomStream::new(7);
    assert!(matches!(
        rng.next_int_in_range(5, 3),
        Err(RandoError::InvalidRange { min: 5, max: 3 })
    ));
}

#[test]
fn percentage_bounds() {
    let mut rng = RandomStream::new(11);
    for _ in 0..200 {
        assert!(!rng.next_bool_with_percentage(0).unwrap());
        assert!(rng.next_bool_with_percentage(100).unwrap());
    }
    assert!(rng.next_bool_with_percentage(101).is_err());
    assert!(rng.next_bool_with_percentage(-1).is_err());
}

#[test]
fn empty_sequences_are_errors() {
    let mut rng = RandomStream::new(1);
    let empty: Vec<u32> = Vec::new();
    assert!(matches!(rng.pick_one(&empty), Err(RandoError::EmptyInput { .. })));

    let mut empty_mut: Vec<u32> = Vec::new();
    assert!(matches!(rng.pick_and_remove(&mut empty_mut), Err(RandoError::EmptyInput { .. })));

    let no_weight = [("a", 0u32), ("b", 0u32)];
    assert!(rng.weighted_pick(&no_weight).is_err());
}

#[test]
fn pick_and_remove_shrinks_the_pool() {
    let mut rng = RandomStream::new(3);
    let mut pool = vec![1, 2, 3, 4];
    let picked = rng.pick_and_remove(&mut pool).unwrap();
    assert_eq!(pool.len(), 3);
    assert!(!pool.contains(&picked));
}

#[test]
fn weighted_pick_never_chooses_zero_weight() {
    let mut rng = RandomStream::new(5);
    let table = [("never", 0u32), ("always", 10u32)];
    for _ in 0..200 {
        assert_eq!(*rng.weighted_pick(&table).unwrap(), "always");
    }
}

#[test]
fn shuffle_is_a_permutation() {
    let mut rng = RandomStream::new(9);
    let mut items: Vec<u32> = (0..20).collect();
    rng.shuffle(&mut items);
    let sorted: BTreeSet<u32> = items.iter().copied().collect();
    assert_eq!(sorted.len(), 20);
}

#[test]
fn same_seed_same_sequence() {
    let mut a = RandomStream::new(42);
    let mut b = RandomStream::new(42);
    let pool: Vec<u32> = (0..30).collect();
    assert_eq!(a.pick_many_distinct(&pool, 10), b.pick_many_distinct(&pool, 10));
}

/// Index draws are sampled as u64, so 32- and 64-bit targets pick alike.
#[test]
fn picks_match_u64_index_sampling() {
    use rand::{Rng, SeedableRng};

    let mut rng = RandomStream::new(77);
    let mut reference = rand_pcg::Pcg64Mcg::seed_from_u64(77);
    let pool: Vec<u32> = (0..13).collect();
    for _ in 0..50 {
        let expected = reference.gen_range(0..pool.len() as u64) as usize;
        assert_eq!(*rng.pick_one(&pool).unwrap(), pool[expected]);
    }
}

proptest! {
    /// k ≤ |pool| gives k distinct members; k > |pool| gives the whole pool.
    #[test]
    fn pick_many_distinct_samples_without_replacement(
        seed in any::<u64>(),
        size in 0usize..40,
        count in 0usize..60,
    ) {
        let mut rng = RandomStream::new(seed);
        let pool: Vec<usize> = (0..size).collect();
        let picked = rng.pick_many_distinct(&pool, count);

        prop_assert_eq!(picked.len(), count.min(size));
        let unique: BTreeSet<usize> = picked.iter().copied().collect();
        prop_assert_eq!(unique.len(), picked.len());
        prop_assert!(picked.iter().all(|p| pool.contains(p)));
        prop_assert_eq!(pool.len(), size, "Caller's pool must not be touched");
    }

    #[test]
    fn int_in_range_stays_in_bounds(seed in any::<u64>(), min in -1000i64..1000, span in 0i64..1000) {
        let mut rng = RandomStream::new(seed);
        let v = rng.next_int_in_range(min, min + span).unwrap();
        prop_assert!(v >= min && v <= min + span);
    }
}
