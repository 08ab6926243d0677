//! Property-based tests for ordering, tie handling and encoding invariants.

use dbids_core::codec::{read_many, write_all};
use dbids_core::knn::{DoubleIntegerKnnHeap, SortedKnnHeap};
use dbids_core::sort;
use dbids_core::{
    Dbid, DbidAllocator, DbidCodec, Dbids, FixedCodec, KnnHeap, ReusingDbidAllocator, VarintCodec,
};
use proptest::prelude::*;

/// Small integer distances so that ties are frequent.
fn candidates() -> impl Strategy<Value = Vec<(u8, i32)>> {
    prop::collection::vec((0u8..20, -1000i32..1000), 0..120)
}

fn sorted_distances(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(|a, b| a.partial_cmp(b).expect("finite"));
    values
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// The finalized list holds the k smallest distances plus every tie.
    #[test]
    fn prop_knn_keeps_k_smallest_and_ties(entries in candidates(), k in 1usize..12) {
        let mut heap = DoubleIntegerKnnHeap::new(k).expect("k > 0");
        let mut sorted = SortedKnnHeap::new(k).expect("k > 0");
        for &(d, id) in &entries {
            heap.insert(f64::from(d), &Dbid::new(id));
            sorted.insert(f64::from(d), &Dbid::new(id));
        }
        let a = heap.to_knn_list();
        let b = sorted.to_knn_list();

        let all = sorted_distances(entries.iter().map(|&(d, _)| f64::from(d)).collect());
        let expected: Vec<f64> = if all.len() <= k {
            all.clone()
        } else {
            let kdist = all[k - 1];
            all.iter().copied().filter(|&d| d <= kdist).collect()
        };

        prop_assert_eq!(a.distances(), expected.as_slice());
        prop_assert_eq!(b.distances(), expected.as_slice());
        if all.len() >= k {
            prop_assert_eq!(a.kdist(), all[k - 1]);
        } else {
            prop_assert_eq!(a.kdist(), f64::INFINITY);
        }
    }

    /// Insertion order does not change the multiset of accepted distances.
    #[test]
    fn prop_knn_order_independent(entries in candidates(), k in 1usize..8) {
        let mut forward = DoubleIntegerKnnHeap::new(k).expect("k > 0");
        let mut backward = DoubleIntegerKnnHeap::new(k).expect("k > 0");
        for &(d, id) in &entries {
            forward.insert(f64::from(d), &Dbid::new(id));
        }
        for &(d, id) in entries.iter().rev() {
            backward.insert(f64::from(d), &Dbid::new(id));
        }
        let a = forward.to_knn_list();
        let b = backward.to_knn_list();
        prop_assert_eq!(a.distances(), b.distances());
        prop_assert_eq!(a.len(), b.len());
    }

    /// Sorting pairs permutes ids together with their keys.
    #[test]
    fn prop_sort_keeps_pairs_together(keys in prop::collection::vec(-1e6f64..1e6, 0..300)) {
        let mut sorted_keys = keys.clone();
        let mut values: Vec<i32> = (0..keys.len() as i32).collect();

        sort::sort(&mut sorted_keys, &mut values).expect("equal lengths");

        prop_assert!(sorted_keys.windows(2).all(|w| w[0] <= w[1]));
        for (key, &value) in sorted_keys.iter().zip(&values) {
            prop_assert_eq!(*key, keys[value as usize]);
        }
        let mut seen = values.clone();
        seen.sort_unstable();
        prop_assert!(seen.iter().enumerate().all(|(i, &v)| v == i as i32));
    }

    /// Both codecs restore every id they write.
    #[test]
    fn prop_codecs_roundtrip(raw in prop::collection::vec(any::<i32>(), 0..64)) {
        let ids: Vec<Dbid> = raw.iter().copied().map(Dbid::new).collect();

        let mut varint = Vec::new();
        let written = write_all(&VarintCodec, ids.iter().copied(), &mut varint).expect("vec");
        prop_assert_eq!(written, varint.len());
        prop_assert!(varint.len() <= ids.len() * 5);
        let back = read_many(&VarintCodec, ids.len(), &mut varint.as_slice()).expect("valid");
        prop_assert_eq!(&back, &ids);

        let mut fixed = Vec::new();
        write_all(&FixedCodec, ids.iter().copied(), &mut fixed).expect("vec");
        prop_assert_eq!(fixed.len(), ids.len() * FixedCodec.fixed_len().expect("fixed"));
        let back = read_many(&FixedCodec, ids.len(), &mut fixed.as_slice()).expect("valid");
        prop_assert_eq!(back, ids);
    }

    /// Live ranges of the reusing allocator never overlap.
    #[test]
    fn prop_reusing_ranges_never_overlap(
        ops in prop::collection::vec((1usize..40, any::<bool>()), 1..60)
    ) {
        let alloc = ReusingDbidAllocator::new();
        let mut live = Vec::new();
        for (size, release) in ops {
            if release && !live.is_empty() {
                let range = live.swap_remove(size % live.len());
                alloc.deallocate_range(&range).expect("live range");
            } else {
                let range = alloc.generate_range(size).expect("not exhausted");
                prop_assert_eq!(range.len(), size);
                live.push(range);
            }
        }
        for (i, a) in live.iter().enumerate() {
            for b in &live[i + 1..] {
                prop_assert!(!a.overlaps(b), "{:?} overlaps {:?}", a, b);
            }
        }
        prop_assert_eq!(alloc.live_range_count(), live.len());
    }
}
