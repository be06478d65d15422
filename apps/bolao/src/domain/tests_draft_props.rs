//! Property tests for draft completion.

use std::collections::BTreeSet;

use proptest::prelude::*;

use super::draft::Draft;
use super::pick::Pick;
use super::FIXTURE_COUNT;

fn pick() -> impl Strategy<Value = Pick> {
    prop::sample::select(Pick::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Setting picks on any set S of distinct indices leaves exactly the
    /// complement of S missing, in ascending order.
    #[test]
    fn completion_matches_complement(
        mask in prop::collection::vec(any::<bool>(), FIXTURE_COUNT),
        value in pick(),
    ) {
        let indices: BTreeSet<usize> =
            mask.iter().enumerate().filter_map(|(i, on)| on.then_some(i)).collect();
        let mut draft = Draft::new(1);
        for &i in &indices {
            draft.set(i, value).unwrap();
        }
        let status = draft.completion();
        let expected: Vec<usize> = (0..FIXTURE_COUNT).filter(|i| !indices.contains(i)).collect();

        prop_assert_eq!(status.is_complete, indices.len() == FIXTURE_COUNT);
        prop_assert_eq!(&status.missing, &expected);
        prop_assert_eq!(draft.finalize().is_ok(), status.is_complete);
    }

    /// Only the last write to a slot is kept.
    #[test]
    fn last_write_wins(writes in prop::collection::vec((0..FIXTURE_COUNT, pick()), 1..64)) {
        let mut draft = Draft::new(1);
        for &(i, p) in &writes {
            draft.set(i, p).unwrap();
        }
        let touched: BTreeSet<usize> = writes.iter().map(|(i, _)| *i).collect();
        for i in 0..FIXTURE_COUNT {
            let last = writes.iter().rev().find(|(j, _)| *j == i).map(|(_, p)| *p);
            prop_assert_eq!(draft.get(i), last);
        }
        prop_assert_eq!(draft.filled(), touched.len());
    }
}
