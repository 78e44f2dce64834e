use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use threadwood::{Direction, ThreadwoodSet};

#[derive(Debug, Clone)]
enum SetOp {
    Insert(u16),
    Remove(u16),
    Contains(u16),
}

fn set_op_strategy() -> impl Strategy<Value = SetOp> {
    prop_oneof![
        3 => (0u16..300).prop_map(SetOp::Insert),
        2 => (0u16..300).prop_map(SetOp::Remove),
        1 => (0u16..300).prop_map(SetOp::Contains),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn set_ops_match_btreeset(ops in proptest::collection::vec(set_op_strategy(), 1_000)) {
        let mut set = ThreadwoodSet::new();
        let mut model = BTreeSet::new();

        for op in &ops {
            match *op {
                SetOp::Insert(k) => prop_assert_eq!(set.insert(k), model.insert(k)),
                SetOp::Remove(k) => prop_assert_eq!(set.remove(&k), model.remove(&k)),
                SetOp::Contains(k) => prop_assert_eq!(set.contains(&k), model.contains(&k)),
            }

            prop_assert_eq!(set.validate(), Ok(()), "after {:?}", op);
            prop_assert_eq!(set.first(), model.first());
            prop_assert_eq!(set.last(), model.last());
        }

        prop_assert!(set.iter().eq(model.iter()));
        prop_assert!(set.iter().rev().eq(model.iter().rev()));
    }
}

#[test]
fn set_listing() {
    let set: ThreadwoodSet<i32> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();

    assert_eq!(set.to_string(), "1 -> 3 -> 4 -> 5 -> 7 -> 8 -> 9");
    assert_eq!(
        set.to_string_with(Direction::Descending),
        "9 -> 8 -> 7 -> 5 -> 4 -> 3 -> 1"
    );
}

#[test]
fn set_round_trip_empties() {
    let mut set: ThreadwoodSet<u32> = (1..=1000).rev().collect();

    for key in 1..=1000 {
        assert!(set.remove(&key));
    }

    assert!(set.is_empty());
    assert_eq!(set.first(), None);
    assert_eq!(set.last(), None);
    assert_eq!(set.to_string(), "Empty Tree");
}
