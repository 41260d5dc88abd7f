//! Property tests for accumulator merging

use proptest::prelude::*;
use std::collections::BTreeMap;
use trellis_engine::{Accumulator, Derived};

const KEYS: &[&str] = &["qtype", "qkey", "bus_name", "bus_number", "side"];

fn child() -> impl Strategy<Value = Accumulator> {
    (
        prop::collection::vec((prop::sample::select(KEYS), any::<i64>()), 0..4),
        "[a-zæöþ]{0,6}",
    )
        .prop_map(|(fields, text)| {
            let mut acc = Accumulator::with_derived(Derived {
                canonical: text.clone(),
                nominative: text.clone(),
                indefinite: text.clone(),
                text,
                gender: None,
            });
            for (key, value) in fields {
                acc.set(key, value);
            }
            acc
        })
}

proptest! {
    #[test]
    fn rightmost_field_wins(children in prop::collection::vec(child(), 0..6)) {
        let merged = Accumulator::merged(&children);

        let mut expected = BTreeMap::new();
        for c in &children {
            for (name, value) in c.fields() {
                expected.insert(name.to_string(), value.clone());
            }
        }
        let actual: BTreeMap<_, _> = merged
            .fields()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn text_joins_non_empty_spans(children in prop::collection::vec(child(), 0..6)) {
        let merged = Accumulator::merged(&children);
        let expected: Vec<&str> = children
            .iter()
            .map(Accumulator::text)
            .filter(|text| !text.is_empty())
            .collect();
        prop_assert_eq!(merged.text(), expected.join(" "));
    }

    #[test]
    fn grouping_does_not_change_merge(
        a in child(),
        b in child(),
        c in child(),
    ) {
        let left = Accumulator::merged([&Accumulator::merged([&a, &b]), &c]);
        let right = Accumulator::merged([&a, &Accumulator::merged([&b, &c])]);
        let flat = Accumulator::merged([&a, &b, &c]);
        prop_assert_eq!(&left, &flat);
        prop_assert_eq!(&right, &flat);
    }
}
