//! Property-based tests for handler registration, cancellation and firing order

use atexit::{HandlerId, Registry};
use parking_lot::Mutex;
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

proptest! {
    #[test]
    fn ids_are_distinct_and_firing_follows_registration(
        cancelled in prop::collection::vec(any::<bool>(), 0..64)
    ) {
        let registry = Registry::new();
        let fired = Arc::new(Mutex::new(Vec::new()));

        let ids: Vec<HandlerId> = (0..cancelled.len())
            .map(|index| {
                let fired = fired.clone();
                registry.register(move || fired.lock().push(index))
            })
            .collect();

        let unique: HashSet<_> = ids.iter().copied().collect();
        prop_assert_eq!(unique.len(), ids.len());

        for (id, cancel) in ids.iter().zip(&cancelled) {
            if *cancel {
                prop_assert!(registry.cancel(*id));
            }
        }

        let expected: Vec<usize> = cancelled
            .iter()
            .enumerate()
            .filter(|(_, cancel)| !**cancel)
            .map(|(index, _)| index)
            .collect();

        let report = registry.run_handlers();
        prop_assert_eq!(report.invoked, expected.len());
        prop_assert_eq!(&*fired.lock(), &expected);
    }

    #[test]
    fn cancelling_unknown_ids_changes_nothing(
        handlers in 0usize..16,
        bogus in prop::collection::vec(1_000u64..2_000, 0..8)
    ) {
        let registry = Registry::new();
        let fired = Arc::new(Mutex::new(0usize));
        for _ in 0..handlers {
            let fired = fired.clone();
            registry.register(move || *fired.lock() += 1);
        }

        for raw in bogus {
            prop_assert!(!registry.cancel(HandlerId::from_raw(raw)));
        }

        registry.run_handlers();
        prop_assert_eq!(*fired.lock(), handlers);
    }
}
