//! Property tests for binding uniqueness and collection ordering.

use nominal_di::{implements, singleton, DiError, Injector};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

trait Named: Send + Sync {
    fn name(&self) -> &str;
}

struct Tag {
    name: String,
}

impl Named for Tag {
    fn name(&self) -> &str {
        &self.name
    }
}

fn bind_all(names: &BTreeSet<String>) -> Injector {
    let mut di = Injector::new();
    // Bind in reverse order to show registration order is irrelevant.
    for name in names.iter().rev() {
        di.bind(name.clone(), [
            singleton(Tag { name: name.clone() }),
            implements::<Tag, dyn Named>(|t| t),
        ])
        .unwrap();
    }
    di
}

proptest! {
    #[test]
    fn collection_resolution_is_name_ordered(
        names in proptest::collection::btree_set("[a-z]{1,8}", 1..8)
    ) {
        let di = bind_all(&names);

        let all: Vec<Arc<dyn Named>> = di.resolve_all().unwrap();
        let resolved: Vec<String> = all.iter().map(|t| t.name().to_string()).collect();
        let expected: Vec<String> = names.iter().cloned().collect();
        prop_assert_eq!(resolved, expected);
    }

    #[test]
    fn rebinding_any_name_always_conflicts(
        names in proptest::collection::btree_set("[a-z]{1,8}", 1..8)
    ) {
        let mut di = bind_all(&names);
        let before = di.len();

        for name in &names {
            let result = di.bind(name.clone(), [singleton(Tag { name: "usurper".to_string() })]);
            prop_assert!(matches!(result, Err(DiError::NameConflict(_))));
        }
        prop_assert_eq!(di.len(), before);

        // The original providers survived every conflicting bind.
        for name in &names {
            let tag: Arc<Tag> = di.resolve(name).unwrap();
            prop_assert_eq!(&tag.name, name);
        }
    }

    #[test]
    fn every_binding_resolves_by_its_own_name(
        names in proptest::collection::btree_set("[a-z]{1,8}", 1..8)
    ) {
        let di = bind_all(&names);

        for name in &names {
            let by_trait: Arc<dyn Named> = di.resolve(name).unwrap();
            prop_assert_eq!(by_trait.name(), name.as_str());
        }
    }
}
