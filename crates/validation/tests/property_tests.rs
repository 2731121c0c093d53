//! Property-based tests for nebula-validation.

use std::collections::BTreeMap;

use nebula_validation::prelude::*;
use proptest::prelude::*;

struct Flagged(bool);

impl Inspect for Flagged {
    fn as_validatable(&self) -> Option<&dyn Validatable> {
        Some(self)
    }
}

impl Validatable for Flagged {
    fn validate(&self, _ctx: &Context) -> Result<(), Error> {
        if self.0 {
            Ok(())
        } else {
            Err(ValidationError::custom("flagged").into())
        }
    }
}

// ============================================================================
// SKIP: validate(v, [skip, anything]) always succeeds
// ============================================================================

proptest! {
    #[test]
    fn skip_always_succeeds(s in ".*", n in any::<i64>()) {
        let reject = by(|_, _| Err(ValidationError::custom("rejected").into()));
        prop_assert!(validate(&s, &[&skip(), &reject]).is_ok());
        prop_assert!(validate(&n, &[&SKIP, &required(), &reject]).is_ok());
    }

    #[test]
    fn skip_shields_failing_collections(
        flags in proptest::collection::vec(any::<bool>(), 0..16),
    ) {
        let items: Vec<Flagged> = flags.into_iter().map(Flagged).collect();
        prop_assert!(validate(&items, &[&skip()]).is_ok());
    }
}

// ============================================================================
// EMPTY RULE LISTS: plain values always pass
// ============================================================================

proptest! {
    #[test]
    fn empty_rules_on_leaves_succeed(
        s in ".*",
        n in any::<u64>(),
        f in any::<f64>(),
        b in any::<bool>(),
    ) {
        prop_assert!(validate(&s, &[]).is_ok());
        prop_assert!(validate(&n, &[]).is_ok());
        prop_assert!(validate(&f, &[]).is_ok());
        prop_assert!(validate(&b, &[]).is_ok());
        prop_assert!(validate(&Some(s), &[]).is_ok());
    }

    #[test]
    fn empty_rules_on_plain_collections_succeed(items in proptest::collection::vec(".*", 0..8)) {
        prop_assert!(validate(&items, &[]).is_ok());
    }
}

// ============================================================================
// AGGREGATION: failing keys are exactly the failing positions
// ============================================================================

proptest! {
    #[test]
    fn collection_keys_equal_failing_indices(
        flags in proptest::collection::vec(any::<bool>(), 0..32),
    ) {
        let expected: Vec<String> = flags
            .iter()
            .enumerate()
            .filter(|(_, ok)| !**ok)
            .map(|(i, _)| i.to_string())
            .collect();
        let items: Vec<Flagged> = flags.into_iter().map(Flagged).collect();

        match validate(&items, &[]) {
            Ok(()) => prop_assert!(expected.is_empty()),
            Err(err) => {
                let fields = err.as_fields().expect("aggregate expected");
                let mut keys: Vec<String> = fields.keys().map(str::to_owned).collect();
                let mut expected = expected;
                keys.sort();
                expected.sort();
                prop_assert_eq!(keys, expected);
            }
        }
    }

    #[test]
    fn map_keys_equal_failing_keys(
        entries in proptest::collection::btree_map("[a-z]{1,6}", any::<bool>(), 0..16),
    ) {
        let expected: Vec<String> = entries
            .iter()
            .filter(|(_, ok)| !**ok)
            .map(|(k, _)| k.clone())
            .collect();
        let map: BTreeMap<String, Flagged> = entries
            .into_iter()
            .map(|(k, ok)| (k, Flagged(ok)))
            .collect();

        let actual: Vec<String> = validate(&map, &[])
            .err()
            .and_then(|err| err.as_fields().map(|f| f.keys().map(str::to_owned).collect()))
            .unwrap_or_default();
        prop_assert_eq!(actual, expected);
    }
}

// ============================================================================
// IDEMPOTENCY AND LENGTH BOUNDS
// ============================================================================

proptest! {
    #[test]
    fn length_matches_char_count(s in ".{0,40}", min in 1usize..10, span in 0usize..10) {
        let max = min + span;
        let count = s.chars().count();
        let ok = validate(&s, &[&length(min, max)]).is_ok();
        prop_assert_eq!(ok, count == 0 || (count >= min && count <= max));
    }

    #[test]
    fn required_idempotent(s in ".*") {
        let rule = required();
        let r1 = validate(&s, &[&rule]).is_ok();
        let r2 = validate(&s, &[&rule]).is_ok();
        prop_assert_eq!(r1, r2);
        prop_assert_eq!(r1, !s.is_empty());
    }
}
