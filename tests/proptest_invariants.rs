
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use optrule::{ConditionScope, Polarity, ValidatorBuilder};
use proptest::prelude::*;
use strategies::{arb_age, arb_bounds, arb_record, Record};

fn record(age: Option<i32>) -> Record {
    Record {
        name: String::new(),
        nickname: None,
        age,
    }
}

// ---------------------------------------------------------------------------
// Invariant 1: Unwrapped validators see exactly the contained value
//
// For Some(v) the inner validator is invoked once, with v. For None it is
// never invoked.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn inner_validator_sees_contained_value(age in arb_age()) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut builder = ValidatorBuilder::<Record>::new();
        builder
            .rule_for("Age", |r: &Record| r.age)
            .unwrap()
            .with_present_value(move |v| {
                v.must(move |age: &i32| {
                    sink.lock().unwrap().push(*age);
                    true
                })
            })
            .unwrap();
        let result = builder.build().unwrap().validate(&record(age));

        prop_assert!(result.is_valid());
        let seen = seen.lock().unwrap();
        match age {
            Some(v) => prop_assert_eq!(&*seen, &vec![v]),
            None => prop_assert!(seen.is_empty()),
        }
    }

    #[test]
    fn unwrapped_range_matches_direct_check(age in arb_age(), (from, to) in arb_bounds()) {
        let mut builder = ValidatorBuilder::<Record>::new();
        builder
            .rule_for("Age", |r: &Record| r.age)
            .unwrap()
            .with_present_value(move |v| v.inclusive_between(from, to))
            .unwrap();
        let valid = builder.build().unwrap().validate(&record(age)).is_valid();
        let expected = age.map_or(true, |v| (from..=to).contains(&v));
        prop_assert_eq!(valid, expected);
    }
}

// ---------------------------------------------------------------------------
// Invariant 2: Absent values are never evaluated
//
// A presence-gated chain never invokes its validators when the gating
// expression is None, whichever gating form is used.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn gated_validators_not_invoked_for_none(rec in arb_record()) {
        let calls = Arc::new(AtomicUsize::new(0));
        let fused = Arc::clone(&calls);
        let explicit = Arc::clone(&calls);
        let foreign = Arc::clone(&calls);

        let mut builder = ValidatorBuilder::<Record>::new();
        builder
            .rule_for("Age", |r: &Record| r.age)
            .unwrap()
            .with_present_value(move |v| {
                v.must(move |_: &i32| {
                    fused.fetch_add(1, Ordering::SeqCst);
                    false
                })
            })
            .unwrap();
        builder
            .rule_for("Age", |r: &Record| r.age)
            .unwrap()
            .present_value()
            .unwrap()
            .must(move |_: &i32| {
                explicit.fetch_add(1, Ordering::SeqCst);
                false
            })
            .when_some()
            .unwrap();
        builder
            .rule_for("Name", |r: &Record| r.name.clone())
            .unwrap()
            .must(move |_: &String| {
                foreign.fetch_add(1, Ordering::SeqCst);
                false
            })
            .when_present(|r: &Record| r.age);
        let result = builder.build().unwrap().validate(&rec);

        if rec.age.is_none() {
            prop_assert_eq!(calls.load(Ordering::SeqCst), 0);
            prop_assert!(result.is_valid());
        } else {
            prop_assert_eq!(calls.load(Ordering::SeqCst), 3);
            prop_assert_eq!(result.failures().len(), 3);
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant 3: Symmetric gating is mutually exclusive
//
// For any instance, exactly one of a WhenSome-gated and a WhenNone-gated
// validator on the same expression runs.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn when_some_and_when_none_are_exclusive(rec in arb_record(), scope_all in any::<bool>()) {
        let scope = if scope_all {
            ConditionScope::AllValidators
        } else {
            ConditionScope::CurrentValidator
        };
        let mut builder = ValidatorBuilder::<Record>::new();
        builder
            .rule_for("Name", |r: &Record| r.name.clone())
            .unwrap()
            .must(|_| false)
            .with_message("some")
            .gate_on_presence(|r: &Record| r.nickname.clone(), Polarity::WhenSome, scope);
        builder
            .rule_for("Name", |r: &Record| r.name.clone())
            .unwrap()
            .must(|_| false)
            .with_message("none")
            .gate_on_presence(|r: &Record| r.nickname.clone(), Polarity::WhenNone, scope);
        let result = builder.build().unwrap().validate(&rec);

        prop_assert_eq!(result.failures().len(), 1);
        let expected = if rec.nickname.is_some() { "some" } else { "none" };
        prop_assert_eq!(result.failures()[0].message(), expected);
    }

    #[test]
    fn presence_validators_partition_instances(age in arb_age()) {
        let mut builder = ValidatorBuilder::<Record>::new();
        builder
            .rule_for("Age", |r: &Record| r.age)
            .unwrap()
            .must_be_present()
            .must_be_absent();
        let result = builder.build().unwrap().validate(&record(age));

        prop_assert_eq!(result.failures().len(), 1);
        let expected = if age.is_some() { "MustBeAbsent" } else { "MustBePresent" };
        prop_assert_eq!(result.failures()[0].validator(), expected);
    }
}

// ---------------------------------------------------------------------------
// Invariant 4: Determinism
//
// Validating the same instance twice yields the same failures.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn determinism(rec in arb_record()) {
        let mut builder = ValidatorBuilder::<Record>::new();
        builder
            .rule_for("Age", |r: &Record| r.age)
            .unwrap()
            .with_present_value(|v| v.greater_than_or_equal(0))
            .unwrap();
        builder
            .rule_for("Name", |r: &Record| r.name.clone())
            .unwrap()
            .equal("Age".to_owned())
            .when_present(|r: &Record| r.age);
        let validator = builder.build().unwrap();

        let first = validator.validate(&rec);
        for _ in 0..3 {
            prop_assert_eq!(&first, &validator.validate(&rec));
        }
    }
}
