use optrule::{RuleError, Validator, ValidatorBuilder};

#[derive(Debug, Clone, Default)]
struct Entity {
    name: String,
    age: Option<i32>,
}

fn entity(name: &str, age: Option<i32>) -> Entity {
    Entity {
        name: name.to_owned(),
        age,
    }
}

fn age_at_least_zero() -> Validator<Entity> {
    let mut builder = ValidatorBuilder::<Entity>::new();
    builder
        .rule_for("Age", |e: &Entity| e.age)
        .unwrap()
        .present_value()
        .unwrap()
        .greater_than_or_equal(0)
        .when_some()
        .unwrap();
    builder.build().unwrap()
}

#[test]
fn unwrapped_negative_age_fails() {
    let result = age_at_least_zero().validate(&entity("x", Some(-1)));
    assert!(!result.is_valid());
    assert_eq!(result.failures().len(), 1);
    assert_eq!(result.failures()[0].property_name(), "Age");
    assert_eq!(
        result.failures()[0].message(),
        "'Age' must be greater than or equal to '0'."
    );
}

#[test]
fn unwrapped_absent_age_is_valid() {
    let result = age_at_least_zero().validate(&entity("x", None));
    assert!(result.is_valid());
    assert!(result.failures().is_empty());
}

#[test]
fn fused_form_accepts_boundary_values() {
    let mut builder = ValidatorBuilder::<Entity>::new();
    builder
        .rule_for("Age", |e: &Entity| e.age)
        .unwrap()
        .with_present_value(|age| age.greater_than_or_equal(0))
        .unwrap();
    let validator = builder.build().unwrap();

    for age in [0, 1, i32::MAX] {
        assert!(validator.validate(&entity("", Some(age))).is_valid(), "age {age}");
    }
    for age in [-1, i32::MIN] {
        assert!(!validator.validate(&entity("", Some(age))).is_valid(), "age {age}");
    }
}

#[test]
fn when_present_gates_unrelated_property() {
    let mut builder = ValidatorBuilder::<Entity>::new();
    builder
        .rule_for("Name", |e: &Entity| e.name.clone())
        .unwrap()
        .equal("Age".to_owned())
        .when_present(|e: &Entity| e.age);
    let validator = builder.build().unwrap();

    assert!(validator.validate(&entity("Age", Some(0))).is_valid());
    assert!(!validator.validate(&entity("NotAge", Some(0))).is_valid());
    assert!(validator.validate(&entity("NotAge", None)).is_valid());
}

#[test]
fn unless_present_depends_only_on_name_when_absent() {
    let mut builder = ValidatorBuilder::<Entity>::new();
    builder
        .rule_for("Name", |e: &Entity| e.name.clone())
        .unwrap()
        .equal("Age".to_owned())
        .unless_present(|e: &Entity| e.age);
    let validator = builder.build().unwrap();

    assert!(validator.validate(&entity("Age", None)).is_valid());
    let result = validator.validate(&entity("NotAge", None));
    assert!(!result.is_valid());
    assert_eq!(result.failures()[0].property_name(), "Name");
    assert!(validator.validate(&entity("NotAge", Some(0))).is_valid());
}

#[test]
fn must_be_absent_rule() {
    let mut builder = ValidatorBuilder::<Entity>::new();
    builder.rule_for("Age", |e: &Entity| e.age).unwrap().must_be_absent();
    let validator = builder.build().unwrap();

    assert!(validator.validate(&entity("", None)).is_valid());
    let result = validator.validate(&entity("", Some(0)));
    assert!(!result.is_valid());
    assert!(result.failures()[0].message().contains("must not contain a value."));
}

#[test]
fn required_and_ranged_on_one_rule() {
    let mut builder = ValidatorBuilder::<Entity>::new();
    builder
        .rule_for("Name", |e: &Entity| e.name.clone())
        .unwrap()
        .not_empty();
    builder
        .rule_for("Age", |e: &Entity| e.age)
        .unwrap()
        .must_be_present()
        .when(|e| e.name == "Age");
    builder
        .rule_for("Age", |e: &Entity| e.age)
        .unwrap()
        .must_be_present()
        .with_present_value(|age| age.inclusive_between(0, 10))
        .unwrap();
    let validator = builder.build().unwrap();

    let result = validator.validate(&entity("Age", Some(11)));
    assert_eq!(result.failures().len(), 1);
    assert_eq!(
        result.failures()[0].message(),
        "'Age' must be between 0 and 10. You entered 11."
    );

    let result = validator.validate(&entity("Age", None));
    let messages: Vec<&str> = result.failures().iter().map(|f| f.message()).collect();
    assert_eq!(
        messages,
        vec!["'Age' must contain a value.", "'Age' must contain a value."]
    );

    assert!(validator.validate(&entity("Bob", Some(5))).is_valid());
}

#[test]
fn custom_message_on_unwrapped_rule() {
    let mut builder = ValidatorBuilder::<Entity>::new();
    builder
        .rule_for("age", |e: &Entity| e.age)
        .unwrap()
        .with_name("Age in years")
        .with_present_value(|age| {
            age.less_than(150)
                .with_message("{PropertyName} of {PropertyValue} is not plausible")
        })
        .unwrap();
    let result = builder.build().unwrap().validate(&entity("", Some(200)));
    assert_eq!(result.failures()[0].property_name(), "Age in years");
    assert_eq!(
        result.failures()[0].message(),
        "Age in years of 200 is not plausible"
    );
}

#[test]
fn ungated_unwrap_is_rejected_at_build() {
    let mut builder = ValidatorBuilder::<Entity>::new();
    builder
        .rule_for("Age", |e: &Entity| e.age)
        .unwrap()
        .present_value()
        .unwrap()
        .greater_than_or_equal(0);
    assert_eq!(
        builder.build().unwrap_err(),
        RuleError::UngatedUnwrap {
            property: "Age".into()
        }
    );
}

#[test]
fn gate_attached_before_validators_does_not_satisfy_build() {
    let mut builder = ValidatorBuilder::<Entity>::new();
    builder
        .rule_for("Age", |e: &Entity| e.age)
        .unwrap()
        .present_value()
        .unwrap()
        .when_some()
        .unwrap()
        .greater_than_or_equal(1);
    assert!(matches!(
        builder.build(),
        Err(RuleError::UngatedUnwrap { .. })
    ));
}

#[test]
fn every_validator_after_unwrap_is_gated_before_build() {
    let mut builder = ValidatorBuilder::<Entity>::new();
    builder
        .rule_for("Age", |e: &Entity| e.age)
        .unwrap()
        .present_value()
        .unwrap()
        .greater_than_or_equal(1)
        .when_some()
        .unwrap()
        .less_than(150)
        .when_some()
        .unwrap();
    let validator = builder.build().unwrap();
    assert!(validator.validate(&entity("", None)).is_valid());
    assert!(!validator.validate(&entity("", Some(0))).is_valid());
    assert!(!validator.validate(&entity("", Some(150))).is_valid());
}

#[test]
fn explicit_default_variant_validates_absent_as_default() {
    let mut builder = ValidatorBuilder::<Entity>::new();
    builder
        .rule_for("Age", |e: &Entity| e.age)
        .unwrap()
        .value_or_default()
        .unwrap()
        .greater_than(0);
    let validator = builder.build().unwrap();
    assert!(!validator.validate(&entity("", None)).is_valid());
    assert!(validator.validate(&entity("", Some(3))).is_valid());
}

#[test]
fn consuming_builder_style() {
    let validator = ValidatorBuilder::<Entity>::new()
        .rule("Age", |e: &Entity| e.age, |r| {
            r.with_present_value(|age| age.greater_than_or_equal(0))
        })
        .unwrap()
        .rule("Name", |e: &Entity| e.name.clone(), |r| {
            Ok(r.equal("Age".to_owned()).when_present(|e: &Entity| e.age))
        })
        .unwrap()
        .build()
        .unwrap();

    assert!(validator.validate(&entity("Age", Some(1))).is_valid());
    assert_eq!(
        validator.validate(&entity("NotAge", Some(-1))).failures().len(),
        2
    );
    assert!(validator.validate(&entity("NotAge", None)).is_valid());
}

#[test]
fn result_display() {
    let result = age_at_least_zero().validate(&entity("", Some(-5)));
    assert_eq!(
        result.to_string(),
        "invalid (1 failures)\n  Age: 'Age' must be greater than or equal to '0'."
    );
}
