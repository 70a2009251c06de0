//! Property validation rules over optional values.
//!
//! Rules are declared per property on a [`ValidatorBuilder`] and frozen into
//! a [`Validator`]. A rule declared on an `Option<T>` property can be
//! unwrapped so that the validators chained after it see the contained `T`,
//! gated on the value being present:
//!
//! ```
//! use optrule::ValidatorBuilder;
//!
//! struct Entity {
//!     age: Option<i32>,
//! }
//!
//! let mut builder = ValidatorBuilder::<Entity>::new();
//! builder
//!     .rule_for("Age", |e: &Entity| e.age)
//!     .unwrap()
//!     .with_present_value(|age| age.greater_than_or_equal(0))
//!     .unwrap();
//! let validator = builder.build().unwrap();
//!
//! assert!(validator.validate(&Entity { age: None }).is_valid());
//! assert!(!validator.validate(&Entity { age: Some(-1) }).is_valid());
//! ```

mod evaluate;
pub mod message;
mod optional;
mod types;
pub mod validators;

pub use optional::presence_condition;
pub use types::{
    Accessor, CascadeMode, Condition, ConditionScope, ErasedValue, Polarity, RuleDescriptor,
    RuleError, RuleView, SourceExpression, Transform, TypeInfo, ValidationFailure,
    ValidationResult, Validator, ValidatorBuilder, ValidatorOptions,
};
