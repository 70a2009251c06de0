mod condition;
mod descriptor;
mod error;
mod options;
mod result;
mod source;
mod validator;
mod view;

pub use condition::{Condition, ConditionScope, Polarity};
pub use descriptor::RuleDescriptor;
pub use error::RuleError;
pub use options::{CascadeMode, ValidatorOptions};
pub use result::{ValidationFailure, ValidationResult};
pub use source::{Accessor, ErasedValue, SourceExpression, Transform, TypeInfo};
pub use validator::{Validator, ValidatorBuilder};
pub use view::RuleView;
