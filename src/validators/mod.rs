//! Property validators and the type-erased adapter the engine runs them through.

mod comparison;
mod predicate;
mod presence;

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

pub use comparison::{CompareOp, Comparison, InclusiveBetween};
pub use predicate::{IsEmpty, NotEmpty, Predicate};
pub use presence::{MustBeAbsent, MustBePresent};

use crate::message::{MessageArgs, MessageTemplate};
use crate::types::TypeInfo;

/// A check over one property value of type `T`.
///
/// Validators are typed: the engine hands them an already-typed `&T`, so an
/// implementation never inspects the runtime type of its input.
pub trait PropertyValidator<T>: Send + Sync {
    /// Short identifier reported on failures, e.g. `"MustBePresent"`.
    fn name(&self) -> &'static str;

    /// Default failure message; may reference `{PropertyName}` and any
    /// placeholder returned by [`message_args`](Self::message_args).
    fn message_template(&self) -> &str;

    fn is_valid(&self, value: &T) -> bool;

    fn message_args(&self, _value: &T) -> MessageArgs {
        MessageArgs::new()
    }
}

/// Result of running one validator against an erased value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Check {
    Valid,
    Invalid(MessageArgs),
}

/// Engine-side view of a validator after the property type is erased.
pub(crate) trait ErasedValidator: Send + Sync {
    fn name(&self) -> &'static str;
    /// The value type the validator was attached at.
    fn input_type(&self) -> TypeInfo;
    fn template(&self) -> &MessageTemplate;
    fn check(&self, value: &dyn Any) -> Check;
}

struct Typed<T, V> {
    validator: V,
    template: MessageTemplate,
    _value: PhantomData<fn(&T)>,
}

impl<T: 'static, V: PropertyValidator<T>> ErasedValidator for Typed<T, V> {
    fn name(&self) -> &'static str {
        self.validator.name()
    }

    fn input_type(&self) -> TypeInfo {
        TypeInfo::of::<T>()
    }

    fn template(&self) -> &MessageTemplate {
        &self.template
    }

    /// The single type check between the engine and a typed validator. A
    /// value that is not a `T` (for example a rule rebound without a
    /// transform) is an ordinary failure.
    fn check(&self, value: &dyn Any) -> Check {
        match value.downcast_ref::<T>() {
            Some(v) if self.validator.is_valid(v) => Check::Valid,
            Some(v) => Check::Invalid(self.validator.message_args(v)),
            None => Check::Invalid(MessageArgs::new()),
        }
    }
}

pub(crate) fn erase<T, V>(validator: V) -> Box<dyn ErasedValidator>
where
    T: 'static,
    V: PropertyValidator<T> + 'static,
{
    let template = MessageTemplate::parse(validator.message_template());
    Box::new(Typed {
        validator,
        template,
        _value: PhantomData,
    })
}

impl fmt::Debug for dyn ErasedValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}
