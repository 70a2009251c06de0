use std::any::Any;

use tracing::trace;

use crate::message::MessageArgs;
use crate::types::{CascadeMode, ErasedValue, RuleDescriptor, ValidationFailure, ValidationResult};
use crate::validators::Check;

pub(crate) fn validate<R: 'static>(rules: &[RuleDescriptor<R>], instance: &R) -> ValidationResult {
    let mut failures = Vec::new();
    for rule in rules {
        validate_rule(rule, instance, &mut failures);
    }
    ValidationResult::new(failures)
}

/// Run one rule's chain. The property is read lazily, at most once per
/// representation (raw or transformed), and not at all if every validator is
/// gated off. Gated-off validators are never invoked and emit nothing.
fn validate_rule<R: 'static>(
    rule: &RuleDescriptor<R>,
    instance: &R,
    failures: &mut Vec<ValidationFailure>,
) {
    let mut raw: Option<ErasedValue> = None;
    let mut transformed: Option<ErasedValue> = None;

    for component in &rule.components {
        if !component.applies_to(instance) {
            trace!(
                property = rule.property_name(),
                validator = component.validator.name(),
                "condition not met, validator skipped"
            );
            continue;
        }

        let value: &dyn Any = if rule.feeds_raw(component) {
            &**raw.get_or_insert_with(|| rule.source.evaluate(instance))
        } else {
            &**transformed.get_or_insert_with(|| rule.read_transformed(instance))
        };
        let args: MessageArgs = match component.validator.check(value) {
            Check::Valid => continue,
            Check::Invalid(args) => args,
        };

        let property_name = rule.property_name();
        trace!(
            property = property_name,
            validator = component.validator.name(),
            "validator failed"
        );
        failures.push(ValidationFailure::new(
            property_name,
            component.template().render(property_name, &args),
            component.validator.name(),
        ));

        if rule.cascade == CascadeMode::Stop {
            break;
        }
    }
}
