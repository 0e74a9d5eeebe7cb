//! Custom pseudo-state compilation.
//!
//! ```text
//! :toggled            → [data-ns-toggled]
//! :size(large)        → [data-ns-size="large"]
//! :tags(a)            → [data-ns-tags~="a"]
//! :hovered (mapped)   → the mapped selector, verbatim
//! ```

use std::rc::Rc;

use regex::Regex;

use crate::base::Span;
use crate::diagnostics::messages;
use crate::processor::{Meta, StateDef, StateType, StateValidator, TypedState};
use crate::value::strip_quotes;

use super::context::{Scope, TransformContext};

/// Attribute name of a state declared in `meta`.
pub fn state_attribute(meta: &Meta, state: &str) -> String {
    format!(
        "data-{}-{}",
        meta.namespace.to_lowercase(),
        state.to_lowercase()
    )
}

/// Check a state parameter against its type; returns the failure messages.
pub fn validate_state_value(state: &TypedState, value: &str) -> Vec<String> {
    let mut errors = Vec::new();
    match state.ty {
        StateType::String => {
            for validator in &state.validators {
                validate_string(validator, value, &mut errors);
            }
        }
        StateType::Number => match value.trim().parse::<f64>() {
            Ok(number) => {
                for validator in &state.validators {
                    validate_number(validator, value, number, &mut errors);
                }
            }
            Err(_) => errors.push(messages::expected_number(value)),
        },
        StateType::Enum => {
            if !state.options.iter().any(|option| option == value) {
                errors.push(messages::expected_enum(value, &state.options));
            }
        }
        StateType::Tag => {
            if value.is_empty() || value.contains(char::is_whitespace) {
                errors.push(messages::expected_tag(value));
            }
        }
    }
    errors
}

fn first_arg(validator: &StateValidator) -> &str {
    validator
        .args
        .first()
        .map(|arg| strip_quotes(arg))
        .unwrap_or("")
}

fn validate_string(validator: &StateValidator, value: &str, errors: &mut Vec<String>) {
    let arg = first_arg(validator);
    match validator.name.as_str() {
        "regex" => match Regex::new(arg) {
            Ok(regex) if regex.is_match(value) => {}
            Ok(_) => errors.push(messages::expected_regex(value, arg)),
            Err(_) => errors.push(messages::invalid_regex(arg)),
        },
        "contains" => {
            if !value.contains(arg) {
                errors.push(messages::expected_contains(value, arg));
            }
        }
        "minLength" => {
            if arg.parse::<usize>().is_ok_and(|min| value.chars().count() < min) {
                errors.push(messages::expected_min_length(value, arg));
            }
        }
        "maxLength" => {
            if arg.parse::<usize>().is_ok_and(|max| value.chars().count() > max) {
                errors.push(messages::expected_max_length(value, arg));
            }
        }
        other => errors.push(messages::unknown_validator(StateType::String.as_str(), other)),
    }
}

fn validate_number(validator: &StateValidator, value: &str, number: f64, errors: &mut Vec<String>) {
    let arg = first_arg(validator);
    let Ok(limit) = arg.parse::<f64>() else {
        errors.push(messages::expected_number(arg));
        return;
    };
    match validator.name.as_str() {
        "min" if number < limit => errors.push(messages::expected_min(value, arg)),
        "max" if number > limit => errors.push(messages::expected_max(value, arg)),
        "multipleOf" if limit != 0.0 && (number % limit).abs() > f64::EPSILON => {
            errors.push(messages::expected_multiple_of(value, arg))
        }
        "min" | "max" | "multipleOf" => {}
        other => errors.push(messages::unknown_validator(StateType::Number.as_str(), other)),
    }
}

impl TransformContext<'_> {
    /// Selector text for `:name(argument)` where `name` is declared by
    /// `owner` with `definition`.
    pub fn state_selector(
        &mut self,
        scope: &Scope,
        owner: &Rc<Meta>,
        name: &str,
        definition: &StateDef,
        argument: Option<&str>,
        span: Option<Span>,
    ) -> String {
        let attribute = state_attribute(owner, name);
        let typed = match definition {
            StateDef::Boolean => return format!("[{attribute}]"),
            StateDef::Mapped(selector) => return selector.trim().to_string(),
            StateDef::Typed(typed) => typed,
        };

        let value = match argument.map(str::trim).filter(|a| !a.is_empty()) {
            Some(argument) => self.transform_value(scope, argument, span, None).text,
            None => match &typed.default_value {
                Some(default) => {
                    let owner_scope = Scope::new(owner.clone());
                    self.transform_value(&owner_scope, default, span, None).text
                }
                None => {
                    self.warn(scope, span, messages::no_state_argument_given(name, typed.ty.as_str()));
                    return format!("[{attribute}]");
                }
            },
        };
        let value = strip_quotes(&value).to_string();

        let errors = validate_state_value(typed, &value);
        if !errors.is_empty() {
            self.warn(scope, span, messages::state_validation_failed(name, &value, &errors));
        }
        match typed.ty {
            StateType::Tag => format!(r#"[{attribute}~="{value}"]"#),
            _ => format!(r#"[{attribute}="{value}"]"#),
        }
    }
}
