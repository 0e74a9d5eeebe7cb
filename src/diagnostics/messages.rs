//! Diagnostic message catalog.
//!
//! The exact wording of these messages is asserted by consumers (language
//! services, test kits), so every message is produced here and nowhere else.

// ============================================================================
// IMPORTS
// ============================================================================

pub fn from_prop_missing_in_import() -> String {
    r#""-st-from" is missing in :import block"#.to_string()
}

pub fn empty_import_from() -> String {
    r#"empty "-st-from" in :import block"#.to_string()
}

pub fn multiple_from_in_import() -> String {
    r#"cannot define multiple "-st-from" declarations in a single import"#.to_string()
}

pub fn from_must_be_string() -> String {
    r#""-st-from" must be a quoted string"#.to_string()
}

pub fn default_import_is_lower_case(name: &str) -> String {
    format!(
        r#"Default import of a Stylable stylesheet must start with an upper-case letter, got "{name}""#
    )
}

pub fn illegal_prop_in_import(prop: &str) -> String {
    format!(r#"illegal "{prop}" in :import"#)
}

pub fn invalid_named_import_as(text: &str) -> String {
    format!(r#"invalid "as" alias in "-st-named": "{text}""#)
}

pub fn invalid_st_import(params: &str) -> String {
    format!(r#"invalid @st-import params "{params}", expected <default>, [<named>] from "<request>""#)
}

pub fn directive_rule_not_top_level(selector: &str) -> String {
    format!(r#""{selector}" must be a top-level rule"#)
}

// ============================================================================
// SYMBOLS
// ============================================================================

pub fn redeclare_symbol(name: &str) -> String {
    format!(r#"redeclare symbol "{name}""#)
}

pub fn invalid_namespace(name: &str) -> String {
    format!(r#"invalid namespace "{name}""#)
}

pub fn invalid_custom_property_name(name: &str) -> String {
    format!(r#"custom property "{name}" must start with "--""#)
}

pub fn directive_in_complex_selector(directive: &str) -> String {
    format!(r#"cannot define "{directive}" inside a complex selector"#)
}

pub fn value_cannot_be_string() -> String {
    "value can not be a string (remove quotes?)".to_string()
}

pub fn cannot_extend_unknown_symbol(name: &str) -> String {
    format!(r#"cannot extend unknown symbol "{name}""#)
}

pub fn cannot_extend_js() -> String {
    "JS import is not extendable".to_string()
}

pub fn circular_extends(chain: &[String]) -> String {
    format!("circular extends found: {}", chain.join(" --> "))
}

pub fn circular_alias(chain: &[String]) -> String {
    format!("circular import alias found: {}", chain.join(" --> "))
}

pub fn unknown_imported_file(path: &str) -> String {
    format!(r#"cannot resolve imported file: "{path}""#)
}

pub fn unknown_imported_symbol(name: &str, path: &str) -> String {
    format!(r#"cannot resolve imported symbol "{name}" from stylesheet "{path}""#)
}

// ============================================================================
// STATES
// ============================================================================

pub fn state_definition_in_element() -> String {
    "cannot define pseudo states inside element selectors".to_string()
}

pub fn state_definition_in_complex() -> String {
    "cannot define pseudo states inside complex selectors".to_string()
}

pub fn override_typed_rule(key: &str, name: &str) -> String {
    format!(r#"override "{key}" on typed rule "{name}""#)
}

pub fn state_starts_with_hyphen(name: &str) -> String {
    format!(r#"state "{name}" declaration cannot begin with a "-" character"#)
}

pub fn unknown_state_type(name: &str, type_name: &str) -> String {
    format!(r#"pseudo-state "{name}" defined with unknown type: "{type_name}""#)
}

pub fn no_state_type_given(name: &str) -> String {
    format!(r#"pseudo-state "{name}" expected a definition of a single type, but received none"#)
}

pub fn too_many_state_types(name: &str, types: &[String]) -> String {
    format!(
        r#"pseudo-state "{name}" expected a definition of a single type, but received: {}"#,
        types.join(", ")
    )
}

pub fn unknown_state_usage(name: &str) -> String {
    format!(r#"unknown pseudo state "{name}""#)
}

pub fn unknown_pseudo_element(name: &str) -> String {
    format!(r#"unknown pseudo element "{name}""#)
}

pub fn no_state_argument_given(name: &str, type_name: &str) -> String {
    format!(r#"pseudo-state "{name}" expected argument of type "{type_name}" but got none"#)
}

pub fn state_validation_failed(name: &str, value: &str, errors: &[String]) -> String {
    format!(
        r#"pseudo-state "{name}" with parameter "{value}" failed validation:
{}"#,
        errors.join("\n")
    )
}

// State validator errors.

pub fn expected_number(value: &str) -> String {
    format!(r#"expected "{value}" to be of type number"#)
}

pub fn expected_min(value: &str, min: &str) -> String {
    format!(r#"expected "{value}" to be larger than or equal to {min}"#)
}

pub fn expected_max(value: &str, max: &str) -> String {
    format!(r#"expected "{value}" to be lesser than or equal to {max}"#)
}

pub fn expected_multiple_of(value: &str, multiple: &str) -> String {
    format!(r#"expected "{value}" to be a multiple of {multiple}"#)
}

pub fn expected_regex(value: &str, regex: &str) -> String {
    format!(r#"expected "{value}" to match regex "{regex}""#)
}

pub fn invalid_regex(regex: &str) -> String {
    format!(r#"invalid regular expression "{regex}""#)
}

pub fn expected_contains(value: &str, text: &str) -> String {
    format!(r#"expected "{value}" to contain string "{text}""#)
}

pub fn expected_min_length(value: &str, length: &str) -> String {
    format!(r#"expected "{value}" to be of length longer than or equal to {length}"#)
}

pub fn expected_max_length(value: &str, length: &str) -> String {
    format!(r#"expected "{value}" to be of length shorter than or equal to {length}"#)
}

pub fn expected_enum(value: &str, options: &[String]) -> String {
    format!(
        r#"expected "{value}" to be one of the options: "{}""#,
        options.join(", ")
    )
}

pub fn expected_tag(value: &str) -> String {
    format!(r#"expected "{value}" to be a single value with no spaces"#)
}

pub fn unknown_validator(type_name: &str, validator: &str) -> String {
    format!(r#"unknown "{type_name}" validator "{validator}""#)
}

// ============================================================================
// VALUES
// ============================================================================

pub fn unknown_var(name: &str) -> String {
    format!(r#"unknown var "{name}""#)
}

pub fn cannot_use_as_value(kind: &str, name: &str) -> String {
    format!(r#"{kind} "{name}" cannot be used as a variable"#)
}

pub fn cyclic_value(chain: &[String]) -> String {
    format!(
        r#"cyclic value definition detected: "{}""#,
        chain.join(r#"" --> ""#)
    )
}

pub fn failed_formatter(name: &str, error: &str) -> String {
    format!(r#"failed to execute formatter "{name}" with error: "{error}""#)
}

// ============================================================================
// MIXINS
// ============================================================================

pub fn unknown_mixin(name: &str) -> String {
    format!(r#"unknown mixin: "{name}""#)
}

pub fn override_mixin(prop: &str) -> String {
    format!(r#"override "{prop}" on same rule"#)
}

pub fn circular_mixin(chain: &[String]) -> String {
    format!("circular mixin found: {}", chain.join(" --> "))
}

pub fn partial_mixin_missing_arguments(name: &str) -> String {
    format!(
        r#""-st-partial-mixin" can only be used with override arguments provided, missing overrides on "{name}""#
    )
}

pub fn invalid_mixin_argument(name: &str, argument: &str) -> String {
    format!(r#"invalid argument "{argument}" for mixin "{name}", expected "<var-name> <value>""#)
}

pub fn js_mixin_not_a_func(name: &str) -> String {
    format!(r#"js mixin must be a function, "{name}" is not"#)
}

pub fn js_mixin_not_an_object(name: &str) -> String {
    format!(r#"js mixin "{name}" must return an object"#)
}

pub fn failed_js_mixin(name: &str, error: &str) -> String {
    format!(r#"could not apply mixin "{name}": {error}"#)
}

// ============================================================================
// PARSING
// ============================================================================

pub fn unclosed_block() -> String {
    "Unclosed block".to_string()
}

pub fn unexpected_close_brace() -> String {
    "Unexpected }".to_string()
}

pub fn unknown_word(word: &str) -> String {
    format!(r#"Unknown word "{word}""#)
}
