//! # Message Rendering — Violations as Sentences
//!
//! Every [`Violation`] renders to one English sentence naming the offending
//! location by its leaf segment only, as `field 'first_name'` or
//! `field '2'`. Type, `required` and `additionalProperties` messages say
//! `index '2'` for array elements instead, and `const` says `Item`.
//! Violations at the document root use a shorter form without a location.
//!
//! Composite violations (`anyOf`, `contains`) join the messages of their
//! parts: each part loses its trailing period and its first letter is
//! lowercased, the parts are joined with a delimiter, and the result is
//! re-capitalised and closed with a period.

use jsonstruct_core::{render, render_list, FieldPath, PathSegment};

use crate::violation::{Violation, ViolationKind};

/// Render the message for a violation reported at the top level.
pub fn render_violation(violation: &Violation) -> String {
    render_within(violation, None)
}

/// Render a violation nested under `parent`.
///
/// The parent only matters for `contains` with several element failures:
/// the delimiter is `. Or ` under `anyOf`, `. And ` under `allOf`, and `. `
/// otherwise.
pub fn render_within(violation: &Violation, parent: Option<&ViolationKind>) -> String {
    let leaf = violation.path.leaf();
    // `type`, `required` and `additionalProperties` name array elements as
    // `index '<i>'`; every other keyword says `field '<segment>'`.
    let label = leaf.map(PathSegment::label);
    let field = leaf.map(|segment| format!("field '{segment}'"));

    match &violation.kind {
        ViolationKind::Type { expected, actual } => match label {
            Some(label) => format!("Expect type of {label} to be {expected}, but receive type {actual}."),
            None => format!("Expect type to be {expected}, but receive type {actual}."),
        },
        ViolationKind::Required { missing, within } => match label {
            Some(label) => format!("Missing field '{missing}', within {within} at {label}."),
            None => format!("Missing field '{missing}'."),
        },
        ViolationKind::AdditionalProperties { .. } => match label {
            Some(label) => format!("There are unexpected additional properties at {label}"),
            None => "There are unexpected additional properties".to_string(),
        },
        ViolationKind::MinLength { min, length } => match field {
            Some(field) => format!("Expect the length of {field} to exceed {min}, actual length is {length}."),
            None => format!("Expect the length to exceed {min}, actual length is {length}."),
        },
        ViolationKind::MaxLength { max, length } => match field {
            Some(field) => {
                format!("Expect the length of {field} to not exceed {max}, actual length is {length}.")
            }
            None => format!("Expect the length to not exceed {max}, actual length is {length}."),
        },
        ViolationKind::Format { format, value } => match field {
            Some(field) => {
                format!("The {field} value '{value}' failed the format '{format}' of type 'string'.")
            }
            None => format!("The value '{value}' failed the format '{format}' of type 'string'."),
        },
        ViolationKind::Const { expected, actual } => {
            let subject = match leaf {
                Some(PathSegment::Key(key)) => format!("Field '{key}'"),
                Some(PathSegment::Index(_)) => "Item".to_string(),
                None => "Value".to_string(),
            };
            format!(
                "{subject} does not match value '{}', but receive '{}'.",
                render(expected),
                render(actual)
            )
        }
        ViolationKind::Enum { expected, actual } => {
            let options = render_list(expected);
            let actual = render(actual);
            match field {
                Some(field) => {
                    format!("Expect the value of {field} to be either of {options}, but receive '{actual}'.")
                }
                None => format!("Expect the value to be either of {options}, but receive '{actual}'."),
            }
        }
        ViolationKind::MinItems { min, count } => match field {
            Some(field) => format!("Expect the min items of {field} to be {min}, but actual count is {count}."),
            None => format!("Expect the min items to be {min}, but actual count is {count}."),
        },
        ViolationKind::MaxItems { max, count } => match field {
            Some(field) => format!("Expect the max items of {field} to be {max}, but actual count is {count}."),
            None => format!("Expect the max items to be {max}, but actual count is {count}."),
        },
        ViolationKind::Minimum { min, actual } => match field {
            Some(field) => format!("Expect the value of {field} to exceed {min}, actual value is {actual}."),
            None => format!("Expect the value to exceed {min}, actual value is {actual}."),
        },
        ViolationKind::Maximum { max, actual } => match field {
            Some(field) => format!("Expect the value of {field} to not exceed {max}, actual value is {actual}."),
            None => format!("Expect the value to not exceed {max}, actual value is {actual}."),
        },
        ViolationKind::OneOf { matched } => {
            format!("Expect exactly 1 matched of data model, but there are {matched} matches.")
        }
        ViolationKind::AnyOf { errors } => join(errors, &violation.kind, ". Or "),
        ViolationKind::Contains { errors } => match errors.as_slice() {
            [] => "The json instance does not contain any items.".to_string(),
            [only] => render_within(only, Some(&violation.kind)),
            _ => {
                let delimiter = match parent {
                    Some(ViolationKind::AnyOf { .. }) => ". Or ",
                    Some(ViolationKind::AllOf { .. }) => ". And ",
                    _ => ". ",
                };
                join(errors, &violation.kind, delimiter)
            }
        },
        ViolationKind::AllOf { error } => render_within(error, Some(&violation.kind)),
    }
}

/// Location prefix used by debug output: the pointer, or `(root)`.
pub fn describe_location(path: &FieldPath) -> String {
    if path.is_root() {
        "(root)".to_string()
    } else {
        path.to_pointer()
    }
}

fn join(errors: &[Violation], parent: &ViolationKind, delimiter: &str) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = errors
        .iter()
        .map(|error| {
            let message = render_within(error, Some(parent));
            lowercase_first(message.trim_end_matches('.'))
        })
        .collect();
    let mut joined = uppercase_first(&parts.join(delimiter));
    joined.push('.');
    joined
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

fn uppercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
