//! Pure field rules shared by the task type handlers.
//!
//! A handler describes each status as a slice of [`FieldRule`]s. Checking
//! and normalizing are driven from the same table so the two can never
//! disagree about which fields belong to a status.

use crate::task::domain::{CustomFields, Status, ValidationIssue, ValidationReport};
use serde_json::Value;

/// Accepted shape of a required field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A string that is non-empty after trimming.
    Text,
    /// A non-blank string or any JSON number.
    TextOrNumber,
}

/// A field required when entering a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Field name in the custom field map.
    pub name: &'static str,
    /// Accepted value shape.
    pub kind: FieldKind,
}

impl FieldRule {
    /// Declares a required non-empty text field.
    #[must_use]
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
        }
    }

    /// Declares a required text-or-number field.
    #[must_use]
    pub const fn text_or_number(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::TextOrNumber,
        }
    }
}

/// Looks up the rules for `status` in a table indexed from status 1.
#[must_use]
pub fn rules_for(
    table: &'static [&'static [FieldRule]],
    status: Status,
) -> Option<&'static [FieldRule]> {
    let index = status.value().checked_sub(1)?;
    let position = usize::try_from(index).ok()?;
    table.get(position).copied()
}

/// Records an issue for each required field that is missing or malformed.
pub fn check_required(rules: &[FieldRule], fields: &CustomFields, report: &mut ValidationReport) {
    for rule in rules {
        let value = fields.get(rule.name);
        match rule.kind {
            FieldKind::Text if !is_non_blank_text(value) => {
                report.push(ValidationIssue::RequiredText { field: rule.name });
            }
            FieldKind::TextOrNumber if !is_non_blank_text(value) && !is_number(value) => {
                report.push(ValidationIssue::RequiredTextOrNumber { field: rule.name });
            }
            FieldKind::Text | FieldKind::TextOrNumber => {}
        }
    }
}

/// Records an issue when an optional field is present but not a number
/// greater than or equal to zero.
pub fn check_non_negative_number(
    field: &'static str,
    fields: &CustomFields,
    report: &mut ValidationReport,
) {
    let Some(value) = fields.get(field) else {
        return;
    };
    let acceptable = value.as_f64().is_some_and(|number| number >= 0.0);
    if !acceptable {
        report.push(ValidationIssue::NonNegativeNumber { field });
    }
}

/// Returns a copy of `fields` where every field named in `rules` holds its
/// canonical trimmed string form. All other keys are kept as provided.
#[must_use]
pub fn normalize_required(rules: &[FieldRule], fields: &CustomFields) -> CustomFields {
    let mut normalized = fields.clone();
    for rule in rules {
        let canonical = fields.get(rule.name).and_then(canonical_text);
        if let Some(text) = canonical {
            normalized.insert(rule.name, Value::String(text));
        }
    }
    normalized
}

/// Canonical string form of a scalar; `None` for null, arrays and objects.
fn canonical_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.trim().to_owned()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn is_non_blank_text(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|text| !text.trim().is_empty())
}

const fn is_number(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Number(_)))
}
