//! Declarative field schema for both form variants.
//!
//! One table describes every field once: name, label, kind, default,
//! allowed values and which variants carry it. A variant is instantiated
//! by selecting rows, plus a layout listing what is displayed and in
//! which order.
//!
//! Structure:
//! - Constants: allowed values, the field table, per-variant layouts
//! - Types: FieldKind, FieldSpec, Schema
//! - Pure functions: lookup, defaults, required-field check

use std::fmt;

use serde::Serialize;

use crate::types::{FieldValue, FormState, FormVariant};

// ============================================================================
// CONSTANTS (Allowed Values)
// ============================================================================

/// One choice of an enum field: stored value and display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnumOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> EnumOption {
    EnumOption { value, label }
}

pub const GENDERS: &[EnumOption] = &[opt("Male", "Male"), opt("Female", "Female")];

pub const NATIONALITIES: &[EnumOption] = &[
    opt("Vietnamese", "Vietnam"),
    opt("American", "United States"),
    opt("Japanese", "Japan"),
];

pub const DEPARTMENTS: &[EnumOption] = &[
    opt("HR", "Human resources"),
    opt("IT", "Information technology"),
    opt("Sales", "Sales"),
];

pub const ROLES: &[EnumOption] = &[
    opt("Developer", "Developer"),
    opt("Manager", "Manager"),
    opt("Analyst", "Analyst"),
    opt("Associate", "Associate"),
];

pub const CONTRACT_TYPES: &[EnumOption] = &[
    opt("Full-time", "Full-time"),
    opt("Part-time", "Part-time"),
    opt("Intern", "Intern"),
];

pub const MARITAL_STATUSES: &[EnumOption] = &[opt("single", "Single"), opt("married", "Married")];

// ============================================================================
// TYPES
// ============================================================================

/// Declared kind of a field. Decides its default and which change
/// payloads fit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text (also dates, emails, phone numbers).
    Text,
    /// Non-negative number, default zero.
    Numeric,
    /// Checkbox or toggle with an explicit default.
    Boolean { default: bool },
    /// One of a fixed set of values, default empty (nothing chosen).
    Enum { options: &'static [EnumOption] },
    /// Comma-separated list.
    MultiText,
    /// Single selected file, default absent.
    Attachment,
}

impl FieldKind {
    /// The value a fresh session starts with.
    pub fn default_value(&self) -> FieldValue {
        match self {
            FieldKind::Text | FieldKind::Enum { .. } => FieldValue::Text(String::new()),
            FieldKind::Numeric => FieldValue::Number(0),
            FieldKind::Boolean { default } => FieldValue::Bool(*default),
            FieldKind::MultiText => FieldValue::List(Vec::new()),
            FieldKind::Attachment => FieldValue::File(None),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Text => "text",
            FieldKind::Numeric => "numeric",
            FieldKind::Boolean { .. } => "boolean",
            FieldKind::Enum { .. } => "enum",
            FieldKind::MultiText => "multi-value text",
            FieldKind::Attachment => "attachment",
        };
        f.write_str(name)
    }
}

/// One row of the field table.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Must be filled in (or checked) before the form can be submitted.
    pub required: bool,
    /// Variants whose record carries this field.
    #[serde(skip)]
    pub variants: &'static [FormVariant],
}

const BOTH: &[FormVariant] = &[FormVariant::Employee, FormVariant::Profile];
const EMPLOYEE: &[FormVariant] = &[FormVariant::Employee];
const PROFILE: &[FormVariant] = &[FormVariant::Profile];

// ============================================================================
// THE FIELD TABLE
// ============================================================================

/// Every field, in record order.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "fullName", label: "Full name", kind: FieldKind::Text, required: true, variants: EMPLOYEE },
    FieldSpec { name: "gender", label: "Gender", kind: FieldKind::Enum { options: GENDERS }, required: false, variants: EMPLOYEE },
    FieldSpec { name: "dob", label: "Date of birth", kind: FieldKind::Text, required: true, variants: EMPLOYEE },
    FieldSpec { name: "nationality", label: "Nationality", kind: FieldKind::Enum { options: NATIONALITIES }, required: true, variants: EMPLOYEE },
    FieldSpec { name: "address", label: "Permanent address", kind: FieldKind::Text, required: true, variants: EMPLOYEE },
    FieldSpec { name: "phone", label: "Phone number", kind: FieldKind::Text, required: true, variants: EMPLOYEE },
    FieldSpec { name: "email", label: "Work email", kind: FieldKind::Text, required: true, variants: EMPLOYEE },
    FieldSpec { name: "department", label: "Department", kind: FieldKind::Enum { options: DEPARTMENTS }, required: true, variants: BOTH },
    FieldSpec { name: "role", label: "Role", kind: FieldKind::Enum { options: ROLES }, required: true, variants: BOTH },
    FieldSpec { name: "contractType", label: "Contract type", kind: FieldKind::Enum { options: CONTRACT_TYPES }, required: true, variants: BOTH },
    FieldSpec { name: "salary", label: "Salary", kind: FieldKind::Numeric, required: true, variants: BOTH },
    FieldSpec { name: "internalMail", label: "Receive internal mail", kind: FieldKind::Boolean { default: false }, required: false, variants: BOTH },
    FieldSpec { name: "maritalStatus", label: "Marital status", kind: FieldKind::Enum { options: MARITAL_STATUSES }, required: false, variants: BOTH },
    FieldSpec { name: "profilePicture", label: "Profile picture", kind: FieldKind::Attachment, required: false, variants: BOTH },
    FieldSpec { name: "policyConsent", label: "I accept the policy", kind: FieldKind::Boolean { default: false }, required: true, variants: PROFILE },
    FieldSpec { name: "skills", label: "Skills (comma separated)", kind: FieldKind::MultiText, required: false, variants: BOTH },
    FieldSpec { name: "isActive", label: "Activation status", kind: FieldKind::Boolean { default: true }, required: false, variants: BOTH },
];

/// Displayed fields of the employee form, top to bottom.
const EMPLOYEE_LAYOUT: &[&str] = &[
    "profilePicture",
    "fullName",
    "gender",
    "dob",
    "nationality",
    "address",
    "phone",
    "email",
    "department",
    "role",
    "contractType",
    "salary",
    "maritalStatus",
    "skills",
    "internalMail",
    "isActive",
];

/// Displayed fields of the profile form. `department` stays in the
/// record but has no input here.
const PROFILE_LAYOUT: &[&str] = &[
    "role",
    "contractType",
    "salary",
    "internalMail",
    "maritalStatus",
    "profilePicture",
    "policyConsent",
    "skills",
    "isActive",
];

// ============================================================================
// SCHEMA
// ============================================================================

/// A form variant instantiated from the field table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    variant: FormVariant,
    /// Rows carried in the record, in record order.
    fields: Vec<&'static FieldSpec>,
    /// Rows displayed, in display order.
    layout: Vec<&'static FieldSpec>,
}

impl Schema {
    pub fn for_variant(variant: FormVariant) -> Self {
        let fields = FIELDS.iter().filter(|f| f.variants.contains(&variant)).collect();
        let names = match variant {
            FormVariant::Employee => EMPLOYEE_LAYOUT,
            FormVariant::Profile => PROFILE_LAYOUT,
        };
        let layout = names
            .iter()
            .filter_map(|name| FIELDS.iter().find(|f| f.name == *name))
            .collect();
        Schema { variant, fields, layout }
    }

    pub fn variant(&self) -> FormVariant {
        self.variant
    }

    pub fn fields(&self) -> &[&'static FieldSpec] {
        &self.fields
    }

    pub fn layout(&self) -> &[&'static FieldSpec] {
        &self.layout
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().copied().find(|f| f.name == name)
    }

    /// Fully populated record with every field at its default.
    pub fn initial_state(&self) -> FormState {
        FormState::from_entries(
            self.fields
                .iter()
                .map(|f| (f.name.to_string(), f.kind.default_value()))
                .collect(),
        )
    }

    /// Required fields that are still blank, in display order.
    ///
    /// This is the check a browser runs for `required` inputs; the
    /// reducer itself never calls it.
    pub fn missing_required(&self, state: &FormState) -> Vec<&'static FieldSpec> {
        self.layout
            .iter()
            .copied()
            .filter(|f| f.required)
            .filter(|f| state.get(f.name).is_none_or(FieldValue::is_blank))
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn names(specs: &[&FieldSpec]) -> Vec<&'static str> {
        specs.iter().map(|f| f.name).collect()
    }

    #[test]
    fn employee_record_matches_declaration_order() {
        let schema = Schema::for_variant(FormVariant::Employee);
        assert_eq!(
            names(schema.fields()),
            vec![
                "fullName", "gender", "dob", "nationality", "address", "phone", "email",
                "department", "role", "contractType", "salary", "internalMail",
                "maritalStatus", "profilePicture", "skills", "isActive",
            ]
        );
    }

    #[test]
    fn profile_keeps_department_in_record_but_not_layout() {
        let schema = Schema::for_variant(FormVariant::Profile);
        assert!(schema.field("department").is_some());
        assert!(!names(schema.layout()).contains(&"department"));
        assert!(schema.field("fullName").is_none());
        assert!(schema.field("policyConsent").is_some());
    }

    #[test]
    fn every_layout_entry_is_in_the_record() {
        for variant in [FormVariant::Employee, FormVariant::Profile] {
            let schema = Schema::for_variant(variant);
            for spec in schema.layout() {
                assert!(schema.field(spec.name).is_some(), "{} missing in {}", spec.name, variant);
            }
        }
    }

    #[test]
    fn initial_state_is_fully_populated_with_defaults() {
        let schema = Schema::for_variant(FormVariant::Profile);
        let state = schema.initial_state();
        assert_eq!(state.len(), schema.fields().len());
        assert_eq!(state.get("salary"), Some(&FieldValue::Number(0)));
        assert_eq!(state.get("internalMail"), Some(&FieldValue::Bool(false)));
        assert_eq!(state.get("policyConsent"), Some(&FieldValue::Bool(false)));
        assert_eq!(state.get("isActive"), Some(&FieldValue::Bool(true)));
        assert_eq!(state.get("skills"), Some(&FieldValue::List(vec![])));
        assert_eq!(state.get("profilePicture"), Some(&FieldValue::File(None)));
        assert_eq!(state.get("role"), Some(&FieldValue::Text(String::new())));
    }

    #[test]
    fn missing_required_lists_blank_required_fields() {
        let schema = Schema::for_variant(FormVariant::Profile);
        let state = schema.initial_state();
        assert_eq!(names(&schema.missing_required(&state)), vec!["role", "contractType", "policyConsent"]);

        let filled = state
            .with("role", FieldValue::Text("Manager".into()))
            .with("contractType", FieldValue::Text("Intern".into()))
            .with("policyConsent", FieldValue::Bool(true));
        assert!(schema.missing_required(&filled).is_empty());
    }

    #[test]
    fn kind_display_names() {
        assert_eq!(FieldKind::MultiText.to_string(), "multi-value text");
        assert_eq!(FieldKind::Boolean { default: true }.to_string(), "boolean");
    }
}
