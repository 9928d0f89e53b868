//! Product payload validation. Collects every failure instead of stopping at the first.

use crate::product::{is_numeric, number_of, text_of};
use serde_json::{Map, Value};

type Rule = fn(&str, &Value, &mut Vec<String>);

/// Checked in this order, so error output is deterministic.
const FIELD_RULES: &[(&str, Rule)] = &[
    ("name", name_rule as Rule),
    ("price", positive_number_rule as Rule),
    ("stock", positive_number_rule as Rule),
];

pub struct RequestValidator;

impl RequestValidator {
    /// Returns every rule violation; empty means valid. Missing fields are only
    /// an error when `is_create` or `require_all_fields` is set.
    pub fn validate(payload: &Map<String, Value>, is_create: bool, require_all_fields: bool) -> Vec<String> {
        let must_have_all = is_create || require_all_fields;
        let mut errors = Vec::new();
        for (field, rule) in FIELD_RULES {
            match payload.get(*field) {
                None if must_have_all => errors.push(format!("{} is required", field)),
                None => {}
                Some(v) => rule(field, v, &mut errors),
            }
        }
        errors
    }
}

fn name_rule(field: &str, v: &Value, errors: &mut Vec<String>) {
    let text = text_of(v);
    let name = text.trim();
    if name.is_empty() {
        errors.push(format!("{} must not be empty", field));
    }
    if name.chars().count() < 2 {
        errors.push(format!("{} must be at least 2 characters", field));
    }
}

fn positive_number_rule(field: &str, v: &Value, errors: &mut Vec<String>) {
    if !is_numeric(v) {
        errors.push(format!("{} must be numeric", field));
    }
    if number_of(v) <= 0.0 {
        errors.push(format!("{} must be greater than zero", field));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn empty_create_payload_reports_each_field_in_order() {
        let errors = RequestValidator::validate(&Map::new(), true, false);
        assert_eq!(errors, vec!["name is required", "price is required", "stock is required"]);
    }

    #[test]
    fn one_character_name_is_too_short_but_not_empty() {
        let errors = RequestValidator::validate(&obj(json!({"name": "a", "price": 10, "stock": 5})), true, false);
        assert_eq!(errors, vec!["name must be at least 2 characters"]);
    }

    #[test]
    fn blank_name_fails_both_name_rules() {
        let errors = RequestValidator::validate(&obj(json!({"name": "   ", "price": 10, "stock": 5})), true, false);
        assert_eq!(errors, vec!["name must not be empty", "name must be at least 2 characters"]);
    }

    #[test]
    fn non_numeric_price_fails_both_number_rules() {
        let errors = RequestValidator::validate(&obj(json!({"name": "Desk", "price": "cheap", "stock": 5})), true, false);
        assert_eq!(errors, vec!["price must be numeric", "price must be greater than zero"]);
    }

    #[test]
    fn zero_and_negative_numbers_are_rejected() {
        let errors = RequestValidator::validate(&obj(json!({"name": "Desk", "price": 0, "stock": -2})), true, false);
        assert_eq!(errors, vec!["price must be greater than zero", "stock must be greater than zero"]);
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let errors = RequestValidator::validate(&obj(json!({"name": "Desk", "price": "19.90", "stock": "4"})), true, false);
        assert!(errors.is_empty());
    }

    #[test]
    fn partial_update_only_checks_present_fields() {
        assert!(RequestValidator::validate(&obj(json!({"price": 5})), false, false).is_empty());
        assert!(RequestValidator::validate(&Map::new(), false, false).is_empty());
        let errors = RequestValidator::validate(&obj(json!({"stock": 0})), false, false);
        assert_eq!(errors, vec!["stock must be greater than zero"]);
    }

    #[test]
    fn full_replace_requires_every_field() {
        let errors = RequestValidator::validate(&obj(json!({"name": "Desk"})), false, true);
        assert_eq!(errors, vec!["price is required", "stock is required"]);
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        let errors = RequestValidator::validate(&obj(json!({"name": "é", "price": 1, "stock": 1})), true, false);
        assert_eq!(errors, vec!["name must be at least 2 characters"]);
    }
}
