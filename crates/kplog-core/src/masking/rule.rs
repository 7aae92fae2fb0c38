use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::engine::{MaskingService, MaskingType};

const WILDCARD: &str = "*";

/// A field selector paired with the redaction to apply to it
///
/// The selector is a dotted path from the payload root, e.g.
/// `body.customer.email`. A `*` segment matches every key of an object or
/// every element of an array. A named segment applied to an array fans out
/// to each element, and a numeric segment selects a single element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskingRule {
    pub field_selector: String,
    pub masking_type: MaskingType,
}

impl MaskingRule {
    pub fn new(field_selector: impl Into<String>, masking_type: MaskingType) -> Self {
        Self {
            field_selector: field_selector.into(),
            masking_type,
        }
    }

    pub fn full(field_selector: impl Into<String>) -> Self {
        Self::new(field_selector, MaskingType::Full)
    }

    pub fn partial(field_selector: impl Into<String>) -> Self {
        Self::new(field_selector, MaskingType::Partial)
    }

    pub fn email(field_selector: impl Into<String>) -> Self {
        Self::new(field_selector, MaskingType::Email)
    }

    pub fn hash(field_selector: impl Into<String>) -> Self {
        Self::new(field_selector, MaskingType::Hash)
    }

    fn segments(&self) -> Vec<&str> {
        self.field_selector
            .split('.')
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Apply every rule to `payload` in place
///
/// Returns the number of leaves that were masked. A rule that matches
/// nothing is a no-op.
pub fn apply_rules(payload: &mut Value, rules: &[MaskingRule], masker: &dyn MaskingService) -> usize {
    rules
        .iter()
        .map(|rule| {
            let segments = rule.segments();
            if segments.is_empty() {
                return 0;
            }
            mask_path(payload, &segments, rule.masking_type, masker)
        })
        .sum()
}

fn mask_path(
    value: &mut Value,
    segments: &[&str],
    masking_type: MaskingType,
    masker: &dyn MaskingService,
) -> usize {
    let Some((head, rest)) = segments.split_first() else {
        return mask_leaf(value, masking_type, masker);
    };

    match value {
        Value::Object(map) => {
            if *head == WILDCARD {
                map.values_mut()
                    .map(|child| mask_path(child, rest, masking_type, masker))
                    .sum()
            } else {
                map.get_mut(*head)
                    .map(|child| mask_path(child, rest, masking_type, masker))
                    .unwrap_or(0)
            }
        }
        Value::Array(items) => {
            if *head == WILDCARD {
                items
                    .iter_mut()
                    .map(|child| mask_path(child, rest, masking_type, masker))
                    .sum()
            } else if let Ok(index) = head.parse::<usize>() {
                items
                    .get_mut(index)
                    .map(|child| mask_path(child, rest, masking_type, masker))
                    .unwrap_or(0)
            } else {
                items
                    .iter_mut()
                    .map(|child| mask_path(child, segments, masking_type, masker))
                    .sum()
            }
        }
        _ => 0,
    }
}

fn mask_leaf(value: &mut Value, masking_type: MaskingType, masker: &dyn MaskingService) -> usize {
    let raw = match &*value {
        Value::Null => return 0,
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    };
    *value = Value::String(masker.mask(&raw, masking_type));
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::masking::MaskingEngine;
    use serde_json::json;

    #[test]
    fn test_nested_path_is_masked() {
        let mut payload = json!({"body": {"password": "hunter22", "user": "alice"}});
        let masked = apply_rules(
            &mut payload,
            &[MaskingRule::full("body.password")],
            &MaskingEngine::new(),
        );

        assert_eq!(masked, 1);
        assert_eq!(payload["body"]["password"], "********");
        assert_eq!(payload["body"]["user"], "alice");
    }

    #[test]
    fn test_missing_field_is_noop() {
        let mut payload = json!({"body": {"user": "alice"}});
        let before = payload.clone();

        let masked = apply_rules(
            &mut payload,
            &[MaskingRule::full("body.password"), MaskingRule::full("")],
            &MaskingEngine::new(),
        );

        assert_eq!(masked, 0);
        assert_eq!(payload, before);
    }

    #[test]
    fn test_array_fan_out_and_index() {
        let mut payload = json!({"cards": [{"pan": "4111111111111111"}, {"pan": "5500000000000004"}]});
        apply_rules(
            &mut payload,
            &[MaskingRule::partial("cards.pan")],
            &MaskingEngine::new(),
        );
        assert_eq!(payload["cards"][0]["pan"], "************1111");
        assert_eq!(payload["cards"][1]["pan"], "************0004");

        let mut payload = json!({"cards": [{"pan": "4111111111111111"}, {"pan": "5500000000000004"}]});
        apply_rules(
            &mut payload,
            &[MaskingRule::full("cards.1.pan")],
            &MaskingEngine::new(),
        );
        assert_eq!(payload["cards"][0]["pan"], "4111111111111111");
        assert_eq!(payload["cards"][1]["pan"], "********");
    }

    #[test]
    fn test_wildcard_matches_every_key() {
        let mut payload = json!({"headers": {"authorization": "Bearer abc", "x-api-key": "k"}});
        let masked = apply_rules(
            &mut payload,
            &[MaskingRule::full("headers.*")],
            &MaskingEngine::new(),
        );

        assert_eq!(masked, 2);
        assert_eq!(payload["headers"]["authorization"], "********");
        assert_eq!(payload["headers"]["x-api-key"], "********");
    }

    #[test]
    fn test_non_string_leaves_are_stringified() {
        let mut payload = json!({"pin": 123456, "flag": null});
        let masked = apply_rules(
            &mut payload,
            &[MaskingRule::partial("pin"), MaskingRule::full("flag")],
            &MaskingEngine::new(),
        );

        assert_eq!(masked, 1);
        assert_eq!(payload["pin"], "**3456");
        assert!(payload["flag"].is_null());
    }

    #[test]
    fn test_object_and_bool_leaves_are_replaced() {
        let mut payload = json!({"card": {"pan": "4111111111111111"}, "vip": true});
        let masked = apply_rules(
            &mut payload,
            &[MaskingRule::full("card"), MaskingRule::full("vip")],
            &MaskingEngine::new(),
        );

        assert_eq!(masked, 2);
        assert_eq!(payload, json!({"card": "********", "vip": "********"}));
    }
}
