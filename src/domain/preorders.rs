//! Pre-order form values and their conversion into the API payload.

use std::collections::BTreeMap;

use treestand_api_types::{PREORDER_TYPED_FIELDS, PreorderRequest};

/// Quantity submitted when the form leaves it blank or unparsable.
pub const DEFAULT_QUANTITY: u32 = 1;

/// Values of the pre-order form at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreorderForm {
    pub fields: BTreeMap<String, String>,
    pub want_installation: bool,
    pub want_tree_decorating: bool,
    pub want_tree_removal: bool,
}

impl Default for PreorderForm {
    /// A freshly reset form: installation is pre-checked, everything else empty.
    fn default() -> Self {
        Self {
            fields: BTreeMap::new(),
            want_installation: true,
            want_tree_decorating: false,
            want_tree_removal: false,
        }
    }
}

impl PreorderForm {
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn quantity(&self) -> u32 {
        self.fields
            .get("quantity")
            .and_then(|raw| parse_quantity(raw))
            .unwrap_or(DEFAULT_QUANTITY)
    }

    pub fn into_request(self) -> PreorderRequest {
        let quantity = self.quantity();
        let fields = self
            .fields
            .into_iter()
            .filter(|(name, _)| !PREORDER_TYPED_FIELDS.contains(&name.as_str()))
            .collect();

        PreorderRequest {
            fields,
            want_installation: self.want_installation,
            want_tree_decorating: self.want_tree_decorating,
            want_tree_removal: self.want_tree_removal,
            quantity,
        }
    }
}

fn parse_quantity(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_defaults_when_missing_or_garbage() {
        assert_eq!(PreorderForm::default().quantity(), 1);
        assert_eq!(
            PreorderForm::default().with_field("quantity", "").quantity(),
            1
        );
        assert_eq!(
            PreorderForm::default()
                .with_field("quantity", "two")
                .quantity(),
            1
        );
        assert_eq!(
            PreorderForm::default().with_field("quantity", " 3 ").quantity(),
            3
        );
    }

    #[test]
    fn typed_fields_are_not_duplicated_in_text_fields() {
        let request = PreorderForm::default()
            .with_field("name", "Robin")
            .with_field("quantity", "2")
            .with_field("want_tree_removal", "on")
            .into_request();

        assert_eq!(request.quantity, 2);
        assert_eq!(request.fields.get("name").map(String::as_str), Some("Robin"));
        assert!(!request.fields.contains_key("quantity"));
        assert!(!request.fields.contains_key("want_tree_removal"));
    }

    #[test]
    fn reset_form_prechecks_installation() {
        let form = PreorderForm::default();
        assert!(form.want_installation);
        assert!(!form.want_tree_decorating);
        assert!(!form.want_tree_removal);
    }
}
