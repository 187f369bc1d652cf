use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Add,
    Update,
    Remove,
    Clear,
    Open,
    Close,
    Toggle,
    Checkout,
    Advance,
    Back,
}

/// One scripted user interaction with the storefront.
///
/// `product`, `size` and `color` identify a cart line; `quantity` is the amount
/// to add or the new quantity to set.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct SessionAction {
    pub action: ActionType,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
}

impl SessionAction {
    pub fn new(action: ActionType) -> Self {
        Self {
            action,
            product: None,
            size: None,
            color: None,
            quantity: None,
        }
    }

    pub fn for_product(action: ActionType, product: impl Into<String>) -> Self {
        Self {
            product: Some(product.into()),
            ..Self::new(action)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_deserialization_with_blank_fields() {
        let csv = "action, product, size, color, quantity\nadd, p1, M, , 2\nclear, , , ,";
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(csv.as_bytes());
        let actions: Vec<SessionAction> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .expect("Failed to deserialize actions");

        assert_eq!(actions[0].action, ActionType::Add);
        assert_eq!(actions[0].size.as_deref(), Some("M"));
        assert_eq!(actions[0].color, None);
        assert_eq!(actions[0].quantity, Some(2));
        assert_eq!(actions[1], SessionAction::new(ActionType::Clear));
    }
}
