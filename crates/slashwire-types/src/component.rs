//! Message components: buttons, select menus and the rows that hold them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentType(pub u8);

impl ComponentType {
    /// Container row; the only component valid at the top level.
    pub const ACTION_ROW: Self = Self(1);
    pub const BUTTON: Self = Self(2);
    pub const STRING_SELECT: Self = Self(3);
    pub const TEXT_INPUT: Self = Self(4);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ButtonStyle(pub u8);

impl ButtonStyle {
    pub const PRIMARY: Self = Self(1);
    pub const SECONDARY: Self = Self(2);
    pub const SUCCESS: Self = Self(3);
    pub const DANGER: Self = Self(4);
    /// Opens `url` instead of emitting an interaction; takes no custom_id.
    pub const LINK: Self = Self(5);
}

/// One node of a component tree. The platform uses a single shape for rows,
/// buttons and selects, discriminated by `type`, so this struct carries the
/// union of their fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    #[serde(rename = "type")]
    pub kind: ComponentType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Component>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ButtonStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_values: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_values: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
}

impl Component {
    /// A row wrapping the given children.
    pub fn action_row(components: Vec<Component>) -> Self {
        Self {
            kind: ComponentType::ACTION_ROW,
            components,
            label: None,
            style: None,
            custom_id: None,
            disabled: None,
            emoji: None,
            url: None,
            placeholder: None,
            min_values: None,
            max_values: None,
            options: None,
        }
    }

    pub fn button(
        style: ButtonStyle,
        label: impl Into<String>,
        custom_id: impl Into<String>,
    ) -> Self {
        Self {
            kind: ComponentType::BUTTON,
            components: Vec::new(),
            label: Some(label.into()),
            style: Some(style),
            custom_id: Some(custom_id.into()),
            disabled: None,
            emoji: None,
            url: None,
            placeholder: None,
            min_values: None,
            max_values: None,
            options: None,
        }
    }
}

/// One entry of a select menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_button_row_wire_form() {
        let row = Component::action_row(vec![Component::button(
            ButtonStyle::PRIMARY,
            "Click me",
            "click_one",
        )]);

        let encoded = serde_json::to_value(&row).unwrap();
        assert_eq!(
            encoded,
            json!({
                "type": 1,
                "components": [
                    {
                        "type": 2,
                        "label": "Click me",
                        "style": 1,
                        "custom_id": "click_one"
                    }
                ]
            })
        );
    }

    #[test]
    fn test_decode_select_menu() {
        let component: Component = serde_json::from_value(json!({
            "type": 3,
            "custom_id": "pick_color",
            "options": [
                { "label": "Red", "value": "red" },
                { "label": "Blue", "value": "blue", "default": true }
            ]
        }))
        .unwrap();

        assert_eq!(component.kind, ComponentType::STRING_SELECT);
        let options = component.options.unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[1].default, Some(true));
    }
}
