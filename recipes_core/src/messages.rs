//! Flash message types and the translatable message identifiers they carry.
//!
//! Message identifiers are translation keys, not human-readable text:
//! clients are expected to look them up in their own translation tables.

use serde::{Deserialize, Serialize};


#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum FlashType {
    #[serde(rename = "success")]
    Success,

    #[serde(rename = "warning")]
    Warning,
}

impl FlashType {
    pub fn name(&self) -> &'static str {
        match self {
            FlashType::Success => "success",
            FlashType::Warning => "warning",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "success" => Some(Self::Success),
            "warning" => Some(Self::Warning),
            _ => None,
        }
    }
}



#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum MessageId {
    #[serde(rename = "message.created_successfully")]
    CreatedSuccessfully,

    #[serde(rename = "message.edited_successfully")]
    EditedSuccessfully,

    #[serde(rename = "message.deleted_successfully")]
    DeletedSuccessfully,

    #[serde(rename = "message.category_contains_recipes")]
    CategoryContainsRecipes,
}

impl MessageId {
    pub fn key(&self) -> &'static str {
        match self {
            MessageId::CreatedSuccessfully => "message.created_successfully",
            MessageId::EditedSuccessfully => "message.edited_successfully",
            MessageId::DeletedSuccessfully => "message.deleted_successfully",
            MessageId::CategoryContainsRecipes => "message.category_contains_recipes",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "message.created_successfully" => Some(Self::CreatedSuccessfully),
            "message.edited_successfully" => Some(Self::EditedSuccessfully),
            "message.deleted_successfully" => Some(Self::DeletedSuccessfully),
            "message.category_contains_recipes" => Some(Self::CategoryContainsRecipes),
            _ => None,
        }
    }
}



/// A single one-time notification, shown on the next rendered view.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug)]
pub struct FlashMessage {
    #[serde(rename = "type")]
    pub flash_type: FlashType,

    pub message: MessageId,
}

impl FlashMessage {
    pub const fn success(message: MessageId) -> Self {
        Self {
            flash_type: FlashType::Success,
            message,
        }
    }

    pub const fn warning(message: MessageId) -> Self {
        Self {
            flash_type: FlashType::Warning,
            message,
        }
    }
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn message_keys_match_serialized_form() {
        for message in [
            MessageId::CreatedSuccessfully,
            MessageId::EditedSuccessfully,
            MessageId::DeletedSuccessfully,
            MessageId::CategoryContainsRecipes,
        ] {
            let serialized = serde_json::to_string(&message).unwrap();

            assert_eq!(serialized, format!("\"{}\"", message.key()));
            assert_eq!(MessageId::from_key(message.key()), Some(message));
        }
    }

    #[test]
    fn flash_message_serializes_with_type_field() {
        let serialized =
            serde_json::to_value(FlashMessage::warning(MessageId::CategoryContainsRecipes))
                .unwrap();

        assert_eq!(
            serialized,
            serde_json::json!({
                "type": "warning",
                "message": "message.category_contains_recipes"
            })
        );
    }
}
