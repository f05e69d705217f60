use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{not_blank, DeleteConfirmationFormData, FormView, Page};
use crate::ids::CategoryId;


#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct Category {
    pub id: CategoryId,

    pub title: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}


/// Identifier and title of a category, used where a full [`Category`] isn't needed
/// (e.g. as the category of a recipe, or as a choice in the recipe form).
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct CategorySummary {
    pub id: CategoryId,

    pub title: String,
}



/// Fields of the category creation and edit forms.
#[derive(Serialize, Deserialize, Validate, PartialEq, Eq, Clone, Debug, Default)]
pub struct CategoryFormData {
    #[serde(default)]
    #[validate(
        length(min = 3, max = 64, message = "Title must be between 3 and 64 characters long."),
        custom(function = "not_blank")
    )]
    pub title: String,
}



#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct CategoryIndexView {
    pub pagination: Page<Category>,
}


#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct CategoryShowView {
    pub category: Category,
}


/// View of the category creation form (`category` is `None`)
/// or of the category edit form (`category` is the category being edited).
#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct CategoryFormPageView {
    pub form: FormView<CategoryFormData>,

    pub category: Option<Category>,
}


#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct CategoryDeleteView {
    pub form: FormView<DeleteConfirmationFormData>,

    pub category: Category,
}



#[cfg(test)]
mod test {
    use validator::Validate;

    use super::*;

    #[test]
    fn validates_title_length() {
        let too_short = CategoryFormData {
            title: "ab".to_string(),
        };
        assert!(too_short.validate().is_err());

        let too_long = CategoryFormData {
            title: "a".repeat(65),
        };
        assert!(too_long.validate().is_err());

        let just_right = CategoryFormData {
            title: "Desserts".to_string(),
        };
        assert!(just_right.validate().is_ok());
    }

    #[test]
    fn missing_title_deserializes_as_empty_and_fails_validation() {
        let form: CategoryFormData = serde_json::from_str("{}").unwrap();

        assert_eq!(form.title, "");
        assert!(form.validate().is_err());
    }
}
