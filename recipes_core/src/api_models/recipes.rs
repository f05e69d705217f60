use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError, DisplayFromStr, PickFirst};
use validator::Validate;

use super::{not_blank, CategorySummary, DeleteConfirmationFormData, FormView, Page};
use crate::ids::{CategoryId, RecipeId};


#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct Recipe {
    pub id: RecipeId,

    pub title: String,

    pub content: String,

    pub category: CategorySummary,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}



/// Fields of the recipe creation and edit forms.
///
/// Whether `category_id` refers to an existing category can't be checked here;
/// the handlers do that against the database.
///
/// `category_id` accepts both numbers and numeric strings (urlencoded bodies only carry strings).
/// An empty or unparsable value binds as `None` instead of rejecting the whole submission.
#[serde_as]
#[derive(Serialize, Deserialize, Validate, PartialEq, Eq, Clone, Debug, Default)]
pub struct RecipeFormData {
    #[serde(default)]
    #[validate(
        length(min = 3, max = 255, message = "Title must be between 3 and 255 characters long."),
        custom(function = "not_blank")
    )]
    pub title: String,

    #[serde(default)]
    #[validate(
        length(min = 1, max = 10000, message = "Content must be between 1 and 10000 characters long."),
        custom(function = "not_blank")
    )]
    pub content: String,

    #[serde(default)]
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[validate(required(message = "Choose a category."))]
    pub category_id: Option<CategoryId>,
}



/// Filters applied to a recipe listing.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct RecipeListFilters {
    pub category_id: Option<CategoryId>,
}


#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct RecipeIndexView {
    pub pagination: Page<Recipe>,

    /// Filters that were actually applied (unknown categories are ignored).
    pub filters: RecipeListFilters,
}


#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct RecipeShowView {
    pub recipe: Recipe,
}


#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct RecipeFormPageView {
    pub form: FormView<RecipeFormData>,

    pub recipe: Option<Recipe>,

    /// Categories the recipe can be assigned to.
    pub category_choices: Vec<CategorySummary>,
}


#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct RecipeDeleteView {
    pub form: FormView<DeleteConfirmationFormData>,

    pub recipe: Recipe,
}
