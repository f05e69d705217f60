use recipes_core::api_models::PageRequest;
use recipes_core::ids::{CategoryId, RecipeId};
use sqlx::PgConnection;

use super::{InternalRecipeModel, RecipeModel};
use crate::{non_negative_count, IntoExternalModel, QueryResult};


pub struct RecipeQuery;

impl RecipeQuery {
    pub async fn get_by_id(
        database_connection: &mut PgConnection,
        recipe_id: RecipeId,
    ) -> QueryResult<Option<RecipeModel>> {
        let internal_recipe = sqlx::query_as::<_, InternalRecipeModel>(
            "SELECT \
                    recipe.id, recipe.title, recipe.content, recipe.category_id, \
                    category.title AS category_title, \
                    recipe.created_at, recipe.updated_at \
                FROM recipes.recipe \
                INNER JOIN recipes.category ON category.id = recipe.category_id \
                WHERE recipe.id = $1",
        )
        .bind(recipe_id.into_inner())
        .fetch_optional(database_connection)
        .await?;

        Ok(internal_recipe.map(IntoExternalModel::into_external_model))
    }

    /// Counts recipes, optionally only those in `category_filter`.
    pub async fn count(
        database_connection: &mut PgConnection,
        category_filter: Option<CategoryId>,
    ) -> QueryResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM recipes.recipe \
                WHERE ($1::integer IS NULL OR category_id = $1)",
        )
        .bind(category_filter.map(CategoryId::into_inner))
        .fetch_one(database_connection)
        .await?;

        non_negative_count(count)
    }

    /// Returns one page of recipes, most recently updated first,
    /// optionally only those in `category_filter`.
    pub async fn get_page(
        database_connection: &mut PgConnection,
        page_request: PageRequest,
        category_filter: Option<CategoryId>,
    ) -> QueryResult<Vec<RecipeModel>> {
        let internal_recipes = sqlx::query_as::<_, InternalRecipeModel>(
            "SELECT \
                    recipe.id, recipe.title, recipe.content, recipe.category_id, \
                    category.title AS category_title, \
                    recipe.created_at, recipe.updated_at \
                FROM recipes.recipe \
                INNER JOIN recipes.category ON category.id = recipe.category_id \
                WHERE ($1::integer IS NULL OR recipe.category_id = $1) \
                ORDER BY recipe.updated_at DESC, recipe.id DESC \
                LIMIT $2 OFFSET $3",
        )
        .bind(category_filter.map(CategoryId::into_inner))
        .bind(page_request.limit())
        .bind(page_request.offset())
        .fetch_all(database_connection)
        .await?;

        Ok(internal_recipes
            .into_iter()
            .map(IntoExternalModel::into_external_model)
            .collect())
    }
}
