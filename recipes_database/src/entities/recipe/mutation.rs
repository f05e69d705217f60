use chrono::Utc;
use recipes_core::ids::{CategoryId, RecipeId};
use sqlx::{PgConnection, Postgres, QueryBuilder};

use super::{InternalRecipeModel, RecipeModel};
use crate::{IntoExternalModel, QueryError, QueryResult};



#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NewRecipe {
    pub title: String,
    pub content: String,
    pub category_id: CategoryId,
}



#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct RecipeValuesToUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<CategoryId>,
}

impl RecipeValuesToUpdate {
    fn has_any_values_to_update(&self) -> bool {
        self.title.is_some() || self.content.is_some() || self.category_id.is_some()
    }
}


fn build_recipe_update_query(
    recipe_id: RecipeId,
    values_to_update: RecipeValuesToUpdate,
) -> QueryBuilder<'static, Postgres> {
    let mut update_query_builder = QueryBuilder::new("UPDATE recipes.recipe SET updated_at = ");
    update_query_builder.push_bind(Utc::now());

    if let Some(new_title) = values_to_update.title {
        update_query_builder.push(", title = ");
        update_query_builder.push_bind(new_title);
    }

    if let Some(new_content) = values_to_update.content {
        update_query_builder.push(", content = ");
        update_query_builder.push_bind(new_content);
    }

    if let Some(new_category_id) = values_to_update.category_id {
        update_query_builder.push(", category_id = ");
        update_query_builder.push_bind(new_category_id.into_inner());
    }

    update_query_builder.push(" WHERE id = ");
    update_query_builder.push_bind(recipe_id.into_inner());

    update_query_builder
}



pub struct RecipeMutation;

impl RecipeMutation {
    /// Inserts a new recipe. The category must exist.
    pub async fn create(
        database_connection: &mut PgConnection,
        new_recipe: NewRecipe,
    ) -> QueryResult<RecipeModel> {
        let created_at = Utc::now();

        let newly_created_recipe = sqlx::query_as::<_, InternalRecipeModel>(
            "WITH inserted_recipe AS ( \
                    INSERT INTO recipes.recipe \
                        (title, content, category_id, created_at, updated_at) \
                        VALUES ($1, $2, $3, $4, $5) \
                        RETURNING id, title, content, category_id, created_at, updated_at \
                ) \
                SELECT \
                    inserted_recipe.id, inserted_recipe.title, inserted_recipe.content, \
                    inserted_recipe.category_id, category.title AS category_title, \
                    inserted_recipe.created_at, inserted_recipe.updated_at \
                FROM inserted_recipe \
                INNER JOIN recipes.category ON category.id = inserted_recipe.category_id",
        )
        .bind(new_recipe.title)
        .bind(new_recipe.content)
        .bind(new_recipe.category_id.into_inner())
        .bind(created_at)
        .bind(created_at)
        .fetch_one(database_connection)
        .await?;

        Ok(newly_created_recipe.into_external_model())
    }

    /// Updates the given recipe, refreshing its `updated_at` timestamp.
    /// Returns `false` if no such recipe exists.
    pub async fn update(
        database_connection: &mut PgConnection,
        recipe_id: RecipeId,
        recipe_values_to_update: RecipeValuesToUpdate,
    ) -> QueryResult<bool> {
        if !recipe_values_to_update.has_any_values_to_update() {
            return Ok(true);
        }

        let mut update_query_builder =
            build_recipe_update_query(recipe_id, recipe_values_to_update);

        let query_result = update_query_builder
            .build()
            .execute(database_connection)
            .await?;

        Ok(query_result.rows_affected() == 1)
    }

    pub async fn delete(
        database_connection: &mut PgConnection,
        recipe_id: RecipeId,
    ) -> QueryResult<bool> {
        let query_result = sqlx::query("DELETE FROM recipes.recipe WHERE id = $1")
            .bind(recipe_id.into_inner())
            .execute(database_connection)
            .await?;

        if query_result.rows_affected() > 1 {
            return Err(QueryError::database_inconsistency(
                "attempted to delete a recipe by ID, but more than one row matched",
            ));
        }

        Ok(query_result.rows_affected() == 1)
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn update_query_only_sets_provided_values() {
        let query_builder = build_recipe_update_query(
            RecipeId::new(7),
            RecipeValuesToUpdate {
                title: None,
                content: Some("Stir well.".to_string()),
                category_id: Some(CategoryId::new(2)),
            },
        );

        assert_eq!(
            query_builder.sql(),
            "UPDATE recipes.recipe SET updated_at = $1, content = $2, category_id = $3 WHERE id = $4"
        );
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(!RecipeValuesToUpdate::default().has_any_values_to_update());
    }
}
