use chrono::Utc;
use recipes_core::ids::CategoryId;
use sqlx::{PgConnection, Postgres, QueryBuilder};

use super::{CategoryModel, InternalCategoryModel};
use crate::{IntoExternalModel, QueryError, QueryResult};



#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NewCategory {
    pub title: String,
}



#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct CategoryValuesToUpdate {
    pub title: Option<String>,
}

impl CategoryValuesToUpdate {
    fn has_any_values_to_update(&self) -> bool {
        self.title.is_some()
    }
}


fn build_category_update_query(
    category_id: CategoryId,
    values_to_update: CategoryValuesToUpdate,
) -> QueryBuilder<'static, Postgres> {
    let mut update_query_builder = QueryBuilder::new("UPDATE recipes.category SET updated_at = ");
    update_query_builder.push_bind(Utc::now());

    if let Some(new_title) = values_to_update.title {
        update_query_builder.push(", title = ");
        update_query_builder.push_bind(new_title);
    }

    update_query_builder.push(" WHERE id = ");
    update_query_builder.push_bind(category_id.into_inner());

    update_query_builder
}



/// Name of the unique constraint on category titles.
pub const CATEGORY_TITLE_UNIQUE_CONSTRAINT: &str = "category_title_unique";


pub struct CategoryMutation;

impl CategoryMutation {
    pub async fn create(
        database_connection: &mut PgConnection,
        new_category: NewCategory,
    ) -> QueryResult<CategoryModel> {
        let created_at = Utc::now();

        let newly_created_category = sqlx::query_as::<_, InternalCategoryModel>(
            "INSERT INTO recipes.category (title, created_at, updated_at) \
                VALUES ($1, $2, $3) \
                RETURNING id, title, created_at, updated_at",
        )
        .bind(new_category.title)
        .bind(created_at)
        .bind(created_at)
        .fetch_one(database_connection)
        .await?;

        Ok(newly_created_category.into_external_model())
    }

    /// Updates the given category, refreshing its `updated_at` timestamp.
    /// Returns `false` if no such category exists.
    pub async fn update(
        database_connection: &mut PgConnection,
        category_id: CategoryId,
        category_values_to_update: CategoryValuesToUpdate,
    ) -> QueryResult<bool> {
        if !category_values_to_update.has_any_values_to_update() {
            return Ok(true);
        }

        let mut update_query_builder =
            build_category_update_query(category_id, category_values_to_update);

        let query_result = update_query_builder
            .build()
            .execute(database_connection)
            .await?;

        Ok(query_result.rows_affected() == 1)
    }

    /// Deletes the given category. Fails with a foreign key violation
    /// if the category still has recipes.
    pub async fn delete(
        database_connection: &mut PgConnection,
        category_id: CategoryId,
    ) -> QueryResult<bool> {
        let query_result = sqlx::query("DELETE FROM recipes.category WHERE id = $1")
            .bind(category_id.into_inner())
            .execute(database_connection)
            .await?;

        if query_result.rows_affected() > 1 {
            return Err(QueryError::database_inconsistency(
                "attempted to delete a category by ID, but more than one row matched",
            ));
        }

        Ok(query_result.rows_affected() == 1)
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn update_query_always_refreshes_timestamp() {
        let query_builder = build_category_update_query(
            CategoryId::new(3),
            CategoryValuesToUpdate {
                title: Some("Soups".to_string()),
            },
        );

        assert_eq!(
            query_builder.sql(),
            "UPDATE recipes.category SET updated_at = $1, title = $2 WHERE id = $3"
        );
    }
}
