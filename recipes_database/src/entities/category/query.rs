use futures_core::stream::BoxStream;
use recipes_core::api_models::PageRequest;
use recipes_core::ids::CategoryId;
use sqlx::PgConnection;

use super::{CategoryModel, InternalCategoryModel};
use crate::{non_negative_count, IntoExternalModel, QueryError, QueryResult};


type RawCategoryStream<'c> = BoxStream<'c, Result<InternalCategoryModel, sqlx::Error>>;

create_async_stream_wrapper!(
    pub struct CategoryStream<'c>;
    transforms stream RawCategoryStream<'c> => stream of QueryResult<CategoryModel>:
        |value|
            value.map(
                |result| result
                    .map(InternalCategoryModel::into_external_model)
                    .map_err(|error| QueryError::SqlxError { error })
            )
);



pub struct CategoryQuery;

impl CategoryQuery {
    /// Streams all categories, ordered by title.
    pub fn get_all_categories(database_connection: &mut PgConnection) -> CategoryStream<'_> {
        let internal_category_stream = sqlx::query_as::<_, InternalCategoryModel>(
            "SELECT id, title, created_at, updated_at \
                FROM recipes.category \
                ORDER BY title ASC, id ASC",
        )
        .fetch(database_connection);

        CategoryStream::new(internal_category_stream)
    }

    pub async fn get_by_id(
        database_connection: &mut PgConnection,
        category_id: CategoryId,
    ) -> QueryResult<Option<CategoryModel>> {
        let internal_category = sqlx::query_as::<_, InternalCategoryModel>(
            "SELECT id, title, created_at, updated_at \
                FROM recipes.category \
                WHERE id = $1",
        )
        .bind(category_id.into_inner())
        .fetch_optional(database_connection)
        .await?;

        Ok(internal_category.map(IntoExternalModel::into_external_model))
    }

    pub async fn exists_by_id(
        database_connection: &mut PgConnection,
        category_id: CategoryId,
    ) -> QueryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM recipes.category WHERE id = $1)",
        )
        .bind(category_id.into_inner())
        .fetch_one(database_connection)
        .await?;

        Ok(exists)
    }

    /// Returns `true` if some category other than `ignored_category_id` already has this title.
    pub async fn exists_by_title(
        database_connection: &mut PgConnection,
        title: &str,
        ignored_category_id: Option<CategoryId>,
    ) -> QueryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS ( \
                    SELECT 1 FROM recipes.category \
                    WHERE title = $1 AND ($2::integer IS NULL OR id <> $2) \
                )",
        )
        .bind(title)
        .bind(ignored_category_id.map(CategoryId::into_inner))
        .fetch_one(database_connection)
        .await?;

        Ok(exists)
    }

    pub async fn count(database_connection: &mut PgConnection) -> QueryResult<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM recipes.category")
            .fetch_one(database_connection)
            .await?;

        non_negative_count(count)
    }

    /// Returns one page of categories, most recently updated first.
    pub async fn get_page(
        database_connection: &mut PgConnection,
        page_request: PageRequest,
    ) -> QueryResult<Vec<CategoryModel>> {
        let internal_categories = sqlx::query_as::<_, InternalCategoryModel>(
            "SELECT id, title, created_at, updated_at \
                FROM recipes.category \
                ORDER BY updated_at DESC, id DESC \
                LIMIT $1 OFFSET $2",
        )
        .bind(page_request.limit())
        .bind(page_request.offset())
        .fetch_all(database_connection)
        .await?;

        Ok(internal_categories
            .into_iter()
            .map(IntoExternalModel::into_external_model)
            .collect())
    }

    /// Number of recipes that belong to the given category.
    pub async fn recipe_count(
        database_connection: &mut PgConnection,
        category_id: CategoryId,
    ) -> QueryResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM recipes.recipe WHERE category_id = $1",
        )
        .bind(category_id.into_inner())
        .fetch_one(database_connection)
        .await?;

        non_negative_count(count)
    }
}
