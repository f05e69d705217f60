use actix_web::http::StatusCode;
use actix_web::{delete, get, post, put, web};
use futures_util::StreamExt;
use recipes_core::api_models::{
    CategorySummary,
    DeleteConfirmationFormData,
    FormErrors,
    FormFieldError,
    FormView,
    Page,
    RecipeDeleteView,
    RecipeFormData,
    RecipeFormPageView,
    RecipeIndexView,
    RecipeListFilters,
    RecipeShowView,
    CONFIRMATION_TOKEN_FIELD_NAME,
};
use recipes_core::ids::{CategoryId, RecipeId};
use recipes_core::messages::{FlashMessage, MessageId};
use recipes_database::entities::{self, NewRecipe, RecipeValuesToUpdate};
use recipes_database::QueryResult;
use sqlx::{Connection, PgConnection};
use tracing::info;

use crate::api::errors::{EndpointError, EndpointResponseBuilder, EndpointResult, RecipeErrorReason};
use crate::api::flash::PendingFlashMessages;
use crate::api::forms::{submitted_values, validate_form, FormPayload};
use crate::api::pagination::{page_request_or_not_found, RecipeListingQuery};
use crate::api::traits::IntoApiModel;
use crate::authentication::UserAuthenticationExtractor;
use crate::require_content_management_role;
use crate::state::ApplicationState;



const RECIPE_LIST_PATH: &str = "/recipe";

const RECIPE_FORM_NAME: &str = "recipe";
const RECIPE_DELETE_FORM_NAME: &str = "recipe_delete";


fn delete_confirmation_intent(recipe_id: RecipeId) -> String {
    format!("recipe_delete:{}", recipe_id)
}

fn recipe_not_found() -> EndpointResult {
    EndpointResponseBuilder::not_found()
        .with_error_reason(RecipeErrorReason::recipe_not_found())
        .build()
}


fn creation_form(values: RecipeFormData) -> FormView<RecipeFormData> {
    FormView::new(RECIPE_FORM_NAME, "POST", "/recipe/create", values)
}

fn edit_form(recipe_id: RecipeId, values: RecipeFormData) -> FormView<RecipeFormData> {
    FormView::new(
        RECIPE_FORM_NAME,
        "PUT",
        format!("/recipe/{}/edit", recipe_id),
        values,
    )
}

fn delete_form(
    recipe_id: RecipeId,
    confirmation_token: String,
) -> FormView<DeleteConfirmationFormData> {
    FormView::new(
        RECIPE_DELETE_FORM_NAME,
        "DELETE",
        format!("/recipe/{}/delete", recipe_id),
        DeleteConfirmationFormData {
            token: confirmation_token,
        },
    )
}


/// All categories, as choices for the recipe form.
async fn load_category_choices(
    database_connection: &mut PgConnection,
) -> QueryResult<Vec<CategorySummary>> {
    let mut category_stream = entities::CategoryQuery::get_all_categories(database_connection);

    let mut category_choices = Vec::new();
    while let Some(category) = category_stream.next().await {
        category_choices.push(category?.into_api_model());
    }

    Ok(category_choices)
}


/// Field validation plus the check that the chosen category exists.
async fn validate_recipe_form(
    database_connection: &mut PgConnection,
    values: &RecipeFormData,
) -> QueryResult<FormErrors> {
    let mut form_errors = validate_form(values);

    if let Some(category_id) = values.category_id {
        let category_exists =
            entities::CategoryQuery::exists_by_id(database_connection, category_id).await?;

        if !category_exists {
            form_errors.add(
                "category_id",
                FormFieldError::with_message("choice", "The selected category does not exist."),
            );
        }
    }

    Ok(form_errors)
}


/// Extracts the category of a validated form.
fn validated_category_id(values: &RecipeFormData) -> Result<CategoryId, EndpointError> {
    values.category_id.ok_or_else(|| {
        EndpointError::internal_error_with_reason(
            "recipe form passed validation without a category",
        )
    })
}



/// List recipes
///
/// Renders one page of recipes, most recently updated first.
/// The page is selected with the `page` query parameter (defaults to 1);
/// pages below 1 result in `404 Not Found`.
///
/// The `filters_category_id` query parameter restricts the list to a single category.
/// It is ignored when it doesn't name an existing category.
///
/// # Authentication
/// This endpoint does not require authentication.
#[get("")]
pub async fn list_recipes(
    state: ApplicationState,
    flashes: PendingFlashMessages,
    query: web::Query<RecipeListingQuery>,
) -> EndpointResult {
    let page_request = match page_request_or_not_found(query.page(), state.items_per_page()) {
        Ok(page_request) => page_request,
        Err(response) => return response,
    };


    let mut database_connection = state.acquire_database_connection().await?;

    let category_filter = match query.category_filter() {
        Some(category_id) => {
            let category_exists =
                entities::CategoryQuery::exists_by_id(&mut database_connection, category_id)
                    .await?;

            category_exists.then_some(category_id)
        }
        None => None,
    };


    let total_recipe_count =
        entities::RecipeQuery::count(&mut database_connection, category_filter).await?;

    let recipes = entities::RecipeQuery::get_page(
        &mut database_connection,
        page_request,
        category_filter,
    )
    .await?;


    flashes.render(
        StatusCode::OK,
        RecipeIndexView {
            pagination: Page::new(
                page_request,
                recipes
                    .into_iter()
                    .map(|recipe| recipe.into_api_model())
                    .collect(),
                total_recipe_count,
            ),
            filters: RecipeListFilters {
                category_id: category_filter,
            },
        },
    )
}



/// Get recipe
///
/// # Authentication
/// This endpoint does not require authentication.
#[get(r"/{recipe_id:[1-9]\d*}")]
pub async fn show_recipe(
    state: ApplicationState,
    flashes: PendingFlashMessages,
    parameters: web::Path<(RecipeId,)>,
) -> EndpointResult {
    let recipe_id = parameters.into_inner().0;

    let mut database_connection = state.acquire_database_connection().await?;

    let Some(recipe) = entities::RecipeQuery::get_by_id(&mut database_connection, recipe_id).await?
    else {
        return recipe_not_found();
    };


    flashes.render(
        StatusCode::OK,
        RecipeShowView {
            recipe: recipe.into_api_model(),
        },
    )
}



/// Recipe creation form
///
/// # Authentication
/// This endpoint requires authentication and the `administrator` role.
#[get("/create")]
pub async fn new_recipe_form(
    state: ApplicationState,
    flashes: PendingFlashMessages,
    authentication: UserAuthenticationExtractor,
) -> EndpointResult {
    require_content_management_role!(authentication);

    let mut database_connection = state.acquire_database_connection().await?;

    let category_choices = load_category_choices(&mut database_connection).await?;


    flashes.render(
        StatusCode::OK,
        RecipeFormPageView {
            form: creation_form(RecipeFormData::default()),
            recipe: None,
            category_choices,
        },
    )
}


/// Create recipe
///
/// Accepts the recipe form as JSON or as an urlencoded body.
/// On success, redirects to the recipe list with a `message.created_successfully` flash.
/// An invalid submission (including a category that doesn't exist) re-renders
/// the form with field errors (`422 Unprocessable Entity`).
///
/// # Authentication
/// This endpoint requires authentication and the `administrator` role.
#[post("/create")]
pub async fn create_recipe(
    state: ApplicationState,
    flashes: PendingFlashMessages,
    authentication: UserAuthenticationExtractor,
    payload: FormPayload<RecipeFormData>,
) -> EndpointResult {
    let authenticated_user = require_content_management_role!(authentication);

    let submitted_values = submitted_values(payload);


    let mut database_connection = state.acquire_database_connection().await?;
    let mut transaction = database_connection.begin().await?;

    let form_errors = validate_recipe_form(&mut transaction, &submitted_values).await?;

    if !form_errors.is_empty() {
        let category_choices = load_category_choices(&mut transaction).await?;

        return flashes.render(
            StatusCode::UNPROCESSABLE_ENTITY,
            RecipeFormPageView {
                form: creation_form(submitted_values).with_submission_errors(form_errors),
                recipe: None,
                category_choices,
            },
        );
    }


    let category_id = validated_category_id(&submitted_values)?;

    let newly_created_recipe = entities::RecipeMutation::create(
        &mut transaction,
        NewRecipe {
            title: submitted_values.title,
            content: submitted_values.content,
            category_id,
        },
    )
    .await?;

    transaction.commit().await?;


    info!(
        user_id = %authenticated_user.user_id(),
        recipe_id = %newly_created_recipe.id,
        category_id = %category_id,
        "Recipe created."
    );

    flashes.redirect_with(
        RECIPE_LIST_PATH,
        FlashMessage::success(MessageId::CreatedSuccessfully),
    )
}



/// Recipe edit form
///
/// # Authentication
/// This endpoint requires authentication and the `administrator` role.
#[get(r"/{recipe_id:[1-9]\d*}/edit")]
pub async fn edit_recipe_form(
    state: ApplicationState,
    flashes: PendingFlashMessages,
    authentication: UserAuthenticationExtractor,
    parameters: web::Path<(RecipeId,)>,
) -> EndpointResult {
    require_content_management_role!(authentication);

    let recipe_id = parameters.into_inner().0;

    let mut database_connection = state.acquire_database_connection().await?;

    let Some(recipe) = entities::RecipeQuery::get_by_id(&mut database_connection, recipe_id).await?
    else {
        return recipe_not_found();
    };

    let category_choices = load_category_choices(&mut database_connection).await?;


    let current_values = RecipeFormData {
        title: recipe.title.clone(),
        content: recipe.content.clone(),
        category_id: Some(recipe.category_id),
    };

    flashes.render(
        StatusCode::OK,
        RecipeFormPageView {
            form: edit_form(recipe_id, current_values),
            recipe: Some(recipe.into_api_model()),
            category_choices,
        },
    )
}


/// Update recipe
///
/// On success, redirects to the recipe list with a `message.edited_successfully` flash.
/// An invalid submission re-renders the form with field errors (`422 Unprocessable Entity`).
///
/// # Authentication
/// This endpoint requires authentication and the `administrator` role.
#[put(r"/{recipe_id:[1-9]\d*}/edit")]
pub async fn update_recipe(
    state: ApplicationState,
    flashes: PendingFlashMessages,
    authentication: UserAuthenticationExtractor,
    parameters: web::Path<(RecipeId,)>,
    payload: FormPayload<RecipeFormData>,
) -> EndpointResult {
    let authenticated_user = require_content_management_role!(authentication);

    let recipe_id = parameters.into_inner().0;
    let submitted_values = submitted_values(payload);


    let mut database_connection = state.acquire_database_connection().await?;
    let mut transaction = database_connection.begin().await?;

    let Some(recipe) = entities::RecipeQuery::get_by_id(&mut transaction, recipe_id).await?
    else {
        return recipe_not_found();
    };


    let form_errors = validate_recipe_form(&mut transaction, &submitted_values).await?;

    if !form_errors.is_empty() {
        let category_choices = load_category_choices(&mut transaction).await?;

        return flashes.render(
            StatusCode::UNPROCESSABLE_ENTITY,
            RecipeFormPageView {
                form: edit_form(recipe_id, submitted_values).with_submission_errors(form_errors),
                recipe: Some(recipe.into_api_model()),
                category_choices,
            },
        );
    }


    let category_id = validated_category_id(&submitted_values)?;

    let successfully_updated = entities::RecipeMutation::update(
        &mut transaction,
        recipe_id,
        RecipeValuesToUpdate {
            title: Some(submitted_values.title),
            content: Some(submitted_values.content),
            category_id: Some(category_id),
        },
    )
    .await?;

    if !successfully_updated {
        return Err(EndpointError::invalid_database_state(
            "failed to update a recipe that existed \
             in a previous call inside the same transaction",
        ));
    }

    transaction.commit().await?;


    info!(
        user_id = %authenticated_user.user_id(),
        recipe_id = %recipe_id,
        "Recipe updated."
    );

    flashes.redirect_with(
        RECIPE_LIST_PATH,
        FlashMessage::success(MessageId::EditedSuccessfully),
    )
}



/// Recipe delete confirmation
///
/// Renders the delete confirmation form, which carries a `_token` valid
/// only for deleting this recipe.
///
/// # Authentication
/// This endpoint requires authentication and the `administrator` role.
#[get(r"/{recipe_id:[1-9]\d*}/delete")]
pub async fn delete_recipe_confirmation(
    state: ApplicationState,
    flashes: PendingFlashMessages,
    authentication: UserAuthenticationExtractor,
    parameters: web::Path<(RecipeId,)>,
) -> EndpointResult {
    require_content_management_role!(authentication);

    let recipe_id = parameters.into_inner().0;

    let mut database_connection = state.acquire_database_connection().await?;

    let Some(recipe) = entities::RecipeQuery::get_by_id(&mut database_connection, recipe_id).await?
    else {
        return recipe_not_found();
    };


    let confirmation_token = state
        .jwt_manager()
        .create_confirmation_token(&delete_confirmation_intent(recipe_id))?;

    flashes.render(
        StatusCode::OK,
        RecipeDeleteView {
            form: delete_form(recipe_id, confirmation_token),
            recipe: recipe.into_api_model(),
        },
    )
}


/// Delete recipe
///
/// Expects the `_token` from the confirmation form. On success, redirects to the
/// recipe list with a `message.deleted_successfully` flash; a missing or invalid
/// token re-renders the confirmation form (`422 Unprocessable Entity`).
///
/// # Authentication
/// This endpoint requires authentication and the `administrator` role.
#[delete(r"/{recipe_id:[1-9]\d*}/delete")]
pub async fn delete_recipe(
    state: ApplicationState,
    flashes: PendingFlashMessages,
    authentication: UserAuthenticationExtractor,
    parameters: web::Path<(RecipeId,)>,
    payload: FormPayload<DeleteConfirmationFormData>,
) -> EndpointResult {
    let authenticated_user = require_content_management_role!(authentication);

    let recipe_id = parameters.into_inner().0;
    let submitted_values = submitted_values(payload);


    let mut database_connection = state.acquire_database_connection().await?;
    let mut transaction = database_connection.begin().await?;

    let Some(recipe) = entities::RecipeQuery::get_by_id(&mut transaction, recipe_id).await?
    else {
        return recipe_not_found();
    };


    let confirmation_intent = delete_confirmation_intent(recipe_id);

    if !state
        .jwt_manager()
        .verify_confirmation_token(&submitted_values.token, &confirmation_intent)
    {
        let mut form_errors = FormErrors::new();
        form_errors.add(
            CONFIRMATION_TOKEN_FIELD_NAME,
            FormFieldError::with_message(
                "invalid_csrf_token",
                "The confirmation token is invalid. Please try to resubmit the form.",
            ),
        );

        let fresh_confirmation_token = state
            .jwt_manager()
            .create_confirmation_token(&confirmation_intent)?;

        return flashes.render(
            StatusCode::UNPROCESSABLE_ENTITY,
            RecipeDeleteView {
                form: delete_form(recipe_id, fresh_confirmation_token)
                    .with_submission_errors(form_errors),
                recipe: recipe.into_api_model(),
            },
        );
    }


    let successfully_deleted = entities::RecipeMutation::delete(&mut transaction, recipe_id).await?;

    if !successfully_deleted {
        return Err(EndpointError::invalid_database_state(
            "failed to delete a recipe that existed \
             in a previous call inside the same transaction",
        ));
    }

    transaction.commit().await?;


    info!(
        user_id = %authenticated_user.user_id(),
        recipe_id = %recipe_id,
        "Recipe deleted."
    );

    flashes.redirect_with(
        RECIPE_LIST_PATH,
        FlashMessage::success(MessageId::DeletedSuccessfully),
    )
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn forms_point_at_their_submission_routes() {
        let recipe_id = RecipeId::new(12);

        let form = edit_form(recipe_id, RecipeFormData::default());
        assert_eq!(form.method, "PUT");
        assert_eq!(form.action, "/recipe/12/edit");

        let form = delete_form(recipe_id, "token".to_string());
        assert_eq!(form.method, "DELETE");
        assert_eq!(form.action, "/recipe/12/delete");
    }

    #[test]
    fn validated_form_without_category_is_an_internal_error() {
        let values = RecipeFormData {
            title: "Pancakes".to_string(),
            content: "Mix, then fry.".to_string(),
            category_id: None,
        };

        assert!(validated_category_id(&values).is_err());

        let values = RecipeFormData {
            category_id: Some(CategoryId::new(2)),
            ..values
        };

        assert_eq!(
            validated_category_id(&values).unwrap(),
            CategoryId::new(2)
        );
    }

    #[test]
    fn recipe_and_category_confirmation_intents_differ() {
        assert_eq!(
            delete_confirmation_intent(RecipeId::new(3)),
            "recipe_delete:3"
        );
    }
}
