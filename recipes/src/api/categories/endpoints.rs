use actix_web::http::StatusCode;
use actix_web::{delete, get, post, put, web};
use recipes_core::api_models::{
    CategoryDeleteView,
    CategoryFormData,
    CategoryFormPageView,
    CategoryIndexView,
    CategoryShowView,
    DeleteConfirmationFormData,
    FormErrors,
    FormFieldError,
    FormView,
    Page,
    CONFIRMATION_TOKEN_FIELD_NAME,
};
use recipes_core::ids::CategoryId;
use recipes_core::messages::{FlashMessage, MessageId};
use recipes_database::entities::{
    self,
    CategoryValuesToUpdate,
    NewCategory,
    CATEGORY_TITLE_UNIQUE_CONSTRAINT,
};
use recipes_database::QueryResult;
use sqlx::{Connection, PgConnection};
use tracing::info;

use crate::api::errors::{
    CategoryErrorReason,
    EndpointError,
    EndpointResponseBuilder,
    EndpointResult,
};
use crate::api::flash::PendingFlashMessages;
use crate::api::forms::{submitted_values, validate_form, FormPayload};
use crate::api::pagination::{page_request_or_not_found, PageQuery};
use crate::api::traits::IntoApiModel;
use crate::authentication::UserAuthenticationExtractor;
use crate::require_content_management_role;
use crate::state::ApplicationState;



const CATEGORY_LIST_PATH: &str = "/category";

const CATEGORY_FORM_NAME: &str = "category";
const CATEGORY_DELETE_FORM_NAME: &str = "category_delete";


fn delete_confirmation_intent(category_id: CategoryId) -> String {
    format!("category_delete:{}", category_id)
}

fn category_not_found() -> EndpointResult {
    EndpointResponseBuilder::not_found()
        .with_error_reason(CategoryErrorReason::category_not_found())
        .build()
}


fn creation_form(values: CategoryFormData) -> FormView<CategoryFormData> {
    FormView::new(
        CATEGORY_FORM_NAME,
        "POST",
        "/category/create",
        values,
    )
}

fn edit_form(category_id: CategoryId, values: CategoryFormData) -> FormView<CategoryFormData> {
    FormView::new(
        CATEGORY_FORM_NAME,
        "PUT",
        format!("/category/{}/edit", category_id),
        values,
    )
}

fn delete_form(
    category_id: CategoryId,
    confirmation_token: String,
) -> FormView<DeleteConfirmationFormData> {
    FormView::new(
        CATEGORY_DELETE_FORM_NAME,
        "DELETE",
        format!("/category/{}/delete", category_id),
        DeleteConfirmationFormData {
            token: confirmation_token,
        },
    )
}


fn title_taken_error() -> FormFieldError {
    FormFieldError::with_message("unique", "A category with this title already exists.")
}

fn title_taken_form_errors() -> FormErrors {
    let mut form_errors = FormErrors::new();
    form_errors.add("title", title_taken_error());

    form_errors
}


/// Field validation plus the title uniqueness check.
/// `category_being_edited` is excluded from the uniqueness check.
async fn validate_category_form(
    database_connection: &mut PgConnection,
    values: &CategoryFormData,
    category_being_edited: Option<CategoryId>,
) -> QueryResult<FormErrors> {
    let mut form_errors = validate_form(values);

    if form_errors.field("title").is_none() {
        let title_is_taken = entities::CategoryQuery::exists_by_title(
            database_connection,
            &values.title,
            category_being_edited,
        )
        .await?;

        if title_is_taken {
            form_errors.add("title", title_taken_error());
        }
    }

    Ok(form_errors)
}



/// List categories
///
/// Renders one page of categories, most recently updated first.
/// The page is selected with the `page` query parameter (defaults to 1);
/// pages below 1 result in `404 Not Found`.
///
/// # Authentication
/// This endpoint does not require authentication.
#[get("")]
pub async fn list_categories(
    state: ApplicationState,
    flashes: PendingFlashMessages,
    query: web::Query<PageQuery>,
) -> EndpointResult {
    let page_request = match page_request_or_not_found(query.page(), state.items_per_page()) {
        Ok(page_request) => page_request,
        Err(response) => return response,
    };


    let mut database_connection = state.acquire_database_connection().await?;

    let total_category_count = entities::CategoryQuery::count(&mut database_connection).await?;

    let categories =
        entities::CategoryQuery::get_page(&mut database_connection, page_request).await?;


    flashes.render(
        StatusCode::OK,
        CategoryIndexView {
            pagination: Page::new(
                page_request,
                categories
                    .into_iter()
                    .map(|category| category.into_api_model())
                    .collect(),
                total_category_count,
            ),
        },
    )
}



/// Get category
///
/// # Authentication
/// This endpoint does not require authentication.
#[get(r"/{category_id:[1-9]\d*}")]
pub async fn show_category(
    state: ApplicationState,
    flashes: PendingFlashMessages,
    parameters: web::Path<(CategoryId,)>,
) -> EndpointResult {
    let category_id = parameters.into_inner().0;

    let mut database_connection = state.acquire_database_connection().await?;

    let Some(category) =
        entities::CategoryQuery::get_by_id(&mut database_connection, category_id).await?
    else {
        return category_not_found();
    };


    flashes.render(
        StatusCode::OK,
        CategoryShowView {
            category: category.into_api_model(),
        },
    )
}



/// Category creation form
///
/// # Authentication
/// This endpoint requires authentication and the `administrator` role.
#[get("/create")]
pub async fn new_category_form(
    flashes: PendingFlashMessages,
    authentication: UserAuthenticationExtractor,
) -> EndpointResult {
    require_content_management_role!(authentication);

    flashes.render(
        StatusCode::OK,
        CategoryFormPageView {
            form: creation_form(CategoryFormData::default()),
            category: None,
        },
    )
}


/// Create category
///
/// Accepts the category form as JSON or as an urlencoded body.
/// On success, redirects to the category list with a `message.created_successfully` flash.
/// An invalid submission re-renders the form with field errors (`422 Unprocessable Entity`).
///
/// # Authentication
/// This endpoint requires authentication and the `administrator` role.
#[post("/create")]
pub async fn create_category(
    state: ApplicationState,
    flashes: PendingFlashMessages,
    authentication: UserAuthenticationExtractor,
    payload: FormPayload<CategoryFormData>,
) -> EndpointResult {
    let authenticated_user = require_content_management_role!(authentication);

    let submitted_values = submitted_values(payload);


    let mut database_connection = state.acquire_database_connection().await?;
    let mut transaction = database_connection.begin().await?;

    let form_errors = validate_category_form(&mut transaction, &submitted_values, None).await?;

    if !form_errors.is_empty() {
        return flashes.render(
            StatusCode::UNPROCESSABLE_ENTITY,
            CategoryFormPageView {
                form: creation_form(submitted_values).with_submission_errors(form_errors),
                category: None,
            },
        );
    }


    // A concurrent request can take the title between the check above and this insert.
    let creation_result = entities::CategoryMutation::create(
        &mut transaction,
        NewCategory {
            title: submitted_values.title.clone(),
        },
    )
    .await;

    let newly_created_category = match creation_result {
        Ok(category) => category,
        Err(error) if error.is_unique_violation_of(CATEGORY_TITLE_UNIQUE_CONSTRAINT) => {
            return flashes.render(
                StatusCode::UNPROCESSABLE_ENTITY,
                CategoryFormPageView {
                    form: creation_form(submitted_values)
                        .with_submission_errors(title_taken_form_errors()),
                    category: None,
                },
            );
        }
        Err(error) => return Err(error.into()),
    };

    transaction.commit().await?;


    info!(
        user_id = %authenticated_user.user_id(),
        category_id = %newly_created_category.id,
        "Category created."
    );

    flashes.redirect_with(
        CATEGORY_LIST_PATH,
        FlashMessage::success(MessageId::CreatedSuccessfully),
    )
}



/// Category edit form
///
/// # Authentication
/// This endpoint requires authentication and the `administrator` role.
#[get(r"/{category_id:[1-9]\d*}/edit")]
pub async fn edit_category_form(
    state: ApplicationState,
    flashes: PendingFlashMessages,
    authentication: UserAuthenticationExtractor,
    parameters: web::Path<(CategoryId,)>,
) -> EndpointResult {
    require_content_management_role!(authentication);

    let category_id = parameters.into_inner().0;

    let mut database_connection = state.acquire_database_connection().await?;

    let Some(category) =
        entities::CategoryQuery::get_by_id(&mut database_connection, category_id).await?
    else {
        return category_not_found();
    };


    let current_values = CategoryFormData {
        title: category.title.clone(),
    };

    flashes.render(
        StatusCode::OK,
        CategoryFormPageView {
            form: edit_form(category_id, current_values),
            category: Some(category.into_api_model()),
        },
    )
}


/// Update category
///
/// On success, redirects to the category list with a `message.edited_successfully` flash.
/// An invalid submission re-renders the form with field errors (`422 Unprocessable Entity`).
///
/// # Authentication
/// This endpoint requires authentication and the `administrator` role.
#[put(r"/{category_id:[1-9]\d*}/edit")]
pub async fn update_category(
    state: ApplicationState,
    flashes: PendingFlashMessages,
    authentication: UserAuthenticationExtractor,
    parameters: web::Path<(CategoryId,)>,
    payload: FormPayload<CategoryFormData>,
) -> EndpointResult {
    let authenticated_user = require_content_management_role!(authentication);

    let category_id = parameters.into_inner().0;
    let submitted_values = submitted_values(payload);


    let mut database_connection = state.acquire_database_connection().await?;
    let mut transaction = database_connection.begin().await?;

    let Some(category) = entities::CategoryQuery::get_by_id(&mut transaction, category_id).await?
    else {
        return category_not_found();
    };


    let form_errors =
        validate_category_form(&mut transaction, &submitted_values, Some(category_id)).await?;

    if !form_errors.is_empty() {
        return flashes.render(
            StatusCode::UNPROCESSABLE_ENTITY,
            CategoryFormPageView {
                form: edit_form(category_id, submitted_values).with_submission_errors(form_errors),
                category: Some(category.into_api_model()),
            },
        );
    }


    let update_result = entities::CategoryMutation::update(
        &mut transaction,
        category_id,
        CategoryValuesToUpdate {
            title: Some(submitted_values.title.clone()),
        },
    )
    .await;

    let successfully_updated = match update_result {
        Ok(successfully_updated) => successfully_updated,
        Err(error) if error.is_unique_violation_of(CATEGORY_TITLE_UNIQUE_CONSTRAINT) => {
            return flashes.render(
                StatusCode::UNPROCESSABLE_ENTITY,
                CategoryFormPageView {
                    form: edit_form(category_id, submitted_values)
                        .with_submission_errors(title_taken_form_errors()),
                    category: Some(category.into_api_model()),
                },
            );
        }
        Err(error) => return Err(error.into()),
    };

    if !successfully_updated {
        return Err(EndpointError::invalid_database_state(
            "failed to update a category that existed \
             in a previous call inside the same transaction",
        ));
    }

    transaction.commit().await?;


    info!(
        user_id = %authenticated_user.user_id(),
        category_id = %category_id,
        "Category updated."
    );

    flashes.redirect_with(
        CATEGORY_LIST_PATH,
        FlashMessage::success(MessageId::EditedSuccessfully),
    )
}



/// Category delete confirmation
///
/// Renders the delete confirmation form, which carries a `_token` valid
/// only for deleting this category.
///
/// A category that still has recipes can't be deleted: instead of the form, this redirects
/// to the category list with a `message.category_contains_recipes` warning flash.
///
/// # Authentication
/// This endpoint requires authentication and the `administrator` role.
#[get(r"/{category_id:[1-9]\d*}/delete")]
pub async fn delete_category_confirmation(
    state: ApplicationState,
    flashes: PendingFlashMessages,
    authentication: UserAuthenticationExtractor,
    parameters: web::Path<(CategoryId,)>,
) -> EndpointResult {
    require_content_management_role!(authentication);

    let category_id = parameters.into_inner().0;

    let mut database_connection = state.acquire_database_connection().await?;

    let Some(category) =
        entities::CategoryQuery::get_by_id(&mut database_connection, category_id).await?
    else {
        return category_not_found();
    };


    let recipe_count =
        entities::CategoryQuery::recipe_count(&mut database_connection, category_id).await?;

    if recipe_count > 0 {
        return flashes.redirect_with(
            CATEGORY_LIST_PATH,
            FlashMessage::warning(MessageId::CategoryContainsRecipes),
        );
    }


    let confirmation_token = state
        .jwt_manager()
        .create_confirmation_token(&delete_confirmation_intent(category_id))?;

    flashes.render(
        StatusCode::OK,
        CategoryDeleteView {
            form: delete_form(category_id, confirmation_token),
            category: category.into_api_model(),
        },
    )
}


/// Delete category
///
/// Expects the `_token` from the confirmation form. On success, redirects to the
/// category list with a `message.deleted_successfully` flash; a missing or invalid
/// token re-renders the confirmation form (`422 Unprocessable Entity`).
///
/// A category that still has recipes is left in place, and the caller is redirected
/// to the category list with a `message.category_contains_recipes` warning flash.
///
/// # Authentication
/// This endpoint requires authentication and the `administrator` role.
#[delete(r"/{category_id:[1-9]\d*}/delete")]
pub async fn delete_category(
    state: ApplicationState,
    flashes: PendingFlashMessages,
    authentication: UserAuthenticationExtractor,
    parameters: web::Path<(CategoryId,)>,
    payload: FormPayload<DeleteConfirmationFormData>,
) -> EndpointResult {
    let authenticated_user = require_content_management_role!(authentication);

    let category_id = parameters.into_inner().0;
    let submitted_values = submitted_values(payload);


    let mut database_connection = state.acquire_database_connection().await?;
    let mut transaction = database_connection.begin().await?;

    let Some(category) = entities::CategoryQuery::get_by_id(&mut transaction, category_id).await?
    else {
        return category_not_found();
    };


    let recipe_count = entities::CategoryQuery::recipe_count(&mut transaction, category_id).await?;

    if recipe_count > 0 {
        info!(
            category_id = %category_id,
            recipe_count,
            "Refusing to delete a category that still has recipes."
        );

        return flashes.redirect_with(
            CATEGORY_LIST_PATH,
            FlashMessage::warning(MessageId::CategoryContainsRecipes),
        );
    }


    let confirmation_intent = delete_confirmation_intent(category_id);

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
            CategoryDeleteView {
                form: delete_form(category_id, fresh_confirmation_token)
                    .with_submission_errors(form_errors),
                category: category.into_api_model(),
            },
        );
    }


    let successfully_deleted =
        entities::CategoryMutation::delete(&mut transaction, category_id).await?;

    if !successfully_deleted {
        return Err(EndpointError::invalid_database_state(
            "failed to delete a category that existed \
             in a previous call inside the same transaction",
        ));
    }

    transaction.commit().await?;


    info!(
        user_id = %authenticated_user.user_id(),
        category_id = %category_id,
        "Category deleted."
    );

    flashes.redirect_with(
        CATEGORY_LIST_PATH,
        FlashMessage::success(MessageId::DeletedSuccessfully),
    )
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn forms_point_at_their_submission_routes() {
        let category_id = CategoryId::new(7);

        let form = edit_form(category_id, CategoryFormData::default());
        assert_eq!(form.method, "PUT");
        assert_eq!(form.action, "/category/7/edit");

        let form = delete_form(category_id, "token".to_string());
        assert_eq!(form.method, "DELETE");
        assert_eq!(form.action, "/category/7/delete");
        assert_eq!(form.values.token, "token");

        assert_eq!(creation_form(CategoryFormData::default()).method, "POST");
    }

    #[test]
    fn lost_title_race_is_reported_as_unique_error() {
        let form_errors = title_taken_form_errors();

        let title_errors = form_errors.field("title").unwrap();
        assert_eq!(title_errors.len(), 1);
        assert_eq!(title_errors[0].code, "unique");
        assert_eq!(CATEGORY_TITLE_UNIQUE_CONSTRAINT, "category_title_unique");
    }

    #[test]
    fn confirmation_intent_is_specific_to_the_category() {
        assert_eq!(
            delete_confirmation_intent(CategoryId::new(3)),
            "category_delete:3"
        );
        assert_ne!(
            delete_confirmation_intent(CategoryId::new(3)),
            delete_confirmation_intent(CategoryId::new(30))
        );
    }
}
