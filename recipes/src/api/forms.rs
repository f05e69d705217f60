//! Binding of submitted form bodies.

use actix_web::web;
use actix_web::Either;
use recipes_core::api_models::FormErrors;
use validator::Validate;


/// A submitted form body, either `application/json` or `application/x-www-form-urlencoded`.
///
/// A missing or undecodable body becomes `None` and is treated as an empty submission,
/// which then fails validation like any other incomplete form.
pub type FormPayload<T> = Option<Either<web::Json<T>, web::Form<T>>>;


/// Returns the submitted values, or the form's defaults if nothing usable was submitted.
pub fn submitted_values<T>(payload: FormPayload<T>) -> T
where
    T: Default,
{
    match payload {
        Some(Either::Left(json)) => json.into_inner(),
        Some(Either::Right(form)) => form.into_inner(),
        None => T::default(),
    }
}


/// Runs the derived validations of a form and collects their errors by field.
pub fn validate_form<T>(values: &T) -> FormErrors
where
    T: Validate,
{
    match values.validate() {
        Ok(()) => FormErrors::new(),
        Err(validation_errors) => FormErrors::from_validation_errors(&validation_errors),
    }
}



#[cfg(test)]
mod test {
    use actix_web::http::header;
    use actix_web::{test, FromRequest};
    use recipes_core::api_models::{CategoryFormData, RecipeFormData};
    use recipes_core::ids::CategoryId;

    use super::*;

    async fn extract_urlencoded_recipe_form(body: &'static str) -> RecipeFormData {
        let (request, mut payload) = test::TestRequest::post()
            .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
            .set_payload(body)
            .to_http_parts();

        let extracted = FormPayload::<RecipeFormData>::from_request(&request, &mut payload)
            .await
            .unwrap();

        submitted_values(extracted)
    }

    #[::core::prelude::v1::test]
    fn missing_payload_becomes_an_invalid_empty_form() {
        let values = submitted_values::<CategoryFormData>(None);
        assert_eq!(values, CategoryFormData::default());

        let errors = validate_form(&values);
        assert!(errors.field("title").is_some());
    }

    #[::core::prelude::v1::test]
    fn json_and_urlencoded_payloads_bind_the_same_values() {
        let from_json = submitted_values(Some(Either::Left(web::Json(CategoryFormData {
            title: "Drinks".to_string(),
        }))));

        let from_form = submitted_values(Some(Either::Right(web::Form(CategoryFormData {
            title: "Drinks".to_string(),
        }))));

        assert_eq!(from_json, from_form);
        assert!(validate_form(&from_json).is_empty());
    }

    #[actix_web::test]
    async fn unusable_category_keeps_the_other_submitted_values() {
        for body in [
            "title=Pancakes&content=Flour+eggs+milk&category_id=",
            "title=Pancakes&content=Flour+eggs+milk&category_id=abc",
        ] {
            let values = extract_urlencoded_recipe_form(body).await;

            assert_eq!(values.title, "Pancakes", "for {}", body);
            assert_eq!(values.content, "Flour eggs milk");
            assert_eq!(values.category_id, None);

            let errors = validate_form(&values);
            assert!(errors.field("title").is_none());
            assert!(errors.field("content").is_none());
            assert!(errors.field("category_id").is_some());
        }
    }

    #[actix_web::test]
    async fn urlencoded_category_binds_as_id() {
        let values =
            extract_urlencoded_recipe_form("title=Pancakes&content=Flour+eggs+milk&category_id=4")
                .await;

        assert_eq!(values.category_id, Some(CategoryId::new(4)));
        assert!(validate_form(&values).is_empty());
    }
}
