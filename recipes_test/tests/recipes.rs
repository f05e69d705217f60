use recipes_core::api_models::{RecipeFormData, RecipeFormPageView, RenderedView};
use recipes_core::ids::CategoryId;
use recipes_test_util::prelude::*;


#[tokio::test]
#[ignore = "requires a running test server at TEST_API_SERVER_URL"]
async fn recipe_listing_defaults_to_first_page() {
    let server = initialize_test_server().await;

    let rendered = fetch_recipe_page(&server, "").await;

    assert_eq!(rendered.view.pagination.current_page, 1);
    assert_eq!(
        rendered.view.pagination.total_item_count,
        SAMPLE_RECIPE_COUNT
    );
    assert_eq!(rendered.view.filters.category_id, None);
}


#[tokio::test]
#[ignore = "requires a running test server at TEST_API_SERVER_URL"]
async fn recipe_listing_can_be_filtered_by_category() {
    let server = initialize_test_server().await;

    for category in SampleCategory::ALL {
        let rendered = fetch_recipe_page(
            &server,
            &format!("?filters_category_id={}", category.id()),
        )
        .await;

        assert_eq!(rendered.view.filters.category_id, Some(category.id()));
        assert_eq!(
            rendered.view.pagination.total_item_count,
            category.recipe_count()
        );
        assert!(rendered
            .view
            .pagination
            .items
            .iter()
            .all(|recipe| recipe.category.id == category.id()
                && recipe.category.title == category.title()));
    }
}


#[tokio::test]
#[ignore = "requires a running test server at TEST_API_SERVER_URL"]
async fn unknown_category_filter_is_ignored() {
    let server = initialize_test_server().await;

    for query in ["?filters_category_id=9999", "?filters_category_id=abc"] {
        let rendered = fetch_recipe_page(&server, query).await;

        assert_eq!(rendered.view.filters.category_id, None);
        assert_eq!(
            rendered.view.pagination.total_item_count,
            SAMPLE_RECIPE_COUNT
        );
    }
}


#[tokio::test]
#[ignore = "requires a running test server at TEST_API_SERVER_URL"]
async fn recipe_with_unknown_category_is_rejected() {
    let server = initialize_test_server().await;
    let access_token = SampleUser::Administrator.login(&server).await;

    let response = server
        .request(Method::POST, "/recipe/create")
        .with_access_token(&access_token)
        .with_json_body(RecipeFormData {
            title: "Lemonade".to_string(),
            content: "Squeeze lemons, add water and sugar.".to_string(),
            category_id: Some(CategoryId::new(9999)),
        })
        .send()
        .await;

    response.assert_status_equals(StatusCode::UNPROCESSABLE_ENTITY);

    let rendered = response.json_body::<RenderedView<RecipeFormPageView>>();

    assert_eq!(
        rendered.view.category_choices.len(),
        SampleCategory::ALL.len()
    );
    assert!(rendered
        .view
        .form
        .errors
        .field("category_id")
        .is_some_and(|errors| errors.iter().any(|error| error.code == "choice")));
}


#[tokio::test]
#[ignore = "requires a running test server at TEST_API_SERVER_URL"]
async fn recipe_can_be_created_and_deleted() {
    let server = initialize_test_server().await;
    let access_token = SampleUser::Administrator.login(&server).await;

    let response = server
        .request(Method::POST, "/recipe/create")
        .with_access_token(&access_token)
        .with_form_body(&[
            ("title", "Hollandaise"),
            ("content", "Whisk yolks over steam, then slowly add melted butter."),
            ("category_id", "6"),
        ])
        .send()
        .await;

    response.assert_redirects_to("/recipe");


    let rendered = fetch_recipe_page(
        &server,
        &format!("?filters_category_id={}", SampleCategory::Sauces.id()),
    )
    .await;

    assert_eq!(rendered.view.pagination.total_item_count, 1);
    let created_recipe = rendered.view.pagination.items[0].clone();
    assert_eq!(created_recipe.title, "Hollandaise");


    let confirmation_token =
        fetch_recipe_delete_token(&server, &access_token, created_recipe.id).await;

    let response = server
        .request(
            Method::DELETE,
            format!("/recipe/{}/delete", created_recipe.id),
        )
        .with_access_token(&access_token)
        .with_form_body(&[("_token", confirmation_token.as_str())])
        .send()
        .await;

    response.assert_redirects_to("/recipe");


    let response = server
        .request(
            Method::GET,
            format!("/recipe/{}", created_recipe.id),
        )
        .send()
        .await;

    response.assert_status_equals(StatusCode::NOT_FOUND);

    let response = server
        .request(
            Method::GET,
            format!("/recipe/{}", SCRAMBLED_EGGS_RECIPE_ID),
        )
        .send()
        .await;

    response.assert_status_equals(StatusCode::OK);
}
