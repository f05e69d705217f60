use recipes_core::api_models::{RecipeDeleteView, RecipeIndexView, RenderedView};
use recipes_core::ids::RecipeId;
use reqwest::{Method, StatusCode};

use crate::TestServer;


/// Number of recipes loaded by the server's fixtures.
pub const SAMPLE_RECIPE_COUNT: u64 = 9;

/// ID of the first fixture recipe ("Scrambled eggs", in the breakfast category).
pub const SCRAMBLED_EGGS_RECIPE_ID: RecipeId = RecipeId::new(1);


pub async fn fetch_recipe_page(
    server: &TestServer,
    query: &str,
) -> RenderedView<RecipeIndexView> {
    let response = server
        .request(Method::GET, format!("/recipe{}", query))
        .send()
        .await;

    response.assert_status_equals(StatusCode::OK);

    response.json_body::<RenderedView<RecipeIndexView>>()
}


/// Opens the delete confirmation form of a recipe and returns its confirmation token.
pub async fn fetch_recipe_delete_token(
    server: &TestServer,
    access_token: &str,
    recipe_id: RecipeId,
) -> String {
    let response = server
        .request(Method::GET, format!("/recipe/{}/delete", recipe_id))
        .with_access_token(access_token)
        .send()
        .await;

    response.assert_status_equals(StatusCode::OK);

    response
        .json_body::<RenderedView<RecipeDeleteView>>()
        .view
        .form
        .values
        .token
}
