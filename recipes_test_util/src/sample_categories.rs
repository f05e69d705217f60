use recipes_core::api_models::{
    CategoryDeleteView,
    CategoryFormData,
    CategoryIndexView,
    RenderedView,
};
use recipes_core::ids::CategoryId;
use reqwest::{Method, StatusCode};

use crate::TestServer;


/// A category loaded by the server's fixtures.
///
/// Fixtures are inserted in declaration order right after identity sequences are reset,
/// so their IDs are known.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SampleCategory {
    Breakfast,
    Soups,
    MainCourses,
    Salads,
    Desserts,
    Sauces,
}

impl SampleCategory {
    pub const ALL: [SampleCategory; 6] = [
        SampleCategory::Breakfast,
        SampleCategory::Soups,
        SampleCategory::MainCourses,
        SampleCategory::Salads,
        SampleCategory::Desserts,
        SampleCategory::Sauces,
    ];

    pub fn id(&self) -> CategoryId {
        match self {
            SampleCategory::Breakfast => CategoryId::new(1),
            SampleCategory::Soups => CategoryId::new(2),
            SampleCategory::MainCourses => CategoryId::new(3),
            SampleCategory::Salads => CategoryId::new(4),
            SampleCategory::Desserts => CategoryId::new(5),
            SampleCategory::Sauces => CategoryId::new(6),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SampleCategory::Breakfast => "Breakfast",
            SampleCategory::Soups => "Soups",
            SampleCategory::MainCourses => "Main courses",
            SampleCategory::Salads => "Salads",
            SampleCategory::Desserts => "Desserts",
            SampleCategory::Sauces => "Sauces",
        }
    }

    pub fn recipe_count(&self) -> u64 {
        match self {
            SampleCategory::Salads => 1,
            SampleCategory::Sauces => 0,
            _ => 2,
        }
    }
}


pub async fn fetch_category_page(
    server: &TestServer,
    query: &str,
) -> RenderedView<CategoryIndexView> {
    let response = server
        .request(Method::GET, format!("/category{}", query))
        .send()
        .await;

    response.assert_status_equals(StatusCode::OK);

    response.json_body::<RenderedView<CategoryIndexView>>()
}


/// Submits the category creation form (as JSON). Returns the redirect's flash cookie.
pub async fn create_category(server: &TestServer, access_token: &str, title: &str) -> String {
    let response = server
        .request(Method::POST, "/category/create")
        .with_access_token(access_token)
        .with_json_body(CategoryFormData {
            title: title.to_string(),
        })
        .send()
        .await;

    response.assert_redirects_to("/category");

    response
        .flash_cookie_value()
        .expect("category creation did not set a flash message")
}


/// Opens the delete confirmation form of a category and returns its confirmation token.
pub async fn fetch_category_delete_token(
    server: &TestServer,
    access_token: &str,
    category_id: CategoryId,
) -> String {
    let response = server
        .request(
            Method::GET,
            format!("/category/{}/delete", category_id),
        )
        .with_access_token(access_token)
        .send()
        .await;

    response.assert_status_equals(StatusCode::OK);

    response
        .json_body::<RenderedView<CategoryDeleteView>>()
        .view
        .form
        .values
        .token
}
