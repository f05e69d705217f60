//! Listing query parameters.

use recipes_core::api_models::{InvalidPageError, PageRequest};
use recipes_core::ids::CategoryId;
use serde::Deserialize;

use super::errors::{EndpointResponseBuilder, EndpointResult, ErrorReason};


pub const DEFAULT_PAGE: i64 = 1;


/// Reads an integer query parameter: a missing parameter yields `default`,
/// and a value that isn't an integer yields `0`.
pub fn integer_query_parameter(value: Option<&str>, default: i64) -> i64 {
    match value {
        Some(value) => value.trim().parse::<i64>().unwrap_or(0),
        None => default,
    }
}


#[derive(Deserialize, Clone, Debug, Default)]
pub struct PageQuery {
    page: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> i64 {
        integer_query_parameter(self.page.as_deref(), DEFAULT_PAGE)
    }
}


#[derive(Deserialize, Clone, Debug, Default)]
pub struct RecipeListingQuery {
    page: Option<String>,

    filters_category_id: Option<String>,
}

impl RecipeListingQuery {
    pub fn page(&self) -> i64 {
        integer_query_parameter(self.page.as_deref(), DEFAULT_PAGE)
    }

    /// The requested category filter, if it could name a category at all.
    ///
    /// Whether the category exists is up to the caller to check.
    pub fn category_filter(&self) -> Option<CategoryId> {
        let raw_category_id = integer_query_parameter(self.filters_category_id.as_deref(), 0);

        if raw_category_id < 1 {
            return None;
        }

        i32::try_from(raw_category_id).ok().map(CategoryId::new)
    }
}


/// Validates the requested page number, producing a `404 Not Found` response for pages below 1.
pub fn page_request_or_not_found(
    page: i64,
    items_per_page: u32,
) -> Result<PageRequest, EndpointResult> {
    PageRequest::new(page, items_per_page).map_err(|error| {
        let page = match error {
            InvalidPageError::NotPositive { page } => page,
            InvalidPageError::TooLarge { page } => page,
        };

        EndpointResponseBuilder::not_found()
            .with_error_reason(ErrorReason::invalid_page(page))
            .build()
    })
}



#[cfg(test)]
mod test {
    use actix_web::http::StatusCode;
    use actix_web::web;

    use super::*;

    #[test]
    fn parses_integer_parameters_leniently() {
        assert_eq!(integer_query_parameter(None, 1), 1);
        assert_eq!(integer_query_parameter(Some("3"), 1), 3);
        assert_eq!(integer_query_parameter(Some("abc"), 1), 0);
        assert_eq!(integer_query_parameter(Some(""), 1), 0);
        assert_eq!(integer_query_parameter(Some("-2"), 1), -2);
    }

    #[test]
    fn listings_default_to_first_page() {
        let query = web::Query::<PageQuery>::from_query("").unwrap();
        assert_eq!(query.page(), 1);

        let query = web::Query::<RecipeListingQuery>::from_query("").unwrap();
        assert_eq!(query.page(), 1);
        assert_eq!(query.category_filter(), None);
    }

    #[test]
    fn category_filter_ignores_non_positive_and_garbage_values() {
        let query =
            web::Query::<RecipeListingQuery>::from_query("filters_category_id=4&page=2").unwrap();
        assert_eq!(query.category_filter(), Some(CategoryId::new(4)));
        assert_eq!(query.page(), 2);

        for raw_query in [
            "filters_category_id=0",
            "filters_category_id=-1",
            "filters_category_id=abc",
            "filters_category_id=99999999999",
        ] {
            let query = web::Query::<RecipeListingQuery>::from_query(raw_query).unwrap();
            assert_eq!(query.category_filter(), None, "query: {}", raw_query);
        }
    }

    #[test]
    fn pages_below_one_are_not_found() {
        let Err(response) = page_request_or_not_found(0, 10) else {
            panic!("page 0 was accepted");
        };

        assert_eq!(response.unwrap().status(), StatusCode::NOT_FOUND);

        let page_request = page_request_or_not_found(2, 10).unwrap();
        assert_eq!(page_request.offset(), 10);
    }
}
