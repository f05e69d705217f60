//! Client-side helpers for end-to-end tests against a running recipes server
//! (one built with the `with_test_facilities` feature).

pub mod prelude;
mod response;
pub mod sample_categories;
pub mod sample_recipes;
pub mod sample_users;
mod server;
pub use response::*;
pub use server::*;
