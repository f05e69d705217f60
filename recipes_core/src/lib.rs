//! Types shared between the server, the database layer and API clients:
//! strongly-typed identifiers, request/response models and flash message identifiers.

pub mod api_models;
pub mod ids;
pub mod messages;
