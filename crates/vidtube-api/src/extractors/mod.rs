//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation and multipart forms.

mod auth;
mod multipart;
mod validated;

pub use auth::{AuthAccount, OptionalAuthAccount};
pub use multipart::MultipartForm;
pub use validated::ValidatedJson;
