//! Catalog endpoint handlers

mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::{
    is_admin, ApiResponse, AppIndexApi, DetectRequest, ReorderRequest, Session, UpdateAppRequest,
};
