//! Data Transfer Objects for REST request/response serialization.

pub mod common_dto;
pub mod draft_dto;
pub mod request_dto;

pub use common_dto::*;
pub use draft_dto::*;
pub use request_dto::*;
