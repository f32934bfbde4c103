//! # Quill Shared
//!
//! Wire types shared between clients and the backend: request/response
//! DTOs and the error-response schema.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
