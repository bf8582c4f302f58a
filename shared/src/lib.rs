//! Shared types for the Marblecraft platform: domain enums, request/response
//! DTOs and platform-wide constants used by the backend and admin tooling.

pub mod constants;
pub mod dto;
pub mod types;

pub use constants::*;
pub use dto::*;
pub use types::*;
