//! Data Transfer Objects for REST request/response serialization.

pub mod state_dto;
pub mod tool_dto;

pub use state_dto::*;
pub use tool_dto::*;
