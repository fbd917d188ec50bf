//! `invkit-core`: shared building blocks for the inventory API.
//!
//! This crate contains **pure** primitives (no host concerns).

pub mod error;
pub mod id;
pub mod value_object;

pub use error::{ApiError, ApiResult};
pub use id::{ContainerId, PlayerId};
pub use value_object::ValueObject;
