//! Database models and DTOs.

pub mod project;
pub mod user;
