//! Route definitions for the Quayside API.

pub mod auth;
pub mod health;
pub mod statistics;
