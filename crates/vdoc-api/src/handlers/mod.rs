//! Request handlers.

pub mod generated;
pub mod health;
pub mod metadata;
pub mod upload;
