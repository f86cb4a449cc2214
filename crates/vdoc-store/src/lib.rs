//! GridDB Web API client for documentary metadata.

pub mod client;
pub mod error;

pub use client::{GridDbClient, GridDbConfig};
pub use error::{StoreError, StoreResult};
