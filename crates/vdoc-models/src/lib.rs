//! Shared data models for the VideoDoc backend.

pub mod frames;
pub mod metadata;
pub mod response;
pub mod slug;

pub use frames::{FrameSet, NarrativeResult};
pub use metadata::{DocumentaryMetadata, NewDocumentary};
pub use response::{GeneratePayload, UploadResponse};
pub use slug::slugify;
