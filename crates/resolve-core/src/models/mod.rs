//! Data models for Resolve

mod resolution;
mod update;

pub use resolution::{Priority, Resolution, ResolutionId};
pub use update::{FieldUpdate, ResolutionPayload};
