//! resolve-core - Core library for Resolve
//!
//! This crate contains the resolution record model, the durable record
//! store, and the operation layer shared by all Resolve interfaces.

pub mod clock;
pub mod db;
pub mod error;
pub mod ids;
pub mod models;
pub mod service;

pub use error::{Error, Result};
pub use models::{FieldUpdate, Priority, Resolution, ResolutionId, ResolutionPayload};
pub use service::ResolutionService;
