//! Core data model for the OpenTRV generic data platform
//!
//! This crate provides the value types shared across the platform: a
//! hierarchical [`Topic`] path and a timestamped [`Record`] measurement.

mod record;
mod topic;

pub use record::Record;
pub use topic::{Topic, TopicError};

/// Default topic path separator
pub const DEFAULT_SEPARATOR: char = '/';
