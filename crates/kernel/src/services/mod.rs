//! Kernel services that are not tied to a single collection.

pub mod token;
