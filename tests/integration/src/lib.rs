//! Integration test utilities for InstaLike
//!
//! This crate provides helpers for running end-to-end use-case flows
//! against the services wired over in-memory repositories.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
