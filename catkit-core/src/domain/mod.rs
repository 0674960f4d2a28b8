//! Core domain types
//!
//! Business entities shared between the client crate (which moves them over
//! the wire) and the CLI (which renders them).

pub mod catalog_set;
pub mod document;
pub mod task;
