//! Catkit Core
//!
//! Core types and abstractions for the catkit catalog toolkit.
//!
//! This crate contains:
//! - Domain types: Core business entities (documents, catalog sets, tasks)
//! - DTOs: Data transfer objects exchanged with the catalog API
//! - Poll: The status-polling state machine shared by all async jobs

pub mod domain;
pub mod dto;
pub mod poll;
