//! Data transfer objects for the catalog API
//!
//! Thin wire-level representations that do not stand on their own as
//! business entities: submission acknowledgements and pagination cursors.

pub mod catalog_set;
pub mod job;
